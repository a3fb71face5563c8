use serde::{Deserialize, Serialize};

use super::action::Direction;

/// A position on the game grid
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Position {
    pub x: i32,
    pub y: i32,
}

impl Position {
    pub fn new(x: i32, y: i32) -> Self {
        Self { x, y }
    }

    /// Move position by delta, wrapping around a `width` x `height` torus
    pub fn wrapped_by(&self, dx: i32, dy: i32, width: usize, height: usize) -> Self {
        let (w, h) = (width as i32, height as i32);
        Self {
            x: (self.x + dx).rem_euclid(w),
            y: (self.y + dy).rem_euclid(h),
        }
    }

    /// Move position one cell in a direction, wrapping at the grid edges
    pub fn wrapped_step(&self, direction: Direction, width: usize, height: usize) -> Self {
        let (dx, dy) = direction.delta();
        self.wrapped_by(dx, dy, width, height)
    }
}

/// The snake in the game
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Snake {
    /// Body segments, with head at index 0
    pub body: Vec<Position>,
    /// Current direction of movement
    pub direction: Direction,
}

impl Snake {
    /// A single-segment snake
    pub fn new(head: Position, direction: Direction) -> Self {
        Self {
            body: vec![head],
            direction,
        }
    }

    /// Build a snake from explicit segments, head first.
    ///
    /// Returns `None` for an empty segment list.
    pub fn from_segments(body: Vec<Position>, direction: Direction) -> Option<Self> {
        if body.is_empty() {
            return None;
        }
        Some(Self { body, direction })
    }

    /// Get the head position
    pub fn head(&self) -> Position {
        self.body[0]
    }

    /// Get the tail position (last segment)
    pub fn tail(&self) -> Position {
        self.body[self.body.len() - 1]
    }

    /// Get body segments (excluding head)
    pub fn body_segments(&self) -> &[Position] {
        &self.body[1..]
    }

    /// Check if position collides with snake body (excluding head)
    pub fn collides_with_body(&self, pos: Position) -> bool {
        self.body_segments().contains(&pos)
    }

    /// The body after moving the head to `new_head` without growing:
    /// every segment takes the place of the one before it and the tail drops.
    pub fn shifted(&self, new_head: Position) -> Vec<Position> {
        let mut body = Vec::with_capacity(self.body.len());
        body.push(new_head);
        body.extend_from_slice(&self.body[..self.body.len() - 1]);
        body
    }

    /// Where a segment grown this tick goes.
    ///
    /// It extends the line of the current movement `direction` backwards from
    /// the tail, whatever way the tail itself is trailing.
    pub fn tail_extension(&self, direction: Direction, width: usize, height: usize) -> Position {
        let (dx, dy) = direction.delta();
        self.tail().wrapped_by(-dx, -dy, width, height)
    }

    /// Get the length of the snake
    pub fn len(&self) -> usize {
        self.body.len()
    }

    /// Always false for snakes built through the constructors
    pub fn is_empty(&self) -> bool {
        self.body.is_empty()
    }
}
