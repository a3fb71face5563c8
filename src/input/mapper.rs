use crossterm::event::{KeyCode, KeyEvent, KeyEventKind};

use crate::game::{Direction, GameEngine};
use crate::session::GameSession;

/// Anything that accepts direction commands
pub trait DirectionSink {
    fn on_input(&mut self, direction: Direction);
}

impl DirectionSink for GameEngine {
    fn on_input(&mut self, direction: Direction) {
        GameEngine::on_input(self, direction);
    }
}

impl DirectionSink for GameSession {
    fn on_input(&mut self, direction: Direction) {
        GameSession::on_input(self, direction);
    }
}

/// Maps the numeric keypad's 8/5/6/4 to up/down/right/left; every other key
/// is ignored
#[derive(Debug, Clone, Copy, Default)]
pub struct InputMapper;

impl InputMapper {
    pub fn new() -> Self {
        Self
    }

    pub fn map_key(&self, key: KeyEvent) -> Option<Direction> {
        // Only key presses count, not releases or repeats
        if key.kind != KeyEventKind::Press {
            return None;
        }

        match key.code {
            KeyCode::Char('8') => Some(Direction::Up),
            KeyCode::Char('5') => Some(Direction::Down),
            KeyCode::Char('6') => Some(Direction::Right),
            KeyCode::Char('4') => Some(Direction::Left),
            _ => None,
        }
    }

    /// Map `key` and pass the direction on; returns whether the key was used
    pub fn forward<S: DirectionSink + ?Sized>(&self, key: KeyEvent, sink: &mut S) -> bool {
        match self.map_key(key) {
            Some(direction) => {
                sink.on_input(direction);
                true
            }
            None => false,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::game::GameConfig;
    use crossterm::event::{KeyEventState, KeyModifiers};

    #[derive(Default)]
    struct Recorder(Vec<Direction>);

    impl DirectionSink for Recorder {
        fn on_input(&mut self, direction: Direction) {
            self.0.push(direction);
        }
    }

    #[test]
    fn test_keypad_keys() {
        let mapper = InputMapper::new();

        let cases = [
            ('8', Direction::Up),
            ('5', Direction::Down),
            ('6', Direction::Right),
            ('4', Direction::Left),
        ];
        for (digit, direction) in cases {
            let key = KeyEvent::new(KeyCode::Char(digit), KeyModifiers::NONE);
            assert_eq!(mapper.map_key(key), Some(direction));

            // Terminals with keypad reporting flag the same digits
            let keypad = KeyEvent::new_with_kind_and_state(
                KeyCode::Char(digit),
                KeyModifiers::NONE,
                KeyEventKind::Press,
                KeyEventState::KEYPAD,
            );
            assert_eq!(mapper.map_key(keypad), Some(direction));
        }
    }

    #[test]
    fn test_other_keys_ignored() {
        let mapper = InputMapper::new();

        for code in [
            KeyCode::Up,
            KeyCode::Left,
            KeyCode::Char('2'),
            KeyCode::Char('w'),
            KeyCode::Esc,
            KeyCode::Enter,
        ] {
            let key = KeyEvent::new(code, KeyModifiers::NONE);
            assert_eq!(mapper.map_key(key), None);
        }
    }

    #[test]
    fn test_release_ignored() {
        let mapper = InputMapper::new();
        let release = KeyEvent {
            code: KeyCode::Char('8'),
            modifiers: KeyModifiers::NONE,
            kind: KeyEventKind::Release,
            state: KeyEventState::NONE,
        };
        assert_eq!(mapper.map_key(release), None);
    }

    #[test]
    fn test_forward_to_sink() {
        let mapper = InputMapper::new();
        let mut recorder = Recorder::default();

        let key = |c| KeyEvent::new(KeyCode::Char(c), KeyModifiers::NONE);
        assert!(mapper.forward(key('4'), &mut recorder));
        assert!(!mapper.forward(key('x'), &mut recorder));
        assert!(mapper.forward(key('5'), &mut recorder));

        assert_eq!(recorder.0, vec![Direction::Left, Direction::Down]);
    }

    #[test]
    fn test_forward_to_engine() {
        let mapper = InputMapper::new();
        let mut engine = GameEngine::new(GameConfig::small()).unwrap();
        engine.start();

        mapper.forward(KeyEvent::new(KeyCode::Char('8'), KeyModifiers::NONE), &mut engine);

        assert_eq!(engine.pending_direction(), Direction::Up);
    }
}
