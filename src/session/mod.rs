//! A running game: one task that owns the engine and its tick clock.
//!
//! [`GameSession`] is the surface a view layer talks to. It takes commands,
//! publishes a [`Snapshot`] after every tick and every state change, and
//! reports the end of a game through a callback once the game-over delay
//! has passed.

mod handle;
mod snapshot;
mod task;

pub use handle::GameSession;
pub use snapshot::Snapshot;
