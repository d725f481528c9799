//! Event handling for the viewer.
//!
//! Terminal input is polled on the main thread; there is no background work.

mod handler;

use crossterm::event::KeyEvent;

pub use handler::EventHandler;

/// An application event.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Event {
    /// A key press.
    Key(KeyEvent),
    /// The terminal was resized to (columns, rows).
    Resize(u16, u16),
    /// No input within the tick rate.
    Tick,
}
