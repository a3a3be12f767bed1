//! Publish-flow service layer
//!
//! Orchestrates the resolve-then-publish flow behind a single call and
//! exposes its progress as events, so UI layers (CLI today) can render
//! busy/success/failure states without reaching into the components.

pub mod compose;
pub mod events;

pub use compose::ComposeService;
pub use events::{ComposerState, Event, EventBus, EventReceiver};
