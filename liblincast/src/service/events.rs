//! Event system for publish progress
//!
//! An in-process event bus distributing the progress of a publish
//! attempt to subscribers without blocking the flow, plus the composer
//! state machine those events drive in a UI layer.
//!
//! The bus uses `tokio::sync::broadcast`: if no subscribers exist,
//! events are dropped immediately; subscribers can lag without blocking
//! the emitter.

use serde::{Deserialize, Serialize};
use tokio::sync::broadcast;

/// Event receiver type alias
pub type EventReceiver = broadcast::Receiver<Event>;

/// Event bus for distributing publish progress events
#[derive(Clone)]
pub struct EventBus {
    sender: broadcast::Sender<Event>,
}

impl EventBus {
    /// Create a new event bus with the specified per-subscriber capacity
    pub fn new(capacity: usize) -> Self {
        let (sender, _) = broadcast::channel(capacity);
        Self { sender }
    }

    /// Subscribe to events emitted after this call
    pub fn subscribe(&self) -> EventReceiver {
        self.sender.subscribe()
    }

    /// Emit an event to all subscribers.
    ///
    /// Non-blocking; with no subscribers the event is dropped.
    pub fn emit(&self, event: Event) {
        // send() errs when nobody listens, which is fine
        let _ = self.sender.send(event);
    }

    /// Number of active subscribers (debugging/metrics only)
    pub fn subscriber_count(&self) -> usize {
        self.sender.receiver_count()
    }
}

/// Progress of one publish attempt.
///
/// Precondition failures (missing credential, empty or over-long
/// content) are reported to the caller before an attempt starts, so
/// they emit nothing here.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum Event {
    /// The attempt entered the submitting state
    SubmitStarted {
        /// Unique identifier for the attempt
        attempt_id: String,
    },

    /// The author identity is known; publication can proceed
    IdentityResolved {
        attempt_id: String,
        person_urn: String,
        /// Whether the identity came from the cache (no network call)
        from_cache: bool,
    },

    /// The post was accepted by the provider
    SubmitSucceeded { attempt_id: String },

    /// The attempt failed; the flow is retryable again
    SubmitFailed { attempt_id: String, error: String },
}

/// UI-facing state of one publish interaction.
///
/// `Submitting` is the only state in which the submit action is
/// disabled. `Published` and `Failed` are terminal for the attempt; the
/// next submission starts a fresh cycle.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum ComposerState {
    #[default]
    Idle,
    Submitting,
    Published,
    Failed,
}

impl ComposerState {
    /// Whether the submit action is available in this state
    pub fn submit_enabled(&self) -> bool {
        !matches!(self, ComposerState::Submitting)
    }

    /// Transition taken when the user triggers submission.
    ///
    /// Valid from every state where `submit_enabled` holds; terminal
    /// states start a fresh cycle.
    pub fn submit(self) -> Self {
        ComposerState::Submitting
    }

    /// Transition taken when the in-flight attempt completes.
    ///
    /// Only meaningful from `Submitting`; in any other state the
    /// completion belongs to a dismissed interaction and is ignored.
    pub fn finish(self, success: bool) -> Self {
        match self {
            ComposerState::Submitting => {
                if success {
                    ComposerState::Published
                } else {
                    ComposerState::Failed
                }
            }
            other => other,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn test_event_emission_and_subscription() {
        let event_bus = EventBus::new(10);
        let mut receiver = event_bus.subscribe();

        event_bus.emit(Event::SubmitStarted {
            attempt_id: "attempt-1".to_string(),
        });

        let received = receiver.recv().await.unwrap();
        match received {
            Event::SubmitStarted { attempt_id } => assert_eq!(attempt_id, "attempt-1"),
            _ => panic!("Wrong event type received"),
        }
    }

    #[tokio::test]
    async fn test_multiple_subscribers() {
        let event_bus = EventBus::new(10);
        let mut receiver1 = event_bus.subscribe();
        let mut receiver2 = event_bus.subscribe();

        event_bus.emit(Event::IdentityResolved {
            attempt_id: "attempt-2".to_string(),
            person_urn: "urn:li:person:999".to_string(),
            from_cache: true,
        });

        for receiver in [&mut receiver1, &mut receiver2] {
            match receiver.recv().await.unwrap() {
                Event::IdentityResolved {
                    person_urn,
                    from_cache,
                    ..
                } => {
                    assert_eq!(person_urn, "urn:li:person:999");
                    assert!(from_cache);
                }
                _ => panic!("Wrong event type received"),
            }
        }
    }

    #[tokio::test]
    async fn test_no_subscribers() {
        let event_bus = EventBus::new(10);

        // Emitting with no subscribers must not panic or block
        event_bus.emit(Event::SubmitSucceeded {
            attempt_id: "attempt-3".to_string(),
        });

        assert_eq!(event_bus.subscriber_count(), 0);
    }

    #[tokio::test]
    async fn test_event_serialization() {
        let event = Event::SubmitFailed {
            attempt_id: "attempt-4".to_string(),
            error: "Network timeout".to_string(),
        };

        let json = serde_json::to_string(&event).unwrap();
        assert!(json.contains("submit_failed"));
        assert!(json.contains("attempt-4"));
        assert!(json.contains("Network timeout"));

        let deserialized: Event = serde_json::from_str(&json).unwrap();
        match deserialized {
            Event::SubmitFailed { attempt_id, error } => {
                assert_eq!(attempt_id, "attempt-4");
                assert_eq!(error, "Network timeout");
            }
            _ => panic!("Deserialization failed"),
        }
    }

    #[test]
    fn test_composer_state_default_is_idle() {
        assert_eq!(ComposerState::default(), ComposerState::Idle);
    }

    #[test]
    fn test_submit_enabled_everywhere_but_submitting() {
        assert!(ComposerState::Idle.submit_enabled());
        assert!(ComposerState::Published.submit_enabled());
        assert!(ComposerState::Failed.submit_enabled());
        assert!(!ComposerState::Submitting.submit_enabled());
    }

    #[test]
    fn test_submit_transition() {
        assert_eq!(ComposerState::Idle.submit(), ComposerState::Submitting);
        // Terminal states start a fresh cycle
        assert_eq!(ComposerState::Published.submit(), ComposerState::Submitting);
        assert_eq!(ComposerState::Failed.submit(), ComposerState::Submitting);
    }

    #[test]
    fn test_finish_transition() {
        assert_eq!(
            ComposerState::Submitting.finish(true),
            ComposerState::Published
        );
        assert_eq!(
            ComposerState::Submitting.finish(false),
            ComposerState::Failed
        );
    }

    #[test]
    fn test_finish_outside_submitting_is_ignored() {
        assert_eq!(ComposerState::Idle.finish(true), ComposerState::Idle);
        assert_eq!(
            ComposerState::Published.finish(false),
            ComposerState::Published
        );
    }

    #[test]
    fn test_full_retry_cycle() {
        let state = ComposerState::Idle.submit().finish(false);
        assert_eq!(state, ComposerState::Failed);

        // A failed attempt leaves the flow retryable
        let state = state.submit().finish(true);
        assert_eq!(state, ComposerState::Published);
    }
}
