//! The host side of an editor.
//!
//! Editors never reach into the surrounding expression tree. They report
//! through an [`EditorHost`], which owns resetting to defaults and showing
//! errors the editor cannot handle itself.

use valspec_foundation::{Error, ValueSpecification};

/// Receiver of editor notifications.
pub trait EditorHost {
    /// Called with the edited value whenever an edit is committed.
    fn value_changed(&mut self, value: &ValueSpecification);

    /// Called when the user asks to reset the value to its default.
    fn reset_value(&mut self);

    /// Called with failures the editor cannot recover from, such as a
    /// suggestion fetch error.
    fn alert_unhandled_error(&mut self, error: &Error);
}

/// A notification received by a [`RecordingHost`].
#[derive(Clone, Debug, PartialEq)]
pub enum HostEvent {
    /// An edit was committed.
    Changed(ValueSpecification),
    /// A reset was requested.
    Reset,
    /// An unhandled error was reported, as its message.
    Alert(String),
}

/// A host that records every notification in order.
#[derive(Clone, Debug, Default)]
pub struct RecordingHost {
    events: Vec<HostEvent>,
}

impl RecordingHost {
    /// Creates an empty recorder.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Returns all recorded events.
    #[must_use]
    pub fn events(&self) -> &[HostEvent] {
        &self.events
    }

    /// Removes and returns all recorded events.
    pub fn take_events(&mut self) -> Vec<HostEvent> {
        std::mem::take(&mut self.events)
    }

    /// Returns the most recently committed value.
    #[must_use]
    pub fn last_value(&self) -> Option<&ValueSpecification> {
        self.events.iter().rev().find_map(|event| match event {
            HostEvent::Changed(value) => Some(value),
            _ => None,
        })
    }

    /// Returns the number of committed edits.
    #[must_use]
    pub fn change_count(&self) -> usize {
        self.events
            .iter()
            .filter(|e| matches!(e, HostEvent::Changed(_)))
            .count()
    }

    /// Returns true if the last event was a reset request.
    #[must_use]
    pub fn ends_with_reset(&self) -> bool {
        matches!(self.events.last(), Some(HostEvent::Reset))
    }

    /// Returns the messages of all reported errors.
    #[must_use]
    pub fn alerts(&self) -> Vec<&str> {
        self.events
            .iter()
            .filter_map(|event| match event {
                HostEvent::Alert(message) => Some(message.as_str()),
                _ => None,
            })
            .collect()
    }
}

impl EditorHost for RecordingHost {
    fn value_changed(&mut self, value: &ValueSpecification) {
        self.events.push(HostEvent::Changed(value.clone()));
    }

    fn reset_value(&mut self) {
        self.events.push(HostEvent::Reset);
    }

    fn alert_unhandled_error(&mut self, error: &Error) {
        self.events.push(HostEvent::Alert(error.to_string()));
    }
}
