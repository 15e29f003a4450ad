//! Error types for the booking flow
//!
//! All fallible operations in this crate return [`Result`], which wraps
//! [`BookingError`]. Every error is terminal for a single run: the booking
//! state machine never retries across states, it surfaces the first failure
//! with enough context (logical target name, day text, start time) for the
//! caller to capture diagnostics.

use crate::booking::FlowState;

/// Errors that can occur while driving the booking flow
#[derive(Debug, thiserror::Error)]
pub enum BookingError {
    /// Failed to launch the browser
    #[error("Failed to launch browser: {0}")]
    LaunchFailed(String),

    /// Failed to connect to an existing browser instance
    #[error("Failed to connect to browser: {0}")]
    ConnectionFailed(String),

    /// Navigation to a URL failed or timed out
    #[error("Navigation failed: {0}")]
    NavigationFailed(String),

    /// Tab-level operation failed (create, close, query)
    #[error("Tab operation failed: {0}")]
    TabOperationFailed(String),

    /// A logical UI target never became visible through any candidate query
    #[error("Element not found: {target}")]
    ElementNotFound {
        /// Logical name of the target, e.g. "username field"
        target: String,
    },

    /// The target day header never appeared in the rendered schedule
    #[error("Day '{day}' not found in the schedule")]
    DayNotFound {
        /// Formatted day-header text that was searched for, e.g. "19 feb."
        day: String,
    },

    /// Day found, but no row matched the time/name/bookable-state constraints
    #[error("No bookable slot at {time} on '{day}'{}", name_suffix(.activity))]
    SlotNotFound {
        /// Formatted day-header text of the day that was searched
        day: String,
        /// Normalized start time that was searched for, e.g. "7:30"
        time: String,
        /// Activity-name filter, if one was set
        activity: Option<String>,
    },

    /// Booking click went through but no confirmation control appeared
    #[error("Booking clicked, but no confirmation button appeared")]
    ConfirmationNotFound,

    /// The in-page schedule snapshot could not be taken or parsed
    #[error("Failed to snapshot schedule: {0}")]
    SnapshotFailed(String),

    /// A bounded wait elapsed without the expected condition
    #[error("Timed out waiting for {what}")]
    Timeout {
        /// Description of what was being waited for
        what: String,
    },

    /// Failure wrapped with the state machine state it originated in
    #[error("Booking flow failed in state {state}: {source}")]
    Flow {
        /// State the machine was in when the error occurred
        state: FlowState,
        /// Underlying cause
        #[source]
        source: Box<BookingError>,
    },

    /// Invalid or missing configuration
    #[error("Configuration error: {0}")]
    Config(String),
}

fn name_suffix(activity: &Option<String>) -> String {
    match activity {
        Some(name) => format!(" matching '{}'", name),
        None => String::new(),
    }
}

impl BookingError {
    /// Wrap an error with the flow state it occurred in.
    ///
    /// Already-wrapped errors are passed through unchanged so the innermost
    /// state (where the failure actually originated) is preserved.
    pub fn in_state(self, state: FlowState) -> Self {
        match self {
            err @ BookingError::Flow { .. } => err,
            err => BookingError::Flow { state, source: Box::new(err) },
        }
    }
}

/// Result type alias for booking operations
pub type Result<T> = std::result::Result<T, BookingError>;
