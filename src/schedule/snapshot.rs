use crate::browser::Page;
use crate::error::Result;
use serde::{Deserialize, Serialize};

/// A rendered day-header marker in the schedule list
///
/// The header's text encodes a calendar day (`"19 feb."`); its `top` is the
/// document-space position that defines the start of the day's row interval.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct DayHeader {
    /// Full text content of the header element, trimmed
    pub text: String,

    /// Vertical document-space position of the header
    pub top: f64,

    /// Whether the header is rendered and intersects the viewport
    #[serde(default)]
    pub visible: bool,
}

/// A rendered class row in the schedule list
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct ScheduleRow {
    /// Time-range text as rendered, e.g. `"7:30-8:15"`
    #[serde(default)]
    pub time_text: String,

    /// Activity name, if the row carries one
    #[serde(default)]
    pub name: Option<String>,

    /// Raw label of the row's action button, if present
    #[serde(default)]
    pub action: Option<String>,

    /// Vertical document-space position of the row
    pub top: f64,

    /// Whether the row is rendered and intersects the viewport
    #[serde(default)]
    pub visible: bool,

    /// nth-child CSS path for re-resolving the row element
    pub css_path: String,

    /// nth-child CSS path for re-resolving the row's action button
    #[serde(default)]
    pub button_path: Option<String>,
}

impl ScheduleRow {
    /// The start-time token of the time range: text before the separator,
    /// trimmed, exactly as rendered (no normalization)
    pub fn start_token(&self) -> &str {
        self.time_text.split('-').next().unwrap_or("").trim()
    }

    /// Classify the row's action button label
    pub fn action_label(&self) -> ActionLabel {
        ActionLabel::parse(self.action.as_deref().unwrap_or(""))
    }

    /// One-line description for logging, with whitespace runs collapsed
    ///
    /// Only for log output; matching always runs on the raw fields.
    pub fn describe(&self) -> String {
        let name = self.name.as_deref().unwrap_or("?");
        let action = self.action.as_deref().unwrap_or("-");
        compact_whitespace(&format!("{} {} [{}] @{:.0}", self.time_text, name, action, self.top))
    }
}

/// Collapse whitespace and newline runs into single spaces
pub fn compact_whitespace(text: &str) -> String {
    text.split_whitespace().collect::<Vec<_>>().join(" ")
}

/// The state a row's action button indicates
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ActionLabel {
    /// The class has capacity and can be booked directly
    Book,
    /// The class is full but has an open waitlist
    Waitlist,
    /// Anything else: already booked ("Avbook"), closed, sold out, no button
    Other(String),
}

impl ActionLabel {
    /// Classify a raw button label
    ///
    /// Matching is case-insensitive. The bookable set is deliberately tight:
    /// "Avbook" (cancel an existing booking) must never classify as Book.
    pub fn parse(raw: &str) -> Self {
        let normalized = raw.trim().to_lowercase();

        if normalized.contains("venteliste") || normalized.contains("waitlist") {
            return ActionLabel::Waitlist;
        }

        match normalized.as_str() {
            "book" | "bestill" | "reserver" => ActionLabel::Book,
            _ => ActionLabel::Other(raw.trim().to_string()),
        }
    }

    /// Whether a row with this label qualifies for the booking flow
    pub fn is_bookable(&self) -> bool {
        matches!(self, ActionLabel::Book | ActionLabel::Waitlist)
    }
}

/// Point-in-time view of the rendered schedule
///
/// Headers and rows are listed in document order with their live layout
/// positions, captured in one script round-trip. A snapshot is transient:
/// the list is virtualized, so elements captured here may be destroyed by
/// the next scroll — never cache a snapshot across scroll or navigation.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct ScheduleSnapshot {
    /// Rendered day headers, in document order
    pub headers: Vec<DayHeader>,

    /// Rendered class rows, in document order
    pub rows: Vec<ScheduleRow>,
}

impl ScheduleSnapshot {
    /// Capture a snapshot of the currently rendered schedule
    pub fn capture(page: &Page) -> Result<Self> {
        let js_code = include_str!("extract_schedule.js");
        page.evaluate_json(js_code)
    }

    /// Find the first *visible* header whose text contains `day_text`
    ///
    /// Headers that exist in the document but are not rendered into the
    /// viewport do not count; their day's rows may not be materialized yet.
    pub fn visible_header_containing(&self, day_text: &str) -> Option<&DayHeader> {
        self.headers.iter().find(|h| h.visible && h.text.contains(day_text))
    }
}
