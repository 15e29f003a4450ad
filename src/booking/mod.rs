//! Booking state machine
//!
//! Sequences the full flow: scroll-discovery of the target day, slot
//! matching among the rendered rows, the book-vs-waitlist decision, the
//! click, and confirmation-dialog handling. States advance strictly in
//! order; every state's internal operations use bounded timeouts, and no
//! state replays an earlier one. The first error is terminal for the run
//! and carries the state it originated in.
//!
//! Clicking `Book`/`Waitlist` is not idempotent: a failure after the click
//! but before confirmation leaves the real-world reservation ambiguous.
//! That risk is surfaced, not retried.

use crate::browser::Page;
use crate::error::{BookingError, Result};
use crate::locate::Locator;
use crate::schedule::{discover_day, locate_slot, ActionLabel, DiscoveryOptions, ScheduleRow, ScheduleSnapshot,
                      TargetSpec};
use std::fmt;
use std::time::Duration;

/// States of the booking flow
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FlowState {
    /// Scrolling the schedule until the target day's header is visible
    AwaitingDay,
    /// Matching the target row among the rendered rows
    AwaitingRow,
    /// Choosing between booking directly and joining the waitlist
    Deciding,
    /// Clicking the book button
    Booking,
    /// Clicking the waitlist button
    Waitlisting,
    /// Resolving and clicking the confirmation dialog's button
    AwaitingConfirmation,
    /// The confirmation click went through
    Confirmed,
}

impl fmt::Display for FlowState {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            FlowState::AwaitingDay => "AwaitingDay",
            FlowState::AwaitingRow => "AwaitingRow",
            FlowState::Deciding => "Deciding",
            FlowState::Booking => "Booking",
            FlowState::Waitlisting => "Waitlisting",
            FlowState::AwaitingConfirmation => "AwaitingConfirmation",
            FlowState::Confirmed => "Confirmed",
        };
        f.write_str(name)
    }
}

/// How a confirmed run ended
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum BookingOutcome {
    /// The class was booked directly
    Booked,
    /// The class was full; a waitlist spot was taken instead
    Waitlisted,
}

/// A resolved slot: the matched row and its parsed action label
#[derive(Debug, Clone, PartialEq)]
pub struct SlotMatch {
    /// The matched schedule row
    pub row: ScheduleRow,
    /// Parsed label of the row's action button
    pub action: ActionLabel,
}

/// Timeouts and tuning for one booking run
#[derive(Debug, Clone)]
pub struct FlowOptions {
    /// Scroll-discovery tuning
    pub discovery: DiscoveryOptions,

    /// Per-candidate wait when resolving elements through a locator chain
    pub locator_sub_timeout: Duration,

    /// Bounded check on the waitlist button before taking that branch
    pub decide_timeout: Duration,

    /// Window for the dialog-scoped confirmation selectors before the
    /// document-wide fallback
    pub confirm_window: Duration,

    /// Settle time after the booking click, before confirmation resolution
    pub post_click_settle: Duration,
}

impl Default for FlowOptions {
    fn default() -> Self {
        Self {
            discovery: DiscoveryOptions::default(),
            locator_sub_timeout: Duration::from_secs(2),
            decide_timeout: Duration::from_secs(2),
            confirm_window: Duration::from_secs(5),
            post_click_settle: Duration::from_millis(500),
        }
    }
}

/// Drives one booking run over a page
///
/// Single sequential control flow: one page, no parallel searches, each
/// state's side effect observed (via its bounded wait) before the next
/// state begins.
pub struct BookingFlow<'a> {
    page: &'a Page,
    options: FlowOptions,
}

impl<'a> BookingFlow<'a> {
    /// Create a flow with default options
    pub fn new(page: &'a Page) -> Self {
        Self { page, options: FlowOptions::default() }
    }

    /// Create a flow with custom options
    pub fn with_options(page: &'a Page, options: FlowOptions) -> Self {
        Self { page, options }
    }

    /// Locate the target slot without booking it
    ///
    /// Runs scroll-discovery for the target day, then matches among the
    /// rendered rows. The returned match references transient elements;
    /// use it immediately.
    pub fn locate(&self, target: &TargetSpec) -> Result<SlotMatch> {
        discover_day(self.page, target, &self.options.discovery)?;
        self.match_rendered(target)
    }

    /// Run the full booking flow for the target slot
    pub fn run(&self, target: &TargetSpec) -> Result<BookingOutcome> {
        log::info!(
            "Booking slot on '{}' at {}{}",
            target.day_header_text(),
            target.start_time,
            target.activity.as_deref().map(|a| format!(" ({})", a)).unwrap_or_default()
        );

        let header = discover_day(self.page, target, &self.options.discovery)
            .map_err(|e| e.in_state(FlowState::AwaitingDay))?;
        log::info!("Day section '{}' is in view", header.text);

        let slot = self.match_rendered(target).map_err(|e| e.in_state(FlowState::AwaitingRow))?;

        let branch = self.decide(&slot).map_err(|e| e.in_state(FlowState::Deciding))?;
        log::info!("Decision: {}", branch);

        self.click_action(&slot).map_err(|e| e.in_state(branch))?;

        self.confirm().map_err(|e| e.in_state(FlowState::AwaitingConfirmation))?;
        log::info!("Confirmation clicked, booking flow complete");

        Ok(match branch {
            FlowState::Waitlisting => BookingOutcome::Waitlisted,
            _ => BookingOutcome::Booked,
        })
    }

    /// Snapshot the rendered schedule and match the target row
    fn match_rendered(&self, target: &TargetSpec) -> Result<SlotMatch> {
        let snapshot = ScheduleSnapshot::capture(self.page)?;
        let row = locate_slot(&snapshot, target)?.clone();
        let action = row.action_label();
        log::info!("Matched slot: {}", row.describe());
        Ok(SlotMatch { row, action })
    }

    /// Choose between booking and waitlisting
    ///
    /// The waitlist branch is taken only when the row's label says waitlist
    /// AND the button is live within a short bounded check; otherwise the
    /// flow books directly.
    fn decide(&self, slot: &SlotMatch) -> Result<FlowState> {
        if branch_for(&slot.action) != FlowState::Waitlisting {
            return Ok(FlowState::Booking);
        }

        let live = slot
            .row
            .button_path
            .as_deref()
            .is_some_and(|path| self.page.wait_for_css(path, self.options.decide_timeout).is_ok());

        Ok(if live { FlowState::Waitlisting } else { FlowState::Booking })
    }

    /// Scroll the matched row's button into view and click it
    fn click_action(&self, slot: &SlotMatch) -> Result<()> {
        let path = slot
            .row
            .button_path
            .as_deref()
            .ok_or_else(|| BookingError::ElementNotFound { target: "slot action button".to_string() })?;

        let button = self.page.wait_for_css(path, self.options.locator_sub_timeout)?;

        button
            .scroll_into_view()
            .map_err(|e| BookingError::TabOperationFailed(format!("Failed to scroll row into view: {}", e)))?;

        button
            .click()
            .map_err(|e| BookingError::TabOperationFailed(format!("Failed to click action button: {}", e)))?;

        self.page.settle(self.options.post_click_settle);
        Ok(())
    }

    /// Resolve and click the confirmation dialog's book button
    ///
    /// Dialog-scoped selectors are tried first; the dialog's wrapper class
    /// is not guaranteed across releases, so after the bounded window the
    /// fallback is the last book-labeled button anywhere in the document.
    fn confirm(&self) -> Result<()> {
        let scoped = Locator::new("confirmation dialog book button")
            .xpath("//*[@role='dialog']//button[contains(., 'Book')]")
            .xpath("//*[contains(@class, 'modal')]//button[contains(., 'Book')]")
            .css("[role='dialog'] button[type='submit']");

        let button = match scoped.resolve(self.page, self.options.locator_sub_timeout, self.options.confirm_window) {
            Ok(button) => button,
            Err(_) => {
                log::debug!(
                    "No dialog-scoped confirmation button within {:?}, falling back to last book button in document",
                    self.options.confirm_window
                );
                self.page
                    .find_all_xpath("//button[contains(., 'Book')]")
                    .into_iter()
                    .last()
                    .ok_or(BookingError::ConfirmationNotFound)?
            }
        };

        button
            .click()
            .map_err(|e| BookingError::TabOperationFailed(format!("Failed to click confirmation button: {}", e)))?;

        Ok(())
    }
}

/// The flow branch a row's action label maps to
fn branch_for(action: &ActionLabel) -> FlowState {
    match action {
        ActionLabel::Waitlist => FlowState::Waitlisting,
        _ => FlowState::Booking,
    }
}
