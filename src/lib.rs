//! # class-booker
//!
//! A headless-browser bot that books gym classes. It logs in to the booking
//! site, hunts down a target time slot inside a scroll-virtualized schedule
//! list, and clicks through the two-step booking/confirmation flow — joining
//! the waitlist when the class is already full.
//!
//! The hard part is not the browser plumbing but finding "the row for time T
//! on day D" in a DOM that only partially renders at any scroll offset,
//! groups rows under day headers purely by layout geometry, and changes its
//! selectors and button labels between releases and locales. The crate is
//! organized around that problem:
//!
//! - [`locate`]: ordered candidate-selector chains and a bounded poll loop
//! - [`schedule`]: scroll-discovery, geometry snapshots, and the pure
//!   day-partitioning slot matcher
//! - [`booking`]: the state machine from day discovery to confirmation
//! - [`browser`]: the Chrome session and page capability layer
//! - [`auth`], [`config`], [`diagnostics`]: login, environment settings,
//!   and failure artifacts
//!
//! ## Usage
//!
//! ```rust,no_run
//! use class_booker::{BookingFlow, BrowserSession, LaunchOptions, StartTime, TargetSpec};
//! use chrono::NaiveDate;
//!
//! # fn main() -> class_booker::Result<()> {
//! let session = BrowserSession::launch(LaunchOptions::default())?;
//! let page = session.page()?;
//!
//! // ... log in and open the schedule ...
//!
//! let target = TargetSpec::new(
//!     NaiveDate::from_ymd_opt(2025, 2, 19).unwrap(),
//!     "16:00".parse::<StartTime>()?,
//! )
//! .with_activity("yoga");
//!
//! let outcome = BookingFlow::new(&page).run(&target)?;
//! println!("Outcome: {:?}", outcome);
//! # Ok(())
//! # }
//! ```
//!
//! ## CLI
//!
//! The `book` binary (behind the default `cli` feature) wires the pieces
//! together: settings from `BOOKER_*` environment variables, the target from
//! flags, diagnostics capture on failure:
//!
//! ```bash
//! BOOKER_LOGIN_URL=... BOOKER_USERNAME=... BOOKER_PASSWORD=... \
//!     book --date 2025-02-19 --time 16:00 --activity yoga
//! ```

pub mod auth;
pub mod booking;
pub mod browser;
pub mod config;
pub mod diagnostics;
pub mod error;
pub mod locate;
pub mod schedule;

pub use auth::Credentials;
pub use booking::{BookingFlow, BookingOutcome, FlowOptions, FlowState, SlotMatch};
pub use browser::{BrowserSession, ConnectionOptions, LaunchOptions, Page};
pub use config::Settings;
pub use error::{BookingError, Result};
pub use locate::{Locator, Query};
pub use schedule::{ActionLabel, DayHeader, DiscoveryOptions, ScheduleRow, ScheduleSnapshot, StartTime, TargetSpec};
