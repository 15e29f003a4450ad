//! The schedule domain: targets, snapshots, discovery and slot location
//!
//! The schedule is a scroll-virtualized list that groups class rows under
//! day headers purely by layout, so locating a slot is a three-step hunt:
//! - [`discovery`]: scroll until the target day's header is actually visible
//! - [`snapshot`]: capture the rendered headers/rows with their positions in
//!   one in-page script round-trip
//! - [`locator`]: partition rows into per-day intervals by geometry and match
//!   time, name and bookable state

pub mod discovery;
pub mod locator;
pub mod snapshot;
pub mod target;

pub use discovery::{discover_day, DiscoveryOptions};
pub use locator::{day_interval, locate_slot};
pub use snapshot::{compact_whitespace, ActionLabel, DayHeader, ScheduleRow, ScheduleSnapshot};
pub use target::{StartTime, TargetSpec, MONTH_ABBREVIATIONS};
