//! Generic element-location primitives
//!
//! The booking site's markup is not contractually stable: field names,
//! languages (Norwegian/English labels) and structural wrappers vary across
//! releases. This module provides the two building blocks the rest of the
//! crate locates things with:
//! - [`Locator`]: an ordered chain of candidate queries, resolved to the
//!   first one that becomes visible within a bounded wait
//! - [`poll_until`]: a bounded poll loop (check, step, settle, repeat),
//!   reused by the scroll-discovery of the schedule

pub mod chain;
pub mod poll;

pub use chain::{Locator, Query};
pub use poll::poll_until;
