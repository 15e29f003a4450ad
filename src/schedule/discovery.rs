use crate::browser::Page;
use crate::error::{BookingError, Result};
use crate::locate::poll_until;
use crate::schedule::snapshot::{DayHeader, ScheduleSnapshot};
use crate::schedule::target::TargetSpec;
use std::time::Duration;

/// Tuning for the scroll-discovery loop
#[derive(Debug, Clone)]
pub struct DiscoveryOptions {
    /// Maximum scroll attempts before giving up
    pub max_attempts: u32,

    /// Vertical pixels scrolled per attempt
    pub scroll_step: f64,

    /// Settle time after each scroll before re-querying
    pub settle: Duration,
}

impl Default for DiscoveryOptions {
    fn default() -> Self {
        Self {
            max_attempts: 20,
            scroll_step: 400.0,
            settle: Duration::from_millis(500),
        }
    }
}

/// Scroll the virtualized schedule until the target day's header is visible
///
/// Days far in the future do not exist in the document until the list is
/// scrolled into their proximity, and nothing signals when new content has
/// materialized. Each attempt re-snapshots the rendered headers; a header
/// only counts once it is actually visible in the viewport, because a header
/// node can precede its rows into the document. On a miss the list is
/// scrolled one fixed step and left to settle before the next query.
pub fn discover_day(page: &Page, target: &TargetSpec, options: &DiscoveryOptions) -> Result<DayHeader> {
    let day_text = target.day_header_text();
    log::debug!("Scrolling schedule to find day header '{}'", day_text);

    let found = poll_until(
        options.max_attempts,
        options.settle,
        |attempt| {
            let snapshot = ScheduleSnapshot::capture(page)?;
            match snapshot.visible_header_containing(&day_text) {
                Some(header) => {
                    log::debug!(
                        "Day header '{}' visible at {:.0} (attempt {}/{})",
                        header.text,
                        header.top,
                        attempt,
                        options.max_attempts
                    );
                    Ok(Some(header.clone()))
                }
                None => {
                    log::trace!(
                        "Day header '{}' not visible yet ({} headers rendered, attempt {}/{})",
                        day_text,
                        snapshot.headers.len(),
                        attempt,
                        options.max_attempts
                    );
                    Ok(None)
                }
            }
        },
        || page.scroll_by(0.0, options.scroll_step),
    )?;

    found.ok_or_else(|| {
        log::warn!("Day header '{}' never appeared after {} scroll attempts", day_text, options.max_attempts);
        BookingError::DayNotFound { day: day_text }
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_discovery_defaults() {
        let opts = DiscoveryOptions::default();
        assert_eq!(opts.max_attempts, 20);
        assert_eq!(opts.scroll_step, 400.0);
        assert_eq!(opts.settle, Duration::from_millis(500));
    }
}
