use crate::error::Result;
use std::time::Duration;

/// Poll until a check produces a value or the attempt budget is exhausted
///
/// Each attempt runs `check`; a `Some` value ends the loop immediately. After
/// a failed check (and before the next one) `step` runs once, followed by a
/// fixed `settle` sleep. No step or sleep happens after the final failed
/// check. Returns `Ok(None)` when all attempts are exhausted, so callers can
/// attach their own domain error.
///
/// This exists because the virtualized schedule list signals nothing when
/// more content has loaded: discovery has to be poll-based with a fixed
/// cadence rather than event-driven.
pub fn poll_until<T, C, S>(max_attempts: u32, settle: Duration, mut check: C, mut step: S) -> Result<Option<T>>
where
    C: FnMut(u32) -> Result<Option<T>>,
    S: FnMut() -> Result<()>,
{
    for attempt in 1..=max_attempts {
        if let Some(found) = check(attempt)? {
            return Ok(Some(found));
        }

        if attempt < max_attempts {
            step()?;
            std::thread::sleep(settle);
        }
    }

    Ok(None)
}
