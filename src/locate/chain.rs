use crate::browser::Page;
use crate::error::{BookingError, Result};
use headless_chrome::Element;
use std::time::{Duration, Instant};

/// How often a candidate re-queries the document while waiting for visibility
const POLL_INTERVAL: Duration = Duration::from_millis(100);

/// A single candidate query for a logical UI target
#[derive(Debug, Clone, PartialEq)]
pub enum Query {
    /// CSS selector, e.g. `input[name='username']`
    Css(String),
    /// XPath expression, e.g. `//button[contains(., 'Logg inn')]`
    XPath(String),
}

impl std::fmt::Display for Query {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Query::Css(s) => write!(f, "css:{}", s),
            Query::XPath(s) => write!(f, "xpath:{}", s),
        }
    }
}

/// An ordered chain of candidate queries for one logical UI target
///
/// Candidates are tried in order; the first one with a match that becomes
/// visible within its sub-timeout wins. The chain fails with
/// [`BookingError::ElementNotFound`] naming the logical target once every
/// candidate is exhausted, so errors read as "username field not found"
/// rather than a selector dump.
#[derive(Debug, Clone)]
pub struct Locator {
    /// Logical name of the target, e.g. "username field"
    target: String,

    /// Candidate queries, most specific first
    candidates: Vec<Query>,
}

impl Locator {
    /// Create an empty locator for a named logical target
    pub fn new(target: impl Into<String>) -> Self {
        Self { target: target.into(), candidates: Vec::new() }
    }

    /// Builder method: append a CSS selector candidate
    pub fn css(mut self, selector: impl Into<String>) -> Self {
        self.candidates.push(Query::Css(selector.into()));
        self
    }

    /// Builder method: append an XPath candidate
    pub fn xpath(mut self, selector: impl Into<String>) -> Self {
        self.candidates.push(Query::XPath(selector.into()));
        self
    }

    /// Logical name of the target this locator resolves
    pub fn target(&self) -> &str {
        &self.target
    }

    /// Candidate queries in resolution order
    pub fn candidates(&self) -> &[Query] {
        &self.candidates
    }

    /// Resolve the target to a concrete element
    ///
    /// Each candidate gets at most `per_candidate` to produce a visible
    /// match; the whole resolution is additionally capped by `ceiling`. The
    /// first visible match wins and later candidates are never tried.
    pub fn resolve<'a>(&self, page: &'a Page, per_candidate: Duration, ceiling: Duration) -> Result<Element<'a>> {
        let started = Instant::now();

        for query in &self.candidates {
            let elapsed = started.elapsed();
            if elapsed >= ceiling {
                break;
            }

            let budget = per_candidate.min(ceiling - elapsed);
            match try_candidate(page, query, budget) {
                Some(element) => {
                    log::debug!("{}: resolved via {}", self.target, query);
                    return Ok(element);
                }
                None => log::debug!("{}: no visible match for {} within {:?}", self.target, query, budget),
            }
        }

        Err(BookingError::ElementNotFound { target: self.target.clone() })
    }
}

/// Poll one candidate query until a match is visible or the budget runs out
fn try_candidate<'a>(page: &'a Page, query: &Query, budget: Duration) -> Option<Element<'a>> {
    let deadline = Instant::now() + budget;

    loop {
        let mut matches = match query {
            Query::Css(selector) => page.find_all_css(selector),
            Query::XPath(selector) => page.find_all_xpath(selector),
        };

        if let Some(pos) = matches.iter().position(is_visible) {
            return Some(matches.swap_remove(pos));
        }

        if Instant::now() >= deadline {
            return None;
        }

        std::thread::sleep(POLL_INTERVAL);
    }
}

/// Check whether an element is actually rendered and visible
///
/// A node can exist in the document without being rendered (zero-sized box,
/// `display: none`, detached virtualized row), so presence alone never counts
/// as success.
fn is_visible(element: &Element) -> bool {
    element
        .call_js_fn(
            r#"function() {
                const rect = this.getBoundingClientRect();
                const style = window.getComputedStyle(this);
                return rect.width > 0
                    && rect.height > 0
                    && style.display !== 'none'
                    && style.visibility !== 'hidden';
            }"#,
            vec![],
            false,
        )
        .ok()
        .and_then(|result| result.value)
        .and_then(|value| value.as_bool())
        .unwrap_or(false)
}
