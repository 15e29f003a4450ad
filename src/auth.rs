//! Login against the booking site
//!
//! Authentication is an opaque capability as far as the slot locator is
//! concerned: navigate to the login page, fill the credentials, submit.
//! Field names and button labels vary across releases and locales
//! (Norwegian/English), so every element goes through a locator chain.

use crate::browser::Page;
use crate::error::{BookingError, Result};
use crate::locate::Locator;
use std::fmt;
use std::time::Duration;

const PER_CANDIDATE: Duration = Duration::from_secs(2);
const CEILING: Duration = Duration::from_secs(30);

/// Account credentials for the booking site
#[derive(Clone)]
pub struct Credentials {
    pub username: String,
    pub password: String,
}

impl Credentials {
    pub fn new(username: impl Into<String>, password: impl Into<String>) -> Self {
        Self { username: username.into(), password: password.into() }
    }
}

// Credentials end up in log output via error context; keep the password out
impl fmt::Debug for Credentials {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Credentials")
            .field("username", &self.username)
            .field("password", &"<redacted>")
            .finish()
    }
}

fn username_locator() -> Locator {
    Locator::new("username field")
        .css("input[name='username']")
        .css("input[name='email']")
        .css("input[type='email']")
        .css("#username")
        .xpath("//input[contains(@placeholder, 'rukernavn')]")
        .xpath("//input[contains(@placeholder, 'sername')]")
}

fn password_locator() -> Locator {
    Locator::new("password field")
        .css("input[name='password']")
        .css("input[type='password']")
        .css("#password")
}

fn submit_locator() -> Locator {
    Locator::new("login submit button")
        .css("button[type='submit']")
        .xpath("//button[contains(., 'Logg inn')]")
        .xpath("//button[contains(., 'Log in')]")
        .xpath("//input[@type='submit']")
}

/// Navigate to the login page and authenticate
pub fn log_in(page: &Page, login_url: &str, credentials: &Credentials) -> Result<()> {
    log::info!("Logging in as {} at {}", credentials.username, login_url);
    page.navigate(login_url)?;

    let username = username_locator().resolve(page, PER_CANDIDATE, CEILING)?;
    username
        .click()
        .and_then(|_| username.type_into(&credentials.username))
        .map_err(|e| BookingError::TabOperationFailed(format!("Failed to fill username: {}", e)))?;

    let password = password_locator().resolve(page, PER_CANDIDATE, CEILING)?;
    password
        .click()
        .and_then(|_| password.type_into(&credentials.password))
        .map_err(|e| BookingError::TabOperationFailed(format!("Failed to fill password: {}", e)))?;

    let submit = submit_locator().resolve(page, PER_CANDIDATE, CEILING)?;
    submit
        .click()
        .map_err(|e| BookingError::TabOperationFailed(format!("Failed to click login button: {}", e)))?;

    page.tab()
        .wait_until_navigated()
        .map_err(|e| BookingError::NavigationFailed(format!("Login did not complete: {}", e)))?;

    log::info!("Login submitted");
    Ok(())
}
