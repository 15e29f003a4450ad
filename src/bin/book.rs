//! Book a gym class from the command line
//!
//! Reads site URLs and credentials from `BOOKER_*` environment variables,
//! the target slot from flags. Exits 0 when the booking (or waitlist spot)
//! is confirmed, 1 on any failure — after dumping a screenshot and the page
//! HTML into the diagnostics directory.

use anyhow::Context;
use chrono::NaiveDate;
use clap::Parser;
use class_booker::{auth, diagnostics, BookingFlow, BookingOutcome, BrowserSession, LaunchOptions, Settings,
                   StartTime, TargetSpec};

#[derive(Debug, Parser)]
#[command(name = "book", version, about = "Book a class slot in the gym schedule")]
struct Args {
    /// Date of the class, e.g. 2025-02-19
    #[arg(long)]
    date: NaiveDate,

    /// Start time of the class, e.g. 7:30 or 16:00
    #[arg(long)]
    time: String,

    /// Only match classes whose name contains this (case-insensitive)
    #[arg(long)]
    activity: Option<String>,

    /// Run with a visible browser window, overriding BOOKER_HEADLESS
    #[arg(long)]
    headed: bool,
}

fn main() {
    let args = Args::parse();
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info")).init();

    match run(&args) {
        Ok(outcome) => {
            match outcome {
                BookingOutcome::Booked => log::info!("Class booked"),
                BookingOutcome::Waitlisted => log::info!("Class was full, joined the waitlist"),
            }
        }
        Err(e) => {
            log::error!("{:#}", e);
            std::process::exit(1);
        }
    }
}

fn run(args: &Args) -> anyhow::Result<BookingOutcome> {
    let settings = Settings::from_env().context("Incomplete environment")?;

    let start_time: StartTime = args.time.parse()?;
    let mut target = TargetSpec::new(args.date, start_time);
    if let Some(activity) = &args.activity {
        target = target.with_activity(activity.clone());
    }

    let mut launch = LaunchOptions::new().headless(settings.headless && !args.headed);
    if let Some(path) = &settings.chrome_path {
        launch = launch.chrome_path(path.clone());
    }

    let session = BrowserSession::launch(launch).context("Failed to launch browser")?;
    let result = book(&session, &settings, &target);

    if result.is_err() {
        // Best effort; the original error is what matters
        if let Err(capture_err) = session
            .page()
            .and_then(|page| diagnostics::capture_failure(&page, &settings.diagnostics_dir, "booking-failed"))
        {
            log::warn!("Could not capture failure artifacts: {}", capture_err);
        }
    }

    if let Err(e) = session.close() {
        log::debug!("Browser teardown: {}", e);
    }

    result.map_err(Into::into)
}

fn book(session: &BrowserSession, settings: &Settings, target: &TargetSpec) -> class_booker::Result<BookingOutcome> {
    let page = session.page()?;

    auth::log_in(&page, &settings.login_url, &settings.credentials)?;

    if let Some(schedule_url) = &settings.schedule_url {
        page.navigate(schedule_url)?;
    }

    BookingFlow::new(&page).run(target)
}
