//! CLI command implementations

pub mod dashboard;
pub mod demo;
pub mod roles;
pub mod users;

use std::path::PathBuf;

use anyhow::{Context, Result};
use keystone_core::config::Config;
use keystone_core::{Entity, KeystoneContext, Notification, Severity, SubmitOutcome};

use crate::output;

/// Get the keystone directory from environment or default
pub fn get_keystone_dir() -> PathBuf {
    if let Ok(dir) = std::env::var("KEYSTONE_DIR") {
        PathBuf::from(dir)
    } else {
        dirs::home_dir()
            .expect("Could not find home directory")
            .join(".keystone")
    }
}

/// Get a context with both collections loaded
pub async fn get_context() -> Result<KeystoneContext> {
    let keystone_dir = get_keystone_dir();

    std::fs::create_dir_all(&keystone_dir)
        .with_context(|| format!("Failed to create keystone directory: {:?}", keystone_dir))?;

    let config = Config::load(&keystone_dir).context("Failed to load settings")?;
    let mut ctx =
        KeystoneContext::new(config).context("Failed to initialize keystone context")?;
    ctx.load_all().await;
    Ok(ctx)
}

/// Whether interactive prompts may be shown
pub fn prompting_enabled() -> bool {
    atty::is(atty::Stream::Stdin) && atty::is(atty::Stream::Stdout)
}

/// Print a notification with its severity's color
pub fn notify(notice: &Notification) {
    match notice.severity {
        Severity::Success => output::success(&notice.message),
        Severity::Failure => output::error(&notice.message),
    }
}

/// Print a submit outcome; exits nonzero on anything but a save
pub fn report_submit<E: Entity>(outcome: SubmitOutcome<E>) {
    match outcome {
        SubmitOutcome::Saved { notice, .. } => notify(&notice),
        SubmitOutcome::Invalid { errors } => {
            for (field, message) in errors.iter() {
                output::error(&format!("{}: {}", field, message));
            }
            std::process::exit(1);
        }
        SubmitOutcome::Failed { notice, .. } => {
            notify(&notice);
            std::process::exit(1);
        }
        SubmitOutcome::InFlight | SubmitOutcome::NotOpen => {
            output::error("No submission in progress");
            std::process::exit(1);
        }
    }
}
