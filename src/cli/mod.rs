pub mod commands;
pub mod context;
pub mod login;
pub mod scan;
pub mod summary;
pub mod validate;

pub use commands::{Cli, Commands};
pub use context::PortalContext;

use std::time::Duration;
use indicatif::{ProgressBar, ProgressStyle};
use crate::errors::{FailureKind, PortalError};

/// Spinner shown while a request is outstanding.
pub(crate) fn spinner(quiet: bool, message: &str) -> ProgressBar {
    if quiet {
        return ProgressBar::hidden();
    }
    let bar = ProgressBar::new_spinner();
    if let Ok(style) = ProgressStyle::default_spinner().template("  {spinner:.cyan} {msg}") {
        bar.set_style(style);
    }
    bar.set_message(message.to_string());
    bar.enable_steady_tick(Duration::from_millis(120));
    bar
}

/// Error a failed flow exits with: a login bounce, a transient fault the user
/// can retry, or a contract violation by the API.
pub(crate) fn flow_error(ctx: &PortalContext, kind: Option<FailureKind>, message: &str) -> PortalError {
    match kind {
        Some(kind) if kind.requires_login() => ctx.login_required(),
        Some(kind) if kind.classify().retryable => PortalError::Network(message.to_string()),
        _ => PortalError::Api(message.to_string()),
    }
}
