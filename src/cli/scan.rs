use std::sync::Arc;
use console::style;
use indicatif::{ProgressBar, ProgressStyle};
use tracing::debug;
use crate::cli::commands::ScanArgs;
use crate::cli::context::PortalContext;
use crate::config::security::validate_target_url;
use crate::errors::PortalError;
use crate::flow::{Destination, HistoryNavigator, ScanController, ScanState};

pub async fn handle_scan(args: ScanArgs, ctx: &PortalContext) -> Result<(), PortalError> {
    validate_target_url(&args.url)?;

    let navigator = Arc::new(HistoryNavigator::starting_at(Destination::ScanSubmission));
    let mut controller = ScanController::new(
        ctx.gateway.clone(),
        ctx.session.clone(),
        navigator,
        ctx.config.progress.clone(),
    );

    if !controller.activate() {
        return Err(super::flow_error(ctx, controller.failure(), "No active session"));
    }

    let bar = progress_bar(ctx.quiet);
    bar.set_message(format!("Scanning {}", args.url));
    let mut progress = controller.subscribe_progress();
    let render_bar = bar.clone();
    let render = tokio::spawn(async move {
        while progress.changed().await.is_ok() {
            let value = *progress.borrow_and_update();
            render_bar.set_position(u64::from(value));
        }
    });

    let state = controller.submit(&args.url).await.clone();
    let failure = controller.failure();
    // Dropping the controller closes the progress channel and ends the render task.
    drop(controller);
    if let Err(e) = render.await {
        debug!(error = %e, "Progress render task ended abnormally");
    }

    match state {
        ScanState::Redirecting(location) => {
            bar.set_position(100);
            bar.finish_with_message("Scan request accepted");
            println!("{} Scan queued. Results: {}", style("✓").green(), location);
            Ok(())
        }
        ScanState::Idle { error } => {
            let message = error.unwrap_or("Scan submission did not complete");
            bar.abandon_with_message(message);
            Err(super::flow_error(ctx, failure, message))
        }
        ScanState::Submitting | ScanState::Completing => {
            bar.abandon();
            Err(PortalError::Internal("Scan submission did not settle".into()))
        }
    }
}

fn progress_bar(quiet: bool) -> ProgressBar {
    if quiet {
        return ProgressBar::hidden();
    }
    let bar = ProgressBar::new(100);
    if let Ok(style) = ProgressStyle::default_bar()
        .template("  {bar:30.cyan/dark_gray} {pos:>3}% | {msg}")
    {
        bar.set_style(style.progress_chars("█▓░"));
    }
    bar
}
