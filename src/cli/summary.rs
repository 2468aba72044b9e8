use std::sync::Arc;
use console::style;
use crate::cli::commands::SummaryArgs;
use crate::cli::context::PortalContext;
use crate::errors::PortalError;
use crate::flow::{Destination, HistoryNavigator, SummaryController, SummaryState};

pub async fn handle_summary(args: SummaryArgs, ctx: &PortalContext) -> Result<(), PortalError> {
    let navigator = Arc::new(HistoryNavigator::starting_at(Destination::Summary {
        scan_id: args.scan_id.clone(),
    }));
    let mut controller = SummaryController::new(ctx.gateway.clone(), ctx.session.clone(), navigator);

    let spinner = super::spinner(ctx.quiet, "Loading summary...");
    let state = controller.activate(Some(&args.scan_id)).await.clone();
    spinner.finish_and_clear();

    match state {
        SummaryState::Loaded(text) => {
            println!("{}", style(format!("Summary Report ({})", args.scan_id)).bold());
            println!();
            println!("{}", text);
            Ok(())
        }
        SummaryState::Failed(message) => Err(super::flow_error(ctx, controller.failure(), message)),
        SummaryState::Loading => Err(PortalError::Internal("Summary never loaded".into())),
    }
}
