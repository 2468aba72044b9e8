use std::sync::Arc;
use console::style;
use crate::cli::commands::LoginArgs;
use crate::cli::context::PortalContext;
use crate::config::credentials::resolve_credential;
use crate::errors::PortalError;
use crate::flow::login::INVALID_CREDENTIALS_MESSAGE;
use crate::flow::{HistoryNavigator, LoginController, LoginState, Destination};

pub async fn handle_login(args: LoginArgs, ctx: &PortalContext) -> Result<(), PortalError> {
    let password = resolve_credential(&args.password);
    let navigator = Arc::new(HistoryNavigator::starting_at(Destination::Login));
    let mut controller = LoginController::new(ctx.gateway.clone(), ctx.session.clone(), navigator);

    let spinner = super::spinner(ctx.quiet, "Logging in...");
    let state = controller.submit(&args.email, &password).await.clone();
    spinner.finish_and_clear();

    match state {
        LoginState::Redirecting(destination) => {
            println!(
                "{} Logged in as {}. Continue at {}",
                style("✓").green(),
                args.email,
                ctx.path_of(&destination),
            );
            Ok(())
        }
        LoginState::Idle { error: Some(message) } if message == INVALID_CREDENTIALS_MESSAGE => {
            Err(PortalError::Authentication(message.to_string()))
        }
        LoginState::Idle { error } => Err(PortalError::Network(
            error.unwrap_or("Login did not complete").to_string(),
        )),
        LoginState::Submitting => Err(PortalError::Internal("Login left in submitting state".into())),
    }
}
