use std::path::PathBuf;
use std::sync::Arc;
use tracing::debug;
use crate::config::{self, PortalConfig};
use crate::errors::PortalError;
use crate::flow::Destination;
use crate::gateway::{GatewayClient, HttpGateway};
use crate::session::{FileSessionStore, SessionStore};
use super::commands::Cli;

/// Collaborators shared by every subcommand.
pub struct PortalContext {
    pub config: PortalConfig,
    pub gateway: Arc<dyn GatewayClient>,
    pub session: Arc<dyn SessionStore>,
    pub quiet: bool,
}

impl PortalContext {
    pub async fn from_cli(cli: &Cli) -> Result<Self, PortalError> {
        let config_path = cli.config.as_ref().map(PathBuf::from);
        let config = config::load_config(config_path.as_deref(), cli.api_url.as_deref()).await?;
        Self::from_config(config, cli.quiet)
    }

    pub fn from_config(config: PortalConfig, quiet: bool) -> Result<Self, PortalError> {
        let gateway = HttpGateway::from_config(&config.api, config.session.ttl_days)?;
        let session = FileSessionStore::new(config.session.path.clone());
        debug!(base_url = %gateway.base_url(), session = %session.path().display(), "Portal context ready");
        Ok(Self {
            config,
            gateway: Arc::new(gateway),
            session: Arc::new(session),
            quiet,
        })
    }

    pub fn path_of(&self, destination: &Destination) -> String {
        destination.path(&self.config.navigation)
    }

    /// Error returned when a flow bounced the user back to login.
    pub fn login_required(&self) -> PortalError {
        PortalError::Authentication(format!(
            "No active session (redirected to {}). Run `scanportal login` first.",
            self.path_of(&Destination::Login)
        ))
    }
}
