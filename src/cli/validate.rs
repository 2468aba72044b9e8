use std::path::PathBuf;
use crate::cli::commands::ValidateArgs;
use crate::config;
use crate::errors::PortalError;

pub async fn handle_validate(args: ValidateArgs) -> Result<(), PortalError> {
    let path = PathBuf::from(&args.config);
    let config = config::parse_config(&path).await?;
    println!("Configuration is valid: {}", args.config);
    println!("  api.base_url   {}", config.api.base_url);
    println!("  session.path   {}", config.session.path.display());
    println!("  session.ttl    {} day(s)", config.session.ttl_days);
    Ok(())
}
