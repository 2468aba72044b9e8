use clap::Parser;
use scanportal::cli::{self, Cli, Commands, PortalContext};
use scanportal::errors::PortalError;
use tracing::debug;
use tracing_subscriber::EnvFilter;

#[tokio::main]
async fn main() {
    let cli = Cli::parse();

    // Initialize logging
    let log_level = match cli.verbose {
        0 => "warn",
        1 => "info",
        2 => "debug",
        _ => "trace",
    };

    let filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new(log_level));

    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_target(false)
        .with_ansi(!cli.no_color)
        .with_writer(std::io::stderr)
        .init();

    if cli.no_color {
        console::set_colors_enabled(false);
    }

    debug!(
        version = env!("CARGO_PKG_VERSION"),
        git_hash = option_env!("GIT_HASH").unwrap_or("dev"),
        built = option_env!("BUILD_TIMESTAMP").unwrap_or("unknown"),
        "scanportal starting"
    );

    if let Err(e) = run(cli).await {
        eprintln!("Error: {}", e);
        let exit_code = match &e {
            PortalError::Config(_) => 2,
            PortalError::Authentication(_) => 4,
            PortalError::InvalidTarget(_) => 5,
            _ => 1,
        };
        std::process::exit(exit_code);
    }
}

async fn run(cli: Cli) -> Result<(), PortalError> {
    let ctx = match &cli.command {
        Commands::Validate(_) => None,
        _ => Some(PortalContext::from_cli(&cli).await?),
    };

    match (cli.command, ctx) {
        (Commands::Validate(args), _) => cli::validate::handle_validate(args).await,
        (Commands::Login(args), Some(ctx)) => cli::login::handle_login(args, &ctx).await,
        (Commands::Scan(args), Some(ctx)) => cli::scan::handle_scan(args, &ctx).await,
        (Commands::Summary(args), Some(ctx)) => cli::summary::handle_summary(args, &ctx).await,
        (_, None) => Err(PortalError::Internal("Command context was not initialized".into())),
    }
}
