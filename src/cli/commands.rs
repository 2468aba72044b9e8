use clap::{Parser, Subcommand, Args};

#[derive(Parser)]
#[command(name = "scanportal", version, about = "Client for the web-scanner portal API")]
pub struct Cli {
    #[command(subcommand)]
    pub command: Commands,

    /// Increase log verbosity (repeat for more)
    #[arg(short, long, action = clap::ArgAction::Count, global = true)]
    pub verbose: u8,

    /// Suppress progress bars and non-essential output
    #[arg(short, long, global = true)]
    pub quiet: bool,

    /// Disable colored output
    #[arg(long, global = true)]
    pub no_color: bool,

    /// YAML configuration file
    #[arg(short, long, global = true)]
    pub config: Option<String>,

    /// API base URL (overrides config and SCANPORTAL_API_URL)
    #[arg(long, global = true)]
    pub api_url: Option<String>,
}

#[derive(Subcommand)]
pub enum Commands {
    /// Log in and store a session token
    Login(LoginArgs),
    /// Submit a URL for scanning
    Scan(ScanArgs),
    /// Show the summary report of a scan
    Summary(SummaryArgs),
    /// Validate a configuration file
    Validate(ValidateArgs),
}

#[derive(Args, Clone)]
pub struct LoginArgs {
    /// Account email
    #[arg(short, long)]
    pub email: String,

    /// Account password, or $VAR to read it from the environment
    #[arg(short, long)]
    pub password: String,
}

#[derive(Args, Clone)]
pub struct ScanArgs {
    /// Target URL to scan
    pub url: String,
}

#[derive(Args, Clone)]
pub struct SummaryArgs {
    /// Scan ID returned by the scan request
    pub scan_id: String,
}

#[derive(Args, Clone)]
pub struct ValidateArgs {
    /// Config file to validate
    pub config: String,
}
