pub mod outcome;
pub mod models;
pub mod client;
pub mod http;

pub use outcome::RequestOutcome;
pub use models::{LoginGrant, ScanSubmission, SummaryResult, NO_SUMMARY_TEXT};
pub use client::GatewayClient;
pub use http::HttpGateway;
