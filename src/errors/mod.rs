pub mod types;
pub mod classification;

pub use types::PortalError;
pub use classification::{ErrorClassification, FailureKind};
