pub mod parser;
pub mod types;
pub mod security;
pub mod credentials;

pub use types::*;
pub use parser::{parse_config, load_config, API_URL_ENV};
