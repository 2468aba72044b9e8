pub mod cli;
pub mod config;
pub mod errors;
pub mod flow;
pub mod gateway;
pub mod session;
