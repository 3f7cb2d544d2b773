//! Application module: CLI, configuration and queue construction

pub mod cli;
pub mod error;
pub mod factory;
pub mod startup;

pub use error::AppError;
pub use factory::QueueFactory;
