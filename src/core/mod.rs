//! Core services shared by the binary

pub mod error_handling;
pub mod logging;
pub mod version;
