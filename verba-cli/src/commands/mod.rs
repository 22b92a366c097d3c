//! CLI command implementations.

pub mod basenames;
pub mod resolve;
pub mod show;
pub mod transfer;
