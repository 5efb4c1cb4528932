//! CLI command implementations.

pub mod init;
pub mod build;
pub mod decay;
pub mod stimuli;
