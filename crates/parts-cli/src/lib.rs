//! Library half of the `parts-vault` binary.

pub mod commands;
pub mod logging;
pub mod settings;
