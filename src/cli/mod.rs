//! Command-line subcommands for out-of-editor housekeeping.

pub mod doctor;
pub mod init;
pub mod resolve;
