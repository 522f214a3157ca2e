//! Subcommand handlers, one module per command family.

pub mod add;
pub mod admin;
pub mod archive;
pub mod delete;
pub mod list;
pub mod show;
pub mod stats;
pub mod status;
pub mod transfer;
pub mod views;
