//! CLI commands

pub mod apply;
pub mod convert;
pub mod current;
pub mod export;
pub mod install;
pub mod list;
pub mod uninstall;
