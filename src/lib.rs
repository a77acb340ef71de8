//! curswap library
//!
//! Core functionality for converting cursor themes between the Windows INF
//! scheme format and the X11 cursor theme format, and for managing the
//! schemes installed on the host.

pub mod commands;
pub mod config;
pub mod convert;
pub mod error;
pub mod fileops;
pub mod scheme;
pub mod store;
