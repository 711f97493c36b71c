pub mod cli;
pub mod config;
pub mod domain;
pub mod error;
pub mod git;
pub mod logging;
pub mod pipeline;
pub mod platform;
pub mod registry;
pub mod runner;
pub mod ui;
pub mod warning;

pub use error::{ReleaseError, Result};
