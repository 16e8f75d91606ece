pub mod catalog;
pub mod config;
pub mod error;
pub mod event;
pub mod git;
pub mod policy;
pub mod publish;
pub mod resolver;
pub mod ui;

pub use error::{AutotagError, Result};
