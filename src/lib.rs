pub mod artifacts;
pub mod cli;
pub mod error;
pub mod logging;
pub mod models;
pub mod processors;
pub mod readers;
pub mod settings;
pub mod tracking;
pub mod utils;
pub mod writers;

pub use error::{CleaningError, Result};
