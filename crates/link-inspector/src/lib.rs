//! Command line tool decoding universal links and checking who signed them.

pub mod arguments;
pub mod config;
mod report;
mod run;

pub use run::{run, start};
