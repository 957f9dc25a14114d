//! CLI module
//!
//! Command-line interface for producing grade-change reports.
//!
//! # Modes
//!
//! - default: pick a course and write its grade-change CSV
//! - `--list-courses`: list the courses the token can see

mod commands;
mod menu;
mod runner;

pub use commands::{Cli, Commands};
pub use menu::{course_label, find_course, select_course};
pub use runner::Runner;
