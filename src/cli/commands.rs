//! CLI arguments

use crate::config::Settings;
use clap::Parser;
use std::path::PathBuf;

/// Export grade-change audit events of a course to CSV
#[derive(Parser, Debug)]
#[command(name = "grade-audit")]
#[command(author, version, about, long_about = None)]
pub struct Cli {
    /// File holding the API access token (default: ~/.canvas_token)
    pub token_file: Option<PathBuf>,

    /// Settings file (YAML)
    #[arg(short = 'C', long)]
    pub config: Option<PathBuf>,

    /// API root, e.g. https://lms.example.com/api/v1
    #[arg(long)]
    pub base_url: Option<String>,

    /// Course id; skips the interactive menu
    #[arg(long)]
    pub course: Option<u64>,

    /// Directory to write the CSV into
    #[arg(short, long)]
    pub output_dir: Option<PathBuf>,

    /// Page size for list endpoints
    #[arg(long)]
    pub per_page: Option<u32>,

    /// Fail instead of fetching more than this many pages per request sequence
    #[arg(long)]
    pub max_pages: Option<usize>,

    /// Request timeout in seconds
    #[arg(long)]
    pub timeout: Option<u64>,

    /// Retries per failed request
    #[arg(long)]
    pub retries: Option<u32>,

    /// Print the courses the token can see and exit
    #[arg(long)]
    pub list_courses: bool,

    /// Hide the pagination progress bar
    #[arg(long)]
    pub no_progress: bool,

    /// Verbose output
    #[arg(short, long)]
    pub verbose: bool,
}

/// What a run does
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Commands {
    /// Write the grade-change CSV for one course
    Report {
        /// Preselected course id
        course: Option<u64>,
    },
    /// List courses where the token's user is staff
    Courses,
}

impl Cli {
    /// Action selected by the flags
    pub fn command(&self) -> Commands {
        if self.list_courses {
            Commands::Courses
        } else {
            Commands::Report {
                course: self.course,
            }
        }
    }

    /// Overlay flags onto loaded settings
    pub fn apply_to(&self, settings: &mut Settings) {
        if let Some(path) = &self.token_file {
            settings.token_file = Some(path.clone());
        }
        if let Some(base_url) = &self.base_url {
            settings.base_url.clone_from(base_url);
        }
        if let Some(dir) = &self.output_dir {
            settings.output_dir.clone_from(dir);
        }
        if let Some(per_page) = self.per_page {
            settings.per_page = per_page;
        }
        if let Some(max_pages) = self.max_pages {
            settings.max_pages = Some(max_pages);
        }
        if let Some(timeout) = self.timeout {
            settings.timeout_secs = timeout;
        }
        if let Some(retries) = self.retries {
            settings.max_retries = retries;
        }
    }
}
