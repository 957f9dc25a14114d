//! CLI runner - executes the selected action

use crate::auth::{load_token_file, Credential};
use crate::canvas::{CanvasClient, Course, StaffIndex};
use crate::cli::commands::{Cli, Commands};
use crate::cli::menu::{course_label, find_course, select_course};
use crate::config::Settings;
use crate::error::Result;
use crate::http::HttpClient;
use crate::progress::{BarProgress, NoProgress, ProgressReporter};
use crate::report::write_report_file;
use std::time::Instant;
use tracing::{debug, info};

/// CLI runner
pub struct Runner {
    cli: Cli,
}

impl Runner {
    /// Create a new runner
    pub fn new(cli: Cli) -> Self {
        Self { cli }
    }

    /// Run the CLI command
    pub async fn run(&self) -> Result<()> {
        let settings = self.load_settings()?;
        let client = self.build_client(&settings)?;

        match self.cli.command() {
            Commands::Courses => self.list_courses(&client).await,
            Commands::Report { course } => self.report(&client, &settings, course).await,
        }
    }

    /// Defaults, then the settings file, then environment, then flags
    fn load_settings(&self) -> Result<Settings> {
        let mut settings = match &self.cli.config {
            Some(path) => Settings::from_file(path)?,
            None => Settings::default(),
        };
        settings.apply_env();
        self.cli.apply_to(&mut settings);
        settings.validate()?;
        debug!("Settings: {settings:?}");
        Ok(settings)
    }

    fn build_client(&self, settings: &Settings) -> Result<CanvasClient> {
        let token_path = settings.token_path();
        debug!("Reading token from {}", token_path.display());
        let credential =
            Credential::new(load_token_file(&token_path)?).with_param(&settings.token_param);

        let http = HttpClient::with_config(settings.http_config())?;
        Ok(CanvasClient::new(http, settings.base_url()?, credential)
            .with_per_page(settings.per_page)
            .with_max_pages(settings.max_pages))
    }

    async fn list_courses(&self, client: &CanvasClient) -> Result<()> {
        let courses = client.load_courses().await?;
        for course in &courses {
            println!("{}", course_label(course));
        }
        Ok(())
    }

    async fn report(
        &self,
        client: &CanvasClient,
        settings: &Settings,
        preselected: Option<u64>,
    ) -> Result<()> {
        let start = Instant::now();

        println!("Loading Courses...");
        let courses = client.load_courses().await?;
        let course = pick_course(&courses, preselected)?;
        info!("Selected course {} ({})", course.id, course.name);

        println!("Finding Staff...");
        let staff = StaffIndex::from_members(client.get_staff(course.id).await?);

        println!("Finding Grading Events... [this may take a while for large courses]");
        let mut progress: Box<dyn ProgressReporter> = if self.cli.no_progress {
            Box::new(NoProgress)
        } else {
            Box::new(BarProgress::new("Loading paginated results..."))
        };
        let events = client
            .get_grading_events(course.id, progress.as_mut())
            .await?;

        println!("Dumping to CSV...");
        std::fs::create_dir_all(&settings.output_dir)?;
        let summary = write_report_file(&settings.output_dir, course, &events, &staff)?;
        if summary.skipped > 0 {
            info!(
                "Skipped {} events with no matching staff grader",
                summary.skipped
            );
        }
        info!(
            "Wrote {} rows in {:.2}s",
            summary.rows_written,
            start.elapsed().as_secs_f64()
        );

        println!("Written to {}", summary.path.display());
        Ok(())
    }
}

fn pick_course(courses: &[Course], preselected: Option<u64>) -> Result<&Course> {
    match preselected {
        Some(id) => find_course(courses, id),
        None => Ok(&courses[select_course(courses)?]),
    }
}
