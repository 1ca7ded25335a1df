use std::path::PathBuf;
use std::sync::Arc;
use std::time::Duration;

use anyhow::{Context, Result};
use clap::Parser;
use colored::Colorize;
use console::Emoji;
use indicatif::{ProgressBar, ProgressStyle};

use coursepull::{
    DEFAULT_ROOT_FEED_URL, DEFAULT_SNAPSHOT_FILENAME, HarvestOptions, ProgressEvent,
    ProgressReporter, ReqwestClient, SharedProgressReporter, run,
};

// Emoji with fallback for terminals without Unicode support
static GRADUATION: Emoji<'_, '_> = Emoji("🎓 ", "");
static SEARCH: Emoji<'_, '_> = Emoji("🔍 ", "[~] ");
static BOOKS: Emoji<'_, '_> = Emoji("📚 ", "[i] ");
static CLAPPER: Emoji<'_, '_> = Emoji("🎬 ", "[v] ");
static PARTY: Emoji<'_, '_> = Emoji("🎉 ", "[*] ");
static FOLDER: Emoji<'_, '_> = Emoji("📁 ", "");
static CROSS: Emoji<'_, '_> = Emoji("✗ ", "x ");

/// Harvest lecture course feeds into a JSON snapshot
#[derive(Parser, Debug)]
#[command(name = "coursepull")]
#[command(about = "Harvest lecture course feeds and their chapter markers into a JSON snapshot")]
#[command(version)]
struct Args {
    /// Atom feed listing all courses
    #[arg(short, long, default_value = DEFAULT_ROOT_FEED_URL)]
    feed: String,

    /// Snapshot file to write
    #[arg(short, long, default_value = DEFAULT_SNAPSHOT_FILENAME)]
    output: PathBuf,

    /// Delay before each subtitle request, in milliseconds
    #[arg(short, long, default_value = "100")]
    delay: u64,

    /// Give up on a request after this many seconds (no timeout by default)
    #[arg(short, long)]
    timeout: Option<u64>,

    /// Quiet mode - only print errors
    #[arg(short, long)]
    quiet: bool,
}

/// Progress reporter printing to the terminal
///
/// Errors are always printed as `Error:` lines on stdout; everything else
/// is suppressed in quiet mode.
struct ConsoleReporter {
    spinner: Option<ProgressBar>,
}

impl ConsoleReporter {
    fn new(quiet: bool) -> Self {
        let spinner = (!quiet).then(|| {
            let style = ProgressStyle::default_spinner()
                .template("{spinner:.green} {wide_msg}")
                .unwrap();

            let spinner = ProgressBar::new_spinner();
            spinner.set_style(style);
            spinner.enable_steady_tick(Duration::from_millis(100));
            spinner
        });

        Self { spinner }
    }

    fn status(&self, message: String) {
        if let Some(spinner) = &self.spinner {
            spinner.set_message(message);
        }
    }

    fn line(&self, message: String) {
        match &self.spinner {
            Some(spinner) => spinner.suspend(|| println!("{message}")),
            None => println!("{message}"),
        }
    }

    fn error(&self, message: String) {
        self.line(error_line(message));
    }
}

impl ProgressReporter for ConsoleReporter {
    fn report(&self, event: ProgressEvent) {
        match event {
            ProgressEvent::FetchingFeed { url } => {
                self.status(format!("{SEARCH}Fetching feed: {}", url.cyan()));
            }

            ProgressEvent::FeedParsed { url, entry_count } => {
                self.status(format!(
                    "{SEARCH}{} • {} entries",
                    url.cyan(),
                    entry_count.to_string().cyan()
                ));
            }

            ProgressEvent::CourseStarted {
                course_title,
                course_index,
                total_courses,
            } => {
                if self.spinner.is_some() {
                    self.line(format!(
                        "{BOOKS}[{}/{}] Processing {}",
                        (course_index + 1).to_string().cyan(),
                        total_courses.to_string().cyan(),
                        course_title.bold().green()
                    ));
                }
            }

            ProgressEvent::CourseSkipped {
                course_title,
                error,
                ..
            } => {
                self.error(format!("{} ({})", error, course_title.yellow()));
            }

            ProgressEvent::EpisodeMerged {
                episode_key,
                episode_title,
                has_chapters,
                ..
            } => {
                self.status(format!(
                    "{CLAPPER}{} {}{}",
                    episode_key.dimmed(),
                    truncate_title(&episode_title, 50),
                    if has_chapters { " (chapters)".green() } else { "".normal() }
                ));
            }

            ProgressEvent::ChaptersUnavailable {
                episode_title,
                error,
                ..
            } => {
                if self.spinner.is_some() {
                    self.line(format!(
                        "  {CROSS}{} - {}",
                        truncate_title(&episode_title, 40).yellow(),
                        error.dimmed()
                    ));
                }
            }

            ProgressEvent::SnapshotWritten {
                path,
                course_count,
                episode_count,
            } => {
                if self.spinner.is_some() {
                    self.line(format!(
                        "{FOLDER}Wrote {} courses / {} episodes to {}",
                        course_count.to_string().green().bold(),
                        episode_count.to_string().green(),
                        path.display().to_string().cyan()
                    ));
                }
            }

            ProgressEvent::HarvestCompleted {
                course_count,
                episode_count,
                skipped_count,
            } => {
                if let Some(spinner) = &self.spinner {
                    spinner.finish_and_clear();
                    println!(
                        "\n{PARTY}{} {} courses, {} episodes, {} skipped",
                        "Harvest complete:".bold().green(),
                        course_count.to_string().green().bold(),
                        episode_count.to_string().green(),
                        if skipped_count > 0 {
                            skipped_count.to_string().red().bold()
                        } else {
                            skipped_count.to_string().green()
                        }
                    );
                }
            }
        }
    }
}

/// Format a user-visible error line, always starting with `Error:`
fn error_line(message: impl std::fmt::Display) -> String {
    format!("{} {}", "Error:".red().bold(), message)
}

/// Disable colored output unless stdout is a terminal
fn configure_colors(stdout_is_terminal: bool) {
    if !stdout_is_terminal {
        colored::control::set_override(false);
    }
}

fn truncate_title(title: &str, max_len: usize) -> String {
    if title.chars().count() <= max_len {
        title.to_string()
    } else {
        let truncated: String = title.chars().take(max_len.saturating_sub(3)).collect();
        format!("{truncated}...")
    }
}

#[tokio::main]
async fn main() -> Result<()> {
    let args = Args::parse();
    configure_colors(console::Term::stdout().is_term());

    if !args.quiet {
        println!(
            "\n{}{} {}\n",
            GRADUATION,
            "coursepull".bold().magenta(),
            "- Lecture Feed Harvester".dimmed()
        );
    }

    let client = match args.timeout {
        Some(secs) => ReqwestClient::with_timeout(Duration::from_secs(secs))
            .context("Failed to build HTTP client")?,
        None => ReqwestClient::new(),
    };

    let options = HarvestOptions {
        request_delay: Duration::from_millis(args.delay),
    };

    let reporter = Arc::new(ConsoleReporter::new(args.quiet));
    let shared: SharedProgressReporter = reporter.clone();

    let result = run(&client, &args.feed, &args.output, &options, &shared)
        .await
        .context("Failed to harvest courses");

    if let Err(error) = result {
        if let Some(spinner) = &reporter.spinner {
            spinner.finish_and_clear();
        }
        println!("{}", error_line(format!("{error:#}")));
        std::process::exit(1);
    }

    Ok(())
}
