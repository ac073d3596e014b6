use crate::commands::analysis_cmds::{
    analyze_cmd, delete_snapshots_cmd, history_summary_cmd, inspect_export_cmd, load_history_cmd,
    AppState,
};
use crate::services::analysis::{AnalysisOutcome, AnalysisResult, ExportInspection};
use crate::services::extract::{CanonicalUser, PatternReport};
use crate::services::history::format_timestamp;
use clap::{Parser, Subcommand};
use std::path::PathBuf;

#[derive(Parser, Debug)]
#[command(author, version, about = "Follower analytics for Instagram data exports", long_about = None)]
pub struct Args {
    /// Directory holding config.json, statistics.json and RawData/
    /// (default: $INSTANALYTICS_DATA_DIR, then ./HistoricalData)
    #[arg(long)]
    pub data_dir: Option<PathBuf>,

    /// Increase log verbosity (-v, -vv)
    #[arg(short, long, action = clap::ArgAction::Count)]
    pub verbose: u8,

    #[command(subcommand)]
    pub command: Command,
}

#[derive(Subcommand, Debug)]
pub enum Command {
    /// Analyze an export ZIP and record it in the history
    Analyze {
        archive: PathBuf,
        /// Record the export even if it was analyzed before
        #[arg(long)]
        reanalyze: bool,
    },
    /// List recorded analyses, newest first
    History,
    /// Totals, current ratio and follower growth
    Summary,
    /// Delete analyses by timestamp (as printed by `history`)
    Delete {
        #[arg(required = true)]
        timestamps: Vec<String>,
    },
    /// Show what an export contains without recording anything
    Inspect { archive: PathBuf },
}

pub async fn execute(command: Command, state: &AppState) -> anyhow::Result<()> {
    match command {
        Command::Analyze { archive, reanalyze } => {
            let outcome =
                analyze_cmd(state, archive.to_string_lossy().into_owned(), reanalyze).await?;
            match outcome {
                AnalysisOutcome::Completed(result) => print_result(&result),
                AnalysisOutcome::AlreadyAnalyzed(snapshot) => {
                    println!(
                        "This export was already analyzed at {}.",
                        format_timestamp(&snapshot.timestamp)
                    );
                    println!("Run again with --reanalyze to record it anyway.");
                }
            }
        }
        Command::History => {
            let history = load_history_cmd(state).await?;
            if history.is_empty() {
                println!("No analyses recorded yet.");
            }
            for snapshot in history {
                println!(
                    "{}  followers {:>6}  following {:>6}  ratio {:.2}",
                    format_timestamp(&snapshot.timestamp),
                    snapshot.followers_count,
                    snapshot.following_count,
                    snapshot.ratio()
                );
            }
        }
        Command::Summary => {
            let summary = history_summary_cmd(state).await?;
            println!("Analyses:  {}", summary.total_analyses);
            if let (Some(oldest), Some(newest)) = (summary.oldest, summary.newest) {
                println!(
                    "Range:     {} .. {}",
                    format_timestamp(&oldest),
                    format_timestamp(&newest)
                );
            }
            println!("Followers: {}", summary.current_followers);
            println!("Following: {}", summary.current_following);
            println!("Ratio:     {:.2}", summary.current_ratio);
            println!("Growth:    {}", summary.growth_trend);
        }
        Command::Delete { timestamps } => {
            let requested = timestamps.len();
            let removed = delete_snapshots_cmd(state, timestamps).await?;
            println!("Deleted {removed} of {requested} analyses.");
        }
        Command::Inspect { archive } => {
            let inspection = inspect_export_cmd(archive.to_string_lossy().into_owned()).await?;
            print_inspection(&inspection);
        }
    }
    Ok(())
}

fn print_users(title: &str, users: &[CanonicalUser]) {
    println!("\n{title} ({}):", users.len());
    for user in users {
        match user.followed_at() {
            Some(at) => println!("  {}  (since {})", user.username(), at.format("%Y-%m-%d %H:%M")),
            None => println!("  {}", user.username()),
        }
    }
}

fn print_result(result: &AnalysisResult) {
    println!(
        "{} export: {} followers, {} following (ratio {:.2})",
        result.format.label(),
        result.followers_count,
        result.following_count,
        result.snapshot.ratio()
    );
    if let Some(first) = &result.duplicate_of {
        println!("Same export as the analysis at {}.", format_timestamp(first));
    }
    print_users("Not following you back", result.not_following_back());
    print_users("You don't follow back", result.not_following());
    print_users("Mutual", result.mutual());
    println!("\nSaved as {}", format_timestamp(&result.snapshot.timestamp));
}

fn print_patterns(side: &str, report: &PatternReport) {
    println!(
        "{side}: {} chars, {} follower links, {} following headings, {} dates",
        report.characters, report.follower_links, report.following_headings, report.dates
    );
    if let Some(first) = report.first_follower.as_ref().or(report.first_following.as_ref()) {
        println!("  first match: {first}");
    }
}

fn print_inspection(inspection: &ExportInspection) {
    match inspection.format {
        Some(format) => println!("Format: {}", format.label()),
        None => println!("Format: not recognised"),
    }
    println!("Followers parts: {}", inspection.followers_parts.len());
    for part in &inspection.followers_parts {
        println!("  {part}");
    }
    println!("Relationship entries:");
    for entry in &inspection.relationship_entries {
        println!("  {entry}");
    }
    if let Some(report) = &inspection.followers_patterns {
        print_patterns("followers", report);
    }
    if let Some(report) = &inspection.following_patterns {
        print_patterns("following", report);
    }
}
