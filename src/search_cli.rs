// src/search_cli.rs
use crate::core::{
    search_with_fallback, ConfigManager, Dashboard, DataSource, FallbackStore, JobFetcher,
    SearchOutcome, DEFAULT_TOP_N,
};
use crate::report::render_dashboard;
use crate::types::{ExperienceLevel, JobFilter, Query};
use anyhow::{Context, Result};
use clap::{Args, Parser, Subcommand};
use std::path::PathBuf;
use tracing::info;

#[derive(Parser)]
#[command(name = "job-explorer")]
#[command(about = "Search job postings, keep a fallback copy, and summarize the results")]
pub struct Cli {
    #[command(subcommand)]
    pub command: Command,

    /// Write JSON logs to this file instead of stderr
    #[arg(long, global = true)]
    pub log_file: Option<PathBuf>,
}

#[derive(Subcommand)]
pub enum Command {
    /// Search the job API (falls back to the saved results on failure)
    Search(SearchArgs),
    /// Inspect the saved fallback results
    Cache {
        #[command(subcommand)]
        command: CacheCommand,
    },
    /// Serve the dashboard data over HTTP
    Serve {
        #[arg(long, env = "ROCKET_PORT", default_value_t = 8000)]
        port: u16,
    },
}

#[derive(Subcommand)]
pub enum CacheCommand {
    /// Summarize the saved results
    Show {
        /// Drop repeated postings
        #[arg(long)]
        dedup: bool,
        #[command(flatten)]
        refine: RefineArgs,
        #[command(flatten)]
        output: OutputArgs,
    },
}

#[derive(Args)]
pub struct SearchArgs {
    /// Job title to search for
    pub title: String,
    #[arg(long, default_value = "India")]
    pub location: String,
    /// Skill added to the search query
    #[arg(long)]
    pub skill: Option<String>,
    #[arg(long, value_enum, default_value_t = ExperienceLevel::Any)]
    pub experience: ExperienceLevel,
    #[arg(long)]
    pub industry: Option<String>,
    #[command(flatten)]
    pub refine: RefineArgs,
    #[command(flatten)]
    pub output: OutputArgs,
}

#[derive(Args)]
pub struct RefineArgs {
    /// Keep jobs whose city contains this text
    #[arg(long)]
    pub city: Option<String>,
    /// Keep jobs whose employer contains this text
    #[arg(long)]
    pub company: Option<String>,
    /// Keep jobs whose title contains this text
    #[arg(long)]
    pub role: Option<String>,
    /// Keep jobs listing exactly this skill
    #[arg(long)]
    pub require_skill: Option<String>,
}

#[derive(Args)]
pub struct OutputArgs {
    /// Entries per ranking
    #[arg(long, default_value_t = DEFAULT_TOP_N)]
    pub top: usize,
    /// Print the dashboard as JSON
    #[arg(long)]
    pub json: bool,
}

impl From<RefineArgs> for JobFilter {
    fn from(args: RefineArgs) -> Self {
        JobFilter {
            location: args.city,
            company: args.company,
            title: args.role,
            skill: args.require_skill,
        }
    }
}

impl SearchArgs {
    fn query(&self) -> Query {
        Query {
            title: self.title.clone(),
            location: self.location.clone(),
            skill: self.skill.clone(),
            experience: self.experience,
            industry: self.industry.clone(),
        }
    }
}

pub async fn handle_command(command: Command) -> Result<()> {
    match command {
        Command::Search(args) => {
            let config = ConfigManager::load()?;
            let fetcher = JobFetcher::new(config.api)?;
            let store = FallbackStore::new(config.storage.fallback_path);

            let outcome = search_with_fallback(&fetcher, &store, &args.query()).await;
            let dashboard = Dashboard::build(outcome, args.refine.into(), args.output.top);
            print_dashboard(dashboard, args.output.json)
        }

        Command::Cache {
            command:
                CacheCommand::Show {
                    dedup,
                    refine,
                    output,
                },
        } => {
            let storage = ConfigManager::load_storage_only()?;
            let store = FallbackStore::new(storage.fallback_path);
            let table = if dedup {
                store.load_deduplicated().await?
            } else {
                store.load().await?
            };
            info!("Showing {} saved jobs from {}", table.len(), store.path().display());

            let source = if table.is_empty() {
                DataSource::Unavailable {
                    reason: "Nothing saved yet.".to_string(),
                }
            } else {
                DataSource::Fallback {
                    reason: "Saved results.".to_string(),
                }
            };
            let outcome = SearchOutcome {
                query: Query::default(),
                table,
                source,
            };
            let dashboard = Dashboard::build(outcome, refine.into(), output.top);
            print_dashboard(dashboard, output.json)
        }

        Command::Serve { port } => {
            let config = ConfigManager::load()?;
            crate::web::start_web_server(config, port).await
        }
    }
}

fn print_dashboard(dashboard: Dashboard, json: bool) -> Result<()> {
    if json {
        let text =
            serde_json::to_string_pretty(&dashboard).context("Failed to serialize dashboard")?;
        println!("{}", text);
    } else {
        print!("{}", render_dashboard(&dashboard));
    }
    Ok(())
}
