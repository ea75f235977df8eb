//! gitcache - query a git repository through the caching facade
//!
//! # Usage
//! ```bash
//! gitcache /path/to/repository years
//! gitcache /path/to/repository commits 2020-03-15
//! gitcache /path/to/repository ls <commit> src
//! gitcache --json /path/to/repository branches
//! ```

use std::io::Write;
use std::path::PathBuf;

use chrono::{Datelike, NaiveDate};
use clap::{Parser, Subcommand};
use serde::Serialize;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

use gitcache::{GitRepository, RepoOptions};

/// Query a git repository's refs, history and trees
#[derive(Parser)]
#[command(name = "gitcache")]
#[command(about = "Cached queries against a git repository", long_about = None)]
struct Cli {
    /// Path to the git repository
    #[arg(value_name = "REPO_PATH")]
    repo_path: PathBuf,

    #[command(subcommand)]
    command: Commands,

    /// Run every query, even repeated ones
    #[arg(long)]
    no_cache: bool,

    /// File receiving git's stderr and failed query messages
    #[arg(long, default_value = "giterr.log")]
    error_log: PathBuf,

    /// Branch used for year and day queries
    #[arg(short, long, default_value = "master")]
    branch: String,

    /// git executable
    #[arg(long, default_value = "git")]
    git: PathBuf,

    /// Print results as JSON
    #[arg(long)]
    json: bool,
}

#[derive(Subcommand)]
enum Commands {
    /// Years with commits on the primary branch
    Years,
    /// Local branches
    Branches,
    /// Tags
    Tags,
    /// Commits made during the day before DATE (YYYY-MM-DD)
    Commits { date: NaiveDate },
    /// Most recent commit reachable from a branch or tag
    Head { name: String },
    /// Full log starting at a commit
    Log { commit: String },
    /// Directory contents at a commit
    Ls {
        commit: String,
        #[arg(default_value = "")]
        path: String,
    },
    /// Whether a path is a directory at a commit
    IsDir { commit: String, path: String },
    /// File contents at a commit
    Cat { commit: String, path: String },
    /// File size in bytes at a commit
    Size { commit: String, path: String },
}

fn print<T: Serialize + std::fmt::Display>(json: bool, value: &T) -> anyhow::Result<()> {
    if json {
        println!("{}", serde_json::to_string(value)?);
    } else {
        println!("{}", value);
    }
    Ok(())
}

fn print_lines<T: Serialize>(json: bool, items: &[T], line: impl Fn(&T) -> String) -> anyhow::Result<()> {
    if json {
        println!("{}", serde_json::to_string(items)?);
    } else {
        for item in items {
            println!("{}", line(item));
        }
    }
    Ok(())
}

fn run(cli: Cli) -> anyhow::Result<()> {
    let options = RepoOptions::default()
        .with_caching(!cli.no_cache)
        .with_error_log(cli.error_log)
        .with_primary_branch(cli.branch)
        .with_git_binary(cli.git);

    let mut repo = GitRepository::open(&cli.repo_path, options)?;
    let json = cli.json;

    match cli.command {
        Commands::Years => print_lines(json, &repo.years().to_vec(), |y| y.to_string())?,
        Commands::Branches => print_lines(json, &repo.branches()?, |r| format!("{} {}", r.commit, r.name))?,
        Commands::Tags => print_lines(json, &repo.tags()?, |r| format!("{} {}", r.commit, r.name))?,
        Commands::Commits { date } => {
            let commits = repo.commits(date.year(), date.month(), date.day())?;
            print_lines(json, &commits, String::clone)?
        }
        Commands::Head { name } => print(json, &repo.last_commit_of_branch(&name)?)?,
        Commands::Log { commit } => print!("{}", repo.commit_log(&commit)?),
        Commands::Ls { commit, path } => {
            let names = repo.directory_contents(&commit, &path)?;
            print_lines(json, &names, String::clone)?
        }
        Commands::IsDir { commit, path } => print(json, &repo.is_directory(&commit, &path)?)?,
        Commands::Cat { commit, path } => {
            let contents = repo.file_contents(&commit, &path)?;
            std::io::stdout().write_all(&contents)?;
        }
        Commands::Size { commit, path } => print(json, &repo.file_size(&commit, &path)?)?,
    }

    let stats = repo.stats();
    tracing::debug!(
        "{} git invocations, {} cache hits, {} cached results",
        stats.invocations,
        stats.hits,
        stats.entries
    );
    Ok(())
}

fn main() {
    let cli = Cli::parse();

    tracing_subscriber::registry()
        .with(tracing_subscriber::EnvFilter::new(
            std::env::var("RUST_LOG").unwrap_or_else(|_| "warn".into()),
        ))
        .with(tracing_subscriber::fmt::layer().with_writer(std::io::stderr))
        .init();

    if let Err(e) = run(cli) {
        eprintln!("✗ {}", e);
        std::process::exit(1);
    }
}
