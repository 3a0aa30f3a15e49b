//! cronplate - Render nested job declarations into crontab command lines.
//!
//! Usage:
//!   cronplate render <FILE>     Print the crontab for a schedule file
//!   cronplate validate <FILE>   Render every entry and report errors
//!   cronplate list <FILE>       List entries, next run times and job types

use clap::{Parser, Subcommand};
use cronplate::{Crontab, LoadedJobList, load_job_list};
use std::path::{Path, PathBuf};
use tracing::{error, info, warn};

/// cronplate - Render nested job declarations into crontab command lines
#[derive(Parser)]
#[command(name = "cronplate")]
#[command(author, version, about, long_about = None)]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Print the crontab for a schedule file
    Render {
        /// Path to the schedule YAML file
        #[arg(value_name = "FILE")]
        file: PathBuf,

        /// Print a JSON array of entries instead of crontab lines
        #[arg(long)]
        json: bool,

        /// Value of `:path` when the file sets none (default: working directory)
        #[arg(long)]
        path: Option<String>,
    },

    /// Render every entry and report errors
    Validate {
        /// Path to the schedule YAML file
        #[arg(value_name = "FILE")]
        file: PathBuf,
    },

    /// List entries with their next run time
    List {
        /// Path to the schedule YAML file
        #[arg(value_name = "FILE")]
        file: PathBuf,
    },
}

fn main() -> Result<(), Box<dyn std::error::Error>> {
    // Logs go to stderr so rendered output can be piped into crontab
    tracing_subscriber::fmt()
        .with_writer(std::io::stderr)
        .with_env_filter(
            tracing_subscriber::EnvFilter::from_default_env()
                .add_directive(tracing::Level::INFO.into()),
        )
        .init();

    let cli = Cli::parse();

    match cli.command {
        Commands::Render { file, json, path } => {
            render(&file, json, path)?;
        }
        Commands::Validate { file } => {
            validate(&file)?;
        }
        Commands::List { file } => {
            list(&file)?;
        }
    }

    Ok(())
}

fn default_path() -> String {
    std::env::current_dir()
        .map(|dir| dir.display().to_string())
        .unwrap_or_else(|_| ".".to_string())
}

fn load(file: &Path, path: Option<String>) -> Result<LoadedJobList, Box<dyn std::error::Error>> {
    let path = path.unwrap_or_else(default_path);
    Ok(load_job_list(file, &path)?)
}

/// Print the crontab or its JSON form.
fn render(
    file: &Path,
    json: bool,
    path: Option<String>,
) -> Result<(), Box<dyn std::error::Error>> {
    let loaded = load(file, path)?;

    if json {
        let entries = loaded.renderer.render_list(&loaded.list)?;
        println!("{}", serde_json::to_string_pretty(&entries)?);
    } else {
        print!("{}", Crontab::render(&loaded.renderer, &loaded.list)?);
    }
    Ok(())
}

/// Render every entry, reporting each failure.
fn validate(file: &Path) -> Result<(), Box<dyn std::error::Error>> {
    info!("Validating schedule: {}", file.display());

    let loaded = match load(file, None) {
        Ok(loaded) => loaded,
        Err(e) => {
            error!("Validation failed: {}", e);
            return Err(e);
        }
    };

    let renderer = loaded.renderer.for_list(&loaded.list);
    let mut failures = 0;
    for entry in loaded.list.entries() {
        match renderer.render_entry(entry) {
            Ok(rendered) => {
                info!(
                    "  - {}: {} job(s) OK",
                    rendered.at,
                    rendered.commands.len()
                );
            }
            Err(e) => {
                failures += 1;
                error!("  - {}: {}", entry.schedule(), e);
            }
        }
    }

    if failures > 0 {
        return Err(format!("{} entry(ies) failed to render", failures).into());
    }

    info!("All {} entry(ies) are valid", loaded.list.entries().len());
    Ok(())
}

/// List entries, their next run and the job types visible at the top level.
fn list(file: &Path) -> Result<(), Box<dyn std::error::Error>> {
    let loaded = load(file, None)?;
    let renderer = loaded.renderer.for_list(&loaded.list);

    if loaded.list.entries().is_empty() {
        println!("No entries found in {}", file.display());
        return Ok(());
    }

    println!("Entries in {}:", file.display());
    println!();

    for entry in loaded.list.entries() {
        println!("At: {}", entry.schedule());
        if entry.schedule().is_reboot() {
            println!("  Next run: at boot");
        } else {
            match entry.schedule().next() {
                Ok(next) => println!("  Next run: {}", next.format("%Y-%m-%d %H:%M UTC")),
                Err(e) => warn!("  No next run for {}: {}", entry.schedule(), e),
            }
        }
        println!("  Jobs: {}", entry.jobs().len());
        for job in entry.jobs() {
            if job.children().is_empty() {
                println!("    - {}", job);
            } else {
                println!("    - {} (with nested jobs)", job);
            }
        }
        println!();
    }

    println!("Job types:");
    for job_type in renderer.base().job_types() {
        println!("  - {}: {}", job_type.name(), job_type.template());
        let options = job_type.option_names();
        if !options.is_empty() {
            println!("      options: {}", options.join(", "));
        }
    }

    Ok(())
}
