use std::env;
use std::path::PathBuf;
use std::process::ExitCode;

use anyhow::{anyhow, Context, Result};
use clap::{Parser, Subcommand};
use ownership_model::{ProjectConfig, TeamRegistry};
use ownership_resolver::{FileWalker, Resolver};
use ownership_validate::{
    for_team, validate, GitStager, NoopStager, Stager, ValidateError, ValidateOptions,
};

#[derive(Parser)]
#[command(name = "ownership")]
#[command(about = "Code ownership resolution and CODEOWNERS validation", long_about = None)]
#[command(version)]
struct Cli {
    #[command(subcommand)]
    command: Commands,

    /// Enable verbose logging
    #[arg(short, long, global = true)]
    verbose: bool,

    /// Quiet mode: log only warnings/errors
    #[arg(long, global = true)]
    quiet: bool,

    /// Project root (defaults to the current directory)
    #[arg(long, global = true, value_name = "DIR")]
    project_root: Option<PathBuf>,
}

#[derive(Subcommand)]
enum Commands {
    /// Validate ownership and the generated CODEOWNERS file
    Validate {
        /// Report drift without rewriting the CODEOWNERS file
        #[arg(long)]
        skip_autocorrect: bool,

        /// Do not `git add` the rewritten CODEOWNERS file
        #[arg(long)]
        skip_stage: bool,

        /// Restrict the unowned-files check to these paths
        files: Vec<String>,
    },

    /// Print the team owning one file
    ForFile {
        path: String,

        /// Emit machine-readable JSON
        #[arg(long)]
        json: bool,
    },

    /// Print everything a team owns, grouped by ownership signal
    ForTeam { name: String },
}

fn main() -> ExitCode {
    let cli = Cli::parse();
    init_logging(cli.verbose, cli.quiet);

    match run(cli) {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            eprintln!("{e}");
            ExitCode::FAILURE
        }
    }
}

fn init_logging(verbose: bool, quiet: bool) {
    let level = if verbose {
        "debug"
    } else if quiet {
        "warn"
    } else {
        "info"
    };
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or(level))
        .format_timestamp(None)
        .init();
}

fn run(cli: Cli) -> Result<()> {
    let root = match cli.project_root {
        Some(root) => root,
        None => env::current_dir().context("failed to resolve current directory")?,
    };

    let config = ProjectConfig::load(&root)?;
    let registry = TeamRegistry::load(&root)?;
    let resolver = Resolver::new(&root, registry);

    match cli.command {
        Commands::Validate {
            skip_autocorrect,
            skip_stage,
            files,
        } => {
            let tracked = FileWalker::new(&root).tracked_files(&config.owned_globs)?;
            let options = ValidateOptions {
                autocorrect: !skip_autocorrect,
                stage_changes: !skip_stage,
                files: if files.is_empty() { None } else { Some(files) },
            };
            let stager: Box<dyn Stager> = if options.stage_changes {
                Box::new(GitStager::new(&root))
            } else {
                Box::new(NoopStager)
            };

            match validate(&resolver, &config, &tracked, &options, stager.as_ref()) {
                Ok(()) => {
                    log::info!("Ownership validated");
                    Ok(())
                }
                Err(ValidateError::ValidationFailed(message)) => Err(anyhow!(message)),
                Err(e) => Err(e.into()),
            }
        }

        Commands::ForFile { path, json } => {
            let owner = resolver.for_file(&path)?;
            if json {
                let payload = serde_json::json!({
                    "file": path,
                    "team_name": owner.as_ref().map(|team| team.name()),
                    "team_yml": owner.as_ref().map(|team| team.source_path()),
                });
                println!("{}", serde_json::to_string_pretty(&payload)?);
            } else {
                match owner {
                    Some(team) => {
                        println!("Team: {}", team.name());
                        println!("Team YML: {}", team.source_path());
                    }
                    None => println!("{path} is unowned"),
                }
            }
            Ok(())
        }

        Commands::ForTeam { name } => {
            let team = resolver
                .registry()
                .find(&name)
                .with_context(|| format!("no team named `{name}` is registered"))?
                .clone();
            let tracked = FileWalker::new(&root).tracked_files(&config.owned_globs)?;
            print!("{}", for_team(&resolver, &team, &tracked)?);
            Ok(())
        }
    }
}
