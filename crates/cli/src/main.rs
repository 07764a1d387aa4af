mod config;
mod error;

use std::path::{Path, PathBuf};
use std::sync::Arc;

use acl::{RuleDeriver, Target, UserRecord};
use clap::{Parser, Subcommand};
use session::SessionContext;
use tracing_subscriber::EnvFilter;

use config::Config;
use error::{Error, Result};

const CONFIG_FILE: &str = "warden.toml";

#[derive(Parser)]
#[command(name = "warden")]
#[command(about = "Inspect grants and gates derived from user records", long_about = None)]
#[command(version)]
struct Cli {
    /// Config file (defaults are used if it does not exist)
    #[arg(short, long, default_value = CONFIG_FILE)]
    config: PathBuf,

    /// Increase log verbosity (-v debug, -vv trace)
    #[arg(short, long, action = clap::ArgAction::Count)]
    verbose: u8,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Print the grants derived for a user, in order
    Grants {
        /// User record (JSON)
        #[arg(short, long)]
        user: PathBuf,
    },
    /// Answer whether a user may perform an action on a subject
    Can {
        /// User record (JSON)
        #[arg(short, long)]
        user: PathBuf,
        action: String,
        subject: String,
        /// Treat SUBJECT as a JSON value and detect its subject type
        #[arg(long)]
        object: bool,
    },
    /// Evaluate the gate declared for a route
    Guard {
        /// User record (JSON)
        #[arg(short, long)]
        user: PathBuf,
        route: String,
    },
    /// List the permission catalog
    Catalog,
}

fn main() {
    let cli = Cli::parse();
    init_tracing(cli.verbose);

    if let Err(e) = run(cli) {
        eprintln!("Error: {e}");
        std::process::exit(1);
    }
}

fn init_tracing(verbose: u8) {
    let default_level = match verbose {
        0 => "warn",
        1 => "debug",
        _ => "trace",
    };
    let filter =
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default_level));
    let _ = tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .with_target(false)
        .try_init();
}

fn run(cli: Cli) -> Result<()> {
    let config = load_config(&cli.config)?;

    match cli.command {
        Commands::Grants { user } => cmd_grants(&config, &user),
        Commands::Can {
            user,
            action,
            subject,
            object,
        } => cmd_can(&config, &user, &action, &subject, object),
        Commands::Guard { user, route } => cmd_guard(&config, &user, &route),
        Commands::Catalog => cmd_catalog(&config),
    }
}

fn cmd_grants(config: &Config, user_path: &Path) -> Result<()> {
    let ctx = open_session(config, user_path)?;
    let ability = ctx.ability();

    if ability.grants().is_empty() {
        println!("No grants.");
        return Ok(());
    }

    for grant in ability.grants() {
        println!("{grant}");
    }
    Ok(())
}

fn cmd_can(
    config: &Config,
    user_path: &Path,
    action: &str,
    subject: &str,
    object: bool,
) -> Result<()> {
    let ctx = open_session(config, user_path)?;
    let ability = ctx.ability();

    let value;
    let target = if object {
        value = serde_json::from_str::<serde_json::Value>(subject)?;
        Target::Object(&value)
    } else {
        Target::Tag(subject)
    };

    match ability.relevant_grant(action, target) {
        Some(grant) => println!("allowed (by {grant})"),
        None => println!("denied"),
    }
    Ok(())
}

fn cmd_guard(config: &Config, user_path: &Path, route: &str) -> Result<()> {
    let ctx = open_session(config, user_path)?;
    let gate = config.gate_for(route);

    ctx.require(&gate)?;
    println!("{route}: allowed ({gate})");
    Ok(())
}

fn cmd_catalog(config: &Config) -> Result<()> {
    let catalog = config.catalog()?;

    if catalog.is_empty() {
        println!("No permissions configured.");
        return Ok(());
    }

    println!("{:<8}  {:<12}  SUBJECT", "ID", "ACTION");
    println!("{}", "-".repeat(40));
    for permission in catalog.iter() {
        println!(
            "{:<8}  {:<12}  {}",
            permission.id, permission.action, permission.subject
        );
    }
    Ok(())
}

fn open_session(config: &Config, user_path: &Path) -> Result<SessionContext> {
    let user = load_user(user_path)?;
    let deriver = RuleDeriver::new(config.rules.clone());
    let ctx = SessionContext::new(deriver, Arc::new(config.catalog()?));
    ctx.establish(user);
    Ok(ctx)
}

fn load_user(path: &Path) -> Result<UserRecord> {
    if !path.exists() {
        return Err(Error::UserNotFound {
            path: path.to_path_buf(),
        });
    }
    let content = std::fs::read_to_string(path)?;
    Ok(UserRecord::from_json(&content)?)
}

fn load_config(path: &Path) -> Result<Config> {
    if path.exists() {
        Ok(Config::load(path)?)
    } else {
        tracing::debug!(path = %path.display(), "config not found, using defaults");
        Ok(Config::default_config())
    }
}
