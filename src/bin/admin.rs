//! CLI administration tool for ptsrv.
//!
//! Works directly on the storage directory, so links can be inspected and
//! special codes maintained without going through the HTTP API.
//!
//! # Usage
//!
//! ```bash
//! # List all links
//! cargo run --bin admin -- link list
//!
//! # Show a single link
//! cargo run --bin admin -- link show mycode
//!
//! # Create a link (code generated when omitted)
//! cargo run --bin admin -- link add mycode https://example.com/
//! cargo run --bin admin -- link add https://example.com/
//!
//! # Root and fallback targets
//! cargo run --bin admin -- special show
//! cargo run --bin admin -- special set fallback https://example.com/
//!
//! # Validate configuration
//! cargo run --bin admin -- check
//! ```
//!
//! # Environment Variables
//!
//! Reads the same variables as the server; `PT_DIR` is required.

use ptsrv::application::services::LinkService;
use ptsrv::config::{self, Config};
use ptsrv::domain::entities::SpecialCode;
use ptsrv::domain::repositories::LinkRepository;
use ptsrv::error::StoreError;
use ptsrv::infrastructure::persistence::FsLinkRepository;

use anyhow::{Context, Result};
use clap::{Parser, Subcommand, ValueEnum};
use colored::*;
use dialoguer::Confirm;
use std::sync::Arc;

/// CLI tool for managing ptsrv links.
#[derive(Parser)]
#[command(name = "admin")]
#[command(author, version, about, long_about = None)]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

/// Top-level command groups.
#[derive(Subcommand)]
enum Commands {
    /// Manage links
    Link {
        #[command(subcommand)]
        action: LinkAction,
    },

    /// Manage the root and fallback targets
    Special {
        #[command(subcommand)]
        action: SpecialAction,
    },

    /// Validate configuration
    Check,
}

/// Link subcommands.
#[derive(Subcommand)]
enum LinkAction {
    /// List all links
    List,

    /// Show the target of one code
    Show { code: String },

    /// Create a link; `add <target>` generates the code
    Add {
        /// Code, or the target when it is the only argument
        #[arg(value_name = "CODE")]
        first: String,

        /// Target URL
        #[arg(value_name = "TARGET")]
        second: Option<String>,
    },
}

/// Special code subcommands.
#[derive(Subcommand)]
enum SpecialAction {
    /// Show root and fallback targets
    Show,

    /// Replace the root or fallback target
    Set {
        which: Writable,

        target: String,

        /// Skip confirmation prompt
        #[arg(short = 'y', long)]
        yes: bool,
    },
}

/// Special codes backed by an operator-managed file.
#[derive(Clone, Copy, ValueEnum)]
enum Writable {
    Root,
    Fallback,
}

impl From<Writable> for SpecialCode {
    fn from(w: Writable) -> Self {
        match w {
            Writable::Root => SpecialCode::Root,
            Writable::Fallback => SpecialCode::Fallback,
        }
    }
}

#[tokio::main]
async fn main() -> Result<()> {
    // Load environment variables from .env file
    dotenvy::dotenv().ok();

    let cli = Cli::parse();

    match cli.command {
        Commands::Link { action } => {
            let (config, repo) = open_store()?;
            handle_link_action(action, repo, &config).await?
        }
        Commands::Special { action } => {
            let (_, repo) = open_store()?;
            handle_special_action(action, repo).await?
        }
        Commands::Check => handle_check()?,
    }

    Ok(())
}

/// Loads configuration and opens the storage directory it names.
fn open_store() -> Result<(Config, Arc<FsLinkRepository>)> {
    let config = config::load_from_env()?;
    let repo = Arc::new(FsLinkRepository::new(&config.root_dir));
    Ok((config, repo))
}

/// Dispatches link commands.
async fn handle_link_action(
    action: LinkAction,
    repo: Arc<FsLinkRepository>,
    config: &Config,
) -> Result<()> {
    let service = LinkService::new(repo.clone(), None, config.base_url.clone());

    match action {
        LinkAction::List => list_links(&service).await,
        LinkAction::Show { code } => show_link(repo.as_ref(), &code).await,
        LinkAction::Add { first, second } => {
            let (code, target) = match second {
                Some(target) => (first, target),
                None => (String::new(), first),
            };
            add_link(&service, &code, &target).await
        }
    }
}

/// Lists all non-special links.
///
/// # Output Format
///
/// ```text
/// 📋 Links
///
///   Code             Target
///   ────────────────────────────────────────────
///   mycode           https://example.com/
/// ```
async fn list_links(service: &LinkService) -> Result<()> {
    println!("{}", "📋 Links".bright_blue().bold());
    println!();

    let links = service
        .list()
        .await
        .map_err(|e| anyhow::anyhow!("Failed to list links: {}", e))?;

    if links.is_empty() {
        println!("{}", "  No links found".yellow());
        return Ok(());
    }

    println!(
        "  {:<16} {}",
        "Code".bright_white().bold(),
        "Target".bright_white().bold()
    );
    println!("  {}", "─".repeat(60).bright_black());

    for link in &links {
        let target = if link.target.starts_with("read error: ") {
            link.target.red()
        } else {
            link.target.normal()
        };
        println!("  {:<16} {}", link.code.cyan(), target);
    }

    println!();
    println!("  Total: {}", links.len().to_string().bright_white().bold());
    println!();

    Ok(())
}

async fn show_link(repo: &FsLinkRepository, code: &str) -> Result<()> {
    match repo.read(code).await {
        Ok(target) => {
            println!("  {} → {}", code.cyan(), target);
            Ok(())
        }
        Err(StoreError::NotFound) => anyhow::bail!("Link '{}' not found", code),
        Err(e) => Err(anyhow::anyhow!("Failed to read '{}': {}", code, e)),
    }
}

/// Creates a link through the same exclusive-create path as the HTTP API.
async fn add_link(service: &LinkService, code: &str, target: &str) -> Result<()> {
    let code = service
        .create(code, target.as_bytes())
        .await
        .map_err(|e| anyhow::anyhow!("Failed to create link: {}", e))?;

    println!("{}", "✅ Link created".green().bold());
    println!("  {} → {}", service.short_link(&code).cyan(), target.trim());

    Ok(())
}

/// Dispatches special code commands.
async fn handle_special_action(action: SpecialAction, repo: Arc<FsLinkRepository>) -> Result<()> {
    match action {
        SpecialAction::Show => show_specials(repo.as_ref()).await,
        SpecialAction::Set { which, target, yes } => {
            set_special(repo.as_ref(), which.into(), &target, yes).await
        }
    }
}

async fn show_specials(repo: &FsLinkRepository) -> Result<()> {
    println!("{}", "⚙️  Special codes".bright_blue().bold());
    println!();

    for code in [SpecialCode::Root, SpecialCode::Fallback] {
        let value = match repo.read(code.as_str()).await {
            Ok(target) if !target.is_empty() => target.normal(),
            Ok(_) | Err(StoreError::NotFound) => "(unset)".bright_black(),
            Err(e) => format!("read error: {e}").red(),
        };
        println!("  {:<10} {}", code.as_str().cyan(), value);
    }
    println!();

    Ok(())
}

/// Replaces a root or fallback target, confirming before overwriting.
async fn set_special(
    repo: &FsLinkRepository,
    code: SpecialCode,
    target: &str,
    skip_confirm: bool,
) -> Result<()> {
    let current = match repo.read(code.as_str()).await {
        Ok(target) => Some(target).filter(|t| !t.is_empty()),
        Err(StoreError::NotFound) => None,
        Err(e) => return Err(anyhow::anyhow!("Failed to read {}: {}", code, e)),
    };

    if let Some(ref current) = current {
        println!("  Current: {}", current.yellow());
        println!("  New:     {}", target.trim().green());
        println!();

        if !skip_confirm {
            let confirmed = Confirm::new()
                .with_prompt(format!("Replace {code}?"))
                .default(false)
                .interact()?;

            if !confirmed {
                println!("{}", "❌ Cancelled".red());
                return Ok(());
            }
        }
    }

    repo.write_special(code, target)
        .await
        .with_context(|| format!("Failed to write {code}"))?;

    println!("{}", format!("✅ {code} updated").green().bold());

    Ok(())
}

/// Validates configuration and reports the effective settings.
fn handle_check() -> Result<()> {
    println!("{}", "🔍 Configuration check".bright_blue().bold());
    println!();

    let config = Config::from_env()?;

    match config.validate() {
        Ok(()) => println!("  {}", "✅ Configuration valid".green()),
        Err(e) => {
            println!("  {} {}", "❌ Configuration invalid:".red(), e);
            return Err(e);
        }
    }

    println!("  Root dir:   {}", config.root_dir.display().to_string().cyan());
    match &config.notify_dir {
        Some(dir) => println!("  Notify dir: {}", dir.display().to_string().cyan()),
        None => println!("  Notify dir: {}", "disabled".bright_black()),
    }
    println!(
        "  Pushover:   {}",
        if config.pushover_credentials.is_some() {
            "configured".green()
        } else {
            "not configured".yellow()
        }
    );
    println!(
        "  Auth:       {}",
        if config.auth_key.is_some() {
            "set".green()
        } else {
            "unset".yellow()
        }
    );
    println!();

    Ok(())
}
