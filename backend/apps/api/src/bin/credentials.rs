//! Credential document tooling
//!
//! `credentials hash` prints an Argon2id PHC string for a password, suitable
//! for pasting into the `password_hash` field. `credentials init` writes an
//! empty credential document with a freshly generated signing key.

use std::io::{self, BufRead};
use std::path::PathBuf;

use anyhow::{Context, bail};
use auth::YamlCredentialFile;
use auth::domain::repository::CredentialRepository;
use auth::models::{CookieSettings, CredentialStore, RawPassword, UserPassword};
use clap::{Parser, Subcommand};
use platform::config::env_opt;
use platform::crypto::{random_key, to_base64url};

#[derive(Debug, Parser)]
#[command(name = "credentials", version, about = "Manage the dashboard credential document")]
struct Cli {
    #[command(subcommand)]
    command: Command,
}

#[derive(Debug, Subcommand)]
enum Command {
    /// Hash a password (reads one line from stdin when omitted)
    Hash {
        password: Option<String>,
    },
    /// Create an empty credential document
    Init {
        #[arg(default_value = "config.yaml")]
        path: PathBuf,
        /// Session cookie name
        #[arg(long, default_value = "stock_dashboard")]
        cookie_name: String,
        /// Session lifetime in days
        #[arg(long, default_value_t = 30)]
        expiry_days: u32,
        /// Overwrite an existing document
        #[arg(long)]
        force: bool,
    },
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    dotenvy::dotenv().ok();

    match Cli::parse().command {
        Command::Hash { password } => hash(password),
        Command::Init {
            path,
            cookie_name,
            expiry_days,
            force,
        } => init(path, cookie_name, expiry_days, force).await,
    }
}

fn hash(password: Option<String>) -> anyhow::Result<()> {
    let password = match password {
        Some(p) => p,
        None => {
            let mut line = String::new();
            io::stdin()
                .lock()
                .read_line(&mut line)
                .context("failed to read password from stdin")?;
            line.trim_end_matches(['\r', '\n']).to_string()
        }
    };

    let raw = RawPassword::new(password)?;
    let pepper = env_opt("PASSWORD_PEPPER");
    let hashed = UserPassword::from_raw(&raw, pepper.as_deref().map(str::as_bytes))?;

    println!("{}", hashed.as_phc_string());
    Ok(())
}

async fn init(
    path: PathBuf,
    cookie_name: String,
    expiry_days: u32,
    force: bool,
) -> anyhow::Result<()> {
    if path.exists() && !force {
        bail!("{} already exists (use --force to overwrite)", path.display());
    }

    let key = to_base64url(&random_key());
    let cookie = CookieSettings::new(cookie_name, key, expiry_days)?;

    YamlCredentialFile::new(&path)
        .save(&CredentialStore::new(cookie))
        .await
        .with_context(|| format!("failed to write {}", path.display()))?;

    println!("Wrote {}", path.display());
    Ok(())
}
