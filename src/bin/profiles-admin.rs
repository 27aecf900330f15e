use anyhow::Context;
use clap::{Parser, Subcommand};
use profiles::commands::profile::render_profile;
use profiles::config;
use profiles::models::types::UserName;
use profiles::store::ProfileStore;
use std::path::PathBuf;

// cargo run --bin profiles-admin -- --dir ./data/profiles show Notch

#[derive(Debug, Parser)]
#[command(name = "profiles-admin", version, about = "Inspect and maintain stored player profiles")]
struct Args {
    /// Read configuration from this TOML file (if omitted, use env/.env)
    #[arg(long)]
    config: Option<PathBuf>,

    /// Override the profile directory (if omitted, use env/config)
    #[arg(long)]
    dir: Option<PathBuf>,

    #[command(subcommand)]
    cmd: Cmd,
}

#[derive(Debug, Subcommand)]
enum Cmd {
    /// Print a player's profile
    Show { user: String },
    /// Remove a player's profile record
    Delete { user: String },
    /// Number of stored profiles
    Count,
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let args = Args::parse();

    let cfg = match &args.config {
        Some(path) => config::Config::load(path)?,
        None => config::Config::from_env()?,
    };
    let dir = args.dir.unwrap_or(cfg.profiles_dir);

    let store = ProfileStore::open(&dir, cfg.corrupt_records);

    match args.cmd {
        Cmd::Show { user } => {
            let user = parse_user(&user)?;
            let profile = store
                .load(&user)
                .await
                .with_context(|| format!("failed to load profile of '{user}'"))?;
            print!("{}", render_profile(&profile));
        }
        Cmd::Delete { user } => {
            let user = parse_user(&user)?;
            let removed = store
                .delete(&user)
                .await
                .with_context(|| format!("failed to delete profile of '{user}'"))?;
            if removed {
                println!("Deleted profile of {user}");
            } else {
                println!("No profile stored for {user}");
            }
        }
        Cmd::Count => {
            let n = store
                .count()
                .await
                .with_context(|| format!("failed to read '{}'", dir.display()))?;
            println!("{n}");
        }
    }

    Ok(())
}

fn parse_user(s: &str) -> anyhow::Result<UserName> {
    UserName::parse(s).ok_or_else(|| anyhow::anyhow!("invalid user name '{s}'"))
}
