use clap::{Parser, Subcommand};
use profile_common::Settings;
use profile_http::{ClientConfig, ProfileClient, Session};
use profile_sections::entities::*;
use std::path::PathBuf;
use tracing::info;

mod section;

use section::{attach_image, no_attachment, run_section};

#[derive(Parser)]
#[command(name = "profile-cli")]
#[command(about = "Manage the list sections of a casting profile")]
struct Cli {
    /// API base URL (overrides config and PROFILE_API_URL)
    #[arg(long, global = true)]
    api_url: Option<String>,

    /// Session token (overrides config and PROFILE_API_TOKEN)
    #[arg(long, global = true)]
    token: Option<String>,

    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand)]
enum Command {
    Achievements {
        #[command(subcommand)]
        action: Action,
    },
    Contacts {
        #[command(subcommand)]
        action: Action,
    },
    Experiences {
        #[command(subcommand)]
        action: Action,
    },
    Gallery {
        #[command(subcommand)]
        action: Action,
    },
    Links {
        #[command(subcommand)]
        action: Action,
    },
    /// Show or change stored settings
    Config {
        #[command(subcommand)]
        action: ConfigAction,
    },
}

#[derive(Subcommand, Debug, PartialEq)]
pub(crate) enum Action {
    /// Print the section's items
    List,
    /// Create an item from a JSON wire record
    Add {
        #[arg(long)]
        json: String,
        /// Image file to upload (gallery only)
        #[arg(long)]
        file: Option<PathBuf>,
    },
    /// Replace the item at INDEX with a JSON wire record
    Edit {
        index: usize,
        #[arg(long)]
        json: String,
        #[arg(long)]
        file: Option<PathBuf>,
    },
    /// Delete the item at INDEX after confirmation
    Delete {
        index: usize,
        /// Skip the confirmation prompt
        #[arg(long)]
        yes: bool,
    },
}

#[derive(Subcommand, Debug, PartialEq)]
enum ConfigAction {
    Show,
    SetUrl { url: String },
    SetToken { token: String },
}

fn init_tracing() {
    let filter = tracing_subscriber::EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| "profile_cli=info,profile_sections=info,profile_http=info".into());
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .init();
}

fn build_client(settings: &Settings) -> anyhow::Result<ProfileClient> {
    let config = ClientConfig {
        max_retries: settings.max_retries,
        request_timeout_ms: settings.request_timeout_ms,
        ..ClientConfig::default()
    }
    .with_base_url(settings.api_base_url.clone());

    let session = match &settings.token {
        Some(token) => Session::with_token(token.clone()),
        None => Session::anonymous(),
    };
    Ok(ProfileClient::with_config(config)?.with_session(session))
}

fn run_config(action: ConfigAction) -> anyhow::Result<()> {
    let path = profile_common::config_path()
        .ok_or_else(|| anyhow::anyhow!("Could not determine config dir"))?;
    // Stored values only; env overrides are not persisted.
    let mut settings = Settings::load_from(&path);

    match action {
        ConfigAction::Show => {
            let mut shown = settings;
            shown.apply_env();
            if shown.token.is_some() {
                shown.token = Some("<redacted>".into());
            }
            println!("# {}", path.display());
            println!("{}", serde_json::to_string_pretty(&shown)?);
        }
        ConfigAction::SetUrl { url } => {
            url::Url::parse(&url)?;
            settings.api_base_url = url;
            settings.save_to(&path)?;
        }
        ConfigAction::SetToken { token } => {
            settings.token = Some(token).filter(|t| !t.trim().is_empty());
            settings.save_to(&path)?;
        }
    }
    Ok(())
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    init_tracing();
    let cli = Cli::parse();

    let command = match cli.command {
        Command::Config { action } => return run_config(action),
        section => section,
    };

    let mut settings = Settings::load();
    if let Some(url) = cli.api_url {
        settings.api_base_url = url;
    }
    if let Some(token) = cli.token {
        settings.token = Some(token);
    }
    info!("[CLI] using API at {}", settings.api_base_url);
    let client = build_client(&settings)?;

    match command {
        Command::Achievements { action } => {
            run_section::<AchievementAdapter>(client, action, no_attachment).await
        }
        Command::Contacts { action } => {
            run_section::<ContactAdapter>(client, action, no_attachment).await
        }
        Command::Experiences { action } => {
            run_section::<ExperienceAdapter>(client, action, no_attachment).await
        }
        Command::Gallery { action } => {
            run_section::<GalleryAdapter>(client, action, attach_image).await
        }
        Command::Links { action } => {
            run_section::<PublicLinkAdapter>(client, action, no_attachment).await
        }
        Command::Config { .. } => Ok(()),
    }
}
