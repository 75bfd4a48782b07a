//! Tastecraft CLI — share a cooking skill with media attachments.
//!
//! Set TASTECRAFT_API_URL, TASTECRAFT_STORAGE_URL, and optionally
//! TASTECRAFT_TOKEN. Attachment and video-duration ceilings come from the
//! TASTECRAFT_* environment variables with product defaults.

use anyhow::{Context, Result};
use clap::{Parser, Subcommand};
use std::sync::Arc;

use tastecraft_cli::init_tracing;
use tastecraft_client::{
    HttpSkillShareApi, SharedSessionState, SkillShareBackend, SubmissionSession,
};
use tastecraft_core::IngestConfig;
use tastecraft_ingest::{CandidateFile, FfprobeDurationProbe};
use tastecraft_storage::HttpMediaStore;

#[derive(Parser)]
#[command(name = "tastecraft", about = "Tastecraft skill-share CLI")]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Share a skill: upload media attachments and publish the post
    Share {
        /// Post text
        #[arg(long)]
        text: String,
        /// Author user id
        #[arg(long)]
        user: String,
        /// Media files to attach (images or videos)
        files: Vec<std::path::PathBuf>,
    },
    /// List published skill shares
    List,
}

#[tokio::main]
async fn main() -> Result<()> {
    dotenvy::dotenv().ok();
    init_tracing();

    let cli = Cli::parse();
    match cli.command {
        Commands::Share { text, user, files } => share(text, user, files).await,
        Commands::List => list().await,
    }
}

async fn share(text: String, user: String, files: Vec<std::path::PathBuf>) -> Result<()> {
    let config = IngestConfig::from_env();
    let store = Arc::new(HttpMediaStore::from_env()?);
    let durations = Arc::new(FfprobeDurationProbe::new(config.ffprobe_path.clone()));
    let backend = Arc::new(HttpSkillShareApi::from_env()?);
    let state = SharedSessionState::new();
    state.open_dialog();

    let mut session = SubmissionSession::new(
        &config,
        store,
        durations,
        backend.clone(),
        Arc::new(state.clone()),
        user,
    );
    session.set_text(text);

    let mut candidates = Vec::with_capacity(files.len());
    for path in &files {
        candidates.push(CandidateFile::from_path(path).await?);
    }

    let outcomes = session
        .add_files(candidates)
        .await
        .context("Batch ingestion failed")?;
    for outcome in &outcomes {
        println!("{}", outcome.message());
    }
    if session.attachments().is_empty() {
        anyhow::bail!("no files were accepted; nothing to share");
    }

    let id = session.submit().await?;
    println!("Published skill share {}", id);

    if state.snapshot().needs_refresh {
        let shares = backend
            .list_skill_shares()
            .await
            .context("Failed to refresh skill share list")?;
        state.mark_refreshed();
        println!("{} skill shares published in total", shares.len());
    }
    Ok(())
}

async fn list() -> Result<()> {
    let backend = HttpSkillShareApi::from_env()?;
    let shares = backend.list_skill_shares().await?;
    for share in shares {
        println!(
            "{}  {}  [{} media]  {}",
            share.created_at.format("%Y-%m-%d %H:%M"),
            share.id,
            share.media_urls.len(),
            share.text
        );
    }
    Ok(())
}
