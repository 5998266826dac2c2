//! # warden-bot
//!
//! Process shell around the engine: an in-memory guild platform, the audit
//! channel logger, and a driver that replays guild events from stdin.

pub mod audit;
pub mod platform;
pub mod replay;

use std::sync::Arc;

use tokio::io::BufReader;
use tracing::info;

use warden_common::{AppConfig, AppError, AppResult};
use warden_core::SystemClock;
use warden_service::EngineContext;
use warden_store::JsonParticipationStore;

pub use audit::{ChannelAuditLogger, RecordingAuditSink};
pub use platform::MemoryGuild;
pub use replay::{replay, ReplaySummary};

/// Wire the engine from configuration and replay stdin to stdout
pub async fn run(config: AppConfig) -> AppResult<ReplaySummary> {
    let store = JsonParticipationStore::open(&config.store.message_count_file)
        .await
        .map_err(|e| AppError::Storage(e.to_string()))?;

    let guild = Arc::new(MemoryGuild::new());
    let audit = Arc::new(ChannelAuditLogger::new(
        guild.clone(),
        config.guild.audit_channel_id,
    ));

    let ctx = EngineContext::builder()
        .config(&config)
        .platform(guild.clone())
        .clock(Arc::new(SystemClock))
        .audit_sink(audit)
        .participation(Arc::new(store))
        .build()?;

    info!(
        guild_id = %config.guild.guild_id,
        audit_channel = %config.guild.audit_channel_id,
        prefix = ctx.command_prefix(),
        staff_roles = ctx.catalog().staff.len(),
        league_roles = ctx.catalog().leagues.len(),
        "Engine ready, replaying events from stdin"
    );

    replay(
        &ctx,
        &guild,
        BufReader::new(tokio::io::stdin()),
        tokio::io::stdout(),
    )
    .await
}
