//! Event replay driver
//!
//! Reads newline-delimited JSON guild events, keeps the in-memory guild in
//! step with what each event says happened on the platform, routes the event
//! through the engine, and writes one JSON result line per event.

use serde::Serialize;
use tokio::io::{AsyncBufRead, AsyncBufReadExt, AsyncWrite, AsyncWriteExt};
use tracing::{error, info, warn};

use warden_common::{AppError, AppResult};
use warden_core::GuildEvent;
use warden_service::{EngineContext, EventRouter, RouteOutcome};

use crate::platform::MemoryGuild;

/// Counters for one replay run
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize)]
pub struct ReplaySummary {
    /// Events routed successfully
    pub processed: u64,
    /// Events the engine returned an error for
    pub failed: u64,
    /// Lines that were not a valid event
    pub malformed: u64,
}

#[derive(Debug, Serialize)]
#[serde(tag = "status", rename_all = "snake_case")]
enum ReplayRecord {
    Ok {
        line: u64,
        event: &'static str,
        outcome: RouteOutcome,
    },
    Error {
        line: u64,
        code: &'static str,
        message: String,
    },
}

/// Replay every event from `reader`, writing results to `writer`
///
/// Blank lines and lines starting with `#` are skipped.
pub async fn replay<R, W>(
    ctx: &EngineContext,
    guild: &MemoryGuild,
    reader: R,
    mut writer: W,
) -> AppResult<ReplaySummary>
where
    R: AsyncBufRead + Unpin,
    W: AsyncWrite + Unpin,
{
    let router = EventRouter::new(ctx);
    let mut summary = ReplaySummary::default();
    let mut lines = reader.lines();
    let mut line_no = 0u64;

    while let Some(line) = lines.next_line().await.map_err(AppError::internal)? {
        line_no += 1;
        let line = line.trim();
        if line.is_empty() || line.starts_with('#') {
            continue;
        }

        let event: GuildEvent = match serde_json::from_str(line) {
            Ok(event) => event,
            Err(e) => {
                warn!(line = line_no, error = %e, "Skipping malformed event");
                summary.malformed += 1;
                let record = ReplayRecord::Error {
                    line: line_no,
                    code: "MALFORMED_EVENT",
                    message: e.to_string(),
                };
                write_record(&mut writer, &record).await?;
                continue;
            }
        };

        apply_to_guild(guild, &event);
        let event_type = event.event_type();

        let record = match router.route(event).await {
            Ok(outcome) => {
                summary.processed += 1;
                ReplayRecord::Ok {
                    line: line_no,
                    event: event_type,
                    outcome,
                }
            }
            Err(e) => {
                error!(line = line_no, code = e.error_code(), error = %e, "Event failed");
                summary.failed += 1;
                ReplayRecord::Error {
                    line: line_no,
                    code: e.error_code(),
                    message: e.to_string(),
                }
            }
        };
        write_record(&mut writer, &record).await?;
    }

    writer.flush().await.map_err(AppError::internal)?;

    info!(
        processed = summary.processed,
        failed = summary.failed,
        malformed = summary.malformed,
        "Replay finished"
    );
    Ok(summary)
}

/// Mirror the platform-side change an event reports
fn apply_to_guild(guild: &MemoryGuild, event: &GuildEvent) {
    match event {
        GuildEvent::MemberJoined(e) => guild.insert_member(&e.member),
        GuildEvent::RoleSetChanged(e) => {
            guild.observe_member(&e.member);
            if let Err(err) = guild.grant_roles(e.member.id, &e.roles_added) {
                warn!(error = %err, "Could not apply added roles");
            }
        }
        GuildEvent::MessageReceived(e) => {
            guild.observe_member(&e.author);
            guild.add_history(e.channel_id, 1);
        }
        GuildEvent::CommandInvoked(e) => guild.observe_member(&e.invoker),
    }
}

async fn write_record<W>(writer: &mut W, record: &ReplayRecord) -> AppResult<()>
where
    W: AsyncWrite + Unpin,
{
    let mut bytes = serde_json::to_vec(record).map_err(AppError::internal)?;
    bytes.push(b'\n');
    writer.write_all(&bytes).await.map_err(AppError::internal)
}
