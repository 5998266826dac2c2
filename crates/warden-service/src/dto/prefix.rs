//! Prefix command parsing
//!
//! `+kick <member> [reason]` style text commands are turned into the same
//! [`Command`] values slash invocations carry.

use warden_core::{Command, CommandName, DomainError, EmbedInput, Snowflake};

/// Parse a chat message into a command
///
/// Returns `Ok(None)` when the message does not start with `prefix` or names
/// no known command. Known commands with missing or malformed arguments fail
/// with `InvalidInput`.
pub fn parse_prefix_command(content: &str, prefix: &str) -> Result<Option<Command>, DomainError> {
    if prefix.is_empty() {
        return Ok(None);
    }
    let Some(body) = content.trim_start().strip_prefix(prefix) else {
        return Ok(None);
    };

    let (name, rest) = split_word(body);
    let Ok(name) = name.parse::<CommandName>() else {
        return Ok(None);
    };

    let command = match name {
        CommandName::Kick => {
            let (target, reason) = member_and_rest(rest)?;
            Command::Kick { target, reason }
        }
        CommandName::Ban => {
            let (target, reason) = member_and_rest(rest)?;
            Command::Ban { target, reason }
        }
        CommandName::Timeout => {
            let (target, rest) = member_and_rest(rest)?;
            let rest = rest.unwrap_or_default();
            let (duration, reason) = split_word(&rest);
            if duration.is_empty() {
                return Err(missing("duration"));
            }
            Command::Timeout {
                target,
                duration: duration.to_string(),
                reason: non_empty(reason),
            }
        }
        CommandName::Purge => {
            let (amount, _) = split_word(rest);
            if amount.is_empty() {
                return Err(missing("amount"));
            }
            let amount = amount.parse::<i64>().map_err(|_| {
                DomainError::InvalidInput(format!("'{amount}' is not a whole number"))
            })?;
            Command::Purge { amount }
        }
        CommandName::Lock => Command::Lock,
        CommandName::Unlock => Command::Unlock,
        CommandName::Say => Command::Say {
            message: non_empty(rest).ok_or_else(|| missing("message"))?,
        },
        CommandName::Embed => Command::Embed {
            input: EmbedInput::Delimited(non_empty(rest).ok_or_else(|| missing("title"))?),
        },
        CommandName::Help => Command::Help,
    };

    Ok(Some(command))
}

/// First whitespace-separated word and the untrimmed remainder
fn split_word(s: &str) -> (&str, &str) {
    let s = s.trim_start();
    s.split_once(char::is_whitespace).unwrap_or((s, ""))
}

fn member_and_rest(s: &str) -> Result<(Snowflake, Option<String>), DomainError> {
    let (token, rest) = split_word(s);
    if token.is_empty() {
        return Err(missing("member"));
    }
    let target = Snowflake::parse_mention(token)
        .map_err(|_| DomainError::InvalidInput(format!("'{token}' is not a member")))?;
    Ok((target, non_empty(rest)))
}

fn non_empty(s: &str) -> Option<String> {
    let s = s.trim();
    (!s.is_empty()).then(|| s.to_string())
}

fn missing(argument: &str) -> DomainError {
    DomainError::InvalidInput(format!("Missing required argument: {argument}"))
}
