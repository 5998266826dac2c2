//! Application configuration structs
//!
//! Loads configuration from environment variables (and a `.env` file if present).

use serde::Deserialize;
use std::collections::BTreeMap;
use std::env;
use std::str::FromStr;

use warden_core::{LeagueTag, RoleCatalog, Snowflake, StaffTier};

/// Main application configuration
#[derive(Debug, Clone)]
pub struct AppConfig {
    pub app: AppSettings,
    pub guild: GuildConfig,
    pub roles: RoleCatalog,
    pub policy: PolicyConfig,
    pub store: StoreConfig,
}

/// General application settings
#[derive(Debug, Clone, Deserialize)]
pub struct AppSettings {
    #[serde(default = "default_app_name")]
    pub name: String,
    #[serde(default = "default_env")]
    pub env: Environment,
}

/// Environment type
#[derive(Debug, Clone, Copy, PartialEq, Eq, Deserialize, Default)]
#[serde(rename_all = "lowercase")]
pub enum Environment {
    #[default]
    Development,
    Staging,
    Production,
}

impl Environment {
    #[must_use]
    pub fn is_production(&self) -> bool {
        matches!(self, Self::Production)
    }

    #[must_use]
    pub fn is_development(&self) -> bool {
        matches!(self, Self::Development)
    }
}

/// Guild wiring: which guild, where audits go, how prefix commands start
#[derive(Debug, Clone)]
pub struct GuildConfig {
    pub guild_id: Snowflake,
    pub audit_channel_id: Snowflake,
    pub command_prefix: String,
}

/// Thresholds for promotions
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PolicyConfig {
    pub trusted_message_threshold: u64,
    pub min_verification_age_days: i64,
}

impl Default for PolicyConfig {
    fn default() -> Self {
        Self {
            trusted_message_threshold: default_trusted_message_threshold(),
            min_verification_age_days: default_min_verification_age_days(),
        }
    }
}

/// Participation store location
#[derive(Debug, Clone)]
pub struct StoreConfig {
    pub message_count_file: String,
}

// Default value functions
fn default_app_name() -> String {
    "guild-warden".to_string()
}

fn default_env() -> Environment {
    Environment::Development
}

fn default_command_prefix() -> String {
    "+".to_string()
}

fn default_trusted_message_threshold() -> u64 {
    5000
}

fn default_min_verification_age_days() -> i64 {
    30
}

fn default_message_count_file() -> String {
    "message_counts.json".to_string()
}

impl AppConfig {
    /// Load configuration from environment variables
    ///
    /// # Errors
    /// Returns an error if required environment variables are missing
    pub fn from_env() -> Result<Self, ConfigError> {
        // Load .env file if present (ignore errors if not found)
        let _ = dotenvy::dotenv();

        Self::from_lookup(|key| env::var(key).ok())
    }

    /// Load configuration from an arbitrary key lookup
    pub fn from_lookup<F>(lookup: F) -> Result<Self, ConfigError>
    where
        F: Fn(&str) -> Option<String>,
    {
        let roles = RoleCatalog {
            unverified: required_id(&lookup, "UNVERIFIED_ROLE_ID")?,
            verified: required_id(&lookup, "VERIFIED_ROLE_ID")?,
            auto: required_id(&lookup, "AUTO_ROLE_ID")?,
            trusted: required_id(&lookup, "TRUSTED_ROLE_ID")?,
            staff: lookup("STAFF_ROLE_IDS")
                .map(|raw| parse_staff_roles(&raw))
                .transpose()?
                .unwrap_or_default(),
            leagues: lookup("LEAGUE_ROLE_IDS")
                .map(|raw| parse_league_roles(&raw))
                .transpose()?
                .unwrap_or_default(),
        };

        Ok(Self {
            app: AppSettings {
                name: lookup("APP_NAME").unwrap_or_else(default_app_name),
                env: lookup("APP_ENV")
                    .and_then(|s| match s.to_lowercase().as_str() {
                        "production" => Some(Environment::Production),
                        "staging" => Some(Environment::Staging),
                        "development" => Some(Environment::Development),
                        _ => None,
                    })
                    .unwrap_or_default(),
            },
            guild: GuildConfig {
                guild_id: required_id(&lookup, "GUILD_ID")?,
                audit_channel_id: required_id(&lookup, "AUDIT_CHANNEL_ID")?,
                command_prefix: lookup("COMMAND_PREFIX")
                    .filter(|s| !s.trim().is_empty())
                    .unwrap_or_else(default_command_prefix),
            },
            roles,
            policy: PolicyConfig {
                trusted_message_threshold: optional_parsed(&lookup, "TRUSTED_MESSAGE_THRESHOLD")?
                    .unwrap_or_else(default_trusted_message_threshold),
                min_verification_age_days: optional_parsed(&lookup, "MIN_VERIFICATION_AGE_DAYS")?
                    .unwrap_or_else(default_min_verification_age_days),
            },
            store: StoreConfig {
                message_count_file: lookup("MESSAGE_COUNT_FILE")
                    .unwrap_or_else(default_message_count_file),
            },
        })
    }
}

fn required_id<F>(lookup: &F, key: &'static str) -> Result<Snowflake, ConfigError>
where
    F: Fn(&str) -> Option<String>,
{
    let raw = lookup(key).ok_or(ConfigError::MissingVar(key))?;
    Snowflake::parse(raw.trim()).map_err(|_| ConfigError::InvalidValue(key, raw))
}

fn optional_parsed<F, T>(lookup: &F, key: &'static str) -> Result<Option<T>, ConfigError>
where
    F: Fn(&str) -> Option<String>,
    T: FromStr,
{
    lookup(key)
        .map(|raw| {
            raw.trim()
                .parse::<T>()
                .map_err(|_| ConfigError::InvalidValue(key, raw.clone()))
        })
        .transpose()
}

/// Parse `trial_mod=123,staff=456` into a role → tier map
fn parse_staff_roles(raw: &str) -> Result<BTreeMap<Snowflake, StaffTier>, ConfigError> {
    parse_pairs(raw, "STAFF_ROLE_IDS", |left, right| {
        let tier = left.parse::<StaffTier>().ok()?;
        let id = Snowflake::parse(right).ok()?;
        Some((id, tier))
    })
}

/// Parse `123=Ligue 1,456=PL` into a role → league tag map
fn parse_league_roles(raw: &str) -> Result<BTreeMap<Snowflake, LeagueTag>, ConfigError> {
    parse_pairs(raw, "LEAGUE_ROLE_IDS", |left, right| {
        let id = Snowflake::parse(left).ok()?;
        let tag = right.parse::<LeagueTag>().ok()?;
        Some((id, tag))
    })
}

fn parse_pairs<V, P>(
    raw: &str,
    key: &'static str,
    parse: P,
) -> Result<BTreeMap<Snowflake, V>, ConfigError>
where
    P: Fn(&str, &str) -> Option<(Snowflake, V)>,
{
    raw.split(',')
        .map(str::trim)
        .filter(|entry| !entry.is_empty())
        .map(|entry| {
            entry
                .split_once('=')
                .and_then(|(left, right)| parse(left.trim(), right.trim()))
                .ok_or_else(|| ConfigError::InvalidValue(key, entry.to_string()))
        })
        .collect()
}

/// Configuration errors
#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    #[error("Missing required environment variable: {0}")]
    MissingVar(&'static str),

    #[error("Invalid value for {0}: {1}")]
    InvalidValue(&'static str, String),
}
