//! Test fixtures and data generators
//!
//! Role ids follow the production layout so scenarios read like real guild
//! traffic.

use std::sync::atomic::{AtomicI64, Ordering};

use chrono::{DateTime, TimeDelta, TimeZone, Utc};

use warden_core::{LeagueTag, Member, RoleCatalog, Snowflake, StaffTier};

pub const UNVERIFIED_ROLE: Snowflake = Snowflake::new(816_809_420_222_234_624);
pub const VERIFIED_ROLE: Snowflake = Snowflake::new(801_939_332_004_839_424);
pub const AUTO_ROLE: Snowflake = Snowflake::new(1_405_803_005_235_953_704);
pub const TRUSTED_ROLE: Snowflake = Snowflake::new(811_019_152_533_356_574);
pub const AUDIT_CHANNEL: Snowflake = Snowflake::new(1_414_135_252_380_553_357);
pub const GENERAL_CHANNEL: Snowflake = Snowflake::new(1_400_000_000_000_000_001);

pub const TRIAL_MOD_ROLE: Snowflake = Snowflake::new(1_413_202_670_033_965_097);
pub const STAFF_ROLE: Snowflake = Snowflake::new(802_672_046_659_993_670);
pub const MANAGER_ROLE: Snowflake = Snowflake::new(802_671_985_796_710_460);
pub const CHAIR_ROLE: Snowflake = Snowflake::new(802_671_745_332_412_456);
pub const FOUNDER_ROLE: Snowflake = Snowflake::new(1_402_031_729_820_172_400);

pub const LIGUE1_ROLE: Snowflake = Snowflake::new(1_414_131_263_987_646_464);
pub const SERIE_A_ROLE: Snowflake = Snowflake::new(1_414_131_190_335_803_463);
pub const LA_LIGA_ROLE: Snowflake = Snowflake::new(1_414_131_059_397_890_110);
pub const PL_ROLE: Snowflake = Snowflake::new(1_414_130_805_621_522_472);
pub const NEUTRAL_ROLE: Snowflake = Snowflake::new(805_526_606_004_486_144);
pub const OTHER_CLUB_ROLE: Snowflake = Snowflake::new(804_336_116_760_707_072);

/// Counter for unique member ids
static COUNTER: AtomicI64 = AtomicI64::new(1);

/// Get a unique member id
pub fn unique_id() -> Snowflake {
    Snowflake::new(900_000_000_000_000_000 + COUNTER.fetch_add(1, Ordering::SeqCst))
}

/// "Now" for every scenario
pub fn test_now() -> DateTime<Utc> {
    Utc.with_ymd_and_hms(2025, 9, 12, 18, 30, 0)
        .single()
        .expect("valid timestamp")
}

/// Catalog with every staff tier the scenarios use and six league roles
pub fn catalog() -> RoleCatalog {
    RoleCatalog::new(UNVERIFIED_ROLE, VERIFIED_ROLE, AUTO_ROLE, TRUSTED_ROLE)
        .with_staff(TRIAL_MOD_ROLE, StaffTier::TrialModerator)
        .with_staff(STAFF_ROLE, StaffTier::Staff)
        .with_staff(MANAGER_ROLE, StaffTier::Manager)
        .with_staff(CHAIR_ROLE, StaffTier::Chair)
        .with_staff(FOUNDER_ROLE, StaffTier::Founder)
        .with_league(LIGUE1_ROLE, LeagueTag::Ligue1)
        .with_league(SERIE_A_ROLE, LeagueTag::SerieA)
        .with_league(LA_LIGA_ROLE, LeagueTag::LaLiga)
        .with_league(PL_ROLE, LeagueTag::PremierLeague)
        .with_league(NEUTRAL_ROLE, LeagueTag::Neutral)
        .with_league(OTHER_CLUB_ROLE, LeagueTag::OtherClub)
}

/// A member whose account is `age` old at [`test_now`]
pub fn member_aged(username: &str, age: TimeDelta) -> Member {
    Member::new(unique_id(), username).created(test_now() - age)
}

/// A member whose account is `days` days old at [`test_now`]
pub fn member_aged_days(username: &str, days: i64) -> Member {
    member_aged(username, TimeDelta::days(days))
}

/// A long-standing member holding `roles`
pub fn staff_member(username: &str, roles: &[Snowflake]) -> Member {
    member_aged_days(username, 400).with_roles(roles.iter().copied())
}
