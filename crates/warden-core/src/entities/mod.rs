//! Domain entities - core business objects

mod league_tag;
mod member;
mod role_catalog;
mod staff_tier;

pub use league_tag::LeagueTag;
pub use member::Member;
pub use role_catalog::{RoleCatalog, RoleTag};
pub use staff_tier::StaffTier;
