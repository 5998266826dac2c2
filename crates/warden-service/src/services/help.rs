//! Help text

use warden_common::PolicyConfig;

/// Render the command and rules overview for `prefix`
pub fn help_text(prefix: &str, policy: &PolicyConfig) -> String {
    let min_age = policy.min_verification_age_days;
    let threshold = policy.trusted_message_threshold;

    format!(
        "**Moderation Commands**\n\
         {prefix}kick <member> [reason]\n\
         {prefix}ban <member> [reason]\n\
         {prefix}timeout <member> <duration> [reason]\n\
         {prefix}purge <amount>\n\
         {prefix}lock\n\
         {prefix}unlock\n\
         \n\
         **Utility Commands**\n\
         {prefix}say <message>\n\
         {prefix}embed <title> | <description>\n\
         {prefix}help\n\
         \n\
         **Roles & Verification**\n\
         • Verified Role: accounts at least {min_age} days old when they choose a club/league.\n\
         • Unverified Role: removed once verified.\n\
         • Auto Roles: everyone gets the season role on join.\n\
         • Club/League Roles: nickname becomes Name | Club/League.\n\
         • Trusted Role: granted after {threshold} messages.\n\
         • Account Age Check: under {min_age} days = stays unverified.\n\
         \n\
         **Logging**\n\
         • Moderation actions (kick, ban, timeout, purge, lock/unlock) are logged.\n\
         • Auto-verification, nickname changes and role grants are logged too."
    )
}
