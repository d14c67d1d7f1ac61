//! Role resolution: normalize an email and decide admin membership.

use tracing::debug;

use crate::roster::AdminRoster;

/// Normalize an email for roster lookups and uniqueness checks. Idempotent.
#[must_use]
pub fn normalize_email(email: &str) -> String {
    email.trim().to_lowercase()
}

/// Decides admin status from roster membership alone.
///
/// The resolver is consulted while the user is typing (to gate sign-up) and
/// immediately before the provider's sign-in call (to pre-seed the role
/// cache). The provider's own response is never used for role decisions.
#[derive(Clone, Debug, Default)]
pub struct RoleResolver {
    roster: AdminRoster,
}

impl RoleResolver {
    #[must_use]
    pub fn new(roster: AdminRoster) -> Self {
        Self { roster }
    }

    /// Admin/non-admin classification for an email. Pure, no side effects.
    #[must_use]
    pub fn resolve(&self, email: &str) -> bool {
        let normalized = normalize_email(email);
        let decision = self.roster.is_listed(&normalized);
        debug!(email = %normalized, decision, "resolved role");
        decision
    }

    #[must_use]
    pub fn roster(&self) -> &AdminRoster {
        &self.roster
    }
}
