//! Fixed allow-list of privileged email identities.
//!
//! The roster is immutable for the process lifetime. Membership is the only
//! input to role decisions; account flags reported by the identity provider
//! never feed into it.

/// Email addresses recognized as admin accounts by default.
const DEFAULT_ADMIN_EMAILS: &[&str] = &[
    "pamacomkb@gmail.com",
    "yarimaind@gmail.com",
    "pamacospares@gmail.com",
    "fortunemillstores@gmail.com",
];

#[derive(Clone, Debug)]
pub struct AdminRoster {
    entries: Vec<String>,
}

impl AdminRoster {
    /// Build a roster from explicit entries.
    ///
    /// Entries are trimmed and lowercased once here so that lookups stay a
    /// straight comparison.
    #[must_use]
    pub fn new<I, S>(entries: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        let entries = entries
            .into_iter()
            .map(|entry| entry.as_ref().trim().to_lowercase())
            .filter(|entry| !entry.is_empty())
            .collect();
        Self { entries }
    }

    /// Membership check: case-insensitive, whitespace-trimmed, total over all
    /// strings. Empty input is never listed.
    #[must_use]
    pub fn is_listed(&self, email: &str) -> bool {
        let normalized = email.trim().to_lowercase();
        if normalized.is_empty() {
            return false;
        }
        self.entries.iter().any(|entry| *entry == normalized)
    }

    /// Number of roster entries.
    #[must_use]
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}

impl Default for AdminRoster {
    fn default() -> Self {
        Self::new(DEFAULT_ADMIN_EMAILS.iter().copied())
    }
}
