use serde::{Deserialize, Serialize};
use std::fmt;

/// Identity of the caller on whose behalf the broker acts
///
/// Decoded from the originating identity header. The coordinator treats it
/// as opaque and only hands it to the access reviewer.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Principal {
    pub username: String,

    #[serde(default)]
    pub uid: Option<String>,

    #[serde(default)]
    pub groups: Vec<String>,
}

impl Principal {
    pub fn new(username: impl Into<String>) -> Self {
        Self {
            username: username.into(),
            uid: None,
            groups: Vec::new(),
        }
    }

    pub fn with_groups(mut self, groups: &[&str]) -> Self {
        self.groups = groups.iter().map(|g| g.to_string()).collect();
        self
    }

    /// Grant subjects this principal matches, user first
    pub fn subjects(&self) -> Vec<String> {
        std::iter::once(format!("user:{}", self.username))
            .chain(self.groups.iter().map(|g| format!("group:{}", g)))
            .collect()
    }
}

impl fmt::Display for Principal {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.username)
    }
}
