//! Repository types returned by the listing endpoint.

use serde::{Deserialize, Serialize};
use std::fmt;

/// Anything ordered by a numeric catalog identifier.
///
/// Pages coming back from the listing endpoint are ascending by this id,
/// which is what lets the range trimmer binary-search them.
pub trait Identified {
    /// The catalog identifier.
    fn id(&self) -> u64;
}

impl Identified for u64 {
    fn id(&self) -> u64 {
        *self
    }
}

/// Owner of a repository.
#[derive(Debug, Clone, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct RepositoryOwner {
    /// Account login.
    #[serde(default)]
    pub login: String,
}

/// A public repository as listed by `GET /repositories`.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Repository {
    /// Globally unique, gapful, ascending id.
    pub id: u64,
    /// Repository owner.
    #[serde(default)]
    pub owner: RepositoryOwner,
    /// Repository name.
    #[serde(default)]
    pub name: String,
}

impl Repository {
    /// Creates a repository record.
    pub fn new(id: u64, owner: impl Into<String>, name: impl Into<String>) -> Self {
        Self {
            id,
            owner: RepositoryOwner {
                login: owner.into(),
            },
            name: name.into(),
        }
    }

    /// Owner login.
    pub fn owner_login(&self) -> &str {
        &self.owner.login
    }

    /// `owner/name` slug used in API paths.
    pub fn full_name(&self) -> String {
        format!("{}/{}", self.owner.login, self.name)
    }
}

impl Identified for Repository {
    fn id(&self) -> u64 {
        self.id
    }
}

impl fmt::Display for Repository {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}/{} (#{})", self.owner.login, self.name, self.id)
    }
}
