//! GitHub REST endpoint URLs.

use ghinfo_core::Repository;
use url::Url;

use crate::error::HttpError;

/// Builds request URLs below one API base.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Endpoints {
    base: Url,
}

impl Endpoints {
    /// Parses `base`, e.g. `https://api.github.com`.
    pub fn new(base: &str) -> Result<Self, HttpError> {
        let base = Url::parse(base).map_err(|e| HttpError::InvalidUrl(e.to_string()))?;
        Ok(Self::from_url(base))
    }

    /// Uses an already parsed base.
    pub fn from_url(base: Url) -> Self {
        Self { base }
    }

    /// Host of the API base, used for the client allowlist.
    pub fn host(&self) -> Option<&str> {
        self.base.host_str()
    }

    /// `GET /repositories?since={since}`.
    pub fn repositories(&self, since: u64) -> String {
        let mut url = self.join(&["repositories"]);
        url.query_pairs_mut().append_pair("since", &since.to_string());
        url.into()
    }

    /// `GET /repos/{owner}/{name}`.
    pub fn repository(&self, repo: &Repository) -> String {
        self.join(&["repos", repo.owner_login(), &repo.name]).into()
    }

    /// `GET /repos/{owner}/{name}/license`.
    pub fn license(&self, repo: &Repository) -> String {
        self.join(&["repos", repo.owner_login(), &repo.name, "license"])
            .into()
    }

    fn join(&self, segments: &[&str]) -> Url {
        let mut url = self.base.clone();
        url.set_query(None);
        if let Ok(mut path) = url.path_segments_mut() {
            path.pop_if_empty().extend(segments);
        }
        url
    }
}
