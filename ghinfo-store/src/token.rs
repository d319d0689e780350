//! API token resolution.

use tracing::debug;

/// Environment variables checked for a token, in order.
pub const TOKEN_ENV_VARS: [&str; 2] = ["GH_TOKEN", "GITHUB_TOKEN"];

/// Returns the first non-empty token from the process environment.
pub fn token_from_env() -> Option<String> {
    resolve_token(|name| std::env::var(name).ok())
}

/// Returns the first non-empty value of [`TOKEN_ENV_VARS`] under `lookup`.
pub fn resolve_token(lookup: impl Fn(&str) -> Option<String>) -> Option<String> {
    TOKEN_ENV_VARS.iter().find_map(|&name| {
        let value = lookup(name)?;
        let value = value.trim();
        if value.is_empty() {
            return None;
        }
        debug!(source = name, "Using API token");
        Some(value.to_string())
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashMap;

    fn env(pairs: &[(&str, &str)]) -> impl Fn(&str) -> Option<String> {
        let map: HashMap<String, String> = pairs
            .iter()
            .map(|(k, v)| ((*k).to_string(), (*v).to_string()))
            .collect();
        move |name| map.get(name).cloned()
    }

    #[test]
    fn test_gh_token_wins() {
        let lookup = env(&[("GH_TOKEN", "a"), ("GITHUB_TOKEN", "b")]);
        assert_eq!(resolve_token(lookup).as_deref(), Some("a"));
    }

    #[test]
    fn test_falls_back_to_github_token() {
        assert_eq!(
            resolve_token(env(&[("GITHUB_TOKEN", "b")])).as_deref(),
            Some("b")
        );
        assert_eq!(
            resolve_token(env(&[("GH_TOKEN", "  "), ("GITHUB_TOKEN", "b")])).as_deref(),
            Some("b")
        );
    }

    #[test]
    fn test_no_token() {
        assert_eq!(resolve_token(env(&[])), None);
    }
}
