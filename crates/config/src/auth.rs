//! GitHub token resolution.
//!
//! Tokens are resolved with a fallback chain:
//!
//! 1. Token given explicitly in the repository options
//! 2. `GITHUB_TOKEN` environment variable
//! 3. `GH_TOKEN` environment variable
//! 4. Unauthenticated (returns `None`)

/// Environment variables consulted for a token, in priority order.
pub const TOKEN_ENV_VARS: &[&str] = &["GITHUB_TOKEN", "GH_TOKEN"];

/// Resolves the GitHub token for a repository.
///
/// `lookup` reads an environment variable; pass `|k| std::env::var(k).ok()`
/// for the process environment. Blank values are treated as unset.
///
/// # Examples
///
/// ```
/// use gitcms_config::auth::resolve_token;
///
/// let token = resolve_token(None, |key| (key == "GH_TOKEN").then(|| "ghp_env".to_string()));
/// assert_eq!(token.as_deref(), Some("ghp_env"));
///
/// let token = resolve_token(Some("ghp_explicit"), |_| Some("ghp_env".to_string()));
/// assert_eq!(token.as_deref(), Some("ghp_explicit"));
/// ```
pub fn resolve_token<F>(explicit: Option<&str>, lookup: F) -> Option<String>
where
    F: Fn(&str) -> Option<String>,
{
    if let Some(token) = explicit.map(str::trim).filter(|t| !t.is_empty()) {
        return Some(token.to_string());
    }

    TOKEN_ENV_VARS
        .iter()
        .filter_map(|key| lookup(key))
        .map(|token| token.trim().to_string())
        .find(|token| !token.is_empty())
}

#[cfg(test)]
mod tests {
    use super::*;

    fn env<'a>(vars: &'a [(&'a str, &'a str)]) -> impl Fn(&str) -> Option<String> + 'a {
        move |key| {
            vars.iter()
                .find(|(k, _)| *k == key)
                .map(|(_, v)| (*v).to_string())
        }
    }

    #[test]
    fn prefers_explicit_token() {
        let token = resolve_token(Some("explicit"), env(&[("GITHUB_TOKEN", "env")]));
        assert_eq!(token.as_deref(), Some("explicit"));
    }

    #[test]
    fn falls_back_to_github_token() {
        let token = resolve_token(None, env(&[("GITHUB_TOKEN", "a"), ("GH_TOKEN", "b")]));
        assert_eq!(token.as_deref(), Some("a"));
    }

    #[test]
    fn falls_back_to_gh_token() {
        let token = resolve_token(None, env(&[("GH_TOKEN", "b")]));
        assert_eq!(token.as_deref(), Some("b"));
    }

    #[test]
    fn blank_values_are_ignored() {
        let token = resolve_token(Some("  "), env(&[("GITHUB_TOKEN", ""), ("GH_TOKEN", "b")]));
        assert_eq!(token.as_deref(), Some("b"));
    }

    #[test]
    fn none_when_nothing_configured() {
        assert!(resolve_token(None, env(&[])).is_none());
    }
}
