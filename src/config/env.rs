//! String-keyed process configuration.
//!
//! The gate and the payload handler read their flags from a plain
//! key/value mapping rather than from the TOML schema, so operators can
//! set them the same way on every deployment target.

use std::collections::BTreeMap;

/// Semicolon-delimited list of caller addresses allowed to post.
pub const IP_WHITELIST: &str = "IP_WHITELIST";

/// Override for the success response body.
pub const DEFAULT_RESPONSE: &str = "DEFAULT_RESPONSE";

/// Listener port override.
pub const PORT: &str = "PORT";

/// Immutable snapshot of string configuration values.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Environment {
    vars: BTreeMap<String, String>,
}

impl Environment {
    /// Snapshot the current process environment.
    ///
    /// Variables whose name or value is not valid unicode are skipped.
    pub fn from_process() -> Self {
        std::env::vars_os()
            .filter_map(|(k, v)| Some((k.into_string().ok()?, v.into_string().ok()?)))
            .collect()
    }

    pub fn get(&self, key: &str) -> Option<&str> {
        self.vars.get(key).map(String::as_str)
    }

    /// Value for `key` if present and not blank.
    pub fn get_non_blank(&self, key: &str) -> Option<&str> {
        self.get(key).filter(|v| !v.trim().is_empty())
    }
}

impl<K, V> FromIterator<(K, V)> for Environment
where
    K: Into<String>,
    V: Into<String>,
{
    fn from_iter<I: IntoIterator<Item = (K, V)>>(iter: I) -> Self {
        Self {
            vars: iter.into_iter().map(|(k, v)| (k.into(), v.into())).collect(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_lookup() {
        let env: Environment = [("test", "123"), (IP_WHITELIST, "  ")].into_iter().collect();

        assert_eq!(env.get("test"), Some("123"));
        assert_eq!(env.get("missing"), None);
        assert_eq!(env.get(IP_WHITELIST), Some("  "));
        assert_eq!(env.get_non_blank(IP_WHITELIST), None);
        assert_eq!(env.get_non_blank("test"), Some("123"));
    }
}
