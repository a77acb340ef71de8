//! `%NAME%` variable substitution
//!
//! INF scheme text references paths through `%VAR%` tokens. Resolution
//! checks the config's own `[Strings]` table first (case-insensitive),
//! then the process environment, and otherwise leaves the token literal.
//! The INF directory id `%10%` is shorthand for the Windows directory and
//! is rewritten to `%SYSTEMROOT%` before lookup.

use regex::{Captures, Regex};
use std::collections::HashMap;
use std::sync::LazyLock;

static VAR_PATTERN: LazyLock<Regex> = LazyLock::new(|| Regex::new(r"%([^%]+)%").unwrap());

/// Resolve every `%VAR%` token against `vars` (lowercased keys), falling
/// back to the environment, leaving unknown tokens untouched.
pub fn resolve(text: &str, vars: &HashMap<String, String>) -> String {
    let text = text.replace("%10%", "%SYSTEMROOT%");
    VAR_PATTERN
        .replace_all(&text, |caps: &Captures| {
            let raw = &caps[1];
            let key = raw.trim().to_lowercase();
            vars.get(&key)
                .cloned()
                .or_else(|| std::env::var(raw).ok())
                .unwrap_or_else(|| caps[0].to_string())
        })
        .into_owned()
}

/// Resolve `%VAR%` tokens against the process environment only
pub fn resolve_env(text: &str) -> String {
    resolve(text, &HashMap::new())
}

/// Strip every single and double quote, then surrounding whitespace.
/// INF values quote freely; paths never legally contain quotes.
pub fn unquote(text: &str) -> String {
    text.replace(['"', '\''], "").trim().to_string()
}

/// Final component of a path token, treating both `\` and `/` as
/// separators. INF text carries Windows separators even when this code
/// runs on a Unix host, so `Path::file_name` cannot be used on tokens.
pub fn file_name(token: &str) -> Option<&str> {
    token.rsplit(['\\', '/']).next().filter(|s| !s.is_empty())
}
