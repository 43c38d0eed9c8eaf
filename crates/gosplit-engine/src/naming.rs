//! Declaration name to file stem conversion.
//!
//! `HTTPServer` becomes `http_server`, `GetHTTPSURL` becomes `get_https_url`.
//! Known abbreviations are kept together as one word; everything else is
//! split at case boundaries.

use gosplit_config::NamingConfig;

/// Converts Go identifiers to snake-case file stems.
#[derive(Debug, Clone, Copy)]
pub struct Namer<'a> {
    config: &'a NamingConfig,
}

impl<'a> Namer<'a> {
    #[must_use]
    pub const fn new(config: &'a NamingConfig) -> Self {
        Self { config }
    }

    /// Stem for a function or type name. An empty name yields `func`.
    #[must_use]
    pub fn function_stem(&self, name: &str) -> String {
        if let Some(whole) = self.whole_abbreviation(name) {
            return whole;
        }
        let snake = self.snake(name);
        if snake.is_empty() {
            return "func".to_string();
        }
        snake.trim_start_matches('_').to_string()
    }

    /// Stem for a test function: the prefix and leading underscores are
    /// dropped first. `TestServer_Start` becomes `server_start`.
    #[must_use]
    pub fn test_stem(&self, name: &str) -> String {
        let Some(rest) = name.strip_prefix(self.config.test_prefix.as_str()) else {
            return name.to_lowercase();
        };
        let rest = rest.trim_start_matches('_');
        if rest.is_empty() {
            return "test".to_string();
        }
        if let Some(whole) = self.whole_abbreviation(rest) {
            return whole;
        }
        let snake = self.snake(rest);
        if snake.is_empty() { "test".to_string() } else { snake }
    }

    /// `<receiver>_<method>`, each side converted on its own.
    #[must_use]
    pub fn method_stem(&self, receiver: &str, method: &str) -> String {
        format!("{}_{}", self.function_stem(receiver), self.function_stem(method))
    }

    fn whole_abbreviation(&self, name: &str) -> Option<String> {
        let upper = name.to_uppercase();
        self.config
            .abbreviations
            .iter()
            .any(|abbr| *abbr == upper)
            .then(|| name.to_lowercase())
    }

    fn snake(&self, name: &str) -> String {
        let chars: Vec<char> = name.chars().collect();
        let mut out = String::with_capacity(name.len() * 2);
        let mut i = 0;
        while i < chars.len() {
            if let Some(len) = self.abbreviation_at(&chars, i) {
                if i > 0 && !out.is_empty() && !out.ends_with('_') {
                    out.push('_');
                }
                out.extend(chars[i..i + len].iter().flat_map(|c| c.to_lowercase()));
                i += len;
                continue;
            }
            if needs_underscore(&chars, i, &out) {
                out.push('_');
            }
            out.extend(chars[i].to_lowercase());
            i += 1;
        }
        out
    }

    /// Length in chars of the first configured abbreviation starting at `i`
    /// and ending at a word boundary (end of name or an uppercase letter).
    fn abbreviation_at(&self, chars: &[char], i: usize) -> Option<usize> {
        self.config.abbreviations.iter().find_map(|abbr| {
            let len = abbr.chars().count();
            let end = i + len;
            if end > chars.len() {
                return None;
            }
            let candidate: String = chars[i..end].iter().collect();
            if candidate.to_uppercase() != *abbr {
                return None;
            }
            let at_boundary = chars.get(end).is_none_or(|c| c.is_uppercase());
            at_boundary.then_some(len)
        })
    }
}

/// An uppercase letter starts a new word when it follows a lowercase letter
/// or precedes one.
fn needs_underscore(chars: &[char], i: usize, out: &str) -> bool {
    if i == 0 || !chars[i].is_uppercase() {
        return false;
    }
    if out.is_empty() || out.ends_with('_') {
        return false;
    }
    chars.get(i + 1).is_some_and(|c| c.is_lowercase()) || chars[i - 1].is_lowercase()
}
