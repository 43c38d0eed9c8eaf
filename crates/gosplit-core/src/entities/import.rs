use serde::{Deserialize, Serialize};

use super::Span;
use crate::ids::{DeclId, ImportId};

/// One `import` spec.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ImportSpec {
    pub id: ImportId,
    /// The import declaration holding this spec.
    pub decl: DeclId,
    pub alias: ImportAlias,
    /// Unquoted import path.
    pub path: String,
    /// Spec text as written, e.g. `yaml "gopkg.in/yaml.v3"`.
    pub text: String,
    pub span: Span,
    /// Zero-based line of the spec.
    pub line: usize,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "kind", content = "name", rename_all = "snake_case")]
pub enum ImportAlias {
    None,
    Named(String),
    Dot,
    Blank,
}

impl ImportSpec {
    /// Names under which the package may be referenced.
    ///
    /// An explicit alias is the only candidate. Otherwise the last path
    /// segment is used, plus the usual spellings of versioned paths:
    /// `example.com/lib/v2` also answers to `lib`, `gopkg.in/yaml.v3` to
    /// `yaml`, and `github.com/x/go-redis` to `redis`.
    #[must_use]
    pub fn local_names(&self) -> Vec<String> {
        match &self.alias {
            ImportAlias::Named(name) => return vec![name.clone()],
            ImportAlias::Dot | ImportAlias::Blank => return Vec::new(),
            ImportAlias::None => {}
        }

        let mut segments = self.path.rsplit('/');
        let Some(last) = segments.next() else {
            return Vec::new();
        };
        let mut names = vec![last.to_string()];

        if is_major_version(last)
            && let Some(prev) = segments.next()
        {
            names.push(prev.to_string());
        }
        if let Some((stem, version)) = last.rsplit_once('.')
            && is_major_version(version)
        {
            names.push(stem.to_string());
        }
        for name in names.clone() {
            if let Some(rest) = name.strip_prefix("go-") {
                names.push(rest.to_string());
            }
        }
        names.retain(|n| !n.is_empty());
        names.dedup();
        names
    }

    #[must_use]
    pub const fn is_blank(&self) -> bool {
        matches!(self.alias, ImportAlias::Blank)
    }

    #[must_use]
    pub const fn is_dot(&self) -> bool {
        matches!(self.alias, ImportAlias::Dot)
    }
}

fn is_major_version(segment: &str) -> bool {
    segment
        .strip_prefix('v')
        .is_some_and(|n| !n.is_empty() && n.bytes().all(|b| b.is_ascii_digit()))
}
