//! Backend language tags accepted by the dispatcher

use std::fmt;
use std::str::FromStr;

use crate::error::Error;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Language {
    Python,
    Rust,
    Mojo,
}

impl Language {
    pub const ALL: [Language; 3] = [Language::Python, Language::Rust, Language::Mojo];

    pub fn as_str(&self) -> &'static str {
        match self {
            Language::Python => "python",
            Language::Rust => "rust",
            Language::Mojo => "mojo",
        }
    }

    /// Comma-separated list of every tag, for error messages
    pub fn valid_set() -> String {
        Self::ALL.iter().map(Language::as_str).collect::<Vec<_>>().join(", ")
    }
}

impl fmt::Display for Language {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for Language {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::ALL
            .into_iter()
            .find(|lang| lang.as_str() == s)
            .ok_or_else(|| Error::UnsupportedLanguage {
                given: s.to_string(),
                valid: Self::valid_set(),
            })
    }
}
