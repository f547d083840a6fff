//! The set of ISO 4217 currency codes accepted for conversion.

use super::error::{ExchangeError, Result};
use std::collections::BTreeSet;
use std::path::{Path, PathBuf};
use tracing::debug;

/// Immutable set of currency codes, loaded once from a tab-separated
/// reference list where the code is the second field of each record.
#[derive(Debug, Clone)]
pub struct CurrencyRegistry {
    codes: BTreeSet<String>,
}

impl CurrencyRegistry {
    pub fn load<P: AsRef<Path>>(path: P) -> Result<Self> {
        let path = path.as_ref();
        let content = std::fs::read_to_string(path).map_err(|source| ExchangeError::Io {
            path: path.to_path_buf(),
            source,
        })?;

        let registry = Self::parse_with_origin(&content, path)?;
        debug!(
            "Loaded {} currency codes from {}",
            registry.len(),
            path.display()
        );
        Ok(registry)
    }

    pub fn parse(content: &str) -> Result<Self> {
        Self::parse_with_origin(content, Path::new("<memory>"))
    }

    fn parse_with_origin(content: &str, origin: &Path) -> Result<Self> {
        let malformed = |message: String| ExchangeError::Registry {
            path: PathBuf::from(origin),
            message,
        };

        let mut codes = BTreeSet::new();
        for (index, line) in content.lines().enumerate() {
            if line.trim().is_empty() {
                continue;
            }

            let code = line
                .split('\t')
                .nth(1)
                .map(str::trim)
                .ok_or_else(|| malformed(format!("line {} has no code field", index + 1)))?;

            if !is_currency_code(code) {
                return Err(malformed(format!(
                    "line {} has invalid code '{}'",
                    index + 1,
                    code
                )));
            }
            codes.insert(code.to_string());
        }

        if codes.is_empty() {
            return Err(malformed("no currency codes found".to_string()));
        }

        Ok(Self { codes })
    }

    /// Expects an already upper-cased code.
    pub fn contains(&self, code: &str) -> bool {
        self.codes.contains(code)
    }

    /// Codes in ascending order.
    pub fn codes(&self) -> impl Iterator<Item = &str> {
        self.codes.iter().map(String::as_str)
    }

    pub fn sorted_codes(&self) -> Vec<&str> {
        self.codes().collect()
    }

    pub fn len(&self) -> usize {
        self.codes.len()
    }

    pub fn is_empty(&self) -> bool {
        self.codes.is_empty()
    }
}

fn is_currency_code(code: &str) -> bool {
    code.len() == 3 && code.bytes().all(|b| b.is_ascii_uppercase())
}
