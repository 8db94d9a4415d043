use std::fmt::Display;

use compact_str::CompactString;
use nodejs_semver::Version;

use crate::error::Result;

const PATCHED_VERSIONS: [(&str, &str); 2] = [
    ("cross-spawn", "7.0.5"),
    ("glob", "10.5.0"),
];

#[derive(Debug, Clone, PartialEq)]
pub struct TargetPair {
    pub package: CompactString,
    pub version: Version,
}

impl Display for TargetPair {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}: {}", self.package, self.version)
    }
}

/// The fixed set of dependencies to pin, in the order they are applied.
#[derive(Debug, Clone)]
pub struct Targets {
    inner: Vec<TargetPair>,
}

impl Targets {
    pub fn patched_versions() -> Result<Self> {
        Self::from_pairs(&PATCHED_VERSIONS)
    }

    pub fn from_pairs(pairs: &[(&str, &str)]) -> Result<Self> {
        let mut inner = Vec::with_capacity(pairs.len());

        for (package, version) in pairs {
            inner.push(TargetPair {
                package: (*package).into(),
                version: Version::parse(version)?,
            });
        }

        Ok(Self { inner })
    }

    pub fn iter(&self) -> impl Iterator<Item = &TargetPair> {
        self.inner.iter()
    }

    pub fn len(&self) -> usize {
        self.inner.len()
    }
}

impl Display for Targets {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        for (i, pair) in self.inner.iter().enumerate() {
            if i > 0 {
                f.write_str(", ")?;
            }
            write!(f, "{pair}")?;
        }

        Ok(())
    }
}
