use std::{fmt::Display, fs, path::{Path, PathBuf}};

use serde_json::{Map, Value};

use crate::error::{ErrorKind, PatchError, Result};

/// Where the framework package lands relative to the project root after install.
const MANIFEST_LOCATION: [&str; 3] = ["node_modules", "next", "package.json"];

pub fn manifest_path<P: AsRef<Path>>(project_root: P) -> PathBuf {
    MANIFEST_LOCATION.iter()
        .fold(project_root.as_ref().to_path_buf(), |path, part| path.join(part))
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Section {
    Dependencies,
    DevDependencies,
}

impl Section {
    pub const ALL: [Section; 2] = [Section::Dependencies, Section::DevDependencies];

    pub fn key(&self) -> &'static str {
        match self {
            Section::Dependencies => "dependencies",
            Section::DevDependencies => "devDependencies",
        }
    }
}

impl Display for Section {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.key())
    }
}

/// An installed `package.json`. Everything besides the dependency sections is
/// carried through untouched, in the order it was read.
#[derive(Debug)]
pub struct Manifest {
    root: Map<String, Value>,
}

impl Manifest {
    pub fn load(path: &Path) -> std::result::Result<Self, PatchError> {
        let data = fs::read_to_string(path)
            .map_err(|e| PatchError::ReadingManifest(path.to_path_buf(), e.into()))?;

        Self::parse(&data)
            .map_err(|e| PatchError::ParsingManifest(path.to_path_buf(), e))
    }

    pub fn parse(data: &str) -> Result<Self> {
        match serde_json::from_str(data)? {
            Value::Object(root) => Ok(Self { root }),
            _ => Err(ErrorKind::NotAnObject),
        }
    }

    pub fn package(&self) -> Option<(&str, &str)> {
        let name = self.root.get("name")?.as_str()?;
        let version = self.root.get("version")?.as_str()?;

        Some((name, version))
    }

    /// The section if present and an object. Anything else is treated as absent.
    pub fn section_mut(&mut self, section: Section) -> Option<&mut Map<String, Value>> {
        self.root.get_mut(section.key())
            .and_then(Value::as_object_mut)
    }

    pub fn to_json(&self) -> Result<String> {
        Ok(serde_json::to_string_pretty(&self.root)?)
    }

    pub fn write(&self, path: &Path) -> Result<()> {
        let data = self.to_json()?;

        fs::write(path, data)?;

        Ok(())
    }
}
