//! Pin-file reading and writing
//!
//! `deps.nix` is a generated attribute set recording the versions,
//! revisions, and content hashes the package expression consumes. Only the
//! recorded `edopro-version` matters on read, so reading is a line scan;
//! writing replaces the whole file.

use std::fs;
use std::io::ErrorKind;
use std::path::Path;

use crate::{Error, Result};

/// Marker scanned for when reading the recorded version
const VERSION_KEY: &str = "edopro-version";

/// Base version of the irrlicht fork, which publishes no releases
pub const IRRLICHT_BASE_VERSION: &str = "1.9.0-unstable";

/// The full set of values recorded in the pin file
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PinSet {
    pub assets_hash: String,
    pub edopro_version: String,
    pub edopro_rev: String,
    pub edopro_hash: String,
    pub irrlicht_version: String,
    pub irrlicht_rev: String,
    pub irrlicht_hash: String,
}

impl PinSet {
    /// Render the pin file contents.
    pub fn render(&self) -> String {
        format!(
            r#"# This is automatically generated by the update script.
# DO NOT MANUALLY EDIT.
{{
  assets-hash = "{}";
  edopro-version = "{}";
  edopro-rev = "{}";
  edopro-hash = "{}";
  irrlicht-version = "{}";
  irrlicht-rev = "{}";
  irrlicht-hash = "{}";
}}
"#,
            self.assets_hash,
            self.edopro_version,
            self.edopro_rev,
            self.edopro_hash,
            self.irrlicht_version,
            self.irrlicht_rev,
            self.irrlicht_hash,
        )
    }

    /// Overwrite the pin file, truncating any previous contents.
    pub fn write<P: AsRef<Path>>(&self, path: P) -> Result<()> {
        fs::write(path, self.render())?;
        Ok(())
    }
}

/// Read the recorded `edopro-version` from the pin file.
///
/// Scans line by line for the version key and extracts the first
/// double-quoted value on that line. A missing file and an unbound version
/// are distinct failures with their own exit codes.
pub fn read_recorded_version<P: AsRef<Path>>(path: P) -> Result<String> {
    let path = path.as_ref();
    let contents = match fs::read_to_string(path) {
        Ok(contents) => contents,
        Err(e) if e.kind() == ErrorKind::NotFound => {
            return Err(Error::PinFileMissing(path.to_path_buf()))
        }
        Err(e) => return Err(e.into()),
    };

    let mut version = String::new();
    for line in contents.lines() {
        if line.contains(VERSION_KEY) {
            if let Some(value) = line.split('"').nth(1) {
                version = value.to_string();
            }
        }
    }

    if version.is_empty() {
        return Err(Error::VersionUnbound);
    }

    Ok(version)
}

/// Derive the synthetic irrlicht version from a committer timestamp.
///
/// The fork has no upstream version scheme, so the version is the base
/// version plus the date portion of the pinned commit's committer date.
pub fn irrlicht_version(committer_date: &str) -> String {
    let date = committer_date.split('T').next().unwrap_or(committer_date);
    format!("{}-{}", IRRLICHT_BASE_VERSION, date)
}
