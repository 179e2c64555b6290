//! Update orchestration
//!
//! A single sequential pass: check the recorded version against the latest
//! release tag, and when it is stale recompute every pinned hash and
//! rewrite the pin file. Failures before the final write leave the old
//! file intact.

use std::path::PathBuf;

use tracing::{debug, info};

use crate::deps::{self, PinSet};
use crate::github::GitHubClient;
use crate::prefetch;
use crate::Result;

pub const EDOPRO_OWNER: &str = "edo9300";
pub const EDOPRO_REPO: &str = "edopro";

/// Fork of irrlicht that EDOPro builds against. Upstream publishes no
/// releases, so it is pinned to a fixed revision.
pub const IRRLICHT_REPO: &str = "irrlicht1-8-4";
pub const IRRLICHT_PINNED_REV: &str = "7edde28d4f8c0c3589934c398a3a441286bb7c22";

/// Default location of the generated pin file
pub const DEFAULT_DEPS_PATH: &str = "pkgs/by-name/ed/edopro/deps.nix";

/// Result of an update pass
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Outcome {
    /// Recorded version already matches the latest release
    UpToDate,
    /// Pin file rewritten for a new release
    Updated { version: String },
}

pub struct Updater {
    github: GitHubClient,
    deps_path: PathBuf,
}

impl Updater {
    pub fn new(github: GitHubClient, deps_path: PathBuf) -> Self {
        Self { github, deps_path }
    }

    /// Prebuilt release-asset archive URL for a tag.
    fn asset_url(tag: &str) -> String {
        format!(
            "https://github.com/ProjectIgnis/edopro-assets/releases/download/{}/ProjectIgnis-EDOPro-{}-linux.tar.gz",
            tag, tag
        )
    }

    /// Run one update pass.
    pub async fn run(&self) -> Result<Outcome> {
        let edopro = self.github.latest_tag(EDOPRO_OWNER, EDOPRO_REPO).await?;
        debug!("Latest tag: {} ({})", edopro.name, edopro.commit.sha);

        let irrlicht = self
            .github
            .get_commit(EDOPRO_OWNER, IRRLICHT_REPO, IRRLICHT_PINNED_REV)
            .await?;
        debug!("Pinned irrlicht commit: {}", irrlicht.sha);

        let recorded = deps::read_recorded_version(&self.deps_path)?;

        if recorded == edopro.name {
            info!("Version is updated");
            return Ok(Outcome::UpToDate);
        }

        info!("Updating {} -> {}", recorded, edopro.name);
        prefetch::ensure_tools()?;

        let edopro_hash =
            prefetch::prefetch_github(EDOPRO_OWNER, EDOPRO_REPO, &edopro.commit.sha, false).await?;
        let irrlicht_hash =
            prefetch::prefetch_github(EDOPRO_OWNER, IRRLICHT_REPO, &irrlicht.sha, true).await?;

        let asset_legacy_hash =
            prefetch::prefetch_url_unpacked(&Self::asset_url(&edopro.name)).await?;
        let assets_hash = prefetch::to_sri("sha256", &asset_legacy_hash).await?;

        let pins = PinSet {
            assets_hash,
            edopro_version: edopro.name.clone(),
            edopro_rev: edopro.commit.sha,
            edopro_hash,
            irrlicht_version: deps::irrlicht_version(&irrlicht.commit.committer.date),
            irrlicht_rev: irrlicht.sha,
            irrlicht_hash,
        };
        pins.write(&self.deps_path)?;

        info!("Wrote {}", self.deps_path.display());
        Ok(Outcome::Updated {
            version: edopro.name,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_asset_url() {
        assert_eq!(
            Updater::asset_url("v40.1.4"),
            "https://github.com/ProjectIgnis/edopro-assets/releases/download/v40.1.4/ProjectIgnis-EDOPro-v40.1.4-linux.tar.gz"
        );
    }
}
