//! edopro-update: dependency pin updater for the EDOPro package
//!
//! This crate provides tools for:
//! - Querying GitHub for the latest EDOPro release tag and the pinned
//!   irrlicht commit
//! - Prefetching content hashes through the nix tooling
//! - Rewriting the generated `deps.nix` pin file

pub mod deps;
pub mod error;
pub mod github;
pub mod prefetch;
pub mod update;

pub use deps::PinSet;
pub use error::{Error, Result};
pub use github::GitHubClient;
pub use update::{Outcome, Updater};
