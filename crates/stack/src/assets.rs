// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! Container image assets and the steps that publish them.
//!
//! Assets are described, never built here: the synthesized asset manifest
//! tells external tooling what to build and where to push it.

use crate::error::SynthError;
use crate::resources::ecr::RepositoryRef;
use indexmap::IndexMap;
use sha2::{Digest, Sha256};
use std::fs;
use std::path::{Path, PathBuf};

pub const BUILD_DATE_ARG: &str = "BUILD_DATE";
pub const LINUX_AMD64: &str = "linux/amd64";

/// An image built from a local directory.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ImageAsset {
    pub construct_id: String,
    pub directory: PathBuf,
    pub platform: &'static str,
    pub build_args: IndexMap<String, String>,
}

impl ImageAsset {
    pub fn new(construct_id: impl Into<String>, directory: impl Into<PathBuf>) -> Self {
        Self {
            construct_id: construct_id.into(),
            directory: directory.into(),
            platform: LINUX_AMD64,
            build_args: IndexMap::new(),
        }
    }

    pub fn build_arg(mut self, key: impl Into<String>, value: impl Into<String>) -> Self {
        self.build_args.insert(key.into(), value.into());
        self
    }

    /// Content hash of the build directory, platform and build args.
    ///
    /// Files are visited in sorted path order so the hash only changes when
    /// the inputs do.
    pub fn fingerprint(&self) -> Result<String, SynthError> {
        let mut files = Vec::new();
        collect_files(&self.directory, &self.directory, &mut files)?;
        files.sort();

        let mut hasher = Sha256::new();
        for relative in &files {
            let path = self.directory.join(relative);
            let contents = fs::read(&path)
                .map_err(|source| SynthError::BuildContext { path: path.clone(), source })?;
            hasher.update(relative.as_bytes());
            hasher.update([0u8]);
            hasher.update(&contents);
            hasher.update([0u8]);
        }
        hasher.update(self.platform.as_bytes());
        for (key, value) in &self.build_args {
            hasher.update([0u8]);
            hasher.update(key.as_bytes());
            hasher.update(b"=");
            hasher.update(value.as_bytes());
        }
        Ok(format!("{:x}", hasher.finalize()))
    }
}

/// Copy of a built image into a repository under a fixed tag.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ImagePublish {
    pub construct_id: String,
    /// Construct id of the [`ImageAsset`] being published.
    pub asset: String,
    pub repository: RepositoryRef,
    pub tag: String,
}

impl ImagePublish {
    /// `<repository uri>:<tag>`
    pub fn destination(&self) -> String {
        format!("{}:{}", self.repository.uri, self.tag)
    }
}

/// Relative, `/`-separated paths of every regular file under `dir`.
fn collect_files(root: &Path, dir: &Path, out: &mut Vec<String>) -> Result<(), SynthError> {
    let entries =
        fs::read_dir(dir).map_err(|source| SynthError::BuildContext { path: dir.to_path_buf(), source })?;
    for entry in entries {
        let entry =
            entry.map_err(|source| SynthError::BuildContext { path: dir.to_path_buf(), source })?;
        let path = entry.path();
        let file_type = entry
            .file_type()
            .map_err(|source| SynthError::BuildContext { path: path.clone(), source })?;
        if file_type.is_dir() {
            collect_files(root, &path, out)?;
        } else if file_type.is_file() {
            if let Ok(relative) = path.strip_prefix(root) {
                let parts: Vec<String> =
                    relative.components().map(|c| c.as_os_str().to_string_lossy().into_owned()).collect();
                out.push(parts.join("/"));
            }
        }
    }
    Ok(())
}

#[cfg(test)]
#[path = "assets_tests.rs"]
mod tests;
