// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! CLI command implementations

pub mod list;
pub mod synth;
pub mod validate;

use crate::env;
use crate::exit_error::{ExitError, CONFIG_ERROR};
use anyhow::Result;
use clap::Args;
use ghr_config::{Context, ContextLoader};
use std::path::PathBuf;

/// Where the context comes from: files, then `-c` pairs.
#[derive(Args, Debug, Clone, PartialEq)]
pub struct ContextArgs {
    /// Set a context value (repeatable), e.g. `-c config=prod`
    #[arg(short = 'c', long = "context", value_name = "KEY=VALUE")]
    pub pairs: Vec<String>,

    /// Project context file [default: first of ghr.json, ghr.toml, ghr.hcl, cdk.json]
    #[arg(long, value_name = "PATH")]
    pub context_file: Option<PathBuf>,

    /// Project directory; the container build path is resolved against it
    #[arg(long, value_name = "DIR", default_value = ".")]
    pub project: PathBuf,
}

impl ContextArgs {
    pub fn project_file(&self) -> PathBuf {
        match &self.context_file {
            Some(path) => path.clone(),
            None => env::project_context_path(&self.project),
        }
    }

    /// User defaults, then the project file, then `-c` pairs.
    ///
    /// A missing default project file is an empty layer; a missing
    /// `--context-file` is an error.
    pub fn load(&self) -> Result<Context> {
        if let Some(path) = &self.context_file {
            if !path.is_file() {
                let message = format!("context file {} not found", path.display());
                return Err(ExitError::new(CONFIG_ERROR, message).into());
            }
        }
        let project_file = self.project_file();
        tracing::debug!(
            project_file = %project_file.display(),
            pairs = self.pairs.len(),
            "loading context"
        );
        let mut loader =
            ContextLoader::new().project_file(project_file).pairs(self.pairs.iter().cloned());
        if let Some(user) = env::user_context_path() {
            loader = loader.user_file(user);
        }
        Ok(loader.load()?)
    }
}
