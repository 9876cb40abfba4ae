// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! The in-memory stack: resources keyed by logical id, plus the image
//! assets and publish steps that travel with it.

use crate::assets::{ImageAsset, ImagePublish};
use crate::error::StackError;
use crate::template::{Output, Resource, Template, TEMPLATE_FORMAT_VERSION};
use ghr_core::{LogicalId, TagSet};
use indexmap::IndexMap;

/// Target account and region of a stack.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct StackEnv {
    pub account: String,
    pub region: String,
}

impl StackEnv {
    pub fn new(account: impl Into<String>, region: impl Into<String>) -> Self {
        Self { account: account.into(), region: region.into() }
    }
}

impl std::fmt::Display for StackEnv {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "aws://{}/{}", self.account, self.region)
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct Stack {
    name: String,
    env: StackEnv,
    description: String,
    tags: TagSet,
    resources: IndexMap<LogicalId, Resource>,
    outputs: IndexMap<String, Output>,
    images: Vec<ImageAsset>,
    publishes: Vec<ImagePublish>,
}

impl Stack {
    pub fn new(name: impl Into<String>, env: StackEnv, tags: TagSet) -> Self {
        let name = name.into();
        Self {
            description: format!("Self-hosted GitHub Actions runners ({name})"),
            name,
            env,
            tags,
            resources: IndexMap::new(),
            outputs: IndexMap::new(),
            images: Vec::new(),
            publishes: Vec::new(),
        }
    }

    /// Add a resource under the logical id derived from `construct_id`.
    ///
    /// Stack tags are merged into the resource's own tags when it accepts
    /// them.
    pub fn add(&mut self, construct_id: &str, mut resource: Resource) -> Result<LogicalId, StackError> {
        let id = LogicalId::from_construct_id(construct_id)?;
        if self.resources.contains_key(&id) {
            return Err(StackError::DuplicateLogicalId(id));
        }
        if let Some(tags) = resource.properties.tags_mut() {
            self.tags.apply_to(tags);
        }
        tracing::debug!(stack = %self.name, id = %id, kind = resource.resource_type, "declared resource");
        self.resources.insert(id.clone(), resource);
        Ok(id)
    }

    pub fn add_output(&mut self, name: impl Into<String>, output: Output) {
        self.outputs.insert(name.into(), output);
    }

    pub fn add_image(&mut self, asset: ImageAsset) -> Result<(), StackError> {
        let id = LogicalId::from_construct_id(&asset.construct_id)?;
        if self.images.iter().any(|a| a.construct_id == asset.construct_id) {
            return Err(StackError::DuplicateLogicalId(id));
        }
        tracing::debug!(stack = %self.name, id = %id, directory = %asset.directory.display(), "declared image asset");
        self.images.push(asset);
        Ok(())
    }

    pub fn add_publish(&mut self, publish: ImagePublish) -> Result<(), StackError> {
        let id = LogicalId::from_construct_id(&publish.construct_id)?;
        if self.publishes.iter().any(|p| p.construct_id == publish.construct_id) {
            return Err(StackError::DuplicateLogicalId(id));
        }
        tracing::debug!(stack = %self.name, id = %id, destination = %publish.destination(), "declared image publish");
        self.publishes.push(publish);
        Ok(())
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn env(&self) -> &StackEnv {
        &self.env
    }

    pub fn tags(&self) -> &TagSet {
        &self.tags
    }

    pub fn resource(&self, id: &str) -> Option<&Resource> {
        self.resources.get(id)
    }

    pub fn resources(&self) -> impl Iterator<Item = (&LogicalId, &Resource)> {
        self.resources.iter()
    }

    pub fn resources_of_type<'a>(
        &'a self,
        resource_type: &'a str,
    ) -> impl Iterator<Item = (&'a LogicalId, &'a Resource)> + 'a {
        self.resources.iter().filter(move |(_, r)| r.resource_type == resource_type)
    }

    pub fn resource_count(&self) -> usize {
        self.resources.len()
    }

    pub fn output(&self, name: &str) -> Option<&Output> {
        self.outputs.get(name)
    }

    pub fn images(&self) -> &[ImageAsset] {
        &self.images
    }

    pub fn publishes(&self) -> &[ImagePublish] {
        &self.publishes
    }

    pub fn image(&self, construct_id: &str) -> Option<&ImageAsset> {
        self.images.iter().find(|a| a.construct_id == construct_id)
    }

    pub fn template(&self) -> Template<'_> {
        Template {
            format_version: TEMPLATE_FORMAT_VERSION,
            description: &self.description,
            resources: &self.resources,
            outputs: &self.outputs,
        }
    }
}

#[cfg(test)]
#[path = "stack_tests.rs"]
mod tests;
