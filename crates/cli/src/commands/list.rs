// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! `ghr list`: environments defined in the context.

use anyhow::Result;
use clap::Args;
use ghr_config::{environments, selected_environment, Context};
use serde::Serialize;
use serde_json::Value;
use std::io::Write;

use super::ContextArgs;
use crate::color;
use crate::output::{handle_list, OutputFormat};

#[derive(Args, Debug, Clone, PartialEq)]
pub struct ListArgs {
    #[command(flatten)]
    pub context: ContextArgs,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct EnvironmentEntry {
    pub name: String,
    pub selected: bool,
    pub app: Option<String>,
    pub account: Option<String>,
    pub region: Option<String>,
}

pub fn handle(args: ListArgs, format: OutputFormat) -> Result<()> {
    let context = args.context.load()?;
    let entries = environment_entries(&context);
    handle_list(format, &entries, "No environments in context", render_entries)
}

/// Environment records in name order. Fields are read as-is; nothing is validated.
pub fn environment_entries(context: &Context) -> Vec<EnvironmentEntry> {
    let selected = selected_environment(context).ok();
    environments(context)
        .into_iter()
        .map(|name| {
            let field = |key: &str| {
                context
                    .get(&name)
                    .and_then(|env| env.get(key))
                    .and_then(Value::as_str)
                    .map(str::to_string)
            };
            EnvironmentEntry {
                selected: selected.as_deref() == Some(name.as_str()),
                app: field("App"),
                account: field("AWSAccountID"),
                region: field("AWSRegion"),
                name,
            }
        })
        .collect()
}

fn render_entries(entries: &[EnvironmentEntry], out: &mut dyn Write) -> std::io::Result<()> {
    let name_w = entries.iter().map(|e| e.name.len()).max().unwrap_or(0).max(4);
    let app_w =
        entries.iter().map(|e| e.app.as_deref().map_or(1, str::len)).max().unwrap_or(0).max(3);

    writeln!(out, "  {:<name_w$}  {:<app_w$}  ENV", "NAME", "APP")?;
    for entry in entries {
        let marker = if entry.selected { "*" } else { " " };
        let env = match (&entry.account, &entry.region) {
            (Some(account), Some(region)) => format!("{account}/{region}"),
            _ => color::muted("-"),
        };
        writeln!(
            out,
            "{} {}  {:<app_w$}  {}",
            marker,
            color::header(&format!("{:<name_w$}", entry.name)),
            entry.app.as_deref().unwrap_or("-"),
            env,
        )?;
    }
    Ok(())
}

#[cfg(test)]
#[path = "list_tests.rs"]
mod tests;
