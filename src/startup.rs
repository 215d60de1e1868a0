//! The rebase pipeline.
//!
//! Configure, optionally confirm, then for each metric query and transform,
//! assemble the whole rule file in memory and finally write it once.

use std::io::{self, BufRead, Write};
use std::path::PathBuf;

use chrono::Utc;
use tracing::info;

use crate::cli::Cli;
use crate::config::{ConfigV1, MetricSpec};
use crate::error::{RebaseError, Result};
use crate::models::RuleFile;
use crate::output::write_rule_file;
use crate::prompt::confirm;
use crate::query::{PrometheusClient, QueryExecutor};
use crate::rules::{build_monitoring_group, build_rebase_group};

/// Everything a run needs, resolved once from the CLI and config file.
#[derive(Debug, Clone)]
pub struct RunSettings {
    pub server: String,
    /// Unix seconds at which every query is evaluated.
    pub rebase_time: i64,
    pub output_file: PathBuf,
    pub interval: Option<String>,
    pub metrics: Vec<MetricSpec>,
}

impl RunSettings {
    pub fn resolve(cli: &Cli, config: &ConfigV1) -> Result<Self> {
        let server = cli
            .server
            .clone()
            .ok_or_else(|| RebaseError::Config("--server is required".to_string()))?;
        Ok(Self {
            server,
            rebase_time: cli.time.unwrap_or_else(|| Utc::now().timestamp()),
            output_file: cli.output_file.clone(),
            interval: config.group_interval(),
            metrics: config.metrics.clone(),
        })
    }
}

/// Query every metric and assemble the complete rule file.
///
/// The monitoring group comes first, then one group per metric in
/// declaration order. Any failure aborts before anything is returned.
pub async fn build_rule_file(
    executor: &dyn QueryExecutor,
    settings: &RunSettings,
    generated_at: i64,
) -> Result<RuleFile> {
    let mut groups = vec![build_monitoring_group(generated_at, executor.server())];

    for spec in &settings.metrics {
        info!(
            event_name = "rebase.group.started",
            event_domain = "pipeline",
            group = %spec.group_name(settings.rebase_time),
            "generating rules for group"
        );
        let samples = executor
            .query_instant(&spec.query, settings.rebase_time)
            .await?;
        groups.push(build_rebase_group(
            spec,
            &samples,
            settings.rebase_time,
            settings.interval.clone(),
        )?);
    }

    Ok(RuleFile { groups })
}

/// Build the rule file and write it to the configured output path.
pub async fn run(executor: &dyn QueryExecutor, settings: &RunSettings) -> Result<RuleFile> {
    let generated_at = Utc::now().timestamp();
    let rule_file = build_rule_file(executor, settings, generated_at).await?;
    write_rule_file(&rule_file, &settings.output_file)?;
    Ok(rule_file)
}

/// Entry point used by the binary once configuration and logging are ready.
pub async fn execute(cli: &Cli, config: &ConfigV1) -> Result<()> {
    execute_with(cli, config, io::stdin().lock(), io::stdout()).await
}

/// Like [`execute`], with the confirmation prompt reading `input` and
/// writing `output`. Neither is touched when `--yes` is set.
pub async fn execute_with<R: BufRead, W: Write>(
    cli: &Cli,
    config: &ConfigV1,
    input: R,
    output: W,
) -> Result<()> {
    let settings = RunSettings::resolve(cli, config)?;
    info!(
        server = settings.server.as_str(),
        rebase_time = settings.rebase_time,
        output_file = %settings.output_file.display(),
        metrics = settings.metrics.len(),
        "Starting counter rebase"
    );

    if !cli.yes {
        confirm(&settings, input, output)?;
    }

    let client = PrometheusClient::new(settings.server.clone());
    let rule_file = run(&client, &settings).await?;
    info!(
        groups = rule_file.groups.len(),
        output_file = %settings.output_file.display(),
        "Counter rebase complete"
    );
    Ok(())
}
