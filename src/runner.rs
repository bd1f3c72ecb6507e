//! Concurrent execution of the scenario catalogue.

use std::sync::Arc;
use std::time::{Duration, Instant};

use serde::Serialize;
use tokio::sync::Semaphore;
use tracing::{info, warn};

use crate::client::VerificationClient;
use crate::config::SuiteConfig;
use crate::error::ContractError;
use crate::fixtures::Fixtures;
use crate::scenarios::{self, Group, Scenario, ScenarioContext};
use crate::schema::SchemaSet;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum ScenarioStatus {
    Passed,
    Failed,
    TimedOut,
}

#[derive(Debug, Clone, Serialize)]
pub struct ScenarioResult {
    pub scenario: &'static str,
    pub group: Group,
    pub status: ScenarioStatus,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub detail: Option<String>,
    pub elapsed_ms: u64,
}

impl ScenarioResult {
    fn new(scenario: Scenario, status: ScenarioStatus, detail: Option<String>, elapsed: Duration) -> Self {
        Self {
            scenario: scenario.name(),
            group: scenario.group(),
            status,
            detail,
            elapsed_ms: elapsed.as_millis() as u64,
        }
    }

    pub fn passed(&self) -> bool {
        self.status == ScenarioStatus::Passed
    }
}

/// Outcome of one run, in catalogue order.
#[derive(Debug, Clone, Serialize)]
pub struct RunReport {
    pub results: Vec<ScenarioResult>,
    pub passed: usize,
    pub failed: usize,
}

impl RunReport {
    pub fn from_results(results: Vec<ScenarioResult>) -> Self {
        let passed = results.iter().filter(|r| r.passed()).count();
        let failed = results.len() - passed;
        Self {
            results,
            passed,
            failed,
        }
    }

    pub fn is_success(&self) -> bool {
        self.failed == 0
    }

    pub fn result(&self, scenario: Scenario) -> Option<&ScenarioResult> {
        self.results.iter().find(|r| r.scenario == scenario.name())
    }
}

/// Runs scenarios concurrently, each under its own deadline.
pub struct ScenarioRunner {
    ctx: Arc<ScenarioContext>,
    scenario_timeout: Duration,
    concurrency: usize,
}

impl ScenarioRunner {
    pub fn new(ctx: ScenarioContext, scenario_timeout: Duration, concurrency: usize) -> Self {
        Self {
            ctx: Arc::new(ctx),
            scenario_timeout,
            concurrency: concurrency.max(1),
        }
    }

    /// Build the client and schemas described by `config`, with the
    /// published reqres fixtures.
    pub fn from_config(config: &SuiteConfig) -> Result<Self, ContractError> {
        let client = VerificationClient::from_config(config)?;
        let schemas = SchemaSet::load(config.schema_dir.as_deref())?;
        let ctx = ScenarioContext::new(client, Fixtures::reqres(), schemas);
        Ok(Self::new(ctx, config.scenario_timeout, config.concurrency))
    }

    pub fn context(&self) -> &ScenarioContext {
        &self.ctx
    }

    /// Scenarios whose name or group contains `filter`; all of them when
    /// `filter` is `None`.
    pub fn select(filter: Option<&str>) -> Vec<Scenario> {
        Scenario::ALL
            .iter()
            .copied()
            .filter(|s| filter.map_or(true, |f| s.matches_filter(f)))
            .collect()
    }

    pub async fn run_all(&self) -> RunReport {
        self.run(Scenario::ALL).await
    }

    pub async fn run(&self, selected: &[Scenario]) -> RunReport {
        info!(
            scenarios = selected.len(),
            concurrency = self.concurrency,
            base_url = %self.ctx.client.base_url(),
            "starting run"
        );

        let permits = Arc::new(Semaphore::new(self.concurrency));
        let handles: Vec<_> = selected
            .iter()
            .copied()
            .map(|scenario| {
                let ctx = Arc::clone(&self.ctx);
                let permits = Arc::clone(&permits);
                let deadline = self.scenario_timeout;
                let handle = tokio::spawn(async move {
                    let Ok(_permit) = permits.acquire_owned().await else {
                        return ScenarioResult::new(
                            scenario,
                            ScenarioStatus::Failed,
                            Some("scheduler closed before the scenario started".into()),
                            Duration::ZERO,
                        );
                    };
                    execute(scenario, &ctx, deadline).await
                });
                (scenario, handle)
            })
            .collect();

        let mut results = Vec::with_capacity(handles.len());
        for (scenario, handle) in handles {
            let result = match handle.await {
                Ok(result) => result,
                Err(join_err) => ScenarioResult::new(
                    scenario,
                    ScenarioStatus::Failed,
                    Some(format!("scenario task aborted: {join_err}")),
                    Duration::ZERO,
                ),
            };
            results.push(result);
        }

        let report = RunReport::from_results(results);
        info!(passed = report.passed, failed = report.failed, "run finished");
        report
    }
}

async fn execute(scenario: Scenario, ctx: &ScenarioContext, deadline: Duration) -> ScenarioResult {
    let started = Instant::now();
    let outcome = tokio::time::timeout(deadline, scenarios::run(scenario, ctx)).await;
    let elapsed = started.elapsed();

    match outcome {
        Ok(Ok(())) => {
            info!(scenario = scenario.name(), elapsed_ms = elapsed.as_millis() as u64, "passed");
            ScenarioResult::new(scenario, ScenarioStatus::Passed, None, elapsed)
        }
        Ok(Err(err)) => {
            warn!(
                scenario = scenario.name(),
                request_timeout = err.is_timeout(),
                error = %err,
                "failed"
            );
            ScenarioResult::new(scenario, ScenarioStatus::Failed, Some(err.to_string()), elapsed)
        }
        Err(_) => {
            warn!(scenario = scenario.name(), deadline_ms = deadline.as_millis() as u64, "timed out");
            ScenarioResult::new(
                scenario,
                ScenarioStatus::TimedOut,
                Some(format!("exceeded deadline of {} ms", deadline.as_millis())),
                elapsed,
            )
        }
    }
}
