//! Recurring invocation of the pipeline
//!
//! Runs [`extract_transform_load`] on a fixed cadence (daily by default).
//! A failed invocation is retried after a fixed delay (once by default),
//! then reported and left for the next tick. Runs never overlap.

pub mod retry;

pub use retry::retry_with_delay;

use std::future::Future;
use tokio::time::{interval, MissedTickBehavior};
use tracing::{error, info, warn};

use crate::config::EtlConfig;
use crate::error::Result;
use crate::etl::{extract_transform_load, RunSummary};

pub struct Scheduler {
    config: EtlConfig,
}

impl Scheduler {
    /// Validate `config` and build a scheduler around it
    pub fn new(config: EtlConfig) -> Result<Self> {
        config.validate()?;
        Ok(Self { config })
    }

    /// One invocation under the configured retry policy
    pub async fn run_once(&self) -> Result<RunSummary> {
        let policy = &self.config.schedule;
        retry_with_delay(
            "extract_transform_load",
            policy.retries,
            policy.retry_delay,
            || extract_transform_load(&self.config),
        )
        .await
    }

    /// Run on every tick until Ctrl-C
    pub async fn run_forever(&self) -> Result<usize> {
        self.run_until(async {
            if let Err(e) = tokio::signal::ctrl_c().await {
                error!("Cannot listen for Ctrl-C: {}", e);
                std::future::pending::<()>().await;
            }
        })
        .await
    }

    /// Run on every tick until `shutdown` resolves; returns the number of
    /// invocations started.
    ///
    /// The first tick fires immediately. A run that outlasts the cadence
    /// delays the following tick rather than bursting missed ones. Shutdown
    /// abandons an in-flight run, including its retry wait.
    pub async fn run_until<S>(&self, shutdown: S) -> Result<usize>
    where
        S: Future<Output = ()>,
    {
        let mut ticker = interval(self.config.schedule.every);
        ticker.set_missed_tick_behavior(MissedTickBehavior::Delay);
        tokio::pin!(shutdown);

        let mut runs = 0;
        loop {
            tokio::select! {
                _ = &mut shutdown => {
                    info!(runs, "Scheduler stopped");
                    return Ok(runs);
                }
                _ = ticker.tick() => {
                    runs += 1;
                    let outcome = tokio::select! {
                        outcome = self.run_once() => outcome,
                        _ = &mut shutdown => {
                            warn!(run = runs, "Scheduler stopped during a run");
                            return Ok(runs);
                        }
                    };
                    match outcome {
                        Ok(summary) => info!(
                            run = runs,
                            records = summary.records_read,
                            findings = summary.findings.len(),
                            hours = summary.hours_written,
                            "Scheduled run succeeded"
                        ),
                        Err(e) => error!(
                            run = runs,
                            code = e.code(),
                            "Scheduled run failed: {}",
                            e.user_message()
                        ),
                    }
                }
            }
        }
    }
}
