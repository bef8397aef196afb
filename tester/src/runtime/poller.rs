//! Health Poller
//!
//! Bounded readiness loop. Each attempt sleeps first, so the container gets a
//! full interval of startup time before it is probed; then liveness is checked
//! before readiness. The loop short-circuits on the first ready probe and on
//! the first dead liveness check.

use super::probe::ResourceProbe;
use super::resource::{Resource, ResourceState};
use crate::config::Budget;
use crate::error::{TesterError, TesterResult};
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::time::Duration;
use tokio::time::{sleep, Instant};

/// One readiness probe outcome
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PollAttempt {
    /// 0-based
    pub attempt_index: u32,
    pub timestamp: DateTime<Utc>,
    pub succeeded: bool,
    pub raw_output: String,
}

/// The resource answered its readiness probe
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Ready {
    /// 1-based number of the attempt that succeeded
    pub attempt: u32,
    pub elapsed: Duration,
}

#[derive(Debug)]
pub struct PollReport {
    pub result: TesterResult<Ready>,
    pub attempts: Vec<PollAttempt>,
}

#[derive(Debug, Clone, Copy, Default)]
pub struct HealthPoller;

impl HealthPoller {
    pub fn new() -> Self {
        Self
    }

    /// Poll `resource` until ready, dead, or out of budget
    pub async fn poll(
        &self,
        resource: &mut Resource,
        probe: &dyn ResourceProbe,
        budget: &Budget,
    ) -> PollReport {
        let mut attempts = Vec::new();

        if resource.state() != ResourceState::Starting {
            return PollReport {
                result: Err(TesterError::InvalidState {
                    resource: resource.name().to_string(),
                    state: resource.state(),
                    expected: ResourceState::Starting,
                }),
                attempts,
            };
        }

        tracing::info!(
            "⏳ Waiting for {} to become healthy (up to {} attempts, {}s apart)",
            resource.name(),
            budget.max_attempts(),
            budget.interval().as_secs_f64()
        );

        let start = Instant::now();

        for index in 0..budget.max_attempts() {
            let attempt = index + 1;
            sleep(budget.interval()).await;

            let alive = probe.is_alive(resource.name()).await;
            if !alive.ok {
                tracing::warn!(
                    "💀 {} is no longer running (attempt {}): {}",
                    resource.name(),
                    attempt,
                    alive.raw_output
                );
                attempts.push(PollAttempt {
                    attempt_index: index,
                    timestamp: Utc::now(),
                    succeeded: false,
                    raw_output: alive.raw_output,
                });
                resource.transition(ResourceState::Failed);
                return PollReport {
                    result: Err(TesterError::ResourceDied {
                        resource: resource.name().to_string(),
                        attempt,
                    }),
                    attempts,
                };
            }

            let ready = probe.is_ready(resource.name()).await;
            attempts.push(PollAttempt {
                attempt_index: index,
                timestamp: Utc::now(),
                succeeded: ready.ok,
                raw_output: ready.raw_output,
            });

            if ready.ok {
                resource.transition(ResourceState::Healthy);
                tracing::info!(
                    "✅ {} is healthy and model is loaded (attempt {})",
                    resource.name(),
                    attempt
                );
                return PollReport {
                    result: Ok(Ready {
                        attempt,
                        elapsed: start.elapsed(),
                    }),
                    attempts,
                };
            }

            resource.transition(ResourceState::Running);
            tracing::debug!("⏱️ {} not ready yet (attempt {})", resource.name(), attempt);
        }

        resource.transition(ResourceState::Failed);
        PollReport {
            result: Err(TesterError::Timeout {
                resource: resource.name().to_string(),
                total_timeout: budget.total_timeout(),
                elapsed: start.elapsed(),
            }),
            attempts,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::runtime::probe::{MockResourceProbe, ProbeOutcome};
    use assert_matches::assert_matches;
    use std::sync::atomic::{AtomicU32, Ordering};
    use std::sync::Arc;

    fn always_alive(probe: &mut MockResourceProbe) {
        probe
            .expect_is_alive()
            .returning(|_| ProbeOutcome::pass("running/starting"));
    }

    #[tokio::test(start_paused = true)]
    async fn test_ready_on_third_attempt() {
        let mut probe = MockResourceProbe::new();
        always_alive(&mut probe);
        let calls = Arc::new(AtomicU32::new(0));
        let counter = calls.clone();
        probe.expect_is_ready().times(3).returning(move |_| {
            if counter.fetch_add(1, Ordering::SeqCst) == 2 {
                ProbeOutcome::pass("{\"models\":[]}")
            } else {
                ProbeOutcome::fail("connection refused")
            }
        });

        let mut resource = Resource::new("c1");
        let budget = Budget::from_secs(3, 1).unwrap();
        let report = HealthPoller::new().poll(&mut resource, &probe, &budget).await;

        let ready = report.result.unwrap();
        assert_eq!(ready.attempt, 3);
        assert!(ready.elapsed >= Duration::from_secs(3));
        assert_eq!(report.attempts.len(), 3);
        assert_eq!(
            report.attempts.iter().map(|a| a.succeeded).collect::<Vec<_>>(),
            vec![false, false, true]
        );
        assert_eq!(resource.state(), ResourceState::Healthy);
    }

    #[tokio::test(start_paused = true)]
    async fn test_timeout_probes_exactly_budget_times() {
        let mut probe = MockResourceProbe::new();
        always_alive(&mut probe);
        probe
            .expect_is_ready()
            .times(5)
            .returning(|_| ProbeOutcome::fail(""));

        let mut resource = Resource::new("c1");
        let budget = Budget::from_secs(5, 10).unwrap();
        let report = HealthPoller::new().poll(&mut resource, &probe, &budget).await;

        assert_matches!(
            report.result,
            Err(TesterError::Timeout { total_timeout, elapsed, .. })
                if total_timeout == Duration::from_secs(50) && elapsed >= Duration::from_secs(50)
        );
        assert_eq!(report.attempts.len(), 5);
        assert_eq!(resource.state(), ResourceState::Failed);
    }

    #[tokio::test(start_paused = true)]
    async fn test_dead_resource_stops_polling() {
        let mut probe = MockResourceProbe::new();
        let calls = Arc::new(AtomicU32::new(0));
        let counter = calls.clone();
        probe.expect_is_alive().times(2).returning(move |_| {
            if counter.fetch_add(1, Ordering::SeqCst) == 0 {
                ProbeOutcome::pass("abc123")
            } else {
                ProbeOutcome::fail("")
            }
        });
        probe
            .expect_is_ready()
            .times(1)
            .returning(|_| ProbeOutcome::fail("connection refused"));

        let mut resource = Resource::new("c1");
        let budget = Budget::from_secs(90, 10).unwrap();
        let report = HealthPoller::new().poll(&mut resource, &probe, &budget).await;

        assert_matches!(report.result, Err(TesterError::ResourceDied { attempt: 2, .. }));
        assert_eq!(report.attempts.len(), 2);
        assert_eq!(resource.state(), ResourceState::Failed);
    }

    #[tokio::test(start_paused = true)]
    async fn test_first_probe_is_delayed() {
        let mut probe = MockResourceProbe::new();
        always_alive(&mut probe);
        probe
            .expect_is_ready()
            .times(1)
            .returning(|_| ProbeOutcome::pass("ok"));

        let mut resource = Resource::new("c1");
        let budget = Budget::from_secs(3, 10).unwrap();
        let report = HealthPoller::new().poll(&mut resource, &probe, &budget).await;

        assert!(report.result.unwrap().elapsed >= Duration::from_secs(10));
    }

    #[tokio::test]
    async fn test_requires_starting_state() {
        let probe = MockResourceProbe::new();
        let mut resource = Resource::new("c1");
        resource.transition(ResourceState::Stopped);

        let report = HealthPoller::new()
            .poll(&mut resource, &probe, &Budget::default())
            .await;

        assert_matches!(report.result, Err(TesterError::InvalidState { .. }));
        assert!(report.attempts.is_empty());
    }
}
