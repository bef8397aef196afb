//! Ollama image test harness
//!
//! Creates a container for an ollama inference image, waits for its API to
//! answer, checks that each model under test produces a JSON `response`, and
//! always removes what it created.
//!
//! ## Quick Start
//!
//! ```no_run
//! use std::sync::Arc;
//! use tester::*;
//!
//! # async fn demo() -> TesterResult<()> {
//! let config = RunConfig::builder()
//!     .budget(Budget::from_secs(90, 10)?)
//!     .build();
//! let orchestrator = LifecycleOrchestrator::new(Arc::new(TokioProcessRunner::new()), config);
//!
//! let target = ComposeTarget::new("docker-compose.test.yml", true);
//! let model = shared::ModelName::parse("tinyllama:1.1b")?;
//! let report = orchestrator.run(&target, &[model]).await;
//! assert!(report.passed(), "{:?}", report.failure_message());
//! # Ok(())
//! # }
//! ```

// Core modules
pub mod config;
pub mod error;
pub mod runtime;
pub mod scenarios;
pub mod targets;
pub mod testing;

// Main interfaces - re-exported at crate root for convenience
pub use config::{ApiEndpoint, Budget, RunConfig, RunConfigBuilder};
pub use error::{TesterError, TesterResult};
pub use runtime::{LifecycleOrchestrator, ProcessRunner, TokioProcessRunner};
pub use targets::{ComposeTarget, ImageTarget, ResourceTarget};
pub use testing::{RunOutcome, RunReport, RunSummary};

// Supporting types
pub use runtime::{
    CommandSpec, DiagnosticsCollector, DiagnosticsReport, HealthPoller, InferenceVerifier,
    LifecyclePhase, PollAttempt, ProcessOutput, Resource, ResourceProbe, ResourceState,
    VerificationResult,
};
pub use scenarios::TestScenarios;
