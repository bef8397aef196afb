//! Runtime Management
//!
//! Process execution, readiness polling, diagnostics, inference verification
//! and the lifecycle that sequences them.

pub mod cleanup;
pub mod diagnostics;
pub mod lifecycle;
pub mod poller;
pub mod probe;
pub mod process;
pub mod resource;
pub mod verifier;

// Re-export main types
pub use cleanup::TeardownGuard;
pub use diagnostics::{DiagnosticsCollector, DiagnosticsReport, NO_LOGS};
pub use lifecycle::{LifecycleOrchestrator, LifecyclePhase};
pub use poller::{HealthPoller, PollAttempt, PollReport, Ready};
pub use probe::{CommandProbe, Liveness, ProbeOutcome, ResourceProbe};
pub use process::{CommandSpec, ProcessOutput, ProcessRunner, TokioProcessRunner};
pub use resource::{Resource, ResourceState};
pub use verifier::{InferenceVerifier, VerificationResult};
