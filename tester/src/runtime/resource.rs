//! Container resource under test

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::fmt;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum ResourceState {
    Starting,
    Running,
    Healthy,
    Failed,
    Stopped,
}

impl fmt::Display for ResourceState {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            ResourceState::Starting => "starting",
            ResourceState::Running => "running",
            ResourceState::Healthy => "healthy",
            ResourceState::Failed => "failed",
            ResourceState::Stopped => "stopped",
        };
        write!(f, "{name}")
    }
}

/// A named runtime target. The name must be unique among concurrent runs.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Resource {
    name: String,
    state: ResourceState,
    created_at: DateTime<Utc>,
}

impl Resource {
    pub fn new<S: Into<String>>(name: S) -> Self {
        Self {
            name: name.into(),
            state: ResourceState::Starting,
            created_at: Utc::now(),
        }
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn state(&self) -> ResourceState {
        self.state
    }

    pub fn created_at(&self) -> DateTime<Utc> {
        self.created_at
    }

    pub(crate) fn transition(&mut self, next: ResourceState) {
        if self.state != next {
            tracing::debug!("🔁 {}: {} -> {}", self.name, self.state, next);
            self.state = next;
        }
    }
}
