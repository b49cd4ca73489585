//! Upload-submit-result state machine.
//!
//! ```text
//!            select_file / clear_selection
//!               ┌──────┐
//!               ▼      │
//!  reset ──▶  Idle ────┘
//!   ▲          │ begin_submit (admissible file held)
//!   │          ▼
//!   │     Submitting ── complete(token, Ok) ──▶ Succeeded ──┐
//!   │          └─────── complete(token, Err) ─▶ Failed ─────┤
//!   └───────────────────────────────────────────────────────┘
//! ```
//!
//! The controller does no I/O. [`WorkflowController::begin_submit`] hands
//! out a [`Submission`] carrying an [`EpisodeToken`]; the caller performs
//! the request and reports back through
//! [`WorkflowController::complete`]. `reset` bumps the generation, so a
//! response for an abandoned episode is dropped.

use crate::config::FileConstraints;
use crate::types::{
    ApiError, FailureReason, Notification, ParseResult, UploadCandidate, ValidationResult, WorkflowStatus,
};
use crate::validation::validate;

pub const PARSE_SUCCESS_MESSAGE: &str = "Statement parsed successfully!";

/// Identifies one Submitting episode.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub struct EpisodeToken(u64);

impl EpisodeToken {
    pub fn generation(&self) -> u64 {
        self.0
    }
}

/// Work handed to the caller when a submission starts.
#[derive(Clone, Debug, PartialEq)]
pub struct Submission<B> {
    pub episode: EpisodeToken,
    pub candidate: UploadCandidate<B>,
}

/// Controller state. Exactly one variant at a time.
#[derive(Clone, Debug, PartialEq)]
pub enum WorkflowState<B> {
    Idle {
        candidate: Option<UploadCandidate<B>>,
        violations: Vec<String>,
    },
    Submitting {
        episode: EpisodeToken,
        file_name: String,
    },
    Succeeded(ParseResult),
    Failed(FailureReason),
}

impl<B> Default for WorkflowState<B> {
    fn default() -> Self {
        WorkflowState::Idle {
            candidate: None,
            violations: Vec::new(),
        }
    }
}

/// Owner of all workflow state for one upload panel.
#[derive(Clone, Debug)]
pub struct WorkflowController<B> {
    state: WorkflowState<B>,
    generation: u64,
    constraints: FileConstraints,
    notifications: Vec<Notification>,
}

impl<B: Clone> WorkflowController<B> {
    pub fn new(constraints: FileConstraints) -> Self {
        Self {
            state: WorkflowState::default(),
            generation: 0,
            constraints,
            notifications: Vec::new(),
        }
    }

    // -------------------------------------------------------------------------
    // Queries
    // -------------------------------------------------------------------------

    pub fn state(&self) -> &WorkflowState<B> {
        &self.state
    }

    pub fn status(&self) -> WorkflowStatus {
        match self.state {
            WorkflowState::Idle { .. } => WorkflowStatus::Idle,
            WorkflowState::Submitting { .. } => WorkflowStatus::Submitting,
            WorkflowState::Succeeded(_) => WorkflowStatus::Succeeded,
            WorkflowState::Failed(_) => WorkflowStatus::Failed,
        }
    }

    pub fn constraints(&self) -> &FileConstraints {
        &self.constraints
    }

    pub fn candidate(&self) -> Option<&UploadCandidate<B>> {
        match &self.state {
            WorkflowState::Idle { candidate, .. } => candidate.as_ref(),
            _ => None,
        }
    }

    pub fn violations(&self) -> &[String] {
        match &self.state {
            WorkflowState::Idle { violations, .. } => violations,
            _ => &[],
        }
    }

    pub fn result(&self) -> Option<&ParseResult> {
        match &self.state {
            WorkflowState::Succeeded(result) => Some(result),
            _ => None,
        }
    }

    pub fn failure(&self) -> Option<&FailureReason> {
        match &self.state {
            WorkflowState::Failed(reason) => Some(reason),
            _ => None,
        }
    }

    /// Whether the submit action is currently enabled.
    pub fn can_submit(&self) -> bool {
        self.candidate().is_some()
    }

    /// Notifications raised since the last drain, oldest first.
    pub fn drain_notifications(&mut self) -> Vec<Notification> {
        std::mem::take(&mut self.notifications)
    }

    // -------------------------------------------------------------------------
    // Transitions
    // -------------------------------------------------------------------------

    /// Validate and hold a newly selected file, replacing any previous one.
    ///
    /// Ignored outside `Idle`.
    pub fn select_file(&mut self, candidate: Option<UploadCandidate<B>>) -> ValidationResult {
        if !matches!(self.state, WorkflowState::Idle { .. }) {
            log::warn!("File selection ignored while {}", self.status().as_str());
            return ValidationResult::default();
        }

        let validation = validate(candidate.as_ref(), &self.constraints);
        self.state = if validation.is_admissible {
            if let Some(c) = &candidate {
                log::info!("📁 File selected: {} ({} bytes, {})", c.name, c.size_bytes, c.media_type);
            }
            WorkflowState::Idle {
                candidate,
                violations: Vec::new(),
            }
        } else {
            log::info!("File rejected: {}", validation.violations.join("; "));
            WorkflowState::Idle {
                candidate: None,
                violations: validation.violations.clone(),
            }
        };
        validation
    }

    /// Drop the held file and any violations. Ignored outside `Idle`.
    pub fn clear_selection(&mut self) {
        if let WorkflowState::Idle { .. } = self.state {
            self.state = WorkflowState::default();
        }
    }

    /// Start a submission episode for the held file.
    ///
    /// Returns `None` (and changes nothing) unless an admissible file is
    /// held in `Idle`, which also rules out a second concurrent submission.
    pub fn begin_submit(&mut self) -> Option<Submission<B>> {
        let candidate = self.candidate()?.clone();

        self.generation += 1;
        let episode = EpisodeToken(self.generation);
        log::info!("🚀 Submitting {} (episode {})", candidate.name, episode.0);

        self.state = WorkflowState::Submitting {
            episode,
            file_name: candidate.name.clone(),
        };
        Some(Submission { episode, candidate })
    }

    /// Deliver the outcome of an episode.
    ///
    /// Returns `false` when the outcome was discarded because the episode
    /// is no longer current.
    pub fn complete(&mut self, episode: EpisodeToken, outcome: Result<ParseResult, ApiError>) -> bool {
        match self.state {
            WorkflowState::Submitting { episode: current, .. } if current == episode => {}
            _ => {
                log::debug!("Discarding stale response for episode {}", episode.0);
                return false;
            }
        }

        match outcome {
            Ok(result) => {
                log::info!(
                    "✅ Statement parsed: {}",
                    result.statement.issuer_name.as_deref().unwrap_or("unknown issuer")
                );
                self.notifications.push(Notification::success(PARSE_SUCCESS_MESSAGE));
                self.state = WorkflowState::Succeeded(result);
            }
            Err(error) => {
                log::error!("❌ Parse failed: {}", error);
                let reason = FailureReason::from(&error);
                self.notifications.push(Notification::error(reason.message.clone()));
                self.state = WorkflowState::Failed(reason);
            }
        }
        true
    }

    /// Return to an empty `Idle`, invalidating any in-flight episode.
    pub fn reset(&mut self) {
        if let WorkflowState::Submitting { episode, .. } = &self.state {
            log::info!("Abandoning in-flight episode {}", episode.0);
        }
        self.generation += 1;
        self.state = WorkflowState::default();
    }
}

impl<B: Clone> Default for WorkflowController<B> {
    fn default() -> Self {
        Self::new(FileConstraints::default())
    }
}
