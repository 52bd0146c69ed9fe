pub mod config;
pub mod session;
pub mod validation;

use std::sync::{Mutex, MutexGuard, PoisonError};

use log::{debug, error, info, warn};
use slimmom_client::Client;
use slimmom_model::{measurement::UserMeasurements, profile::UserProfileUpdate};
use slimmom_store::{save_json, Storage, PARAMS_KEY};

use crate::config::IntakeFailurePolicy;
use crate::session::Session;
use crate::validation::{validate, FormValues, ValidationErrors};

/// State change requested from the surrounding application.
#[derive(Debug, Clone, PartialEq)]
pub enum Action {
    /// Measurements to show in the results modal.
    SetUserParams(UserMeasurements),
    OpenModal,
    /// Profile as confirmed by the server.
    SetInfoUser(UserProfileUpdate),
    NotifyIntakeFailure(String),
}

/// Where a submission stopped.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Outcome {
    /// Anonymous user, measurements were only stored locally.
    SavedLocally,
    IntakeFailed,
    ProfileUpdateFailed,
    Synced,
}

#[derive(Debug, Clone, PartialEq)]
pub struct Submission {
    pub actions: Vec<Action>,
    pub outcome: Outcome,
}

#[derive(Debug, thiserror::Error)]
pub enum SubmitError {
    #[error("a submission is already in progress")]
    Busy,
    #[error("invalid form values: {0}")]
    Validation(#[from] ValidationErrors),
    #[error("cannot compute daily calorie intake: {source}")]
    Intake {
        source: slimmom_client::Error,
        /// Actions already due when the request failed.
        actions: Vec<Action>,
    },
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SubmitStage {
    Idle,
    Validating,
    PersistedLocally,
    FetchingIntake,
    UpdatingProfile,
}

/// Runs form submissions one at a time: validation, local checkpoint,
/// calorie intake computation and profile synchronisation.
pub struct SubmitOrchestrator {
    client: Box<dyn Client>,
    storage: Box<dyn Storage>,
    intake_failure: IntakeFailurePolicy,
    stage: Mutex<SubmitStage>,
}

struct StageGuard<'a> {
    stage: &'a Mutex<SubmitStage>,
}

impl StageGuard<'_> {
    fn advance(&self, next: SubmitStage) {
        let mut stage = lock(self.stage);
        debug!("Submission {:?} -> {:?}", *stage, next);
        *stage = next;
    }
}

impl Drop for StageGuard<'_> {
    fn drop(&mut self) {
        self.advance(SubmitStage::Idle);
    }
}

fn lock(stage: &Mutex<SubmitStage>) -> MutexGuard<'_, SubmitStage> {
    stage.lock().unwrap_or_else(PoisonError::into_inner)
}

impl SubmitOrchestrator {
    pub fn new(
        client: Box<dyn Client>,
        storage: Box<dyn Storage>,
        intake_failure: IntakeFailurePolicy,
    ) -> Self {
        Self {
            client,
            storage,
            intake_failure,
            stage: Mutex::new(SubmitStage::Idle),
        }
    }

    pub fn stage(&self) -> SubmitStage {
        *lock(&self.stage)
    }

    fn begin(&self) -> Result<StageGuard<'_>, SubmitError> {
        let mut stage = lock(&self.stage);
        if *stage != SubmitStage::Idle {
            warn!("Ignoring submission, previous one is at {:?}", *stage);
            return Err(SubmitError::Busy);
        }
        *stage = SubmitStage::Validating;
        Ok(StageGuard { stage: &self.stage })
    }

    pub async fn submit(
        &self,
        values: &FormValues,
        session: &Session,
    ) -> Result<Submission, SubmitError> {
        let guard = self.begin()?;

        let measurements = validate(values).map_err(|e| {
            error!("Validation error: {}", e);
            e
        })?;

        let mut actions = vec![Action::SetUserParams(measurements), Action::OpenModal];
        if let Err(e) = save_json(self.storage.as_ref(), PARAMS_KEY, &measurements).await {
            error!("Failed to store measurements locally, continuing. {}", e);
        }
        guard.advance(SubmitStage::PersistedLocally);

        let Some(token) = session.token() else {
            info!("Not logged in, measurements saved locally only");
            return Ok(Submission {
                actions,
                outcome: Outcome::SavedLocally,
            });
        };

        guard.advance(SubmitStage::FetchingIntake);
        let intake = match self.client.compute_intake(&measurements).await {
            Ok(intake) => intake,
            Err(e) => match self.intake_failure {
                IntakeFailurePolicy::Surface => {
                    error!("Failed to compute daily intake: {}", e);
                    return Err(SubmitError::Intake { source: e, actions });
                }
                IntakeFailurePolicy::BestEffort => {
                    warn!("Failed to compute daily intake, skipping profile update. {}", e);
                    actions.push(Action::NotifyIntakeFailure(e.to_string()));
                    return Ok(Submission {
                        actions,
                        outcome: Outcome::IntakeFailed,
                    });
                }
            },
        };

        let update = UserProfileUpdate::merge(&measurements, intake);
        info!("Updating user info with body: {:?}", update);
        guard.advance(SubmitStage::UpdatingProfile);
        if let Err(e) = self.client.update_profile(token, &update).await {
            error!("Error updating user info: {}", e);
            return Ok(Submission {
                actions,
                outcome: Outcome::ProfileUpdateFailed,
            });
        }

        info!("User info updated");
        actions.push(Action::SetInfoUser(update));
        Ok(Submission {
            actions,
            outcome: Outcome::Synced,
        })
    }
}
