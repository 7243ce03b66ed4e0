//! The three-step booking form: route, package, receiver.
//!
//! Each step has a validator that gates moving forward. Going back never
//! re-validates and never clears data. Submission is only possible from the
//! receiver step and freezes the wizard.

pub mod rwb;
pub mod validate;

use std::sync::Arc;

use chrono::{DateTime, Utc};
use serde::Serialize;
use thiserror::Error;
use uuid::Uuid;

use crate::models::booking::{BookingDraft, DraftField, DraftUpdate};
use crate::wizard::rwb::{generate_rwb, Clock};
use crate::wizard::validate::{validate_step, ContactRules};

#[derive(Debug, Clone, Copy, Serialize, PartialEq, Eq, PartialOrd, Ord)]
#[serde(rename_all = "snake_case")]
pub enum Step {
    Route,
    Package,
    Receiver,
    Submitted,
}

impl Step {
    pub fn index(&self) -> u8 {
        match self {
            Step::Route => 1,
            Step::Package => 2,
            Step::Receiver => 3,
            Step::Submitted => 4,
        }
    }

    fn following(&self) -> Step {
        match self {
            Step::Route => Step::Package,
            Step::Package | Step::Receiver => Step::Receiver,
            Step::Submitted => Step::Submitted,
        }
    }

    fn preceding(&self) -> Option<Step> {
        match self {
            Step::Package => Some(Step::Route),
            Step::Receiver => Some(Step::Package),
            Step::Route | Step::Submitted => None,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum WizardError {
    #[error("step {step} is missing required fields: {}", join_fields(.missing))]
    Incomplete { step: u8, missing: Vec<DraftField> },

    #[error("pickup and drop points must be different")]
    SamePickupAndDrop,

    #[error("{field} is not well formed")]
    InvalidContact { field: DraftField },

    #[error("already at the first step")]
    AtFirstStep,

    #[error("booking can only be submitted from the receiver step")]
    NotOnFinalStep,

    #[error("booking has already been submitted")]
    AlreadySubmitted,
}

impl WizardError {
    /// True when the user can fix this by filling in the form.
    pub fn is_validation(&self) -> bool {
        matches!(
            self,
            WizardError::Incomplete { .. }
                | WizardError::SamePickupAndDrop
                | WizardError::InvalidContact { .. }
        )
    }
}

fn join_fields(fields: &[DraftField]) -> String {
    fields
        .iter()
        .map(ToString::to_string)
        .collect::<Vec<_>>()
        .join(", ")
}

#[derive(Debug, Clone, Serialize, PartialEq)]
pub struct BookingSummary {
    pub route: String,
    pub package: String,
    pub receiver: String,
}

impl BookingSummary {
    pub fn lines(&self) -> [String; 3] {
        [
            format!("Route: {}", self.route),
            format!("Package: {}", self.package),
            format!("Receiver: {}", self.receiver),
        ]
    }
}

#[derive(Debug, Clone)]
pub struct BookingWizard {
    id: Uuid,
    owner_id: String,
    step: Step,
    draft: BookingDraft,
    rwb: Option<String>,
    rules: ContactRules,
    clock: Arc<dyn Clock>,
    created_at: DateTime<Utc>,
    last_activity: DateTime<Utc>,
}

impl BookingWizard {
    pub fn new(owner_id: impl Into<String>, rules: ContactRules, clock: Arc<dyn Clock>) -> Self {
        let now = Utc::now();
        Self {
            id: Uuid::new_v4(),
            owner_id: owner_id.into(),
            step: Step::Route,
            draft: BookingDraft::default(),
            rwb: None,
            rules,
            clock,
            created_at: now,
            last_activity: now,
        }
    }

    pub fn id(&self) -> Uuid {
        self.id
    }

    pub fn owner_id(&self) -> &str {
        &self.owner_id
    }

    pub fn step(&self) -> Step {
        self.step
    }

    pub fn draft(&self) -> &BookingDraft {
        &self.draft
    }

    pub fn rwb(&self) -> Option<&str> {
        self.rwb.as_deref()
    }

    pub fn created_at(&self) -> DateTime<Utc> {
        self.created_at
    }

    pub fn last_activity(&self) -> DateTime<Utc> {
        self.last_activity
    }

    pub fn can_go_back(&self) -> bool {
        self.step.preceding().is_some()
    }

    pub fn apply(&mut self, update: DraftUpdate) -> Result<(), WizardError> {
        self.touch();
        if self.step == Step::Submitted {
            return Err(WizardError::AlreadySubmitted);
        }
        self.draft.apply(update);
        Ok(())
    }

    /// Validates the current step and advances one step. The receiver step is
    /// the last one reachable this way; use [`BookingWizard::submit`] from there.
    pub fn next(&mut self) -> Result<Step, WizardError> {
        self.touch();
        validate_step(self.step, &self.draft, self.rules)?;
        self.step = self.step.following();
        Ok(self.step)
    }

    pub fn back(&mut self) -> Result<Step, WizardError> {
        self.touch();
        match (self.step, self.step.preceding()) {
            (Step::Submitted, _) => Err(WizardError::AlreadySubmitted),
            (_, None) => Err(WizardError::AtFirstStep),
            (_, Some(previous)) => {
                self.step = previous;
                Ok(previous)
            }
        }
    }

    pub fn submit(&mut self) -> Result<&str, WizardError> {
        self.touch();
        match self.step {
            Step::Submitted => return Err(WizardError::AlreadySubmitted),
            Step::Route | Step::Package => return Err(WizardError::NotOnFinalStep),
            Step::Receiver => {}
        }
        validate_step(Step::Receiver, &self.draft, self.rules)?;

        self.step = Step::Submitted;
        Ok(self.rwb.insert(generate_rwb(self.clock.as_ref())).as_str())
    }

    fn touch(&mut self) {
        self.last_activity = Utc::now();
    }

    pub fn summary(&self) -> BookingSummary {
        let package = match self.draft.package_type {
            Some(kind) => format!("{} ({} kg)", kind.label(), self.draft.weight.trim()),
            None => format!("({} kg)", self.draft.weight.trim()),
        };

        BookingSummary {
            route: self.draft.route(),
            package,
            receiver: self.draft.receiver_name.trim().to_string(),
        }
    }
}
