//! Checkout step machine.
//!
//! A linear gate over three ordered steps. Keeping the sequence linear
//! makes validation order deterministic, and restricting jumps to
//! completed steps or the immediate successor means no required gate can
//! be skipped while users can still go back and review earlier input.

use core::fmt;
use std::collections::HashSet;

use crate::form::{CheckoutFormState, FormField};

/// The ordered checkout steps.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum CheckoutStep {
    /// Contact and address details.
    #[default]
    Delivery,
    /// Payment method choice.
    Payment,
    /// Final review and terms acceptance.
    Review,
}

impl CheckoutStep {
    /// The step after this one, if any.
    #[must_use]
    pub const fn successor(self) -> Option<Self> {
        match self {
            Self::Delivery => Some(Self::Payment),
            Self::Payment => Some(Self::Review),
            Self::Review => None,
        }
    }

    /// The step before this one, if any.
    #[must_use]
    pub const fn predecessor(self) -> Option<Self> {
        match self {
            Self::Delivery => None,
            Self::Payment => Some(Self::Delivery),
            Self::Review => Some(Self::Payment),
        }
    }
}

impl fmt::Display for CheckoutStep {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            Self::Delivery => "delivery",
            Self::Payment => "payment",
            Self::Review => "review",
        };
        write!(f, "{name}")
    }
}

/// Result of a successful [`StepMachine::advance`] call.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Advance {
    /// The machine moved to the given step.
    Moved(CheckoutStep),
    /// The review gate passed; the caller may place the order. The machine
    /// stays on review so a failed submission can be retried.
    ReadyToSubmit,
}

/// A step gate rejected the advance.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[error("{step} step is missing required fields: {}", format_fields(.missing))]
pub struct StepError {
    /// The step whose gate rejected.
    pub step: CheckoutStep,
    /// The fields still blank.
    pub missing: Vec<FormField>,
}

fn format_fields(fields: &[FormField]) -> String {
    fields
        .iter()
        .map(ToString::to_string)
        .collect::<Vec<_>>()
        .join(", ")
}

/// The checkout wizard's state: the current step plus the set of steps
/// whose gates have already passed.
#[derive(Debug, Clone, Default)]
pub struct StepMachine {
    current: CheckoutStep,
    completed: HashSet<CheckoutStep>,
}

impl StepMachine {
    /// A fresh machine at the delivery step with nothing completed.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// The step the user is currently on.
    #[must_use]
    pub const fn current(&self) -> CheckoutStep {
        self.current
    }

    /// Steps whose gates have passed.
    #[must_use]
    pub const fn completed(&self) -> &HashSet<CheckoutStep> {
        &self.completed
    }

    /// Whether the given step's gate has passed.
    #[must_use]
    pub fn is_completed(&self, step: CheckoutStep) -> bool {
        self.completed.contains(&step)
    }

    /// Validate the current step's gate and move forward.
    ///
    /// On success the current step is marked completed and the machine
    /// moves to its successor. There is no successor past review: a
    /// successful advance from review reports [`Advance::ReadyToSubmit`]
    /// without a transition. On failure the machine is left unchanged.
    ///
    /// # Errors
    ///
    /// Returns a [`StepError`] listing the blank fields when the current
    /// step's gate rejects.
    pub fn advance(&mut self, form: &CheckoutFormState) -> Result<Advance, StepError> {
        let missing = form.missing_fields(self.current);
        if !missing.is_empty() {
            return Err(StepError {
                step: self.current,
                missing,
            });
        }

        self.completed.insert(self.current);
        match self.current.successor() {
            Some(next) => {
                self.current = next;
                Ok(Advance::Moved(next))
            }
            None => Ok(Advance::ReadyToSubmit),
        }
    }

    /// Move to the strict predecessor. No-op at the delivery step.
    ///
    /// Completed marks survive, so moving back and forward again does not
    /// re-prompt for a step that already validated.
    pub fn retreat(&mut self) -> bool {
        match self.current.predecessor() {
            Some(prev) => {
                self.current = prev;
                true
            }
            None => false,
        }
    }

    /// Jump directly to a step.
    ///
    /// Allowed only to a completed step or the immediate successor of the
    /// current one; anything else is rejected silently with no state
    /// change.
    pub fn jump_to(&mut self, step: CheckoutStep) -> bool {
        let allowed = self.is_completed(step) || self.current.successor() == Some(step);
        if allowed {
            self.current = step;
        }
        allowed
    }
}
