//! Checkout error taxonomy.
//!
//! Background draft persistence must never block checkout: transport
//! failures during auto-save are swallowed at the sync controller boundary
//! and only logged. Validation and submission failures are foreground
//! errors and surface synchronously to the calling UI action.

use thiserror::Error;

use crate::api::ApiError;
use crate::steps::StepError;

/// Application-level error type for checkout operations.
#[derive(Debug, Error)]
pub enum CheckoutError {
    /// A step gate rejected the advance. Recoverable; surfaced inline
    /// next to the offending fields. Machine state is unchanged.
    #[error("validation failed: {0}")]
    Validation(#[from] StepError),

    /// A draft transport call failed. Recoverable; logged and retried on
    /// the next debounce cycle.
    #[error("transport error: {0}")]
    Transport(#[from] ApiError),

    /// Final order placement failed. User-facing; checkout stays on the
    /// review step so the user can retry without re-entering data.
    #[error("submission failed: {0}")]
    Submission(String),
}

/// Result type alias for `CheckoutError`.
pub type Result<T> = std::result::Result<T, CheckoutError>;

#[cfg(test)]
mod tests {
    use super::*;
    use crate::form::FormField;
    use crate::steps::CheckoutStep;

    #[test]
    fn test_error_display() {
        let err = CheckoutError::Validation(StepError {
            step: CheckoutStep::Delivery,
            missing: vec![FormField::ContactName, FormField::ContactPhone],
        });
        assert_eq!(
            err.to_string(),
            "validation failed: delivery step is missing required fields: contact name, contact phone"
        );

        let err = CheckoutError::Submission("kitchen is closed".to_string());
        assert_eq!(err.to_string(), "submission failed: kitchen is closed");
    }

    #[test]
    fn test_step_error_converts() {
        fn gate() -> Result<()> {
            Err(StepError {
                step: CheckoutStep::Review,
                missing: vec![FormField::TermsAccepted],
            })?;
            Ok(())
        }

        assert!(matches!(gate(), Err(CheckoutError::Validation(_))));
    }
}
