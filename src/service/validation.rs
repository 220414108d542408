//! Request validation for create payloads.

use crate::error::AppError;
use crate::schemas::Changeset;

pub struct RequestValidator;

impl RequestValidator {
    /// All required fields must be present. Runs before the payload reaches a service.
    pub fn validate<C: Changeset>(body: &C) -> Result<(), AppError> {
        match body.missing_required().as_slice() {
            [] => Ok(()),
            [col] => Err(AppError::Validation(format!("{} is required", col))),
            cols => Err(AppError::Validation(format!("{} are required", cols.join(", ")))),
        }
    }
}
