//! Intel report requests handed to background compilation.

use serde::{Deserialize, Serialize};

use crate::error::ValidationError;
use crate::value_objects::Email;

/// Request body asking for an intel report to be compiled and sent.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct IntelReportRequest {
    pub recipient_email: Email,
    pub report_name: String,
}

impl IntelReportRequest {
    pub fn validate(self) -> Result<Self, ValidationError> {
        if self.report_name.trim().is_empty() {
            return Err(ValidationError::EmptyField("report_name"));
        }
        Ok(self)
    }
}
