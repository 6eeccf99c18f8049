use serde::{Deserialize, Serialize};
use validator::Validate;

use crate::error::{CleaningError, Result};

/// The six caller-supplied parameters of a cleaning run.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, Validate)]
pub struct CleaningParameters {
    #[validate(length(min = 1))]
    pub input_artifact: String,

    #[validate(length(min = 1))]
    pub output_artifact: String,

    #[validate(length(min = 1))]
    pub output_type: String,

    pub output_description: String,

    pub min_price: f64,

    pub max_price: f64,
}

impl CleaningParameters {
    /// Parameters as a flat JSON object for the run tracker.
    pub fn to_config_map(&self) -> Result<serde_json::Map<String, serde_json::Value>> {
        match serde_json::to_value(self)? {
            serde_json::Value::Object(map) => Ok(map),
            other => Err(CleaningError::InvalidParameter(format!(
                "parameters serialized to a non-object value: {}",
                other
            ))),
        }
    }
}
