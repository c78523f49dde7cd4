//! Validator configuration and builder

use serde::{Deserialize, Serialize};
use service_builder::builder;

pub const DEFAULT_MESSAGE: &str = "Please check the input value.";
pub const DEFAULT_REQUIRED_MESSAGE: &str = "This field is required.";
pub const DEFAULT_NOT_AN_OBJECT_MESSAGE: &str = "Value is not an object.";
pub const DEFAULT_ARRAY_COUNT_MESSAGE: &str = "Please select the values.";

/// Fallback messages used when neither the rule call nor the field selection
/// supplies one.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
#[builder]
pub struct ValidatorConfig {
    /// Message for any failed rule
    #[builder(default = "DEFAULT_MESSAGE.to_string()", getter)]
    pub default_message: String,

    /// Message for `required` and the conditional-required family
    #[builder(default = "DEFAULT_REQUIRED_MESSAGE.to_string()", getter)]
    pub required_message: String,

    /// Message recorded for list elements that should be objects but are not
    #[builder(default = "DEFAULT_NOT_AN_OBJECT_MESSAGE.to_string()", getter)]
    pub not_an_object_message: String,

    /// Message for `array_count`
    #[builder(default = "DEFAULT_ARRAY_COUNT_MESSAGE.to_string()", getter)]
    pub array_count_message: String,
}

impl Default for ValidatorConfig {
    fn default() -> Self {
        Self {
            default_message: DEFAULT_MESSAGE.to_string(),
            required_message: DEFAULT_REQUIRED_MESSAGE.to_string(),
            not_an_object_message: DEFAULT_NOT_AN_OBJECT_MESSAGE.to_string(),
            array_count_message: DEFAULT_ARRAY_COUNT_MESSAGE.to_string(),
        }
    }
}

impl ValidatorConfigBuilder {
    /// Build, falling back to the stock messages for anything left unset
    pub fn build_config(self) -> ValidatorConfig {
        self.build().unwrap_or_default()
    }
}
