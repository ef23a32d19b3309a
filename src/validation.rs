use std::borrow::Cow;

use validator::{ValidationError, ValidationErrors};

use crate::config::Config;
use crate::domain::pagination::PageRequest;

/// Listing limits, built once at startup and shared with the handlers.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PageRules {
    pub default_limit: u64,
    pub max_limit: u64,
}

impl PageRules {
    pub fn from_config(config: &Config) -> Self {
        Self {
            default_limit: config.page_default_limit,
            max_limit: config.page_max_limit,
        }
    }

    /// Fill in defaults and reject a limit outside `1..=max_limit`.
    pub fn resolve(
        &self,
        limit: Option<u64>,
        offset: Option<u64>,
    ) -> Result<PageRequest, ValidationErrors> {
        let limit = limit.unwrap_or(self.default_limit);
        if limit == 0 || limit > self.max_limit {
            let mut error = ValidationError::new("range").with_message(Cow::Owned(format!(
                "limit must be between 1 and {}",
                self.max_limit
            )));
            error.add_param(Cow::from("min"), &1);
            error.add_param(Cow::from("max"), &self.max_limit);
            error.add_param(Cow::from("value"), &limit);

            let mut errors = ValidationErrors::new();
            errors.add("limit", error);
            return Err(errors);
        }
        Ok(PageRequest::new(limit, offset.unwrap_or(0)))
    }
}

impl Default for PageRules {
    fn default() -> Self {
        Self {
            default_limit: 10,
            max_limit: 100,
        }
    }
}
