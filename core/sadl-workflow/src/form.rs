//! Normalization of raw form input before it reaches the SDK.

use crate::config::WorkflowConfig;
use crate::error::{WorkflowError, WorkflowResult};
use sadl_license::ActivationRequest;

/// Raw text of the activation form, exactly as typed.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ActivationForm {
    pub base_url: String,
    pub api_key: String,
    pub product: String,
    pub years: String,
}

impl ActivationForm {
    /// Creates a form from its four fields.
    pub fn new(
        base_url: impl Into<String>,
        api_key: impl Into<String>,
        product: impl Into<String>,
        years: impl Into<String>,
    ) -> Self {
        Self {
            base_url: base_url.into(),
            api_key: api_key.into(),
            product: product.into(),
            years: years.into(),
        }
    }

    /// A form pre-filled with the configured defaults.
    #[must_use]
    pub fn prefilled(config: &WorkflowConfig) -> Self {
        Self::new(
            config.base_url.clone(),
            String::new(),
            config.default_product.clone(),
            config.default_years.to_string(),
        )
    }

    /// Validates and normalizes the form into an activation request.
    ///
    /// Only an empty base URL is fatal. A blank product falls back to the
    /// configured default and an unparsable or non-positive term falls back
    /// to the configured default term.
    pub fn normalize(&self, config: &WorkflowConfig) -> WorkflowResult<ActivationRequest> {
        let base_url = self.base_url.trim();
        if base_url.is_empty() {
            return Err(WorkflowError::Validation("Enter an activation URL".into()));
        }

        let product = if self.product.trim().is_empty() {
            config.default_product.clone()
        } else {
            self.product.clone()
        };

        Ok(ActivationRequest {
            base_url: base_url.to_string(),
            api_key: self.api_key.clone(),
            product,
            years: parse_years(&self.years, config.default_years),
        })
    }
}

/// Parses the license term, falling back to `default` on anything but a
/// positive integer.
#[must_use]
pub fn parse_years(raw: &str, default: u32) -> u32 {
    match raw.trim().parse::<u32>() {
        Ok(years) if years > 0 => years,
        _ => default.max(1),
    }
}

/// Trims `raw` and rejects it if nothing is left.
pub(crate) fn require_input<'a>(raw: &'a str, prompt: &str) -> WorkflowResult<&'a str> {
    let trimmed = raw.trim();
    if trimmed.is_empty() {
        Err(WorkflowError::Validation(prompt.to_string()))
    } else {
        Ok(trimmed)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn years_fallbacks() {
        assert_eq!(parse_years("abc", 1), 1);
        assert_eq!(parse_years("3", 1), 3);
        assert_eq!(parse_years(" 2 ", 1), 2);
        assert_eq!(parse_years("0", 1), 1);
        assert_eq!(parse_years("-4", 1), 1);
        assert_eq!(parse_years("", 5), 5);
    }

    #[test]
    fn require_input_trims() {
        assert_eq!(require_input("  tok \n", "x").unwrap(), "tok");
        assert!(matches!(
            require_input(" \t ", "Paste a token"),
            Err(WorkflowError::Validation(msg)) if msg == "Paste a token"
        ));
    }
}
