//! Search-form validation
//!
//! Validation runs before any parameters exist. A form that fails produces
//! a typed field error for the UI; a form that passes produces the flat
//! parameter set the word search fetches with. Invalid input never reaches
//! the network layer.

use lex_dispatch::{Params, ValidationError};

/// User input of the word-search form
#[derive(Clone, Debug, Default, PartialEq)]
pub struct SearchForm {
    pub word: String,
    pub category: Option<String>,
    pub ignore_case: bool,
}

impl SearchForm {
    /// Validate the form into request parameters.
    pub fn validate(&self) -> Result<Params, ValidationError> {
        let word = self.word.trim();
        if word.is_empty() {
            return Err(ValidationError::new("word", "must not be empty"));
        }

        let mut params = Params::new().with("word", word);
        if let Some(category) = &self.category {
            params.set("wordCategory", category.clone());
        }
        if self.ignore_case {
            params.set("ignoreCase", "true");
        }
        Ok(params)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn empty_word_is_rejected() {
        let err = SearchForm::default().validate().unwrap_err();
        assert_eq!(err.field, "word");
    }

    #[test]
    fn whitespace_word_is_rejected() {
        let form = SearchForm {
            word: "   ".into(),
            ..Default::default()
        };
        assert!(form.validate().is_err());
    }

    #[test]
    fn valid_form_produces_trimmed_params() {
        let form = SearchForm {
            word: "  run ".into(),
            category: Some("verben".into()),
            ignore_case: true,
        };
        let params = form.validate().unwrap();
        assert_eq!(params.get("word"), Some("run"));
        assert_eq!(params.get("wordCategory"), Some("verben"));
        assert_eq!(params.get("ignoreCase"), Some("true"));
    }

    #[test]
    fn optional_fields_are_omitted() {
        let form = SearchForm {
            word: "run".into(),
            ..Default::default()
        };
        let params = form.validate().unwrap();
        assert_eq!(params.len(), 1);
    }
}
