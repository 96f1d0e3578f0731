//! Mapping failed submissions onto a form

use serde::Serialize;
use std::collections::BTreeMap;

use crate::error::CoreError;

const GENERIC_FAILURE: &str = "Request failed. Please try again.";

/// What a form shows after a failed submit: messages under individual
/// fields, or one general message above the form.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct FormErrors {
    pub general: Option<String>,
    pub fields: BTreeMap<String, String>,
}

impl FormErrors {
    pub fn general(message: impl Into<String>) -> Self {
        Self {
            general: Some(message.into()),
            fields: BTreeMap::new(),
        }
    }

    pub fn from_error(error: &CoreError) -> Self {
        match error {
            CoreError::Validation(fields) => Self {
                general: None,
                fields: fields
                    .iter()
                    .map(|(field, message)| (field.to_string(), message.to_string()))
                    .collect(),
            },
            CoreError::Api(api) => match api.field_errors() {
                Some(fields) => Self {
                    general: None,
                    fields: fields
                        .iter()
                        .map(|(field, messages)| (field.clone(), messages.join(" ")))
                        .collect(),
                },
                None => Self::general(non_empty_or_generic(api.to_string())),
            },
            other => Self::general(non_empty_or_generic(other.to_string())),
        }
    }

    pub fn field(&self, name: &str) -> Option<&str> {
        self.fields.get(name).map(String::as_str)
    }

    pub fn is_empty(&self) -> bool {
        self.general.is_none() && self.fields.is_empty()
    }

    /// Editing a field removes its message
    pub fn clear_field(&mut self, name: &str) {
        self.fields.remove(name);
    }
}

impl From<&CoreError> for FormErrors {
    fn from(error: &CoreError) -> Self {
        Self::from_error(error)
    }
}

fn non_empty_or_generic(message: String) -> String {
    if message.trim().is_empty() {
        GENERIC_FAILURE.to_string()
    } else {
        message
    }
}
