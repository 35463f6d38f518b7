use serde::{Deserialize, Serialize};

use crate::error::{ErrorKind, SubmitError};

/// Questionnaire answers. Every key is optional; `null` counts as absent.
#[derive(Debug, Default, Deserialize)]
#[serde(default)]
pub struct QuestionnaireInput {
    pub favorite_subject: Option<String>,
    pub hobbies: Option<String>,
    pub strengths: Option<String>,
    pub work_environment: Option<String>,
    pub work_style: Option<String>,
    pub salary_expectation: Option<String>,
    pub effort_willingness: Option<String>,
}

impl QuestionnaireInput {
    /// Parses a request body. Only a JSON object is accepted.
    pub fn from_body(body: &[u8]) -> Result<Self, SubmitError> {
        let text = std::str::from_utf8(body)?;
        let value: serde_json::Value = serde_json::from_str(text)?;
        if !value.is_object() {
            return Err(SubmitError::Parse(format!(
                "request body must be a JSON object, got {}",
                json_type_name(&value)
            )));
        }
        Ok(serde_json::from_value(value)?)
    }

    pub fn favorite_subject(&self) -> &str {
        self.favorite_subject.as_deref().unwrap_or_default()
    }

    pub fn hobbies(&self) -> &str {
        self.hobbies.as_deref().unwrap_or_default()
    }

    pub fn strengths(&self) -> &str {
        self.strengths.as_deref().unwrap_or_default()
    }

    pub fn work_environment(&self) -> &str {
        self.work_environment.as_deref().unwrap_or_default()
    }

    pub fn work_style(&self) -> &str {
        self.work_style.as_deref().unwrap_or_default()
    }

    pub fn salary_expectation(&self) -> &str {
        self.salary_expectation.as_deref().unwrap_or_default()
    }

    pub fn effort_willingness(&self) -> &str {
        self.effort_willingness.as_deref().unwrap_or_default()
    }
}

fn json_type_name(value: &serde_json::Value) -> &'static str {
    match value {
        serde_json::Value::Null => "null",
        serde_json::Value::Bool(_) => "a boolean",
        serde_json::Value::Number(_) => "a number",
        serde_json::Value::String(_) => "a string",
        serde_json::Value::Array(_) => "an array",
        serde_json::Value::Object(_) => "an object",
    }
}

#[derive(Debug, Serialize)]
pub struct SuccessEnvelope {
    pub success: bool,
    pub career_advice: String,
    pub timestamp: String,
}

#[derive(Debug, Serialize)]
pub struct FailureEnvelope {
    pub success: bool,
    pub error: String,
    pub error_kind: ErrorKind,
}

#[derive(Debug, Serialize)]
#[serde(untagged)]
pub enum ResponseEnvelope {
    Success(SuccessEnvelope),
    Failure(FailureEnvelope),
}

impl ResponseEnvelope {
    pub fn success(career_advice: String, timestamp: String) -> Self {
        Self::Success(SuccessEnvelope {
            success: true,
            career_advice,
            timestamp,
        })
    }

    pub fn failure(error: impl Into<String>, error_kind: ErrorKind) -> Self {
        Self::Failure(FailureEnvelope {
            success: false,
            error: error.into(),
            error_kind,
        })
    }
}

impl From<&SubmitError> for ResponseEnvelope {
    fn from(err: &SubmitError) -> Self {
        Self::failure(err.to_string(), err.kind())
    }
}
