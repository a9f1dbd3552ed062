use serde::Serialize;

use crate::cli::GeneratorKind;
use crate::error::SqlGenError;

/// Outcome of one generation call, serialised as `{success, generatedSQL}` or
/// `{success, message}`.
#[derive(Debug, Serialize, PartialEq, Eq)]
pub struct GenerationResponse {
    pub success: bool,
    #[serde(rename = "generatedSQL", skip_serializing_if = "Option::is_none")]
    pub generated_sql: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub message: Option<String>,
}

impl GenerationResponse {
    pub fn success(script: String) -> Self {
        Self {
            success: true,
            generated_sql: Some(script),
            message: None,
        }
    }

    /// Validation failures are reported as-is; everything else is prefixed
    /// with the generator that failed.
    pub fn failure(kind: Option<GeneratorKind>, err: &SqlGenError) -> Self {
        let message = match (kind, err) {
            (_, SqlGenError::MissingConnectionString | SqlGenError::UnknownGenerator(_)) => {
                err.to_string()
            }
            (Some(kind), _) => format!("Error generating {}: {err}", kind.label()),
            (None, _) => err.to_string(),
        };
        Self {
            success: false,
            generated_sql: None,
            message: Some(message),
        }
    }

    pub fn to_json(&self) -> Result<String, SqlGenError> {
        Ok(serde_json::to_string(self)?)
    }

    pub fn from_result(kind: Option<GeneratorKind>, result: Result<String, SqlGenError>) -> Self {
        match result {
            Ok(script) => Self::success(script),
            Err(err) => Self::failure(kind, &err),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_success_envelope() {
        let response = GenerationResponse::success("GO\n".to_string());
        assert_eq!(
            serde_json::to_value(&response).unwrap(),
            json!({"success": true, "generatedSQL": "GO\n"})
        );
    }

    #[test]
    fn test_missing_connection_envelope() {
        let response = GenerationResponse::failure(
            Some(GeneratorKind::Views),
            &SqlGenError::MissingConnectionString,
        );
        assert_eq!(
            serde_json::to_value(&response).unwrap(),
            json!({"success": false, "message": "Connection string is required."})
        );
    }

    #[test]
    fn test_generation_failure_names_generator() {
        let err = SqlGenError::Connection("TCP connection to db:1433 failed".to_string());
        let response = GenerationResponse::from_result(Some(GeneratorKind::Views), Err(err));
        assert_eq!(
            response.message.as_deref(),
            Some("Error generating views: Connection error: TCP connection to db:1433 failed")
        );

        let err = SqlGenError::Metadata("columns of Orders".to_string());
        let response = GenerationResponse::failure(Some(GeneratorKind::Procedures), &err);
        assert_eq!(
            response.message.as_deref(),
            Some("Error generating procedures: Metadata error: columns of Orders")
        );
    }
}
