//! JSON request files consumed by the `rendezvous` binary.

use std::path::Path;

use anyhow::{Context, Result};
use serde::Deserialize;
use serde_json::Value;

use crate::models::template::TemplateRef;

#[derive(Debug, Deserialize)]
pub struct PromptRequest {
    pub template: TemplateRef,
    #[serde(default)]
    pub user_data: Value,
    #[serde(default)]
    pub occasion: Option<String>,
}

pub fn load_prompt_request(path: &Path) -> Result<PromptRequest> {
    let raw = std::fs::read_to_string(path)
        .with_context(|| format!("Failed to read request file {}", path.display()))?;
    serde_json::from_str(&raw)
        .with_context(|| format!("Request file {} is not a valid prompt request", path.display()))
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;

    #[test]
    fn test_load_request_file() {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        write!(
            file,
            r#"{{
                "template": {{
                    "id": "6f1c2f9e-8b9a-4a53-9f0e-0d6c3f1b2a11",
                    "name": "Harbor walk",
                    "content": "Walk the harbor in {{{{location}}}}",
                    "template_type": "casual"
                }},
                "user_data": {{"location_city": "Bergen"}},
                "occasion": "anniversary"
            }}"#
        )
        .unwrap();

        let request = load_prompt_request(file.path()).unwrap();
        assert_eq!(request.template.name, "Harbor walk");
        assert_eq!(request.template.content, "Walk the harbor in {{location}}");
        assert_eq!(request.occasion.as_deref(), Some("anniversary"));
        assert_eq!(request.user_data["location_city"], "Bergen");
    }

    #[test]
    fn test_missing_user_data_defaults_to_null() {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        write!(
            file,
            r#"{{"template": {{"id": "6f1c2f9e-8b9a-4a53-9f0e-0d6c3f1b2a11", "name": "n", "content": "c", "template_type": "casual"}}}}"#
        )
        .unwrap();
        let request = load_prompt_request(file.path()).unwrap();
        assert!(request.user_data.is_null());
        assert!(request.occasion.is_none());
    }

    #[test]
    fn test_invalid_file_is_error() {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        write!(file, "not json").unwrap();
        let err = load_prompt_request(file.path()).unwrap_err();
        assert!(err.to_string().contains("not a valid prompt request"));
    }
}
