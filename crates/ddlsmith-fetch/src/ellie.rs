use std::time::Duration;

use async_trait::async_trait;
use reqwest::{Client, StatusCode};
use tracing::info;

use crate::error::FetchError;
use crate::source::ModelSource;

/// Environment slug used when none is configured.
pub const DEFAULT_ENVIRONMENT: &str = "templates";

const REQUEST_TIMEOUT: Duration = Duration::from_secs(30);

/// Fetches a model from the Ellie.ai REST API.
#[derive(Debug, Clone)]
pub struct EllieApiSource {
    model_id: String,
    token: String,
    environment: String,
    base_url: Option<String>,
}

impl EllieApiSource {
    pub fn new(
        model_id: impl Into<String>,
        token: impl Into<String>,
        environment: impl Into<String>,
    ) -> Self {
        Self {
            model_id: model_id.into(),
            token: token.into(),
            environment: environment.into(),
            base_url: None,
        }
    }

    /// Replace `https://<environment>.ellie.ai` with another origin.
    pub fn with_base_url(mut self, base_url: impl Into<String>) -> Self {
        self.base_url = Some(base_url.into());
        self
    }

    pub fn model_id(&self) -> &str {
        &self.model_id
    }

    /// Endpoint for the configured model.
    pub fn model_url(&self) -> Result<String, FetchError> {
        let model_id = self.model_id.trim();
        if model_id.is_empty() || !model_id.chars().all(|c| c.is_ascii_alphanumeric() || c == '-') {
            return Err(FetchError::InvalidRequest(format!(
                "invalid model id '{}'",
                self.model_id
            )));
        }

        let origin = match &self.base_url {
            Some(base) => base.trim_end_matches('/').to_string(),
            None => {
                validate_environment(&self.environment)?;
                format!("https://{}.ellie.ai", self.environment)
            }
        };

        Ok(format!("{origin}/api/v1/models/{model_id}"))
    }
}

fn validate_environment(environment: &str) -> Result<(), FetchError> {
    let valid = !environment.is_empty()
        && !environment.starts_with('-')
        && !environment.ends_with('-')
        && environment
            .chars()
            .all(|c| c.is_ascii_lowercase() || c.is_ascii_digit() || c == '-');
    if valid {
        Ok(())
    } else {
        Err(FetchError::InvalidRequest(format!(
            "invalid environment slug '{environment}'"
        )))
    }
}

/// Map a non-success HTTP status to an error.
pub fn classify_status(status: StatusCode, model_id: &str, body: String) -> FetchError {
    match status {
        StatusCode::UNAUTHORIZED | StatusCode::FORBIDDEN => FetchError::Unauthorized {
            status: status.as_u16(),
        },
        StatusCode::NOT_FOUND => FetchError::NotFound {
            model_id: model_id.to_string(),
        },
        _ => FetchError::Status {
            status: status.as_u16(),
            body,
        },
    }
}

#[async_trait]
impl ModelSource for EllieApiSource {
    fn kind(&self) -> &'static str {
        "ellie"
    }

    fn describe(&self) -> String {
        format!("ellie model {} ({})", self.model_id, self.environment)
    }

    async fn fetch(&self) -> Result<String, FetchError> {
        if self.token.trim().is_empty() {
            return Err(FetchError::InvalidRequest("missing API token".to_string()));
        }
        let url = self.model_url()?;

        let http = Client::builder().timeout(REQUEST_TIMEOUT).build()?;
        let response = http.get(&url).bearer_auth(&self.token).send().await?;
        let status = response.status();
        let body = response.text().await?;

        if !status.is_success() {
            return Err(classify_status(status, &self.model_id, body));
        }

        info!(
            event = "model_fetched",
            model_id = %self.model_id,
            environment = %self.environment,
            bytes = body.len(),
            "model fetched"
        );
        Ok(body)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn builds_environment_url() {
        let source = EllieApiSource::new("173", "secret", DEFAULT_ENVIRONMENT);
        assert_eq!(
            source.model_url().expect("url"),
            "https://templates.ellie.ai/api/v1/models/173"
        );
        assert_eq!(source.kind(), "ellie");
        assert!(!source.describe().contains("secret"));
    }

    #[test]
    fn base_url_override_skips_environment() {
        let source = EllieApiSource::new(" 42 ", "t", "Not A Slug")
            .with_base_url("http://127.0.0.1:8080/");
        assert_eq!(
            source.model_url().expect("url"),
            "http://127.0.0.1:8080/api/v1/models/42"
        );
    }

    #[test]
    fn rejects_bad_identifiers() {
        let bad_env = EllieApiSource::new("1", "t", "evil.com/x");
        assert!(matches!(bad_env.model_url(), Err(FetchError::InvalidRequest(_))));

        let bad_id = EllieApiSource::new("1/../2", "t", "app");
        assert!(matches!(bad_id.model_url(), Err(FetchError::InvalidRequest(_))));

        let empty_id = EllieApiSource::new("", "t", "app");
        assert!(empty_id.model_url().is_err());
    }

    #[test]
    fn classifies_error_statuses() {
        assert!(matches!(
            classify_status(StatusCode::UNAUTHORIZED, "1", String::new()),
            FetchError::Unauthorized { status: 401 }
        ));
        assert!(matches!(
            classify_status(StatusCode::FORBIDDEN, "1", String::new()),
            FetchError::Unauthorized { status: 403 }
        ));
        assert!(matches!(
            classify_status(StatusCode::NOT_FOUND, "9", String::new()),
            FetchError::NotFound { model_id } if model_id == "9"
        ));
        let err = classify_status(StatusCode::BAD_GATEWAY, "1", "upstream down".to_string());
        assert_eq!(err.to_string(), "API request failed with status 502: upstream down");
    }

    #[tokio::test]
    async fn missing_token_fails_before_any_request() {
        let source = EllieApiSource::new("1", "  ", "app");
        let err = source.fetch().await.unwrap_err();
        assert!(matches!(err, FetchError::InvalidRequest(_)));
    }
}
