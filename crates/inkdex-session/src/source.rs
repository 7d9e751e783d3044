//! Record sources - where a session gets its directory data

use std::fmt;

use async_trait::async_trait;
use inkdex_core::{Artist, Catalog, Studio, Style};
use serde::{Deserialize, Serialize};

use crate::Result;

/// RFC 9457 problem details, as returned by the directory API on failure
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ProblemDetails {
    #[serde(rename = "type", default = "ProblemDetails::default_type")]
    pub problem_type: String,

    pub title: String,

    pub status: u16,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub detail: Option<String>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub instance: Option<String>,
}

impl ProblemDetails {
    pub fn new(status: u16, title: impl Into<String>) -> Self {
        Self {
            problem_type: Self::default_type(),
            title: title.into(),
            status,
            detail: None,
            instance: None,
        }
    }

    pub fn with_detail(mut self, detail: impl Into<String>) -> Self {
        self.detail = Some(detail.into());
        self
    }

    fn default_type() -> String {
        "about:blank".to_string()
    }
}

impl fmt::Display for ProblemDetails {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} ({})", self.title, self.status)?;
        if let Some(detail) = &self.detail {
            write!(f, ": {}", detail)?;
        }
        Ok(())
    }
}

/// Supplier of already-deserialized records
///
/// The session treats this as a black box: an HTTP client, a fixture set
/// or a file all look the same from here.
#[async_trait]
pub trait RecordSource: Send + Sync {
    async fn artists(&self) -> Result<Vec<Artist>>;

    async fn studios(&self) -> Result<Vec<Studio>>;

    async fn styles(&self) -> Result<Vec<Style>>;

    /// Everything at once
    async fn catalog(&self) -> Result<Catalog> {
        Ok(Catalog::new(
            self.artists().await?,
            self.studios().await?,
            self.styles().await?,
        ))
    }
}

#[async_trait]
impl RecordSource for Catalog {
    async fn artists(&self) -> Result<Vec<Artist>> {
        Ok(self.artists.clone())
    }

    async fn studios(&self) -> Result<Vec<Studio>> {
        Ok(self.studios.clone())
    }

    async fn styles(&self) -> Result<Vec<Style>> {
        Ok(self.styles.clone())
    }

    async fn catalog(&self) -> Result<Catalog> {
        Ok(self.clone())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::SessionError;
    use inkdex_core::fixtures::sample_catalog;

    #[test]
    fn test_problem_details_wire_format() {
        let json = r#"{"type":"https://api.example/problems/rate-limit","title":"Too Many Requests","status":429,"detail":"Retry in 30s"}"#;
        let problem: ProblemDetails = serde_json::from_str(json).unwrap();
        assert_eq!(problem.status, 429);
        assert_eq!(problem.to_string(), "Too Many Requests (429): Retry in 30s");

        let minimal: ProblemDetails = serde_json::from_str(r#"{"title":"Oops","status":500}"#).unwrap();
        assert_eq!(minimal.problem_type, "about:blank");
        assert!(minimal.instance.is_none());
    }

    #[test]
    fn test_problem_converts_to_session_error() {
        let err: SessionError = ProblemDetails::new(503, "Service Unavailable").into();
        assert_eq!(err.to_string(), "Upstream error: Service Unavailable (503)");

        let err: SessionError = ProblemDetails::new(502, "Bad Gateway")
            .with_detail("directory backend unreachable")
            .into();
        assert_eq!(err.to_string(), "Upstream error: Bad Gateway (502): directory backend unreachable");
    }

    #[tokio::test]
    async fn test_catalog_is_a_source() {
        let catalog = sample_catalog();
        let fetched = RecordSource::catalog(&catalog).await.unwrap();
        assert_eq!(fetched.len(), catalog.len());
        assert_eq!(catalog.artists().await.unwrap().len(), 8);
    }
}
