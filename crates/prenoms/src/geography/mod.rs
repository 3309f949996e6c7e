//! Department boundary reference (GeoJSON) joined with department totals by
//! the map. Fetched once at startup; see [`GeographyLoader`].

mod fetch;

pub use fetch::GeographyLoader;

use crate::dataset::Department;
use axum::body::Bytes;
use serde_json::Value;
use std::collections::BTreeSet;

/// Feature property holding the department code used for the join.
pub const FEATURE_ID_KEY: &str = "properties.code";

#[derive(Debug, thiserror::Error)]
pub enum ReferenceFetchError {
    #[error("geography request failed: {0}")]
    Http(#[from] reqwest::Error),
    #[error("geography reference returned HTTP {0}")]
    Status(u16),
    #[error("geography reference is not valid JSON: {0}")]
    Decode(#[from] serde_json::Error),
    #[error("geography reference is not a usable FeatureCollection: {0}")]
    InvalidDocument(String),
    #[error("geography cache {path} unusable: {source}")]
    Cache {
        path: String,
        #[source]
        source: std::io::Error,
    },
}

/// Validated GeoJSON document plus the department codes it covers.
#[derive(Debug, Clone)]
pub struct GeoReference {
    body: Bytes,
    codes: BTreeSet<String>,
}

impl GeoReference {
    pub fn from_bytes(body: impl Into<Bytes>) -> Result<Self, ReferenceFetchError> {
        let body = body.into();
        let document: Value = serde_json::from_slice(&body)?;

        if document.get("type").and_then(Value::as_str) != Some("FeatureCollection") {
            return Err(ReferenceFetchError::InvalidDocument(
                "top-level type must be FeatureCollection".to_string(),
            ));
        }

        let features = document
            .get("features")
            .and_then(Value::as_array)
            .ok_or_else(|| ReferenceFetchError::InvalidDocument("missing features array".to_string()))?;

        let codes: BTreeSet<String> = features
            .iter()
            .filter_map(|feature| feature.pointer("/properties/code"))
            .filter_map(|code| match code {
                Value::String(text) => Some(text.clone()),
                Value::Number(number) => Some(number.to_string()),
                _ => None,
            })
            .collect();

        if codes.is_empty() {
            return Err(ReferenceFetchError::InvalidDocument(format!(
                "no feature carries {FEATURE_ID_KEY}"
            )));
        }

        Ok(Self { body, codes })
    }

    /// Raw document, served to the browser unchanged.
    pub fn body(&self) -> Bytes {
        self.body.clone()
    }

    pub fn codes(&self) -> &BTreeSet<String> {
        &self.codes
    }

    pub fn covers(&self, department: &Department) -> bool {
        self.codes.contains(department.as_str())
    }

    /// Departments that have no boundary feature and cannot be drawn.
    pub fn unmatched<'a, I>(&self, departments: I) -> Vec<&'a Department>
    where
        I: IntoIterator<Item = &'a Department>,
    {
        departments
            .into_iter()
            .filter(|department| !self.covers(department))
            .collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const SAMPLE: &str = r#"{
        "type": "FeatureCollection",
        "features": [
            {"type": "Feature", "properties": {"code": "75", "nom": "Paris"}, "geometry": null},
            {"type": "Feature", "properties": {"code": "2A", "nom": "Corse-du-Sud"}, "geometry": null}
        ]
    }"#;

    #[test]
    fn collects_department_codes() {
        let reference = GeoReference::from_bytes(SAMPLE).expect("valid document");
        let codes: Vec<&str> = reference.codes().iter().map(String::as_str).collect();
        assert_eq!(codes, vec!["2A", "75"]);
        assert_eq!(reference.body(), Bytes::from(SAMPLE));
    }

    #[test]
    fn reports_unmatched_departments() {
        let reference = GeoReference::from_bytes(SAMPLE).expect("valid document");
        let departments: Vec<Department> = ["75", "13", "2A"]
            .iter()
            .filter_map(|code| Department::parse(code))
            .collect();
        let unmatched: Vec<&str> = reference
            .unmatched(&departments)
            .into_iter()
            .map(Department::as_str)
            .collect();
        assert_eq!(unmatched, vec!["13"]);
    }

    #[test]
    fn rejects_non_collections() {
        let error = GeoReference::from_bytes(r#"{"type": "Feature"}"#).expect_err("rejected");
        assert!(matches!(error, ReferenceFetchError::InvalidDocument(_)));

        let error = GeoReference::from_bytes("not json").expect_err("rejected");
        assert!(matches!(error, ReferenceFetchError::Decode(_)));

        let error = GeoReference::from_bytes(r#"{"type": "FeatureCollection", "features": []}"#)
            .expect_err("rejected");
        assert!(matches!(error, ReferenceFetchError::InvalidDocument(_)));
    }
}
