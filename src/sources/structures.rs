//! Overpass structure-density adapter
//!
//! Counts residential buildings within a fixed radius using an Overpass
//! `out count;` query, which answers with a single aggregate element.

use crate::constants::structures::{RADIUS_METERS, RESIDENTIAL_TAGS};
use crate::coord::Coordinates;
use crate::sources::{fetch_json, SourceKind, SourceResult, StructureSource, Unavailable};
use serde::Deserialize;
use std::collections::HashMap;
use tracing::{debug, warn};

/// Overpass JSON envelope
#[derive(Debug, Deserialize)]
struct OverpassResponse {
    #[serde(default)]
    elements: Vec<OverpassElement>,
}

#[derive(Debug, Deserialize)]
struct OverpassElement {
    #[serde(rename = "type")]
    kind: String,
    #[serde(default)]
    tags: HashMap<String, serde_json::Value>,
}

/// Structure adapter backed by the Overpass API
#[derive(Debug, Clone)]
pub struct OverpassStructures {
    client: reqwest::Client,
    url: String,
}

impl OverpassStructures {
    pub fn new(client: reqwest::Client, url: impl Into<String>) -> Self {
        Self {
            client,
            url: url.into(),
        }
    }

    /// Build the Overpass QL count query for a coordinate
    fn query(at: Coordinates) -> String {
        let filter = format!(
            "[\"building\"~\"^({})$\"](around:{},{},{})",
            RESIDENTIAL_TAGS, RADIUS_METERS, at.lat, at.lng
        );
        format!("[out:json][timeout:25];(way{f};node{f};relation{f};);out count;", f = filter)
    }

    /// Pull the aggregate total out of a count response
    ///
    /// Overpass reports counts as strings; a plain number is accepted too.
    /// Anything else means the response is unusable.
    fn total(response: OverpassResponse) -> SourceResult<u64> {
        let malformed = |reason: &str| Unavailable::new(SourceKind::Structures, reason);

        let element = response
            .elements
            .into_iter()
            .find(|e| e.kind == "count")
            .ok_or_else(|| malformed("no count element"))?;

        match element.tags.get("total") {
            Some(serde_json::Value::String(s)) => s
                .trim()
                .parse::<u64>()
                .map_err(|_| malformed("non-numeric total")),
            Some(serde_json::Value::Number(n)) => n.as_u64().ok_or_else(|| malformed("non-integer total")),
            _ => Err(malformed("missing total")),
        }
    }
}

impl StructureSource for OverpassStructures {
    async fn house_count(&self, at: Coordinates) -> SourceResult<u64> {
        debug!(%at, radius_m = RADIUS_METERS, "requesting structure count");

        let body = format!("data={}", urlencoding::encode(&Self::query(at)));
        let request = self
            .client
            .post(&self.url)
            .header(reqwest::header::CONTENT_TYPE, "application/x-www-form-urlencoded")
            .body(body);

        let result = fetch_json::<OverpassResponse>(request, SourceKind::Structures)
            .await
            .and_then(Self::total);

        if let Err(e) = &result {
            warn!(%at, error = %e, "structure lookup failed");
        }
        result
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::testing::{dead_url, spawn_stub, structures_body};
    use axum::{routing::post, Json, Router};

    fn parse(body: serde_json::Value) -> SourceResult<u64> {
        OverpassStructures::total(serde_json::from_value(body).unwrap())
    }

    #[test]
    fn test_query_shape() {
        let query = OverpassStructures::query(Coordinates::new(51.5, -0.12));
        assert!(query.starts_with("[out:json]"));
        assert!(query.contains("around:500,51.5,-0.12"));
        assert!(query.ends_with("out count;"));
    }

    #[test]
    fn test_total_from_string() {
        assert_eq!(parse(structures_body("123")).unwrap(), 123);
    }

    #[test]
    fn test_total_from_number() {
        let body = serde_json::json!({
            "elements": [{"type": "count", "id": 0, "tags": {"total": 7}}]
        });
        assert_eq!(parse(body).unwrap(), 7);
    }

    #[test]
    fn test_non_numeric_total_is_unavailable() {
        assert!(parse(structures_body("lots")).is_err());
    }

    #[test]
    fn test_missing_count_element_is_unavailable() {
        let body = serde_json::json!({"elements": []});
        assert!(parse(body).is_err());

        let body = serde_json::json!({"version": 0.6});
        assert!(parse(body).is_err());
    }

    #[test]
    fn test_missing_total_tag_is_unavailable() {
        let body = serde_json::json!({
            "elements": [{"type": "count", "id": 0, "tags": {"ways": "4"}}]
        });
        assert!(parse(body).is_err());
    }

    #[tokio::test]
    async fn test_house_count_over_http() {
        let app = Router::new().route(
            "/api/interpreter",
            post(|body: String| async move {
                assert!(body.starts_with("data="));
                Json(structures_body("42"))
            }),
        );
        let base = spawn_stub(app).await;
        let adapter = OverpassStructures::new(reqwest::Client::new(), format!("{}/api/interpreter", base));

        assert_eq!(adapter.house_count(Coordinates::new(1.0, 2.0)).await.unwrap(), 42);
    }

    #[tokio::test]
    async fn test_house_count_transport_failure() {
        let adapter = OverpassStructures::new(reqwest::Client::new(), dead_url().await);
        let err = adapter.house_count(Coordinates::new(1.0, 2.0)).await.unwrap_err();
        assert_eq!(err.kind, SourceKind::Structures);
    }
}
