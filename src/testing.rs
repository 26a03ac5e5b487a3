//! Shared test fixtures: local provider stubs and canned response bodies

use axum::Router;
use tokio::net::TcpListener;

/// Serve a stub router on an ephemeral local port and return its base URL
pub async fn spawn_stub(app: Router) -> String {
    let listener = TcpListener::bind("127.0.0.1:0").await.unwrap();
    let addr = listener.local_addr().unwrap();
    tokio::spawn(async move {
        axum::serve(listener, app).await.unwrap();
    });
    format!("http://{}", addr)
}

/// A URL nothing is listening on
pub async fn dead_url() -> String {
    let listener = TcpListener::bind("127.0.0.1:0").await.unwrap();
    let addr = listener.local_addr().unwrap();
    drop(listener);
    format!("http://{}", addr)
}

/// Open-Meteo daily response with the expected units
pub fn climate_body(radiation: &[f64], wind: &[f64]) -> serde_json::Value {
    serde_json::json!({
        "latitude": 0.0,
        "longitude": 0.0,
        "daily_units": {
            "time": "iso8601",
            "shortwave_radiation_sum": "MJ/m²",
            "wind_speed_10m_max": "mp/h"
        },
        "daily": {
            "time": vec!["2026-01-01"; radiation.len()],
            "shortwave_radiation_sum": radiation,
            "wind_speed_10m_max": wind
        }
    })
}

/// Overpass `out count;` response
pub fn structures_body(total: &str) -> serde_json::Value {
    serde_json::json!({
        "version": 0.6,
        "elements": [{
            "type": "count",
            "id": 0,
            "tags": {"nodes": "0", "ways": total, "relations": "0", "total": total}
        }]
    })
}

/// Nominatim reverse response
pub fn region_body(country_code: &str) -> serde_json::Value {
    serde_json::json!({
        "place_id": 1,
        "display_name": "Somewhere",
        "address": {"country": "Somewhere", "country_code": country_code}
    })
}
