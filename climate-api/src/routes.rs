//! Route handlers. Each handler runs exactly one query.

use axum::{
    extract::{Path, State},
    response::Html,
    Json,
};
use climate_db::models::{Precipitation, StationInfo, TemperatureObservation, TemperatureStats};

use crate::error::ApiError;
use crate::params::{RangeParams, StartParams};
use crate::AppState;

pub const WELCOME: &str = "Available Routes:<br/>\
/api/v1.0/precipitation<br/>\
/api/v1.0/stations<br/>\
/api/v1.0/tobs<br/>\
/api/v1.0/temp/&lt;start&gt;<br/>\
/api/v1.0/temp/&lt;start&gt;/&lt;end&gt;<br/>";

/// List all available api routes.
pub async fn welcome() -> Html<&'static str> {
    Html(WELCOME)
}

/// Precipitation for the trailing year, oldest first.
pub async fn precipitation(
    State(state): State<AppState>,
) -> Result<Json<Vec<Precipitation>>, ApiError> {
    let since = state.window_start().to_owned();
    let rows = state.run(move |db| db.query_precipitation(&since)).await?;
    Ok(Json(rows))
}

pub async fn stations(State(state): State<AppState>) -> Result<Json<Vec<StationInfo>>, ApiError> {
    let rows = state.run(|db| db.query_stations()).await?;
    Ok(Json(rows))
}

/// Temperature observations for the trailing year, one per date.
pub async fn tobs(
    State(state): State<AppState>,
) -> Result<Json<Vec<TemperatureObservation>>, ApiError> {
    let since = state.window_start().to_owned();
    let rows = state.run(move |db| db.query_tobs(&since)).await?;
    Ok(Json(rows))
}

/// Temperature statistics from `start` onwards.
pub async fn temp_from(
    State(state): State<AppState>,
    Path(params): Path<StartParams>,
) -> Result<Json<Vec<TemperatureStats>>, ApiError> {
    let range = params.into_range(state.strict_dates())?;
    let stats = state
        .run(move |db| db.query_temperature_stats(&range))
        .await?;
    Ok(Json(vec![stats]))
}

/// Temperature statistics between `start` and `end`, both inclusive.
pub async fn temp_between(
    State(state): State<AppState>,
    Path(params): Path<RangeParams>,
) -> Result<Json<Vec<TemperatureStats>>, ApiError> {
    let range = params.into_range(state.strict_dates())?;
    let stats = state
        .run(move |db| db.query_temperature_stats(&range))
        .await?;
    Ok(Json(vec![stats]))
}

#[cfg(test)]
mod tests {
    use crate::test_support::*;
    use crate::ServerConfig;
    use axum::{
        body::{to_bytes, Body},
        http::{header, Request, StatusCode},
        Router,
    };
    use serde_json::{json, Value};
    use tower::ServiceExt;

    async fn get(app: Router, uri: &str) -> (StatusCode, Value) {
        let response = app
            .oneshot(Request::builder().uri(uri).body(Body::empty()).unwrap())
            .await
            .unwrap();
        let status = response.status();
        let bytes = to_bytes(response.into_body(), usize::MAX).await.unwrap();
        let body = if bytes.is_empty() {
            Value::Null
        } else {
            serde_json::from_slice(&bytes).unwrap()
        };
        (status, body)
    }

    #[tokio::test]
    async fn welcome_lists_routes() {
        let (_dir, app) = sample_app();
        let response = app
            .oneshot(Request::builder().uri("/").body(Body::empty()).unwrap())
            .await
            .unwrap();
        assert_eq!(response.status(), StatusCode::OK);
        let content_type = response.headers()[header::CONTENT_TYPE].to_str().unwrap();
        assert!(content_type.starts_with("text/html"));

        let bytes = to_bytes(response.into_body(), usize::MAX).await.unwrap();
        let text = String::from_utf8(bytes.to_vec()).unwrap();
        for route in [
            "/api/v1.0/precipitation",
            "/api/v1.0/stations",
            "/api/v1.0/tobs",
            "/api/v1.0/temp/",
        ] {
            assert!(text.contains(route), "missing {}", route);
        }
    }

    #[tokio::test]
    async fn precipitation_covers_trailing_year_only() {
        let (_dir, app) = sample_app();
        let (status, body) = get(app, "/api/v1.0/precipitation").await;
        assert_eq!(status, StatusCode::OK);

        let rows = body.as_array().unwrap();
        assert_eq!(rows.len(), 5);
        for row in rows {
            assert!(row["date"].as_str().unwrap() > "2016-08-23");
        }
        assert_eq!(rows[0]["date"], "2016-08-24");
        assert_eq!(rows[3], json!({"date": "2017-08-23", "prcp": null}));
    }

    #[tokio::test]
    async fn stations_returns_every_field() {
        let (_dir, app) = sample_app();
        let (status, body) = get(app, "/api/v1.0/stations").await;
        assert_eq!(status, StatusCode::OK);
        assert_eq!(
            body,
            json!([
                {
                    "station": "USC00513117",
                    "name": "KANEOHE 838.1, HI US",
                    "latitude": 21.4234,
                    "longitude": -157.8015,
                    "elevation": 14.6
                },
                {
                    "station": "USC00519397",
                    "name": "WAIKIKI 717.2, HI US",
                    "latitude": 21.2716,
                    "longitude": -157.8168,
                    "elevation": 3.0
                }
            ])
        );
    }

    #[tokio::test]
    async fn stations_on_empty_table_is_empty_list() {
        let (_dir, app) = app_with(
            "station,name,latitude,longitude,elevation\n",
            MEASUREMENTS_CSV,
            &ServerConfig::default(),
        );
        let (status, body) = get(app, "/api/v1.0/stations").await;
        assert_eq!(status, StatusCode::OK);
        assert_eq!(body, json!([]));
    }

    #[tokio::test]
    async fn tobs_dates_are_unique() {
        let (_dir, app) = sample_app();
        let (status, body) = get(app, "/api/v1.0/tobs").await;
        assert_eq!(status, StatusCode::OK);

        let rows = body.as_array().unwrap();
        let mut dates: Vec<&str> = rows.iter().map(|r| r["date"].as_str().unwrap()).collect();
        let total = dates.len();
        dates.sort();
        dates.dedup();
        assert_eq!(total, 4);
        assert_eq!(dates.len(), total);
        assert!(rows.iter().all(|r| r.get("station").is_some() && r.get("tobs").is_some()));
    }

    #[tokio::test]
    async fn temp_from_start_matches_example() {
        let (_dir, app) = app_with(
            STATIONS_CSV,
            "station,date,prcp,tobs\nUSC1,2017-08-20,,80.0\nUSC1,2017-08-25,,75.0\n",
            &ServerConfig::default(),
        );
        let (status, body) = get(app, "/api/v1.0/temp/2017-08-23").await;
        assert_eq!(status, StatusCode::OK);
        assert_eq!(
            body,
            json!([{"Minimum Temp": 75.0, "Maximum Temp": 75.0, "Average Temp": 75.0}])
        );
    }

    #[tokio::test]
    async fn temp_between_is_inclusive_and_ordered() {
        let (_dir, app) = sample_app();
        let (status, body) = get(app, "/api/v1.0/temp/2016-08-23/2016-08-24").await;
        assert_eq!(status, StatusCode::OK);

        let stats = &body.as_array().unwrap()[0];
        let min = stats["Minimum Temp"].as_f64().unwrap();
        let avg = stats["Average Temp"].as_f64().unwrap();
        let max = stats["Maximum Temp"].as_f64().unwrap();
        assert_eq!(min, 76.0);
        assert_eq!(max, 81.0);
        assert!((avg - 236.0 / 3.0).abs() < 1e-9);
        assert!(min <= avg && avg <= max);
    }

    #[tokio::test]
    async fn temp_after_last_date_is_single_null_record() {
        let (_dir, app) = sample_app();
        let (status, body) = get(app, "/api/v1.0/temp/2030-01-01").await;
        assert_eq!(status, StatusCode::OK);
        assert_eq!(
            body,
            json!([{"Minimum Temp": null, "Maximum Temp": null, "Average Temp": null}])
        );
    }

    #[tokio::test]
    async fn malformed_date_yields_nulls_by_default() {
        let (_dir, app) = sample_app();
        let (status, body) = get(app, "/api/v1.0/temp/yesterday/today").await;
        assert_eq!(status, StatusCode::OK);
        assert_eq!(body[0]["Average Temp"], Value::Null);
    }

    #[tokio::test]
    async fn malformed_date_is_rejected_in_strict_mode() {
        let config = ServerConfig {
            strict_dates: true,
            ..ServerConfig::default()
        };
        let (_dir, app) = app_with(STATIONS_CSV, MEASUREMENTS_CSV, &config);
        let (status, body) = get(app, "/api/v1.0/temp/yesterday").await;
        assert_eq!(status, StatusCode::BAD_REQUEST);
        assert!(body["error"].as_str().unwrap().contains("start"));
    }

    #[tokio::test]
    async fn strict_mode_still_answers_valid_dates() {
        let config = ServerConfig {
            strict_dates: true,
            ..ServerConfig::default()
        };
        let (_dir, app) = app_with(STATIONS_CSV, MEASUREMENTS_CSV, &config);
        let (status, body) = get(app, "/api/v1.0/temp/2017-08-20/2017-08-25").await;
        assert_eq!(status, StatusCode::OK);
        assert_eq!(body[0]["Minimum Temp"], json!(75.0));
        assert_eq!(body[0]["Maximum Temp"], json!(80.0));
    }

    #[tokio::test]
    async fn unknown_route_is_not_found() {
        let (_dir, app) = sample_app();
        let (status, _) = get(app, "/api/v1.0/humidity").await;
        assert_eq!(status, StatusCode::NOT_FOUND);
    }

    #[tokio::test]
    async fn missing_store_is_server_error() {
        let (dir, app) = sample_app();
        std::fs::remove_file(dir.path().join("climate.sqlite")).unwrap();
        let (status, body) = get(app, "/api/v1.0/stations").await;
        assert_eq!(status, StatusCode::INTERNAL_SERVER_ERROR);
        assert_eq!(body["error"], "internal server error");
    }
}
