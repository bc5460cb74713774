#![cfg(test)]

use actix_web::{http, test, HttpMessage, HttpRequest, HttpResponse};
use std::collections::HashMap;
use std::sync::Arc;
use std::sync::atomic::{AtomicUsize, Ordering};
use url::form_urlencoded;

use crate::app::forecast::{DailyWeatherData, WeatherData};
use crate::settings::Settings;
use crate::web;
use crate::web::action::ErrorResponse;

/// Answers like Open-Meteo would, sized by `forecast_hours` / `forecast_days`.
fn open_meteo_body(query: &str) -> String {
    let params: HashMap<String, String> = form_urlencoded::parse(query.as_bytes()).into_owned().collect();
    let count = |name: &str| params.get(name).map(|v| v.parse::<usize>().unwrap()).unwrap_or(0);

    let body = if params.contains_key("current") {
        serde_json::json!({
            "latitude": 56.16,
            "longitude": 10.22,
            "current": {
                "time": "2024-05-01T14:00",
                "interval": 900,
                "temperature_80m": 12.7,
                "relative_humidity_2m": 71,
                "weather_code": 3,
                "wind_speed_80m": 6.4,
                "wind_direction_80m": 245.0
            }
        })
    } else if params.contains_key("hourly") {
        let hours = count("forecast_hours");
        serde_json::json!({
            "hourly": {
                "time": (0..hours).map(|h| format!("2024-05-01T{:02}:00", h)).collect::<Vec<_>>(),
                "temperature_80m": (0..hours).map(|h| h as f64 + 0.5).collect::<Vec<_>>(),
                "relative_humidity_2m": (0..hours).map(|h| 50 + h).collect::<Vec<_>>(),
                "weather_code": (0..hours).map(|_| 61).collect::<Vec<_>>(),
                "wind_speed_80m": (0..hours).map(|_| 5.0).collect::<Vec<_>>(),
                "wind_direction_80m": (0..hours).map(|_| 90.0).collect::<Vec<_>>()
            }
        })
    } else {
        let days = count("forecast_days");
        serde_json::json!({
            "daily": {
                "time": (0..days).map(|d| format!("2024-05-{:02}", d + 1)).collect::<Vec<_>>(),
                "weather_code": (0..days).map(|_| 95).collect::<Vec<_>>(),
                "temperature_2m_max": (0..days).map(|d| 20.9 - d as f64).collect::<Vec<_>>(),
                "temperature_2m_min": (0..days).map(|d| -0.5 - d as f64).collect::<Vec<_>>()
            }
        })
    };

    body.to_string()
}

fn create_upstream(calls: Arc<AtomicUsize>) -> test::TestServer {
    test::TestServer::new(move |app| {
        let calls = calls.clone();
        app.handler(move |req: &HttpRequest| {
            calls.fetch_add(1, Ordering::SeqCst);
            HttpResponse::Ok()
                .content_type("application/json")
                .body(open_meteo_body(req.query_string()))
        });
    })
}

fn create_upstream_with(status: http::StatusCode, body: &'static str) -> test::TestServer {
    test::TestServer::new(move |app| {
        app.handler(move |_: &HttpRequest| {
            HttpResponse::build(status)
                .content_type("application/json")
                .body(body)
        });
    })
}

fn create_oversized_upstream() -> test::TestServer {
    test::TestServer::new(|app| {
        app.handler(|_: &HttpRequest| {
            let padding = " ".repeat(2 * 1024 * 1024);
            HttpResponse::Ok()
                .content_type("application/json")
                .body(format!("{{\"current\": {{}}{}}}", padding))
        });
    })
}

fn create_gateway(forecast_uri: String) -> test::TestServer {
    let settings = Arc::new(Settings {
        bind_address: String::from("127.0.0.1:0"),
        forecast_uri,
        upstream_timeout_secs: 5,
    });

    test::TestServer::with_factory(move || web::create_app(settings.clone()))
}

fn get(srv: &mut test::TestServer, path: &str) -> (http::StatusCode, String) {
    let request = srv.client(http::Method::GET, path).finish().unwrap();
    let response = srv.execute(request.send()).unwrap();

    let body_bytes = srv.execute(response.body()).unwrap();

    (response.status(), ::std::str::from_utf8(&body_bytes).unwrap().to_owned())
}

fn assert_error_body(as_string: &str, message: &str) {
    let json: ErrorResponse = serde_json::from_str::<ErrorResponse>(as_string).unwrap();

    assert_eq!(json.error, message);
}

#[test]
fn test_on_hourly_defaults_to_five_records() {
    let calls = Arc::new(AtomicUsize::new(0));
    let upstream = create_upstream(calls.clone());
    let mut srv = create_gateway(upstream.url("/"));

    let (status, body) = get(&mut srv, "/WeatherForecast/hourly?lat=56.15&lon=10.21");

    assert!(status.is_success());
    let records: Vec<WeatherData> = serde_json::from_str(&body).unwrap();
    assert_eq!(records.len(), 5);
    assert_eq!(records[0].time, "2024-05-01T00:00:00Z".parse::<chrono::DateTime<chrono::Utc>>().unwrap());
    assert_eq!(records[4].humidity, 54);
    assert_eq!(records[4].temperature, 4);
    assert_eq!(records[4].description, "Light Rain");
    assert_eq!(records[4].wind_data.speed_unit, "m/s");
    assert_eq!(calls.load(Ordering::SeqCst), 1);
}

#[test]
fn test_on_hourly_respects_count() {
    let upstream = create_upstream(Arc::new(AtomicUsize::new(0)));
    let mut srv = create_gateway(upstream.url("/"));

    let (status, body) = get(&mut srv, "/WeatherForecast/hourly?lat=56.15&lon=10.21&count=12");

    assert!(status.is_success());
    assert_eq!(serde_json::from_str::<Vec<WeatherData>>(&body).unwrap().len(), 12);
}

#[test]
fn test_on_current_returns_single_record() {
    let upstream = create_upstream(Arc::new(AtomicUsize::new(0)));
    let mut srv = create_gateway(upstream.url("/"));

    let (status, body) = get(&mut srv, "/WeatherForecast/current?lat=56.15&lon=10.21");

    assert!(status.is_success());
    let record: WeatherData = serde_json::from_str(&body).unwrap();
    assert_eq!(record.humidity, 71);
    assert_eq!(record.temperature, 12);
    assert_eq!(record.description, "Partly Cloudy");
    assert_eq!(record.wind_data.direction, 245.0);
    assert_eq!(record.wind_data.speed_unit, "m/s");
}

#[test]
fn test_on_current_ignores_count() {
    let calls = Arc::new(AtomicUsize::new(0));
    let upstream = create_upstream(calls.clone());
    let mut srv = create_gateway(upstream.url("/"));

    let (status, body) = get(&mut srv, "/WeatherForecast/current?lat=56.15&lon=10.21&count=abc");

    assert!(status.is_success());
    assert_eq!(serde_json::from_str::<WeatherData>(&body).unwrap().humidity, 71);
    assert_eq!(calls.load(Ordering::SeqCst), 1);
}

#[test]
fn test_repeated_coordinates_bind_first_value() {
    let calls = Arc::new(AtomicUsize::new(0));
    let upstream = create_upstream(calls.clone());
    let mut srv = create_gateway(upstream.url("/"));

    let (status, _) = get(&mut srv, "/WeatherForecast/current?lat=abc&lat=1&lon=2");
    assert_eq!(status, http::StatusCode::UNPROCESSABLE_ENTITY);
    assert_eq!(calls.load(Ordering::SeqCst), 0);

    let (status, _) = get(&mut srv, "/WeatherForecast/current?lat=1&lat=abc&lon=2");
    assert!(status.is_success());
    assert_eq!(calls.load(Ordering::SeqCst), 1);
}

#[test]
fn test_on_daily_replaces_non_positive_count() {
    let upstream = create_upstream(Arc::new(AtomicUsize::new(0)));
    let mut srv = create_gateway(upstream.url("/"));

    let (status, body) = get(&mut srv, "/WeatherForecast/daily?lat=56.15&lon=10.21&count=0");

    assert!(status.is_success());
    let days: Vec<DailyWeatherData> = serde_json::from_str(&body).unwrap();
    assert_eq!(days.len(), 5);
    assert_eq!(days[0].temperature_max, 20);
    assert_eq!(days[0].temperature_min, 0);
    assert_eq!(days[1].temperature_min, -1);
    assert_eq!(days[4].description, "Thunderstorm");
}

#[test]
fn test_invalid_coordinates_never_reach_upstream() {
    let calls = Arc::new(AtomicUsize::new(0));
    let upstream = create_upstream(calls.clone());
    let mut srv = create_gateway(upstream.url("/"));

    let (status, body) = get(&mut srv, "/WeatherForecast/hourly?lat=abc&lon=10.21");
    assert_eq!(status, http::StatusCode::UNPROCESSABLE_ENTITY);
    assert_error_body(&body, "Incorrect query parameters (lat, lon)");

    let (status, _) = get(&mut srv, "/WeatherForecast/current?lat=56.15");
    assert_eq!(status, http::StatusCode::UNPROCESSABLE_ENTITY);

    let (status, _) = get(&mut srv, "/WeatherForecast/daily?lat=56.15&lon=10.21&count=few");
    assert_eq!(status, http::StatusCode::UNPROCESSABLE_ENTITY);

    assert_eq!(calls.load(Ordering::SeqCst), 0);
}

#[test]
fn test_upstream_failure_is_hidden_behind_server_error() {
    let upstream = create_upstream_with(http::StatusCode::BAD_GATEWAY, r#"{"error": true, "reason": "overloaded"}"#);
    let mut srv = create_gateway(upstream.url("/"));

    let (status, body) = get(&mut srv, "/WeatherForecast/current?lat=56.15&lon=10.21");

    assert_eq!(status, http::StatusCode::INTERNAL_SERVER_ERROR);
    assert_error_body(&body, "Could not get weather data");
}

#[test]
fn test_short_upstream_response_is_server_error() {
    let upstream = create_upstream_with(
        http::StatusCode::OK,
        r#"{"daily": {"time": ["2024-05-01"], "weather_code": [0], "temperature_2m_max": [1.0], "temperature_2m_min": [0.0]}}"#,
    );
    let mut srv = create_gateway(upstream.url("/"));

    let (status, body) = get(&mut srv, "/WeatherForecast/daily?lat=56.15&lon=10.21&count=2");

    assert_eq!(status, http::StatusCode::INTERNAL_SERVER_ERROR);
    assert_error_body(&body, "Could not get weather data");
}

#[test]
fn test_unreachable_upstream_is_server_error() {
    let mut srv = create_gateway(String::from("http://127.0.0.1:1/v1/forecast"));

    let (status, body) = get(&mut srv, "/WeatherForecast/hourly?lat=56.15&lon=10.21&count=2");

    assert_eq!(status, http::StatusCode::INTERNAL_SERVER_ERROR);
    assert_error_body(&body, "Could not get weather data");
}

#[test]
fn test_oversized_upstream_body_is_server_error() {
    let upstream = create_oversized_upstream();
    let mut srv = create_gateway(upstream.url("/"));

    let (status, body) = get(&mut srv, "/WeatherForecast/current?lat=56.15&lon=10.21");

    assert_eq!(status, http::StatusCode::INTERNAL_SERVER_ERROR);
    assert_error_body(&body, "Could not get weather data");
}
