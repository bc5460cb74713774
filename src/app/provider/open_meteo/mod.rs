use futures::Future;
use actix_web::client;
use actix_web::client::ClientRequest;
use actix_web::Error;
use futures::future::err as fut_err;
use serde::de::DeserializeOwned;
use std::time::Duration;

use crate::app::{Coordinates, ForecastRequest, RawDay, RawForecastResponse, RawStep, RequestKind};
use crate::app::provider::{DecodeError, ProviderError, ProviderForecast, WeatherProvider};

use super::utils;


const STEP_PARAMS: &str = "temperature_80m,relative_humidity_2m,weather_code,wind_speed_80m,wind_direction_80m&wind_speed_unit=ms";
const DAILY_PARAMS: &str = "weather_code,temperature_2m_max,temperature_2m_min";

#[derive(Debug, Deserialize)]
struct CurrentResponse {
    current: OpenMeteoStep,
}

#[derive(Debug, Deserialize)]
struct HourlyResponse {
    hourly: OpenMeteoHourly,
}

#[derive(Debug, Deserialize)]
struct DailyResponse {
    daily: OpenMeteoDaily,
}

#[derive(Debug, Deserialize)]
struct OpenMeteoStep {
    time: String,
    relative_humidity_2m: i32,
    wind_direction_80m: f32,
    wind_speed_80m: f32,
    temperature_80m: f32,
    weather_code: i32,
}

impl From<OpenMeteoStep> for RawStep {
    fn from(step: OpenMeteoStep) -> Self {
        RawStep {
            time: step.time,
            humidity: step.relative_humidity_2m,
            wind_direction: step.wind_direction_80m,
            wind_speed: step.wind_speed_80m,
            temperature: step.temperature_80m,
            weather_code: step.weather_code,
        }
    }
}

#[derive(Debug, Deserialize)]
struct OpenMeteoHourly {
    time: Vec<String>,
    relative_humidity_2m: Vec<i32>,
    wind_direction_80m: Vec<f32>,
    wind_speed_80m: Vec<f32>,
    temperature_80m: Vec<f32>,
    weather_code: Vec<i32>,
}

impl OpenMeteoHourly {
    fn into_steps(self) -> Result<Vec<RawStep>, DecodeError> {
        let len = self.time.len();
        ensure_len("relative_humidity_2m", len, self.relative_humidity_2m.len())?;
        ensure_len("wind_direction_80m", len, self.wind_direction_80m.len())?;
        ensure_len("wind_speed_80m", len, self.wind_speed_80m.len())?;
        ensure_len("temperature_80m", len, self.temperature_80m.len())?;
        ensure_len("weather_code", len, self.weather_code.len())?;

        Ok(
            self.time
                .into_iter()
                .zip(self.relative_humidity_2m)
                .zip(self.wind_direction_80m)
                .zip(self.wind_speed_80m)
                .zip(self.temperature_80m)
                .zip(self.weather_code)
                .map(|(((((time, humidity), wind_direction), wind_speed), temperature), weather_code)| RawStep {
                    time,
                    humidity,
                    wind_direction,
                    wind_speed,
                    temperature,
                    weather_code,
                })
                .collect()
        )
    }
}

#[derive(Debug, Deserialize)]
struct OpenMeteoDaily {
    time: Vec<String>,
    temperature_2m_max: Vec<f32>,
    temperature_2m_min: Vec<f32>,
    weather_code: Vec<i32>,
}

impl OpenMeteoDaily {
    fn into_days(self) -> Result<Vec<RawDay>, DecodeError> {
        let len = self.time.len();
        ensure_len("temperature_2m_max", len, self.temperature_2m_max.len())?;
        ensure_len("temperature_2m_min", len, self.temperature_2m_min.len())?;
        ensure_len("weather_code", len, self.weather_code.len())?;

        Ok(
            self.time
                .into_iter()
                .zip(self.temperature_2m_max)
                .zip(self.temperature_2m_min)
                .zip(self.weather_code)
                .map(|(((date, temperature_max), temperature_min), weather_code)| RawDay {
                    date,
                    temperature_max,
                    temperature_min,
                    weather_code,
                })
                .collect()
        )
    }
}

fn ensure_len(field: &str, expected: usize, actual: usize) -> Result<(), DecodeError> {
    match expected == actual {
        true => Ok(()),
        _ => Err(DecodeError::LengthMismatch { field: field.to_owned(), expected, actual }),
    }
}

fn parse_body<T: DeserializeOwned>(body: &[u8]) -> Result<T, DecodeError> {
    serde_json::from_slice::<T>(body).map_err(|e| DecodeError::InvalidJson { reason: e.to_string() })
}

pub fn build_query(coordinates: Coordinates, kind: RequestKind, count: usize) -> String {
    let location = format!("latitude={:.2}&longitude={:.2}", coordinates.latitude, coordinates.longitude);

    match kind {
        RequestKind::Current => format!("{}&current={}", location, STEP_PARAMS),
        RequestKind::Hourly => format!("{}&hourly={}&forecast_days=1&forecast_hours={}", location, STEP_PARAMS, count),
        RequestKind::Daily => format!("{}&daily={}&forecast_days={}", location, DAILY_PARAMS, count),
    }
}

pub fn decode(body: &[u8], kind: RequestKind) -> Result<RawForecastResponse, DecodeError> {
    match kind {
        RequestKind::Current => parse_body::<CurrentResponse>(body)
            .map(|response| RawForecastResponse::Current(response.current.into())),
        RequestKind::Hourly => parse_body::<HourlyResponse>(body)
            .and_then(|response| response.hourly.into_steps())
            .map(RawForecastResponse::Hourly),
        RequestKind::Daily => parse_body::<DailyResponse>(body)
            .and_then(|response| response.daily.into_days())
            .map(RawForecastResponse::Daily),
    }
}

pub struct OpenMeteoProvider {
    base_uri: String,
    timeout: Duration,
}

impl OpenMeteoProvider {
    pub const BASE_URI: &'static str = "https://api.open-meteo.com/v1/forecast";
    const NAME: &'static str = "Open-Meteo";

    pub fn new(base_uri: String, timeout: Duration) -> Self {
        OpenMeteoProvider {
            base_uri,
            timeout,
        }
    }

    fn build_forecast_url(&self, request: &ForecastRequest) -> String {
        format!("{}?{}", self.base_uri, build_query(request.coordinates, request.kind, request.count))
    }

    fn build_request(&self, url: &str) -> Result<ClientRequest, Error> {
        client::get(url).finish()
    }
}

impl WeatherProvider for OpenMeteoProvider {
    fn get_forecast(&self, request: &ForecastRequest) -> Box<ProviderForecast> {
        let url = self.build_forecast_url(request);
        debug!("Sending {} request to {}: {}", request.kind, Self::NAME, url);

        let open_meteo_request = match self.build_request(&url) {
            Ok(req) => req,
            Err(e) => return Box::new(fut_err(ProviderError::NetworkError {
                reason: e.to_string(),
            })),
        };

        let kind = request.kind;
        Box::new(
            utils::fetch_body(open_meteo_request, self.timeout)
                .and_then(move |body| decode(&body, kind).map_err(ProviderError::from))
        )
    }
}
