use self::provider::WeatherProvider;
use futures::Future;
use crate::app::provider::ProviderError;
use crate::app::forecast::Forecast;
use std::fmt;

pub mod provider;
pub mod forecast;
pub mod timestamp;
pub mod wmo;

pub type ForecastResponse = dyn Future<Item=Forecast, Error=ProviderError>;

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Coordinates {
    pub latitude: f64,
    pub longitude: f64,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RequestKind {
    Current,
    Hourly,
    Daily,
}

impl fmt::Display for RequestKind {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        let name = match self {
            RequestKind::Current => "current",
            RequestKind::Hourly => "hourly",
            RequestKind::Daily => "daily",
        };
        f.write_str(name)
    }
}

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ForecastRequest {
    pub coordinates: Coordinates,
    pub kind: RequestKind,
    /// Number of timesteps wanted, ignored for `RequestKind::Current`.
    pub count: usize,
}

/// One provider timestep, still carrying the provider's time string.
#[derive(Debug, Clone, PartialEq)]
pub struct RawStep {
    pub time: String,
    pub humidity: i32,
    pub wind_direction: f32,
    pub wind_speed: f32,
    pub temperature: f32,
    pub weather_code: i32,
}

#[derive(Debug, Clone, PartialEq)]
pub struct RawDay {
    pub date: String,
    pub temperature_max: f32,
    pub temperature_min: f32,
    pub weather_code: i32,
}

#[derive(Debug, Clone, PartialEq)]
pub enum RawForecastResponse {
    Current(RawStep),
    Hourly(Vec<RawStep>),
    Daily(Vec<RawDay>),
}

pub struct WeatherForecastManager {
    provider: Box<dyn WeatherProvider>
}

impl WeatherForecastManager {
    pub fn new(provider: Box<dyn WeatherProvider>) -> Self {
        WeatherForecastManager {
            provider
        }
    }

    pub fn get_forecast(&self, request: ForecastRequest) -> Box<ForecastResponse> {
        let count = request.count;

        Box::new(
            self
                .provider
                .get_forecast(&request)
                .and_then(move |raw| {
                    forecast::normalize(raw, count).map_err(ProviderError::from)
                })
        )
    }
}
