use actix_web::{Error, FutureResponse, HttpRequest, HttpResponse};
use actix_web::http::StatusCode;
use futures::Future;
use std::collections::HashMap;
use url::form_urlencoded;

use crate::app::{Coordinates, ForecastRequest, RequestKind, WeatherForecastManager};
use crate::app::forecast::Forecast;
use crate::app::provider::ProviderError;
use crate::app::provider::open_meteo::OpenMeteoProvider;
use crate::web::AppState;

pub mod on_current;
pub mod on_hourly;
pub mod on_daily;

pub const DEFAULT_COUNT: usize = 5;

const PARAMETER_ERROR_MESSAGE: &str = "Incorrect query parameters (lat, lon)";
const UPSTREAM_ERROR_MESSAGE: &str = "Could not get weather data";

#[derive(Debug, Serialize, Deserialize)]
pub struct ErrorResponse {
    pub error: String,
}

#[derive(Debug, Fail, PartialEq)]
pub enum ParameterError {
    #[fail(display = "Missing query parameter {}", name)]
    MissingParameter {
        name: String,
    },

    #[fail(display = "Invalid value \"{}\" for query parameter {}", value, name)]
    InvalidParameter {
        name: String,
        value: String,
    },
}

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ForecastParams {
    pub coordinates: Coordinates,
    pub count: usize,
}

impl ForecastParams {
    /// Binds `lat`, `lon` and, for sequence kinds, the optional `count` from a raw
    /// query string. A missing or non-positive `count` falls back to `DEFAULT_COUNT`.
    /// Repeated keys keep their first value.
    pub fn from_query(query: &str, kind: RequestKind) -> Result<Self, ParameterError> {
        let params = form_urlencoded::parse(query.as_bytes())
            .into_owned()
            .fold(HashMap::new(), |mut params, (key, value)| {
                params.entry(key).or_insert(value);
                params
            });

        let latitude = Self::required_float(&params, "lat")?;
        let longitude = Self::required_float(&params, "lon")?;
        let count = match kind {
            RequestKind::Current => DEFAULT_COUNT,
            RequestKind::Hourly | RequestKind::Daily => Self::optional_count(&params)?,
        };

        Ok(ForecastParams {
            coordinates: Coordinates { latitude, longitude },
            count,
        })
    }

    pub fn into_request(self, kind: RequestKind) -> ForecastRequest {
        ForecastRequest {
            coordinates: self.coordinates,
            kind,
            count: self.count,
        }
    }

    fn optional_count(params: &HashMap<String, String>) -> Result<usize, ParameterError> {
        match params.get("count") {
            None => Ok(DEFAULT_COUNT),
            Some(value) => match value.trim().parse::<i64>() {
                Ok(count) if count > 0 => Ok(count as usize),
                Ok(_) => Ok(DEFAULT_COUNT),
                Err(_) => Err(ParameterError::InvalidParameter {
                    name: String::from("count"),
                    value: value.clone(),
                }),
            },
        }
    }

    fn required_float(params: &HashMap<String, String>, name: &str) -> Result<f64, ParameterError> {
        let value = params.get(name).ok_or_else(|| ParameterError::MissingParameter { name: name.to_owned() })?;

        value.trim().parse::<f64>().map_err(|_| ParameterError::InvalidParameter {
            name: name.to_owned(),
            value: value.clone(),
        })
    }
}

fn error_response(status: StatusCode, message: &str) -> HttpResponse {
    HttpResponse::build(status).json(ErrorResponse { error: message.to_owned() })
}

/// Shared pipeline of the three endpoints: bind, fetch, normalize, respond.
pub fn respond_with_forecast(req: &HttpRequest<AppState>, kind: RequestKind) -> FutureResponse<HttpResponse> {
    let params = match ForecastParams::from_query(req.query_string(), kind) {
        Ok(params) => params,
        Err(e) => {
            warn!("Rejected {} request: {}", kind, e);
            return Box::new(futures::future::ok(error_response(StatusCode::UNPROCESSABLE_ENTITY, PARAMETER_ERROR_MESSAGE)));
        }
    };

    let settings = &req.state().settings;
    let manager = WeatherForecastManager::new(
        Box::new(OpenMeteoProvider::new(settings.forecast_uri.clone(), settings.upstream_timeout())),
    );

    Box::new(
        manager
            .get_forecast(params.into_request(kind))
            .then(move |result: Result<Forecast, ProviderError>| -> Result<HttpResponse, Error> {
                match result {
                    Ok(forecast) => Ok(HttpResponse::Ok().json(forecast)),
                    Err(e) => {
                        error!("Could not get {} forecast: {}", kind, e);
                        Ok(error_response(StatusCode::INTERNAL_SERVER_ERROR, UPSTREAM_ERROR_MESSAGE))
                    }
                }
            })
    )
}
