use crate::app::{ForecastRequest, RawForecastResponse};
use crate::app::timestamp::TimeFormatError;

pub mod open_meteo;
pub mod utils;

#[derive(Debug, Fail)]
pub enum ProviderError {
    #[fail(display = "Request error: {}", reason)]
    NetworkError {
        reason: String,
    },

    #[fail(display = "Provider responded with status {}", status)]
    UpstreamStatus {
        status: u16,
    },

    #[fail(display = "Invalid response: {}", _0)]
    Decode(#[cause] DecodeError),
}

#[derive(Debug, Fail, PartialEq)]
pub enum DecodeError {
    #[fail(display = "malformed body ({})", reason)]
    InvalidJson {
        reason: String,
    },

    #[fail(display = "field {} has {} entries, expected {}", field, actual, expected)]
    LengthMismatch {
        field: String,
        expected: usize,
        actual: usize,
    },

    #[fail(display = "{} timesteps returned, {} requested", actual, expected)]
    TooShort {
        expected: usize,
        actual: usize,
    },

    #[fail(display = "body exceeds {} bytes", limit)]
    BodyTooLarge {
        limit: usize,
    },

    #[fail(display = "{}", _0)]
    TimeFormat(#[cause] TimeFormatError),
}

impl From<DecodeError> for ProviderError {
    fn from(e: DecodeError) -> Self {
        ProviderError::Decode(e)
    }
}

impl From<TimeFormatError> for DecodeError {
    fn from(e: TimeFormatError) -> Self {
        DecodeError::TimeFormat(e)
    }
}

pub type ProviderForecast = dyn futures::Future<Item=RawForecastResponse, Error=ProviderError>;

pub trait WeatherProvider {
    fn get_forecast(&self, request: &ForecastRequest) -> Box<ProviderForecast>;
}
