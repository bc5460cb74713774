use chrono::{DateTime, Utc};
use crate::app::{RawDay, RawForecastResponse, RawStep};
use crate::app::provider::DecodeError;
use crate::app::timestamp;
use crate::app::wmo;

pub const WIND_SPEED_UNIT: &str = "m/s";

#[derive(Debug, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "PascalCase")]
pub struct WindData {
    pub direction: f32,
    pub speed: f32,
    pub speed_unit: String,
}

#[derive(Debug, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "PascalCase")]
pub struct WeatherData {
    pub time: DateTime<Utc>,
    pub humidity: i32,
    pub description: String,
    pub wind_data: WindData,
    pub temperature: i32,
}

impl WeatherData {
    fn from_raw(step: RawStep) -> Result<Self, DecodeError> {
        Ok(WeatherData {
            time: timestamp::parse_date_hour(&step.time)?,
            humidity: step.humidity,
            description: wmo::classify(step.weather_code),
            wind_data: WindData {
                direction: step.wind_direction,
                speed: step.wind_speed,
                speed_unit: WIND_SPEED_UNIT.to_owned(),
            },
            temperature: step.temperature as i32,
        })
    }
}

#[derive(Debug, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "PascalCase")]
pub struct DailyWeatherData {
    pub date: DateTime<Utc>,
    pub temperature_max: i32,
    pub temperature_min: i32,
    pub description: String,
}

impl DailyWeatherData {
    fn from_raw(day: RawDay) -> Result<Self, DecodeError> {
        Ok(DailyWeatherData {
            date: timestamp::parse_date_only(&day.date)?,
            temperature_max: day.temperature_max as i32,
            temperature_min: day.temperature_min as i32,
            description: wmo::classify(day.weather_code),
        })
    }
}

/// Client facing forecast. Serialized as a bare object for `Current`
/// and as a bare array otherwise.
#[derive(Debug, Serialize, PartialEq)]
#[serde(untagged)]
pub enum Forecast {
    Current(WeatherData),
    Hourly(Vec<WeatherData>),
    Daily(Vec<DailyWeatherData>),
}

/// Builds exactly `count` records for sequence responses; `count` is ignored for `Current`.
pub fn normalize(raw: RawForecastResponse, count: usize) -> Result<Forecast, DecodeError> {
    match raw {
        RawForecastResponse::Current(step) => WeatherData::from_raw(step).map(Forecast::Current),
        RawForecastResponse::Hourly(steps) => take_exactly(steps, count)?
            .into_iter()
            .map(WeatherData::from_raw)
            .collect::<Result<Vec<_>, _>>()
            .map(Forecast::Hourly),
        RawForecastResponse::Daily(days) => take_exactly(days, count)?
            .into_iter()
            .map(DailyWeatherData::from_raw)
            .collect::<Result<Vec<_>, _>>()
            .map(Forecast::Daily),
    }
}

fn take_exactly<T>(mut items: Vec<T>, count: usize) -> Result<Vec<T>, DecodeError> {
    if items.len() < count {
        return Err(DecodeError::TooShort { expected: count, actual: items.len() });
    }

    items.truncate(count);
    Ok(items)
}
