use actix_web::{App, middleware};
use actix_web::http::Method;
use std::sync::Arc;

use crate::settings::Settings;

pub mod action;
mod test;

pub struct AppState {
    pub settings: Arc<Settings>,
}

pub fn create_app(settings: Arc<Settings>) -> App<AppState> {
    App::with_state(AppState { settings })
        .middleware(middleware::Logger::default())
        .resource("/WeatherForecast/current", |r| {
            r.method(Method::GET).a(action::on_current::handle);
        })
        .resource("/WeatherForecast/hourly", |r| {
            r.method(Method::GET).a(action::on_hourly::handle);
        })
        .resource("/WeatherForecast/daily", |r| {
            r.method(Method::GET).a(action::on_daily::handle);
        })
}
