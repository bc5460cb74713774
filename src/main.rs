extern crate actix_web;
extern crate env_logger;
extern crate failure;
#[macro_use] extern crate log;
extern crate weather_gateway;

use actix_web::server;
use env_logger::Env;
use std::sync::Arc;
use weather_gateway::settings::Settings;
use weather_gateway::web;

fn main() -> Result<(), failure::Error> {
    env_logger::Builder::from_env(Env::default().default_filter_or("weather_gateway=info,actix_web=info")).init();

    let settings = Arc::new(Settings::load(Settings::DEFAULT_PATH)?);
    let bind_address = settings.bind_address.clone();

    info!("Serving forecasts from {} on {}", settings.forecast_uri, bind_address);

    server::new(move || web::create_app(settings.clone()))
        .bind(bind_address.as_str())?
        .run();

    Ok(())
}
