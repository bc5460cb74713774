extern crate actix_web;
extern crate futures;
extern crate serde_json;
#[macro_use] extern crate serde_derive;
extern crate actix;
#[macro_use] extern crate failure;
extern crate url;
extern crate chrono;
extern crate bytes;
extern crate config;
#[macro_use] extern crate log;

pub mod web;
pub mod app;
pub mod settings;
