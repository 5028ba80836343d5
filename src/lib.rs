pub mod app;
pub mod config;
pub mod handlers;
pub mod metrics;
pub mod models;
pub mod openapi;
pub mod services;
pub mod utils;
