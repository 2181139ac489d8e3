pub mod types;
pub mod gtfs;
pub mod index;
pub mod schedule;
pub mod proxy;
pub mod config;
pub mod logger;
pub mod api;
