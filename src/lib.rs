// Library exports for solmeta

pub mod config;
pub mod engine;
pub mod models;
pub mod services;
