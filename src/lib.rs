pub mod api;
pub mod config;
pub mod exchange;
pub mod keystore;
pub mod service;
pub mod stats;
