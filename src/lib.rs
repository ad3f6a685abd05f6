pub mod api;
pub mod cli;
pub mod components;
pub mod config;
pub mod models;
pub mod storage;
pub mod web;


pub use api::ApiClient;
pub use config::Config;
