pub mod builders;
pub mod config;
pub mod errors;
pub mod models;
pub mod queue;
pub mod repositories;
pub mod services;
pub mod utils;
