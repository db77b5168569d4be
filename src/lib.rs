pub mod bootstrap;
pub mod models;
pub mod service;

pub use service::{Error, Service, ServiceBuilder, optimize_traffic};
