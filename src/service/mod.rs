mod errors;
mod service;
mod service_builder;

pub use errors::Error;
pub use service::{Service, optimize_traffic};
pub use service_builder::ServiceBuilder;
