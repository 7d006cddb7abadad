pub mod error;
pub mod http;
pub mod model;
pub mod seed;
pub mod services;
pub mod store;
