pub mod client;
pub mod config;
pub mod deadline;
pub mod error;
pub mod exchange_rate;
pub mod server;
pub mod store;
pub mod upstream;

pub use error::{Error, Result};
