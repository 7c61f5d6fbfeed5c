pub mod config;
pub mod error;
pub mod types;

pub use config::LifeConfig;
pub use error::{LifeError, Result};
pub use types::{Cell, Dimensions, Generation};
