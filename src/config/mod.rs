// configuration module public api

pub mod types;
pub mod loading;

pub use types::*;
pub use loading::{load_configuration, validate_configuration};
