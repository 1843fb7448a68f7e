// shared helpers

pub mod files;
pub mod urls;
