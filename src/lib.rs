// desa-upload: image and document upload adapter for the village website back office

pub mod commands;
pub mod config;
pub mod upload;
pub mod utils;
