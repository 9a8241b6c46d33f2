//! Concrete adapter implementations for ports.

pub mod csv_catalogue_adapter;
pub mod file_config_adapter;
