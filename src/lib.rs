pub mod access_error;
pub mod adapters;
pub mod app_config;
pub mod cached_loader;
pub mod commands;
pub mod entities;
pub mod graphql;
pub mod loaders;
pub mod password;
pub mod ports;
pub mod seed;
pub mod server;
mod shareable_error;
pub use shareable_error::ShareableError;
pub mod token;

#[cfg(test)]
mod test_support;
