//! HTTP implementation of the data source.

mod client;
mod paths;

pub use client::HttpMapClient;
