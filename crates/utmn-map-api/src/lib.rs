//! # UTMN Map API
//!
//! Access to the map backend. Everything the engine reads or mutates goes
//! through the [`MapDataSource`] trait; [`HttpMapClient`] talks to the real
//! service and [`InMemoryMapSource`] keeps a building in memory for tests and
//! offline demos.

pub mod http;
pub mod memory;
pub mod source;
pub mod wire;

pub use http::HttpMapClient;
pub use memory::{InMemoryMapSource, RecordedCall};
pub use source::MapDataSource;
pub use wire::{ObjectTypeInfo, SearchResult};
