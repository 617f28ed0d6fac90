//! Spatial sample store implementations.
//!
//! Both implementations satisfy [`wifi_surveyor_core::SampleStore`]:
//! - [`JsonSampleStore`]: JSON documents on disk, the production backing.
//! - [`MemorySampleStore`]: in-memory, for tests and embedders.

pub mod json_store;
pub mod memory;

pub use json_store::JsonSampleStore;
pub use memory::MemorySampleStore;
