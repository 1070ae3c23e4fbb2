//! Record storage for the sceneflow platform.
//!
//! This crate provides the building blocks behind the gateway's
//! persistence seam:
//!
//! - [`models`] -- the character, scene, video, and credit record types
//!   with their insert/patch DTOs.
//! - [`Change`] / [`FeedEvent`] -- the mutation events every store
//!   implementation emits, one broadcast feed per collection.
//! - [`RecordStore`] -- the async facade the gateway and the job-system
//!   ingest surface program against.
//! - [`MemoryStore`] -- the in-process implementation used by the service
//!   and by tests.

pub mod change;
pub mod memory;
pub mod models;
pub mod store;

pub use change::{Change, Collection, FeedEvent, StoredRecord};
pub use memory::MemoryStore;
pub use store::{RecordStore, StoreError};
