//! Client-side state synchronization for sceneflow.
//!
//! A view holds one [`LiveCollection`] per record collection it shows.
//! The live collection runs an initial bulk fetch concurrently with a
//! change-stream subscription and folds both into a [`CollectionStore`],
//! converging on the server's state regardless of how the two interleave:
//!
//! - [`CollectionStore`] -- the ordered local mirror with its loading and
//!   error flags.
//! - [`EventSource`] -- where changes come from: an in-process store feed
//!   ([`FeedSource`]) or the gateway's WebSocket ([`WsSource`]).
//! - [`LiveCollection`] -- owns the sync task; dropping it tears the
//!   subscription down.
//! - [`ApiClient`] -- typed HTTP client for the gateway.

pub mod api;
pub mod collection;
pub mod error;
pub mod live;
pub mod source;

pub use api::ApiClient;
pub use collection::CollectionStore;
pub use error::ClientError;
pub use live::LiveCollection;
pub use source::{EventSource, FeedSource, Scope, WsSource};
