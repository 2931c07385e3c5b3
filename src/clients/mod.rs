//! Type-safe wrappers around [`ResourceClient`](crate::framework::ResourceClient).

pub mod actor_client;
pub mod catalog_client;
pub mod table_client;

pub use actor_client::ActorClient;
pub use catalog_client::*;
pub use table_client::*;
