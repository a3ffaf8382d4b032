//! Concurrent traversal over one shared store
//!
//! The store is moved into a single owner task for the length of a session;
//! workers send it requests and the owner hands the store back at the end.

pub mod actor;
pub mod coordinator;

pub use actor::{StoreActor, StoreHandle, StoreRequest};
pub use coordinator::{CoordinatorConfig, CoordinatorError, PruningOutcome, PruningTraversal};
