//! Create, update, delete and list handlers shared by every parent kind.
//!
//! - `list`: every parent with its current people; 404 when there are none.
//! - `save`: inserts a new parent; any id in the body is ignored.
//! - `update`: copies descriptive fields onto an existing parent.
//! - `delete`: releases the parent's people (cascade or edge removal,
//!   depending on ownership) and then deletes the parent.

pub mod delete;
pub mod list;
pub mod save;
pub mod update;

use crate::domain::Parent;
use crate::services::validation::Validate;
use serde::de::DeserializeOwned;
use serde::Serialize;

/// A parent kind that can be served over HTTP from the SQLite store.
pub trait ParentResource:
    Parent + Validate + Serialize + DeserializeOwned + Send + 'static
{
}

impl<P> ParentResource for P
where
    P: Parent + Validate + Serialize + DeserializeOwned + Send + 'static,
{
}
