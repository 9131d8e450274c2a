//! Core of the `viec` todo tracker
//!
//! This crate owns the data and the rules; it knows nothing about terminals.
//!
//! # Core Concepts
//!
//! - **TodoStore**: owns the todo and project collections and writes them
//!   through to a [`Storage`] backend after every mutation
//! - **Storage**: whole-value key-value persistence (files or memory)
//! - **View pipeline**: pure filter / search / sort over the collection,
//!   plus sidebar counts and the tag index
//! - **Collation**: Vietnamese dictionary order for sorting by name
//!
//! # Basic Example
//!
//! ```
//! use viec_core::prelude::*;
//!
//! let mut store = TodoStore::load(MemoryStorage::new()).unwrap();
//! store
//!     .create(TodoDraft::new("Mua rau").project("shopping").priority(Priority::High))
//!     .unwrap();
//!
//! let today = chrono::NaiveDate::from_ymd_opt(2024, 6, 15).unwrap();
//! let query = ViewQuery {
//!     project: ProjectFilter::Only("shopping".into()),
//!     ..Default::default()
//! };
//! let visible = view::apply(store.todos(), &query, today);
//! assert_eq!(visible.len(), 1);
//! ```

pub mod collate;
pub mod error;
pub mod model;
pub mod samples;
pub mod storage;
pub mod store;
pub mod view;

pub use error::{Error, Result, StorageError};
pub use model::{
    default_projects, parse_due_date, parse_tags, project_id_from_name, Priority, Project, Todo,
    TodoDraft, TodoId,
};
pub use samples::sample_todos;
pub use storage::{FileStorage, MemoryStorage, Storage};
pub use store::{Clock, TodoStore};
pub use view::{
    Counts, DueLabel, ProjectFilter, SortMode, StatusFilter, ViewQuery, ALL_TODOS_TITLE,
};

/// Prelude module for convenient imports
pub mod prelude {
    pub use crate::model::{Priority, Project, Todo, TodoDraft, TodoId};
    pub use crate::storage::{FileStorage, MemoryStorage, Storage};
    pub use crate::store::TodoStore;
    pub use crate::view::{self, Counts, DueLabel, ProjectFilter, SortMode, StatusFilter, ViewQuery};
}
