//! Todo and project collections with write-through persistence
//!
//! Every successful mutation serializes the affected collection and writes it
//! to storage before returning. If the write fails, the in-memory collection
//! already holds the intended value and the error is returned; the next
//! mutation rewrites the whole collection again.

use chrono::{DateTime, Utc};
use serde::de::DeserializeOwned;
use serde::Serialize;

use crate::error::{Error, Result};
use crate::model::{default_projects, Project, Todo, TodoDraft, TodoId};
use crate::storage::{Storage, PROJECTS_KEY, THEME_KEY, TODOS_KEY};

/// Source of "now" for timestamps
pub type Clock = fn() -> DateTime<Utc>;

/// The todo store
///
/// # Example
/// ```
/// use viec_core::{MemoryStorage, TodoDraft, TodoStore};
///
/// let mut store = TodoStore::load(MemoryStorage::new()).unwrap();
/// let id = store.create(TodoDraft::new("Mua sữa")).unwrap().id.clone();
/// store.toggle_complete(&id).unwrap();
/// assert!(store.todo(&id).unwrap().completed);
/// ```
pub struct TodoStore<S> {
    storage: S,
    todos: Vec<Todo>,
    projects: Vec<Project>,
    dark_theme: bool,
    /// No todos entry existed when loading
    fresh: bool,
    clock: Clock,
}

impl<S: Storage> TodoStore<S> {
    /// Read all entries from storage, falling back to defaults for missing
    /// or unreadable ones
    pub fn load(storage: S) -> Result<Self> {
        let raw_todos = storage.get(TODOS_KEY)?;
        let fresh = raw_todos.is_none();

        let mut todos: Vec<Todo> = decode_or(TODOS_KEY, raw_todos, Vec::new);
        let adjusted = todos
            .iter_mut()
            .map(|t| t.normalize())
            .filter(|&changed| changed)
            .count();
        if adjusted > 0 {
            tracing::debug!(adjusted, "Normalized completion timestamps");
        }

        let projects: Vec<Project> =
            decode_or(PROJECTS_KEY, storage.get(PROJECTS_KEY)?, default_projects);

        let dark_theme = storage
            .get(THEME_KEY)?
            .map(|raw| raw.trim() == "true")
            .unwrap_or(false);

        tracing::info!(
            todos = todos.len(),
            projects = projects.len(),
            dark_theme,
            fresh,
            "Store loaded"
        );

        Ok(Self {
            storage,
            todos,
            projects,
            dark_theme,
            fresh,
            clock: Utc::now,
        })
    }

    /// Replace the clock used for `createdAt` / `completedAt`
    pub fn with_clock(mut self, clock: Clock) -> Self {
        self.clock = clock;
        self
    }

    /// Seed initial todos on first run only. Returns `true` if seeded.
    pub fn seed_if_fresh(&mut self, todos: Vec<Todo>) -> Result<bool> {
        if !self.fresh {
            return Ok(false);
        }
        self.fresh = false;
        self.todos = todos;
        self.persist_todos()?;
        tracing::info!(count = self.todos.len(), "Seeded sample todos");
        Ok(true)
    }

    // ===== Reads =====

    /// All todos in creation order
    pub fn todos(&self) -> &[Todo] {
        &self.todos
    }

    pub fn projects(&self) -> &[Project] {
        &self.projects
    }

    pub fn todo(&self, id: &TodoId) -> Option<&Todo> {
        self.todos.iter().find(|t| t.id == *id)
    }

    pub fn project(&self, id: &str) -> Option<&Project> {
        self.projects.iter().find(|p| p.id == id)
    }

    pub fn dark_theme(&self) -> bool {
        self.dark_theme
    }

    pub fn storage(&self) -> &S {
        &self.storage
    }

    pub fn now(&self) -> DateTime<Utc> {
        (self.clock)()
    }

    // ===== Todo mutations =====

    /// Append a new todo built from `draft`
    pub fn create(&mut self, draft: TodoDraft) -> Result<&Todo> {
        let draft = draft.normalized();
        if draft.title.is_empty() {
            return Err(Error::EmptyTitle);
        }

        let todo = Todo::from_draft(draft, self.now());
        tracing::debug!(id = %todo.id, title = %todo.title, "Todo created");
        self.todos.push(todo);
        self.persist_todos()?;

        let idx = self.todos.len() - 1;
        Ok(&self.todos[idx])
    }

    /// Overwrite the editable fields of an existing todo
    pub fn update(&mut self, id: &TodoId, draft: TodoDraft) -> Result<&Todo> {
        let draft = draft.normalized();
        if draft.title.is_empty() {
            return Err(Error::EmptyTitle);
        }
        let idx = self.index_of(id)?;

        self.todos[idx].apply_draft(draft);
        tracing::debug!(%id, "Todo updated");
        self.persist_todos()?;
        Ok(&self.todos[idx])
    }

    /// Remove a todo. Returns `false` without writing if it did not exist.
    pub fn delete(&mut self, id: &TodoId) -> Result<bool> {
        let Ok(idx) = self.index_of(id) else {
            tracing::debug!(%id, "Delete of missing todo ignored");
            return Ok(false);
        };

        self.todos.remove(idx);
        tracing::debug!(%id, "Todo deleted");
        self.persist_todos()?;
        Ok(true)
    }

    /// Flip completion, stamping or clearing `completed_at`
    pub fn toggle_complete(&mut self, id: &TodoId) -> Result<&Todo> {
        let idx = self.index_of(id)?;
        let now = self.now();

        let todo = &mut self.todos[idx];
        todo.completed = !todo.completed;
        todo.completed_at = todo.completed.then_some(now);
        tracing::debug!(%id, completed = todo.completed, "Todo toggled");

        self.persist_todos()?;
        Ok(&self.todos[idx])
    }

    // ===== Project mutations =====

    /// Append a user project; its id is derived from the name
    pub fn create_project(&mut self, name: &str, color: &str) -> Result<&Project> {
        if name.trim().is_empty() {
            return Err(Error::EmptyProjectName);
        }

        let project = Project::user(name, color);
        if self.project(&project.id).is_some() {
            return Err(Error::ProjectExists(project.id));
        }

        tracing::debug!(id = %project.id, name = %project.name, "Project created");
        self.projects.push(project);
        self.persist_projects()?;

        let idx = self.projects.len() - 1;
        Ok(&self.projects[idx])
    }

    // ===== Preferences =====

    /// Flip and persist the theme flag, returning the new value
    pub fn toggle_theme(&mut self) -> Result<bool> {
        self.dark_theme = !self.dark_theme;
        let value = if self.dark_theme { "true" } else { "false" };
        self.storage.set(THEME_KEY, value)?;
        Ok(self.dark_theme)
    }

    // ===== Internals =====

    fn index_of(&self, id: &TodoId) -> Result<usize> {
        self.todos
            .iter()
            .position(|t| t.id == *id)
            .ok_or_else(|| Error::NotFound(id.clone()))
    }

    fn persist_todos(&mut self) -> Result<()> {
        self.fresh = false;
        write_json(&mut self.storage, TODOS_KEY, &self.todos)
    }

    fn persist_projects(&mut self) -> Result<()> {
        write_json(&mut self.storage, PROJECTS_KEY, &self.projects)
    }
}

fn write_json<S: Storage, T: Serialize + ?Sized>(
    storage: &mut S,
    key: &'static str,
    value: &T,
) -> Result<()> {
    let json = serde_json::to_string(value).map_err(|source| Error::Serialize { key, source })?;
    storage.set(key, &json)?;
    Ok(())
}

/// Decode a stored entry; a missing or unreadable one yields `fallback()`
fn decode_or<T: DeserializeOwned>(key: &str, raw: Option<String>, fallback: fn() -> T) -> T {
    let Some(raw) = raw else {
        return fallback();
    };
    match serde_json::from_str(&raw) {
        Ok(value) => value,
        Err(e) => {
            tracing::warn!(key, error = %e, "Unreadable entry, using defaults");
            fallback()
        }
    }
}
