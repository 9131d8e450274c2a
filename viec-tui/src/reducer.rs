//! Reducer - every state transition of the app
//!
//! The store's reducer reports `changed` when the UI must re-render. Store
//! calls persist synchronously inside the reducer.
//! Validation and not-found failures leave state untouched and are only
//! logged; storage failures are logged as warnings and the in-memory change
//! stands.

use tui_dispatch::ReducerResult;
use viec_core::{Error, ProjectFilter, StatusFilter};

use crate::action::AppAction;
use crate::state::{AppState, Focus, FormField, Mode, ProjectForm, SidebarItem, TodoForm};

pub fn reducer(state: &mut AppState, action: AppAction) -> ReducerResult {
    if apply(state, action) {
        ReducerResult::changed()
    } else {
        ReducerResult::unchanged()
    }
}

/// Run `action` against `state`. Returns `true` if anything visible changed.
fn apply(state: &mut AppState, action: AppAction) -> bool {
    match action {
        // ===== Todo =====
        AppAction::TodoToggle(id) => {
            let result = state.store.toggle_complete(&id).map(|_| ());
            let changed = applied("toggle", result);
            state.clamp_cursors();
            changed
        }

        AppAction::TodoDeleteRequest(id) => {
            if state.store.todo(&id).is_none() {
                return false;
            }
            state.mode = Mode::ConfirmDelete(id);
            true
        }

        AppAction::TodoDelete(id) => delete(state, &id),

        // ===== Todo form =====
        AppAction::FormOpenNew => {
            state.form = TodoForm::blank(&state.default_form_project());
            state.mode = Mode::TodoForm;
            true
        }

        AppAction::FormOpenEdit(id) => {
            let Some(todo) = state.store.todo(&id) else {
                return false;
            };
            state.form = TodoForm::edit(todo);
            state.mode = Mode::TodoForm;
            true
        }

        AppAction::FormFieldChange(field, value) => {
            if state.mode != Mode::TodoForm || state.form.text(field) == value {
                return false;
            }
            state.form.set_text(field, value);
            true
        }

        AppAction::FormFocusNext => {
            state.form.field = state.form.field.next();
            true
        }

        AppAction::FormFocusPrev => {
            state.form.field = state.form.field.prev();
            true
        }

        AppAction::FormPriorityCycle => {
            state.form.priority = state.form.priority.next();
            true
        }

        AppAction::FormPriorityPrev => {
            state.form.priority = state.form.priority.prev();
            true
        }

        AppAction::FormProjectCycle => step_project(state, 1),

        AppAction::FormProjectPrev => step_project(state, -1),

        AppAction::FormSubmit => submit_form(state),

        AppAction::FormCancel => close(state, Mode::TodoForm),

        // ===== Project form =====
        AppAction::ProjectFormOpen => {
            state.project_form = ProjectForm::default();
            state.mode = Mode::ProjectForm;
            true
        }

        AppAction::ProjectNameChange(name) => {
            if state.project_form.name == name {
                return false;
            }
            state.project_form.name = name;
            true
        }

        AppAction::ProjectColorCycle => {
            state.project_form.color = state.project_form.color.wrapping_add(1);
            true
        }

        AppAction::ProjectSubmit => {
            let name = state.project_form.name.clone();
            let color = state.project_form.color();
            match state.store.create_project(&name, color) {
                Ok(project) => {
                    tracing::info!(id = %project.id, "Project added");
                }
                Err(Error::EmptyProjectName) => {
                    tracing::debug!("Ignoring project without a name");
                    return false;
                }
                Err(e) => {
                    report(&e);
                }
            }
            state.mode = Mode::Normal;
            true
        }

        AppAction::ProjectCancel => close(state, Mode::ProjectForm),

        // ===== Filters and sort =====
        AppAction::FilterProject(id) => {
            state.query.project = ProjectFilter::Only(id);
            reset_list(state);
            true
        }

        AppAction::FilterStatus(status) => {
            state.query.status = if state.query.status == status {
                StatusFilter::None
            } else {
                status
            };
            reset_list(state);
            true
        }

        AppAction::FilterReset => {
            if state.query.project == ProjectFilter::All && state.query.status == StatusFilter::None
            {
                return false;
            }
            state.query.project = ProjectFilter::All;
            state.query.status = StatusFilter::None;
            reset_list(state);
            true
        }

        AppAction::SortCycle => {
            state.query.sort = state.query.sort.next();
            true
        }

        AppAction::SortSet(sort) => {
            if state.query.sort == sort {
                return false;
            }
            state.query.sort = sort;
            true
        }

        // ===== Search =====
        AppAction::SearchStart => {
            state.mode = Mode::Search;
            true
        }

        AppAction::SearchChange(text) => set_search(state, text),

        AppAction::SearchClear => set_search(state, String::new()),

        AppAction::SearchClose => close(state, Mode::Search),

        AppAction::TagSelect(tag) => set_search(state, tag),

        // ===== Selection and focus =====
        AppAction::ListSelect(idx) => {
            let len = state.visible().len();
            select(&mut state.list_cursor, idx.min(len.saturating_sub(1)))
        }

        AppAction::ListSelectNext => {
            let len = state.visible().len();
            let next = (state.list_cursor + 1).min(len.saturating_sub(1));
            select(&mut state.list_cursor, next)
        }

        AppAction::ListSelectPrev => {
            let prev = state.list_cursor.saturating_sub(1);
            select(&mut state.list_cursor, prev)
        }

        AppAction::SidebarSelect(idx) => {
            let len = state.sidebar_items().len();
            select(&mut state.sidebar_cursor, idx.min(len.saturating_sub(1)))
        }

        AppAction::SidebarSelectNext => {
            let len = state.sidebar_items().len();
            let next = (state.sidebar_cursor + 1).min(len.saturating_sub(1));
            select(&mut state.sidebar_cursor, next)
        }

        AppAction::SidebarSelectPrev => {
            let prev = state.sidebar_cursor.saturating_sub(1);
            select(&mut state.sidebar_cursor, prev)
        }

        AppAction::SidebarActivate => {
            let Some(item) = state.sidebar_items().into_iter().nth(state.sidebar_cursor) else {
                return false;
            };
            let action = match item {
                SidebarItem::All => AppAction::FilterReset,
                SidebarItem::Project(id) => AppAction::FilterProject(id),
                SidebarItem::Status(status) => AppAction::FilterStatus(status),
                SidebarItem::Tag(tag) => AppAction::TagSelect(tag),
            };
            apply(state, action)
        }

        AppAction::FocusToggle => {
            state.focus = state.focus.toggle();
            true
        }

        // ===== Confirm dialog =====
        AppAction::ConfirmAccept => {
            let Mode::ConfirmDelete(id) = std::mem::take(&mut state.mode) else {
                return false;
            };
            delete(state, &id);
            true
        }

        AppAction::ConfirmCancel => {
            if !matches!(state.mode, Mode::ConfirmDelete(_)) {
                return false;
            }
            state.mode = Mode::Normal;
            true
        }

        // ===== UI =====
        AppAction::UiThemeToggle => {
            if let Err(e) = state.store.toggle_theme() {
                report(&e);
            }
            true
        }

        AppAction::UiTerminalResize(width, height) => {
            if state.terminal_size == (width, height) {
                return false;
            }
            state.terminal_size = (width, height);
            true
        }

        // ===== Global =====
        AppAction::Tick => {
            let today = (state.clock)();
            if today == state.today {
                return false;
            }
            tracing::info!(%today, "Date changed");
            state.today = today;
            state.clamp_cursors();
            true
        }

        // Handled by the main loop
        AppAction::Quit => false,
    }
}

/// Move the form's project `step` places through the project list, wrapping.
/// An unknown project starts from the first one.
fn step_project(state: &mut AppState, step: isize) -> bool {
    let projects = state.store.projects();
    if projects.is_empty() {
        return false;
    }
    let len = projects.len() as isize;
    let next = match projects.iter().position(|p| p.id == state.form.project) {
        Some(idx) => (idx as isize + step).rem_euclid(len) as usize,
        None => 0,
    };
    state.form.project = projects[next].id.clone();
    true
}

fn submit_form(state: &mut AppState) -> bool {
    let Some(draft) = state.form.to_draft() else {
        tracing::debug!(due_date = %state.form.due_date, "Rejecting malformed due date");
        state.form.field = FormField::DueDate;
        return true;
    };

    let result = match state.form.editing.clone() {
        Some(id) => state.store.update(&id, draft).map(|t| t.id.clone()),
        None => state.store.create(draft).map(|t| t.id.clone()),
    };

    match result {
        Ok(id) => {
            state.mode = Mode::Normal;
            state.focus = Focus::List;
            let position = state.visible().iter().position(|t| t.id == id);
            if let Some(idx) = position {
                state.list_cursor = idx;
            }
        }
        Err(Error::EmptyTitle) => {
            tracing::debug!("Rejecting todo without a title");
            state.form.field = FormField::Title;
        }
        Err(e) => {
            report(&e);
            state.mode = Mode::Normal;
        }
    }
    state.clamp_cursors();
    true
}

fn delete(state: &mut AppState, id: &viec_core::TodoId) -> bool {
    let changed = match state.store.delete(id) {
        Ok(removed) => removed,
        Err(e) => {
            report(&e);
            true
        }
    };
    state.clamp_cursors();
    changed
}

fn set_search(state: &mut AppState, text: String) -> bool {
    if state.query.search == text {
        return false;
    }
    state.query.search = text;
    state.list_cursor = 0;
    true
}

/// Leave `mode` if it is the current one
fn close(state: &mut AppState, mode: Mode) -> bool {
    if state.mode != mode {
        return false;
    }
    state.mode = Mode::Normal;
    true
}

fn reset_list(state: &mut AppState) {
    state.list_cursor = 0;
    state.clamp_cursors();
}

fn select(cursor: &mut usize, idx: usize) -> bool {
    if *cursor == idx {
        return false;
    }
    *cursor = idx;
    true
}

/// Outcome of a store call: `true` if the collection changed in memory
fn applied(op: &'static str, result: viec_core::Result<()>) -> bool {
    match result {
        Ok(()) => true,
        Err(e) => {
            tracing::debug!(op, "Store call failed");
            report(&e)
        }
    }
}

/// Log a store error. Returns `true` if the in-memory state still changed.
fn report(error: &Error) -> bool {
    if error.is_permissive() {
        tracing::debug!(%error, "Ignored");
        false
    } else {
        tracing::warn!(%error, "Persisting failed, keeping in-memory state");
        true
    }
}
