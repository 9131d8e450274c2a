//! Test utilities
//!
//! [`TestApp`] runs the whole app over in-memory storage with a fixed date,
//! driven by key strings (`app.press("ctrl+c")`). Key parsing and rendering
//! come from [`tui_dispatch::testing`].

use chrono::NaiveDate;
use tui_dispatch::testing::{char_key, key, RenderHarness};
use tui_dispatch::EventKind;
use viec_core::{MemoryStorage, Storage, TodoStore};

use crate::action::AppAction;
use crate::keymap;
use crate::middleware::{AppStore, SessionStats};
use crate::reducer::reducer;
use crate::state::AppState;
use crate::ui::TodoUi;

/// Full app over in-memory storage with a fixed date
pub struct TestApp {
    pub store: AppStore,
    pub ui: TodoUi,
}

impl TestApp {
    pub fn new(today: NaiveDate) -> Self {
        Self::with_storage(MemoryStorage::new(), today)
    }

    pub fn with_storage(storage: MemoryStorage, today: NaiveDate) -> Self {
        let storage: Box<dyn Storage> = Box::new(storage);
        let store = TodoStore::load(storage)
            .unwrap_or_else(|e| panic!("failed to load store: {e}"));
        Self {
            store: AppStore::new(
                AppState::new(store, today),
                reducer,
                SessionStats::default(),
            ),
            ui: TodoUi::new(keymap::defaults()),
        }
    }

    pub fn state(&self) -> &AppState {
        self.store.state()
    }

    /// Feed an event through the UI and dispatch what it produced
    pub fn send(&mut self, event: EventKind) -> Vec<AppAction> {
        let actions = self.ui.map_event(&event, self.store.state());
        for action in &actions {
            self.store.dispatch(action.clone());
        }
        actions
    }

    /// Press a key given as a binding string
    pub fn press(&mut self, key_str: &str) -> Vec<AppAction> {
        self.send(EventKind::Key(key(key_str)))
    }

    /// Type each character of `text`
    pub fn type_text(&mut self, text: &str) {
        for c in text.chars() {
            self.send(EventKind::Key(char_key(c)));
        }
    }

    /// Render the whole screen; every row ends with a newline
    pub fn render(&mut self, width: u16, height: u16) -> String {
        let mut harness = RenderHarness::new(width, height);
        let (ui, store) = (&mut self.ui, &self.store);
        harness.render_to_string_plain(|frame| ui.render(frame, store.state()))
    }
}
