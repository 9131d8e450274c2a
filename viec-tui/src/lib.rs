//! Terminal front end of the `viec` todo tracker
//!
//! Every change flows one way:
//!
//! 1. a terminal event is mapped to [`AppAction`]s by the [`TodoUi`]
//!    (keymap first, then the focused component)
//! 2. actions are dispatched to the [`AppStore`], whose reducer updates
//!    [`AppState`] and writes through to storage
//! 3. if the reducer reports a change, the UI is rendered from the new state
//!
//! # Example
//!
//! ```
//! use viec_tui::prelude::*;
//!
//! let mut app = TestApp::new(chrono::NaiveDate::from_ymd_opt(2024, 6, 15).unwrap());
//! app.press("n");
//! app.type_text("Mua rau");
//! app.press("enter");
//!
//! assert_eq!(app.state().store.todos()[0].title, "Mua rau");
//! ```

pub mod action;
pub mod components;
pub mod config;
pub mod keymap;
pub mod logging;
pub mod middleware;
pub mod reducer;
pub mod state;
pub mod testing;
pub mod theme;
pub mod ui;

pub use action::{AppAction, AppActionCategory};
pub use config::{Args, Config, ConfigError};
pub use keymap::{Command, KeyContext, Keybindings};
pub use middleware::{AppStore, SessionStats};
pub use reducer::reducer;
pub use state::{AppState, Focus, FormField, Mode};
pub use theme::Theme;
pub use ui::TodoUi;

/// Prelude for convenient imports
pub mod prelude {
    pub use crate::action::AppAction;
    pub use crate::keymap::{self, Command, KeyContext, Keybindings};
    pub use crate::middleware::{AppStore, SessionStats};
    pub use crate::reducer::reducer;
    pub use crate::state::{AppState, Focus, FormField, Mode};
    pub use crate::testing::TestApp;
    pub use crate::ui::TodoUi;
    pub use tui_dispatch::testing::{key, RenderHarness};
    pub use tui_dispatch::{Action, Component, EventKind};
}
