//! Dispatch middleware

use tui_dispatch::{Action, ActionCategory, Middleware, NoEffect, StoreWithMiddleware};

use crate::action::AppAction;
use crate::state::AppState;

/// The app's store: [`AppState`] behind the reducer, traced by [`SessionStats`]
pub type AppStore = StoreWithMiddleware<AppState, AppAction, NoEffect, SessionStats>;

/// Traces every action and keeps dispatch counts for the session summary
#[derive(Debug, Clone, Default)]
pub struct SessionStats {
    /// Actions seen
    pub dispatched: u64,
    /// Actions that changed state
    pub changed: u64,
}

impl<S, A: ActionCategory> Middleware<S, A> for SessionStats {
    fn before(&mut self, action: &A, _state: &S) -> bool {
        self.dispatched += 1;
        tracing::trace!(action = %action.name(), "Dispatching action");
        true
    }

    fn after(&mut self, action: &A, state_changed: bool, _state: &S) -> Vec<A> {
        if state_changed {
            self.changed += 1;
        }
        tracing::debug!(
            action = %action.name(),
            category = action.category().unwrap_or("global"),
            state_changed,
            "Action processed"
        );
        Vec::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tui_dispatch::ReducerResult;

    #[derive(Default)]
    struct Ticks {
        count: u32,
    }

    fn tick_reducer(state: &mut Ticks, action: AppAction) -> ReducerResult {
        match action {
            AppAction::Tick => {
                state.count += 1;
                ReducerResult::changed()
            }
            _ => ReducerResult::unchanged(),
        }
    }

    #[test]
    fn test_counts_dispatches_and_changes() {
        let mut store =
            StoreWithMiddleware::new(Ticks::default(), tick_reducer, SessionStats::default());
        assert!(store.dispatch(AppAction::Tick).changed);
        assert!(!store.dispatch(AppAction::SortCycle).changed);
        store.dispatch(AppAction::Tick);

        assert_eq!(store.state().count, 2);
        assert_eq!(store.middleware().dispatched, 3);
        assert_eq!(store.middleware().changed, 2);
    }
}
