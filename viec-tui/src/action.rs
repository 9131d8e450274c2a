//! Typed intents for every user-visible change
//!
//! Naming convention: `Category` + `Verb` (`TodoToggle`, `FilterReset`,
//! `UiThemeToggle`). Categories are inferred from the prefix; variants whose
//! name does not split cleanly carry an explicit `category`.

use tui_dispatch::Action;
use viec_core::{SortMode, StatusFilter, TodoId};

use crate::state::FormField;

#[derive(Action, Clone, Debug, PartialEq, Eq)]
#[action(infer_categories)]
pub enum AppAction {
    // ===== Todo =====
    /// Flip completion of a todo
    TodoToggle(TodoId),
    /// Ask for confirmation before deleting
    TodoDeleteRequest(TodoId),
    /// Delete without asking
    TodoDelete(TodoId),

    // ===== Todo form =====
    FormOpenNew,
    FormOpenEdit(TodoId),
    #[action(category = "form")]
    FormFieldChange(FormField, String),
    FormFocusNext,
    FormFocusPrev,
    #[action(category = "form")]
    FormPriorityCycle,
    #[action(category = "form")]
    FormPriorityPrev,
    #[action(category = "form")]
    FormProjectCycle,
    #[action(category = "form")]
    FormProjectPrev,
    FormSubmit,
    FormCancel,

    // ===== Project form =====
    #[action(category = "project")]
    ProjectFormOpen,
    #[action(category = "project")]
    ProjectNameChange(String),
    #[action(category = "project")]
    ProjectColorCycle,
    ProjectSubmit,
    ProjectCancel,

    // ===== Filters and sort =====
    #[action(category = "filter")]
    FilterProject(String),
    /// Select a status filter; selecting the active one clears it
    #[action(category = "filter")]
    FilterStatus(StatusFilter),
    /// Back to "all todos": clears project and status filters
    FilterReset,
    SortCycle,
    SortSet(SortMode),

    // ===== Search =====
    SearchStart,
    SearchChange(String),
    SearchClear,
    SearchClose,
    /// Use a tag as the search text
    #[action(category = "search")]
    TagSelect(String),

    // ===== Selection and focus =====
    #[action(category = "list")]
    ListSelect(usize),
    ListSelectNext,
    ListSelectPrev,
    #[action(category = "sidebar")]
    SidebarSelect(usize),
    SidebarSelectNext,
    SidebarSelectPrev,
    /// Apply the sidebar entry under the cursor
    #[action(category = "sidebar")]
    SidebarActivate,
    #[action(category = "sidebar")]
    FocusToggle,

    // ===== Confirm dialog =====
    #[action(category = "confirm")]
    ConfirmAccept,
    #[action(category = "confirm")]
    ConfirmCancel,

    // ===== UI =====
    #[action(category = "ui")]
    UiThemeToggle,
    #[action(category = "ui")]
    UiTerminalResize(u16, u16),

    // ===== Global =====
    /// Periodic clock check so "today" follows midnight
    Tick,
    Quit,
}

#[cfg(test)]
mod tests {
    use super::*;
    use tui_dispatch::ActionParams;

    #[test]
    fn test_names_match_variants() {
        assert_eq!(AppAction::TodoToggle(TodoId::from("1")).name(), "TodoToggle");
        assert_eq!(AppAction::UiTerminalResize(1, 1).name(), "UiTerminalResize");
        assert_eq!(AppAction::Quit.name(), "Quit");
    }

    #[test]
    fn test_categories() {
        assert_eq!(AppAction::FormSubmit.category(), Some("form"));
        assert_eq!(AppAction::FormPriorityPrev.category(), Some("form"));
        assert_eq!(AppAction::TagSelect("x".into()).category(), Some("search"));
        assert_eq!(AppAction::SidebarSelectNext.category(), Some("sidebar"));
        assert_eq!(AppAction::UiTerminalResize(1, 1).category(), Some("ui"));
        assert_eq!(AppAction::UiThemeToggle.category(), Some("ui"));
        assert_eq!(AppAction::Tick.category(), None);
        assert_eq!(
            AppAction::Quit.category_enum(),
            AppActionCategory::Uncategorized
        );
        assert!(AppAction::ConfirmAccept.is_confirm());
    }

    #[test]
    fn test_params_omit_name() {
        assert_eq!(AppAction::Quit.params(), "");
        assert!(AppAction::SearchChange("rau".into()).params().contains("rau"));
    }
}
