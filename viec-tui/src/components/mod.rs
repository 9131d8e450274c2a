//! UI components
//!
//! Each component implements [`Component`]: it renders from props and turns
//! events into actions. Internal UI bits (cursor position, scroll offset) may
//! live in `&mut self`; data changes always go through actions.

pub mod confirm;
pub mod header;
pub mod help_bar;
pub mod project_form;
pub mod sidebar;
pub mod todo_form;
pub mod todo_list;

use std::rc::Rc;

use crossterm::event::{KeyCode, KeyEvent, KeyModifiers, MouseEventKind};
use ratatui::{layout::Rect, Frame};
use tui_dispatch::{Component, EventKind};
use tui_dispatch_components::{
    centered_rect, Modal, ModalBehavior, ModalProps, TextInput, TextInputProps,
};

use crate::action::AppAction;
use crate::theme::Theme;

pub use confirm::{ConfirmDialog, ConfirmDialogProps};
pub use header::{Header, HeaderProps};
pub use help_bar::{HelpBar, HelpBarProps};
pub use project_form::{ProjectFormView, ProjectFormViewProps};
pub use sidebar::{Sidebar, SidebarProps};
pub use todo_form::{TodoFormView, TodoFormViewProps};
pub use todo_list::{TodoList, TodoListProps};

/// Fresh input whose cursor sits after the text it is opened with
pub fn input_at_end(mut props: TextInputProps<'_, AppAction>) -> TextInput {
    let mut input = TextInput::new();
    props.is_focused = true;
    let end = EventKind::Key(KeyEvent::new(KeyCode::End, KeyModifiers::NONE));
    // A cursor move emits nothing without `on_cursor_move`
    let emitted = <TextInput as Component<AppAction>>::handle_event(&mut input, &end, props)
        .into_iter()
        .count();
    debug_assert_eq!(emitted, 0);
    input
}

/// Fixed-size modal centered on the screen over a dimmed background
///
/// A click on the backdrop produces the dialog's close action.
pub struct Dialog {
    modal: Modal,
    width: u16,
    height: u16,
}

impl Dialog {
    pub fn new(width: u16, height: u16) -> Self {
        Self {
            modal: Modal::new(),
            width,
            height,
        }
    }

    /// Where the dialog sits on a screen of `screen` size
    pub fn area(&self, screen: Rect) -> Rect {
        centered_rect(self.width, self.height, screen)
    }

    fn props<'a>(
        &self,
        screen: Rect,
        theme: &Theme,
        on_close: AppAction,
        render_content: &'a mut dyn FnMut(&mut Frame, Rect),
    ) -> ModalProps<'a, AppAction> {
        ModalProps {
            is_open: true,
            is_focused: true,
            area: self.area(screen),
            style: theme.modal(),
            behavior: ModalBehavior {
                // Esc goes through the keymap
                close_on_esc: false,
                close_on_backdrop: true,
            },
            on_close: Rc::new(move || on_close.clone()),
            render_content,
        }
    }

    /// Dim what is on screen and draw the content into the dialog area
    pub fn render(
        &mut self,
        frame: &mut Frame,
        screen: Rect,
        theme: &Theme,
        on_close: AppAction,
        render_content: &mut dyn FnMut(&mut Frame, Rect),
    ) {
        let props = self.props(screen, theme, on_close, render_content);
        <Modal as Component<AppAction>>::render(&mut self.modal, frame, screen, props);
    }

    /// `on_close` for a mouse press outside the dialog
    pub fn handle_event(
        &mut self,
        event: &EventKind,
        screen: Rect,
        theme: &Theme,
        on_close: AppAction,
    ) -> Option<AppAction> {
        let EventKind::Mouse(mouse) = event else {
            return None;
        };
        // Motion and release events would close it by merely moving the mouse
        if !matches!(mouse.kind, MouseEventKind::Down(_)) {
            return None;
        }
        let mut no_content = |_: &mut Frame, _: Rect| {};
        let props = self.props(screen, theme, on_close, &mut no_content);
        let action = <Modal as Component<AppAction>>::handle_event(&mut self.modal, event, props)
            .into_iter()
            .next();
        action
    }
}
