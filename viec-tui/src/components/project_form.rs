use std::rc::Rc;

use ratatui::{
    layout::{Constraint, Layout, Rect},
    style::{Color, Modifier, Style},
    text::{Line, Span},
    widgets::{Block, Borders, Paragraph},
    Frame,
};
use tui_dispatch::{Component, EventKind};
use tui_dispatch_components::{TextInput, TextInputProps};
use viec_core::model::parse_hex_color;

use super::Dialog;
use crate::action::AppAction;
use crate::state::{ProjectForm, PROJECT_COLORS};
use crate::theme::Theme;

pub const PROJECT_FORM_TITLE: &str = "Dự án mới";

/// New-project dialog: a name and a color from [`PROJECT_COLORS`]
pub struct ProjectFormView {
    dialog: Dialog,
    name: TextInput,
    was_open: bool,
}

impl Default for ProjectFormView {
    fn default() -> Self {
        Self {
            dialog: Dialog::new(44, 9),
            name: TextInput::new(),
            was_open: false,
        }
    }
}

pub struct ProjectFormViewProps<'a> {
    pub form: &'a ProjectForm,
    pub theme: &'a Theme,
}

impl ProjectFormView {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn set_open(&mut self, is_open: bool) {
        if is_open && !self.was_open {
            self.name = TextInput::new();
        }
        self.was_open = is_open;
    }

    /// The dialog's close action for a click outside it
    pub fn handle_backdrop(
        &mut self,
        event: &EventKind,
        screen: Rect,
        theme: &Theme,
    ) -> Option<AppAction> {
        self.dialog
            .handle_event(event, screen, theme, AppAction::ProjectCancel)
    }

    fn input_props<'a>(props: &ProjectFormViewProps<'a>) -> TextInputProps<'a, AppAction> {
        let theme = props.theme;
        TextInputProps {
            value: &props.form.name,
            placeholder: "Tên dự án",
            is_focused: true,
            style: theme.text_input(true),
            on_change: Rc::new(AppAction::ProjectNameChange),
            on_submit: Rc::new(|_| AppAction::ProjectSubmit),
            on_cursor_move: None,
            on_cancel: None,
        }
    }
}

impl Component<AppAction> for ProjectFormView {
    type Props<'a> = ProjectFormViewProps<'a>;

    fn handle_event(
        &mut self,
        event: &EventKind,
        props: Self::Props<'_>,
    ) -> impl IntoIterator<Item = AppAction> {
        let input_props = Self::input_props(&props);
        <TextInput as Component<AppAction>>::handle_event(&mut self.name, event, input_props)
            .into_iter()
            .collect::<Vec<_>>()
    }

    fn render(&mut self, frame: &mut Frame, area: Rect, props: Self::Props<'_>) {
        let theme = props.theme;
        let Self { dialog, name, .. } = self;
        let mut content = |frame: &mut Frame, modal: Rect| {
            Self::render_content(frame, modal, name, &props)
        };
        dialog.render(frame, area, theme, AppAction::ProjectCancel, &mut content);
    }
}

impl ProjectFormView {
    fn render_content(
        frame: &mut Frame,
        modal: Rect,
        name: &mut TextInput,
        props: &ProjectFormViewProps<'_>,
    ) {
        let theme = props.theme;
        let block = Block::default()
            .borders(Borders::ALL)
            .border_style(theme.border_style(true))
            .title(Span::styled(
                format!(" {PROJECT_FORM_TITLE} "),
                Style::default().fg(theme.fg).add_modifier(Modifier::BOLD),
            ))
            .style(Style::default().bg(theme.overlay));
        let inner = block.inner(modal);
        frame.render_widget(block, modal);

        let [name_area, color_area, _, footer_area] = Layout::vertical([
            Constraint::Length(3),
            Constraint::Length(1),
            Constraint::Length(1),
            Constraint::Length(1),
        ])
        .areas(inner);

        let input_props = Self::input_props(props);
        <TextInput as Component<AppAction>>::render(name, frame, name_area, input_props);

        let mut swatches = vec![Span::styled(" Màu: ", Style::default().fg(theme.muted))];
        for (i, hex) in PROJECT_COLORS.iter().enumerate() {
            let color = parse_hex_color(hex)
                .map(|(r, g, b)| Color::Rgb(r, g, b))
                .unwrap_or(theme.accent);
            let symbol = if i == props.form.color % PROJECT_COLORS.len() {
                "[●]"
            } else {
                " ● "
            };
            swatches.push(Span::styled(symbol, Style::default().fg(color)));
        }
        frame.render_widget(Paragraph::new(Line::from(swatches)), color_area);

        let key_style = Style::default()
            .fg(theme.accent)
            .add_modifier(Modifier::BOLD);
        let footer = Line::from(vec![
            Span::styled(" Enter ", key_style),
            Span::styled("Thêm dự án", Style::default().fg(theme.fg)),
            Span::styled("  Tab ", key_style),
            Span::styled("Màu", Style::default().fg(theme.fg)),
            Span::styled("  Esc ", key_style),
            Span::styled("Hủy", Style::default().fg(theme.fg)),
        ]);
        frame.render_widget(Paragraph::new(footer), footer_area);
    }
}
