use std::rc::Rc;

use crossterm::event::KeyCode;
use ratatui::{
    layout::{Constraint, Layout, Rect},
    style::{Modifier, Style},
    text::{Line, Span},
    widgets::{Block, Borders, Paragraph},
    Frame,
};
use tui_dispatch::{Component, EventKind};
use tui_dispatch_components::{TextInput, TextInputProps};
use viec_core::Project;

use super::{input_at_end, Dialog};
use crate::action::AppAction;
use crate::state::{FormField, TodoForm};
use crate::theme::Theme;

const LABEL_WIDTH: u16 = 14;

/// Create / edit dialog
pub struct TodoFormView {
    dialog: Dialog,
    /// One input per text field, in `TEXT_FIELDS` order
    inputs: [TextInput; 4],
    was_open: bool,
}

impl Default for TodoFormView {
    fn default() -> Self {
        Self {
            dialog: Dialog::new(66, 17),
            inputs: Default::default(),
            was_open: false,
        }
    }
}

pub struct TodoFormViewProps<'a> {
    pub form: &'a TodoForm,
    pub projects: &'a [Project],
    pub theme: &'a Theme,
}

const TEXT_FIELDS: [FormField; 4] = [
    FormField::Title,
    FormField::Description,
    FormField::DueDate,
    FormField::Tags,
];

fn input_index(field: FormField) -> Option<usize> {
    TEXT_FIELDS.iter().position(|&f| f == field)
}

fn placeholder(field: FormField) -> &'static str {
    match field {
        FormField::Title => "Cần làm gì?",
        FormField::Description => "Chi tiết (không bắt buộc)",
        FormField::DueDate => "YYYY-MM-DD",
        FormField::Tags => "phân cách bằng dấu phẩy",
        FormField::Priority | FormField::Project => "",
    }
}

impl TodoFormView {
    pub fn new() -> Self {
        Self::default()
    }

    /// Reset the inputs whenever the dialog opens, cursors after the prefilled text
    pub fn set_open(&mut self, form: Option<&TodoForm>, theme: &Theme) {
        if let (Some(form), false) = (form, self.was_open) {
            self.inputs =
                TEXT_FIELDS.map(|field| input_at_end(Self::input_props(form, field, theme)));
        }
        self.was_open = form.is_some();
    }

    /// The dialog's close action for a click outside it
    pub fn handle_backdrop(
        &mut self,
        event: &EventKind,
        screen: Rect,
        theme: &Theme,
    ) -> Option<AppAction> {
        self.dialog
            .handle_event(event, screen, theme, AppAction::FormCancel)
    }

    fn input_props<'a>(
        form: &'a TodoForm,
        field: FormField,
        theme: &Theme,
    ) -> TextInputProps<'a, AppAction> {
        TextInputProps {
            value: form.text(field),
            placeholder: placeholder(field),
            is_focused: form.field == field,
            style: theme.text_input(false),
            on_change: Rc::new(move |value| AppAction::FormFieldChange(field, value)),
            on_submit: Rc::new(|_| AppAction::FormSubmit),
            on_cursor_move: None,
            on_cancel: None,
        }
    }

    fn selector<'a>(value: &str, color: ratatui::style::Color, focused: bool) -> Line<'a> {
        let arrows = if focused {
            Style::default().add_modifier(Modifier::BOLD)
        } else {
            Style::default().add_modifier(Modifier::DIM)
        };
        Line::from(vec![
            Span::styled("◀ ", arrows),
            Span::styled(value.to_string(), Style::default().fg(color)),
            Span::styled(" ▶", arrows),
        ])
    }
}

impl Component<AppAction> for TodoFormView {
    type Props<'a> = TodoFormViewProps<'a>;

    fn handle_event(
        &mut self,
        event: &EventKind,
        props: Self::Props<'_>,
    ) -> impl IntoIterator<Item = AppAction> {
        let field = props.form.field;

        let Some(idx) = input_index(field) else {
            // Priority and project are cycled in place
            let EventKind::Key(key) = event else {
                return Vec::new();
            };
            let forward = match key.code {
                KeyCode::Right | KeyCode::Char(' ') => true,
                KeyCode::Left => false,
                _ => return Vec::new(),
            };
            return match (field, forward) {
                (FormField::Priority, true) => vec![AppAction::FormPriorityCycle],
                (FormField::Priority, false) => vec![AppAction::FormPriorityPrev],
                (FormField::Project, true) => vec![AppAction::FormProjectCycle],
                (FormField::Project, false) => vec![AppAction::FormProjectPrev],
                _ => Vec::new(),
            };
        };

        let input_props = Self::input_props(props.form, field, props.theme);
        <TextInput as Component<AppAction>>::handle_event(&mut self.inputs[idx], event, input_props)
            .into_iter()
            .collect()
    }

    fn render(&mut self, frame: &mut Frame, area: Rect, props: Self::Props<'_>) {
        let TodoFormViewProps {
            form,
            projects,
            theme,
        } = props;

        let Self { dialog, inputs, .. } = self;
        let mut content = |frame: &mut Frame, modal: Rect| {
            Self::render_content(frame, modal, inputs, form, projects, theme)
        };
        dialog.render(frame, area, theme, AppAction::FormCancel, &mut content);
    }
}

impl TodoFormView {
    fn render_content(
        frame: &mut Frame,
        modal: Rect,
        inputs: &mut [TextInput; 4],
        form: &TodoForm,
        projects: &[Project],
        theme: &Theme,
    ) {
        let block = Block::default()
            .borders(Borders::ALL)
            .border_style(theme.border_style(true))
            .title(Span::styled(
                format!(" {} ", form.heading()),
                Style::default().fg(theme.fg).add_modifier(Modifier::BOLD),
            ))
            .style(Style::default().bg(theme.overlay));
        let inner = block.inner(modal);
        frame.render_widget(block, modal);

        let mut constraints = vec![Constraint::Length(1)];
        for _ in FormField::all() {
            constraints.push(Constraint::Length(1));
            constraints.push(Constraint::Length(1));
        }
        constraints.push(Constraint::Length(1));
        constraints.push(Constraint::Length(1));
        let rows = Layout::vertical(constraints).split(inner);

        for (i, &field) in FormField::all().iter().enumerate() {
            let row = rows[1 + i * 2];
            let [label_area, value_area] =
                Layout::horizontal([Constraint::Length(LABEL_WIDTH), Constraint::Min(0)])
                    .areas(row);

            let focused = form.field == field;
            let label_style = if focused {
                Style::default()
                    .fg(theme.accent)
                    .add_modifier(Modifier::BOLD)
            } else {
                Style::default().fg(theme.muted)
            };
            let marker = if focused { "› " } else { "  " };
            frame.render_widget(
                Paragraph::new(Span::styled(
                    format!("{marker}{}", field.label()),
                    label_style,
                )),
                label_area,
            );

            match (field, input_index(field)) {
                (_, Some(idx)) => {
                    let input_props = Self::input_props(form, field, theme);
                    <TextInput as Component<AppAction>>::render(
                        &mut inputs[idx],
                        frame,
                        value_area,
                        input_props,
                    );
                }
                (FormField::Priority, None) => {
                    let line = Self::selector(
                        form.priority.label(),
                        theme.priority(form.priority),
                        focused,
                    );
                    frame.render_widget(Paragraph::new(line), value_area);
                }
                _ => {
                    let project = projects.iter().find(|p| p.id == form.project);
                    let (name, color) = match project {
                        Some(p) => (p.name.as_str(), theme.project(p)),
                        None => (form.project.as_str(), theme.muted),
                    };
                    frame.render_widget(
                        Paragraph::new(Self::selector(name, color, focused)),
                        value_area,
                    );
                }
            }
        }

        let key_style = Style::default()
            .fg(theme.accent)
            .add_modifier(Modifier::BOLD);
        let footer = Line::from(vec![
            Span::styled(" Enter ", key_style),
            Span::styled(form.submit_label(), Style::default().fg(theme.fg)),
            Span::styled("   Esc ", key_style),
            Span::styled("Hủy", Style::default().fg(theme.fg)),
        ]);
        let footer_row = rows[rows.len() - 1];
        frame.render_widget(Paragraph::new(footer), footer_row);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crossterm::event::{KeyModifiers, MouseButton, MouseEvent, MouseEventKind};
    use tui_dispatch::testing::{key, RenderHarness};
    use viec_core::default_projects;

    fn events(view: &mut TodoFormView, form: &TodoForm, k: &str) -> Vec<AppAction> {
        let projects = default_projects();
        let theme = Theme::light();
        view.handle_event(
            &EventKind::Key(key(k)),
            TodoFormViewProps {
                form,
                projects: &projects,
                theme: &theme,
            },
        )
        .into_iter()
        .collect()
    }

    #[test]
    fn test_typing_goes_to_focused_field() {
        let mut view = TodoFormView::new();
        let mut form = TodoForm::blank("work");
        form.field = FormField::Tags;
        form.tags = "a".into();
        view.set_open(Some(&form), &Theme::light());

        assert_eq!(
            events(&mut view, &form, ","),
            vec![AppAction::FormFieldChange(FormField::Tags, "a,".into())]
        );
    }

    #[test]
    fn test_selectors_cycle() {
        let mut view = TodoFormView::new();
        let mut form = TodoForm::blank("work");
        form.field = FormField::Priority;
        assert_eq!(events(&mut view, &form, "right"), vec![AppAction::FormPriorityCycle]);
        assert_eq!(events(&mut view, &form, "left"), vec![AppAction::FormPriorityPrev]);

        form.field = FormField::Project;
        assert_eq!(events(&mut view, &form, "space"), vec![AppAction::FormProjectCycle]);
        assert_eq!(events(&mut view, &form, "left"), vec![AppAction::FormProjectPrev]);
        assert!(events(&mut view, &form, "x").is_empty());
    }

    #[test]
    fn test_click_outside_cancels() {
        let mut view = TodoFormView::new();
        let screen = Rect::new(0, 0, 80, 24);
        let click = |column, row| {
            EventKind::Mouse(MouseEvent {
                kind: MouseEventKind::Down(MouseButton::Left),
                column,
                row,
                modifiers: KeyModifiers::NONE,
            })
        };
        let theme = Theme::dark();
        assert_eq!(
            view.handle_backdrop(&click(0, 0), screen, &theme),
            Some(AppAction::FormCancel)
        );
        assert_eq!(view.handle_backdrop(&click(40, 12), screen, &theme), None);
    }

    #[test]
    fn test_render_new_and_edit() {
        let projects = default_projects();
        let theme = Theme::light();
        let mut view = TodoFormView::new();
        let mut harness = RenderHarness::new(80, 24);

        let mut form = TodoForm::blank("shopping");
        let output = harness.render_to_string_plain(|frame| {
            view.render(
                frame,
                frame.area(),
                TodoFormViewProps {
                    form: &form,
                    projects: &projects,
                    theme: &theme,
                },
            )
        });
        assert!(output.contains("Công việc mới"));
        assert!(output.contains("Thêm công việc"));
        assert!(output.contains("◀ Mua sắm ▶"));
        assert!(output.contains("◀ Trung bình ▶"));

        form.editing = Some(viec_core::TodoId::from("1"));
        form.title = "Đi chợ".into();
        let output = harness.render_to_string_plain(|frame| {
            view.render(
                frame,
                frame.area(),
                TodoFormViewProps {
                    form: &form,
                    projects: &projects,
                    theme: &theme,
                },
            )
        });
        assert!(output.contains("Chỉnh sửa công việc"));
        assert!(output.contains("Cập nhật công việc"));
        assert!(output.contains("Đi chợ"));
    }
}
