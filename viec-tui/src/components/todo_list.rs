use chrono::NaiveDate;
use ratatui::{
    layout::Rect,
    style::{Modifier, Style},
    text::{Line, Span},
    widgets::{List, ListItem, ListState, Paragraph},
    Frame,
};
use viec_core::{DueLabel, Project, Todo};

use tui_dispatch::{Component, EventKind};

use crate::action::AppAction;
use crate::theme::Theme;

pub const EMPTY_LIST: &str = "Không có công việc nào";

/// The filtered, sorted todos
#[derive(Default)]
pub struct TodoList {
    list_state: ListState,
}

pub struct TodoListProps<'a> {
    pub todos: &'a [&'a Todo],
    pub projects: &'a [Project],
    pub today: NaiveDate,
    pub selected: usize,
    pub is_focused: bool,
    pub theme: &'a Theme,
}

impl TodoList {
    pub fn new() -> Self {
        Self::default()
    }

    fn item<'a>(todo: &'a Todo, props: &TodoListProps<'a>) -> ListItem<'a> {
        let theme = props.theme;
        let (checkbox, check_color, title_style) = if todo.completed {
            (
                "[x] ",
                theme.success,
                Style::default()
                    .fg(theme.muted)
                    .add_modifier(Modifier::CROSSED_OUT),
            )
        } else {
            ("[ ] ", theme.accent, Style::default().fg(theme.fg))
        };

        let mut lines = vec![Line::from(vec![
            Span::styled(checkbox, Style::default().fg(check_color)),
            Span::styled(todo.title.as_str(), title_style),
        ])];

        if todo.has_description() {
            lines.push(Line::from(Span::styled(
                format!("    {}", todo.description),
                Style::default().fg(theme.muted),
            )));
        }

        let mut meta: Vec<Span> = vec![Span::raw("    ")];
        if let Some(due) = DueLabel::for_todo(todo, props.today) {
            let color = match due {
                DueLabel::Overdue => theme.danger,
                DueLabel::Today => theme.warning,
                DueLabel::Tomorrow | DueLabel::Date(_) => theme.muted,
            };
            meta.push(Span::styled(due.text(), Style::default().fg(color)));
            meta.push(Span::raw("  "));
        }
        meta.push(Span::styled(
            todo.priority.label(),
            Style::default().fg(theme.priority(todo.priority)),
        ));
        if let Some(project) = props.projects.iter().find(|p| p.id == todo.project) {
            meta.push(Span::raw("  "));
            meta.push(Span::styled(
                format!("● {}", project.name),
                Style::default().fg(theme.project(project)),
            ));
        }
        for tag in &todo.tags {
            meta.push(Span::styled(
                format!("  #{tag}"),
                Style::default().fg(theme.accent),
            ));
        }
        lines.push(Line::from(meta));

        ListItem::new(lines)
    }
}

impl Component<AppAction> for TodoList {
    type Props<'a> = TodoListProps<'a>;

    fn handle_event(
        &mut self,
        event: &EventKind,
        props: Self::Props<'_>,
    ) -> impl IntoIterator<Item = AppAction> {
        if !props.is_focused || props.todos.is_empty() {
            return None;
        }
        match event {
            EventKind::Scroll { delta, .. } if *delta > 0 => Some(AppAction::ListSelectNext),
            EventKind::Scroll { delta, .. } if *delta < 0 => Some(AppAction::ListSelectPrev),
            _ => None,
        }
    }

    fn render(&mut self, frame: &mut Frame, area: Rect, props: Self::Props<'_>) {
        let theme = props.theme;
        if props.todos.is_empty() {
            let empty = Paragraph::new(Line::from(Span::styled(
                EMPTY_LIST,
                Style::default().fg(theme.muted),
            )))
            .centered()
            .style(theme.base());
            let row = Rect {
                y: area.y + area.height / 3,
                height: 1.min(area.height),
                ..area
            };
            frame.render_widget(Paragraph::new("").style(theme.base()), area);
            frame.render_widget(empty, row);
            return;
        }

        let items: Vec<ListItem> = props
            .todos
            .iter()
            .map(|&todo| Self::item(todo, &props))
            .collect();

        self.list_state
            .select(Some(props.selected.min(props.todos.len() - 1)));

        let highlight = if props.is_focused {
            theme.selected()
        } else {
            Style::default().add_modifier(Modifier::BOLD)
        };
        let list = List::new(items)
            .style(theme.base())
            .highlight_style(highlight)
            .highlight_symbol("▌");
        frame.render_stateful_widget(list, area, &mut self.list_state);
    }
}
