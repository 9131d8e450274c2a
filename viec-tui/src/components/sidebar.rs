use ratatui::{
    layout::Rect,
    style::{Modifier, Style},
    text::{Line, Span},
    widgets::{Block, Borders, List, ListItem, ListState},
    Frame,
};
use viec_core::ALL_TODOS_TITLE;

use tui_dispatch::Component;
use crate::action::AppAction;
use crate::state::{AppState, SidebarItem};
use crate::theme::Theme;

pub const PROJECTS_HEADING: &str = "DỰ ÁN";
pub const FILTERS_HEADING: &str = "BỘ LỌC";
pub const TAGS_HEADING: &str = "THẺ";
pub const NO_TAGS: &str = "Chưa có thẻ nào";

/// Projects, status filters and tags with their counts
#[derive(Default)]
pub struct Sidebar {
    list_state: ListState,
}

pub struct SidebarProps<'a> {
    pub state: &'a AppState,
    pub theme: &'a Theme,
    pub is_focused: bool,
}

impl Sidebar {
    pub fn new() -> Self {
        Self::default()
    }
}

/// `label` left, `count` right-aligned within `width` columns
fn counted_line<'a>(
    marker: Span<'a>,
    label: String,
    count: Option<usize>,
    width: usize,
) -> Line<'a> {
    let count = count.map(|c| c.to_string()).unwrap_or_default();
    let used = marker.width() + Span::raw(label.as_str()).width() + count.len();
    let pad = width.saturating_sub(used + 1).max(1);
    Line::from(vec![
        marker,
        Span::raw(label),
        Span::raw(" ".repeat(pad)),
        Span::raw(count),
    ])
}

impl Component<AppAction> for Sidebar {
    type Props<'a> = SidebarProps<'a>;

    fn render(&mut self, frame: &mut Frame, area: Rect, props: Self::Props<'_>) {
        let SidebarProps {
            state,
            theme,
            is_focused,
        } = props;

        let block = Block::default()
            .borders(Borders::RIGHT)
            .border_style(theme.border_style(is_focused))
            .style(theme.base());
        let width = block.inner(area).width as usize;

        let counts = state.counts();
        let heading = |text: &'static str| {
            ListItem::new(Line::from(Span::styled(
                text,
                Style::default()
                    .fg(theme.muted)
                    .add_modifier(Modifier::BOLD),
            )))
        };

        let mut rows: Vec<ListItem> = Vec::new();
        // Row index of every selectable item, in sidebar_items() order
        let mut selectable: Vec<usize> = Vec::new();
        let mut push = |rows: &mut Vec<ListItem>, item: &SidebarItem, line: Line<'static>| {
            selectable.push(rows.len());
            let style = if state.is_active(item) {
                Style::default()
                    .fg(theme.accent)
                    .add_modifier(Modifier::BOLD)
            } else {
                Style::default().fg(theme.fg)
            };
            rows.push(ListItem::new(line).style(style));
        };

        let all = SidebarItem::All;
        push(
            &mut rows,
            &all,
            counted_line(
                Span::raw("  "),
                ALL_TODOS_TITLE.into(),
                Some(counts.all),
                width,
            ),
        );

        rows.push(ListItem::new(""));
        rows.push(heading(PROJECTS_HEADING));
        for project in state.projects() {
            let marker = Span::styled("● ", Style::default().fg(theme.project(project)));
            let line = counted_line(
                marker,
                project.name.clone(),
                Some(counts.project(&project.id)),
                width,
            );
            push(&mut rows, &SidebarItem::Project(project.id.clone()), line);
        }

        rows.push(ListItem::new(""));
        rows.push(heading(FILTERS_HEADING));
        for &status in viec_core::StatusFilter::all() {
            let line = counted_line(
                Span::raw("  "),
                status.label().into(),
                Some(counts.status(status)),
                width,
            );
            push(&mut rows, &SidebarItem::Status(status), line);
        }

        rows.push(ListItem::new(""));
        rows.push(heading(TAGS_HEADING));
        let tags = state.tags();
        if tags.is_empty() {
            rows.push(ListItem::new(Span::styled(
                format!("  {NO_TAGS}"),
                Style::default().fg(theme.muted),
            )));
        }
        for tag in tags {
            let line = counted_line(Span::raw("  #"), tag.clone(), None, width);
            push(&mut rows, &SidebarItem::Tag(tag), line);
        }

        // Highlight only while focused; active filters are styled above
        let selected = is_focused
            .then(|| selectable.get(state.sidebar_cursor).copied())
            .flatten();
        self.list_state.select(selected);

        let list = List::new(rows)
            .block(block)
            .highlight_style(theme.selected());
        frame.render_stateful_widget(list, area, &mut self.list_state);
    }
}
