use std::rc::Rc;

use ratatui::{
    layout::{Constraint, Layout, Rect},
    style::{Modifier, Style},
    text::{Line, Span},
    widgets::Paragraph,
    Frame,
};
use tui_dispatch::{Component, EventKind};
use tui_dispatch_components::{TextInput, TextInputProps};

use super::input_at_end;
use crate::action::AppAction;
use crate::theme::Theme;

pub const SEARCH_PLACEHOLDER: &str = "Tìm kiếm công việc...";

/// View title, result count, sort mode and the search box
#[derive(Default)]
pub struct Header {
    search: TextInput,
    was_searching: bool,
}

pub struct HeaderProps<'a> {
    pub title: &'a str,
    pub count: usize,
    pub sort_label: &'a str,
    pub search: &'a str,
    /// Search box has the keyboard
    pub is_searching: bool,
    pub theme: &'a Theme,
}

impl Header {
    pub fn new() -> Self {
        Self::default()
    }

    fn sync_focus(&mut self, props: &HeaderProps<'_>) {
        if props.is_searching && !self.was_searching {
            self.search = input_at_end(Self::input_props(props));
        }
        self.was_searching = props.is_searching;
    }

    fn input_props<'a>(props: &HeaderProps<'a>) -> TextInputProps<'a, AppAction> {
        TextInputProps {
            value: props.search,
            placeholder: SEARCH_PLACEHOLDER,
            is_focused: props.is_searching,
            style: props.theme.text_input(true),
            on_change: Rc::new(AppAction::SearchChange),
            on_submit: Rc::new(|_| AppAction::SearchClose),
            on_cursor_move: None,
            on_cancel: None,
        }
    }
}

impl Component<AppAction> for Header {
    type Props<'a> = HeaderProps<'a>;

    fn handle_event(
        &mut self,
        event: &EventKind,
        props: Self::Props<'_>,
    ) -> impl IntoIterator<Item = AppAction> {
        self.sync_focus(&props);
        if !props.is_searching {
            return Vec::new();
        }
        let input_props = Self::input_props(&props);
        <TextInput as Component<AppAction>>::handle_event(&mut self.search, event, input_props)
            .into_iter()
            .collect()
    }

    fn render(&mut self, frame: &mut Frame, area: Rect, props: Self::Props<'_>) {
        self.sync_focus(&props);
        let theme = props.theme;
        frame.render_widget(Paragraph::new("").style(theme.base()), area);

        let [title_row, search_row] =
            Layout::vertical([Constraint::Length(1), Constraint::Length(3)]).areas(area);

        let sort = format!("Sắp xếp: {} ", props.sort_label);
        let [title_area, sort_area] = Layout::horizontal([
            Constraint::Min(0),
            Constraint::Length(sort.chars().count() as u16),
        ])
        .areas(title_row);

        let title = Line::from(vec![
            Span::styled(
                format!(" {}", props.title),
                Style::default().fg(theme.fg).add_modifier(Modifier::BOLD),
            ),
            Span::styled(
                format!("  {} công việc", props.count),
                Style::default().fg(theme.muted),
            ),
        ]);
        frame.render_widget(Paragraph::new(title), title_area);
        frame.render_widget(
            Paragraph::new(Span::styled(sort, Style::default().fg(theme.muted))),
            sort_area,
        );

        let input_props = Self::input_props(&props);
        <TextInput as Component<AppAction>>::render(
            &mut self.search,
            frame,
            search_row,
            input_props,
        );
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tui_dispatch::testing::{key, RenderHarness};

    fn props<'a>(theme: &'a Theme, search: &'a str, is_searching: bool) -> HeaderProps<'a> {
        HeaderProps {
            title: "Hôm nay",
            count: 3,
            sort_label: "Ngày tạo",
            search,
            is_searching,
            theme,
        }
    }

    #[test]
    fn test_render() {
        let theme = Theme::light();
        let mut header = Header::new();
        let mut harness = RenderHarness::new(70, 4);
        let output = harness.render_to_string_plain(|frame| {
            header.render(frame, frame.area(), props(&theme, "", false))
        });
        assert!(output.contains("Hôm nay"));
        assert!(output.contains("3 công việc"));
        assert!(output.contains("Sắp xếp: Ngày tạo"));
        assert!(output.contains(SEARCH_PLACEHOLDER));
    }

    #[test]
    fn test_typing_only_while_searching() {
        let theme = Theme::light();
        let mut header = Header::new();
        let idle: Vec<_> = header
            .handle_event(&EventKind::Key(key("a")), props(&theme, "", false))
            .into_iter()
            .collect();
        assert!(idle.is_empty());

        let typed: Vec<_> = header
            .handle_event(&EventKind::Key(key("a")), props(&theme, "rau", true))
            .into_iter()
            .collect();
        assert_eq!(typed, vec![AppAction::SearchChange("raua".into())]);
    }
}
