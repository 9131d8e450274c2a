use ratatui::{
    layout::Rect,
    style::{Modifier, Style},
    text::{Line, Span},
    widgets::Paragraph,
    Frame,
};

use tui_dispatch::{format_key_for_display, Component};

use crate::action::AppAction;
use crate::keymap::{self, Command, KeyContext, Keybindings};
use crate::theme::Theme;

/// One-line key hints for the active context
pub struct HelpBar;

pub struct HelpBarProps<'a> {
    pub keybindings: &'a Keybindings,
    pub context: KeyContext,
    pub theme: &'a Theme,
}

fn hints(context: KeyContext) -> &'static [(Command, &'static str)] {
    match context {
        KeyContext::Normal => &[
            (Command::New, "thêm"),
            (Command::Toggle, "xong"),
            (Command::Edit, "sửa"),
            (Command::Delete, "xóa"),
            (Command::Search, "tìm"),
            (Command::Sort, "sắp xếp"),
            (Command::NewProject, "dự án"),
            (Command::Focus, "chuyển"),
            (Command::Theme, "giao diện"),
            (Command::Quit, "thoát"),
        ],
        KeyContext::Search => &[(Command::Close, "đóng")],
        KeyContext::Form => &[
            (Command::NextField, "trường sau"),
            (Command::Submit, "lưu"),
            (Command::Cancel, "hủy"),
        ],
        KeyContext::ProjectForm => &[
            (Command::CycleColor, "màu"),
            (Command::Submit, "lưu"),
            (Command::Cancel, "hủy"),
        ],
        KeyContext::Confirm => &[(Command::Accept, "xóa"), (Command::Cancel, "hủy")],
    }
}

impl Component<AppAction> for HelpBar {
    type Props<'a> = HelpBarProps<'a>;

    fn render(&mut self, frame: &mut Frame, area: Rect, props: Self::Props<'_>) {
        let theme = props.theme;
        let key_style = Style::default()
            .fg(theme.accent)
            .add_modifier(Modifier::BOLD);

        let mut spans = Vec::new();
        for &(command, label) in hints(props.context) {
            let Some(key) = keymap::first_key(props.keybindings, command, props.context) else {
                continue;
            };
            spans.push(Span::styled(
                format!(" {}", format_key_for_display(&key)),
                key_style,
            ));
            spans.push(Span::styled(
                format!(" {label} "),
                Style::default().fg(theme.muted),
            ));
        }

        frame.render_widget(Paragraph::new(Line::from(spans)).style(theme.base()), area);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::keymap::defaults;
    use tui_dispatch::testing::RenderHarness;

    fn render(keybindings: &Keybindings, context: KeyContext) -> String {
        let theme = Theme::light();
        let mut harness = RenderHarness::new(120, 1);
        harness.render_to_string_plain(|frame| {
            HelpBar.render(
                frame,
                frame.area(),
                HelpBarProps {
                    keybindings,
                    context,
                    theme: &theme,
                },
            )
        })
    }

    #[test]
    fn test_hints_follow_bindings() {
        let output = render(&defaults(), KeyContext::Normal);
        assert!(output.contains("N thêm"));
        assert!(output.contains("Space xong"));
        assert!(output.contains("Q thoát"));

        let mut custom = Keybindings::new();
        custom.add(KeyContext::Normal, Command::New.name(), vec!["ctrl+n".into()]);
        let output = render(&Keybindings::merge(defaults(), custom), KeyContext::Normal);
        assert!(output.contains("^N thêm"));
    }

    #[test]
    fn test_confirm_hints() {
        let output = render(&defaults(), KeyContext::Confirm);
        assert!(output.contains("Y xóa"));
        assert!(output.contains("N hủy"));
    }
}
