use ratatui::{
    layout::{Constraint, Layout, Rect},
    style::{Modifier, Style},
    text::{Line, Span},
    widgets::{Block, Borders, Paragraph, Wrap},
    Frame,
};

use tui_dispatch::{Component, EventKind};

use super::Dialog;
use crate::action::AppAction;
use crate::theme::Theme;

pub const DELETE_QUESTION: &str = "Bạn có chắc chắn muốn xóa công việc này?";

/// Yes / no prompt before deleting a todo
pub struct ConfirmDialog {
    dialog: Dialog,
}

impl Default for ConfirmDialog {
    fn default() -> Self {
        Self {
            dialog: Dialog::new(50, 8),
        }
    }
}

pub struct ConfirmDialogProps<'a> {
    /// Title of the todo about to be deleted
    pub subject: &'a str,
    pub theme: &'a Theme,
}

impl ConfirmDialog {
    pub fn new() -> Self {
        Self::default()
    }

    /// A click outside the prompt cancels it
    pub fn handle_backdrop(
        &mut self,
        event: &EventKind,
        screen: Rect,
        theme: &Theme,
    ) -> Option<AppAction> {
        self.dialog
            .handle_event(event, screen, theme, AppAction::ConfirmCancel)
    }

    fn render_content(frame: &mut Frame, modal: Rect, props: &ConfirmDialogProps<'_>) {
        let theme = props.theme;

        let block = Block::default()
            .borders(Borders::ALL)
            .border_style(Style::default().fg(theme.danger))
            .title(Span::styled(
                " Xóa công việc ",
                Style::default()
                    .fg(theme.danger)
                    .add_modifier(Modifier::BOLD),
            ))
            .style(Style::default().bg(theme.overlay));
        let inner = block.inner(modal);
        frame.render_widget(block, modal);

        let [question, subject, _, buttons] = Layout::vertical([
            Constraint::Length(2),
            Constraint::Length(1),
            Constraint::Min(0),
            Constraint::Length(1),
        ])
        .areas(inner);

        frame.render_widget(
            Paragraph::new(DELETE_QUESTION)
                .style(Style::default().fg(theme.fg))
                .wrap(Wrap { trim: true })
                .centered(),
            question,
        );
        frame.render_widget(
            Paragraph::new(Span::styled(
                format!("\u{201c}{}\u{201d}", props.subject),
                Style::default().fg(theme.muted),
            ))
            .centered(),
            subject,
        );

        let key_style = Style::default().add_modifier(Modifier::BOLD);
        let line = Line::from(vec![
            Span::styled("[y] ", key_style.fg(theme.danger)),
            Span::styled("Xóa", Style::default().fg(theme.fg)),
            Span::raw("     "),
            Span::styled("[n] ", key_style.fg(theme.accent)),
            Span::styled("Hủy", Style::default().fg(theme.fg)),
        ])
        .centered();
        frame.render_widget(Paragraph::new(line), buttons);
    }
}

impl Component<AppAction> for ConfirmDialog {
    type Props<'a> = ConfirmDialogProps<'a>;

    fn render(&mut self, frame: &mut Frame, area: Rect, props: Self::Props<'_>) {
        let mut content =
            |frame: &mut Frame, modal: Rect| Self::render_content(frame, modal, &props);
        self.dialog.render(
            frame,
            area,
            props.theme,
            AppAction::ConfirmCancel,
            &mut content,
        );
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tui_dispatch::testing::RenderHarness;

    #[test]
    fn test_render() {
        let theme = Theme::light();
        let mut dialog = ConfirmDialog::new();
        let mut harness = RenderHarness::new(80, 20);
        let output = harness.render_to_string_plain(|frame| {
            dialog.render(
                frame,
                frame.area(),
                ConfirmDialogProps {
                    subject: "Mua sữa",
                    theme: &theme,
                },
            )
        });
        assert!(output.contains(DELETE_QUESTION));
        assert!(output.contains("Mua sữa"));
        assert!(output.contains("[y] Xóa"));
        assert!(output.contains("[n] Hủy"));
    }
}
