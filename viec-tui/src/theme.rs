//! Light and dark palettes

use ratatui::style::{Color, Modifier, Style};
use ratatui::widgets::Borders;
use tui_dispatch_components::{BaseStyle, BorderStyle, ModalStyle, Padding, TextInputStyle};
use viec_core::{Priority, Project};

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct Theme {
    pub bg: Color,
    pub fg: Color,
    pub muted: Color,
    pub accent: Color,
    pub border: Color,
    pub border_focused: Color,
    pub selection: Color,
    /// Background of modal dialogs
    pub overlay: Color,
    pub success: Color,
    pub warning: Color,
    pub danger: Color,
}

impl Theme {
    pub fn light() -> Self {
        Self {
            bg: Color::Rgb(248, 249, 250),
            fg: Color::Rgb(33, 37, 41),
            muted: Color::Rgb(108, 117, 125),
            accent: Color::Rgb(66, 133, 244),
            border: Color::Rgb(206, 212, 218),
            border_focused: Color::Rgb(66, 133, 244),
            selection: Color::Rgb(225, 236, 254),
            overlay: Color::Rgb(255, 255, 255),
            success: Color::Rgb(52, 168, 83),
            warning: Color::Rgb(230, 160, 0),
            danger: Color::Rgb(234, 67, 53),
        }
    }

    pub fn dark() -> Self {
        Self {
            bg: Color::Rgb(24, 26, 31),
            fg: Color::Rgb(230, 232, 235),
            muted: Color::Rgb(140, 146, 156),
            accent: Color::Rgb(138, 180, 248),
            border: Color::Rgb(60, 64, 72),
            border_focused: Color::Rgb(138, 180, 248),
            selection: Color::Rgb(45, 55, 75),
            overlay: Color::Rgb(36, 39, 46),
            success: Color::Rgb(129, 201, 149),
            warning: Color::Rgb(253, 214, 99),
            danger: Color::Rgb(242, 139, 130),
        }
    }

    pub fn for_dark(dark: bool) -> Self {
        if dark {
            Self::dark()
        } else {
            Self::light()
        }
    }

    pub fn base(&self) -> Style {
        Style::default().fg(self.fg).bg(self.bg)
    }

    pub fn border_style(&self, focused: bool) -> Style {
        Style::default().fg(if focused {
            self.border_focused
        } else {
            self.border
        })
    }

    pub fn selected(&self) -> Style {
        Style::default()
            .bg(self.selection)
            .add_modifier(Modifier::BOLD)
    }

    pub fn priority(&self, priority: Priority) -> Color {
        match priority {
            Priority::Low => self.muted,
            Priority::Medium => self.accent,
            Priority::High => self.warning,
            Priority::Urgent => self.danger,
        }
    }

    /// Dialog backdrop: half-dimmed screen, `overlay` fill
    pub fn modal(&self) -> ModalStyle {
        ModalStyle::with_bg(self.overlay)
    }

    /// Text input colors; `bordered` draws a box that lights up on focus
    pub fn text_input(&self, bordered: bool) -> TextInputStyle {
        let border = bordered.then(|| BorderStyle {
            borders: Borders::ALL,
            style: self.border_style(false),
            focused_style: Some(self.border_style(true)),
        });
        TextInputStyle {
            base: BaseStyle {
                border,
                padding: Padding::default(),
                bg: None,
                fg: Some(self.fg),
            },
            placeholder_style: Some(Style::default().fg(self.muted)),
            cursor_style: None,
        }
    }

    /// Project swatch color, falling back to `accent` for malformed hex
    pub fn project(&self, project: &Project) -> Color {
        project
            .rgb()
            .map(|(r, g, b)| Color::Rgb(r, g, b))
            .unwrap_or(self.accent)
    }
}

impl Default for Theme {
    fn default() -> Self {
        Self::light()
    }
}
