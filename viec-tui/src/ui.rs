//! Screen layout and event routing
//!
//! Events go through the keymap first; keys without a binding in the active
//! context fall through to whichever text input has focus.

use crossterm::event::KeyEventKind;
use ratatui::{
    layout::{Constraint, Layout, Rect},
    widgets::Paragraph,
    Frame,
};
use tui_dispatch::{Component, EventKind};

use crate::action::AppAction;
use crate::components::{
    ConfirmDialog, ConfirmDialogProps, Header, HeaderProps, HelpBar, HelpBarProps,
    ProjectFormView, ProjectFormViewProps, Sidebar, SidebarProps, TodoFormView, TodoFormViewProps,
    TodoList, TodoListProps,
};
use crate::keymap::{self, Command, Keybindings};
use crate::state::{AppState, Focus, Mode};
use crate::theme::Theme;

pub const SIDEBAR_WIDTH: u16 = 30;
pub const HEADER_HEIGHT: u16 = 4;

pub struct TodoUi {
    keybindings: Keybindings,
    sidebar: Sidebar,
    header: Header,
    list: TodoList,
    todo_form: TodoFormView,
    project_form: ProjectFormView,
    confirm: ConfirmDialog,
}

impl TodoUi {
    pub fn new(keybindings: Keybindings) -> Self {
        Self {
            keybindings,
            sidebar: Sidebar::new(),
            header: Header::new(),
            list: TodoList::new(),
            todo_form: TodoFormView::new(),
            project_form: ProjectFormView::new(),
            confirm: ConfirmDialog::new(),
        }
    }

    pub fn keybindings(&self) -> &Keybindings {
        &self.keybindings
    }

    /// Modal dialogs reset their inputs when they open
    fn sync_modals(&mut self, state: &AppState, theme: &Theme) {
        let form = (state.mode == Mode::TodoForm).then_some(&state.form);
        self.todo_form.set_open(form, theme);
        self.project_form.set_open(state.mode == Mode::ProjectForm);
    }

    pub fn render(&mut self, frame: &mut Frame, state: &AppState) {
        let theme = Theme::for_dark(state.dark_theme());
        self.sync_modals(state, &theme);
        let area = frame.area();
        frame.render_widget(Paragraph::new("").style(theme.base()), area);

        let [body, help] =
            Layout::vertical([Constraint::Min(0), Constraint::Length(1)]).areas(area);
        let [sidebar_area, main_area] =
            Layout::horizontal([Constraint::Length(SIDEBAR_WIDTH), Constraint::Min(0)])
                .areas(body);
        let [header_area, list_area] =
            Layout::vertical([Constraint::Length(HEADER_HEIGHT), Constraint::Min(0)])
                .areas(main_area);

        let in_normal = state.mode == Mode::Normal;
        self.sidebar.render(
            frame,
            sidebar_area,
            SidebarProps {
                state,
                theme: &theme,
                is_focused: in_normal && state.focus == Focus::Sidebar,
            },
        );

        let visible = state.visible();
        let title = state.title();
        self.header.render(
            frame,
            header_area,
            HeaderProps {
                title: &title,
                count: visible.len(),
                sort_label: state.query.sort.label(),
                search: &state.query.search,
                is_searching: state.mode == Mode::Search,
                theme: &theme,
            },
        );

        let list_area = Rect {
            x: list_area.x + 1,
            width: list_area.width.saturating_sub(1),
            ..list_area
        };
        self.list.render(
            frame,
            list_area,
            TodoListProps {
                todos: &visible,
                projects: state.projects(),
                today: state.today,
                selected: state.list_cursor,
                is_focused: in_normal && state.focus == Focus::List,
                theme: &theme,
            },
        );

        HelpBar.render(
            frame,
            help,
            HelpBarProps {
                keybindings: &self.keybindings,
                context: state.mode.key_context(),
                theme: &theme,
            },
        );

        match &state.mode {
            Mode::TodoForm => self.todo_form.render(
                frame,
                area,
                TodoFormViewProps {
                    form: &state.form,
                    projects: state.projects(),
                    theme: &theme,
                },
            ),
            Mode::ProjectForm => self.project_form.render(
                frame,
                area,
                ProjectFormViewProps {
                    form: &state.project_form,
                    theme: &theme,
                },
            ),
            Mode::ConfirmDelete(id) => {
                let subject = state.store.todo(id).map(|t| t.title.as_str()).unwrap_or("");
                self.confirm.render(
                    frame,
                    area,
                    ConfirmDialogProps {
                        subject,
                        theme: &theme,
                    },
                );
            }
            Mode::Normal | Mode::Search => {}
        }
    }

    pub fn map_event(&mut self, event: &EventKind, state: &AppState) -> Vec<AppAction> {
        let theme = Theme::for_dark(state.dark_theme());
        self.sync_modals(state, &theme);

        match event {
            EventKind::Resize(width, height) => {
                return vec![AppAction::UiTerminalResize(*width, *height)]
            }
            EventKind::Tick => return vec![AppAction::Tick],
            EventKind::Scroll { delta, .. } if state.mode == Mode::Normal => {
                if state.focus == Focus::Sidebar {
                    return vec![if *delta > 0 {
                        AppAction::SidebarSelectNext
                    } else {
                        AppAction::SidebarSelectPrev
                    }];
                }
                let visible = state.visible();
                return self
                    .list
                    .handle_event(
                        event,
                        TodoListProps {
                            todos: &visible,
                            projects: state.projects(),
                            today: state.today,
                            selected: state.list_cursor,
                            is_focused: true,
                            theme: &theme,
                        },
                    )
                    .into_iter()
                    .collect();
            }
            // Terminals reporting releases would double every key
            EventKind::Key(key) if key.kind == KeyEventKind::Release => return Vec::new(),
            EventKind::Key(key) => {
                let context = state.mode.key_context();
                if let Some(command) = keymap::command(&self.keybindings, key, context) {
                    return command_actions(command, state);
                }
            }
            EventKind::Mouse(_) => return self.backdrop_click(event, state, &theme),
            _ => return Vec::new(),
        }

        // Unbound key: route to the focused text input
        match state.mode {
            Mode::Search => {
                let title = state.title();
                self.header
                    .handle_event(
                        event,
                        HeaderProps {
                            title: &title,
                            count: 0,
                            sort_label: state.query.sort.label(),
                            search: &state.query.search,
                            is_searching: true,
                            theme: &theme,
                        },
                    )
                    .into_iter()
                    .collect()
            }
            Mode::TodoForm => self
                .todo_form
                .handle_event(
                    event,
                    TodoFormViewProps {
                        form: &state.form,
                        projects: state.projects(),
                        theme: &theme,
                    },
                )
                .into_iter()
                .collect(),
            Mode::ProjectForm => self
                .project_form
                .handle_event(
                    event,
                    ProjectFormViewProps {
                        form: &state.project_form,
                        theme: &theme,
                    },
                )
                .into_iter()
                .collect(),
            Mode::Normal | Mode::ConfirmDelete(_) => Vec::new(),
        }
    }
}

impl TodoUi {
    /// A click outside the open dialog closes it
    fn backdrop_click(
        &mut self,
        event: &EventKind,
        state: &AppState,
        theme: &Theme,
    ) -> Vec<AppAction> {
        let (width, height) = state.terminal_size;
        let screen = Rect::new(0, 0, width, height);
        let action = match state.mode {
            Mode::TodoForm => self.todo_form.handle_backdrop(event, screen, theme),
            Mode::ProjectForm => self.project_form.handle_backdrop(event, screen, theme),
            Mode::ConfirmDelete(_) => self.confirm.handle_backdrop(event, screen, theme),
            Mode::Normal | Mode::Search => None,
        };
        action.into_iter().collect()
    }
}

/// Actions for a bound command in the current mode and focus
fn command_actions(command: Command, state: &AppState) -> Vec<AppAction> {
    let selected = || state.selected_todo().map(|todo| todo.id.clone());
    let on_sidebar = state.focus == Focus::Sidebar;

    let action = match command {
        Command::Quit => Some(AppAction::Quit),
        Command::Up if on_sidebar => Some(AppAction::SidebarSelectPrev),
        Command::Up => Some(AppAction::ListSelectPrev),
        Command::Down if on_sidebar => Some(AppAction::SidebarSelectNext),
        Command::Down => Some(AppAction::ListSelectNext),
        Command::Select | Command::Toggle if on_sidebar => Some(AppAction::SidebarActivate),
        Command::Select => selected().map(AppAction::FormOpenEdit),
        Command::Toggle => selected().map(AppAction::TodoToggle),
        Command::Edit => selected().map(AppAction::FormOpenEdit),
        Command::Delete => selected().map(AppAction::TodoDeleteRequest),
        Command::New => Some(AppAction::FormOpenNew),
        Command::NewProject => Some(AppAction::ProjectFormOpen),
        Command::Search => Some(AppAction::SearchStart),
        Command::Back if !state.query.search.is_empty() => Some(AppAction::SearchClear),
        Command::Back => Some(AppAction::FilterReset),
        Command::Sort => Some(AppAction::SortCycle),
        Command::Theme => Some(AppAction::UiThemeToggle),
        Command::Focus => Some(AppAction::FocusToggle),
        Command::FilterAll => Some(AppAction::FilterReset),
        Command::FilterToday => Some(AppAction::FilterStatus(viec_core::StatusFilter::Today)),
        Command::FilterUpcoming => {
            Some(AppAction::FilterStatus(viec_core::StatusFilter::Upcoming))
        }
        Command::FilterOverdue => Some(AppAction::FilterStatus(viec_core::StatusFilter::Overdue)),
        Command::FilterCompleted => {
            Some(AppAction::FilterStatus(viec_core::StatusFilter::Completed))
        }
        Command::Close => Some(AppAction::SearchClose),
        Command::Submit if state.mode == Mode::ProjectForm => Some(AppAction::ProjectSubmit),
        Command::Submit => Some(AppAction::FormSubmit),
        Command::Cancel => Some(match state.mode {
            Mode::ProjectForm => AppAction::ProjectCancel,
            Mode::ConfirmDelete(_) => AppAction::ConfirmCancel,
            _ => AppAction::FormCancel,
        }),
        Command::NextField => Some(AppAction::FormFocusNext),
        Command::PrevField => Some(AppAction::FormFocusPrev),
        Command::CycleColor => Some(AppAction::ProjectColorCycle),
        Command::Accept => Some(AppAction::ConfirmAccept),
    };
    action.into_iter().collect()
}
