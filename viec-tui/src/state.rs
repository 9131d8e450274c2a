//! Application state - single source of truth
//!
//! Components receive `&AppState` (or pieces of it) as props and never
//! mutate it; only the reducer does.

use chrono::{Local, NaiveDate, Utc};
use viec_core::{
    parse_due_date, parse_tags, sample_todos, view, Counts, FileStorage, MemoryStorage, Priority,
    Project, ProjectFilter, StatusFilter, Storage, Todo, TodoDraft, TodoId, TodoStore, ViewQuery,
};

use crate::config::Config;
use crate::keymap::KeyContext;

/// Store type used by the app; the backend is picked at startup
pub type AppStore = TodoStore<Box<dyn Storage>>;

/// Which pane receives navigation keys
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub enum Focus {
    Sidebar,
    #[default]
    List,
}

impl Focus {
    pub fn toggle(self) -> Self {
        match self {
            Focus::Sidebar => Focus::List,
            Focus::List => Focus::Sidebar,
        }
    }
}

/// What the keyboard is currently driving
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub enum Mode {
    #[default]
    Normal,
    Search,
    TodoForm,
    ProjectForm,
    ConfirmDelete(TodoId),
}

impl Mode {
    pub fn key_context(&self) -> KeyContext {
        match self {
            Mode::Normal => KeyContext::Normal,
            Mode::Search => KeyContext::Search,
            Mode::TodoForm => KeyContext::Form,
            Mode::ProjectForm => KeyContext::ProjectForm,
            Mode::ConfirmDelete(_) => KeyContext::Confirm,
        }
    }
}

/// Fields of the todo form, in tab order
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash)]
pub enum FormField {
    #[default]
    Title,
    Description,
    DueDate,
    Priority,
    Project,
    Tags,
}

impl FormField {
    pub fn all() -> &'static [FormField] {
        &[
            FormField::Title,
            FormField::Description,
            FormField::DueDate,
            FormField::Priority,
            FormField::Project,
            FormField::Tags,
        ]
    }

    pub fn next(self) -> Self {
        let all = Self::all();
        let idx = all.iter().position(|&f| f == self).unwrap_or(0);
        all[(idx + 1) % all.len()]
    }

    pub fn prev(self) -> Self {
        let all = Self::all();
        let idx = all.iter().position(|&f| f == self).unwrap_or(0);
        all[(idx + all.len() - 1) % all.len()]
    }

    pub fn label(self) -> &'static str {
        match self {
            FormField::Title => "Tiêu đề",
            FormField::Description => "Mô tả",
            FormField::DueDate => "Hạn chót",
            FormField::Priority => "Độ ưu tiên",
            FormField::Project => "Dự án",
            FormField::Tags => "Thẻ",
        }
    }

    /// Free-text fields edited through a text input
    pub fn is_text(self) -> bool {
        !matches!(self, FormField::Priority | FormField::Project)
    }
}

/// Raw contents of the create / edit form
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct TodoForm {
    /// `Some` when editing an existing todo
    pub editing: Option<TodoId>,
    pub title: String,
    pub description: String,
    pub due_date: String,
    pub priority: Priority,
    pub project: String,
    /// Comma-separated
    pub tags: String,
    pub field: FormField,
}

impl TodoForm {
    /// Empty form for a new todo
    pub fn blank(project: &str) -> Self {
        Self {
            project: project.to_string(),
            ..Default::default()
        }
    }

    /// Form pre-filled from an existing todo
    pub fn edit(todo: &Todo) -> Self {
        Self {
            editing: Some(todo.id.clone()),
            title: todo.title.clone(),
            description: todo.description.clone(),
            due_date: todo
                .due_date
                .map(|d| d.format("%Y-%m-%d").to_string())
                .unwrap_or_default(),
            priority: todo.priority,
            project: todo.project.clone(),
            tags: todo.tags.join(", "),
            field: FormField::Title,
        }
    }

    pub fn is_edit(&self) -> bool {
        self.editing.is_some()
    }

    pub fn heading(&self) -> &'static str {
        if self.is_edit() {
            "Chỉnh sửa công việc"
        } else {
            "Công việc mới"
        }
    }

    pub fn submit_label(&self) -> &'static str {
        if self.is_edit() {
            "Cập nhật công việc"
        } else {
            "Thêm công việc"
        }
    }

    /// Current text of a free-text field
    pub fn text(&self, field: FormField) -> &str {
        match field {
            FormField::Title => &self.title,
            FormField::Description => &self.description,
            FormField::DueDate => &self.due_date,
            FormField::Tags => &self.tags,
            FormField::Priority | FormField::Project => "",
        }
    }

    pub fn set_text(&mut self, field: FormField, value: String) {
        match field {
            FormField::Title => self.title = value,
            FormField::Description => self.description = value,
            FormField::DueDate => self.due_date = value,
            FormField::Tags => self.tags = value,
            FormField::Priority | FormField::Project => {}
        }
    }

    /// Build a draft; `None` if the due date is filled in but not a valid
    /// `YYYY-MM-DD` date
    pub fn to_draft(&self) -> Option<TodoDraft> {
        let due_date = parse_due_date(&self.due_date);
        if due_date.is_none() && !self.due_date.trim().is_empty() {
            return None;
        }
        Some(TodoDraft {
            title: self.title.clone(),
            description: self.description.clone(),
            due_date,
            priority: self.priority,
            project: self.project.clone(),
            tags: parse_tags(&self.tags),
        })
    }
}

/// Colors offered when creating a project
pub const PROJECT_COLORS: &[&str] = &[
    "#4285f4", "#34a853", "#fbbc04", "#ea4335", "#9c27b0", "#00acc1", "#ff7043", "#607d8b",
];

#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct ProjectForm {
    pub name: String,
    /// Index into [`PROJECT_COLORS`]
    pub color: usize,
}

impl ProjectForm {
    pub fn color(&self) -> &'static str {
        PROJECT_COLORS[self.color % PROJECT_COLORS.len()]
    }
}

/// A selectable sidebar row
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum SidebarItem {
    All,
    Project(String),
    Status(StatusFilter),
    Tag(String),
}

/// Local calendar date
pub fn local_today() -> NaiveDate {
    Local::now().date_naive()
}

pub struct AppState {
    pub store: AppStore,
    pub query: ViewQuery,
    /// Calendar date the status filters compare against
    pub today: NaiveDate,
    pub focus: Focus,
    pub mode: Mode,
    pub list_cursor: usize,
    pub sidebar_cursor: usize,
    pub form: TodoForm,
    pub project_form: ProjectForm,
    pub terminal_size: (u16, u16),
    /// Source of `today`, re-read on every tick
    pub clock: fn() -> NaiveDate,
}

impl AppState {
    pub fn new(store: AppStore, today: NaiveDate) -> Self {
        Self {
            store,
            query: ViewQuery::default(),
            today,
            focus: Focus::default(),
            mode: Mode::default(),
            list_cursor: 0,
            sidebar_cursor: 0,
            form: TodoForm::default(),
            project_form: ProjectForm::default(),
            terminal_size: (80, 24),
            clock: local_today,
        }
    }

    /// Open the configured storage, load it and seed samples on first run
    pub fn load(config: &Config) -> viec_core::Result<Self> {
        let storage: Box<dyn Storage> = if config.ephemeral {
            tracing::info!("Using in-memory storage");
            Box::new(MemoryStorage::new())
        } else {
            tracing::info!(dir = %config.data_dir.display(), "Using file storage");
            Box::new(FileStorage::new(&config.data_dir))
        };

        let mut store = TodoStore::load(storage)?;
        let today = local_today();
        if config.sample_data {
            store.seed_if_fresh(sample_todos(today, Utc::now()))?;
        }
        Ok(Self::new(store, today))
    }

    // ===== Derived views =====

    /// Todos after filters, search and sort
    pub fn visible(&self) -> Vec<&Todo> {
        view::apply(self.store.todos(), &self.query, self.today)
    }

    pub fn selected_todo(&self) -> Option<&Todo> {
        self.visible().get(self.list_cursor).copied()
    }

    pub fn counts(&self) -> Counts {
        Counts::over(self.store.todos(), self.today)
    }

    pub fn tags(&self) -> Vec<String> {
        view::tag_index(self.store.todos())
    }

    pub fn title(&self) -> String {
        view::view_title(&self.query, self.store.projects())
    }

    pub fn projects(&self) -> &[Project] {
        self.store.projects()
    }

    pub fn dark_theme(&self) -> bool {
        self.store.dark_theme()
    }

    /// Selectable sidebar rows, top to bottom
    pub fn sidebar_items(&self) -> Vec<SidebarItem> {
        let mut items = vec![SidebarItem::All];
        items.extend(
            self.store
                .projects()
                .iter()
                .map(|p| SidebarItem::Project(p.id.clone())),
        );
        items.extend(StatusFilter::all().iter().map(|&s| SidebarItem::Status(s)));
        items.extend(self.tags().into_iter().map(SidebarItem::Tag));
        items
    }

    /// Whether a sidebar row reflects the current query
    pub fn is_active(&self, item: &SidebarItem) -> bool {
        match item {
            SidebarItem::All => {
                self.query.project == ProjectFilter::All && self.query.status == StatusFilter::None
            }
            SidebarItem::Project(id) => self.query.project == ProjectFilter::Only(id.clone()),
            SidebarItem::Status(s) => self.query.status == *s,
            SidebarItem::Tag(tag) => self.query.search == *tag,
        }
    }

    /// Keep cursors inside their lists after the lists changed
    pub fn clamp_cursors(&mut self) {
        let visible = self.visible().len();
        self.list_cursor = self.list_cursor.min(visible.saturating_sub(1));
        let items = self.sidebar_items().len();
        self.sidebar_cursor = self.sidebar_cursor.min(items.saturating_sub(1));
    }

    /// Project preselected in a new form: the filtered project, else the first
    pub fn default_form_project(&self) -> String {
        match &self.query.project {
            ProjectFilter::Only(id) => id.clone(),
            ProjectFilter::All => self
                .store
                .projects()
                .first()
                .map(|p| p.id.clone())
                .unwrap_or_default(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn today() -> NaiveDate {
        NaiveDate::from_ymd_opt(2024, 6, 15).unwrap()
    }

    fn state() -> AppState {
        let store = TodoStore::load(Box::new(MemoryStorage::new()) as Box<dyn Storage>).unwrap();
        AppState::new(store, today())
    }

    #[test]
    fn test_form_field_cycle() {
        assert_eq!(FormField::Title.next(), FormField::Description);
        assert_eq!(FormField::Tags.next(), FormField::Title);
        assert_eq!(FormField::Title.prev(), FormField::Tags);
    }

    #[test]
    fn test_form_roundtrip_from_todo() {
        let mut state = state();
        let id = state
            .store
            .create(
                TodoDraft::new("Họp")
                    .due(today())
                    .priority(Priority::Urgent)
                    .project("work")
                    .tags(["a", "b"]),
            )
            .unwrap()
            .id
            .clone();

        let form = TodoForm::edit(state.store.todo(&id).unwrap());
        assert_eq!(form.due_date, "2024-06-15");
        assert_eq!(form.tags, "a, b");
        assert_eq!(form.submit_label(), "Cập nhật công việc");

        let draft = form.to_draft().unwrap();
        assert_eq!(draft.tags, vec!["a", "b"]);
        assert_eq!(draft.due_date, Some(today()));
    }

    #[test]
    fn test_form_rejects_malformed_due_date() {
        let mut form = TodoForm::blank("work");
        form.title = "x".into();
        form.due_date = "15/06/2024".into();
        assert_eq!(form.to_draft(), None);

        form.due_date = "  ".into();
        assert_eq!(form.to_draft().unwrap().due_date, None);
        assert_eq!(form.submit_label(), "Thêm công việc");
    }

    #[test]
    fn test_sidebar_items_layout() {
        let state = state();
        let items = state.sidebar_items();
        assert_eq!(items[0], SidebarItem::All);
        assert_eq!(items[1], SidebarItem::Project("personal".into()));
        assert_eq!(items[4], SidebarItem::Status(StatusFilter::Today));
        assert_eq!(items.len(), 1 + 3 + 4);
        assert!(state.is_active(&SidebarItem::All));
    }

    #[test]
    fn test_default_form_project_follows_filter() {
        let mut state = state();
        assert_eq!(state.default_form_project(), "personal");
        state.query.project = ProjectFilter::Only("shopping".into());
        assert_eq!(state.default_form_project(), "shopping");
    }

    #[test]
    fn test_mode_key_context() {
        assert_eq!(Mode::Normal.key_context(), KeyContext::Normal);
        assert_eq!(
            Mode::ConfirmDelete(TodoId::from("1")).key_context(),
            KeyContext::Confirm
        );
    }
}
