//! View pipeline: collection + transient UI state -> ordered todos to display
//!
//! Everything here is a pure function of its inputs. "Today" is passed in
//! explicitly so callers decide which calendar date counts as today (the UI
//! uses the local date).
//!
//! Pipeline order: project filter -> status filter -> search -> stable sort.

use std::cmp::Ordering;
use std::collections::HashMap;

use chrono::{Datelike, NaiveDate};

use crate::collate;
use crate::model::{Project, Todo};

/// Which project's todos to show
#[derive(Clone, Debug, Default, PartialEq, Eq, Hash)]
pub enum ProjectFilter {
    #[default]
    All,
    Only(String),
}

impl ProjectFilter {
    pub fn matches(&self, todo: &Todo) -> bool {
        match self {
            ProjectFilter::All => true,
            ProjectFilter::Only(id) => todo.project == *id,
        }
    }
}

/// Status predicate over due date and completion
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash)]
pub enum StatusFilter {
    /// Pass-through
    #[default]
    None,
    Today,
    Upcoming,
    Overdue,
    Completed,
}

impl StatusFilter {
    /// Selectable filters, in sidebar order
    pub fn all() -> &'static [StatusFilter] {
        &[
            StatusFilter::Today,
            StatusFilter::Upcoming,
            StatusFilter::Overdue,
            StatusFilter::Completed,
        ]
    }

    pub fn matches(self, todo: &Todo, today: NaiveDate) -> bool {
        match self {
            StatusFilter::None => true,
            StatusFilter::Today => !todo.completed && todo.due_date == Some(today),
            StatusFilter::Upcoming => !todo.completed && todo.due_date.is_some_and(|d| d > today),
            StatusFilter::Overdue => !todo.completed && todo.due_date.is_some_and(|d| d < today),
            StatusFilter::Completed => todo.completed,
        }
    }

    pub fn label(self) -> &'static str {
        match self {
            StatusFilter::None => ALL_TODOS_TITLE,
            StatusFilter::Today => "Hôm nay",
            StatusFilter::Upcoming => "Sắp tới",
            StatusFilter::Overdue => "Quá hạn",
            StatusFilter::Completed => "Hoàn thành",
        }
    }
}

/// Display order of the filtered todos
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash)]
pub enum SortMode {
    /// Newest first
    #[default]
    Created,
    /// Earliest due date first, undated last
    Due,
    /// Urgent first
    Priority,
    /// Vietnamese collation on title
    Name,
}

impl SortMode {
    pub fn next(self) -> Self {
        match self {
            SortMode::Created => SortMode::Due,
            SortMode::Due => SortMode::Priority,
            SortMode::Priority => SortMode::Name,
            SortMode::Name => SortMode::Created,
        }
    }

    pub fn label(self) -> &'static str {
        match self {
            SortMode::Created => "Ngày tạo",
            SortMode::Due => "Hạn chót",
            SortMode::Priority => "Độ ưu tiên",
            SortMode::Name => "Tên",
        }
    }

    /// Ordering of two todos under this mode; ties are `Equal`
    pub fn compare(self, a: &Todo, b: &Todo) -> Ordering {
        match self {
            SortMode::Created => b.created_at.cmp(&a.created_at),
            SortMode::Due => match (a.due_date, b.due_date) {
                (Some(a), Some(b)) => a.cmp(&b),
                (Some(_), None) => Ordering::Less,
                (None, Some(_)) => Ordering::Greater,
                (None, None) => Ordering::Equal,
            },
            SortMode::Priority => a.priority.rank().cmp(&b.priority.rank()),
            SortMode::Name => collate::compare(&a.title, &b.title),
        }
    }
}

/// Transient UI state the pipeline depends on
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct ViewQuery {
    pub project: ProjectFilter,
    pub status: StatusFilter,
    pub search: String,
    pub sort: SortMode,
}

impl ViewQuery {
    /// Search text as matched: trimmed and lowercased
    pub fn needle(&self) -> String {
        self.search.trim().to_lowercase()
    }

    /// Whether a todo passes every filter (sorting aside)
    pub fn matches(&self, todo: &Todo, today: NaiveDate) -> bool {
        self.project.matches(todo)
            && self.status.matches(todo, today)
            && matches_search(todo, &self.needle())
    }
}

/// Case-insensitive substring match over title, description and tags.
/// `needle` must already be lowercased; empty matches everything.
pub fn matches_search(todo: &Todo, needle: &str) -> bool {
    if needle.is_empty() {
        return true;
    }
    todo.title.to_lowercase().contains(needle)
        || todo.description.to_lowercase().contains(needle)
        || todo
            .tags
            .iter()
            .any(|tag| tag.to_lowercase().contains(needle))
}

/// Run the full pipeline
pub fn apply<'a>(todos: &'a [Todo], query: &ViewQuery, today: NaiveDate) -> Vec<&'a Todo> {
    let needle = query.needle();
    let mut visible: Vec<&Todo> = todos
        .iter()
        .filter(|todo| query.project.matches(todo))
        .filter(|todo| query.status.matches(todo, today))
        .filter(|todo| matches_search(todo, &needle))
        .collect();

    // sort_by is stable: ties keep collection order
    visible.sort_by(|a, b| query.sort.compare(a, b));
    visible
}

/// Badge counts over the unfiltered collection
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct Counts {
    pub all: usize,
    projects: HashMap<String, usize>,
    statuses: HashMap<StatusFilter, usize>,
}

impl Counts {
    pub fn over(todos: &[Todo], today: NaiveDate) -> Self {
        let mut counts = Counts {
            all: todos.len(),
            ..Default::default()
        };
        for todo in todos {
            *counts.projects.entry(todo.project.clone()).or_default() += 1;
            for &status in StatusFilter::all() {
                if status.matches(todo, today) {
                    *counts.statuses.entry(status).or_default() += 1;
                }
            }
        }
        counts
    }

    /// Todos referencing `project_id`, regardless of filters
    pub fn project(&self, project_id: &str) -> usize {
        self.projects.get(project_id).copied().unwrap_or(0)
    }

    pub fn status(&self, status: StatusFilter) -> usize {
        match status {
            StatusFilter::None => self.all,
            other => self.statuses.get(&other).copied().unwrap_or(0),
        }
    }
}

/// Distinct tags across all todos, in first-seen order
pub fn tag_index(todos: &[Todo]) -> Vec<String> {
    let mut tags: Vec<String> = Vec::new();
    for tag in todos.iter().flat_map(|todo| todo.tags.iter()) {
        if !tags.contains(tag) {
            tags.push(tag.clone());
        }
    }
    tags
}

/// Title shown when no status filter or project narrows the view
pub const ALL_TODOS_TITLE: &str = "Tất cả công việc";

/// Heading for the current view: status filter wins over project
pub fn view_title(query: &ViewQuery, projects: &[Project]) -> String {
    if query.status != StatusFilter::None {
        return query.status.label().to_string();
    }
    match &query.project {
        ProjectFilter::Only(id) => projects
            .iter()
            .find(|p| p.id == *id)
            .map(|p| p.name.clone())
            .unwrap_or_else(|| ALL_TODOS_TITLE.to_string()),
        ProjectFilter::All => ALL_TODOS_TITLE.to_string(),
    }
}

/// How a todo's due date is presented
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum DueLabel {
    Overdue,
    Today,
    Tomorrow,
    Date(NaiveDate),
}

impl DueLabel {
    /// `None` when the todo has no due date
    pub fn for_todo(todo: &Todo, today: NaiveDate) -> Option<Self> {
        let due = todo.due_date?;
        let label = if due < today && !todo.completed {
            DueLabel::Overdue
        } else if due == today {
            DueLabel::Today
        } else if today.succ_opt() == Some(due) {
            DueLabel::Tomorrow
        } else {
            DueLabel::Date(due)
        };
        Some(label)
    }

    pub fn text(self) -> String {
        match self {
            DueLabel::Overdue => "Quá hạn".to_string(),
            DueLabel::Today => "Hôm nay".to_string(),
            DueLabel::Tomorrow => "Ngày mai".to_string(),
            DueLabel::Date(d) => format_date_vi(d),
        }
    }
}

/// `d/m/yyyy`, the vi-VN short date form
pub fn format_date_vi(date: NaiveDate) -> String {
    format!("{}/{}/{}", date.day(), date.month(), date.year())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::model::{Priority, TodoId};
    use chrono::{DateTime, Duration, TimeZone, Utc};

    fn today() -> NaiveDate {
        NaiveDate::from_ymd_opt(2024, 6, 15).unwrap()
    }

    fn created(minutes: i64) -> DateTime<Utc> {
        Utc.with_ymd_and_hms(2024, 6, 1, 0, 0, 0).unwrap() + Duration::minutes(minutes)
    }

    fn todo(id: &str, title: &str) -> Todo {
        Todo {
            id: TodoId::from(id),
            title: title.to_string(),
            description: String::new(),
            due_date: None,
            priority: Priority::Medium,
            project: "personal".to_string(),
            tags: Vec::new(),
            completed: false,
            created_at: created(id.parse().unwrap_or(0)),
            completed_at: None,
        }
    }

    fn due(mut t: Todo, days_from_today: i64) -> Todo {
        t.due_date = Some(today() + Duration::days(days_from_today));
        t
    }

    fn done(mut t: Todo) -> Todo {
        t.completed = true;
        t.completed_at = Some(t.created_at);
        t
    }

    fn ids(todos: &[&Todo]) -> Vec<String> {
        todos.iter().map(|t| t.id.to_string()).collect()
    }

    fn query(status: StatusFilter) -> ViewQuery {
        ViewQuery {
            status,
            ..Default::default()
        }
    }

    #[test]
    fn test_default_query_sorts_newest_first() {
        let todos = vec![todo("1", "a"), todo("2", "b"), todo("3", "c")];
        let visible = apply(&todos, &ViewQuery::default(), today());
        assert_eq!(ids(&visible), vec!["3", "2", "1"]);
    }

    #[test]
    fn test_status_filters() {
        let todos = vec![
            due(todo("1", "today"), 0),
            due(todo("2", "tomorrow"), 1),
            due(todo("3", "yesterday"), -1),
            done(due(todo("4", "done yesterday"), -1)),
            todo("5", "undated"),
        ];
        let sorted = |status| {
            let mut v = ids(&apply(&todos, &query(status), today()));
            v.sort();
            v
        };

        assert_eq!(sorted(StatusFilter::Today), vec!["1"]);
        assert_eq!(sorted(StatusFilter::Upcoming), vec!["2"]);
        assert_eq!(sorted(StatusFilter::Overdue), vec!["3"]);
        assert_eq!(sorted(StatusFilter::Completed), vec!["4"]);
        assert_eq!(sorted(StatusFilter::None).len(), 5);
    }

    #[test]
    fn test_overdue_excludes_undated_and_completed() {
        let todos = vec![
            todo("1", "undated"),
            done(due(todo("2", "done"), -3)),
            done(todo("3", "done undated")),
        ];
        assert!(apply(&todos, &query(StatusFilter::Overdue), today()).is_empty());
    }

    #[test]
    fn test_undated_never_matches_date_filters() {
        let t = todo("1", "undated");
        for status in [
            StatusFilter::Today,
            StatusFilter::Upcoming,
            StatusFilter::Overdue,
        ] {
            assert!(!status.matches(&t, today()), "{status:?}");
        }
    }

    #[test]
    fn test_project_filter_keeps_created_order() {
        let mut todos: Vec<Todo> = (1..=5).map(|i| todo(&i.to_string(), "t")).collect();
        todos[1].project = "work".into();
        todos[3].project = "work".into();

        let q = ViewQuery {
            project: ProjectFilter::Only("work".into()),
            ..Default::default()
        };
        assert_eq!(ids(&apply(&todos, &q, today())), vec!["4", "2"]);
    }

    #[test]
    fn test_search_matches_title_description_and_tags() {
        let mut a = todo("1", "Hoàn thành báo cáo");
        a.tags = vec!["tháng".into()];
        let mut b = todo("2", "Mua sắm");
        b.description = "Mua THỰC PHẨM".into();
        let mut c = todo("3", "Tập thể dục");
        c.tags = vec!["báo cáo".into()];
        let todos = vec![a, b, c];

        let search = |text: &str| {
            let q = ViewQuery {
                search: text.into(),
                ..Default::default()
            };
            let mut v = ids(&apply(&todos, &q, today()));
            v.sort();
            v
        };

        assert_eq!(search("thực phẩm"), vec!["2"]);
        assert_eq!(search("  THÁNG "), vec!["1"]);
        assert_eq!(search("báo"), vec!["1", "3"]);
        assert_eq!(search("").len(), 3);
    }

    #[test]
    fn test_tag_only_search_is_case_insensitive() {
        let mut tagged = todo("1", "Viết tổng kết");
        tagged.tags = vec!["báo cáo".into()];
        let todos = vec![tagged, todo("2", "Khác")];

        let q = ViewQuery {
            search: "BÁO".into(),
            ..Default::default()
        };
        assert_eq!(ids(&apply(&todos, &q, today())), vec!["1"]);
    }

    #[test]
    fn test_sort_due_puts_undated_last() {
        let todos = vec![
            todo("1", "undated"),
            due(todo("2", "later"), 5),
            due(todo("3", "sooner"), -2),
            todo("4", "also undated"),
            due(todo("5", "same as later"), 5),
        ];
        let q = ViewQuery {
            sort: SortMode::Due,
            ..Default::default()
        };
        assert_eq!(ids(&apply(&todos, &q, today())), vec!["3", "2", "5", "1", "4"]);
    }

    #[test]
    fn test_sort_priority_urgent_first() {
        let mut todos = vec![todo("1", "a"), todo("2", "b"), todo("3", "c"), todo("4", "d")];
        todos[0].priority = Priority::Low;
        todos[1].priority = Priority::Urgent;
        todos[2].priority = Priority::Medium;
        todos[3].priority = Priority::High;

        let q = ViewQuery {
            sort: SortMode::Priority,
            ..Default::default()
        };
        assert_eq!(ids(&apply(&todos, &q, today())), vec!["2", "4", "3", "1"]);
    }

    #[test]
    fn test_scenario_due_vs_priority() {
        let mut a = todo("1", "A");
        a.due_date = NaiveDate::from_ymd_opt(2024, 1, 1);
        a.priority = Priority::Low;
        let mut b = todo("2", "B");
        b.priority = Priority::Urgent;
        let todos = vec![a, b];

        let by = |sort| {
            let q = ViewQuery {
                sort,
                ..Default::default()
            };
            apply(&todos, &q, today())
                .iter()
                .map(|t| t.title.clone())
                .collect::<Vec<_>>()
        };

        assert_eq!(by(SortMode::Due), vec!["A", "B"]);
        assert_eq!(by(SortMode::Priority), vec!["B", "A"]);
    }

    #[test]
    fn test_sort_name_uses_vietnamese_order() {
        let todos = vec![todo("1", "Đọc sách"), todo("2", "Dọn nhà"), todo("3", "Ăn tối")];
        let q = ViewQuery {
            sort: SortMode::Name,
            ..Default::default()
        };
        let titles: Vec<_> = apply(&todos, &q, today())
            .iter()
            .map(|t| t.title.as_str())
            .collect();
        assert_eq!(titles, vec!["Ăn tối", "Dọn nhà", "Đọc sách"]);
    }

    #[test]
    fn test_counts_ignore_filters() {
        let mut todos = vec![
            due(todo("1", "a"), 0),
            due(todo("2", "b"), -1),
            done(todo("3", "c")),
            todo("4", "d"),
        ];
        todos[0].project = "work".into();
        todos[1].project = "work".into();
        todos[3].project = "gone".into();

        let counts = Counts::over(&todos, today());
        assert_eq!(counts.all, 4);
        assert_eq!(counts.project("work"), 2);
        assert_eq!(counts.project("personal"), 1);
        assert_eq!(counts.project("gone"), 1);
        assert_eq!(counts.project("shopping"), 0);
        assert_eq!(counts.status(StatusFilter::Today), 1);
        assert_eq!(counts.status(StatusFilter::Overdue), 1);
        assert_eq!(counts.status(StatusFilter::Completed), 1);
        assert_eq!(counts.status(StatusFilter::Upcoming), 0);
        assert_eq!(counts.status(StatusFilter::None), 4);
    }

    #[test]
    fn test_tag_index_first_seen_distinct() {
        let mut a = todo("1", "a");
        a.tags = vec!["x".into(), "y".into(), "x".into()];
        let mut b = todo("2", "b");
        b.tags = vec!["z".into(), "y".into()];
        assert_eq!(tag_index(&[a, b]), vec!["x", "y", "z"]);
        assert!(tag_index(&[]).is_empty());
    }

    #[test]
    fn test_view_title() {
        let projects = crate::model::default_projects();
        let mut q = ViewQuery::default();
        assert_eq!(view_title(&q, &projects), "Tất cả công việc");

        q.project = ProjectFilter::Only("work".into());
        assert_eq!(view_title(&q, &projects), "Công việc");

        q.status = StatusFilter::Overdue;
        assert_eq!(view_title(&q, &projects), "Quá hạn");

        q.status = StatusFilter::None;
        q.project = ProjectFilter::Only("missing".into());
        assert_eq!(view_title(&q, &projects), "Tất cả công việc");
    }

    #[test]
    fn test_due_label() {
        assert_eq!(DueLabel::for_todo(&todo("1", "a"), today()), None);
        assert_eq!(
            DueLabel::for_todo(&due(todo("1", "a"), -1), today()),
            Some(DueLabel::Overdue)
        );
        assert_eq!(
            DueLabel::for_todo(&due(todo("1", "a"), 0), today()),
            Some(DueLabel::Today)
        );
        assert_eq!(
            DueLabel::for_todo(&due(todo("1", "a"), 1), today()),
            Some(DueLabel::Tomorrow)
        );

        let past_done = done(due(todo("1", "a"), -10));
        let label = DueLabel::for_todo(&past_done, today()).unwrap();
        assert_eq!(label.text(), "5/6/2024");
    }
}
