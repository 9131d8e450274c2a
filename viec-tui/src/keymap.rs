//! Context-aware keybindings
//!
//! Bindings map a [`Command`] name to one or more key strings (`"q"`,
//! `"ctrl+c"`, `"shift+tab"`). Lookup checks the active [`KeyContext`] first
//! and falls back to the global table. User bindings from the config file are
//! merged over [`defaults`] per command.
//!
//! Config shape:
//!
//! ```json
//! { "global": { "quit": ["ctrl+c"] }, "normal": { "new": ["n", "="] } }
//! ```

use crossterm::event::KeyEvent;
use tui_dispatch::BindingContext;

/// Keybindings keyed by [`KeyContext`]
pub type Keybindings = tui_dispatch::Keybindings<KeyContext>;

/// Which table is consulted for a key press
#[derive(BindingContext, Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum KeyContext {
    /// Browsing the sidebar or the list
    Normal,
    Search,
    Form,
    ProjectForm,
    Confirm,
}

/// Named commands that keys can be bound to
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum Command {
    Quit,
    Up,
    Down,
    Select,
    Toggle,
    Edit,
    Delete,
    New,
    NewProject,
    Search,
    Back,
    Sort,
    Theme,
    Focus,
    FilterAll,
    FilterToday,
    FilterUpcoming,
    FilterOverdue,
    FilterCompleted,
    Close,
    Submit,
    Cancel,
    NextField,
    PrevField,
    CycleColor,
    Accept,
}

impl Command {
    pub const ALL: &'static [Command] = &[
        Command::Quit,
        Command::Up,
        Command::Down,
        Command::Select,
        Command::Toggle,
        Command::Edit,
        Command::Delete,
        Command::New,
        Command::NewProject,
        Command::Search,
        Command::Back,
        Command::Sort,
        Command::Theme,
        Command::Focus,
        Command::FilterAll,
        Command::FilterToday,
        Command::FilterUpcoming,
        Command::FilterOverdue,
        Command::FilterCompleted,
        Command::Close,
        Command::Submit,
        Command::Cancel,
        Command::NextField,
        Command::PrevField,
        Command::CycleColor,
        Command::Accept,
    ];

    /// Name used in config files
    pub fn name(self) -> &'static str {
        match self {
            Command::Quit => "quit",
            Command::Up => "up",
            Command::Down => "down",
            Command::Select => "select",
            Command::Toggle => "toggle",
            Command::Edit => "edit",
            Command::Delete => "delete",
            Command::New => "new",
            Command::NewProject => "new_project",
            Command::Search => "search",
            Command::Back => "back",
            Command::Sort => "sort",
            Command::Theme => "theme",
            Command::Focus => "focus",
            Command::FilterAll => "filter_all",
            Command::FilterToday => "filter_today",
            Command::FilterUpcoming => "filter_upcoming",
            Command::FilterOverdue => "filter_overdue",
            Command::FilterCompleted => "filter_completed",
            Command::Close => "close",
            Command::Submit => "submit",
            Command::Cancel => "cancel",
            Command::NextField => "next_field",
            Command::PrevField => "prev_field",
            Command::CycleColor => "cycle_color",
            Command::Accept => "accept",
        }
    }

    pub fn from_name(name: &str) -> Option<Self> {
        Self::ALL.iter().copied().find(|c| c.name() == name)
    }
}

/// Built-in bindings
pub fn defaults() -> Keybindings {
    let mut kb = Keybindings::new();
    let mut bind = |context: Option<KeyContext>, command: Command, keys: &[&str]| {
        let keys = keys.iter().map(|k| k.to_string()).collect();
        match context {
            Some(context) => kb.add(context, command.name(), keys),
            None => kb.add_global(command.name(), keys),
        }
    };

    bind(None, Command::Quit, &["ctrl+c"]);

    let normal = Some(KeyContext::Normal);
    bind(normal, Command::Quit, &["q"]);
    bind(normal, Command::Up, &["k", "up"]);
    bind(normal, Command::Down, &["j", "down"]);
    bind(normal, Command::Select, &["enter"]);
    bind(normal, Command::Toggle, &["space", "x"]);
    bind(normal, Command::Edit, &["e"]);
    bind(normal, Command::Delete, &["d", "delete"]);
    bind(normal, Command::New, &["n", "a"]);
    bind(normal, Command::NewProject, &["p"]);
    bind(normal, Command::Search, &["/"]);
    bind(normal, Command::Back, &["esc"]);
    bind(normal, Command::Sort, &["s"]);
    bind(normal, Command::Theme, &["t"]);
    bind(normal, Command::Focus, &["tab", "shift+tab"]);
    bind(normal, Command::FilterAll, &["0"]);
    bind(normal, Command::FilterToday, &["1"]);
    bind(normal, Command::FilterUpcoming, &["2"]);
    bind(normal, Command::FilterOverdue, &["3"]);
    bind(normal, Command::FilterCompleted, &["4"]);

    bind(Some(KeyContext::Search), Command::Close, &["esc", "enter"]);

    let form = Some(KeyContext::Form);
    bind(form, Command::Submit, &["enter"]);
    bind(form, Command::Cancel, &["esc"]);
    bind(form, Command::NextField, &["tab", "down"]);
    bind(form, Command::PrevField, &["shift+tab", "up"]);

    let project_form = Some(KeyContext::ProjectForm);
    bind(project_form, Command::Submit, &["enter"]);
    bind(project_form, Command::Cancel, &["esc"]);
    bind(project_form, Command::CycleColor, &["tab"]);

    let confirm = Some(KeyContext::Confirm);
    bind(confirm, Command::Accept, &["y", "enter"]);
    bind(confirm, Command::Cancel, &["n", "esc"]);

    kb
}

/// Command bound to `key` in `context`, falling back to global bindings
pub fn command(keybindings: &Keybindings, key: &KeyEvent, context: KeyContext) -> Option<Command> {
    keybindings
        .get_command_ref(key, context)
        .and_then(Command::from_name)
}

/// First key string bound to `command`, for help text
pub fn first_key(keybindings: &Keybindings, command: Command, context: KeyContext) -> Option<String> {
    keybindings.get_first_keybinding(command.name(), context)
}

/// Command names in `keybindings` that no [`Command`] answers to
pub fn unknown_commands(keybindings: &Keybindings) -> Vec<String> {
    let contexts = KeyContext::all()
        .iter()
        .filter_map(|&context| keybindings.get_context_bindings(context));
    let mut unknown: Vec<String> = std::iter::once(keybindings.global_bindings())
        .chain(contexts)
        .flat_map(|bindings| bindings.keys())
        .filter(|name| Command::from_name(name).is_none())
        .cloned()
        .collect();
    unknown.sort();
    unknown.dedup();
    unknown
}

#[cfg(test)]
mod tests {
    use super::*;
    use tui_dispatch::testing::key;

    #[test]
    fn test_context_names() {
        assert_eq!(KeyContext::ProjectForm.name(), "project_form");
        assert_eq!(KeyContext::from_name("confirm"), Some(KeyContext::Confirm));
        assert_eq!(KeyContext::all().len(), 5);
    }

    #[test]
    fn test_command_names_round_trip() {
        for &command in Command::ALL {
            assert_eq!(Command::from_name(command.name()), Some(command));
        }
        assert_eq!(Command::from_name("explode"), None);
    }

    #[test]
    fn test_context_then_global_lookup() {
        let kb = defaults();

        assert_eq!(command(&kb, &key("q"), KeyContext::Normal), Some(Command::Quit));
        // Typing in the form must not quit
        assert_eq!(command(&kb, &key("q"), KeyContext::Form), None);
        assert_eq!(
            command(&kb, &key("ctrl+c"), KeyContext::Form),
            Some(Command::Quit)
        );
    }

    #[test]
    fn test_search_context_keeps_letters_free() {
        let kb = defaults();
        assert_eq!(command(&kb, &key("/"), KeyContext::Normal), Some(Command::Search));
        assert_eq!(command(&kb, &key("s"), KeyContext::Search), None);
        assert_eq!(
            command(&kb, &key("esc"), KeyContext::Search),
            Some(Command::Close)
        );
    }

    #[test]
    fn test_merge_replaces_per_command() {
        let user: Keybindings =
            serde_json::from_str(r#"{ "normal": { "new": ["="] }, "bogus": {} }"#).unwrap();
        let kb = Keybindings::merge(defaults(), user);

        assert_eq!(command(&kb, &key("="), KeyContext::Normal), Some(Command::New));
        assert_eq!(command(&kb, &key("n"), KeyContext::Normal), None);
        // Untouched commands keep their defaults
        assert_eq!(
            first_key(&kb, Command::Sort, KeyContext::Normal).as_deref(),
            Some("s")
        );
    }

    #[test]
    fn test_unknown_commands_are_reported_and_ignored() {
        let kb: Keybindings =
            serde_json::from_str(r#"{ "global": { "explode": ["x"], "quit": ["ctrl+q"] } }"#)
                .unwrap();

        assert_eq!(unknown_commands(&kb), vec!["explode".to_string()]);
        assert_eq!(command(&kb, &key("x"), KeyContext::Normal), None);
        assert_eq!(
            command(&kb, &key("ctrl+q"), KeyContext::Normal),
            Some(Command::Quit)
        );
        assert!(unknown_commands(&defaults()).is_empty());
    }

    #[test]
    fn test_serialize_keeps_bindings() {
        let json = serde_json::to_string(&defaults()).unwrap();
        let back: Keybindings = serde_json::from_str(&json).unwrap();
        for &context in KeyContext::all() {
            for &cmd in Command::ALL {
                assert_eq!(
                    first_key(&back, cmd, context),
                    first_key(&defaults(), cmd, context)
                );
            }
        }
    }
}
