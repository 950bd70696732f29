//! Interpreter session: input buffer, history and panel navigation.
//!
//! Every call completes synchronously. History is append-only except for a
//! full reset by `clear`; drill-down navigation mutates an existing entry's
//! panel and never changes the history length.

use crate::command::{CommandTable, Dispatch, DispatchContext, normalize};
use crate::content::ContentProvider;
use crate::model::PostId;
use crate::output::{Activation, Output, Selection};
use crate::platform::Os;
use crate::preferences::{Preferences, ThemeName, clamp_opacity};

pub const DEFAULT_DASHBOARD_ROUTE: &str = "/dashboard";

#[derive(Clone, Debug)]
pub struct SessionSettings {
    /// OS whose install commands `install` shows
    pub os: Os,
    pub dashboard_route: String,
    pub preferences: Preferences,
}

impl Default for SessionSettings {
    fn default() -> Self {
        Self {
            os: Os::detect(),
            dashboard_route: DEFAULT_DASHBOARD_ROUTE.to_string(),
            preferences: Preferences::default(),
        }
    }
}

#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub enum SessionMode {
    #[default]
    Terminal,
    /// Full-screen "uh oh" page shown after `sudo`
    EasterEgg,
}

#[derive(Clone, Debug, PartialEq, Eq)]
pub struct HistoryEntry {
    pub id: u64,
    /// Normalized command text
    pub command: String,
    pub output: Output,
}

/// What `execute` did
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum Outcome {
    Appended { index: usize },
    Navigated { index: usize, route: String },
    Cleared,
    EasterEgg,
}

#[derive(Debug, thiserror::Error, PartialEq, Eq)]
pub enum SessionError {
    #[error("no history entry at index {0}")]
    NoEntry(usize),
    #[error("history entry {0} is not a drill-down panel")]
    NotAPanel(usize),
    #[error("history entry {index} is a {panel} panel")]
    WrongPanel { index: usize, panel: &'static str },
    #[error("{0} does not exist")]
    UnknownEntity(String),
}

#[derive(Debug)]
pub struct Session {
    table: CommandTable,
    content: ContentProvider,
    settings: SessionSettings,
    input: String,
    history: Vec<HistoryEntry>,
    mode: SessionMode,
    pending_navigation: Option<String>,
    /// Submitted commands for up/down recall, oldest first
    submitted: Vec<String>,
    recall: Option<usize>,
    next_entry_id: u64,
}

impl Session {
    pub fn new(content: ContentProvider, settings: SessionSettings) -> Self {
        Self::with_table(CommandTable::standard(), content, settings)
    }

    pub fn with_table(table: CommandTable, content: ContentProvider, settings: SessionSettings) -> Self {
        Self {
            table,
            content,
            settings,
            input: String::new(),
            history: Vec::new(),
            mode: SessionMode::Terminal,
            pending_navigation: None,
            submitted: Vec::new(),
            recall: None,
            next_entry_id: 1,
        }
    }

    pub fn content(&self) -> &ContentProvider {
        &self.content
    }

    pub fn table(&self) -> &CommandTable {
        &self.table
    }

    pub fn settings(&self) -> &SessionSettings {
        &self.settings
    }

    pub fn preferences(&self) -> Preferences {
        self.settings.preferences
    }

    pub fn mode(&self) -> SessionMode {
        self.mode
    }

    pub fn history(&self) -> &[HistoryEntry] {
        &self.history
    }

    pub fn entry(&self, index: usize) -> Option<&HistoryEntry> {
        self.history.get(index)
    }

    pub fn len(&self) -> usize {
        self.history.len()
    }

    pub fn is_empty(&self) -> bool {
        self.history.is_empty()
    }

    // ========== Input buffer ==========

    pub fn input(&self) -> &str {
        &self.input
    }

    pub fn set_input(&mut self, text: impl Into<String>) {
        self.input = text.into();
        self.recall = None;
    }

    pub fn push_char(&mut self, c: char) {
        self.input.push(c);
        self.recall = None;
    }

    pub fn backspace(&mut self) {
        self.input.pop();
        self.recall = None;
    }

    /// Execute whatever is in the input buffer
    pub fn submit(&mut self) -> Outcome {
        let line = self.input.clone();
        self.execute(&line)
    }

    // ========== Interpreter ==========

    /// Normalize `raw`, dispatch it and record the result. Never fails; an
    /// unknown command produces a not-found entry.
    pub fn execute(&mut self, raw: &str) -> Outcome {
        let command = normalize(raw);
        let dispatch = {
            let ctx = DispatchContext {
                table: &self.table,
                content: &self.content,
                os: self.settings.os,
                dashboard_route: &self.settings.dashboard_route,
            };
            self.table.dispatch(&command, &ctx)
        };
        self.remember(&command);

        let outcome = match dispatch {
            Dispatch::EasterEgg => {
                // Input is left as typed until the user returns.
                self.mode = SessionMode::EasterEgg;
                Outcome::EasterEgg
            }
            Dispatch::Clear => {
                self.history.clear();
                self.input.clear();
                Outcome::Cleared
            }
            Dispatch::Append(output) => {
                let index = self.append(command.clone(), output);
                self.input.clear();
                Outcome::Appended { index }
            }
            Dispatch::Navigate { route, output } => {
                let index = self.append(command.clone(), output);
                self.input.clear();
                tracing::info!(route = %route, "navigation requested");
                self.pending_navigation = Some(route.clone());
                Outcome::Navigated { index, route }
            }
        };

        tracing::debug!(command = %command, ?outcome, history = self.history.len(), "dispatched");
        outcome
    }

    fn append(&mut self, command: String, output: Output) -> usize {
        let id = self.next_entry_id;
        self.next_entry_id += 1;
        self.history.push(HistoryEntry {
            id,
            command,
            output,
        });
        self.history.len() - 1
    }

    /// Route requested by the last `dashboard`/`website`, handed out once
    pub fn take_navigation(&mut self) -> Option<String> {
        self.pending_navigation.take()
    }

    /// Back to a fresh prompt; the typed `sudo` is discarded
    pub fn return_from_easter_egg(&mut self) {
        self.mode = SessionMode::Terminal;
        self.input.clear();
    }

    // ========== Drill-down panels ==========

    /// Open the detail view of `selection` in the panel at `index`
    pub fn select(&mut self, index: usize, selection: Selection) -> Result<(), SessionError> {
        let entry = self
            .history
            .get_mut(index)
            .ok_or(SessionError::NoEntry(index))?;
        let panel_label = entry.output.label();

        match (&mut entry.output, selection) {
            (Output::Projects(panel), Selection::Project(id)) => {
                if self.content.get_project(&id).is_none() {
                    return Err(SessionError::UnknownEntity(format!("project '{id}'")));
                }
                panel.select(id);
            }
            (Output::Team(panel), Selection::Member(id)) => {
                if self.content.get_team_member(id).is_none() {
                    return Err(SessionError::UnknownEntity(format!("team member {id}")));
                }
                panel.select(id);
            }
            (Output::Blog(panel), Selection::Post(id)) => {
                if self.content.get_blog_post(id).is_none() {
                    return Err(SessionError::UnknownEntity(format!("blog post {id}")));
                }
                panel.select(id);
            }
            (Output::Projects(_) | Output::Team(_) | Output::Blog(_), _) => {
                return Err(SessionError::WrongPanel {
                    index,
                    panel: panel_label,
                });
            }
            _ => return Err(SessionError::NotAPanel(index)),
        }
        Ok(())
    }

    /// Return the panel at `index` to its list view
    pub fn back(&mut self, index: usize) -> Result<(), SessionError> {
        let entry = self
            .history
            .get_mut(index)
            .ok_or(SessionError::NoEntry(index))?;
        match &mut entry.output {
            Output::Projects(panel) => panel.back(),
            Output::Team(panel) => panel.back(),
            Output::Blog(panel) => panel.back(),
            _ => return Err(SessionError::NotAPanel(index)),
        }
        Ok(())
    }

    /// Activate row `item` of the entry at `index`, as a click would
    pub fn activate(&mut self, index: usize, item: usize) -> Result<Option<Outcome>, SessionError> {
        let activation = {
            let entry = self.history.get(index).ok_or(SessionError::NoEntry(index))?;
            entry.output.activation(&self.content, item)
        };
        match activation {
            None => Ok(None),
            Some(Activation::Execute(name)) => Ok(Some(self.execute(name))),
            Some(Activation::Select(selection)) => {
                self.select(index, selection)?;
                Ok(None)
            }
            Some(Activation::ApplyTheme(theme)) => {
                self.set_theme(theme);
                Ok(None)
            }
        }
    }

    /// Deep link: run `blog` and open `id` in the new panel. For an unknown
    /// id the blog list stays in history and the error is returned.
    pub fn open_blog_post(&mut self, id: PostId) -> Result<usize, SessionError> {
        let index = match self.execute("blog") {
            Outcome::Appended { index } => index,
            other => {
                tracing::warn!(?other, "blog command did not append");
                return Err(SessionError::NoEntry(self.history.len()));
            }
        };
        self.select(index, Selection::Post(id))?;
        Ok(index)
    }

    /// Newest history entry that has activatable rows or a detail view
    pub fn latest_interactive(&self) -> Option<usize> {
        self.history
            .iter()
            .rposition(|entry| entry.output.is_interactive())
    }

    // ========== Preferences ==========

    pub fn set_theme(&mut self, theme: ThemeName) {
        tracing::debug!(theme = %theme, "theme changed");
        self.settings.preferences.theme = theme;
    }

    pub fn adjust_opacity(&mut self, delta: f32) -> f32 {
        let opacity = clamp_opacity(self.settings.preferences.opacity + delta);
        self.settings.preferences.opacity = opacity;
        opacity
    }

    // ========== Command recall ==========

    fn remember(&mut self, command: &str) {
        self.recall = None;
        if command.is_empty() || self.submitted.last().map(String::as_str) == Some(command) {
            return;
        }
        self.submitted.push(command.to_string());
    }

    /// Step back through submitted commands, loading each into the input
    pub fn previous_command(&mut self) -> Option<&str> {
        if self.submitted.is_empty() {
            return None;
        }
        let idx = match self.recall {
            None => self.submitted.len() - 1,
            Some(0) => 0,
            Some(i) => i - 1,
        };
        self.recall = Some(idx);
        self.input = self.submitted[idx].clone();
        Some(&self.submitted[idx])
    }

    /// Step forward; past the newest command the input is emptied
    pub fn next_command(&mut self) -> Option<&str> {
        let idx = self.recall?;
        if idx + 1 >= self.submitted.len() {
            self.recall = None;
            self.input.clear();
            return None;
        }
        self.recall = Some(idx + 1);
        self.input = self.submitted[idx + 1].clone();
        Some(&self.submitted[idx + 1])
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::panel::DrillDown;

    fn session() -> Session {
        Session::new(
            ContentProvider::bundled().unwrap(),
            SessionSettings {
                os: Os::Linux,
                ..Default::default()
            },
        )
    }

    #[test]
    fn test_execute_appends_normalized_command() {
        let mut s = session();
        s.set_input("  PROJECTS ");
        let outcome = s.submit();
        assert_eq!(outcome, Outcome::Appended { index: 0 });
        assert_eq!(s.history()[0].command, "projects");
        assert_eq!(s.input(), "");
    }

    #[test]
    fn test_entry_ids_increase() {
        let mut s = session();
        s.execute("help");
        s.execute("team");
        assert!(s.history()[0].id < s.history()[1].id);
    }

    #[test]
    fn test_sudo_switches_mode_without_recording() {
        let mut s = session();
        s.execute("help");
        s.set_input("sudo");
        assert_eq!(s.submit(), Outcome::EasterEgg);
        assert_eq!(s.len(), 1);
        assert_eq!(s.mode(), SessionMode::EasterEgg);
        assert_eq!(s.input(), "sudo");

        s.return_from_easter_egg();
        assert_eq!(s.mode(), SessionMode::Terminal);
        assert_eq!(s.input(), "");

        // Enter on the fresh prompt is an empty line, not sudo again
        assert_eq!(s.submit(), Outcome::Appended { index: 1 });
        assert_eq!(s.mode(), SessionMode::Terminal);
    }

    #[test]
    fn test_clear_resets_history_and_input() {
        let mut s = session();
        s.execute("help");
        s.execute("blog");
        s.set_input("clear");
        assert_eq!(s.submit(), Outcome::Cleared);
        assert!(s.is_empty());
        assert_eq!(s.input(), "");
    }

    #[test]
    fn test_dashboard_requests_navigation_once() {
        let mut s = session();
        let outcome = s.execute("Dashboard");
        assert_eq!(
            outcome,
            Outcome::Navigated {
                index: 0,
                route: "/dashboard".into()
            }
        );
        assert_eq!(s.len(), 1);
        assert_eq!(s.take_navigation().as_deref(), Some("/dashboard"));
        assert_eq!(s.take_navigation(), None);
    }

    #[test]
    fn test_select_and_back_keep_history_length() {
        let mut s = session();
        s.execute("projects");
        s.select(0, Selection::Project("p2".into())).unwrap();
        assert_eq!(
            s.entry(0).unwrap().output,
            Output::Projects(DrillDown::detail("p2".to_string()))
        );
        s.select(0, Selection::Project("p3".into())).unwrap();
        assert_eq!(
            s.entry(0).unwrap().output,
            Output::Projects(DrillDown::detail("p3".to_string()))
        );
        s.back(0).unwrap();
        assert_eq!(s.entry(0).unwrap().output, Output::Projects(DrillDown::list()));
        assert_eq!(s.len(), 1);
    }

    #[test]
    fn test_select_rejects_unknown_and_mismatched() {
        let mut s = session();
        s.execute("team");
        s.execute("contact");
        assert_eq!(
            s.select(0, Selection::Member(42)),
            Err(SessionError::UnknownEntity("team member 42".into()))
        );
        assert_eq!(
            s.select(0, Selection::Post(1)),
            Err(SessionError::WrongPanel {
                index: 0,
                panel: "team"
            })
        );
        assert_eq!(
            s.select(1, Selection::Member(1)),
            Err(SessionError::NotAPanel(1))
        );
        assert_eq!(s.back(7), Err(SessionError::NoEntry(7)));
        assert_eq!(s.entry(0).unwrap().output, Output::Team(DrillDown::list()));
    }

    #[test]
    fn test_panels_navigate_independently() {
        let mut s = session();
        s.execute("blog");
        s.execute("blog");
        s.select(1, Selection::Post(2)).unwrap();
        assert!(!s.entry(0).unwrap().output.is_detail());
        assert!(s.entry(1).unwrap().output.is_detail());
    }

    #[test]
    fn test_activate_help_row_executes_command() {
        let mut s = session();
        s.execute("help");
        let outcome = s.activate(0, 2).unwrap();
        assert_eq!(outcome, Some(Outcome::Appended { index: 1 }));
        assert_eq!(s.history()[1].command, "contribute");
    }

    #[test]
    fn test_activate_colors_row_applies_theme() {
        let mut s = session();
        s.execute("colors");
        assert_eq!(s.activate(0, 1).unwrap(), None);
        assert_eq!(s.preferences().theme, ThemeName::Light);
        assert_eq!(s.len(), 1);
    }

    #[test]
    fn test_open_blog_post_deep_link() {
        let mut s = session();
        let index = s.open_blog_post(3).unwrap();
        assert_eq!(s.entry(index).unwrap().output, Output::Blog(DrillDown::detail(3)));

        let err = s.open_blog_post(99).unwrap_err();
        assert_eq!(err, SessionError::UnknownEntity("blog post 99".into()));
        assert_eq!(s.len(), 2);
        assert!(!s.entry(1).unwrap().output.is_detail());
    }

    #[test]
    fn test_latest_interactive() {
        let mut s = session();
        assert_eq!(s.latest_interactive(), None);
        s.execute("team");
        s.execute("contact");
        s.execute("nope");
        assert_eq!(s.latest_interactive(), Some(0));
    }

    #[test]
    fn test_adjust_opacity_clamps() {
        let mut s = session();
        for _ in 0..20 {
            s.adjust_opacity(0.05);
        }
        assert_eq!(s.preferences().opacity, 1.0);
        s.adjust_opacity(-5.0);
        assert_eq!(s.preferences().opacity, 0.0);
    }

    #[test]
    fn test_command_recall() {
        let mut s = session();
        s.execute("help");
        s.execute("team");
        s.execute("team");
        s.execute("");

        assert_eq!(s.previous_command(), Some("team"));
        assert_eq!(s.previous_command(), Some("help"));
        assert_eq!(s.previous_command(), Some("help"));
        assert_eq!(s.input(), "help");
        assert_eq!(s.next_command(), Some("team"));
        assert_eq!(s.next_command(), None);
        assert_eq!(s.input(), "");
    }
}
