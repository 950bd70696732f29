//! Structured command results stored in history.
//!
//! An `Output` keeps only what the result needs to be redrawn; content is
//! looked up again at render time. Panels carry their own drill-down state so
//! every history entry navigates independently.

use crate::content::ContentProvider;
use crate::model::{MemberId, PostId, ProjectId};
use crate::panel::DrillDown;
use crate::platform::Os;
use crate::preferences::ThemeName;

#[derive(Clone, Debug, PartialEq, Eq)]
pub struct HelpEntry {
    pub name: &'static str,
    pub summary: &'static str,
}

#[derive(Clone, Debug, PartialEq, Eq)]
pub enum Output {
    Help(Vec<HelpEntry>),
    Projects(DrillDown<ProjectId>),
    Team(DrillDown<MemberId>),
    Blog(DrillDown<PostId>),
    Contribute,
    Contact,
    Colors,
    Install { os: Os },
    Redirect { route: String },
    Exit,
    Empty,
    NotFound { command: String },
}

/// Entity picked inside a drill-down panel
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum Selection {
    Project(ProjectId),
    Member(MemberId),
    Post(PostId),
}

/// What activating a row of an output should do
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum Activation {
    /// Run a command as if it had been typed
    Execute(&'static str),
    Select(Selection),
    ApplyTheme(ThemeName),
}

impl Output {
    pub fn label(&self) -> &'static str {
        match self {
            Output::Help(_) => "help",
            Output::Projects(_) => "projects",
            Output::Team(_) => "team",
            Output::Blog(_) => "blog",
            Output::Contribute => "contribute",
            Output::Contact => "contact",
            Output::Colors => "colors",
            Output::Install { .. } => "install",
            Output::Redirect { .. } => "redirect",
            Output::Exit => "exit",
            Output::Empty => "empty",
            Output::NotFound { .. } => "not-found",
        }
    }

    /// Whether the output has rows the host can move a cursor over
    pub fn is_interactive(&self) -> bool {
        matches!(
            self,
            Output::Help(_) | Output::Projects(_) | Output::Team(_) | Output::Blog(_) | Output::Colors
        )
    }

    /// Whether a drill-down panel is showing a detail view
    pub fn is_detail(&self) -> bool {
        match self {
            Output::Projects(panel) => panel.is_detail(),
            Output::Team(panel) => panel.is_detail(),
            Output::Blog(panel) => panel.is_detail(),
            _ => false,
        }
    }

    /// Number of activatable rows in the current view
    pub fn item_count(&self, content: &ContentProvider) -> usize {
        if self.is_detail() {
            return 0;
        }
        match self {
            Output::Help(entries) => entries.len(),
            Output::Projects(_) => content.list_projects().len(),
            Output::Team(_) => content.list_team_members().len(),
            Output::Blog(_) => content.list_blog_posts(&Default::default()).len(),
            Output::Colors => ThemeName::ALL.len(),
            _ => 0,
        }
    }

    /// Map a row index of the current view to its action
    pub fn activation(&self, content: &ContentProvider, item: usize) -> Option<Activation> {
        if self.is_detail() {
            return None;
        }
        match self {
            Output::Help(entries) => entries.get(item).map(|entry| Activation::Execute(entry.name)),
            Output::Projects(_) => content
                .list_projects()
                .get(item)
                .map(|project| Activation::Select(Selection::Project(project.id.clone()))),
            Output::Team(_) => content
                .list_team_members()
                .get(item)
                .map(|member| Activation::Select(Selection::Member(member.id))),
            Output::Blog(_) => content
                .list_blog_posts(&Default::default())
                .get(item)
                .map(|post| Activation::Select(Selection::Post(post.id))),
            Output::Colors => ThemeName::ALL.get(item).copied().map(Activation::ApplyTheme),
            _ => None,
        }
    }
}
