//! Read-only access to the site's static content.
//!
//! The four collections are loaded once (from the fixtures compiled into the
//! binary, or from a directory named in the config) and never mutated.

use std::collections::BTreeSet;
use std::path::{Path, PathBuf};

use serde::de::DeserializeOwned;

use crate::model::{
    BlogPost, ContactInfo, InstallCommand, MemberId, PostId, Project, TeamMember,
};
use crate::platform::Os;

pub const PROJECTS_FILE: &str = "projects.json";
pub const TEAM_FILE: &str = "team.json";
pub const BLOG_FILE: &str = "blog.json";
pub const CONTACT_FILE: &str = "contact.json";

const BUNDLED_PROJECTS: &str = include_str!("../data/projects.json");
const BUNDLED_TEAM: &str = include_str!("../data/team.json");
const BUNDLED_BLOG: &str = include_str!("../data/blog.json");
const BUNDLED_CONTACT: &str = include_str!("../data/contact.json");

/// Errors raised while loading content fixtures
#[derive(Debug, thiserror::Error)]
pub enum ContentError {
    #[error("failed to read {}: {source}", path.display())]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
    #[error("invalid {fixture}: {source}")]
    Parse {
        fixture: &'static str,
        #[source]
        source: serde_json::Error,
    },
}

/// Blog category selection; `All` keeps every post
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub enum CategoryFilter {
    #[default]
    All,
    Category(String),
}

impl CategoryFilter {
    /// Exactly "all" selects every post; anything else is a category name
    /// compared verbatim.
    pub fn parse(raw: &str) -> Self {
        if raw == "all" {
            CategoryFilter::All
        } else {
            CategoryFilter::Category(raw.to_string())
        }
    }

    pub fn matches(&self, post: &BlogPost) -> bool {
        match self {
            CategoryFilter::All => true,
            CategoryFilter::Category(category) => post.category == *category,
        }
    }
}

impl From<Option<&str>> for CategoryFilter {
    fn from(raw: Option<&str>) -> Self {
        raw.map(CategoryFilter::parse).unwrap_or_default()
    }
}

/// Outcome of one content check run by `validate`
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct ContentIssue {
    pub collection: &'static str,
    pub message: String,
}

impl ContentIssue {
    fn new(collection: &'static str, message: impl Into<String>) -> Self {
        Self {
            collection,
            message: message.into(),
        }
    }
}

#[derive(Clone, Debug)]
pub struct ContentProvider {
    projects: Vec<Project>,
    team: Vec<TeamMember>,
    blog: Vec<BlogPost>,
    contact: ContactInfo,
}

impl ContentProvider {
    pub fn new(
        projects: Vec<Project>,
        team: Vec<TeamMember>,
        blog: Vec<BlogPost>,
        contact: ContactInfo,
    ) -> Self {
        Self {
            projects,
            team,
            blog,
            contact,
        }
    }

    /// Content compiled into the binary
    pub fn bundled() -> Result<Self, ContentError> {
        let provider = Self::new(
            parse(PROJECTS_FILE, BUNDLED_PROJECTS)?,
            parse(TEAM_FILE, BUNDLED_TEAM)?,
            parse(BLOG_FILE, BUNDLED_BLOG)?,
            parse(CONTACT_FILE, BUNDLED_CONTACT)?,
        );
        provider.log_loaded("bundled");
        Ok(provider)
    }

    /// Load the four fixture files from `dir`
    pub fn load_dir(dir: &Path) -> Result<Self, ContentError> {
        let provider = Self::new(
            read(dir, PROJECTS_FILE)?,
            read(dir, TEAM_FILE)?,
            read(dir, BLOG_FILE)?,
            read(dir, CONTACT_FILE)?,
        );
        provider.log_loaded(&dir.display().to_string());
        Ok(provider)
    }

    fn log_loaded(&self, source: &str) {
        tracing::info!(
            source,
            projects = self.projects.len(),
            team = self.team.len(),
            posts = self.blog.len(),
            "content loaded"
        );
    }

    pub fn list_projects(&self) -> &[Project] {
        &self.projects
    }

    pub fn get_project(&self, id: &str) -> Option<&Project> {
        self.projects.iter().find(|project| project.id == id)
    }

    pub fn list_team_members(&self) -> &[TeamMember] {
        &self.team
    }

    pub fn get_team_member(&self, id: MemberId) -> Option<&TeamMember> {
        self.team.iter().find(|member| member.id == id)
    }

    /// Posts matching `filter`, in fixture order
    pub fn list_blog_posts(&self, filter: &CategoryFilter) -> Vec<&BlogPost> {
        self.blog.iter().filter(|post| filter.matches(post)).collect()
    }

    pub fn get_blog_post(&self, id: PostId) -> Option<&BlogPost> {
        self.blog.iter().find(|post| post.id == id)
    }

    /// Distinct categories in order of first appearance
    pub fn blog_categories(&self) -> Vec<&str> {
        let mut seen = BTreeSet::new();
        self.blog
            .iter()
            .map(|post| post.category.as_str())
            .filter(|category| seen.insert(*category))
            .collect()
    }

    pub fn get_contact_info(&self) -> &ContactInfo {
        &self.contact
    }

    /// Install commands of every project for `os`, project order first
    pub fn install_commands_for(&self, os: Os) -> Vec<&InstallCommand> {
        self.projects
            .iter()
            .flat_map(|project| project.install_commands_for(os.as_str()))
            .collect()
    }

    /// Structural checks over the loaded content. An empty result means the
    /// content satisfies every lookup invariant the interpreter relies on.
    pub fn validate(&self) -> Vec<ContentIssue> {
        let mut issues = Vec::new();

        let mut project_ids = BTreeSet::new();
        for project in &self.projects {
            if !project_ids.insert(project.id.as_str()) {
                issues.push(ContentIssue::new(
                    "projects",
                    format!("duplicate project id '{}'", project.id),
                ));
            }
            if project.title.trim().is_empty() {
                issues.push(ContentIssue::new(
                    "projects",
                    format!("project '{}' has an empty title", project.id),
                ));
            }
            for cmd in &project.install_commands {
                if cmd.os.parse::<Os>().map(|os| os.as_str() != cmd.os).unwrap_or(true) {
                    issues.push(ContentIssue::new(
                        "projects",
                        format!("project '{}' has install command for unknown os '{}'", project.id, cmd.os),
                    ));
                }
            }
        }

        let mut member_ids = BTreeSet::new();
        for member in &self.team {
            if !member_ids.insert(member.id) {
                issues.push(ContentIssue::new(
                    "team",
                    format!("duplicate team member id {}", member.id),
                ));
            }
            if member.name.trim().is_empty() {
                issues.push(ContentIssue::new(
                    "team",
                    format!("team member {} has an empty name", member.id),
                ));
            }
        }

        let mut post_ids = BTreeSet::new();
        for post in &self.blog {
            if !post_ids.insert(post.id) {
                issues.push(ContentIssue::new(
                    "blog",
                    format!("duplicate blog post id {}", post.id),
                ));
            }
            if post.category.trim().is_empty() {
                issues.push(ContentIssue::new(
                    "blog",
                    format!("blog post {} has no category", post.id),
                ));
            }
        }

        if !self.contact.email.contains('@') {
            issues.push(ContentIssue::new(
                "contact",
                format!("'{}' is not an email address", self.contact.email),
            ));
        }

        issues
    }
}

fn parse<T: DeserializeOwned>(fixture: &'static str, text: &str) -> Result<T, ContentError> {
    serde_json::from_str(text).map_err(|source| ContentError::Parse { fixture, source })
}

fn read<T: DeserializeOwned>(dir: &Path, fixture: &'static str) -> Result<T, ContentError> {
    let path = dir.join(fixture);
    let text = std::fs::read_to_string(&path).map_err(|source| ContentError::Io {
        path: path.clone(),
        source,
    })?;
    parse(fixture, &text)
}
