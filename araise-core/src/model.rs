//! Content records loaded from the bundled JSON fixtures.
//!
//! Every record is immutable once loaded. Field names follow the fixtures'
//! camelCase keys.

use serde::{Deserialize, Serialize};

pub type ProjectId = String;
pub type MemberId = u32;
pub type PostId = u32;

/// One install command for a specific operating system
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct InstallCommand {
    /// Fixture OS name: "windows", "mac" or "linux"
    pub os: String,
    /// Shell command to paste into a terminal
    pub command: String,
    pub description: String,
}

#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Project {
    pub id: ProjectId,
    pub title: String,
    /// Short one-line description
    pub description: String,
    pub long_description: String,
    #[serde(default)]
    pub tags: Vec<String>,
    #[serde(default)]
    pub features: Vec<String>,
    pub github_url: String,
    /// Demo video
    pub video_url: String,
    pub docs_url: String,
    pub last_updated: String,
    #[serde(default)]
    pub install_commands: Vec<InstallCommand>,
}

impl Project {
    /// Install commands for one fixture OS name, in fixture order
    pub fn install_commands_for<'a>(&'a self, os: &'a str) -> impl Iterator<Item = &'a InstallCommand> {
        self.install_commands.iter().filter(move |cmd| cmd.os == os)
    }
}

/// Per-platform profile links; any of them may be missing
#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct SocialLinks {
    #[serde(default)]
    pub github: Option<String>,
    #[serde(default)]
    pub x: Option<String>,
    #[serde(default)]
    pub linkedin: Option<String>,
    #[serde(default)]
    pub website: Option<String>,
}

impl SocialLinks {
    /// Present links as (label, url) pairs in display order
    pub fn entries(&self) -> Vec<(&'static str, &str)> {
        [
            ("GitHub Profile", self.github.as_deref()),
            ("X", self.x.as_deref()),
            ("LinkedIn", self.linkedin.as_deref()),
            ("Personal Website", self.website.as_deref()),
        ]
        .into_iter()
        .filter_map(|(label, url)| url.map(|url| (label, url)))
        .collect()
    }
}

/// A project a team member works on (free-form, not a `Project` reference)
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct MemberProject {
    pub name: String,
    pub description: String,
    #[serde(default)]
    pub link: Option<String>,
}

#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct TeamMember {
    pub id: MemberId,
    pub name: String,
    pub role: String,
    /// Avatar image path on the site
    #[serde(default)]
    pub avatar: Option<String>,
    pub bio: String,
    #[serde(default)]
    pub skills: Vec<String>,
    #[serde(default)]
    pub links: SocialLinks,
    #[serde(default)]
    pub projects: Vec<MemberProject>,
}

#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct BlogPost {
    pub id: PostId,
    pub title: String,
    /// Category slug, e.g. "tech", "design", "updates"
    pub category: String,
    pub date: String,
    pub author: String,
    pub author_role: String,
    #[serde(default)]
    pub author_image: Option<String>,
    #[serde(default)]
    pub tags: Vec<String>,
    pub excerpt: String,
    /// Markdown-like body, see [`crate::blog::parse_content`]
    pub content: String,
}

#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct Faq {
    pub question: String,
    pub answer: String,
}

#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ContactInfo {
    pub email: String,
    #[serde(default)]
    pub github: Option<String>,
    #[serde(default)]
    pub twitter: Option<String>,
    pub office_hours: String,
    pub response_time: String,
    pub urgent_note: String,
    #[serde(default)]
    pub faqs: Vec<Faq>,
}

impl ContactInfo {
    /// Twitter handle derived from the profile URL ("@name")
    pub fn twitter_handle(&self) -> Option<String> {
        let url = self.twitter.as_deref()?;
        let handle = url.trim_end_matches('/').rsplit('/').next()?;
        if handle.is_empty() || handle.contains(':') {
            return None;
        }
        Some(format!("@{handle}"))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_project_parses_camel_case_fixture() {
        let json = r#"{
            "id": "p9",
            "title": "Demo",
            "description": "short",
            "longDescription": "long",
            "githubUrl": "https://github.com/x/y",
            "videoUrl": "https://video",
            "docsUrl": "https://docs",
            "lastUpdated": "2025-01-01"
        }"#;
        let project: Project = serde_json::from_str(json).unwrap();
        assert_eq!(project.id, "p9");
        assert_eq!(project.long_description, "long");
        assert!(project.install_commands.is_empty());
        assert!(project.tags.is_empty());
    }

    #[test]
    fn test_install_commands_for_filters_by_os() {
        let project = Project {
            id: "p1".into(),
            title: "T".into(),
            description: String::new(),
            long_description: String::new(),
            tags: vec![],
            features: vec![],
            github_url: String::new(),
            video_url: String::new(),
            docs_url: String::new(),
            last_updated: String::new(),
            install_commands: vec![
                InstallCommand {
                    os: "linux".into(),
                    command: "a".into(),
                    description: String::new(),
                },
                InstallCommand {
                    os: "mac".into(),
                    command: "b".into(),
                    description: String::new(),
                },
                InstallCommand {
                    os: "linux".into(),
                    command: "c".into(),
                    description: String::new(),
                },
            ],
        };

        let linux: Vec<_> = project
            .install_commands_for("linux")
            .map(|c| c.command.as_str())
            .collect();
        assert_eq!(linux, vec!["a", "c"]);
        assert_eq!(project.install_commands_for("windows").count(), 0);
    }

    #[test]
    fn test_social_links_skip_missing() {
        let links = SocialLinks {
            github: Some("https://github.com/a".into()),
            x: None,
            linkedin: None,
            website: Some("https://a.dev".into()),
        };
        let entries = links.entries();
        assert_eq!(entries.len(), 2);
        assert_eq!(entries[0].0, "GitHub Profile");
        assert_eq!(entries[1].1, "https://a.dev");
    }

    #[test]
    fn test_twitter_handle() {
        let contact = ContactInfo {
            email: "a@b.c".into(),
            github: None,
            twitter: Some("https://twitter.com/arAIse_app/".into()),
            office_hours: String::new(),
            response_time: String::new(),
            urgent_note: String::new(),
            faqs: vec![],
        };
        assert_eq!(contact.twitter_handle().as_deref(), Some("@arAIse_app"));
    }
}
