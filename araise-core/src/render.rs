//! Turn outputs into toned text lines.
//!
//! Rendering is UI-agnostic: a host maps each `Tone` to its own styling. Rows
//! that can be activated carry the item index `Output::activation` expects.

use crate::blog::{Block, parse_content};
use crate::content::{CategoryFilter, ContentProvider};
use crate::model::{BlogPost, Project, TeamMember};
use crate::output::{HelpEntry, Output};
use crate::panel::PanelView;
use crate::platform::Os;
use crate::preferences::{Preferences, ThemeName};
use crate::session::HistoryEntry;

pub const DEFAULT_PROMPT: &str = "guest@arAIse:~$";

pub const UH_OH_BANNER: &str = r"
██╗   ██╗██╗  ██╗     ██████╗ ██╗  ██╗
██║   ██║██║  ██║    ██╔═══██╗██║  ██║
██║   ██║███████║    ██║   ██║███████║
██║   ██║██╔══██║    ██║   ██║██╔══██║
╚██████╔╝██║  ██║    ╚██████╔╝██║  ██║
 ╚═════╝ ╚═╝  ╚═╝     ╚═════╝ ╚═╝  ╚═╝
";

pub const UH_OH_MESSAGE: &str = "You shouldn't have done that...";

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Tone {
    Heading,
    Title,
    Text,
    Dim,
    Accent,
    Link,
    Code,
    Success,
    Warning,
    Error,
}

#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Segment {
    pub text: String,
    pub tone: Tone,
}

#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct RenderedLine {
    pub segments: Vec<Segment>,
    pub indent: u16,
    /// Index of the activatable row this line belongs to
    pub item: Option<usize>,
}

impl RenderedLine {
    pub fn new(tone: Tone, text: impl Into<String>) -> Self {
        Self::default().push(tone, text)
    }

    pub fn blank() -> Self {
        Self::default()
    }

    pub fn push(mut self, tone: Tone, text: impl Into<String>) -> Self {
        self.segments.push(Segment {
            text: text.into(),
            tone,
        });
        self
    }

    pub fn indent(mut self, indent: u16) -> Self {
        self.indent = indent;
        self
    }

    pub fn item(mut self, item: usize) -> Self {
        self.item = Some(item);
        self
    }

    /// Line text without styling, indentation included
    pub fn plain(&self) -> String {
        let mut out = " ".repeat(self.indent as usize);
        for segment in &self.segments {
            out.push_str(&segment.text);
        }
        out
    }
}

/// What rendering may read besides the output itself
#[derive(Clone, Copy)]
pub struct RenderContext<'a> {
    pub content: &'a ContentProvider,
    pub preferences: Preferences,
}

pub fn render(output: &Output, ctx: &RenderContext<'_>) -> Vec<RenderedLine> {
    let content = ctx.content;
    match output {
        Output::Help(entries) => render_help(entries),
        Output::Projects(panel) => match panel.view() {
            PanelView::List => render_project_list(content),
            PanelView::Detail(id) => match content.get_project(id) {
                Some(project) => render_project(project),
                None => missing(&format!("project '{id}'")),
            },
        },
        Output::Team(panel) => match panel.view() {
            PanelView::List => render_team_list(content),
            PanelView::Detail(id) => match content.get_team_member(*id) {
                Some(member) => render_member(member),
                None => missing(&format!("team member {id}")),
            },
        },
        Output::Blog(panel) => match panel.view() {
            PanelView::List => render_blog_list(content),
            PanelView::Detail(id) => match content.get_blog_post(*id) {
                Some(post) => render_post(post),
                None => missing(&format!("blog post {id}")),
            },
        },
        Output::Contribute => render_contribute(),
        Output::Contact => render_contact(content),
        Output::Colors => render_colors(ctx.preferences),
        Output::Install { os } => render_install(content, *os),
        Output::Redirect { .. } => vec![RenderedLine::new(Tone::Text, "Redirecting to dashboard...")],
        Output::Exit => vec![RenderedLine::new(
            Tone::Error,
            "Looks like you tried to escape, but there's no escape in the Shadow Monarch's realm.",
        )],
        Output::Empty => Vec::new(),
        Output::NotFound { command } => vec![RenderedLine::new(
            Tone::Error,
            format!("Command not found: {command}. Type 'help' to see available commands."),
        )],
    }
}

fn missing(what: &str) -> Vec<RenderedLine> {
    vec![RenderedLine::new(Tone::Error, format!("{what} is no longer available."))]
}

fn back_hint(collection: &str) -> RenderedLine {
    RenderedLine::new(Tone::Dim, format!("← Back to {collection} (h)"))
}

fn render_help(entries: &[HelpEntry]) -> Vec<RenderedLine> {
    let mut lines = vec![RenderedLine::new(Tone::Heading, "Available Commands:")];
    for (idx, entry) in entries.iter().enumerate() {
        lines.push(
            RenderedLine::new(Tone::Accent, format!("{:<12}", entry.name))
                .push(Tone::Dim, entry.summary)
                .indent(2)
                .item(idx),
        );
    }
    lines.push(RenderedLine::blank());
    lines.push(RenderedLine::new(Tone::Heading, "Navigation Keys:"));
    for (keys, direction) in [
        ("h or a", "Left"),
        ("j or s", "Down"),
        ("k or w", "Up"),
        ("l or d", "Right"),
    ] {
        lines.push(
            RenderedLine::new(Tone::Accent, keys)
                .push(Tone::Text, format!(" → {direction}"))
                .indent(2),
        );
    }
    lines.push(RenderedLine::new(
        Tone::Dim,
        "Press Tab to browse entries with the keyboard.",
    ));
    lines
}

fn render_project_list(content: &ContentProvider) -> Vec<RenderedLine> {
    let mut lines = vec![RenderedLine::new(Tone::Heading, "Available Projects:")];
    for (idx, project) in content.list_projects().iter().enumerate() {
        lines.push(
            RenderedLine::new(Tone::Accent, "▸ ")
                .push(Tone::Text, project.title.clone())
                .push(Tone::Dim, format!("  {}", project.description))
                .indent(2)
                .item(idx),
        );
    }
    lines.push(RenderedLine::new(Tone::Dim, "Select a project to view details."));
    lines
}

fn render_project(project: &Project) -> Vec<RenderedLine> {
    let mut lines = vec![
        RenderedLine::new(Tone::Heading, project.title.clone()),
        back_hint("projects"),
        RenderedLine::new(Tone::Text, project.long_description.clone()),
    ];
    if !project.tags.is_empty() {
        lines.push(
            RenderedLine::new(Tone::Dim, "Tags: ").push(Tone::Accent, project.tags.join(", ")),
        );
    }
    if !project.features.is_empty() {
        lines.push(RenderedLine::blank());
        lines.push(RenderedLine::new(Tone::Title, "Features"));
        for feature in &project.features {
            lines.push(RenderedLine::new(Tone::Text, format!("• {feature}")).indent(2));
        }
    }
    lines.push(RenderedLine::blank());
    for (label, url) in [
        ("GitHub Repository", &project.github_url),
        ("Live Demo", &project.video_url),
        ("Documentation", &project.docs_url),
    ] {
        lines.push(
            RenderedLine::new(Tone::Text, format!("{label}: "))
                .push(Tone::Link, url.clone())
                .indent(2),
        );
    }
    lines.push(RenderedLine::new(
        Tone::Dim,
        format!("Last updated: {}", project.last_updated),
    ));
    lines
}

fn render_team_list(content: &ContentProvider) -> Vec<RenderedLine> {
    let mut lines = vec![RenderedLine::new(Tone::Heading, "Team Members")];
    for (idx, member) in content.list_team_members().iter().enumerate() {
        lines.push(
            RenderedLine::new(Tone::Title, member.name.clone())
                .push(Tone::Dim, format!("  {}", member.role))
                .indent(2)
                .item(idx),
        );
    }
    lines.push(RenderedLine::new(
        Tone::Dim,
        "Select a team member to view their profile.",
    ));
    lines
}

fn render_member(member: &TeamMember) -> Vec<RenderedLine> {
    let mut lines = vec![
        RenderedLine::new(Tone::Heading, member.name.clone()),
        back_hint("team"),
        RenderedLine::new(Tone::Accent, member.role.clone()),
        RenderedLine::new(Tone::Text, member.bio.clone()),
    ];
    if !member.skills.is_empty() {
        lines.push(
            RenderedLine::new(Tone::Dim, "Skills: ").push(Tone::Text, member.skills.join(", ")),
        );
    }
    let links = member.links.entries();
    if !links.is_empty() {
        lines.push(RenderedLine::blank());
        for (label, url) in links {
            lines.push(
                RenderedLine::new(Tone::Text, format!("{label}: "))
                    .push(Tone::Link, url)
                    .indent(2),
            );
        }
    }
    if !member.projects.is_empty() {
        lines.push(RenderedLine::blank());
        lines.push(RenderedLine::new(Tone::Title, "Projects"));
        for project in &member.projects {
            let mut line = RenderedLine::new(Tone::Accent, project.name.clone())
                .push(Tone::Dim, format!("  {}", project.description))
                .indent(2);
            if let Some(link) = &project.link {
                line = line.push(Tone::Link, format!("  {link}"));
            }
            lines.push(line);
        }
    }
    lines
}

fn render_blog_list(content: &ContentProvider) -> Vec<RenderedLine> {
    let mut lines = vec![RenderedLine::new(Tone::Heading, "Latest Blog Posts")];
    for (idx, post) in content.list_blog_posts(&CategoryFilter::All).iter().enumerate() {
        lines.extend(render_post_card(post, idx));
    }
    lines
}

/// Summary card used by the terminal list and the `blog` subcommand
pub fn render_post_card(post: &BlogPost, item: usize) -> Vec<RenderedLine> {
    let mut lines = vec![
        RenderedLine::new(Tone::Accent, post.title.clone())
            .indent(2)
            .item(item),
        RenderedLine::new(Tone::Dim, format!("{} • by {}", post.date, post.author))
            .indent(2)
            .item(item),
        RenderedLine::new(Tone::Text, post.excerpt.clone())
            .indent(2)
            .item(item),
    ];
    if !post.tags.is_empty() {
        lines.push(
            RenderedLine::new(Tone::Link, tag_list(&post.tags))
                .indent(2)
                .item(item),
        );
    }
    lines.push(RenderedLine::blank());
    lines
}

fn tag_list(tags: &[String]) -> String {
    tags.iter()
        .map(|tag| format!("#{tag}"))
        .collect::<Vec<_>>()
        .join(" ")
}

fn render_post(post: &BlogPost) -> Vec<RenderedLine> {
    let mut lines = vec![
        RenderedLine::new(Tone::Heading, post.title.clone()),
        back_hint("blog"),
        RenderedLine::new(Tone::Title, post.author.clone())
            .push(Tone::Dim, format!("  {} • {}", post.author_role, post.date)),
    ];
    if !post.tags.is_empty() {
        lines.push(RenderedLine::new(Tone::Link, tag_list(&post.tags)));
    }
    lines.push(RenderedLine::blank());
    for block in parse_content(&post.content) {
        match block {
            Block::Heading(text) => {
                lines.push(RenderedLine::new(Tone::Accent, text));
            }
            Block::Bullet { label, text } => {
                lines.push(
                    RenderedLine::new(Tone::Text, "• ")
                        .push(Tone::Title, format!("{label}: "))
                        .push(Tone::Text, text)
                        .indent(2),
                );
            }
            Block::Paragraph(text) => {
                lines.push(RenderedLine::new(Tone::Text, text));
            }
        }
    }
    lines
}

fn render_contribute() -> Vec<RenderedLine> {
    let mut lines = vec![
        RenderedLine::new(Tone::Heading, "Contribution Guidelines"),
        RenderedLine::new(
            Tone::Text,
            "We welcome contributions to the arAIse project! Here's how you can help:",
        ),
        RenderedLine::blank(),
        RenderedLine::new(Tone::Title, "GitHub Repository").indent(2),
        RenderedLine::new(Tone::Link, "https://github.com/araise/araise").indent(4),
        RenderedLine::new(Tone::Title, "Branching Strategy").indent(2),
        RenderedLine::new(
            Tone::Text,
            "Create a new branch for each feature or bugfix using the format:",
        )
        .indent(4),
        RenderedLine::new(Tone::Code, "feature/your-feature-name").indent(6),
        RenderedLine::new(Tone::Code, "bugfix/issue-you-are-fixing").indent(6),
        RenderedLine::new(Tone::Title, "Pull Requests").indent(2),
        RenderedLine::new(
            Tone::Text,
            "Submit a pull request with a clear description of the changes and any relevant issue numbers. Make sure all tests pass before submitting.",
        )
        .indent(4),
        RenderedLine::new(Tone::Title, "Reporting Issues").indent(2),
        RenderedLine::new(
            Tone::Text,
            "Use the GitHub issue tracker to report bugs or suggest features. Please provide detailed steps to reproduce any bugs.",
        )
        .indent(4),
        RenderedLine::blank(),
    ];
    lines.push(RenderedLine::new(
        Tone::Text,
        "We follow a code of conduct to ensure a welcoming and inclusive environment for all contributors. By participating, you agree to uphold these standards.",
    ));
    lines.push(RenderedLine::new(Tone::Text, "Thank you for helping make arAIse better!"));
    lines
}

fn render_contact(content: &ContentProvider) -> Vec<RenderedLine> {
    let contact = content.get_contact_info();
    let mut lines = vec![
        RenderedLine::new(Tone::Heading, "Contact Information"),
        RenderedLine::new(Tone::Title, "Email: ")
            .push(Tone::Link, contact.email.clone())
            .indent(2),
    ];
    if let Some(twitter) = &contact.twitter {
        let handle = contact.twitter_handle().unwrap_or_else(|| twitter.clone());
        lines.push(
            RenderedLine::new(Tone::Title, "Twitter: ")
                .push(Tone::Link, handle)
                .push(Tone::Dim, format!("  {twitter}"))
                .indent(2),
        );
    }
    if let Some(github) = &contact.github {
        lines.push(
            RenderedLine::new(Tone::Title, "GitHub: ")
                .push(Tone::Link, github.clone())
                .indent(2),
        );
    }
    lines.push(RenderedLine::blank());
    lines.push(RenderedLine::new(Tone::Text, contact.office_hours.clone()));
    lines.push(RenderedLine::new(Tone::Text, contact.response_time.clone()));
    lines.push(RenderedLine::new(Tone::Warning, format!("! {}", contact.urgent_note)));

    if !contact.faqs.is_empty() {
        lines.push(RenderedLine::blank());
        lines.push(RenderedLine::new(Tone::Heading, "Frequently Asked Questions"));
        for faq in &contact.faqs {
            lines.push(RenderedLine::new(Tone::Accent, faq.question.clone()).indent(2));
            lines.push(RenderedLine::new(Tone::Text, faq.answer.clone()).indent(4));
        }
    }
    lines
}

fn render_colors(preferences: Preferences) -> Vec<RenderedLine> {
    let mut lines = vec![RenderedLine::new(Tone::Heading, "Customize Terminal")];
    for (idx, theme) in ThemeName::ALL.iter().enumerate() {
        let (marker, tone) = if *theme == preferences.theme {
            ("● ", Tone::Success)
        } else {
            ("○ ", Tone::Dim)
        };
        lines.push(
            RenderedLine::new(tone, marker)
                .push(Tone::Text, format!("{:<8}", theme.label()))
                .push(Tone::Dim, theme.swatch())
                .indent(2)
                .item(idx),
        );
    }

    let percent = preferences.opacity_percent();
    let filled = (percent / 5) as usize;
    lines.push(RenderedLine::blank());
    lines.push(RenderedLine::new(
        Tone::Title,
        format!("Background Opacity: {percent}%"),
    ));
    lines.push(
        RenderedLine::new(Tone::Accent, "█".repeat(filled))
            .push(Tone::Dim, "░".repeat(20 - filled.min(20)))
            .indent(2),
    );
    lines.push(RenderedLine::new(
        Tone::Dim,
        "Use + and - to change the opacity. To customize the background wallpaper, use the dashboard command and open the Appearance section.",
    ));
    lines
}

fn render_install(content: &ContentProvider, os: Os) -> Vec<RenderedLine> {
    let mut lines = vec![
        RenderedLine::new(Tone::Heading, "Available Installation Commands:"),
        RenderedLine::new(Tone::Dim, format!("Detected OS: {}", os.label())),
    ];
    let commands = content.install_commands_for(os);
    if commands.is_empty() {
        lines.push(RenderedLine::new(
            Tone::Dim,
            format!("No installation commands available for {}.", os.label()),
        ));
        return lines;
    }
    for cmd in commands {
        lines.push(RenderedLine::new(Tone::Accent, cmd.description.clone()));
        lines.push(RenderedLine::new(Tone::Code, cmd.command.clone()).indent(2));
    }
    lines
}

/// Overview printed when the terminal hands off to the dashboard
pub fn render_dashboard(content: &ContentProvider, os: Os) -> Vec<RenderedLine> {
    let contact = content.get_contact_info();
    let posts = content.list_blog_posts(&CategoryFilter::All).len();
    let sections = [
        (
            "Projects",
            format!("{} projects", content.list_projects().len()),
            "Explore available projects with descriptions and links",
        ),
        (
            "Team",
            format!("{} members", content.list_team_members().len()),
            "Meet the people behind arAIse",
        ),
        (
            "Blog",
            format!("{posts} posts"),
            "Read our latest articles and updates",
        ),
        (
            "Contact",
            format!("{} FAQs", contact.faqs.len()),
            "Get in touch with the team",
        ),
        (
            "Contribute",
            "guidelines".to_string(),
            "Learn how to contribute to arAIse",
        ),
    ];

    let mut lines = vec![
        RenderedLine::new(Tone::Heading, "Dashboard"),
        RenderedLine::new(Tone::Text, "Welcome to arAIse. Select a section to explore."),
        RenderedLine::blank(),
    ];
    for (name, count, summary) in sections {
        lines.push(
            RenderedLine::new(Tone::Title, format!("{name:<12}"))
                .push(Tone::Accent, format!("{count:<12}"))
                .push(Tone::Dim, summary)
                .indent(2),
        );
    }

    lines.push(RenderedLine::blank());
    lines.push(RenderedLine::new(
        Tone::Heading,
        format!("Install on {}", os.label()),
    ));
    match content.install_commands_for(os).first() {
        Some(cmd) => lines.push(RenderedLine::new(Tone::Code, cmd.command.clone()).indent(2)),
        None => lines.push(RenderedLine::new(
            Tone::Dim,
            format!("No installer published for {} yet.", os.label()),
        )),
    }
    lines
}

/// Prompt line plus indented output for every history entry
pub fn render_transcript(
    history: &[HistoryEntry],
    ctx: &RenderContext<'_>,
    prompt: &str,
) -> Vec<RenderedLine> {
    let mut lines = Vec::new();
    for entry in history {
        lines.push(
            RenderedLine::new(Tone::Link, format!("{prompt} "))
                .push(Tone::Text, entry.command.clone()),
        );
        for line in render(&entry.output, ctx) {
            let indent = line.indent + 2;
            lines.push(line.indent(indent));
        }
    }
    lines
}

pub fn to_plain_text(lines: &[RenderedLine]) -> String {
    lines
        .iter()
        .map(RenderedLine::plain)
        .collect::<Vec<_>>()
        .join("\n")
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::panel::DrillDown;

    fn content() -> ContentProvider {
        ContentProvider::bundled().unwrap()
    }

    fn text_of(output: &Output) -> String {
        let content = content();
        let ctx = RenderContext {
            content: &content,
            preferences: Preferences::default(),
        };
        to_plain_text(&render(output, &ctx))
    }

    #[test]
    fn test_not_found_names_command() {
        let text = text_of(&Output::NotFound {
            command: "frobnicate".into(),
        });
        assert_eq!(
            text,
            "Command not found: frobnicate. Type 'help' to see available commands."
        );
    }

    #[test]
    fn test_empty_renders_nothing() {
        assert_eq!(text_of(&Output::Empty), "");
    }

    #[test]
    fn test_project_list_and_detail() {
        let list = text_of(&Output::Projects(DrillDown::list()));
        assert!(list.starts_with("Available Projects:"));
        assert!(list.contains("arAIse Package Manager"));
        assert!(list.contains("Gesture Canvas"));

        let detail = text_of(&Output::Projects(DrillDown::detail("p1".to_string())));
        assert!(detail.contains("GitHub Repository: https://github.com/Araise25/arAIse_PM"));
        assert!(detail.contains("Last updated: 2025-03-02"));
        assert!(!detail.contains("Gesture Canvas"));
    }

    #[test]
    fn test_stale_selection_renders_message() {
        let text = text_of(&Output::Team(DrillDown::detail(77)));
        assert!(text.contains("team member 77 is no longer available"));
    }

    #[test]
    fn test_list_rows_carry_item_indices() {
        let content = content();
        let ctx = RenderContext {
            content: &content,
            preferences: Preferences::default(),
        };
        let lines = render(&Output::Team(DrillDown::list()), &ctx);
        let items: Vec<usize> = lines.iter().filter_map(|line| line.item).collect();
        assert_eq!(items, vec![0, 1, 2]);
    }

    #[test]
    fn test_blog_post_blocks() {
        let text = text_of(&Output::Blog(DrillDown::detail(1)));
        assert!(text.contains("Why a package manager?"));
        assert!(text.contains("  • Single entry point: install, update, and remove tools"));
        assert!(!text.contains("**"));
    }

    #[test]
    fn test_install_lists_only_os_commands() {
        let text = text_of(&Output::Install { os: Os::Windows });
        assert!(text.contains("Detected OS: Windows"));
        assert!(text.contains("Invoke-WebRequest"));
        assert!(!text.contains("curl -fsSL"));
    }

    #[test]
    fn test_colors_marks_current_theme() {
        let content = content();
        let ctx = RenderContext {
            content: &content,
            preferences: Preferences {
                theme: ThemeName::Light,
                opacity: 0.5,
            },
        };
        let text = to_plain_text(&render(&Output::Colors, &ctx));
        assert!(text.contains("● Light"));
        assert!(text.contains("○ Dark"));
        assert!(text.contains("Background Opacity: 50%"));
    }

    #[test]
    fn test_transcript_prefixes_prompt() {
        let content = content();
        let ctx = RenderContext {
            content: &content,
            preferences: Preferences::default(),
        };
        let history = vec![HistoryEntry {
            id: 1,
            command: "exit".into(),
            output: Output::Exit,
        }];
        let lines = render_transcript(&history, &ctx, DEFAULT_PROMPT);
        assert_eq!(lines[0].plain(), "guest@arAIse:~$ exit");
        assert!(lines[1].plain().starts_with("  Looks like you tried to escape"));
    }

    #[test]
    fn test_dashboard_overview_counts() {
        let content = content();
        let text = to_plain_text(&render_dashboard(&content, Os::Linux));
        assert!(text.contains("3 projects"));
        assert!(text.contains("4 posts"));
        assert!(text.contains("Install on Linux"));
        assert!(text.contains("curl -fsSL"));
    }
}
