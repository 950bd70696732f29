mod commands;
mod tui;
mod ui;

use std::path::{Path, PathBuf};
use std::sync::Mutex;

use anyhow::Context;
use clap::{Parser, Subcommand};
use tracing_subscriber::{EnvFilter, layer::SubscriberExt, util::SubscriberInitExt};

use araise_core::config::{AraiseConfig, ConfigError};
use araise_core::content::{CategoryFilter, ContentProvider};
use araise_core::model::PostId;
use araise_core::preferences::{MemoryStore, Preferences};
use araise_core::render::{
    RenderContext, RenderedLine, Tone, UH_OH_BANNER, UH_OH_MESSAGE, render_dashboard,
    render_post_card, render_transcript,
};
use araise_core::session::{Outcome, Session};

#[derive(Parser)]
#[command(name = "araise")]
#[command(about = "The arAIse terminal: projects, team, blog and contact info", long_about = None)]
struct Cli {
    /// Config file (default: search for araise.yml from the current directory up)
    #[arg(short, long, global = true)]
    config: Option<PathBuf>,

    #[command(subcommand)]
    command: Option<Commands>,
}

#[derive(Subcommand)]
enum Commands {
    /// Open the full-screen terminal (default)
    Terminal {
        /// Open a blog post directly
        #[arg(long)]
        post: Option<PostId>,
        /// Skip the `help` run at startup
        #[arg(long)]
        no_help: bool,
    },
    /// Execute command lines and print the transcript
    Run {
        #[arg(required = true)]
        lines: Vec<String>,
    },
    /// List blog posts
    Blog {
        #[arg(short = 'C', long)]
        category: Option<String>,
    },
    /// Validate config and content
    Check,
    /// Write a default araise.yml
    Init {
        #[arg(short, long)]
        yes: bool,
    },
}

enum LogTarget {
    Stderr,
    File(PathBuf),
}

fn init_tracing(target: LogTarget) {
    let filter = EnvFilter::new(
        std::env::var("RUST_LOG").unwrap_or_else(|_| "araise=info,araise_core=info".into()),
    );

    match target {
        LogTarget::Stderr => {
            tracing_subscriber::registry()
                .with(filter)
                .with(tracing_subscriber::fmt::layer().with_writer(std::io::stderr))
                .init();
        }
        LogTarget::File(path) => match std::fs::File::create(&path) {
            Ok(file) => {
                // Full-screen mode: keep the screen clean
                tracing_subscriber::registry()
                    .with(filter)
                    .with(
                        tracing_subscriber::fmt::layer()
                            .with_ansi(false)
                            .with_writer(Mutex::new(file)),
                    )
                    .init();
            }
            Err(e) => {
                eprintln!("Cannot open log file {}: {}", path.display(), e);
            }
        },
    }
}

/// Explicit config, or the first one found from `cwd` upwards.
/// `Ok(None)` means no config exists and defaults apply.
pub(crate) fn resolve_config(
    explicit: Option<&Path>,
    cwd: &Path,
) -> Result<Option<(PathBuf, AraiseConfig)>, ConfigError> {
    if let Some(path) = explicit {
        return AraiseConfig::load(path).map(|config| Some((path.to_path_buf(), config)));
    }
    match AraiseConfig::discover(cwd) {
        Ok(found) => Ok(Some(found)),
        Err(ConfigError::NotFound { .. }) => Ok(None),
        Err(e) => Err(e),
    }
}

/// Config plus the content it names
struct Environment {
    config: AraiseConfig,
    content: ContentProvider,
}

fn load_environment(explicit: Option<&Path>) -> anyhow::Result<Environment> {
    let cwd = std::env::current_dir().context("Failed to get current directory")?;

    let (config, base) = match resolve_config(explicit, &cwd) {
        Ok(Some((path, config))) => {
            tracing::info!(path = %path.display(), "config loaded");
            let base = path.parent().map(Path::to_path_buf).unwrap_or_else(|| cwd.clone());
            (config, base)
        }
        Ok(None) => (AraiseConfig::default(), cwd),
        // An explicitly named config must load
        Err(e) if explicit.is_some() => return Err(e).context("Failed to load config"),
        Err(e) => {
            tracing::warn!("ignoring config: {e}");
            eprintln!("Warning: {e}; using defaults");
            (AraiseConfig::default(), cwd)
        }
    };

    let content = config
        .load_content(&base)
        .context("Failed to load content")?;
    Ok(Environment { config, content })
}

/// `store` lives only as long as this process, so a fresh one yields the
/// config's preferences; it matters once the TUI has written to it.
fn new_session(env: Environment, store: &MemoryStore) -> anyhow::Result<(Session, String)> {
    let mut settings = env.config.session_settings()?;
    settings.preferences = Preferences::load(store, settings.preferences);
    Ok((Session::new(env.content, settings), env.config.prompt))
}

fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();
    let config_arg = cli.config.as_deref();

    let target = match cli.command {
        None | Some(Commands::Terminal { .. }) => {
            LogTarget::File(std::env::temp_dir().join("araise.log"))
        }
        _ => LogTarget::Stderr,
    };
    init_tracing(target);

    match cli.command {
        Some(Commands::Init { yes }) => {
            let cwd = std::env::current_dir().context("Failed to get current directory")?;
            commands::run_init(&cwd, yes)?;
            Ok(())
        }
        Some(Commands::Check) => {
            let cwd = std::env::current_dir().context("Failed to get current directory")?;
            commands::run_check(config_arg, &cwd)
        }
        Some(Commands::Blog { category }) => run_blog(config_arg, category.as_deref()),
        Some(Commands::Run { lines }) => run_lines(config_arg, &lines),
        Some(Commands::Terminal { post, no_help }) => run_terminal(config_arg, post, no_help),
        None => run_terminal(config_arg, None, false),
    }
}

fn run_terminal(config_arg: Option<&Path>, post: Option<PostId>, no_help: bool) -> anyhow::Result<()> {
    let env = load_environment(config_arg)?;
    let help_on_start = env.config.help_on_start && !no_help;
    // Session-scoped; nothing is persisted between runs
    let mut store = MemoryStore::new();
    let (mut session, prompt) = new_session(env, &store)?;

    if help_on_start {
        session.execute("help");
    }
    if let Some(id) = post {
        if let Err(e) = session.open_blog_post(id) {
            tracing::warn!(post = id, "deep link failed: {e}");
        }
    }

    let exit = tui::run_tui(&mut session, &prompt, &mut store)?;
    tracing::info!(?exit, commands = session.len(), "terminal closed");

    if let tui::Exit::Navigate(route) = exit {
        println!("Leaving terminal for {route}\n");
        ui::print_lines(&render_dashboard(session.content(), session.settings().os))?;
    }
    Ok(())
}

/// Execute each line in order, printing what the terminal would show
fn run_lines(config_arg: Option<&Path>, lines: &[String]) -> anyhow::Result<()> {
    let env = load_environment(config_arg)?;
    let store = MemoryStore::new();
    let (mut session, prompt) = new_session(env, &store)?;
    ui::print_lines(&transcript_for(&mut session, &prompt, lines))?;
    Ok(())
}

/// Output for `lines` run in order. A navigation request ends the run
/// with the dashboard overview; later lines are not executed.
fn transcript_for(session: &mut Session, prompt: &str, lines: &[String]) -> Vec<RenderedLine> {
    let mut out = Vec::new();
    for line in lines {
        match session.execute(line) {
            Outcome::Appended { index } | Outcome::Navigated { index, .. } => {
                let ctx = RenderContext {
                    content: session.content(),
                    preferences: session.preferences(),
                };
                out.extend(render_transcript(&session.history()[index..=index], &ctx, prompt));
            }
            Outcome::Cleared => {}
            Outcome::EasterEgg => {
                out.extend(
                    UH_OH_BANNER
                        .lines()
                        .filter(|l| !l.is_empty())
                        .map(|l| RenderedLine::new(Tone::Error, l)),
                );
                out.push(RenderedLine::new(Tone::Title, UH_OH_MESSAGE));
                session.return_from_easter_egg();
            }
        }

        if let Some(route) = session.take_navigation() {
            out.push(RenderedLine::blank());
            out.push(RenderedLine::new(Tone::Text, format!("Leaving terminal for {route}")));
            out.push(RenderedLine::blank());
            out.extend(render_dashboard(session.content(), session.settings().os));
            break;
        }
    }
    out
}

fn run_blog(config_arg: Option<&Path>, category: Option<&str>) -> anyhow::Result<()> {
    let env = load_environment(config_arg)?;
    ui::print_lines(&blog_listing(&env.content, category))?;
    Ok(())
}

/// Category list followed by the matching post cards
fn blog_listing(content: &ContentProvider, category: Option<&str>) -> Vec<RenderedLine> {
    let filter = CategoryFilter::from(category);

    let mut categories = vec!["all"];
    categories.extend(content.blog_categories());
    let mut out = vec![
        RenderedLine::new(Tone::Heading, "Blog"),
        RenderedLine::new(Tone::Dim, "Categories: ").push(Tone::Accent, categories.join(", ")),
        RenderedLine::blank(),
    ];

    let posts = content.list_blog_posts(&filter);
    if posts.is_empty() {
        let name = category.unwrap_or("all");
        out.push(RenderedLine::new(Tone::Dim, format!("No posts in category '{name}'.")));
    }
    for (idx, post) in posts.iter().enumerate() {
        out.push(
            RenderedLine::new(Tone::Dim, format!("#{} ", post.id))
                .push(Tone::Warning, format!("[{}]", post.category)),
        );
        out.extend(render_post_card(post, idx));
    }
    out
}

#[cfg(test)]
mod tests {
    use super::*;
    use araise_core::platform::Os;
    use araise_core::render::to_plain_text;
    use araise_core::session::{SessionMode, SessionSettings};

    const PROMPT: &str = "guest@arAIse:~$";

    fn session() -> Session {
        let settings = SessionSettings {
            os: Os::Linux,
            ..SessionSettings::default()
        };
        Session::new(ContentProvider::bundled().unwrap(), settings)
    }

    fn lines(raw: &[&str]) -> Vec<String> {
        raw.iter().map(|l| l.to_string()).collect()
    }

    #[test]
    fn test_transcript_stops_at_navigation() {
        let mut session = session();
        let text = to_plain_text(&transcript_for(
            &mut session,
            PROMPT,
            &lines(&["help", "dashboard", "team"]),
        ));

        assert_eq!(session.len(), 2);
        assert!(text.contains("guest@arAIse:~$ help"));
        assert!(text.contains("guest@arAIse:~$ dashboard"));
        assert!(text.contains("Redirecting to dashboard..."));
        assert!(text.contains("Leaving terminal for /dashboard"));
        assert!(text.contains("Install on Linux"));
        assert!(!text.contains("guest@arAIse:~$ team"));
        assert!(session.take_navigation().is_none());
    }

    #[test]
    fn test_transcript_shows_sudo_banner_then_continues() {
        let mut session = session();
        let out = transcript_for(&mut session, PROMPT, &lines(&["sudo", "blog"]));
        let text = to_plain_text(&out);

        assert!(text.contains(UH_OH_MESSAGE));
        assert!(out.iter().any(|l| l.segments.iter().any(|s| s.tone == Tone::Error)));
        assert!(!text.contains("guest@arAIse:~$ sudo"));
        assert!(text.contains("guest@arAIse:~$ blog"));
        assert_eq!(session.mode(), SessionMode::Terminal);
        assert_eq!(session.input(), "");
        assert_eq!(session.len(), 1);
    }

    #[test]
    fn test_transcript_clear_prints_nothing() {
        let mut session = session();
        let out = transcript_for(&mut session, PROMPT, &lines(&["clear"]));
        assert!(out.is_empty());
        assert!(session.is_empty());
    }

    #[test]
    fn test_blog_listing_unknown_category() {
        let content = ContentProvider::bundled().unwrap();
        let text = to_plain_text(&blog_listing(&content, Some("cooking")));
        assert!(text.contains("Categories: all, updates, tech, design"));
        assert!(text.contains("No posts in category 'cooking'."));
        assert!(!text.contains("#1 "));
    }

    #[test]
    fn test_blog_listing_filters_by_category() {
        let content = ContentProvider::bundled().unwrap();
        let text = to_plain_text(&blog_listing(&content, Some("tech")));
        assert!(text.contains("#2 [tech]"));
        assert!(text.contains("#4 [tech]"));
        assert!(!text.contains("[design]"));
        assert!(!text.contains("No posts"));

        let all = to_plain_text(&blog_listing(&content, None));
        for id in 1..=4 {
            assert!(all.contains(&format!("#{id} [")));
        }
    }
}
