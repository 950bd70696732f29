//! `araise check` command - validates config and content

use std::path::{Path, PathBuf};

use araise_core::config::AraiseConfig;
use araise_core::content::CategoryFilter;
use araise_core::platform::Os;

#[derive(Debug)]
pub struct Check {
    pub name: String,
    pub passed: bool,
    pub message: String,
    pub hint: Option<String>,
}

impl Check {
    fn ok(name: impl Into<String>, message: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            passed: true,
            message: message.into(),
            hint: None,
        }
    }

    fn fail(name: impl Into<String>, message: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            passed: false,
            message: message.into(),
            hint: None,
        }
    }

    fn with_hint(mut self, hint: impl Into<String>) -> Self {
        self.hint = Some(hint.into());
        self
    }
}

pub fn run_check(config_arg: Option<&Path>, cwd: &Path) -> anyhow::Result<()> {
    println!("arAIse Check\n");

    let checks = collect_checks(config_arg, cwd);
    for check in &checks {
        print_check(check);
    }
    println!();

    let failed: Vec<_> = checks.iter().filter(|c| !c.passed).collect();
    if failed.is_empty() {
        println!("All checks passed!");
        return Ok(());
    }

    println!("Issues found:");
    for check in &failed {
        println!("  - {}: {}", check.name, check.message);
        if let Some(hint) = &check.hint {
            println!("    Hint: {}", hint);
        }
    }
    anyhow::bail!("{} check(s) failed", failed.len())
}

fn print_check(check: &Check) {
    let icon = if check.passed { "✓" } else { "✗" };
    let color = if check.passed { "\x1b[32m" } else { "\x1b[31m" };
    let reset = "\x1b[0m";

    println!(
        "  {}{}{} {}: {}",
        color, icon, reset, check.name, check.message
    );

    if let Some(hint) = &check.hint {
        println!("    └─ {}", hint);
    }
}

pub fn collect_checks(config_arg: Option<&Path>, cwd: &Path) -> Vec<Check> {
    let mut checks = Vec::new();

    // === Configuration ===
    let (config, base): (AraiseConfig, PathBuf) = match crate::resolve_config(config_arg, cwd) {
        Ok(Some((path, config))) => {
            checks.push(Check::ok("Configuration", path.display().to_string()));
            let base = path.parent().map(Path::to_path_buf).unwrap_or_else(|| cwd.to_path_buf());
            (config, base)
        }
        Ok(None) => {
            checks.push(
                Check::ok("Configuration", "not found, using defaults")
                    .with_hint("Run `araise init` to create one"),
            );
            (AraiseConfig::default(), cwd.to_path_buf())
        }
        Err(e) => {
            checks.push(Check::fail("Configuration", e.to_string()));
            return checks;
        }
    };

    // === Content ===
    let content = match config.load_content(&base) {
        Ok(content) => content,
        Err(e) => {
            checks.push(
                Check::fail("Content", e.to_string())
                    .with_hint("content_dir must hold projects.json, team.json, blog.json and contact.json"),
            );
            return checks;
        }
    };
    let source = match &config.content_dir {
        Some(dir) => dir.display().to_string(),
        None => "bundled".to_string(),
    };
    checks.push(Check::ok(
        "Content",
        format!(
            "{source}: {} projects, {} team members, {} blog posts, {} FAQs",
            content.list_projects().len(),
            content.list_team_members().len(),
            content.list_blog_posts(&CategoryFilter::All).len(),
            content.get_contact_info().faqs.len(),
        ),
    ));

    let issues = content.validate();
    if issues.is_empty() {
        checks.push(Check::ok("Consistency", "ids unique, fields present"));
    }
    for issue in issues {
        checks.push(Check::fail(format!("Content ({})", issue.collection), issue.message));
    }

    // === Install commands ===
    for os in Os::ALL {
        let count = content.install_commands_for(os).len();
        if count == 0 {
            checks.push(
                Check::fail(format!("Install ({})", os.label()), "no install commands")
                    .with_hint(format!("add an installCommands entry with os \"{}\"", os.as_str())),
            );
        } else {
            checks.push(Check::ok(
                format!("Install ({})", os.label()),
                format!("{count} command(s)"),
            ));
        }
    }

    checks.push(Check::ok(
        "Blog categories",
        content.blog_categories().join(", "),
    ));

    checks
}
