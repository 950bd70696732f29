//! `araise init` command - writes a default araise.yml

use std::fs;
use std::path::{Path, PathBuf};

use anyhow::{Context, bail};

use araise_core::config::{AraiseConfig, CONFIG_NAMES};

const HEADER: &str = "\
# arAIse terminal configuration
#
# content_dir: ./content   # directory with projects.json, team.json, blog.json, contact.json
# os: linux                # override OS detection (windows, mac, linux)
";

/// Generate the YAML written by `init`
pub fn generate_yaml() -> anyhow::Result<String> {
    let body = AraiseConfig::default().to_yaml()?;
    Ok(format!("{HEADER}\n{body}"))
}

/// Run the init command in `dir`
pub fn run_init(dir: &Path, yes: bool) -> anyhow::Result<PathBuf> {
    for name in CONFIG_NAMES {
        let path = dir.join(name);
        if path.exists() {
            if !yes {
                bail!(
                    "Config file {} already exists. Use --yes to overwrite.",
                    path.display()
                );
            }
            println!("Overwriting existing config: {}", path.display());
        }
    }

    let yaml = generate_yaml()?;
    let output_path = dir.join(CONFIG_NAMES[0]);
    fs::write(&output_path, &yaml)
        .with_context(|| format!("Failed to write {}", output_path.display()))?;
    tracing::info!(path = %output_path.display(), "config written");

    println!("Created: {}\n", output_path.display());
    println!("Next steps:");
    println!("  1. Review and customize {}", CONFIG_NAMES[0]);
    println!("  2. Run `araise check` to validate content and config");
    println!("  3. Run `araise` to open the terminal");
    Ok(output_path)
}
