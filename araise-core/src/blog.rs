//! Blog post bodies use a small markdown-like convention: blocks are
//! separated by blank lines, `## ` starts a heading and `- **Label**: text`
//! is a labelled bullet. Everything else is a plain paragraph.

#[derive(Clone, Debug, PartialEq, Eq)]
pub enum Block {
    Heading(String),
    Bullet { label: String, text: String },
    Paragraph(String),
}

pub fn parse_content(content: &str) -> Vec<Block> {
    content
        .split("\n\n")
        .map(str::trim)
        .filter(|block| !block.is_empty())
        .map(parse_block)
        .collect()
}

fn parse_block(block: &str) -> Block {
    if let Some(heading) = block.strip_prefix("## ") {
        return Block::Heading(heading.trim().to_string());
    }
    if let Some(rest) = block.strip_prefix("- **") {
        if let Some((label, text)) = rest.split_once("**") {
            let text = text.strip_prefix(':').unwrap_or(text);
            return Block::Bullet {
                label: label.to_string(),
                text: text.trim().to_string(),
            };
        }
    }
    Block::Paragraph(block.to_string())
}
