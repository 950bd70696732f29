//! UI Theme Module - palette tokens and style helpers
//!
//! Maps the interpreter's output tones onto ratatui styles. One palette per
//! theme choice offered by `colors`; `System` leaves colors to the terminal.

use ratatui::style::{Color, Modifier, Style};

use araise_core::preferences::ThemeName;
use araise_core::render::Tone;

/// Color palette tokens for the theme
#[derive(Clone, Debug)]
pub struct Palette {
    /// Background at full opacity
    pub bg: Color,
    /// Primary text color
    pub text: Color,
    /// Dimmed text (secondary info)
    pub text_dim: Color,
    /// Accent color (headings, command names)
    pub accent: Color,
    /// Prompt and link color
    pub link: Color,
    /// Inline code and install commands
    pub code: Color,
    pub success: Color,
    pub warn: Color,
    pub error: Color,
    /// Selection background
    pub selection_bg: Color,
    /// Selection foreground
    pub selection_fg: Color,
    /// Key hint text
    pub key_hint: Color,
}

impl Default for Palette {
    fn default() -> Self {
        Self::dark()
    }
}

impl Palette {
    pub fn dark() -> Self {
        Self {
            bg: Color::Rgb(12, 12, 20),
            text: Color::Rgb(212, 212, 212),
            text_dim: Color::Rgb(150, 150, 150),
            accent: Color::Rgb(168, 132, 255), // Violet
            link: Color::Rgb(79, 193, 255),    // Light blue
            code: Color::Rgb(78, 201, 176),    // Teal green
            success: Color::Rgb(78, 201, 176),
            warn: Color::Rgb(220, 180, 100),  // Amber
            error: Color::Rgb(244, 135, 113), // Coral red
            selection_bg: Color::Rgb(60, 45, 110),
            selection_fg: Color::White,
            key_hint: Color::Rgb(206, 145, 120), // Soft orange
        }
    }

    pub fn light() -> Self {
        Self {
            bg: Color::Rgb(245, 245, 240),
            text: Color::Rgb(40, 40, 40),
            text_dim: Color::Rgb(110, 110, 110),
            accent: Color::Rgb(100, 60, 200),
            link: Color::Rgb(20, 100, 190),
            code: Color::Rgb(20, 130, 90),
            success: Color::Rgb(20, 130, 90),
            warn: Color::Rgb(170, 110, 0),
            error: Color::Rgb(190, 40, 40),
            selection_bg: Color::Rgb(210, 200, 245),
            selection_fg: Color::Black,
            key_hint: Color::Rgb(170, 90, 40),
        }
    }

    /// Named ANSI colors only, so the terminal's own scheme applies
    pub fn system() -> Self {
        Self {
            bg: Color::Reset,
            text: Color::Reset,
            text_dim: Color::DarkGray,
            accent: Color::Magenta,
            link: Color::Cyan,
            code: Color::Green,
            success: Color::Green,
            warn: Color::Yellow,
            error: Color::Red,
            selection_bg: Color::Blue,
            selection_fg: Color::White,
            key_hint: Color::Yellow,
        }
    }
}

/// Theme configuration
#[derive(Clone, Debug, Default)]
pub struct Theme {
    pub palette: Palette,
    /// Background opacity in `0.0..=1.0`
    pub opacity: f32,
}

impl Theme {
    pub fn new(name: ThemeName, opacity: f32) -> Self {
        let palette = match name {
            ThemeName::Dark => Palette::dark(),
            ThemeName::Light => Palette::light(),
            ThemeName::System => Palette::system(),
        };
        Self { palette, opacity }
    }

    /// Background after applying opacity. A terminal cannot blend with the
    /// desktop, so opacity fades the palette background toward black.
    pub fn background(&self) -> Color {
        match self.palette.bg {
            Color::Rgb(r, g, b) => {
                let scale = |c: u8| (c as f32 * self.opacity.clamp(0.0, 1.0)).round() as u8;
                Color::Rgb(scale(r), scale(g), scale(b))
            }
            other => other,
        }
    }

    pub fn base_style(&self) -> Style {
        Style::default().fg(self.palette.text).bg(self.background())
    }

    // ========== Tone styles ==========

    pub fn tone_style(&self, tone: Tone) -> Style {
        let p = &self.palette;
        match tone {
            Tone::Heading => Style::default().fg(p.accent).add_modifier(Modifier::BOLD),
            Tone::Title => Style::default().fg(p.text).add_modifier(Modifier::BOLD),
            Tone::Text => Style::default().fg(p.text),
            Tone::Dim => Style::default().fg(p.text_dim),
            Tone::Accent => Style::default().fg(p.accent),
            Tone::Link => Style::default().fg(p.link).add_modifier(Modifier::UNDERLINED),
            Tone::Code => Style::default().fg(p.code),
            Tone::Success => Style::default().fg(p.success),
            Tone::Warning => Style::default().fg(p.warn),
            Tone::Error => Style::default().fg(p.error),
        }
    }

    /// Style for the prompt prefix
    pub fn prompt_style(&self) -> Style {
        Style::default()
            .fg(self.palette.link)
            .add_modifier(Modifier::BOLD)
    }

    /// Style for selected items
    pub fn selection_style(&self) -> Style {
        Style::default()
            .bg(self.palette.selection_bg)
            .fg(self.palette.selection_fg)
            .add_modifier(Modifier::BOLD)
    }

    /// Style for key hints in footer
    pub fn key_hint_style(&self) -> Style {
        Style::default().fg(self.palette.key_hint)
    }

    pub fn text_dim_style(&self) -> Style {
        Style::default().fg(self.palette.text_dim)
    }

    /// Style for the mode badge in the footer
    pub fn badge_style(&self, active: bool) -> Style {
        if active {
            Style::default()
                .fg(self.palette.accent)
                .add_modifier(Modifier::BOLD)
        } else {
            Style::default().fg(self.palette.text_dim)
        }
    }

    pub fn error_style(&self) -> Style {
        Style::default().fg(self.palette.error)
    }
}

/// ANSI escape for printing a tone outside the full-screen terminal
pub fn ansi(tone: Tone) -> &'static str {
    match tone {
        Tone::Heading => "\x1b[1;35m",
        Tone::Title => "\x1b[1m",
        Tone::Text => "",
        Tone::Dim => "\x1b[2m",
        Tone::Accent => "\x1b[35m",
        Tone::Link => "\x1b[36m",
        Tone::Code => "\x1b[32m",
        Tone::Success => "\x1b[32m",
        Tone::Warning => "\x1b[33m",
        Tone::Error => "\x1b[31m",
    }
}
