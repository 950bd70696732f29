//! Full-screen terminal: prompt, scrollback and keyboard browsing.

use std::io;
use std::time::Duration;

use crossterm::{
    event::{self, Event as CEvent, KeyCode, KeyEvent, KeyEventKind, KeyModifiers},
    execute,
    terminal::{EnterAlternateScreen, LeaveAlternateScreen, disable_raw_mode, enable_raw_mode},
};
use ratatui::{
    Frame, Terminal,
    backend::CrosstermBackend,
    layout::{Alignment, Constraint, Direction, Layout, Rect},
    text::{Line, Span},
    widgets::{Block, Paragraph},
};

use araise_core::output::Output;
use araise_core::preferences::{OPACITY_STEP, PreferencesStore};
use araise_core::render::{RenderContext, Tone, UH_OH_BANNER, UH_OH_MESSAGE, render};
use araise_core::session::{Outcome, Session, SessionMode};

use crate::ui::{self, Theme};

const PAGE: usize = 10;
/// How long the redirect entry stays on screen before leaving
const REDIRECT_PAUSE: Duration = Duration::from_millis(600);

/// Why the terminal closed
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum Exit {
    Quit,
    Navigate(String),
}

#[derive(Clone, Copy, Debug, PartialEq, Eq, Default)]
enum Focus {
    #[default]
    Input,
    /// Keys move a cursor over the newest interactive entry
    Browse,
}

#[derive(Clone, Debug, Default)]
struct UiState {
    focus: Focus,
    cursor: usize,
    /// Lines scrolled up from the bottom; 0 follows new output
    scroll: usize,
    status: Option<String>,
}

enum Control {
    Continue,
    Quit,
}

// --- Terminal setup/teardown ---
fn setup_terminal() -> io::Result<Terminal<CrosstermBackend<io::Stdout>>> {
    enable_raw_mode()?;
    let mut stdout = io::stdout();
    execute!(stdout, EnterAlternateScreen)?;
    let backend = CrosstermBackend::new(stdout);
    Terminal::new(backend)
}

fn restore_terminal(mut terminal: Terminal<CrosstermBackend<io::Stdout>>) -> io::Result<()> {
    disable_raw_mode()?;
    execute!(terminal.backend_mut(), LeaveAlternateScreen)?;
    terminal.show_cursor()?;
    Ok(())
}

pub fn run_tui(
    session: &mut Session,
    prompt: &str,
    store: &mut dyn PreferencesStore,
) -> io::Result<Exit> {
    let mut terminal = setup_terminal()?;
    let result = tui_loop(&mut terminal, session, prompt, store);
    restore_terminal(terminal)?;
    result
}

fn tui_loop(
    terminal: &mut Terminal<CrosstermBackend<io::Stdout>>,
    session: &mut Session,
    prompt: &str,
    store: &mut dyn PreferencesStore,
) -> io::Result<Exit> {
    let mut ui = UiState::default();

    loop {
        terminal.draw(|f| draw(f, session, prompt, &ui))?;

        if let Some(route) = session.take_navigation() {
            std::thread::sleep(REDIRECT_PAUSE);
            return Ok(Exit::Navigate(route));
        }

        if !event::poll(Duration::from_millis(100))? {
            continue;
        }
        let CEvent::Key(key) = event::read()? else {
            continue;
        };
        if key.kind != KeyEventKind::Press {
            continue;
        }
        if let Control::Quit = handle_key(session, store, &mut ui, key) {
            return Ok(Exit::Quit);
        }
    }
}

fn handle_key(
    session: &mut Session,
    store: &mut dyn PreferencesStore,
    ui: &mut UiState,
    key: KeyEvent,
) -> Control {
    if key.code == KeyCode::Char('c') && key.modifiers.contains(KeyModifiers::CONTROL) {
        return Control::Quit;
    }

    if session.mode() == SessionMode::EasterEgg {
        if matches!(key.code, KeyCode::Enter | KeyCode::Esc) {
            session.return_from_easter_egg();
        }
        return Control::Continue;
    }

    ui.status = None;
    match (key.code, key.modifiers) {
        (KeyCode::PageUp, _) => ui.scroll += PAGE,
        (KeyCode::PageDown, _) => ui.scroll = ui.scroll.saturating_sub(PAGE),
        _ => match ui.focus {
            Focus::Input => handle_input_key(session, ui, key),
            Focus::Browse => handle_browse_key(session, store, ui, key),
        },
    }
    Control::Continue
}

fn handle_input_key(session: &mut Session, ui: &mut UiState, key: KeyEvent) {
    match key.code {
        KeyCode::Enter => {
            let outcome = session.submit();
            after_outcome(ui, &outcome);
        }
        KeyCode::Backspace => session.backspace(),
        KeyCode::Up => {
            session.previous_command();
        }
        KeyCode::Down => {
            session.next_command();
        }
        KeyCode::Tab => {
            if session.latest_interactive().is_some() {
                ui.focus = Focus::Browse;
                ui.cursor = 0;
            } else {
                ui.status = Some("Nothing to browse yet".into());
            }
        }
        KeyCode::Char(c) if !key.modifiers.contains(KeyModifiers::CONTROL) => {
            session.push_char(c);
        }
        _ => {}
    }
}

fn handle_browse_key(
    session: &mut Session,
    store: &mut dyn PreferencesStore,
    ui: &mut UiState,
    key: KeyEvent,
) {
    let Some(index) = session.latest_interactive() else {
        ui.focus = Focus::Input;
        return;
    };
    let (count, is_detail, is_colors) = {
        let output = &session.history()[index].output;
        (
            output.item_count(session.content()),
            output.is_detail(),
            matches!(output, Output::Colors),
        )
    };

    match key.code {
        KeyCode::Tab => ui.focus = Focus::Input,
        KeyCode::Char('j') | KeyCode::Char('s') | KeyCode::Down => {
            if ui.cursor + 1 < count {
                ui.cursor += 1;
            }
        }
        KeyCode::Char('k') | KeyCode::Char('w') | KeyCode::Up => {
            ui.cursor = ui.cursor.saturating_sub(1);
        }
        KeyCode::Enter | KeyCode::Char('l') | KeyCode::Char('d') | KeyCode::Right => {
            match session.activate(index, ui.cursor) {
                Ok(Some(outcome)) => after_outcome(ui, &outcome),
                Ok(None) => {
                    if is_colors {
                        session.preferences().save(store);
                    }
                }
                Err(e) => ui.status = Some(e.to_string()),
            }
        }
        KeyCode::Char('h') | KeyCode::Char('a') | KeyCode::Left | KeyCode::Esc => {
            if is_detail {
                if let Err(e) = session.back(index) {
                    ui.status = Some(e.to_string());
                }
            } else if key.code == KeyCode::Esc {
                ui.focus = Focus::Input;
            }
        }
        KeyCode::Char('+') | KeyCode::Char('=') if is_colors => {
            session.adjust_opacity(OPACITY_STEP);
            session.preferences().save(store);
        }
        KeyCode::Char('-') if is_colors => {
            session.adjust_opacity(-OPACITY_STEP);
            session.preferences().save(store);
        }
        _ => {}
    }
}

fn after_outcome(ui: &mut UiState, outcome: &Outcome) {
    ui.scroll = 0;
    ui.cursor = 0;
    if matches!(outcome, Outcome::Cleared) {
        ui.focus = Focus::Input;
    }
}

fn draw(f: &mut Frame, session: &Session, prompt: &str, ui: &UiState) {
    let prefs = session.preferences();
    let theme = Theme::new(prefs.theme, prefs.opacity);
    let area = f.area();
    f.render_widget(Block::default().style(theme.base_style()), area);

    if session.mode() == SessionMode::EasterEgg {
        draw_easter_egg(f, area, &theme);
        return;
    }

    let outer = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Min(1),
            Constraint::Length(1),
            Constraint::Length(1),
        ])
        .split(area);

    // [ scrollback ]
    let lines = history_lines(session, prompt, ui, &theme, outer[0].width as usize);
    let height = outer[0].height as usize;
    let max_scroll = lines.len().saturating_sub(height);
    let top = max_scroll - ui.scroll.min(max_scroll);
    f.render_widget(
        Paragraph::new(lines).scroll((top.min(u16::MAX as usize) as u16, 0)),
        outer[0],
    );

    // [ prompt ]
    let input_style = if ui.focus == Focus::Input {
        theme.tone_style(Tone::Text)
    } else {
        theme.text_dim_style()
    };
    let mut prompt_spans = vec![
        Span::styled(format!("{prompt} "), theme.prompt_style()),
        Span::styled(session.input().to_string(), input_style),
    ];
    if ui.focus == Focus::Input {
        prompt_spans.push(Span::styled("█", theme.key_hint_style()));
    }
    f.render_widget(Paragraph::new(Line::from(prompt_spans)), outer[1]);

    // [ footer ]
    f.render_widget(Paragraph::new(footer(ui, &theme)), outer[2]);
}

fn history_lines(
    session: &Session,
    prompt: &str,
    ui: &UiState,
    theme: &Theme,
    width: usize,
) -> Vec<Line<'static>> {
    let target = match ui.focus {
        Focus::Browse => session.latest_interactive(),
        Focus::Input => None,
    };
    let ctx = RenderContext {
        content: session.content(),
        preferences: session.preferences(),
    };

    let mut out = Vec::new();
    for (idx, entry) in session.history().iter().enumerate() {
        out.push(Line::from(vec![
            Span::styled(format!("{prompt} "), theme.prompt_style()),
            Span::styled(
                entry.command.clone(),
                theme.tone_style(Tone::Text),
            ),
        ]));
        for line in render(&entry.output, &ctx) {
            let indent = line.indent + 2;
            let line = line.indent(indent);
            let selected = target == Some(idx) && line.item == Some(ui.cursor);
            for row in ui::wrap(&line, width) {
                out.push(ui::to_line(&row, theme, selected));
            }
        }
    }
    out
}

fn footer(ui: &UiState, theme: &Theme) -> Line<'static> {
    let hints: &[(&str, &str)] = match ui.focus {
        Focus::Input => &[
            ("Enter", "run"),
            ("↑↓", "recall"),
            ("Tab", "browse"),
            ("PgUp/PgDn", "scroll"),
            ("Ctrl+C", "quit"),
        ],
        Focus::Browse => &[
            ("j/k", "move"),
            ("Enter/l", "open"),
            ("h", "back"),
            ("+/-", "opacity"),
            ("Tab", "type"),
        ],
    };

    let mut spans = vec![
        Span::styled(" TYPE ", theme.badge_style(ui.focus == Focus::Input)),
        Span::styled(" BROWSE ", theme.badge_style(ui.focus == Focus::Browse)),
        Span::raw(" "),
    ];
    for (key, label) in hints {
        spans.push(Span::styled(format!(" {key}"), theme.key_hint_style()));
        spans.push(Span::styled(format!(" {label}"), theme.text_dim_style()));
    }
    if let Some(status) = &ui.status {
        spans.push(Span::raw("  "));
        spans.push(Span::styled(status.clone(), theme.error_style()));
    }
    Line::from(spans)
}

fn draw_easter_egg(f: &mut Frame, area: Rect, theme: &Theme) {
    let mut lines: Vec<Line> = UH_OH_BANNER
        .lines()
        .filter(|line| !line.is_empty())
        .map(|line| Line::from(Span::styled(line.to_string(), theme.tone_style(Tone::Error))))
        .collect();
    lines.push(Line::from(""));
    lines.push(Line::from(Span::styled(
        UH_OH_MESSAGE,
        theme.tone_style(Tone::Title),
    )));
    lines.push(Line::from(""));
    lines.push(Line::from(Span::styled(
        "Press Enter to return to the terminal",
        theme.text_dim_style(),
    )));

    let pad = (area.height as usize).saturating_sub(lines.len()) / 2;
    let mut padded = vec![Line::from(""); pad];
    padded.extend(lines);
    f.render_widget(Paragraph::new(padded).alignment(Alignment::Center), area);
}
