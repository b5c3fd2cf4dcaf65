//! Full-screen frontend built on Ratatui.
//!
//! # Layout
//! Title rule, guess board, letter summary, input line, message panel, key help.
//!
//! The terminal runs in raw mode, so Ctrl-C arrives as a key event rather than a
//! signal; it is turned into `InputEvent::Interrupted` like Esc.

use crate::game_state::{GameInterface, InputEvent};
use crate::interrupt::Interrupt;
use crate::render::{Screen, StyleTag, StyledLine};
use crate::{debug_log, info_log};
use crossterm::{
    cursor,
    event::{self, Event, KeyCode, KeyEvent, KeyEventKind, KeyModifiers},
    execute,
    terminal::{EnterAlternateScreen, LeaveAlternateScreen, disable_raw_mode, enable_raw_mode},
};
use ratatui::{
    Frame, Terminal,
    backend::CrosstermBackend,
    layout::{Alignment, Constraint, Direction, Layout, Rect},
    style::{Color, Modifier, Style},
    text::{Line, Span},
    widgets::{Block, Borders, Paragraph},
};
use std::io;
use std::time::Duration;

const MAX_INPUT_LEN: usize = 16;
const EVENT_POLL_TIMEOUT_MS: u64 = 100;
const ABSENT_GRAY: Color = Color::Rgb(0x66, 0x66, 0x66);

const HEADER_STYLE: Style = Style::new().fg(Color::Blue).add_modifier(Modifier::BOLD);
const HELP_STYLE: Style = Style::new().fg(Color::Gray);
const INPUT_STYLE: Style = Style::new().fg(Color::White).bg(Color::DarkGray);

/// Terminal look of each style tag.
pub fn tag_style(tag: StyleTag) -> Style {
    let bold_white = Style::new().fg(Color::White).add_modifier(Modifier::BOLD);
    match tag {
        StyleTag::Correct | StyleTag::SuccessBanner => bold_white.bg(Color::Green),
        StyleTag::Misplaced => bold_white.bg(Color::Yellow),
        StyleTag::Absent => Style::new().fg(Color::White).bg(ABSENT_GRAY),
        StyleTag::Plain => Style::new(),
        StyleTag::Dim => Style::new().add_modifier(Modifier::DIM),
        StyleTag::WarningText => Style::new().fg(Color::Red).bg(Color::Yellow),
        StyleTag::FailureBanner => bold_white.bg(Color::Red),
        StyleTag::Headline => HEADER_STYLE,
    }
}

/// Convert a styled line to Ratatui spans. `tile` pads each span to a board cell.
pub fn to_line(line: &StyledLine, tile: bool) -> Line<'static> {
    let spans: Vec<Span<'static>> = line
        .spans
        .iter()
        .flat_map(|s| {
            if tile {
                vec![
                    Span::styled(format!(" {} ", s.text), tag_style(s.tag)),
                    Span::raw(" "),
                ]
            } else {
                vec![Span::styled(s.text.clone(), tag_style(s.tag))]
            }
        })
        .collect();
    Line::from(spans)
}

/// Result of feeding one key press to the input line.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum KeyAction {
    Edited,
    Submit(String),
    Interrupt,
    Ignored,
}

/// The text the player is typing.
#[derive(Debug, Default)]
pub struct InputLine {
    text: String,
}

impl InputLine {
    pub fn text(&self) -> &str {
        &self.text
    }

    pub fn handle_key(&mut self, key: KeyEvent) -> KeyAction {
        if key.kind != KeyEventKind::Press {
            return KeyAction::Ignored;
        }
        let ctrl = key.modifiers.contains(KeyModifiers::CONTROL);
        match key.code {
            KeyCode::Char('c') if ctrl => KeyAction::Interrupt,
            KeyCode::Esc => KeyAction::Interrupt,
            KeyCode::Enter => KeyAction::Submit(std::mem::take(&mut self.text)),
            KeyCode::Backspace => {
                self.text.pop();
                KeyAction::Edited
            }
            KeyCode::Char(c) if !ctrl && !c.is_control() && self.text.len() < MAX_INPUT_LEN => {
                self.text.push(c.to_ascii_uppercase());
                KeyAction::Edited
            }
            _ => KeyAction::Ignored,
        }
    }
}

/// Context for rendering the UI.
struct RenderContext<'a> {
    screen: Option<&'a Screen>,
    input: &'a str,
    warning: Option<&'a StyledLine>,
    help: &'a str,
}

pub struct TuiInterface {
    terminal: Terminal<CrosstermBackend<io::Stdout>>,
    screen: Option<Screen>,
    input: InputLine,
    warning: Option<StyledLine>,
    help: &'static str,
}

impl TuiInterface {
    pub fn new() -> Result<Self, io::Error> {
        info_log!("TuiInterface::new() - Initializing TUI");
        enable_raw_mode()?;
        let mut stdout = io::stdout();
        execute!(stdout, EnterAlternateScreen, cursor::Hide)?;
        let backend = CrosstermBackend::new(stdout);
        let terminal = Terminal::new(backend)?;
        info_log!("Terminal setup complete");

        Ok(Self {
            terminal,
            screen: None,
            input: InputLine::default(),
            warning: None,
            help: "Type a word, Enter to guess, Esc or Ctrl-C to give up",
        })
    }

    pub fn cleanup(&mut self) -> Result<(), io::Error> {
        disable_raw_mode()?;
        execute!(
            self.terminal.backend_mut(),
            LeaveAlternateScreen,
            cursor::Show
        )?;
        Ok(())
    }

    fn draw(&mut self) -> Result<(), io::Error> {
        let ctx = RenderContext {
            screen: self.screen.as_ref(),
            input: self.input.text(),
            warning: self.warning.as_ref(),
            help: self.help,
        };
        self.terminal.draw(|f| Self::render_static(f, &ctx))?;
        Ok(())
    }

    /// Keep the final board up until any key is pressed.
    pub fn wait_for_dismiss(&mut self) -> Result<(), io::Error> {
        self.help = "Press any key to exit";
        self.draw()?;
        loop {
            if event::poll(Duration::from_millis(EVENT_POLL_TIMEOUT_MS))?
                && let Event::Key(key) = event::read()?
                && key.kind == KeyEventKind::Press
            {
                return Ok(());
            }
        }
    }

    fn render_static(f: &mut Frame, ctx: &RenderContext) {
        let rows = ctx.screen.map_or(0, |s| s.rows.len()) as u16;
        let chunks = Layout::default()
            .direction(Direction::Vertical)
            .constraints([
                Constraint::Length(1),
                Constraint::Length(rows * 2 + 1),
                Constraint::Length(3),
                Constraint::Length(3),
                Constraint::Length(3),
                Constraint::Min(1),
            ])
            .split(f.area());

        let headline = ctx.screen.map_or("", |s| s.headline.as_str());
        Self::render_title(f, chunks[0], headline);
        if let Some(screen) = ctx.screen {
            Self::render_board(f, chunks[1], screen);
            Self::render_letters(f, chunks[2], &screen.letters);
        }
        Self::render_input(f, chunks[3], ctx.input);
        let message = ctx.screen.and_then(|s| s.banner.as_ref()).or(ctx.warning);
        Self::render_message(f, chunks[4], message);
        Self::render_help(f, chunks[5], ctx.help);
    }

    fn render_title(f: &mut Frame, area: Rect, headline: &str) {
        let title = Paragraph::new(format!("── {headline} ──"))
            .style(HEADER_STYLE)
            .alignment(Alignment::Center);
        f.render_widget(title, area);
    }

    fn render_board(f: &mut Frame, area: Rect, screen: &Screen) {
        // Blank line between rows so tiles read as a grid
        let mut lines = Vec::with_capacity(screen.rows.len() * 2);
        for row in &screen.rows {
            lines.push(to_line(row, true));
            lines.push(Line::default());
        }
        f.render_widget(Paragraph::new(lines).alignment(Alignment::Center), area);
    }

    fn render_letters(f: &mut Frame, area: Rect, letters: &StyledLine) {
        let paragraph = Paragraph::new(to_line(letters, false))
            .alignment(Alignment::Center)
            .block(Block::default().borders(Borders::ALL).title("Letters"));
        f.render_widget(paragraph, area);
    }

    fn render_input(f: &mut Frame, area: Rect, input: &str) {
        let paragraph = Paragraph::new(Line::from(Span::styled(format!(" {input}_ "), INPUT_STYLE)))
            .alignment(Alignment::Center)
            .block(Block::default().borders(Borders::ALL).title("Guess word"));
        f.render_widget(paragraph, area);
    }

    fn render_message(f: &mut Frame, area: Rect, message: Option<&StyledLine>) {
        let line = message.map(|m| to_line(m, false)).unwrap_or_default();
        let paragraph = Paragraph::new(line)
            .alignment(Alignment::Center)
            .block(Block::default().borders(Borders::ALL));
        f.render_widget(paragraph, area);
    }

    fn render_help(f: &mut Frame, area: Rect, help: &str) {
        f.render_widget(
            Paragraph::new(help).style(HELP_STYLE).alignment(Alignment::Center),
            area,
        );
    }
}

impl GameInterface for TuiInterface {
    fn display_screen(&mut self, screen: &Screen) -> io::Result<()> {
        debug_log!("display_screen() - {}", screen.headline);
        self.screen = Some(screen.clone());
        self.warning = None;
        self.draw()
    }

    fn display_warning(&mut self, warning: &StyledLine) -> io::Result<()> {
        self.warning = Some(warning.clone());
        self.draw()
    }

    fn read_guess(&mut self, interrupt: &Interrupt) -> io::Result<InputEvent> {
        self.draw()?;
        loop {
            if interrupt.is_triggered() {
                return Ok(InputEvent::Interrupted);
            }
            if !event::poll(Duration::from_millis(EVENT_POLL_TIMEOUT_MS))? {
                continue;
            }
            let Event::Key(key) = event::read()? else {
                continue;
            };
            match self.input.handle_key(key) {
                KeyAction::Submit(line) => return Ok(InputEvent::Line(line)),
                KeyAction::Interrupt => {
                    info_log!("read_guess() - interrupt key pressed");
                    interrupt.trigger();
                    return Ok(InputEvent::Interrupted);
                }
                KeyAction::Edited => self.draw()?,
                KeyAction::Ignored => {}
            }
        }
    }
}

impl Drop for TuiInterface {
    fn drop(&mut self) {
        let _ = self.cleanup();
    }
}
