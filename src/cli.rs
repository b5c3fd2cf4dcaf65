use crate::debug_log;
use crate::game_state::{GameInterface, InputEvent};
use crate::interrupt::Interrupt;
use crate::render::{Screen, StyleTag, StyledLine};
use clap::{ArgAction, Parser};
use crossterm::{
    cursor::MoveTo,
    queue,
    style::{Attribute, Color, ContentStyle, Print, PrintStyledContent},
    terminal::{Clear, ClearType},
};
use std::io::{self, BufRead, Write};
use std::path::PathBuf;
use std::sync::mpsc::{self, Receiver, RecvTimeoutError};
use std::thread;
use std::time::Duration;

const CONSOLE_WIDTH: usize = 40;
const PROMPT: &str = "\nGuess word: ";
const INPUT_POLL_TIMEOUT_MS: u64 = 100;
const ABSENT_GRAY: Color = Color::Rgb {
    r: 0x66,
    g: 0x66,
    b: 0x66,
};

/// Guess a five-letter word in six tries
#[derive(Parser, Debug)]
#[command(author, version, about, long_about = None)]
pub struct Cli {
    /// Path to a newline-delimited word list
    #[arg(short = 'w', long = "words")]
    pub words_path: Option<PathBuf>,

    /// Seed for choosing the secret word
    #[arg(long)]
    pub seed: Option<u64>,

    /// Line-based interface instead of the full-screen one
    #[arg(long)]
    pub plain: bool,

    /// Do not clear the screen between guesses (plain interface)
    #[arg(long)]
    pub no_clear: bool,

    /// Print without colors (plain interface)
    #[arg(long)]
    pub no_color: bool,

    /// More log output; repeat for more detail
    #[arg(short, long, action = ArgAction::Count)]
    pub verbose: u8,
}

#[must_use]
pub fn parse_cli() -> Cli {
    Cli::parse()
}

fn style(fg: Option<Color>, bg: Option<Color>, attributes: &[Attribute]) -> ContentStyle {
    let mut style = ContentStyle::new();
    style.foreground_color = fg;
    style.background_color = bg;
    for attribute in attributes {
        style.attributes.set(*attribute);
    }
    style
}

/// Terminal look of each style tag.
pub fn content_style(tag: StyleTag) -> ContentStyle {
    let white = Some(Color::White);
    let bold = [Attribute::Bold];
    match tag {
        StyleTag::Correct | StyleTag::SuccessBanner => style(white, Some(Color::Green), &bold),
        StyleTag::Misplaced => style(white, Some(Color::Yellow), &bold),
        StyleTag::Absent => style(white, Some(ABSENT_GRAY), &[]),
        StyleTag::Plain => ContentStyle::new(),
        StyleTag::Dim => style(None, None, &[Attribute::Dim]),
        StyleTag::WarningText => style(Some(Color::Red), Some(Color::Yellow), &[]),
        StyleTag::FailureBanner => style(white, Some(Color::Red), &bold),
        StyleTag::Headline => style(Some(Color::Blue), None, &bold),
    }
}

fn rule(headline: &str) -> String {
    let title = format!(" {headline} ");
    let fill = CONSOLE_WIDTH.saturating_sub(title.chars().count());
    let left = fill / 2;
    format!("{}{}{}", "─".repeat(left), title, "─".repeat(fill - left))
}

fn centered_padding(line: &StyledLine) -> String {
    let width = line.to_string().chars().count();
    " ".repeat(CONSOLE_WIDTH.saturating_sub(width) / 2)
}

/// Read lines from `reader` on a helper thread.
///
/// The channel closes at end of input. A blocking read cannot be cancelled, so the
/// game waits on the channel instead and stays responsive to interrupts.
pub fn spawn_line_reader<R>(mut reader: R) -> Receiver<io::Result<String>>
where
    R: BufRead + Send + 'static,
{
    let (tx, rx) = mpsc::channel();
    thread::spawn(move || {
        loop {
            let mut line = String::new();
            let result = match reader.read_line(&mut line) {
                Ok(0) => break,
                Ok(_) => Ok(line),
                Err(e) => Err(e),
            };
            let failed = result.is_err();
            if tx.send(result).is_err() || failed {
                break;
            }
        }
    });
    rx
}

/// Line-based frontend. Reads guesses from any `BufRead` and writes ANSI-styled
/// output to any `Write`, so whole rounds can be driven from tests.
pub struct ConsoleInterface<W: Write> {
    lines: Receiver<io::Result<String>>,
    writer: W,
    clear_screen: bool,
    color: bool,
}

impl<W: Write> ConsoleInterface<W> {
    pub fn new<R: BufRead + Send + 'static>(reader: R, writer: W) -> Self {
        Self::from_lines(spawn_line_reader(reader), writer)
    }

    /// Use an existing line channel, e.g. one fed by another input source.
    pub fn from_lines(lines: Receiver<io::Result<String>>, writer: W) -> Self {
        Self {
            lines,
            writer,
            clear_screen: true,
            color: true,
        }
    }

    pub fn clear_screen(mut self, enabled: bool) -> Self {
        self.clear_screen = enabled;
        self
    }

    pub fn color(mut self, enabled: bool) -> Self {
        self.color = enabled;
        self
    }

    pub fn writer(&self) -> &W {
        &self.writer
    }

    pub fn into_writer(self) -> W {
        self.writer
    }

    fn print_span(&mut self, text: &str, tag: StyleTag) -> io::Result<()> {
        if self.color {
            queue!(
                self.writer,
                PrintStyledContent(content_style(tag).apply(text))
            )
        } else {
            queue!(self.writer, Print(text))
        }
    }

    fn print_line(&mut self, line: &StyledLine, centered: bool) -> io::Result<()> {
        if centered {
            queue!(self.writer, Print(centered_padding(line)))?;
        }
        for span in &line.spans {
            self.print_span(&span.text, span.tag)?;
        }
        queue!(self.writer, Print("\n"))
    }
}

impl<W: Write> GameInterface for ConsoleInterface<W> {
    fn display_screen(&mut self, screen: &Screen) -> io::Result<()> {
        if self.clear_screen {
            queue!(self.writer, Clear(ClearType::All), MoveTo(0, 0))?;
        }
        self.print_span(&rule(&screen.headline), StyleTag::Headline)?;
        queue!(self.writer, Print("\n\n"))?;

        for row in &screen.rows {
            self.print_line(row, true)?;
        }
        queue!(self.writer, Print("\n"))?;
        self.print_line(&screen.letters, true)?;

        if let Some(banner) = &screen.banner {
            queue!(self.writer, Print("\n"))?;
            self.print_line(banner, false)?;
        }
        self.writer.flush()
    }

    fn display_warning(&mut self, warning: &StyledLine) -> io::Result<()> {
        self.print_line(warning, false)?;
        self.writer.flush()
    }

    fn read_guess(&mut self, interrupt: &Interrupt) -> io::Result<InputEvent> {
        queue!(self.writer, Print(PROMPT))?;
        self.writer.flush()?;

        loop {
            if interrupt.is_triggered() {
                // Keep the game-over screen off the prompt line
                queue!(self.writer, Print("\n"))?;
                return Ok(InputEvent::Interrupted);
            }
            match self
                .lines
                .recv_timeout(Duration::from_millis(INPUT_POLL_TIMEOUT_MS))
            {
                Ok(Ok(line)) => return Ok(InputEvent::Line(line)),
                Ok(Err(e)) => return Err(e),
                Err(RecvTimeoutError::Timeout) => {}
                Err(RecvTimeoutError::Disconnected) => {
                    debug_log!("read_guess() - end of input");
                    return Ok(InputEvent::Interrupted);
                }
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::feedback::evaluate;
    use crate::render::{guess_line, warning_line};
    use std::io::Cursor;
    use std::time::Instant;

    fn console(input: &str) -> ConsoleInterface<Vec<u8>> {
        ConsoleInterface::new(Cursor::new(input.as_bytes().to_vec()), Vec::new())
            .clear_screen(false)
            .color(false)
    }

    fn output(ui: &ConsoleInterface<Vec<u8>>) -> String {
        String::from_utf8_lossy(ui.writer()).into_owned()
    }

    #[test]
    fn test_parse_cli_no_args() {
        let cli = Cli::try_parse_from(["wordle-game"]).unwrap();
        assert_eq!(cli.words_path, None);
        assert_eq!(cli.seed, None);
        assert!(!cli.plain);
        assert_eq!(cli.verbose, 0);
    }

    #[test]
    fn test_parse_cli_all_flags() {
        let cli = Cli::try_parse_from([
            "wordle-game",
            "--words",
            "/path/to/words.txt",
            "--seed",
            "42",
            "--plain",
            "--no-clear",
            "--no-color",
            "-vv",
        ])
        .unwrap();
        assert_eq!(cli.words_path, Some(PathBuf::from("/path/to/words.txt")));
        assert_eq!(cli.seed, Some(42));
        assert!(cli.plain && cli.no_clear && cli.no_color);
        assert_eq!(cli.verbose, 2);
    }

    #[test]
    fn test_parse_cli_short_words_flag() {
        let cli = Cli::try_parse_from(["wordle-game", "-w", "custom.txt"]).unwrap();
        assert_eq!(cli.words_path, Some(PathBuf::from("custom.txt")));
    }

    #[test]
    fn test_parse_cli_rejects_bad_seed() {
        assert!(Cli::try_parse_from(["wordle-game", "--seed", "abc"]).is_err());
    }

    #[test]
    fn test_rule_width() {
        let line = rule("Guess 1");
        assert_eq!(line.chars().count(), CONSOLE_WIDTH);
        assert!(line.contains(" Guess 1 "));
    }

    #[test]
    fn test_read_guess_line() {
        let mut ui = console("crane\n");
        let event = ui.read_guess(&Interrupt::new()).unwrap();
        assert_eq!(event, InputEvent::Line("crane\n".to_string()));
        assert!(output(&ui).contains("Guess word: "));
    }

    #[test]
    fn test_read_guess_end_of_input() {
        let mut ui = console("");
        let event = ui.read_guess(&Interrupt::new()).unwrap();
        assert_eq!(event, InputEvent::Interrupted);
    }

    #[test]
    fn test_read_guess_after_ctrl_c() {
        let mut ui = console("crane\n");
        let interrupt = Interrupt::new();
        let _scope = interrupt.scope();
        interrupt.trigger();
        let event = ui.read_guess(&interrupt).unwrap();
        assert_eq!(event, InputEvent::Interrupted);
    }

    #[test]
    fn test_read_guess_ctrl_c_while_waiting_for_input() {
        // Sender stays alive and never sends, like a terminal nobody is typing into
        let (_tx, rx) = mpsc::channel();
        let mut ui = ConsoleInterface::from_lines(rx, Vec::new()).color(false);
        let interrupt = Interrupt::new();
        let _scope = interrupt.scope();

        let handle = interrupt.clone();
        let trigger = thread::spawn(move || {
            thread::sleep(Duration::from_millis(150));
            handle.trigger();
        });

        let started = Instant::now();
        let event = ui.read_guess(&interrupt).unwrap();
        trigger.join().unwrap();

        assert_eq!(event, InputEvent::Interrupted);
        assert!(started.elapsed() < Duration::from_secs(5));
    }

    #[test]
    fn test_read_guess_reports_read_errors() {
        let (tx, rx) = mpsc::channel();
        tx.send(Err(io::Error::other("broken pipe"))).unwrap();
        let mut ui = ConsoleInterface::from_lines(rx, Vec::new());
        assert!(ui.read_guess(&Interrupt::new()).is_err());
    }

    #[test]
    fn test_read_guess_lines_in_order() {
        let mut ui = console("crane\nslate\n");
        let interrupt = Interrupt::new();
        assert_eq!(
            ui.read_guess(&interrupt).unwrap(),
            InputEvent::Line("crane\n".to_string())
        );
        assert_eq!(
            ui.read_guess(&interrupt).unwrap(),
            InputEvent::Line("slate\n".to_string())
        );
        assert_eq!(ui.read_guess(&interrupt).unwrap(), InputEvent::Interrupted);
    }

    #[test]
    fn test_display_screen_plain_text() {
        let mut ui = console("");
        let screen = Screen {
            headline: "Guess 2".to_string(),
            rows: vec![guess_line(&evaluate("CRANE", "SNAKE"))],
            letters: StyledLine::single("ABC", StyleTag::Plain),
            banner: None,
        };
        ui.display_screen(&screen).unwrap();
        let out = output(&ui);
        assert!(out.contains(" Guess 2 "));
        assert!(out.contains("CRANE"));
        assert!(out.contains("ABC"));
        assert!(!out.contains('\u{1b}'));
    }

    #[test]
    fn test_display_screen_with_color_emits_ansi() {
        let mut ui =
            ConsoleInterface::new(Cursor::new(Vec::new()), Vec::new()).clear_screen(false);
        let screen = Screen {
            headline: "Game Over".to_string(),
            rows: vec![guess_line(&evaluate("SNAKE", "SNAKE"))],
            letters: StyledLine::default(),
            banner: Some(StyledLine::single(
                "Correct, the word is SNAKE",
                StyleTag::SuccessBanner,
            )),
        };
        ui.display_screen(&screen).unwrap();
        let out = String::from_utf8_lossy(ui.writer()).into_owned();
        assert!(out.contains('\u{1b}'));
        assert!(out.contains("Correct, the word is SNAKE"));
    }

    #[test]
    fn test_display_warning() {
        let mut ui = console("");
        ui.display_warning(&warning_line("Your guess must be 5 letters."))
            .unwrap();
        assert_eq!(output(&ui), "Your guess must be 5 letters.\n");
    }

    #[test]
    fn test_content_styles_differ_per_outcome() {
        assert_ne!(
            content_style(StyleTag::Correct),
            content_style(StyleTag::Misplaced)
        );
        assert_ne!(
            content_style(StyleTag::Misplaced),
            content_style(StyleTag::Absent)
        );
        assert_eq!(content_style(StyleTag::Plain), ContentStyle::new());
    }
}
