use anyhow::{Context, Result};
use rand::SeedableRng;
use rand::rngs::StdRng;
use std::io::{self, BufReader, Write};
use std::process::ExitCode;
use wordle_game::cli::{Cli, ConsoleInterface, content_style, parse_cli};
use wordle_game::game_state::{Round, RoundOutcome};
use wordle_game::interrupt::Interrupt;
use wordle_game::logging::{self, LogTarget};
use wordle_game::render::{StyleTag, banner_line};
use wordle_game::tui::TuiInterface;
use wordle_game::wordbank::WordListSource;

fn main() -> ExitCode {
    let cli = parse_cli();
    let target = if cli.plain {
        LogTarget::Stderr
    } else {
        LogTarget::File
    };
    if let Some(path) = logging::init(cli.verbose, target) {
        log::debug!("Logging to {}", path.display());
    }

    match run(&cli) {
        Ok(outcome) => {
            log::info!(
                "Round finished: {:?} after {} guesses{}",
                outcome.result,
                outcome.attempts,
                if outcome.interrupted { " (interrupted)" } else { "" }
            );
            ExitCode::SUCCESS
        }
        Err(e) => {
            log::error!("{e:#}");
            print_warning(&format!("{e:#}"), !cli.no_color);
            ExitCode::FAILURE
        }
    }
}

fn run(cli: &Cli) -> Result<RoundOutcome> {
    let source = WordListSource::resolve(cli.words_path.as_deref());
    log::info!("Using word list {source:?}");
    let words = source.read()?;

    let mut rng = match cli.seed {
        Some(seed) => StdRng::seed_from_u64(seed),
        None => StdRng::from_os_rng(),
    };
    let round = Round::select(&words, &mut rng)?;

    let interrupt = Interrupt::new();
    interrupt
        .install_ctrlc_handler()
        .context("failed to install Ctrl-C handler")?;

    if cli.plain {
        let mut ui = ConsoleInterface::new(BufReader::new(io::stdin()), io::stdout())
            .clear_screen(!cli.no_clear)
            .color(!cli.no_color);
        Ok(round.play(&mut ui, &interrupt)?)
    } else {
        let outcome = {
            let mut ui = TuiInterface::new().context("failed to set up the terminal")?;
            let outcome = round.play(&mut ui, &interrupt)?;
            ui.wait_for_dismiss()?;
            outcome
        };
        // The alternate screen is gone; leave the verdict in the normal scrollback
        println!("{}", banner_line(&outcome));
        Ok(outcome)
    }
}

fn print_warning(message: &str, color: bool) {
    let mut stderr = io::stderr();
    let _ = if color {
        writeln!(stderr, "{}", content_style(StyleTag::WarningText).apply(message))
    } else {
        writeln!(stderr, "{message}")
    };
}
