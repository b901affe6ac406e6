//! codespeak main entry point
//!
//! Two modes:
//! 1. One-shot: code comes from a file or piped stdin, is converted once,
//!    then played and/or saved
//! 2. Interactive: with a terminal on stdin, lines are collected into a
//!    snippet and `:commands` drive conversion, playback and download

use codespeak::download::{save_mp3, save_page};
use codespeak::input::{create_default_keymap, CommandHandler, HandlerAction};
use codespeak::playback::Player;
use codespeak::speech::create_synth;
use codespeak::state::config::Config;
use codespeak::state::State;
use codespeak::{CodespeakError, Result};
use log::{debug, error, info};
use std::fs;
use std::io::{self, BufRead, IsTerminal, Read, Write};
use std::path::PathBuf;
use std::process;

const USAGE: &str = "\
Usage: codespeak [OPTIONS] [FILE | -]

Reads code aloud using Google text-to-speech.
With no FILE and a terminal on stdin, starts an interactive prompt.

Options:
  -l, --lang CODE     language code (en, es, fr, de)
  -s, --slow          slow speech
  -o, --output FILE   save the audio as mp3
      --html FILE     write an html page with a download link
      --no-play       do not play the audio
      --test-voice    speak a test phrase instead of code
  -d, --debug         write debug log to codespeak.log
  -h, --help          show this help

Audio is played unless --no-play, --output or --html is given.";

/// Parsed command line
#[derive(Debug, Default)]
struct Options {
    language: Option<String>,
    slow: bool,
    output: Option<PathBuf>,
    html: Option<PathBuf>,
    no_play: bool,
    test_voice: bool,
    help: bool,
    input: Option<String>,
}

fn main() {
    // Parse command line arguments
    let args: Vec<String> = std::env::args().collect();
    let debug_mode = args.iter().any(|arg| arg == "--debug" || arg == "-d");

    // Initialize logger
    if debug_mode {
        // Debug mode: write to codespeak.log file
        use std::fs::OpenOptions;
        match OpenOptions::new()
            .create(true)
            .append(true)
            .open("codespeak.log")
        {
            Ok(log_file) => {
                env_logger::Builder::new()
                    .filter_level(log::LevelFilter::Debug)
                    .target(env_logger::Target::Pipe(Box::new(log_file)))
                    .init();
            }
            Err(e) => {
                eprintln!("Warning: Failed to open codespeak.log for debug logging: {}", e);
                eprintln!("Continuing without file logging...");
                env_logger::Builder::new()
                    .filter_level(log::LevelFilter::Warn)
                    .init();
            }
        }

        info!(
            "codespeak version {} starting (debug mode, logging to codespeak.log)",
            codespeak::VERSION
        );
    } else {
        // Normal mode: warnings and errors to stderr, RUST_LOG can raise it
        env_logger::Builder::new()
            .filter_level(log::LevelFilter::Warn)
            .parse_default_env()
            .init();
    }

    if let Err(e) = run(args.get(1..).unwrap_or(&[])) {
        error!("Fatal error: {}", e);
        eprintln!("{}", e);
        process::exit(1);
    }
}

fn run(args: &[String]) -> Result<()> {
    let options = parse_args(args)?;
    if options.help {
        println!("{}", USAGE);
        return Ok(());
    }
    debug!("Options: {:?}", options);

    let config = Config::load()?;
    info!("Configuration loaded from {:?}", config.path());

    let synth = create_synth(&config)?;
    let mut state = State::new(config, synth);

    // Command line overrides apply to this run only
    if let Some(language) = &options.language {
        state.override_language(language);
    }
    if options.slow {
        state.override_slow(true);
    }

    let interactive = options.input.is_none() && !options.test_voice && io::stdin().is_terminal();
    if interactive {
        run_interactive(&mut state)
    } else {
        run_once(&mut state, &options)
    }
}

/// Convert once, then play and/or save
fn run_once(state: &mut State, options: &Options) -> Result<()> {
    if options.test_voice {
        eprintln!("Testing voice...");
        state.test_voice()?;
    } else {
        let text = read_input(options.input.as_deref())?;
        eprintln!("Generating speech...");
        state.read_aloud(&text)?;
    }

    let audio = state
        .session
        .last_audio()
        .ok_or_else(|| CodespeakError::Other("No audio generated".to_string()))?;
    eprintln!("Audio generated successfully! ({} bytes)", audio.len());

    if let Some(path) = &options.output {
        let saved = save_mp3(audio.bytes(), path)?;
        eprintln!("Saved {}", saved.display());
    }
    if let Some(path) = &options.html {
        save_page(audio.bytes(), &state.config.file_label(), path)?;
        eprintln!("Wrote {}", path.display());
    }

    let wants_playback = !options.no_play && options.output.is_none() && options.html.is_none();
    if wants_playback {
        Player::from_config(&state.config.player())?.play(audio.bytes())?;
    }

    Ok(())
}

/// Prompt loop over stdin lines
fn run_interactive(state: &mut State) -> Result<()> {
    println!("codespeak {}: A Developer Assistant", codespeak::VERSION);
    println!("Paste your code below and have it read aloud to you!");
    println!(
        "Language: {}, speed: {}. Enter '.' to read, :help for commands.",
        state.language(),
        if state.slow() { "slow" } else { "normal" }
    );

    let mut handler = CommandHandler::new(create_default_keymap());
    let stdin = io::stdin();
    let mut stdout = io::stdout();

    for line in stdin.lock().lines() {
        let line = line?;
        let action = handler.process_line(&line, state, &mut stdout)?;
        stdout.flush()?;
        if action == HandlerAction::Quit {
            break;
        }
    }

    info!("Leaving interactive prompt");
    Ok(())
}

/// Read the snippet from a file, or stdin for `-` / no file
fn read_input(input: Option<&str>) -> Result<String> {
    match input {
        Some(path) if path != "-" => fs::read_to_string(path)
            .map_err(|e| CodespeakError::Other(format!("Failed to read {}: {}", path, e))),
        _ => {
            let mut text = String::new();
            io::stdin().read_to_string(&mut text)?;
            Ok(text)
        }
    }
}

fn parse_args(args: &[String]) -> Result<Options> {
    let mut options = Options::default();
    let mut iter = args.iter();

    while let Some(arg) = iter.next() {
        match arg.as_str() {
            "-l" | "--lang" => options.language = Some(value_for(arg, iter.next())?),
            "-s" | "--slow" => options.slow = true,
            "-o" | "--output" => options.output = Some(PathBuf::from(value_for(arg, iter.next())?)),
            "--html" => options.html = Some(PathBuf::from(value_for(arg, iter.next())?)),
            "--no-play" => options.no_play = true,
            "--test-voice" => options.test_voice = true,
            "-d" | "--debug" => {}
            "-h" | "--help" => options.help = true,
            "-" => options.input = Some(arg.clone()),
            flag if flag.starts_with('-') => {
                return Err(CodespeakError::Config(format!(
                    "Unknown option '{}'\n\n{}",
                    flag, USAGE
                )));
            }
            _ if options.input.is_some() => {
                return Err(CodespeakError::Config(format!(
                    "Only one input file may be given\n\n{}",
                    USAGE
                )));
            }
            _ => options.input = Some(arg.clone()),
        }
    }

    Ok(options)
}

fn value_for(flag: &str, value: Option<&String>) -> Result<String> {
    value
        .cloned()
        .ok_or_else(|| CodespeakError::Config(format!("Option {} needs a value", flag)))
}
