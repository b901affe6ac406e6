//! Prompt command execution

use super::keymap::HELP_TEXT;
use super::{parse_line, Command, CommandAction};
use crate::clipboard::get_from_clipboard;
use crate::download::{save_mp3, save_page};
use crate::playback::Player;
use crate::speech::SUPPORTED_LANGUAGES;
use crate::state::State;
use crate::{CodespeakError, Result};
use log::{debug, warn};
use std::collections::HashMap;
use std::io::Write;
use std::path::PathBuf;

/// What the prompt loop should do after a line
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum HandlerAction {
    /// Keep reading lines
    Continue,
    /// Leave the prompt
    Quit,
}

/// Runs prompt lines against the application state
pub struct CommandHandler {
    keymap: HashMap<&'static str, CommandAction>,

    /// Detected on first use
    player: Option<Player>,
}

impl CommandHandler {
    pub fn new(keymap: HashMap<&'static str, CommandAction>) -> Self {
        Self {
            keymap,
            player: None,
        }
    }

    /// Process one prompt line, writing user-facing messages to `out`
    ///
    /// Recoverable errors (empty snippet, provider or playback failure)
    /// are reported and the loop continues. Anything else is returned.
    pub fn process_line(
        &mut self,
        line: &str,
        state: &mut State,
        out: &mut dyn Write,
    ) -> Result<HandlerAction> {
        match parse_line(line, &self.keymap) {
            Command::Text(text) => {
                state.snippet.push_line(&text);
                Ok(HandlerAction::Continue)
            }
            Command::Unknown(word) => {
                writeln!(out, "Unknown command '{}'. Type :help for a list.", word)?;
                Ok(HandlerAction::Continue)
            }
            Command::Run { action, arg } => {
                debug!("Running {:?} (arg={:?})", action, arg);
                match self.execute(action, arg.as_deref(), state, out) {
                    Err(e) if e.is_recoverable() => {
                        report(&e, out)?;
                        Ok(HandlerAction::Continue)
                    }
                    other => other,
                }
            }
        }
    }

    fn execute(
        &mut self,
        action: CommandAction,
        arg: Option<&str>,
        state: &mut State,
        out: &mut dyn Write,
    ) -> Result<HandlerAction> {
        match action {
            CommandAction::Read => {
                writeln!(out, "Generating speech...")?;
                let len = state.read_snippet()?.len();
                writeln!(out, "Audio generated successfully! ({} bytes)", len)?;
                self.autoplay(state, out)?;
            }
            CommandAction::TestVoice => {
                writeln!(out, "Testing voice...")?;
                state.test_voice()?;
                writeln!(out, "Voice test complete!")?;
                self.autoplay(state, out)?;
            }
            CommandAction::Language => match arg {
                Some(language) => {
                    state.set_language(language);
                    if !SUPPORTED_LANGUAGES.contains(&language) {
                        writeln!(
                            out,
                            "Note: '{}' is not one of {}; the provider may reject it",
                            language,
                            SUPPORTED_LANGUAGES.join(", ")
                        )?;
                    }
                    self.persist(state, out)?;
                    writeln!(out, "Language: {}", state.language())?;
                }
                None => {
                    writeln!(
                        out,
                        "Language: {} (available: {})",
                        state.language(),
                        SUPPORTED_LANGUAGES.join(", ")
                    )?;
                }
            },
            CommandAction::Slow | CommandAction::Normal => {
                state.set_slow(action == CommandAction::Slow);
                self.persist(state, out)?;
                writeln!(out, "Speed: {}", speed_name(state.slow()))?;
            }
            CommandAction::Paste => {
                let text = get_from_clipboard()?;
                state.snippet.replace(&text);
                writeln!(
                    out,
                    "Pasted {} lines from clipboard",
                    state.snippet.line_count()
                )?;
            }
            CommandAction::Clear => {
                state.snippet.clear();
                writeln!(out, "Snippet cleared")?;
            }
            CommandAction::Play => {
                let audio = match state.session.last_audio() {
                    Some(audio) => audio.bytes().to_vec(),
                    None => {
                        writeln!(out, "No audio generated yet")?;
                        return Ok(HandlerAction::Continue);
                    }
                };
                self.player(state)?.play(&audio)?;
            }
            CommandAction::Save => {
                let path = target_path(arg, &state.config.file_label(), "mp3");
                match state.session.last_audio() {
                    Some(audio) => {
                        let saved = save_mp3(audio.bytes(), &path)?;
                        writeln!(out, "Saved {}", saved.display())?;
                    }
                    None => writeln!(out, "No audio generated yet")?,
                }
            }
            CommandAction::Html => {
                let label = state.config.file_label();
                let path = target_path(arg, &label, "html");
                match state.session.last_audio() {
                    Some(audio) => {
                        save_page(audio.bytes(), &label, &path)?;
                        writeln!(out, "Wrote {}", path.display())?;
                    }
                    None => writeln!(out, "No audio generated yet")?,
                }
            }
            CommandAction::Status => {
                writeln!(out, "Provider: {}", state.synth.name())?;
                writeln!(out, "Language: {}", state.language())?;
                writeln!(out, "Speed: {}", speed_name(state.slow()))?;
                writeln!(out, "Snippet: {} lines", state.snippet.line_count())?;
                match state.session.last_audio() {
                    Some(audio) => writeln!(out, "Last audio: {} bytes", audio.len())?,
                    None => writeln!(out, "Last audio: none")?,
                }
                writeln!(out, "Config: {}", state.config.path().display())?;
            }
            CommandAction::Help => {
                writeln!(out, "{}", HELP_TEXT)?;
            }
            CommandAction::Quit => return Ok(HandlerAction::Quit),
        }

        Ok(HandlerAction::Continue)
    }

    fn player(&mut self, state: &State) -> Result<&Player> {
        if self.player.is_none() {
            self.player = Some(Player::from_config(&state.config.player())?);
        }
        self.player
            .as_ref()
            .ok_or_else(|| CodespeakError::Playback("No audio player available".to_string()))
    }

    /// Play the freshly generated audio if the user wants that
    fn autoplay(&mut self, state: &State, out: &mut dyn Write) -> Result<()> {
        if !state.config.autoplay() {
            return Ok(());
        }
        let Some(audio) = state.session.last_audio() else {
            return Ok(());
        };

        // Playback problems should not hide the fact that audio exists
        if let Err(e) = self.player(state).and_then(|player| player.play(audio.bytes())) {
            warn!("Autoplay failed: {}", e);
            report(&e, out)?;
        }
        Ok(())
    }

    fn persist(&self, state: &State, out: &mut dyn Write) -> Result<()> {
        if let Err(e) = state.save_config() {
            warn!("Could not save settings: {}", e);
            writeln!(out, "Warning: settings not saved: {}", e)?;
        }
        Ok(())
    }
}

fn report(error: &CodespeakError, out: &mut dyn Write) -> Result<()> {
    match error {
        CodespeakError::Validation(msg) => writeln!(out, "Warning: {}", msg)?,
        other => writeln!(out, "{}", other)?,
    }
    Ok(())
}

fn speed_name(slow: bool) -> &'static str {
    if slow {
        "slow"
    } else {
        "normal"
    }
}

fn target_path(arg: Option<&str>, label: &str, extension: &str) -> PathBuf {
    match arg {
        Some(path) => PathBuf::from(path),
        None => PathBuf::from(format!("{}.{}", label, extension)),
    }
}
