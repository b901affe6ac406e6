//! MP3 playback through an external command-line player
//!
//! The audio never touches disk: bytes are piped to the player's stdin.
//! Supported players, in detection order:
//! - mpg123 (install with: sudo apt install mpg123)
//! - ffplay (part of ffmpeg)
//! - mpv

use crate::{CodespeakError, Result};
use log::{debug, error, info};
use std::io::Write;
use std::process::{Command, Stdio};

/// Known players: program, arguments to read MP3 from stdin, version flag
const KNOWN_PLAYERS: &[(&str, &[&str], &str)] = &[
    ("mpg123", &["-q", "-"], "--version"),
    ("ffplay", &["-nodisp", "-autoexit", "-loglevel", "quiet", "-"], "-version"),
    ("mpv", &["--no-video", "--really-quiet", "-"], "--version"),
];

/// An external audio player
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Player {
    program: String,
    args: Vec<String>,
}

impl Player {
    /// Find the first installed player
    pub fn detect() -> Result<Self> {
        for (program, args, version_flag) in KNOWN_PLAYERS {
            if Self::is_available(program, version_flag) {
                info!("Using {} for playback", program);
                return Ok(Self {
                    program: program.to_string(),
                    args: args.iter().map(|a| a.to_string()).collect(),
                });
            }
            debug!("{} not available", program);
        }

        Err(CodespeakError::Playback(
            "No audio player found. Install mpg123, ffplay or mpv, or save the audio with --output"
                .to_string(),
        ))
    }

    /// Build a player from a configured command line, e.g. `mpg123 -q -`
    ///
    /// The command must read MP3 data from stdin.
    pub fn from_command(command: &str) -> Result<Self> {
        let mut parts = command.split_whitespace().map(str::to_string);
        let program = parts
            .next()
            .ok_or_else(|| CodespeakError::Config("Player command is empty".to_string()))?;

        Ok(Self {
            program,
            args: parts.collect(),
        })
    }

    /// Use the configured command, or detect one when it is empty
    pub fn from_config(command: &str) -> Result<Self> {
        if command.trim().is_empty() {
            Self::detect()
        } else {
            Self::from_command(command)
        }
    }

    pub fn program(&self) -> &str {
        &self.program
    }

    pub fn args(&self) -> &[String] {
        &self.args
    }

    fn is_available(program: &str, version_flag: &str) -> bool {
        Command::new(program)
            .arg(version_flag)
            .stdin(Stdio::null())
            .stdout(Stdio::null())
            .stderr(Stdio::null())
            .status()
            .map(|status| status.success())
            .unwrap_or(false)
    }

    /// Play MP3 bytes and wait for the player to finish
    pub fn play(&self, audio: &[u8]) -> Result<()> {
        debug!("Playing {} bytes with {}", audio.len(), self.program);

        let mut child = Command::new(&self.program)
            .args(&self.args)
            .stdin(Stdio::piped())
            .stdout(Stdio::null())
            .stderr(Stdio::null())
            .spawn()
            .map_err(|e| {
                error!("Failed to spawn {}: {}", self.program, e);
                CodespeakError::Playback(format!("Failed to start {}: {}", self.program, e))
            })?;

        // Dropping stdin after the write sends EOF so the player can finish
        if let Some(mut stdin) = child.stdin.take() {
            if let Err(e) = stdin.write_all(audio) {
                let _ = child.kill();
                let _ = child.wait();
                return Err(CodespeakError::Playback(format!(
                    "Failed to send audio to {}: {}",
                    self.program, e
                )));
            }
        }

        let status = child.wait()?;
        if !status.success() {
            return Err(CodespeakError::Playback(format!(
                "{} exited with {}",
                self.program, status
            )));
        }

        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_from_command() {
        let player = Player::from_command("mpv --really-quiet -").unwrap();
        assert_eq!(player.program(), "mpv");
        assert_eq!(player.args(), &["--really-quiet".to_string(), "-".to_string()]);
    }

    #[test]
    fn test_from_command_empty() {
        assert!(Player::from_command("   ").is_err());
    }

    #[test]
    fn test_missing_program_fails_to_play() {
        let player = Player::from_command("codespeak-no-such-player -").unwrap();
        let err = player.play(b"ID3").unwrap_err();
        assert!(matches!(err, CodespeakError::Playback(_)));
    }

    #[cfg(unix)]
    #[test]
    fn test_play_through_cat() {
        // `cat` reads stdin to EOF and exits 0, standing in for a real player
        let player = Player::from_command("cat").unwrap();
        assert!(player.play(b"ID3 fake mp3").is_ok());
    }

    #[test]
    fn test_detect_player() {
        match Player::detect() {
            Ok(player) => {
                assert!(KNOWN_PLAYERS.iter().any(|(program, _, _)| *program == player.program()));
                assert_eq!(player.args().last().map(String::as_str), Some("-"));
            }
            Err(e) => assert!(matches!(e, CodespeakError::Playback(_))),
        }
    }
}
