//! Conversion and session tests
//!
//! Exercise `convert` and the session against stub providers so no
//! network is needed

use codespeak::speech::{convert, Synth};
use codespeak::state::config::Config;
use codespeak::state::session::SessionState;
use codespeak::state::State;
use codespeak::{CodespeakError, Result};
use std::sync::{Arc, Mutex};

const MARKER: &[u8; 10] = b"\xff\xfbMARKER!!";

/// Calls seen by a stub: (text, language, slow)
type CallLog = Arc<Mutex<Vec<(String, String, bool)>>>;

struct StubSynth {
    reply: std::result::Result<Vec<u8>, String>,
    calls: CallLog,
}

impl StubSynth {
    fn ok(bytes: &[u8]) -> (Self, CallLog) {
        let calls = CallLog::default();
        (
            Self {
                reply: Ok(bytes.to_vec()),
                calls: calls.clone(),
            },
            calls,
        )
    }

    fn failing(message: &str) -> (Self, CallLog) {
        let calls = CallLog::default();
        (
            Self {
                reply: Err(message.to_string()),
                calls: calls.clone(),
            },
            calls,
        )
    }
}

impl Synth for StubSynth {
    fn name(&self) -> &str {
        "stub"
    }

    fn synthesize(&mut self, text: &str, language: &str, slow: bool) -> Result<Vec<u8>> {
        self.calls
            .lock()
            .unwrap()
            .push((text.to_string(), language.to_string(), slow));
        match &self.reply {
            Ok(bytes) => Ok(bytes.clone()),
            Err(msg) => Err(CodespeakError::Synthesis(msg.clone())),
        }
    }
}

#[test]
fn test_convert_returns_provider_bytes() {
    let (mut synth, calls) = StubSynth::ok(MARKER);

    let audio = convert(&mut synth, "print('hi')", "en", false).unwrap();

    assert_eq!(audio.bytes(), MARKER);
    assert_eq!(
        calls.lock().unwrap().as_slice(),
        &[("print('hi')".to_string(), "en".to_string(), false)]
    );
}

#[test]
fn test_empty_text_never_reaches_provider() {
    for text in ["", "   ", "\n\t  \n"] {
        let (mut synth, calls) = StubSynth::ok(MARKER);
        for language in ["en", "es", "fr", "de"] {
            for slow in [false, true] {
                let err = convert(&mut synth, text, language, slow).unwrap_err();
                match err {
                    CodespeakError::Validation(msg) => {
                        assert_eq!(msg, "text to convert cannot be empty")
                    }
                    other => panic!("expected validation error, got {:?}", other),
                }
            }
        }
        assert!(calls.lock().unwrap().is_empty());
    }
}

#[test]
fn test_unsupported_language_passes_through() {
    let (mut synth, calls) = StubSynth::ok(MARKER);
    convert(&mut synth, "hola", "pt-br", true).unwrap();
    assert_eq!(calls.lock().unwrap()[0].1, "pt-br");
    assert!(calls.lock().unwrap()[0].2);
}

#[test]
fn test_provider_failure_is_synthesis_error() {
    let (mut synth, calls) = StubSynth::failing("connection reset by peer");

    let err = convert(&mut synth, "x = 1", "en", false).unwrap_err();

    assert!(matches!(err, CodespeakError::Synthesis(_)));
    assert!(err.to_string().contains("connection reset by peer"));
    // Single attempt, no retry
    assert_eq!(calls.lock().unwrap().len(), 1);
}

#[test]
fn test_non_empty_text_never_yields_empty_audio() {
    let (mut synth, _calls) = StubSynth::ok(b"");
    let err = convert(&mut synth, "fn main() {}", "en", false).unwrap_err();
    assert!(matches!(err, CodespeakError::Synthesis(_)));
}

#[test]
fn test_session_last_write_wins() {
    let mut session = SessionState::new();

    for reply in [&b"first"[..], &b"second"[..], &b"third"[..]] {
        let (mut synth, _calls) = StubSynth::ok(reply);
        let audio = convert(&mut synth, "code", "en", false).unwrap();
        session.record(audio);
    }

    assert!(session.is_generated());
    assert_eq!(session.last_audio().unwrap().bytes(), b"third");
}

fn state_with(synth: StubSynth) -> (tempfile::TempDir, State) {
    let dir = tempfile::tempdir().unwrap();
    let config = Config::load_from(dir.path().join("codespeak.cfg")).unwrap();
    (dir, State::new(config, Box::new(synth)))
}

#[test]
fn test_failure_leaves_session_unchanged() {
    let (synth, _calls) = StubSynth::ok(MARKER);
    let (_dir, mut state) = state_with(synth);
    state.read_aloud("print('hi')").unwrap();

    state.synth = Box::new(StubSynth::failing("HTTP 503").0);
    let err = state.read_aloud("print('bye')").unwrap_err();

    assert!(err.to_string().contains("HTTP 503"));
    assert!(state.session.is_generated());
    assert_eq!(state.session.last_audio().unwrap().bytes(), MARKER);
}

#[test]
fn test_state_uses_configured_speech_settings() {
    let (synth, calls) = StubSynth::ok(MARKER);
    let (_dir, mut state) = state_with(synth);
    state.set_language("fr");
    state.set_slow(true);

    state.test_voice().unwrap();

    let calls = calls.lock().unwrap();
    assert_eq!(calls[0].0, codespeak::state::TEST_PHRASE);
    assert_eq!(calls[0].1, "fr");
    assert!(calls[0].2);
}
