//! Google Translate backend tests against a local mock server

use base64::Engine;
use codespeak::speech::backends::google::GoogleSynth;
use codespeak::speech::{convert, Synth};
use codespeak::CodespeakError;
use mockito::{Matcher, Server};

const PATH: &str = "/_/TranslateWebserverUi/data/batchexecute";

fn audio_response(audio: &[u8]) -> String {
    let payload = base64::engine::general_purpose::STANDARD.encode(audio);
    format!(
        ")]}}'\n\n104\n[[\"wrb.fr\",\"jQ1olc\",\"[\\\"{}\\\"]\",null,null,null,\"generic\"]]\n",
        payload
    )
}

#[test]
fn test_synthesize_decodes_audio() {
    let mut server = Server::new();
    let mock = server
        .mock("POST", PATH)
        .match_header("content-type", "application/x-www-form-urlencoded;charset=utf-8")
        .match_body(Matcher::Regex("jQ1olc".to_string()))
        .with_status(200)
        .with_body(audio_response(b"ID3fakeaudio"))
        .expect(1)
        .create();

    let mut synth = GoogleSynth::with_base_url(&server.url(), None).unwrap();
    let audio = synth.synthesize("print hello", "en", false).unwrap();

    assert_eq!(audio, b"ID3fakeaudio");
    mock.assert();
}

#[test]
fn test_chunks_are_concatenated() {
    let mut server = Server::new();
    let mock = server
        .mock("POST", PATH)
        .with_status(200)
        .with_body(audio_response(b"AB"))
        .expect(2)
        .create();

    let mut synth = GoogleSynth::with_base_url(&server.url(), None).unwrap();
    let audio = synth.synthesize("first part; second part", "en", false).unwrap();

    assert_eq!(audio, b"ABAB");
    mock.assert();
}

#[test]
fn test_server_error_is_synthesis_error() {
    let mut server = Server::new();
    let _mock = server.mock("POST", PATH).with_status(500).create();

    let mut synth = GoogleSynth::with_base_url(&server.url(), None).unwrap();
    let err = convert(&mut synth, "x = 1", "en", false).unwrap_err();

    assert!(matches!(err, CodespeakError::Synthesis(_)));
    assert!(err.to_string().contains("500"));
}

#[test]
fn test_missing_audio_names_language() {
    let mut server = Server::new();
    let _mock = server
        .mock("POST", PATH)
        .with_status(200)
        .with_body(")]}'\n\n20\n[[\"wrb.fr\",\"jQ1olc\",null]]\n")
        .create();

    let mut synth = GoogleSynth::with_base_url(&server.url(), None).unwrap();
    let err = synth.synthesize("bonjour", "xx", false).unwrap_err();

    assert!(err.to_string().contains("No audio stream in response"));
    assert!(err.to_string().contains("'xx'"));
}

#[test]
fn test_punctuation_only_text_makes_no_request() {
    let mut server = Server::new();
    let mock = server.mock("POST", PATH).expect(0).create();

    let mut synth = GoogleSynth::with_base_url(&server.url(), None).unwrap();
    let err = synth.synthesize("();", "en", false).unwrap_err();

    assert!(err.to_string().contains("No text to send"));
    mock.assert();
}

#[test]
fn test_unreachable_host() {
    // Port 9 (discard) is almost never listening locally
    let mut synth = GoogleSynth::with_base_url("http://127.0.0.1:9", None).unwrap();
    let err = synth.synthesize("hello", "en", false).unwrap_err();
    assert!(matches!(err, CodespeakError::Synthesis(_)));
}
