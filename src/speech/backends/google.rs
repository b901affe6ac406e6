//! Google Translate text-to-speech backend
//!
//! Speaks to the same `batchexecute` endpoint the Translate web page uses.
//! Text is sent in chunks of at most 100 characters; each response carries
//! a base64 MP3 fragment and the fragments are concatenated in order.
//!
//! The service has no documented contract. Status codes are mapped to the
//! most likely cause so the user gets something actionable.

use crate::speech::Synth;
use crate::{CodespeakError, Result};
use base64::Engine;
use log::{debug, error, warn};
use once_cell::sync::Lazy;
use regex::Regex;
use reqwest::blocking::Client;
use reqwest::header::{HeaderMap, HeaderValue, CONTENT_TYPE, REFERER, USER_AGENT};
use serde_json::{json, Value};
use std::time::Duration;

/// RPC identifier of the TTS call inside `batchexecute`
const RPC_ID: &str = "jQ1olc";

/// Path of the RPC endpoint, relative to the Translate host
const ENDPOINT_PATH: &str = "/_/TranslateWebserverUi/data/batchexecute";

/// Longest chunk the endpoint accepts
pub const MAX_CHUNK_CHARS: usize = 100;

const BROWSER_USER_AGENT: &str = "Mozilla/5.0 (Windows NT 10.0; WOW64) \
     AppleWebKit/537.36 (KHTML, like Gecko) Chrome/47.0.2526.106 Safari/537.36";

const FORM_CONTENT_TYPE: &str = "application/x-www-form-urlencoded;charset=utf-8";

/// Characters that always end a chunk
const SPLIT_PUNCTUATION: &str = "?!？！¡¿…‥،;—。，、：()[]\n";

/// Audio payload inside a response line
static AUDIO_PATTERN: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r#"jQ1olc","\[\\"(.*)\\"]"#).expect("audio pattern is a valid regex")
});

/// Google Translate TTS provider
pub struct GoogleSynth {
    client: Client,

    /// Scheme and host, e.g. `https://translate.google.com`
    base_url: String,

    /// Top-level domain, kept for error messages
    tld: String,
}

impl GoogleSynth {
    /// Create a provider for `translate.google.{tld}`
    pub fn new(tld: &str, timeout: Option<Duration>) -> Result<Self> {
        let base_url = format!("https://translate.google.{}", tld);
        let mut synth = Self::with_base_url(&base_url, timeout)?;
        synth.tld = tld.to_string();
        Ok(synth)
    }

    /// Create a provider against an explicit host (used for testing)
    pub fn with_base_url(base_url: &str, timeout: Option<Duration>) -> Result<Self> {
        debug!("Creating Google TTS backend for {}", base_url);

        let client = Client::builder()
            .timeout(timeout)
            .build()
            .map_err(|e| CodespeakError::Synthesis(format!("Failed to create HTTP client: {}", e)))?;

        Ok(Self {
            client,
            base_url: base_url.trim_end_matches('/').to_string(),
            tld: "com".to_string(),
        })
    }

    fn endpoint(&self) -> String {
        format!("{}{}", self.base_url, ENDPOINT_PATH)
    }

    /// Request one chunk and return its decoded audio
    fn fetch_chunk(&self, index: usize, chunk: &str, language: &str, slow: bool) -> Result<Vec<u8>> {
        debug!("Requesting chunk {} ({} chars)", index, chunk.chars().count());

        let rpc = package_rpc(chunk, language, slow);
        let response = self
            .client
            .post(self.endpoint())
            .header(REFERER, "http://translate.google.com/")
            .header(USER_AGENT, BROWSER_USER_AGENT)
            .form(&[("f.req", rpc)])
            // `headers` replaces, so this supersedes the bare type set by `form`
            .headers(form_headers())
            .send()
            .map_err(|e| {
                error!("TTS request failed: {}", e);
                CodespeakError::Synthesis(format!(
                    "Failed to connect to {}: {}",
                    self.base_url, e
                ))
            })?;

        let status = response.status();
        if !status.is_success() {
            warn!("TTS API returned {}", status);
            return Err(CodespeakError::Synthesis(self.describe_status(
                status.as_u16(),
                status.canonical_reason().unwrap_or("Unknown"),
                language,
            )));
        }

        let body = response
            .text()
            .map_err(|e| CodespeakError::Synthesis(format!("Failed to read response: {}", e)))?;

        let audio = extract_audio(&body)?;
        if audio.is_empty() {
            let mut msg = "No audio stream in response".to_string();
            if language != "en" {
                msg.push_str(&format!(". Unsupported language '{}'", language));
            }
            return Err(CodespeakError::Synthesis(msg));
        }

        Ok(audio)
    }

    fn describe_status(&self, code: u16, reason: &str, language: &str) -> String {
        let cause = match code {
            403 => "Bad token or upstream API changes".to_string(),
            404 if self.tld != "com" => format!("Unsupported tld '{}'", self.tld),
            404 => format!("Unsupported language '{}' or upstream API changes", language),
            500..=599 => "Upstream API error. Try again later".to_string(),
            _ => "Unexpected response from TTS API".to_string(),
        };
        format!("{} ({}) from TTS API. Probable cause: {}", code, reason, cause)
    }
}

impl Synth for GoogleSynth {
    fn name(&self) -> &str {
        "google"
    }

    fn synthesize(&mut self, text: &str, language: &str, slow: bool) -> Result<Vec<u8>> {
        let chunks = tokenize(text);
        if chunks.is_empty() {
            return Err(CodespeakError::Synthesis(
                "No text to send to TTS API".to_string(),
            ));
        }
        debug!("Text split into {} chunks", chunks.len());

        let mut audio = Vec::new();
        for (index, chunk) in chunks.iter().enumerate() {
            let part = self.fetch_chunk(index, chunk, language, slow)?;
            audio.extend_from_slice(&part);
        }

        Ok(audio)
    }
}

fn form_headers() -> HeaderMap {
    let mut headers = HeaderMap::new();
    headers.insert(CONTENT_TYPE, HeaderValue::from_static(FORM_CONTENT_TYPE));
    headers
}

/// Build the `f.req` value for one chunk
///
/// The inner parameter list is itself serialized to a JSON string and
/// embedded in the outer envelope. Slow speech is `true`, normal is `null`.
pub fn package_rpc(text: &str, language: &str, slow: bool) -> String {
    let speed = if slow { Value::Bool(true) } else { Value::Null };
    let parameter = json!([text, language, speed, "null"]).to_string();
    json!([[[RPC_ID, parameter, Value::Null, "generic"]]]).to_string()
}

/// Collect and decode every audio fragment in a `batchexecute` response
pub fn extract_audio(body: &str) -> Result<Vec<u8>> {
    let mut audio = Vec::new();

    for line in body.lines().filter(|line| line.contains(RPC_ID)) {
        if let Some(captures) = AUDIO_PATTERN.captures(line) {
            let encoded = &captures[1];
            let decoded = base64::engine::general_purpose::STANDARD.decode(encoded)?;
            audio.extend_from_slice(&decoded);
        }
    }

    Ok(audio)
}

/// Split text into chunks the endpoint accepts
///
/// Breaks on sentence punctuation first. Chunks that are still too long
/// are cut at the last space that fits, or hard at the limit when there is
/// none. Chunks made only of punctuation and whitespace are dropped.
pub fn tokenize(text: &str) -> Vec<String> {
    split_on_punctuation(text)
        .into_iter()
        .map(|token| token.trim().to_string())
        .filter(|token| !is_punctuation(token))
        .flat_map(|token| minimize(&token, MAX_CHUNK_CHARS))
        .collect()
}

fn split_on_punctuation(text: &str) -> Vec<String> {
    let mut tokens = Vec::new();
    let mut current = String::new();
    let mut chars = text.chars().peekable();

    while let Some(ch) = chars.next() {
        // '.', ',' and ':' only split when followed by whitespace, so
        // `obj.method` and `3.14` stay together
        let boundary = SPLIT_PUNCTUATION.contains(ch)
            || (matches!(ch, '.' | ',' | ':')
                && chars.peek().map_or(true, |next| next.is_whitespace()));

        if boundary {
            if !current.is_empty() {
                tokens.push(std::mem::take(&mut current));
            }
        } else {
            current.push(ch);
        }
    }

    if !current.is_empty() {
        tokens.push(current);
    }

    tokens
}

fn is_punctuation(token: &str) -> bool {
    token
        .chars()
        .all(|ch| ch.is_whitespace() || ch.is_ascii_punctuation() || SPLIT_PUNCTUATION.contains(ch))
}

fn minimize(token: &str, max_chars: usize) -> Vec<String> {
    let mut chunks = Vec::new();
    let mut rest = token.trim_start();

    while rest.chars().count() > max_chars {
        // Byte offset just past the `max_chars`-th character
        let limit = rest
            .char_indices()
            .nth(max_chars)
            .map(|(idx, _)| idx)
            .unwrap_or(rest.len());

        let cut = match rest[..limit].rfind(' ') {
            Some(idx) if idx > 0 => idx,
            _ => limit,
        };

        chunks.push(rest[..cut].trim_end().to_string());
        rest = rest[cut..].trim_start();
    }

    if !rest.is_empty() {
        chunks.push(rest.to_string());
    }

    chunks
}
