//! Downloadable audio artifacts
//!
//! Audio is offered either as a plain `.mp3` file or as an HTML page
//! carrying the bytes in a base64 data link.

use crate::{CodespeakError, Result};
use base64::engine::general_purpose::STANDARD;
use base64::Engine;
use log::info;
use std::fs;
use std::path::{Path, PathBuf};

/// Default label for saved audio (`code_audio.mp3`)
pub const DEFAULT_FILE_LABEL: &str = "code_audio";

/// Encode bytes as standard padded base64
pub fn encode_base64(bytes: &[u8]) -> String {
    STANDARD.encode(bytes)
}

/// Decode standard padded base64
pub fn decode_base64(encoded: &str) -> Result<Vec<u8>> {
    STANDARD
        .decode(encoded.trim())
        .map_err(|e| CodespeakError::Other(format!("Invalid base64: {}", e)))
}

/// HTML anchor that downloads the audio as `{label}.mp3`
pub fn download_link(bytes: &[u8], label: &str) -> String {
    format!(
        "<a href=\"data:application/octet-stream;base64,{}\" download=\"{}.mp3\">Download audio file</a>",
        encode_base64(bytes),
        escape_attr(label)
    )
}

/// Standalone HTML page with an audio player and a download link
pub fn download_page(bytes: &[u8], label: &str) -> String {
    format!(
        "<!DOCTYPE html>\n\
         <html>\n\
         <head><meta charset=\"utf-8\"><title>{title}</title></head>\n\
         <body>\n\
         <audio controls src=\"data:audio/mp3;base64,{b64}\"></audio>\n\
         <p>{link}</p>\n\
         </body>\n\
         </html>\n",
        title = escape_attr(label),
        b64 = encode_base64(bytes),
        link = download_link(bytes, label),
    )
}

/// Pull the base64 payload back out of a link or page
pub fn extract_link_payload(html: &str) -> Option<&str> {
    const MARKER: &str = "data:application/octet-stream;base64,";
    let start = html.find(MARKER)? + MARKER.len();
    let end = html[start..].find('"')? + start;
    Some(&html[start..end])
}

/// Append `.mp3` when the path has no extension
pub fn mp3_path(path: &Path) -> PathBuf {
    if path.extension().is_some() {
        path.to_path_buf()
    } else {
        path.with_extension("mp3")
    }
}

/// Write the audio to disk, returning the path actually used
pub fn save_mp3(bytes: &[u8], path: &Path) -> Result<PathBuf> {
    let path = mp3_path(path);
    fs::write(&path, bytes)?;
    info!("Saved {} bytes of audio to {:?}", bytes.len(), path);
    Ok(path)
}

/// Write the download page to disk
pub fn save_page(bytes: &[u8], label: &str, path: &Path) -> Result<()> {
    fs::write(path, download_page(bytes, label))?;
    info!("Wrote download page to {:?}", path);
    Ok(())
}

fn escape_attr(text: &str) -> String {
    text.replace('&', "&amp;")
        .replace('"', "&quot;")
        .replace('<', "&lt;")
        .replace('>', "&gt;")
}
