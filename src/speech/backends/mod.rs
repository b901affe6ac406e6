//! Speech provider backends

// Google Translate TTS over HTTP
pub mod google;
