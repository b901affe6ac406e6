//! Speech synthesis system

pub mod backends;
pub mod buffer;
pub mod convert;
pub mod synth;

pub use buffer::SpeechBuffer;
pub use convert::{convert, AudioResult, SynthesisRequest, DEFAULT_LANGUAGE, SUPPORTED_LANGUAGES};
pub use synth::{create_synth, Synth};
