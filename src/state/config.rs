//! Configuration management

use crate::download::DEFAULT_FILE_LABEL;
use crate::speech::DEFAULT_LANGUAGE;
use crate::{CodespeakError, Result};
use ini::Ini;
use log::{debug, info};
use std::collections::HashMap;
use std::path::{Path, PathBuf};
use std::str::FromStr;
use std::time::Duration;

/// Spoken names written to a fresh config's `[symbols]` section
const DEFAULT_SYMBOLS: &[(char, &str)] = &[
    ('!', "bang"),
    ('"', "quote"),
    ('#', "hash"),
    ('$', "dollar"),
    ('%', "percent"),
    ('&', "and"),
    ('\'', "tick"),
    ('(', "left paren"),
    (')', "right paren"),
    ('*', "star"),
    ('+', "plus"),
    (',', "comma"),
    ('-', "dash"),
    ('.', "dot"),
    ('/', "slash"),
    (':', "colon"),
    (';', "semi"),
    ('<', "less"),
    ('=', "equals"),
    ('>', "greater"),
    ('?', "question"),
    ('@', "at"),
    ('[', "left bracket"),
    ('\\', "backslash"),
    (']', "right bracket"),
    ('^', "caret"),
    ('_', "underscore"),
    ('`', "backtick"),
    ('{', "left brace"),
    ('|', "bar"),
    ('}', "right brace"),
    ('~', "tilde"),
];

/// Application configuration
///
/// Holds speech settings, playback and download preferences, and the
/// symbol names used when spelling out punctuation.
pub struct Config {
    /// INI configuration storage
    ini: Ini,

    /// Config file path (~/.codespeak.cfg)
    path: PathBuf,

    /// Symbols dictionary (char code -> name) for pronunciation
    /// e.g., 33 -> "bang" so '!' is spoken as "bang"
    pub symbols: HashMap<u32, String>,

    /// Alternation of escaped symbol characters, built once from `symbols`
    symbols_regex: Option<String>,
}

impl Config {
    /// Load configuration from ~/.codespeak.cfg, creating it if missing
    pub fn load() -> Result<Self> {
        Self::load_from(Self::config_path())
    }

    /// Load configuration from an explicit path, creating it if missing
    pub fn load_from(path: impl Into<PathBuf>) -> Result<Self> {
        let path = path.into();
        debug!("Loading config from {:?}", path);

        let ini = if path.exists() {
            Ini::load_from_file(&path)
                .map_err(|e| CodespeakError::IniParse(format!("Failed to load config: {}", e)))?
        } else {
            info!("Config file not found, creating default");
            let default = Self::default_config();
            default
                .write_to_file(&path)
                .map_err(|e| CodespeakError::IniParse(format!("Failed to write config: {}", e)))?;
            default
        };

        let mut config = Self {
            ini,
            path,
            symbols: HashMap::new(),
            symbols_regex: None,
        };

        config.parse_symbols();
        config.build_symbols_regex();

        Ok(config)
    }

    /// Save configuration to disk
    pub fn save(&self) -> Result<()> {
        debug!("Saving config to {:?}", self.path);
        self.ini
            .write_to_file(&self.path)
            .map_err(|e| CodespeakError::Config(format!("Failed to save config: {}", e)))
    }

    /// Get config file path (~/.codespeak.cfg)
    fn config_path() -> PathBuf {
        dirs::home_dir()
            .unwrap_or_else(|| PathBuf::from("."))
            .join(".codespeak.cfg")
    }

    /// Expose the config file path for display
    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Create default configuration
    fn default_config() -> Ini {
        let mut ini = Ini::new();

        ini.with_section(Some("speech"))
            .set("language", DEFAULT_LANGUAGE)
            .set("slow", "false")
            .set("tld", "com")
            .set("timeout_secs", "0")
            .set("process_symbols", "false")
            .set("repeated_symbols", "false")
            .set("repeated_symbols_values", "-=!#");

        ini.with_section(Some("playback"))
            .set("player", "")
            .set("autoplay", "true");

        ini.with_section(Some("download"))
            .set("file_label", DEFAULT_FILE_LABEL);

        let mut symbols = ini.with_section(Some("symbols"));
        for &(ch, name) in DEFAULT_SYMBOLS {
            symbols.set((ch as u32).to_string(), name);
        }

        ini
    }

    /// Read `[symbols]`; keys are decimal char codes, bad keys are skipped
    fn parse_symbols(&mut self) {
        self.symbols = self
            .ini
            .section(Some("symbols"))
            .map(|section| {
                section
                    .iter()
                    .filter_map(|(key, name)| Some((key.parse::<u32>().ok()?, name.to_string())))
                    .collect()
            })
            .unwrap_or_default();
        debug!("Loaded {} symbols", self.symbols.len());
    }

    /// Typed value, falling back to `default` when missing or unparsable
    fn value<T: FromStr>(&self, section: &str, key: &str, default: T) -> T {
        self.ini
            .get_from(Some(section), key)
            .and_then(|v| v.trim().parse().ok())
            .unwrap_or(default)
    }

    /// Raw string value, or `default` when missing
    fn text(&self, section: &str, key: &str, default: &str) -> String {
        self.ini
            .get_from(Some(section), key)
            .unwrap_or(default)
            .to_string()
    }

    /// Set a value in config
    pub fn set(&mut self, section: &str, key: &str, value: &str) {
        self.ini.with_section(Some(section)).set(key, value);
    }

    /// Build regex pattern for symbol replacement
    fn build_symbols_regex(&mut self) {
        if self.symbols.is_empty() {
            return;
        }

        let mut codes: Vec<u32> = self.symbols.keys().copied().filter(|&code| code != 32).collect();
        codes.sort_unstable();

        let pattern: String = codes
            .into_iter()
            .filter_map(|code| char::from_u32(code).map(|ch| regex::escape(&ch.to_string())))
            .collect::<Vec<_>>()
            .join("|");

        if !pattern.is_empty() {
            self.symbols_regex = Some(pattern);
        }
    }

    /// Get symbols regex pattern for replacement
    pub fn symbols_regex(&self) -> Option<&str> {
        self.symbols_regex.as_deref()
    }

    // Speech settings

    /// Language code sent to the provider
    pub fn language(&self) -> String {
        let language = self.text("speech", "language", DEFAULT_LANGUAGE);
        if language.trim().is_empty() {
            DEFAULT_LANGUAGE.to_string()
        } else {
            language.trim().to_string()
        }
    }

    pub fn set_language(&mut self, language: &str) {
        self.set("speech", "language", language);
    }

    /// Request slower speech
    pub fn slow(&self) -> bool {
        self.value("speech", "slow", false)
    }

    pub fn set_slow(&mut self, slow: bool) {
        self.set("speech", "slow", if slow { "true" } else { "false" });
    }

    /// Top-level domain of the Translate host
    pub fn tld(&self) -> String {
        self.text("speech", "tld", "com")
    }

    /// Per-request timeout; `None` when unset or zero
    pub fn timeout(&self) -> Option<Duration> {
        match self.value::<u64>("speech", "timeout_secs", 0) {
            0 => None,
            secs => Some(Duration::from_secs(secs)),
        }
    }

    /// Spell out symbols before synthesis?
    /// When true, "!" becomes "bang", "$" becomes "dollar", etc.
    pub fn process_symbols(&self) -> bool {
        self.value("speech", "process_symbols", false)
    }

    /// Should repeated symbols be condensed?
    /// When true, "====" becomes "4 equals"
    pub fn repeated_symbols(&self) -> bool {
        self.value("speech", "repeated_symbols", false)
    }

    /// Which symbols should be condensed when repeated?
    pub fn repeated_symbols_values(&self) -> String {
        self.text("speech", "repeated_symbols_values", "-=!#")
    }

    // Playback and download settings

    /// Player command line; empty means autodetect
    pub fn player(&self) -> String {
        self.text("playback", "player", "")
    }

    /// Play audio right after it is generated
    pub fn autoplay(&self) -> bool {
        self.value("playback", "autoplay", true)
    }

    /// File name stem for saved audio
    pub fn file_label(&self) -> String {
        self.text("download", "file_label", DEFAULT_FILE_LABEL)
    }
}
