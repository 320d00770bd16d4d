//! Encoder options.
//!
//! Options are given as a `;`-separated list of `key:value` pairs, for
//! example `quality:90` or `format:p3`. Malformed pairs are ignored.

use std::collections::BTreeMap;

/// Key/value options passed to an encoder.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct EncoderOptions {
    values: BTreeMap<String, String>,
}

impl EncoderOptions {
    pub fn new() -> Self {
        Self::default()
    }

    /// Parse `key:value;key:value`. Keys are case-insensitive.
    pub fn parse(data: &str) -> Self {
        let mut options = Self::new();

        for pair in data.split(';') {
            let mut parts = pair.split(':');
            let (Some(key), Some(value), None) = (parts.next(), parts.next(), parts.next()) else {
                continue;
            };

            let (key, value) = (key.trim(), value.trim());
            if key.is_empty() || value.is_empty() {
                continue;
            }
            options.set(key, value);
        }

        options
    }

    pub fn set(&mut self, key: &str, value: impl Into<String>) {
        self.values.insert(key.to_ascii_lowercase(), value.into());
    }

    /// Raw string value.
    pub fn get(&self, key: &str) -> Option<&str> {
        self.values.get(&key.to_ascii_lowercase()).map(String::as_str)
    }

    /// Value parsed as `u8`, or `default` if missing or unparsable.
    pub fn u8_or(&self, key: &str, default: u8) -> u8 {
        self.get(key)
            .and_then(|v| v.parse().ok())
            .unwrap_or(default)
    }

    /// Value as a string, or `default` if missing.
    pub fn str_or<'a>(&'a self, key: &str, default: &'a str) -> &'a str {
        self.get(key).unwrap_or(default)
    }

    pub fn is_empty(&self) -> bool {
        self.values.is_empty()
    }

    /// Merge `other` on top of these options.
    pub fn merge(&mut self, other: EncoderOptions) {
        self.values.extend(other.values);
    }
}
