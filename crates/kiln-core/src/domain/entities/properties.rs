//! In-memory model of a Java `.properties` runtime configuration file.

use std::fmt::Write as _;

use crate::domain::value_objects::{Change, ConfigValue};

/// Ordered, key-unique property entries.
///
/// Comments and blank lines from a parsed file are kept in place so that
/// upserting a key never rewrites unrelated content.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct PropertiesFile {
    lines: Vec<Line>,
}

#[derive(Debug, Clone, PartialEq, Eq)]
enum Line {
    Entry { key: String, value: ConfigValue },
    Verbatim(String),
}

impl PropertiesFile {
    pub fn new() -> Self {
        Self::default()
    }

    /// Parse `key=value` / `key: value` lines. Values keep their type
    /// (`true`/`false` → boolean, integer literals → integer).
    ///
    /// A key appearing twice keeps its first position and its last value.
    pub fn parse(content: &str) -> Self {
        let mut file = Self::new();
        for raw in content.lines() {
            let trimmed = raw.trim_start();
            if trimmed.is_empty() || trimmed.starts_with('#') || trimmed.starts_with('!') {
                file.lines.push(Line::Verbatim(raw.to_string()));
                continue;
            }

            match trimmed.find(['=', ':']) {
                Some(split) => {
                    let key = trimmed[..split].trim();
                    let value = trimmed[split + 1..].trim();
                    file.set(key, ConfigValue::parse(value));
                }
                None => file.lines.push(Line::Verbatim(raw.to_string())),
            }
        }
        file
    }

    pub fn get(&self, key: &str) -> Option<&ConfigValue> {
        self.lines.iter().find_map(|line| match line {
            Line::Entry { key: k, value } if k == key => Some(value),
            _ => None,
        })
    }

    /// Upsert a key; last write wins.
    pub fn set(&mut self, key: &str, value: ConfigValue) -> Change {
        let position = self
            .lines
            .iter()
            .position(|line| matches!(line, Line::Entry { key: k, .. } if k == key));

        match position.map(|index| &mut self.lines[index]) {
            Some(Line::Entry { value: current, .. }) if *current == value => Change::Unchanged,
            Some(Line::Entry { value: current, .. }) => {
                *current = value;
                Change::Updated
            }
            _ => {
                self.lines.push(Line::Entry {
                    key: key.to_string(),
                    value,
                });
                Change::Added
            }
        }
    }

    pub fn entries(&self) -> impl Iterator<Item = (&str, &ConfigValue)> {
        self.lines.iter().filter_map(|line| match line {
            Line::Entry { key, value } => Some((key.as_str(), value)),
            Line::Verbatim(_) => None,
        })
    }

    pub fn len(&self) -> usize {
        self.entries().count()
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    pub fn render(&self) -> String {
        let mut out = String::new();
        for line in &self.lines {
            match line {
                Line::Entry { key, value } => {
                    let _ = writeln!(out, "{key}={value}");
                }
                Line::Verbatim(text) => {
                    let _ = writeln!(out, "{text}");
                }
            }
        }
        out
    }
}
