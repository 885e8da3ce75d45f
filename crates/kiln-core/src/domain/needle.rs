//! Marker-based text surgery on generated files.
//!
//! A needle is a sentinel line (usually an XML comment) left in a placed file
//! so that later modules can insert content above it. Every insertion
//! re-emits the needle after the new content, so the insertion point is
//! never consumed.
//!
//! All edits are pure functions over the file content; reading and writing
//! the file is the repository's job.

use regex::Regex;

use crate::domain::{defaults::indent, error::DomainError, value_objects::Change};

/// Line separator used for every insertion, on every platform.
pub const LINE_SEPARATOR: &str = "\n";

/// A targeted edit of a file's text.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum TextEdit {
    /// Insert `line` above `needle`, re-emitting the needle indented by one
    /// level of `indent_width` spaces.
    InsertBeforeNeedle {
        needle: String,
        line: String,
        indent_width: usize,
    },
    /// Replace the first literal occurrence of `token`.
    ReplaceToken { token: String, replacement: String },
    /// Replace the first match of `pattern`.
    RegexSubstitute { pattern: String, replacement: String },
}

/// Result of applying an edit to some text.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum EditOutcome {
    Applied(String),
    AlreadyPresent,
}

impl EditOutcome {
    pub fn change(&self) -> Change {
        match self {
            Self::Applied(_) => Change::Updated,
            Self::AlreadyPresent => Change::Unchanged,
        }
    }
}

impl TextEdit {
    pub fn insert_before_needle(
        needle: impl Into<String>,
        line: impl Into<String>,
        indent_width: usize,
    ) -> Self {
        Self::InsertBeforeNeedle {
            needle: needle.into(),
            line: line.into(),
            indent_width,
        }
    }

    pub fn replace_token(token: impl Into<String>, replacement: impl Into<String>) -> Self {
        Self::ReplaceToken {
            token: token.into(),
            replacement: replacement.into(),
        }
    }

    pub fn regex_substitute(pattern: impl Into<String>, replacement: impl Into<String>) -> Self {
        Self::RegexSubstitute {
            pattern: pattern.into(),
            replacement: replacement.into(),
        }
    }

    /// The text the edit leaves in the file, used for the idempotence check.
    pub fn inserted_text(&self) -> String {
        match self {
            Self::InsertBeforeNeedle {
                needle,
                line,
                indent_width,
            } => format!(
                "{line}{LINE_SEPARATOR}{}{needle}",
                indent(1, *indent_width)
            ),
            Self::ReplaceToken { replacement, .. } | Self::RegexSubstitute { replacement, .. } => {
                replacement.clone()
            }
        }
    }

    /// Whether `content` already carries what this edit would leave behind.
    ///
    /// A needle insertion is present when any line of the file equals the
    /// inserted line, wherever it sits relative to the needle.
    pub fn is_present(&self, content: &str) -> bool {
        match self {
            Self::InsertBeforeNeedle { line, .. } if !line.contains('\n') => {
                let line = line.trim();
                content.lines().any(|existing| existing.trim() == line)
            }
            _ => content.contains(&self.inserted_text()),
        }
    }

    /// Apply the edit to `content`. `file` only labels errors.
    ///
    /// Returns [`EditOutcome::AlreadyPresent`] when [`Self::is_present`]
    /// holds, without looking for the needle.
    pub fn apply(&self, content: &str, file: &str) -> Result<EditOutcome, DomainError> {
        if self.is_present(content) {
            return Ok(EditOutcome::AlreadyPresent);
        }
        let inserted = self.inserted_text();

        match self {
            Self::InsertBeforeNeedle { needle, .. } => {
                if !content.contains(needle.as_str()) {
                    return Err(DomainError::NeedleNotFound {
                        needle: needle.clone(),
                        file: file.to_string(),
                    });
                }
                Ok(EditOutcome::Applied(content.replacen(
                    needle.as_str(),
                    &inserted,
                    1,
                )))
            }
            Self::ReplaceToken { token, replacement } => {
                if !content.contains(token.as_str()) {
                    return Err(DomainError::TokenNotFound {
                        token: token.clone(),
                        file: file.to_string(),
                    });
                }
                Ok(EditOutcome::Applied(content.replacen(
                    token.as_str(),
                    replacement,
                    1,
                )))
            }
            Self::RegexSubstitute {
                pattern,
                replacement,
            } => {
                let regex = compile(pattern)?;
                if !regex.is_match(content) {
                    return Err(DomainError::TokenNotFound {
                        token: pattern.clone(),
                        file: file.to_string(),
                    });
                }
                Ok(EditOutcome::Applied(
                    regex.replace(content, replacement.as_str()).into_owned(),
                ))
            }
        }
    }
}

/// Compile a user or module supplied pattern.
pub fn compile(pattern: &str) -> Result<Regex, DomainError> {
    Regex::new(pattern).map_err(|e| DomainError::InvalidPattern {
        pattern: pattern.to_string(),
        reason: e.to_string(),
    })
}

/// Whether `content` matches `pattern`.
pub fn contains_regexp(content: &str, pattern: &str) -> Result<bool, DomainError> {
    Ok(compile(pattern)?.is_match(content))
}

#[cfg(test)]
mod tests {
    use super::*;

    const NEEDLE: &str = "<!-- jhipster-needle-liquibase-add-changelog -->";
    const MASTER: &str = "<databaseChangeLog>\n  <!-- jhipster-needle-liquibase-add-changelog -->\n</databaseChangeLog>\n";

    fn include(path: &str) -> String {
        format!("<include file=\"classpath:config/liquibase/{path}\" relativeToChangelogFile=\"false\"/>")
    }

    fn applied(outcome: EditOutcome) -> String {
        match outcome {
            EditOutcome::Applied(text) => text,
            EditOutcome::AlreadyPresent => panic!("expected the edit to apply"),
        }
    }

    #[test]
    fn insertion_keeps_needle_after_new_line() {
        let edit = TextEdit::insert_before_needle(NEEDLE, include("changelog/a.xml"), 2);
        let result = applied(edit.apply(MASTER, "master.xml").unwrap());

        assert_eq!(
            result,
            format!(
                "<databaseChangeLog>\n  {}\n  {NEEDLE}\n</databaseChangeLog>\n",
                include("changelog/a.xml")
            )
        );
    }

    #[test]
    fn second_identical_insertion_is_noop() {
        let edit = TextEdit::insert_before_needle(NEEDLE, include("a.xml"), 2);
        let once = applied(edit.apply(MASTER, "master.xml").unwrap());

        assert_eq!(edit.apply(&once, "master.xml"), Ok(EditOutcome::AlreadyPresent));
        assert_eq!(once.matches(&include("a.xml")).count(), 1);
    }

    #[test]
    fn insertions_chain_in_order() {
        let first = TextEdit::insert_before_needle(NEEDLE, include("a.xml"), 2);
        let second = TextEdit::insert_before_needle(NEEDLE, include("b.xml"), 2);

        let text = applied(first.apply(MASTER, "master.xml").unwrap());
        let text = applied(second.apply(&text, "master.xml").unwrap());

        let a = text.find(&include("a.xml")).unwrap();
        let b = text.find(&include("b.xml")).unwrap();
        let needle = text.find(NEEDLE).unwrap();
        assert!(a < b && b < needle);
        assert_eq!(text.matches(NEEDLE).count(), 1);
    }

    #[test]
    fn earlier_line_is_not_inserted_again_after_another() {
        let a = TextEdit::insert_before_needle(NEEDLE, include("a.xml"), 2);
        let b = TextEdit::insert_before_needle(NEEDLE, include("b.xml"), 2);

        let text = applied(a.apply(MASTER, "master.xml").unwrap());
        let text = applied(b.apply(&text, "master.xml").unwrap());

        assert_eq!(a.apply(&text, "master.xml"), Ok(EditOutcome::AlreadyPresent));
        assert_eq!(text.matches(&include("a.xml")).count(), 1);
    }

    #[test]
    fn present_line_wins_even_without_needle() {
        let logger = r#"<logger name="liquibase" level="WARN" />"#;
        let edit = TextEdit::insert_before_needle(NEEDLE, logger, 4);
        let content = format!("<configuration>\n  {logger}\n</configuration>\n");

        assert_eq!(edit.apply(&content, "logback.xml"), Ok(EditOutcome::AlreadyPresent));
    }

    #[test]
    fn missing_needle_is_an_error() {
        let edit = TextEdit::insert_before_needle(NEEDLE, include("a.xml"), 2);
        let err = edit.apply("<databaseChangeLog/>", "master.xml").unwrap_err();

        assert_eq!(
            err,
            DomainError::NeedleNotFound {
                needle: NEEDLE.into(),
                file: "master.xml".into(),
            }
        );
    }

    #[test]
    fn indent_width_is_applied_to_needle() {
        let edit = TextEdit::insert_before_needle(NEEDLE, "<x/>", 4);
        assert_eq!(edit.inserted_text(), format!("<x/>\n    {NEEDLE}"));
    }

    #[test]
    fn replace_token_replaces_first_occurrence_only() {
        let edit = TextEdit::replace_token("TOKEN", "value");
        let result = applied(edit.apply("TOKEN TOKEN", "f").unwrap());
        assert_eq!(result, "value TOKEN");
    }

    #[test]
    fn regex_substitute_and_bad_pattern() {
        let edit = TextEdit::regex_substitute(r"version=\d+", "version=2");
        assert_eq!(
            applied(edit.apply("version=1\n", "f").unwrap()),
            "version=2\n"
        );

        let bad = TextEdit::regex_substitute("(", "x");
        assert!(matches!(
            bad.apply("anything", "f"),
            Err(DomainError::InvalidPattern { .. })
        ));
    }

    #[test]
    fn contains_regexp_matches() {
        assert_eq!(contains_regexp("server.port=8080", r"server\.port=\d+"), Ok(true));
        assert_eq!(contains_regexp("nothing", "server"), Ok(false));
    }
}
