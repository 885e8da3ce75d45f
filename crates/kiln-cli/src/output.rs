//! Output management and formatting.

use std::io::{self, IsTerminal};

use console::Term;
use indicatif::{ProgressBar, ProgressStyle};
use owo_colors::OwoColorize;

use crate::cli::global::{GlobalArgs, OutputFormat};
use crate::config::AppConfig;

/// Manages CLI output based on configuration.
pub struct OutputManager {
    resolved_format: OutputFormat,
    quiet: bool,
    no_color: bool,
    term: Term,
}

impl OutputManager {
    /// Build an `OutputManager` from parsed CLI flags and loaded config.
    pub fn new(args: &GlobalArgs, config: &AppConfig) -> Self {
        // Auto → Human on a TTY, Plain otherwise. An explicit config value
        // only applies when the flag was left on auto.
        let resolved_format = match args.output_format {
            OutputFormat::Auto => match config.output.format.as_str() {
                "plain" => OutputFormat::Plain,
                _ if io::stdout().is_terminal() => OutputFormat::Human,
                _ => OutputFormat::Plain,
            },
            explicit => explicit,
        };

        Self {
            resolved_format,
            quiet: args.quiet,
            no_color: args.no_color
                || config.output.no_color
                || resolved_format == OutputFormat::Plain,
            term: Term::stdout(),
        }
    }

    // ── Public write methods ───────────────────────────────────────────────

    /// Generic message; suppressed in quiet mode.
    pub fn print(&self, msg: &str) -> io::Result<()> {
        if self.quiet {
            return Ok(());
        }
        self.term.write_line(msg)
    }

    /// Success indicator: `✓ <msg>`.
    pub fn success(&self, msg: &str) -> io::Result<()> {
        if self.quiet {
            return Ok(());
        }
        let line = if self.no_color {
            format!("\u{2713} {msg}") // ✓
        } else {
            format!("{} {}", "\u{2713}".green().bold(), msg.green())
        };
        self.term.write_line(&line)
    }

    /// Warning indicator: `⚠ <msg>`.
    pub fn warning(&self, msg: &str) -> io::Result<()> {
        if self.quiet {
            return Ok(());
        }
        let line = if self.no_color {
            format!("\u{26a0} {msg}") // ⚠
        } else {
            format!("{} {}", "\u{26a0}".yellow().bold(), msg.yellow())
        };
        self.term.write_line(&line)
    }

    /// Informational indicator: `ℹ <msg>`.
    pub fn info(&self, msg: &str) -> io::Result<()> {
        if self.quiet {
            return Ok(());
        }
        let line = if self.no_color {
            format!("\u{2139} {msg}") // ℹ
        } else {
            format!("{} {}", "\u{2139}".blue().bold(), msg.blue())
        };
        self.term.write_line(&line)
    }

    /// Bold cyan header line.
    pub fn header(&self, text: &str) -> io::Result<()> {
        if self.quiet {
            return Ok(());
        }
        let line = if self.no_color {
            text.to_owned()
        } else {
            text.cyan().bold().to_string()
        };
        self.term.write_line(&line)
    }

    /// `slug  description` row, slug padded to `width`.
    pub fn module_row(&self, slug: &str, description: &str, width: usize) -> io::Result<()> {
        if self.quiet {
            return Ok(());
        }
        let slug = format!("{slug:<width$}");
        let line = if self.no_color {
            format!("  {slug}  {description}")
        } else {
            format!("  {}  {}", slug.bold(), description.dimmed())
        };
        self.term.write_line(&line)
    }

    /// Progress bar over `len` modules, hidden when not on an interactive
    /// human terminal.
    pub fn progress(&self, len: usize) -> ProgressBar {
        if self.is_quiet() || self.format() != OutputFormat::Human || !self.term.is_term() {
            return ProgressBar::hidden();
        }

        let template = if !self.supports_color() {
            "{bar:30} {pos}/{len} {msg}"
        } else {
            "{bar:30.cyan/blue} {pos}/{len} {msg}"
        };
        let style = ProgressStyle::with_template(template)
            .unwrap_or_else(|_| ProgressStyle::default_bar())
            .progress_chars("=> ");
        ProgressBar::new(len as u64).with_style(style)
    }

    // ── Accessors ─────────────────────────────────────────────────────────

    /// `true` if ANSI colours are enabled.
    pub fn supports_color(&self) -> bool {
        !self.no_color
    }

    /// `true` if quiet mode suppresses most output.
    pub fn is_quiet(&self) -> bool {
        self.quiet
    }

    /// The resolved (non-Auto) output format.
    pub fn format(&self) -> OutputFormat {
        self.resolved_format
    }
}

// ── tests ─────────────────────────────────────────────────────────────────────

#[cfg(test)]
mod tests {
    use super::*;

    fn make_manager(quiet: bool, no_color: bool, format: OutputFormat) -> OutputManager {
        let args = GlobalArgs {
            quiet,
            no_color,
            output_format: format,
            ..GlobalArgs::default()
        };
        OutputManager::new(&args, &AppConfig::default())
    }

    #[test]
    fn quiet_suppresses_print() {
        let out = make_manager(true, true, OutputFormat::Plain);
        assert!(out.is_quiet());
        assert!(out.print("hello").is_ok());
    }

    #[test]
    fn plain_output_never_colors() {
        let out = make_manager(false, false, OutputFormat::Plain);
        assert!(!out.supports_color());
        assert_eq!(out.format(), OutputFormat::Plain);
    }

    #[test]
    fn human_output_honours_no_color() {
        assert!(make_manager(false, false, OutputFormat::Human).supports_color());
        assert!(!make_manager(false, true, OutputFormat::Human).supports_color());
    }

    #[test]
    fn plain_config_format_applies_on_auto() {
        let mut config = AppConfig::default();
        config.output.format = "plain".into();
        let args = GlobalArgs::default();

        let out = OutputManager::new(&args, &config);

        assert_eq!(out.format(), OutputFormat::Plain);
    }

    #[test]
    fn progress_is_hidden_in_quiet_mode() {
        let out = make_manager(true, true, OutputFormat::Human);
        assert!(out.progress(3).is_hidden());
    }
}
