//! Terminal rendering: spinner while a prediction is in flight and coloured
//! output for each view.
//!
//! Uses `indicatif` for the spinner and `console` for styles and prompts.

use std::io::{self, BufRead};
use std::time::Duration;

use console::{Style, Term};
use indicatif::{ProgressBar, ProgressStyle};

use crate::api::{FormData, FormField};
use crate::session::{ApiHealth, SubmissionOutcome, SubmissionRecord, ViewState};

/// Text of the API status line shown above the form.
pub fn status_line(health: &ApiHealth) -> String {
    let state = if health.is_healthy {
        "Connected"
    } else {
        "Disconnected"
    };
    match &health.version {
        Some(v) => format!("API Status: {state} (v{v})"),
        None => format!("API Status: {state}"),
    }
}

/// Label of the submit action, which doubles as the reason it is disabled.
pub fn submit_label(health: &ApiHealth) -> &'static str {
    if health.is_healthy {
        "Evaluate Teacher"
    } else {
        "API Unavailable"
    }
}

/// Spinner shown while waiting on `/predict`.
pub struct Spinner {
    pb: ProgressBar,
}

impl Spinner {
    pub fn start() -> Self {
        let pb = ProgressBar::new_spinner();
        pb.set_style(
            ProgressStyle::default_spinner()
                .template("{spinner:.cyan} {msg}")
                .unwrap_or_else(|_| ProgressStyle::default_spinner()),
        );
        pb.set_message("Processing your application...");
        pb.enable_steady_tick(Duration::from_millis(100));
        Self { pb }
    }

    pub fn finish(self) {
        self.pb.finish_and_clear();
    }
}

pub struct Ui {
    term: Term,
    green: Style,
    red: Style,
    yellow: Style,
    bold: Style,
    dim: Style,
}

impl Default for Ui {
    fn default() -> Self {
        Self::new()
    }
}

impl Ui {
    pub fn new() -> Self {
        Self {
            term: Term::stdout(),
            green: Style::new().green().bold(),
            red: Style::new().red().bold(),
            yellow: Style::new().yellow(),
            bold: Style::new().bold(),
            dim: Style::new().dim(),
        }
    }

    pub fn header(&self) {
        println!("{}", self.bold.apply_to("NextGen Teacher Evaluation"));
        println!(
            "{}",
            self.dim
                .apply_to("AI-powered evaluation based on qualifications and expertise")
        );
        println!();
    }

    pub fn health(&self, health: &ApiHealth) {
        let dot = if health.is_healthy {
            self.green.apply_to("●")
        } else {
            self.red.apply_to("●")
        };
        println!("{dot} {}", status_line(health));
    }

    pub fn form(&self, form: &FormData, health: &ApiHealth) {
        println!();
        println!("{}", self.bold.apply_to("─── Teacher Evaluation Form ───"));
        for (i, field) in FormField::ALL.into_iter().enumerate() {
            let value = form.get(field);
            let shown = if value.trim().is_empty() {
                self.dim.apply_to(field.placeholder().to_string())
            } else {
                Style::new().apply_to(value.to_string())
            };
            println!("  [{}] {}: {shown}", i + 1, field.label());
        }
        let label = submit_label(health);
        let label = if health.is_healthy {
            self.green.apply_to(label)
        } else {
            self.red.apply_to(label)
        };
        println!("  [s] {label}");
    }

    pub fn view(&self, view: &ViewState) {
        if let Some(result) = view.result() {
            println!();
            println!("  {} Evaluation Complete!", self.green.apply_to("✓"));
            println!("{}", result.to_pretty());
        } else if let Some(message) = view.error() {
            println!();
            println!(
                "  {} Oops! Something went wrong",
                self.red.apply_to("✗")
            );
            println!("  {message}");
        }
    }

    pub fn history(&self, history: &[SubmissionRecord]) {
        if history.is_empty() {
            println!("  {}", self.dim.apply_to("No submissions yet."));
            return;
        }
        for record in history {
            let mark = if record.succeeded() {
                self.green.apply_to("✓")
            } else {
                self.red.apply_to("✗")
            };
            let detail = match &record.outcome {
                SubmissionOutcome::Success(result) => match result.predicted_category() {
                    Some(c) => format!("category {c}"),
                    None => result.0.to_string(),
                },
                SubmissionOutcome::Failure(message) => message.clone(),
            };
            println!(
                "  {} {} ({}ms) {mark} {detail}",
                self.dim.apply_to(record.completed_at.format("%H:%M:%S")),
                record.form.job_post,
                record.duration_ms
            );
        }
    }

    pub fn notice(&self, message: &str) {
        println!("  {}", self.yellow.apply_to(message));
    }

    /// Print `label` and read one line from `input`, without its line
    /// ending. `None` once the input is exhausted.
    pub fn prompt(&self, input: &mut impl BufRead, label: &str) -> io::Result<Option<String>> {
        self.term.write_str(&format!("{label} "))?;
        let mut line = String::new();
        if input.read_line(&mut line)? == 0 {
            return Ok(None);
        }
        Ok(Some(line.trim_end_matches(['\r', '\n']).to_string()))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn status_line_connected_with_version() {
        let health = ApiHealth {
            is_healthy: true,
            version: Some("1.0.0".into()),
        };
        assert_eq!(status_line(&health), "API Status: Connected (v1.0.0)");
        assert_eq!(submit_label(&health), "Evaluate Teacher");
    }

    #[test]
    fn status_line_disconnected() {
        let health = ApiHealth::unavailable();
        assert_eq!(status_line(&health), "API Status: Disconnected");
        assert_eq!(submit_label(&health), "API Unavailable");
    }

    #[test]
    fn prompt_reads_lines_until_eof() {
        let ui = Ui::new();
        let mut input = io::Cursor::new("s\r\nMath Teacher\n");
        assert_eq!(ui.prompt(&mut input, ">").unwrap().as_deref(), Some("s"));
        assert_eq!(
            ui.prompt(&mut input, ">").unwrap().as_deref(),
            Some("Math Teacher")
        );
        assert_eq!(ui.prompt(&mut input, ">").unwrap(), None);
    }

    #[test]
    fn prompt_keeps_blank_line_distinct_from_eof() {
        let ui = Ui::new();
        let mut input = io::Cursor::new("\n");
        assert_eq!(ui.prompt(&mut input, ">").unwrap().as_deref(), Some(""));
        assert_eq!(ui.prompt(&mut input, ">").unwrap(), None);
    }

    #[test]
    fn status_line_unhealthy_keeps_version() {
        let health = ApiHealth {
            is_healthy: false,
            version: Some("1.0.0".into()),
        };
        assert_eq!(status_line(&health), "API Status: Disconnected (v1.0.0)");
    }
}
