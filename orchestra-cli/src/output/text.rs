//! Text output formatting with progress bars and colors.

use orchestra_client::BatchOutcome;
use orchestra_core::{ChatResponse, QuotaReport, QuotaWindow, RequestHandle, RequestState, RequestStatus};

// ============================================================================
// ANSI Colors
// ============================================================================

const RESET: &str = "\x1b[0m";
const BOLD: &str = "\x1b[1m";
const DIM: &str = "\x1b[2m";
const GREEN: &str = "\x1b[32m";
const YELLOW: &str = "\x1b[33m";
const RED: &str = "\x1b[31m";
const CYAN: &str = "\x1b[36m";

// Progress bar characters
const BAR_FULL: char = '█';
const BAR_EMPTY: char = '░';

/// Text formatter with optional colors.
pub struct TextFormatter {
    use_colors: bool,
    bar_width: usize,
}

impl TextFormatter {
    /// Creates a new text formatter.
    pub fn new(use_colors: bool) -> Self {
        Self {
            use_colors,
            bar_width: 10,
        }
    }

    // ========================================================================
    // Requests
    // ========================================================================

    /// Formats a completed chat response followed by a metadata line.
    pub fn format_chat(&self, response: &ChatResponse) -> String {
        let mut meta = Vec::new();
        if let Some(provider) = &response.provider {
            meta.push(provider.clone());
        }
        if let Some(tokens) = response.tokens {
            meta.push(format!("{tokens} tokens"));
        }
        if let Some(latency) = response.latency_ms {
            meta.push(format!("{latency}ms"));
        }

        if meta.is_empty() {
            response.text.clone()
        } else {
            format!("{}\n\n{}", response.text, self.dim(&meta.join(" · ")))
        }
    }

    /// Formats the handle returned by a submission.
    pub fn format_handle(&self, handle: &RequestHandle) -> String {
        format!(
            "Submitted: {}\n{}",
            self.cyan(handle.as_str()),
            self.dim(&format!("Check with: orchestra status {handle}"))
        )
    }

    /// Formats a single status lookup.
    pub fn format_status(&self, handle: &RequestHandle, status: &RequestStatus) -> String {
        let mut lines = vec![format!(
            "{} {}",
            self.bold(handle.as_str()),
            self.state(status.status)
        )];

        if let Some(provider) = &status.provider_used {
            lines.push(format!("Provider: {provider}"));
        }
        if let Some(tokens) = status.tokens_used {
            lines.push(format!("Tokens:   {tokens}"));
        }
        if let Some(latency) = status.latency_ms {
            lines.push(format!("Latency:  {latency}ms"));
        }
        if let Some(error) = &status.error_message {
            lines.push(format!("Error:    {}", self.red(error)));
        }
        if let Some(response) = &status.response {
            lines.push(String::new());
            lines.push(response.clone());
        }

        lines.join("\n")
    }

    fn state(&self, state: RequestState) -> String {
        let label = state.as_str();
        match state {
            RequestState::Completed => self.green(label),
            RequestState::Failed => self.red(label),
            RequestState::Unknown => self.dim(label),
            RequestState::Pending | RequestState::Queued | RequestState::Processing => {
                self.yellow(label)
            }
        }
    }

    // ========================================================================
    // Batch
    // ========================================================================

    /// Formats batch results as question/answer pairs in input order.
    pub fn format_batch<S: AsRef<str>>(
        &self,
        prompts: &[S],
        outcomes: &[BatchOutcome],
    ) -> String {
        prompts
            .iter()
            .zip(outcomes)
            .map(|(prompt, outcome)| {
                let answer = match outcome {
                    BatchOutcome::Completed(text) => text.clone(),
                    BatchOutcome::Failed(_) => self.red(&outcome.clone().into_entry()),
                };
                format!("{} {}\n{} {answer}", self.bold("Q:"), prompt.as_ref(), self.bold("A:"))
            })
            .collect::<Vec<_>>()
            .join("\n\n")
    }

    // ========================================================================
    // Quotas
    // ========================================================================

    /// Formats the quota report, one provider per line.
    pub fn format_quotas(&self, report: &QuotaReport) -> String {
        if report.is_empty() {
            return self.dim("No quota data reported");
        }

        let mut lines = vec![self.bold("Daily quota"), "─".repeat(40)];
        for (name, quota) in &report.providers {
            lines.push(self.format_window(name, &quota.daily));
        }

        let exhausted = report.exhausted_providers();
        if !exhausted.is_empty() {
            lines.push(String::new());
            lines.push(self.red(&format!("Exhausted: {}", exhausted.join(", "))));
        }

        lines.join("\n")
    }

    /// Formats one quota window with a progress bar of what is left.
    fn format_window(&self, name: &str, window: &QuotaWindow) -> String {
        let remaining = window.remaining_percent();
        let bar = self.progress_bar(remaining);
        let counts = format!("{}/{}", window.used, window.limit);
        let left = self.color_for_percent(remaining, &format!("{} left", window.remaining));

        format!("{:<10} {bar} {counts:>11} ({left})", format!("{name}:"))
    }

    /// Formats a progress bar.
    #[allow(
        clippy::cast_possible_truncation,
        clippy::cast_sign_loss,
        clippy::cast_precision_loss
    )]
    pub fn progress_bar(&self, percent_remaining: f64) -> String {
        let percent = percent_remaining.clamp(0.0, 100.0);
        let filled = ((percent / 100.0) * self.bar_width as f64).round() as usize;
        let empty = self.bar_width.saturating_sub(filled);

        let bar = format!(
            "{}{}",
            BAR_FULL.to_string().repeat(filled),
            BAR_EMPTY.to_string().repeat(empty)
        );

        self.color_for_percent(percent, &bar)
    }

    // ========================================================================
    // Helpers
    // ========================================================================

    fn color_for_percent(&self, percent: f64, text: &str) -> String {
        if !self.use_colors {
            return text.to_string();
        }

        if percent < 20.0 {
            self.red(text)
        } else if percent < 50.0 {
            self.yellow(text)
        } else {
            self.green(text)
        }
    }

    fn paint(&self, code: &str, text: &str) -> String {
        if self.use_colors {
            format!("{code}{text}{RESET}")
        } else {
            text.to_string()
        }
    }

    fn bold(&self, text: &str) -> String {
        self.paint(BOLD, text)
    }

    fn dim(&self, text: &str) -> String {
        self.paint(DIM, text)
    }

    fn green(&self, text: &str) -> String {
        self.paint(GREEN, text)
    }

    fn yellow(&self, text: &str) -> String {
        self.paint(YELLOW, text)
    }

    fn red(&self, text: &str) -> String {
        self.paint(RED, text)
    }

    fn cyan(&self, text: &str) -> String {
        self.paint(CYAN, text)
    }
}
