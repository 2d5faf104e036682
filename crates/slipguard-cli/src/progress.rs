//! Progress reporting for extraction.

use crate::output::OutputFormatter;
use console::Term;
use indicatif::ProgressBar;
use indicatif::ProgressStyle;
use slipguard_core::EntryInfo;
use slipguard_core::ExtractObserver;
use std::path::Path;
use std::time::Duration;

/// Observer printing one line per extracted entry.
///
/// On a TTY a spinner counts entries below the scrolling lines; lines are
/// routed through the spinner so they do not tear it. The spinner is
/// cleared on drop.
pub struct CliProgress<'a> {
    bar: Option<ProgressBar>,
    formatter: &'a dyn OutputFormatter,
    entries: u64,
}

impl<'a> CliProgress<'a> {
    /// Creates a progress observer, with a spinner when `spinner` is set.
    #[must_use]
    pub fn new(formatter: &'a dyn OutputFormatter, spinner: bool) -> Self {
        let bar = spinner.then(|| {
            let bar = ProgressBar::new_spinner();
            bar.set_style(
                ProgressStyle::with_template("{spinner:.green} {pos} entries {wide_msg}")
                    .unwrap_or_else(|_| ProgressStyle::default_spinner()),
            );
            bar.enable_steady_tick(Duration::from_millis(100));
            bar
        });

        Self {
            bar,
            formatter,
            entries: 0,
        }
    }

    /// Checks if we should show progress (TTY detection).
    #[must_use]
    pub fn should_show() -> bool {
        Term::stdout().is_term()
    }
}

impl Drop for CliProgress<'_> {
    fn drop(&mut self) {
        if let Some(bar) = &self.bar {
            bar.finish_and_clear();
        }
    }
}

impl ExtractObserver for CliProgress<'_> {
    fn on_extracted(&mut self, entry: &EntryInfo, target: &Path) {
        self.entries += 1;
        let line = self.formatter.format_entry(entry, target);

        match (&self.bar, line) {
            (Some(bar), Some(line)) => {
                bar.println(line);
                bar.set_position(self.entries);
                bar.set_message(entry.name.clone());
            }
            (Some(bar), None) => {
                bar.set_position(self.entries);
                bar.set_message(entry.name.clone());
            }
            (None, Some(line)) => {
                let _ = Term::stdout().write_line(&line);
            }
            (None, None) => {}
        }
    }
}
