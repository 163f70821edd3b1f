//! Progress bar display for artifact resolution

use indicatif::{ProgressBar, ProgressDrawTarget, ProgressStyle};

/// Progress display while bundles are resolved
pub struct ResolutionProgress {
    bar: ProgressBar,
}

impl ResolutionProgress {
    /// Create a progress display for `total` artifacts on stderr
    ///
    /// Nothing is drawn when stderr is not a terminal.
    pub fn new(total: u64) -> Self {
        let style = ProgressStyle::default_bar()
            .template("[{bar:40.cyan/blue}] {pos}/{len} {msg}")
            .unwrap_or_else(|_| ProgressStyle::default_bar())
            .progress_chars("#>-");

        let bar = ProgressBar::with_draw_target(Some(total), ProgressDrawTarget::stderr());
        bar.set_style(style);
        if !console::Term::stderr().is_term() {
            bar.set_draw_target(ProgressDrawTarget::hidden());
        }
        Self { bar }
    }

    /// A display that never draws
    pub fn hidden() -> Self {
        Self {
            bar: ProgressBar::hidden(),
        }
    }

    /// Show the artifact currently being resolved
    pub fn update(&self, artifact: &str) {
        let display = if artifact.len() > 50 {
            let cut = artifact
                .char_indices()
                .map(|(i, _)| i)
                .find(|i| artifact.len() - i <= 47)
                .unwrap_or(0);
            format!("...{}", &artifact[cut..])
        } else {
            artifact.to_string()
        };
        self.bar.set_message(display);
    }

    pub fn inc(&self) {
        self.bar.inc(1);
    }

    pub fn finish(&self) {
        self.bar.finish_and_clear();
    }
}
