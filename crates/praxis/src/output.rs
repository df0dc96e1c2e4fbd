//! Colored terminal output for build progress.

use std::path::Path;

use console::{Style, Term};
use praxis_site::{BuildEvent, BuildReport};

/// Terminal output formatter.
pub(crate) struct Output {
    term: Term,
    green: Style,
    yellow: Style,
    red: Style,
    dim: Style,
}

impl Output {
    /// Create a new output formatter writing to stderr.
    #[must_use]
    pub(crate) fn new() -> Self {
        Self {
            term: Term::stderr(),
            green: Style::new().green(),
            yellow: Style::new().yellow(),
            red: Style::new().red(),
            dim: Style::new().dim(),
        }
    }

    /// Print one line per page written, asset copied or artifact skipped.
    pub(crate) fn event(&self, event: &BuildEvent) {
        let line = event_line(event);
        let styled = match event {
            BuildEvent::Skipped { .. } => self.yellow.apply_to(line).to_string(),
            BuildEvent::Written { .. } | BuildEvent::Copied { .. } => line,
        };
        let _ = self.term.write_line(&styled);
    }

    /// Print where the site went and how to look at it.
    pub(crate) fn summary(&self, report: &BuildReport) {
        let (built, serve) = summary_lines(&report.output_dir, report.pages_written);
        let _ = self.term.write_line("");
        let _ = self.term.write_line(&self.green.apply_to(built).to_string());
        let _ = self.term.write_line(&self.dim.apply_to(serve).to_string());
    }

    /// Print an error message (red).
    pub(crate) fn error(&self, msg: &str) {
        let _ = self.term.write_line(&self.red.apply_to(msg).to_string());
    }
}

fn event_line(event: &BuildEvent) -> String {
    match event {
        BuildEvent::Written { name } => format!("  {name}"),
        BuildEvent::Copied { name } => format!("  {name} (copied)"),
        BuildEvent::Skipped { name, reason } => format!("  SKIP {name} ({reason})"),
    }
}

fn summary_lines(output_dir: &Path, pages: usize) -> (String, String) {
    let dir = output_dir.display();
    (
        format!("Site built: {dir}/ ({pages} pages)"),
        format!("Serve with: python3 -m http.server -d {dir} 8000"),
    )
}
