use std::io::Write;

use crate::traits::Reporter;

/// Reports through GitHub Actions workflow commands.
///
/// See <https://docs.github.com/en/actions/using-workflows/workflow-commands-for-github-actions>
pub(crate) struct ActionsReporter<W> {
    out: W,
}

impl<W: Write> ActionsReporter<W> {
    pub(crate) fn new(out: W) -> Self {
        Self { out }
    }
}

impl<W: Write> Reporter for ActionsReporter<W> {
    fn info(&mut self, message: &str) {
        if let Err(e) = writeln!(self.out, "{message}") {
            tracing::warn!("Failed to write log line: {e}");
        }
    }

    fn fail(&mut self, message: &str) {
        if let Err(e) = writeln!(self.out, "::error::{}", escape_data(message)) {
            tracing::error!("Failed to report failure ({e}): {message}");
        }
    }
}

fn escape_data(message: &str) -> String {
    message
        .replace('%', "%25")
        .replace('\r', "%0D")
        .replace('\n', "%0A")
}

/// Sends everything to the tracing subscriber, for the webhook server.
#[derive(Debug, Default)]
pub(crate) struct TracingReporter;

impl Reporter for TracingReporter {
    fn info(&mut self, message: &str) {
        tracing::info!("{message}");
    }

    fn fail(&mut self, message: &str) {
        tracing::error!("{message}");
    }
}
