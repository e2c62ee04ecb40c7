use std::time::Duration;

use anyhow::Chain;
use itertools::Itertools;

/// Everything that can go wrong while refreshing the daily usage.
///
/// None of these crosses the [`crate::core::Refresher`] boundary: they are logged and turned into
/// a failed [`crate::core::Refresh`].
#[derive(Debug, thiserror::Error)]
pub enum RefreshError {
    #[error("failed to build the HTTP client")]
    Client(#[source] reqwest::Error),

    #[error("`{method} {url}` failed")]
    Transport {
        method: &'static str,
        url: String,

        #[source]
        source: reqwest::Error,
    },

    #[error("unable to scan `{scope}`: {reason}")]
    Markup { scope: String, reason: String },

    #[error("failed to deserialize the report")]
    Deserialize(#[from] serde_json::Error),

    #[error("unexpected report shape: {0}")]
    UnexpectedShape(&'static str),

    #[error("timed out after {0:?}")]
    Timeout(Duration),
}

impl RefreshError {
    /// Short machine-friendly error kind for the logs and the status.
    #[must_use]
    pub const fn kind(&self) -> &'static str {
        match self {
            Self::Client(_) | Self::Transport { .. } => "transport",
            Self::Markup { .. } => "markup",
            Self::Deserialize(_) | Self::UnexpectedShape(_) => "report",
            Self::Timeout(_) => "timeout",
        }
    }

    /// The error together with its sources, the way `anyhow` prints `{:#}`.
    #[must_use]
    pub fn report(&self) -> String {
        Chain::new(self).join(": ")
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_timeout_message() {
        let error = RefreshError::Timeout(Duration::from_secs(5));
        assert_eq!(error.to_string(), "timed out after 5s");
        assert_eq!(error.kind(), "timeout");
    }

    #[test]
    fn test_report_includes_sources() {
        let error = RefreshError::from(serde_json::from_str::<u32>("").unwrap_err());
        let report = error.report();
        assert!(report.starts_with("failed to deserialize the report: "), "{report}");
        assert!(report.len() > error.to_string().len() + 2);
    }

    #[test]
    fn test_report_kind() {
        assert_eq!(RefreshError::UnexpectedShape("no datasets").kind(), "report");
    }
}
