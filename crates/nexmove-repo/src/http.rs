//! reqwest client setup shared by the fetch, publish and delete steps

use std::time::Duration;

use crate::error::TransportError;

/// Build a client with a fixed timeout that never follows redirects.
///
/// Credentials are attached per request, so a redirect to another origin
/// would otherwise carry them along.
pub(crate) fn build_client(timeout: Duration) -> Result<reqwest::Client, TransportError> {
    reqwest::Client::builder()
        .redirect(reqwest::redirect::Policy::none())
        .timeout(timeout)
        .build()
        .map_err(|e| TransportError::Other {
            message: e.to_string(),
        })
}
