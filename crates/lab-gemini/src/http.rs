//! Status classification for generation responses.

use crate::error::GenerationError;

/// Markers the service puts in bodies that reject a key, whatever the status.
const KEY_MARKERS: [&str; 2] = ["API key", "API_KEY"];

/// Check a response from `model`, mapping failures to [`GenerationError`].
///
/// Returns the response unchanged on success.
pub async fn check_response(
    model: &str,
    resp: reqwest::Response,
) -> Result<reqwest::Response, GenerationError> {
    if resp.status().is_success() {
        return Ok(resp);
    }
    let status = resp.status().as_u16();
    let retry_after = parse_retry_after(&resp);
    let body = resp.text().await.unwrap_or_default();
    Err(classify(model, status, retry_after, &body))
}

/// Map a non-success status and body to an error.
///
/// 404 and 429 are checked first so the fallback walk keeps going even if a
/// body happens to mention keys.
pub fn classify(model: &str, status: u16, retry_after: Option<u64>, body: &str) -> GenerationError {
    match status {
        404 => GenerationError::ModelNotFound {
            model: model.to_string(),
        },
        429 => GenerationError::RateLimited {
            model: model.to_string(),
            retry_after_secs: retry_after,
        },
        401 | 403 => GenerationError::Authorization {
            status,
            message: body.to_string(),
        },
        _ if KEY_MARKERS.iter().any(|marker| body.contains(marker)) => {
            GenerationError::Authorization {
                status,
                message: body.to_string(),
            }
        }
        _ => GenerationError::Api {
            status,
            message: body.to_string(),
        },
    }
}

fn parse_retry_after(resp: &reqwest::Response) -> Option<u64> {
    resp.headers()
        .get(reqwest::header::RETRY_AFTER)
        .and_then(|v| v.to_str().ok())
        .and_then(|v| v.parse::<u64>().ok())
}
