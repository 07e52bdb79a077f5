use reqwest::RequestBuilder;
use serde_json::Value;
use tracing::debug;

/// Reads a JSON field as trimmed non-empty text; providers routinely send
/// empty strings where they mean "absent".
pub(crate) fn non_empty(value: Option<&Value>) -> Option<String> {
    value
        .and_then(Value::as_str)
        .map(str::trim)
        .filter(|text| !text.is_empty())
        .map(str::to_string)
}

/// Sends a provider request and parses the body as JSON. Network errors,
/// non-2xx statuses, and malformed bodies all collapse to `None`; the caller
/// decides which fallback tier engages next.
pub(crate) async fn fetch_json(request: RequestBuilder) -> Option<Value> {
    match request.send().await {
        Ok(response) if response.status().is_success() => {
            match response.json::<Value>().await {
                Ok(payload) => Some(payload),
                Err(error) => {
                    debug!(error = %error, "provider body was not valid JSON");
                    None
                }
            }
        }
        Ok(response) => {
            debug!(status = %response.status(), "provider returned non-success status");
            None
        }
        Err(error) => {
            debug!(error = %error, "provider request failed");
            None
        }
    }
}
