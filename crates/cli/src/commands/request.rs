//! Authorized API requests through the session pipeline.

use nour_session::client::HttpTransport;
use nour_session::{ApiClient, ApiRequest, SessionConfig, SessionStore};

use super::CliError;

/// Send `method path` to the configured backend with the current credential.
///
/// A 401 reply logs out both roles in the shared store, exactly as in the
/// portal.
///
/// # Errors
///
/// Returns an error if the method or body is malformed, or the request fails.
pub async fn send(
    config: &SessionConfig,
    sessions: SessionStore,
    method: &str,
    path: &str,
    body: Option<&str>,
) -> Result<(), CliError> {
    let request = build_request(method, path, body)?;
    let client = ApiClient::new(HttpTransport::new(&config.api)?, sessions);

    tracing::info!(
        "{} {}{}",
        request.method,
        config.api.base_url,
        request.relative_path()
    );
    let response = client.send(request).await?;

    let text = String::from_utf8_lossy(&response.body);
    tracing::info!("{} {}", response.status, text);
    Ok(())
}

fn build_request(method: &str, path: &str, body: Option<&str>) -> Result<ApiRequest, CliError> {
    let method = method
        .to_ascii_uppercase()
        .parse()
        .map_err(|_| CliError::Method(method.to_string()))?;

    let mut request = ApiRequest::new(method, path);
    if let Some(body) = body {
        request = request.json(serde_json::from_str(body)?);
    }
    Ok(request)
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;

    #[test]
    fn test_build_request() {
        let request = build_request("post", "/donations", Some(r#"{"amount":"250.00"}"#)).unwrap();

        assert_eq!(request.method.as_str(), "POST");
        assert_eq!(request.relative_path(), "donations");
        assert_eq!(request.body.unwrap()["amount"], "250.00");
    }

    #[test]
    fn test_rejects_bad_input() {
        assert!(matches!(
            build_request("GET", "x", Some("{not json")),
            Err(CliError::Body(_))
        ));
        assert!(matches!(
            build_request("BAD METHOD", "x", None),
            Err(CliError::Method(_))
        ));
    }
}
