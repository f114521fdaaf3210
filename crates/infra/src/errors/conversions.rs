//! Conversions from external infrastructure errors into domain errors.

use daasgateway_domain::GatewayError;
use reqwest::Error as HttpError;

/// Error newtype that keeps conversions on the infrastructure side and can be
/// converted back into the domain error.
#[derive(Debug)]
pub struct InfraError(pub GatewayError);

impl From<InfraError> for GatewayError {
    fn from(value: InfraError) -> Self {
        value.0
    }
}

impl From<GatewayError> for InfraError {
    fn from(value: GatewayError) -> Self {
        InfraError(value)
    }
}

/* -------------------------------------------------------------------------- */
/* reqwest::Error → GatewayError */
/* -------------------------------------------------------------------------- */

/// Describe a transport fault for the `detail` of a request error.
pub fn describe_transport_error(err: &HttpError) -> String {
    if err.is_timeout() {
        return format!("HTTP request timed out: {err}");
    }

    #[cfg(not(target_arch = "wasm32"))]
    if err.is_connect() {
        return format!("HTTP connection failure: {err}");
    }

    if err.is_decode() {
        return format!("HTTP response body could not be decoded: {err}");
    }

    err.to_string()
}

impl InfraError {
    /// Map a reqwest failure of `operation_message` into a request error.
    ///
    /// Transport faults carry no status; status errors keep theirs.
    pub fn from_transport(operation_message: &str, err: &HttpError) -> Self {
        let status = err.status().map(|s| s.as_u16());
        InfraError(
            GatewayError::request(operation_message, status)
                .with_detail(describe_transport_error(err)),
        )
    }

    /// Same as [`InfraError::from_transport`] for identity provider calls.
    pub fn auth_transport(operation_message: &str, err: &HttpError) -> Self {
        let status = err.status().map(|s| s.as_u16());
        InfraError(GatewayError::auth(
            format!("{operation_message}: {}", describe_transport_error(err)),
            status,
        ))
    }
}

/// Build failures of the reqwest client itself are configuration problems.
impl From<HttpError> for InfraError {
    fn from(value: HttpError) -> Self {
        InfraError(GatewayError::Config(format!(
            "HTTP client error: {}",
            describe_transport_error(&value)
        )))
    }
}

/* -------------------------------------------------------------------------- */
/* Tests */
/* -------------------------------------------------------------------------- */

#[cfg(test)]
mod tests {
    use std::net::TcpListener;

    use reqwest::{Client, StatusCode};
    use wiremock::matchers::method;
    use wiremock::{Mock, MockServer, ResponseTemplate};

    use super::*;

    #[tokio::test]
    async fn connection_refused_maps_to_request_error_without_status() {
        let listener = TcpListener::bind("127.0.0.1:0").unwrap();
        let addr = listener.local_addr().unwrap();
        drop(listener);

        let client = Client::builder().no_proxy().build().unwrap();
        let error = client.get(format!("http://{addr}")).send().await.unwrap_err();

        let mapped: GatewayError =
            InfraError::from_transport("Failed to create orders.", &error).into();
        match mapped {
            GatewayError::Request { message, status, detail } => {
                assert_eq!(message, "Failed to create orders.");
                assert_eq!(status, None);
                assert!(detail.unwrap().to_lowercase().contains("connection"));
            }
            other => panic!("expected request error, got {other:?}"),
        }
    }

    #[tokio::test]
    async fn status_error_keeps_status() {
        let server = MockServer::start().await;
        Mock::given(method("GET"))
            .respond_with(ResponseTemplate::new(StatusCode::UNAUTHORIZED))
            .mount(&server)
            .await;

        let client = Client::builder().no_proxy().build().unwrap();
        let error = client.get(server.uri()).send().await.unwrap().error_for_status().unwrap_err();

        let mapped: GatewayError =
            InfraError::auth_transport("Failed to login to Cognito", &error).into();
        assert!(mapped.is_auth());
        assert_eq!(mapped.status_code(), Some(401));
    }
}
