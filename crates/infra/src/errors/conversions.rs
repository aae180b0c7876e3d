//! Conversions from external infrastructure errors into domain errors.

use reqwest::Error as HttpError;
use tenantshift_domain::TenantShiftError;

/// Error newtype that keeps conversions on the infrastructure side and can be
/// converted back into the domain error.
#[derive(Debug)]
pub struct InfraError(pub TenantShiftError);

impl From<InfraError> for TenantShiftError {
    fn from(value: InfraError) -> Self {
        value.0
    }
}

impl From<TenantShiftError> for InfraError {
    fn from(value: TenantShiftError) -> Self {
        InfraError(value)
    }
}

/// Extension trait to make the conversion logic explicit in tests and within
/// this module.
trait IntoTenantShiftError {
    fn into_tenantshift(self) -> TenantShiftError;
}

/* -------------------------------------------------------------------------- */
/* reqwest::Error → TenantShiftError */
/* -------------------------------------------------------------------------- */

impl IntoTenantShiftError for HttpError {
    fn into_tenantshift(self) -> TenantShiftError {
        if self.is_timeout() {
            return TenantShiftError::Network("HTTP request timed out".into());
        }

        if self.is_connect() {
            return TenantShiftError::Network("HTTP connection failure".into());
        }

        if let Some(status) = self.status() {
            let code = status.as_u16();
            let message =
                format!("HTTP {} {}", code, status.canonical_reason().unwrap_or("unknown status"));

            return match code {
                401 | 403 => TenantShiftError::Auth(message),
                404 => TenantShiftError::NotFound(message),
                429 => TenantShiftError::Network(message),
                400..=499 => TenantShiftError::InvalidInput(message),
                500..=599 => TenantShiftError::Network(message),
                _ => TenantShiftError::Network(message),
            };
        }

        TenantShiftError::Network(self.to_string())
    }
}

impl From<HttpError> for InfraError {
    fn from(value: HttpError) -> Self {
        InfraError(value.into_tenantshift())
    }
}

/* -------------------------------------------------------------------------- */
/* Tests */
/* -------------------------------------------------------------------------- */

#[cfg(test)]
mod tests {
    use reqwest::{Client, StatusCode};
    use wiremock::matchers::method;
    use wiremock::{Mock, MockServer, ResponseTemplate};

    use super::*;

    #[tokio::test]
    async fn http_status_401_maps_to_auth_error() {
        let server = MockServer::start().await;
        Mock::given(method("GET"))
            .respond_with(ResponseTemplate::new(StatusCode::UNAUTHORIZED))
            .mount(&server)
            .await;

        let client = Client::builder().no_proxy().build().unwrap();
        let error = client.get(server.uri()).send().await.unwrap().error_for_status().unwrap_err();

        let mapped: TenantShiftError = InfraError::from(error).into();
        match mapped {
            TenantShiftError::Auth(msg) => assert!(msg.contains("401")),
            other => panic!("expected auth error, got {:?}", other),
        }
    }

    #[tokio::test]
    async fn http_status_500_maps_to_network_error() {
        let server = MockServer::start().await;
        Mock::given(method("GET"))
            .respond_with(ResponseTemplate::new(StatusCode::INTERNAL_SERVER_ERROR))
            .mount(&server)
            .await;

        let client = Client::builder().no_proxy().build().unwrap();
        let error = client.get(server.uri()).send().await.unwrap().error_for_status().unwrap_err();

        let mapped: TenantShiftError = InfraError::from(error).into();
        match mapped {
            TenantShiftError::Network(msg) => assert!(msg.contains("500")),
            other => panic!("expected network error, got {:?}", other),
        }
    }

    #[tokio::test]
    async fn connection_refused_maps_to_network_error() {
        let listener = std::net::TcpListener::bind("127.0.0.1:0").unwrap();
        let addr = listener.local_addr().unwrap();
        drop(listener); // release the port so the request fails with ECONNREFUSED

        let client = Client::builder().no_proxy().build().unwrap();
        let error = client.get(format!("http://{}", addr)).send().await.unwrap_err();

        let mapped: TenantShiftError = InfraError::from(error).into();
        assert!(matches!(mapped, TenantShiftError::Network(_)));
    }
}
