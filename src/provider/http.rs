//! Reqwest-backed identity provider speaking a JSON auth API.
//!
//! Endpoints follow the usual shape of hosted identity services: credential
//! verification and registration take an email/password document, password
//! recovery takes the email plus the callback URL to embed in the reset
//! link, and the session endpoint reports whether the current session is an
//! admin one. Failures carry a `message` field which is surfaced verbatim.

use anyhow::{anyhow, Result};
use async_trait::async_trait;
use reqwest::{Client, Response, StatusCode};
use serde::{Deserialize, Serialize};
use serde_json::Value;
use tracing::debug;
use url::Url;

use super::{IdentityProvider, ProviderError};

static APP_USER_AGENT: &str = concat!(env!("CARGO_PKG_NAME"), "/", env!("CARGO_PKG_VERSION"));

const LOGIN_ENDPOINT: &str = "/v1/auth/login";
const SIGNUP_ENDPOINT: &str = "/v1/auth/signup";
const RECOVER_ENDPOINT: &str = "/v1/auth/recover";
const SESSION_ENDPOINT: &str = "/v1/auth/session";

#[derive(Serialize, Debug)]
struct CredentialsRequest<'a> {
    email: &'a str,
    password: &'a str,
}

#[derive(Serialize, Debug)]
struct RecoverRequest<'a> {
    email: &'a str,
    redirect_to: &'a str,
}

#[derive(Deserialize, Debug, Default)]
struct SessionStatusResponse {
    #[serde(default)]
    is_admin: bool,
}

#[derive(Clone, Debug)]
pub struct HttpProvider {
    base: String,
    client: Client,
}

impl HttpProvider {
    /// # Errors
    /// Returns an error when the base URL has no host or an unsupported
    /// scheme, or when the HTTP client cannot be built.
    pub fn new(base_url: &str) -> Result<Self> {
        let url = Url::parse(base_url)?;

        let scheme = url.scheme();

        let host = url
            .host()
            .ok_or_else(|| anyhow!("Error parsing URL: no host specified"))?
            .to_owned();

        let port = match url.port() {
            Some(p) => p,
            None => match scheme {
                "http" => 80,
                "https" => 443,
                _ => return Err(anyhow!("Error parsing URL: unsupported scheme {}", scheme)),
            },
        };

        let base = format!("{scheme}://{host}:{port}");

        let client = Client::builder().user_agent(APP_USER_AGENT).build()?;

        Ok(Self { base, client })
    }

    fn endpoint_url(&self, endpoint: &str) -> String {
        format!("{}{endpoint}", self.base)
    }

    async fn post_json<T: Serialize>(
        &self,
        endpoint: &str,
        payload: &T,
    ) -> Result<(), ProviderError> {
        let url = self.endpoint_url(endpoint);
        let response = self
            .client
            .post(&url)
            .json(payload)
            .send()
            .await
            .map_err(transport_error)?;

        if response.status().is_success() {
            debug!(%url, "provider call settled");
            Ok(())
        } else {
            Err(rejection(response).await)
        }
    }
}

#[async_trait]
impl IdentityProvider for HttpProvider {
    async fn verify_credentials(&self, email: &str, password: &str) -> Result<(), ProviderError> {
        self.post_json(LOGIN_ENDPOINT, &CredentialsRequest { email, password })
            .await
    }

    async fn register_account(&self, email: &str, password: &str) -> Result<(), ProviderError> {
        self.post_json(SIGNUP_ENDPOINT, &CredentialsRequest { email, password })
            .await
    }

    async fn request_password_reset(
        &self,
        email: &str,
        callback_url: &str,
    ) -> Result<(), ProviderError> {
        self.post_json(
            RECOVER_ENDPOINT,
            &RecoverRequest {
                email,
                redirect_to: callback_url,
            },
        )
        .await
    }

    async fn session_is_admin(&self) -> Result<bool, ProviderError> {
        let url = self.endpoint_url(SESSION_ENDPOINT);
        let response = self.client.get(&url).send().await.map_err(transport_error)?;

        match response.status() {
            StatusCode::NO_CONTENT => Ok(false),
            status if status.is_success() => {
                let session: SessionStatusResponse =
                    response.json().await.map_err(|_| ProviderError::Unknown)?;
                Ok(session.is_admin)
            }
            _ => Err(rejection(response).await),
        }
    }
}

/// Extract the provider's failure message from an error response body.
async fn rejection(response: Response) -> ProviderError {
    let body: Value = response.json().await.unwrap_or(Value::Null);
    ProviderError::from_message(body["message"].as_str())
}

fn transport_error(err: reqwest::Error) -> ProviderError {
    ProviderError::Rejected {
        message: err.to_string(),
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;
    use anyhow::Result;
    use serde_json::json;
    use wiremock::matchers::{body_json, method, path};
    use wiremock::{Mock, MockServer, ResponseTemplate};

    #[test]
    fn base_url_requires_host_and_known_scheme() {
        assert!(HttpProvider::new("http://localhost:9999").is_ok());
        assert!(HttpProvider::new("file:///etc/passwd").is_err());
        assert!(HttpProvider::new("not a url").is_err());
    }

    #[tokio::test]
    async fn verify_credentials_posts_email_and_password() -> Result<()> {
        let server = MockServer::start().await;
        Mock::given(method("POST"))
            .and(path("/v1/auth/login"))
            .and(body_json(json!({
                "email": "user@example.com",
                "password": "hunter2"
            })))
            .respond_with(ResponseTemplate::new(200))
            .expect(1)
            .mount(&server)
            .await;

        let provider = HttpProvider::new(&server.uri())?;
        provider
            .verify_credentials("user@example.com", "hunter2")
            .await
            .unwrap();
        Ok(())
    }

    #[tokio::test]
    async fn failures_surface_the_provider_message() -> Result<()> {
        let server = MockServer::start().await;
        Mock::given(method("POST"))
            .and(path("/v1/auth/login"))
            .respond_with(
                ResponseTemplate::new(401)
                    .set_body_json(json!({ "message": "Invalid login credentials" })),
            )
            .mount(&server)
            .await;

        let provider = HttpProvider::new(&server.uri())?;
        let err = provider
            .verify_credentials("user@example.com", "wrong")
            .await
            .unwrap_err();
        assert_eq!(err.to_string(), "Invalid login credentials");
        Ok(())
    }

    #[tokio::test]
    async fn failures_without_a_message_become_unknown() -> Result<()> {
        let server = MockServer::start().await;
        Mock::given(method("POST"))
            .and(path("/v1/auth/signup"))
            .respond_with(ResponseTemplate::new(500))
            .mount(&server)
            .await;

        let provider = HttpProvider::new(&server.uri())?;
        let err = provider
            .register_account("user@example.com", "hunter2")
            .await
            .unwrap_err();
        assert_eq!(err, ProviderError::Unknown);
        Ok(())
    }

    #[tokio::test]
    async fn password_reset_carries_the_callback_url() -> Result<()> {
        let server = MockServer::start().await;
        Mock::given(method("POST"))
            .and(path("/v1/auth/recover"))
            .and(body_json(json!({
                "email": "user@example.com",
                "redirect_to": "https://shop.example/reset-password"
            })))
            .respond_with(ResponseTemplate::new(200))
            .expect(1)
            .mount(&server)
            .await;

        let provider = HttpProvider::new(&server.uri())?;
        provider
            .request_password_reset("user@example.com", "https://shop.example/reset-password")
            .await
            .unwrap();
        Ok(())
    }

    #[tokio::test]
    async fn session_flag_reads_from_the_session_endpoint() -> Result<()> {
        let server = MockServer::start().await;
        Mock::given(method("GET"))
            .and(path("/v1/auth/session"))
            .respond_with(ResponseTemplate::new(200).set_body_json(json!({ "is_admin": true })))
            .mount(&server)
            .await;

        let provider = HttpProvider::new(&server.uri())?;
        assert!(provider.session_is_admin().await.unwrap());
        Ok(())
    }

    #[tokio::test]
    async fn missing_session_reads_non_admin() -> Result<()> {
        let server = MockServer::start().await;
        Mock::given(method("GET"))
            .and(path("/v1/auth/session"))
            .respond_with(ResponseTemplate::new(204))
            .mount(&server)
            .await;

        let provider = HttpProvider::new(&server.uri())?;
        assert!(!provider.session_is_admin().await.unwrap());
        Ok(())
    }
}
