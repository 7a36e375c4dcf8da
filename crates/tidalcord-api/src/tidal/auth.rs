use reqwest::Client;
use serde::Deserialize;

use super::error::TidalError;
use crate::traits::TokenProvider;

pub const TOKEN_URL: &str = "https://auth.tidal.com/v1/oauth2/token";

#[derive(Debug, Deserialize)]
pub struct TokenResponse {
    pub access_token: String,
    pub token_type: Option<String>,
    pub expires_in: Option<u64>,
}

/// OAuth2 client-credentials grant against the TIDAL auth server.
pub struct ClientCredentials {
    client_id: String,
    client_secret: String,
    token_url: String,
    http: Client,
}

impl ClientCredentials {
    pub fn new(client_id: String, client_secret: String) -> Self {
        Self::with_token_url(client_id, client_secret, TOKEN_URL)
    }

    pub fn with_token_url(
        client_id: String,
        client_secret: String,
        token_url: impl Into<String>,
    ) -> Self {
        Self {
            client_id,
            client_secret,
            token_url: token_url.into(),
            http: Client::new(),
        }
    }

    /// Exchange the client id and secret for a token.
    pub async fn request_token(&self) -> Result<TokenResponse, TidalError> {
        let resp = self
            .http
            .post(&self.token_url)
            .basic_auth(&self.client_id, Some(&self.client_secret))
            .form(&[("grant_type", "client_credentials")])
            .send()
            .await?;

        if !resp.status().is_success() {
            let status = resp.status().as_u16();
            let body = resp.text().await.unwrap_or_default();
            tracing::error!(status, "Token request rejected");
            return Err(TidalError::Api {
                status,
                message: body,
            });
        }

        let body = resp.text().await?;
        parse_token_response(&body)
    }
}

impl TokenProvider for ClientCredentials {
    async fn access_token(&self) -> Result<String, TidalError> {
        let token = self.request_token().await?;
        tracing::debug!(expires_in = ?token.expires_in, "Obtained access token");
        Ok(token.access_token)
    }
}

fn parse_token_response(body: &str) -> Result<TokenResponse, TidalError> {
    serde_json::from_str(body).map_err(|e| TidalError::Parse(e.to_string()))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_token_response() {
        let json = r#"{
            "scope": "",
            "token_type": "Bearer",
            "access_token": "eyJraWQiOiJ2OU1GbFhqWSIsImFsZyI6IkVTMjU2In0",
            "expires_in": 86400
        }"#;

        let token = parse_token_response(json).unwrap();
        assert_eq!(token.access_token, "eyJraWQiOiJ2OU1GbFhqWSIsImFsZyI6IkVTMjU2In0");
        assert_eq!(token.expires_in, Some(86400));
    }

    #[test]
    fn test_missing_access_token_is_parse_error() {
        let err = parse_token_response(r#"{"error": "invalid_client"}"#).unwrap_err();
        assert!(matches!(err, TidalError::Parse(_)));
    }

    #[test]
    fn test_malformed_body_is_parse_error() {
        let err = parse_token_response("<html>Bad Gateway</html>").unwrap_err();
        assert!(matches!(err, TidalError::Parse(_)));
    }
}
