use crate::error::{LookupError, Result};
use reqwest::Client;
use serde::Deserialize;
use tracing::debug;

const API_KEY_FIELD: &str = "GOOGLE_API_KEY";
const TOKEN_HEADER: &str = "X-Aws-Parameters-Secrets-Token";

#[derive(Debug, Deserialize)]
struct SecretValue {
    #[serde(rename = "SecretString")]
    secret_string: Option<String>,
}

/// Reads secrets through the AWS Parameters and Secrets Lambda Extension,
/// which serves Secrets Manager over a local HTTP endpoint.
pub struct SecretsClient {
    client: Client,
    base_url: String,
    /// Only used in diagnostics. The extension resolves the region from the
    /// Lambda environment and takes no region parameter.
    region: String,
    session_token: Option<String>,
}

impl SecretsClient {
    pub fn new(
        client: Client,
        base_url: impl Into<String>,
        region: impl Into<String>,
        session_token: Option<String>,
    ) -> Self {
        Self {
            client,
            base_url: base_url.into(),
            region: region.into(),
            session_token,
        }
    }

    /// Fetches the Google API key stored under `secret_id`.
    pub async fn google_api_key(&self, secret_id: &str) -> Result<String> {
        let url = format!("{}/secretsmanager/get", self.base_url.trim_end_matches('/'));
        debug!("Fetching secret {} in {}", secret_id, self.region);

        let mut request = self.client.get(&url).query(&[("secretId", secret_id)]);
        if let Some(token) = &self.session_token {
            request = request.header(TOKEN_HEADER, token);
        }

        let response = request
            .send()
            .await?
            .error_for_status()
            .map_err(|e| LookupError::Credential(format!("secret store request failed: {}", e)))?;
        let value: SecretValue = response.json().await?;

        extract_api_key(value.secret_string.as_deref())
    }
}

fn extract_api_key(secret_string: Option<&str>) -> Result<String> {
    let secret_string = secret_string
        .ok_or_else(|| LookupError::Credential("secret has no SecretString".to_string()))?;
    let json: serde_json::Value = serde_json::from_str(secret_string)
        .map_err(|e| LookupError::Credential(format!("secret is not valid JSON: {}", e)))?;

    json.get(API_KEY_FIELD)
        .and_then(|k| k.as_str())
        .filter(|k| !k.is_empty())
        .map(str::to_string)
        .ok_or_else(|| LookupError::Credential(format!("Missing {} in secret", API_KEY_FIELD)))
}

#[cfg(test)]
mod tests {
    use super::*;
    use mockito::Matcher;

    #[test]
    fn test_extract_api_key() {
        let key = extract_api_key(Some(r#"{"GOOGLE_API_KEY":"k-123","other":1}"#)).unwrap();
        assert_eq!(key, "k-123");
    }

    #[test]
    fn test_extract_api_key_failures() {
        assert!(matches!(extract_api_key(None), Err(LookupError::Credential(_))));
        assert!(matches!(extract_api_key(Some("not json")), Err(LookupError::Credential(_))));
        assert!(matches!(extract_api_key(Some("{}")), Err(LookupError::Credential(_))));
        assert!(matches!(
            extract_api_key(Some(r#"{"GOOGLE_API_KEY":""}"#)),
            Err(LookupError::Credential(_))
        ));
    }

    #[tokio::test]
    async fn test_fetches_key_from_extension() {
        let mut server = mockito::Server::new_async().await;
        let mock = server
            .mock("GET", "/secretsmanager/get")
            .match_query(Matcher::UrlEncoded("secretId".into(), "google/places".into()))
            .match_header(TOKEN_HEADER, "session-token")
            .with_status(200)
            .with_header("content-type", "application/json")
            .with_body(r#"{"Name":"google/places","SecretString":"{\"GOOGLE_API_KEY\":\"abc\"}"}"#)
            .create_async()
            .await;

        let secrets = SecretsClient::new(
            Client::new(),
            server.url(),
            "sa-east-1",
            Some("session-token".to_string()),
        );
        let key = secrets.google_api_key("google/places").await.unwrap();

        assert_eq!(key, "abc");
        mock.assert_async().await;
    }

    #[tokio::test]
    async fn test_extension_error_is_credential_error() {
        let mut server = mockito::Server::new_async().await;
        let _mock = server
            .mock("GET", "/secretsmanager/get")
            .match_query(Matcher::Any)
            .with_status(400)
            .with_body("secret not found")
            .create_async()
            .await;

        let secrets = SecretsClient::new(Client::new(), server.url(), "sa-east-1", None);
        let err = secrets.google_api_key("missing").await.unwrap_err();

        assert!(matches!(err, LookupError::Credential(_)));
    }

    #[tokio::test]
    async fn test_region_is_not_part_of_the_request() {
        let mut server = mockito::Server::new_async().await;
        let mock = server
            .mock("GET", "/secretsmanager/get")
            .match_query(Matcher::Exact("secretId=google%2Fplaces".to_string()))
            .with_status(200)
            .with_body(r#"{"SecretString":"{\"GOOGLE_API_KEY\":\"abc\"}"}"#)
            .expect(2)
            .create_async()
            .await;

        for region in ["sa-east-1", "eu-west-1"] {
            let secrets = SecretsClient::new(Client::new(), server.url(), region, None);
            assert_eq!(secrets.google_api_key("google/places").await.unwrap(), "abc");
        }

        mock.assert_async().await;
    }
}
