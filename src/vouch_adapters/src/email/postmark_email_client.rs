use reqwest::{Client, Url};
use secrecy::{ExposeSecret, Secret};

use vouch_core::{Email, EmailClient};

/// Postmark-backed mailer. Injected at bootstrap; the HTTP client, sender
/// address, and server token are owned by the process, never module state.
#[derive(Clone)]
pub struct PostmarkEmailClient {
    http_client: Client,
    base_url: String,
    sender: Email,
    authorization_token: Secret<String>,
}

impl PostmarkEmailClient {
    pub fn new(
        base_url: String,
        sender: Email,
        authorization_token: Secret<String>,
        http_client: Client,
    ) -> Self {
        Self {
            http_client,
            base_url,
            sender,
            authorization_token,
        }
    }
}

#[async_trait::async_trait]
impl EmailClient for PostmarkEmailClient {
    #[tracing::instrument(name = "Sending email", skip_all)]
    async fn send_email(
        &self,
        recipient: &Email,
        subject: &str,
        content: &str,
    ) -> Result<(), String> {
        let base = Url::parse(&self.base_url).map_err(|e| e.to_string())?;
        let url = base.join("/email").map_err(|e| e.to_string())?;

        let request_body = SendEmailRequest {
            from: self.sender.as_str(),
            to: recipient.as_str(),
            subject,
            html_body: content,
            text_body: content,
            message_stream: MESSAGE_STREAM,
        };

        let request = self
            .http_client
            .post(url)
            .header(
                POSTMARK_AUTH_HEADER,
                self.authorization_token.expose_secret(),
            )
            .json(&request_body);

        request
            .send()
            .await
            .map_err(|e| e.to_string())?
            .error_for_status()
            .map_err(|e| e.to_string())?;

        Ok(())
    }
}

const MESSAGE_STREAM: &str = "outbound";
const POSTMARK_AUTH_HEADER: &str = "X-Postmark-Server-Token";

#[derive(serde::Serialize, Debug)]
#[serde(rename_all = "PascalCase")]
struct SendEmailRequest<'a> {
    from: &'a str,
    to: &'a str,
    subject: &'a str,
    html_body: &'a str,
    text_body: &'a str,
    message_stream: &'a str,
}

#[cfg(test)]
mod tests {
    use super::*;
    use wiremock::matchers::{header_exists, method, path};
    use wiremock::{Mock, MockServer, ResponseTemplate};

    fn email(raw: &str) -> Email {
        Email::try_from(Secret::from(raw.to_string())).unwrap()
    }

    fn client(base_url: String) -> PostmarkEmailClient {
        PostmarkEmailClient::new(
            base_url,
            email("sender@example.com"),
            Secret::from("server-token".to_string()),
            Client::new(),
        )
    }

    #[tokio::test]
    async fn posts_to_the_email_endpoint_with_the_auth_header() {
        let server = MockServer::start().await;
        Mock::given(method("POST"))
            .and(path("/email"))
            .and(header_exists(POSTMARK_AUTH_HEADER))
            .respond_with(ResponseTemplate::new(200))
            .expect(1)
            .mount(&server)
            .await;

        let result = client(server.uri())
            .send_email(&email("alice@example.com"), "Subject", "Body")
            .await;

        assert!(result.is_ok());
    }

    #[tokio::test]
    async fn server_errors_surface_as_delivery_faults() {
        let server = MockServer::start().await;
        Mock::given(method("POST"))
            .and(path("/email"))
            .respond_with(ResponseTemplate::new(500))
            .mount(&server)
            .await;

        let result = client(server.uri())
            .send_email(&email("alice@example.com"), "Subject", "Body")
            .await;

        assert!(result.is_err());
    }
}
