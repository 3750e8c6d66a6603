use crate::domain::error::DomainError;
use crate::domain::ports::notifier::{Notification, Notifier};
use async_trait::async_trait;
use reqwest::Client;
use serde::Serialize;

const FROM_EMAIL: &str = "notifications@auction_hunter";
const FROM_NAME: &str = "auction_hunter";

/// Sends the notification as an HTML email through SendGrid's v3 API.
pub struct SendGridNotifier {
    client: Client,
    api_key: String,
    to_email: String,
    base_url: String,
}

#[derive(Serialize)]
struct MailRequest<'a> {
    personalizations: Vec<Personalization<'a>>,
    from: Address<'a>,
    subject: String,
    content: Vec<Content>,
}

#[derive(Serialize)]
struct Personalization<'a> {
    to: Vec<Address<'a>>,
}

#[derive(Serialize)]
struct Address<'a> {
    email: &'a str,
    #[serde(skip_serializing_if = "Option::is_none")]
    name: Option<&'a str>,
}

#[derive(Serialize)]
struct Content {
    #[serde(rename = "type")]
    kind: &'static str,
    value: String,
}

impl SendGridNotifier {
    pub fn new(api_key: String, to_email: String, base_url: Option<String>) -> Self {
        Self {
            client: Client::new(),
            api_key,
            to_email,
            base_url: base_url.unwrap_or_else(|| "https://api.sendgrid.com".to_string()),
        }
    }

    fn request<'a>(&'a self, notification: &Notification) -> MailRequest<'a> {
        MailRequest {
            personalizations: vec![Personalization {
                to: vec![Address {
                    email: &self.to_email,
                    name: None,
                }],
            }],
            from: Address {
                email: FROM_EMAIL,
                name: Some(FROM_NAME),
            },
            subject: format!("{} notification", notification.label),
            content: vec![Content {
                kind: "text/html",
                value: html_body(notification),
            }],
        }
    }
}

pub fn html_body(notification: &Notification) -> String {
    format!(
        "<h2>auction_hunter is notifying you: <br/> <a href=\"{}\">{}</a>.</h2>",
        notification.url, notification.message
    )
}

#[async_trait]
impl Notifier for SendGridNotifier {
    fn name(&self) -> &str {
        "sendgrid"
    }

    async fn notify(&self, notification: &Notification) -> Result<(), DomainError> {
        let url = format!("{}/v3/mail/send", self.base_url);

        let resp = self
            .client
            .post(&url)
            .bearer_auth(&self.api_key)
            .json(&self.request(notification))
            .send()
            .await
            .map_err(|e| DomainError::Notification(format!("SendGrid API error: {e}")))?;

        let status = resp.status();
        if !status.is_success() {
            let body = resp.text().await.unwrap_or_default();
            return Err(DomainError::Notification(format!(
                "SendGrid API {status}: {body}"
            )));
        }
        tracing::debug!(%status, to = %self.to_email, "SendGrid accepted notification");
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_request_shape() {
        let notifier = SendGridNotifier::new("key".into(), "me@example.com".into(), None);
        let n = Notification {
            label: "fire-crystal".into(),
            url: "https://www.ffxiah.com/item/4096/fire-crystal".into(),
            message: "There are 0 fire-crystal up for sale".into(),
        };
        let json = serde_json::to_value(notifier.request(&n)).unwrap();
        assert_eq!(json["subject"], "fire-crystal notification");
        assert_eq!(json["personalizations"][0]["to"][0]["email"], "me@example.com");
        assert_eq!(json["from"]["name"], "auction_hunter");
        assert_eq!(json["content"][0]["type"], "text/html");
        assert!(json["content"][0]["value"]
            .as_str()
            .unwrap()
            .contains("<a href=\"https://www.ffxiah.com/item/4096/fire-crystal\">There are 0"));
    }
}
