use async_trait::async_trait;
use reqwest::{Client, StatusCode};
use serde::Serialize;
use tracing::info;

use crate::config::EmailSettings;
use super::{InquiryRequest, TemplateKind, TemplateParams};

#[derive(Debug, thiserror::Error)]
pub enum EmailError {
  #[error("could not reach the email service: {0}")]
  Transport(#[from] reqwest::Error),

  #[error("email service refused the message ({status}): {body}")]
  Rejected { status: StatusCode, body: String }
}

/// Transactional email: takes a template and its parameters, says yes or no
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait EmailService: Send + Sync {
  async fn send(&self, request: &InquiryRequest) -> Result<(), EmailError>;
}

/// `EmailService` backed by the EmailJS REST endpoint
#[derive(Debug, Clone)]
pub struct EmailJsClient {
  client: Client,
  settings: EmailSettings
}

#[derive(Serialize)]
struct SendBody<'a> {
  service_id: &'a str,
  template_id: &'a str,
  user_id: &'a str,
  template_params: &'a TemplateParams
}

impl EmailJsClient {
  pub fn new(settings: EmailSettings) -> Self {
    EmailJsClient { client: Client::new(), settings }
  }

  fn template_id(&self, kind: TemplateKind) -> &str {
    match kind {
      TemplateKind::Contact => &self.settings.contact_template_id,
      TemplateKind::Checkout => &self.settings.checkout_template_id
    }
  }
}

#[async_trait]
impl EmailService for EmailJsClient {
  async fn send(&self, request: &InquiryRequest) -> Result<(), EmailError> {
    let template_id = self.template_id(request.template);
    let body = SendBody {
      service_id: &self.settings.service_id,
      template_id,
      user_id: &self.settings.public_key,
      template_params: &request.params
    };

    let response = self.client
      .post(&self.settings.endpoint)
      .json(&body)
      .send()
      .await?;

    let status = response.status();
    if !status.is_success() {
      let body = response.text().await.unwrap_or_default();
      return Err(EmailError::Rejected { status, body });
    }

    info!(%template_id, "inquiry email accepted");
    Ok(())
  }
}

#[cfg(test)]
mod tests {
  use super::*;

  fn settings() -> EmailSettings {
    EmailSettings {
      endpoint: "https://api.emailjs.com/api/v1.0/email/send".into(),
      service_id: "service_gmpol".into(),
      contact_template_id: "template_contact".into(),
      checkout_template_id: "template_checkout".into(),
      public_key: "pk_123".into(),
      sales_inbox: "info@gmpol.com".into()
    }
  }

  #[test]
  fn picks_template_by_kind() {
    let client = EmailJsClient::new(settings());
    assert_eq!(client.template_id(TemplateKind::Contact), "template_contact");
    assert_eq!(client.template_id(TemplateKind::Checkout), "template_checkout");
  }

  #[test]
  fn body_has_the_emailjs_shape() {
    let mut params = TemplateParams::new();
    params.insert("from_name".into(), "Sana".into());

    let body = SendBody { service_id: "s", template_id: "t", user_id: "u", template_params: &params };

    assert_eq!(
      serde_json::to_value(&body).unwrap(),
      serde_json::json!({ "service_id": "s", "template_id": "t", "user_id": "u", "template_params": { "from_name": "Sana" } })
    );
  }
}
