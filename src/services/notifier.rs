use crate::services::traits::Notifier;
use async_trait::async_trait;
use reqwest::Client;
use serde::{Deserialize, Serialize};
use serde_json::{json, Value};
use std::time::Duration;
use thiserror::Error;

/// Errors that can occur when delivering a message
#[derive(Debug, Error)]
pub enum NotifyError {
    #[error("HTTP request failed: {0}")]
    RequestError(#[from] reqwest::Error),

    #[error("Email function returned error: {0}")]
    Rejected(String),

    #[error("No recipient address")]
    MissingRecipient,
}

/// A templated message handed to the email function
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct OutboundMessage {
    pub to: String,
    pub subject: String,
    pub template: String,
    pub data: Value,
}

/// Location details shared by both lead templates
#[derive(Debug, Clone)]
pub struct LeadContext<'a> {
    pub city_name: &'a str,
    pub city_slug: &'a str,
    pub state_name: &'a str,
    pub state_slug: &'a str,
    pub couple_name: Option<&'a str>,
    pub couple_email: &'a str,
    pub message: &'a str,
}

pub const PROVIDER_TEMPLATE: &str = "inquiry_to_provider";
pub const CONFIRMATION_TEMPLATE: &str = "inquiry_confirmation";

impl OutboundMessage {
    /// Lead notification for one professional
    pub fn inquiry_to_provider(
        to: &str,
        provider_first_name: Option<&str>,
        ctx: &LeadContext<'_>,
        dashboard_url: &str,
    ) -> Self {
        Self {
            to: to.to_string(),
            subject: format!("New Inquiry from a Couple in {}", ctx.city_name),
            template: PROVIDER_TEMPLATE.to_string(),
            data: json!({
                "providerName": provider_first_name.unwrap_or("there"),
                "city": ctx.city_name,
                "state": ctx.state_name,
                "coupleName": ctx.couple_name.unwrap_or("A couple"),
                "coupleEmail": ctx.couple_email,
                "message": ctx.message,
                "dashboardUrl": dashboard_url,
            }),
        }
    }

    /// Confirmation sent to the couple after distribution
    pub fn inquiry_confirmation(ctx: &LeadContext<'_>, provider_count: usize) -> Self {
        Self {
            to: ctx.couple_email.to_string(),
            subject: format!("Your Inquiry Has Been Sent to {} Counselors", provider_count),
            template: CONFIRMATION_TEMPLATE.to_string(),
            data: json!({
                "coupleName": ctx.couple_name.unwrap_or("there"),
                "providerCount": provider_count,
                "city": ctx.city_name,
                "state": ctx.state_name,
                "stateSlug": ctx.state_slug,
                "citySlug": ctx.city_slug,
            }),
        }
    }
}

/// Client for the hosted `send-email` function
pub struct EmailFunctionClient {
    endpoint: String,
    api_key: String,
    client: Client,
}

impl EmailFunctionClient {
    pub fn new(functions_url: &str, api_key: String, timeout: Duration) -> Result<Self, NotifyError> {
        let client = Client::builder().timeout(timeout).build()?;

        Ok(Self {
            endpoint: format!("{}/send-email", functions_url.trim_end_matches('/')),
            api_key,
            client,
        })
    }
}

#[async_trait]
impl Notifier for EmailFunctionClient {
    async fn send(&self, message: &OutboundMessage) -> Result<(), NotifyError> {
        if message.to.trim().is_empty() {
            return Err(NotifyError::MissingRecipient);
        }

        let response = self
            .client
            .post(&self.endpoint)
            .header("Authorization", format!("Bearer {}", self.api_key))
            .json(message)
            .send()
            .await?;

        if !response.status().is_success() {
            let status = response.status();
            let body = response.text().await.unwrap_or_default();
            return Err(NotifyError::Rejected(format!("{} {}", status, body)));
        }

        tracing::debug!("Sent {} message", message.template);
        Ok(())
    }
}

/// Development notifier that only logs messages
#[derive(Debug, Default)]
pub struct LogNotifier;

#[async_trait]
impl Notifier for LogNotifier {
    async fn send(&self, message: &OutboundMessage) -> Result<(), NotifyError> {
        tracing::info!(
            to = %message.to,
            template = %message.template,
            "Email delivery disabled, logging message: {}",
            message.subject
        );
        Ok(())
    }
}
