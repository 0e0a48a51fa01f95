//! Delivery of contact-form messages.

use std::{sync::Arc, time::Duration};

use futures::future::BoxFuture;
use serde::Serialize;
use tracing::{debug, info};

use crate::{config::RelayConfig, error::SendError};

/// Template variables handed to the relay.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct TemplateParams {
    pub from_name: String,
    pub from_email: String,
    pub phone: String,
    pub subject: String,
    pub message: String,
    pub to_name: String,
}

/// External collaborator that delivers a message or rejects it.
pub trait NotificationSender: Send + Sync {
    fn send(&self, params: TemplateParams) -> BoxFuture<'static, Result<(), SendError>>;
}

/// Upper bound on one relay request, connect to last body byte.
const REQUEST_TIMEOUT: Duration = Duration::from_secs(15);

/// Relay compatible with the EmailJS REST API.
pub struct EmailRelay {
    client: reqwest::Client,
    config: Arc<RelayConfig>,
}

#[derive(Serialize)]
struct RelayRequest<'a> {
    service_id: &'a str,
    template_id: &'a str,
    user_id: &'a str,
    template_params: &'a TemplateParams,
}

impl EmailRelay {
    /// Fails with [`SendError::NotConfigured`] when a credential is blank.
    pub fn new(config: RelayConfig) -> Result<Self, SendError> {
        Self::with_timeout(config, REQUEST_TIMEOUT)
    }

    /// A relay that gives up on requests after `timeout`; the send then
    /// fails with [`SendError::Network`].
    fn with_timeout(config: RelayConfig, timeout: Duration) -> Result<Self, SendError> {
        if [&config.service_id, &config.template_id, &config.public_key]
            .iter()
            .any(|value| value.trim().is_empty())
        {
            return Err(SendError::NotConfigured);
        }
        let client = reqwest::Client::builder()
            .user_agent(concat!("portfolio-tui/", env!("CARGO_PKG_VERSION")))
            .timeout(timeout)
            .build()
            .map_err(|e| SendError::Network(e.to_string()))?;
        Ok(Self {
            client,
            config: Arc::new(config),
        })
    }
}

impl NotificationSender for EmailRelay {
    fn send(&self, params: TemplateParams) -> BoxFuture<'static, Result<(), SendError>> {
        let client = self.client.clone();
        let config = Arc::clone(&self.config);
        Box::pin(async move {
            let body = RelayRequest {
                service_id: &config.service_id,
                template_id: &config.template_id,
                user_id: &config.public_key,
                template_params: &params,
            };
            debug!(endpoint = %config.endpoint, "Posting message to relay");

            let response = client
                .post(&config.endpoint)
                .json(&body)
                .send()
                .await
                .map_err(|e| SendError::Network(e.to_string()))?;

            let status = response.status();
            if status.is_success() {
                info!("Message delivered by relay");
                return Ok(());
            }
            let message = response.text().await.unwrap_or_default();
            Err(SendError::Service {
                status: status.as_u16(),
                message: message.trim().to_owned(),
            })
        })
    }
}

/// Dry-run sender used when no relay is configured.
pub struct LogSender;

impl NotificationSender for LogSender {
    fn send(&self, params: TemplateParams) -> BoxFuture<'static, Result<(), SendError>> {
        info!(
            from = %params.from_name,
            email = %params.from_email,
            subject = %params.subject,
            "No relay configured, message logged only"
        );
        Box::pin(async { Ok(()) })
    }
}

/// Relay when configured, otherwise the dry-run sender.
pub fn sender_for(relay: Option<&RelayConfig>) -> Result<Arc<dyn NotificationSender>, SendError> {
    match relay {
        Some(config) => Ok(Arc::new(EmailRelay::new(config.clone())?)),
        None => Ok(Arc::new(LogSender)),
    }
}
