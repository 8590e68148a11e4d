use crate::analytics::conversion::{ConversionEvent, ConversionShim};
use crate::foundation::error::{VitrineError, VitrineResult};
use crate::lead::form::LeadForm;

/// Phone number shown when no fallback is configured.
pub const DEFAULT_FALLBACK_PHONE: &str = "(385) 202-7198";

/// Status text after an accepted lead.
pub const SUCCESS_MESSAGE: &str = "Thank you! We’ll contact you shortly.";
/// Status text when the endpoint rejects a lead without details.
pub const REJECTED_MESSAGE: &str = "Oops! There was a problem submitting your form.";

#[derive(Clone, Debug, PartialEq, serde::Serialize, serde::Deserialize)]
#[serde(default)]
/// Where and how leads are posted.
pub struct LeadFormConfig {
    /// Form `action` URL.
    pub endpoint: String,
    /// HTTP method; empty means POST.
    pub method: String,
    /// Phone number offered to the visitor when the endpoint is unreachable.
    pub fallback_phone: String,
    /// Conversion label reported after a successful submission.
    pub conversion_label: Option<String>,
}

impl Default for LeadFormConfig {
    fn default() -> Self {
        Self {
            endpoint: String::new(),
            method: "POST".to_string(),
            fallback_phone: DEFAULT_FALLBACK_PHONE.to_string(),
            conversion_label: None,
        }
    }
}

impl LeadFormConfig {
    /// Requires a fallback phone number.
    pub fn validate(&self) -> VitrineResult<()> {
        if self.fallback_phone.trim().is_empty() {
            return Err(VitrineError::configuration(
                "lead fallback_phone must be non-empty",
            ));
        }
        Ok(())
    }

    /// The HTTP method to use.
    pub fn method(&self) -> &str {
        let m = self.method.trim();
        if m.is_empty() { "POST" } else { m }
    }
}

/// A request handed to the host's HTTP layer.
#[derive(Clone, Debug, PartialEq)]
pub struct TransportRequest<'a> {
    /// Target URL.
    pub endpoint: &'a str,
    /// HTTP method.
    pub method: &'a str,
    /// `Accept` header value.
    pub accept: &'static str,
    /// Form body in document order.
    pub fields: &'a [(String, String)],
}

/// What the endpoint answered.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct TransportResponse {
    /// HTTP status code.
    pub status: u16,
    /// Response body.
    pub body: String,
}

impl TransportResponse {
    /// Whether the status is 2xx.
    pub fn is_ok(&self) -> bool {
        (200..300).contains(&self.status)
    }
}

/// Delivers a lead to its endpoint. `Err` means the request never completed.
pub trait LeadTransport {
    /// Perform one request.
    fn send(&mut self, request: &TransportRequest<'_>) -> VitrineResult<TransportResponse>;
}

/// Styling of a status line.
#[derive(Clone, Copy, Debug, PartialEq, Eq, serde::Serialize)]
#[serde(rename_all = "snake_case")]
pub enum StatusTone {
    /// Something went wrong.
    Error,
    /// The lead was accepted.
    Success,
}

/// Text and tone for the form's status line.
#[derive(Clone, Debug, PartialEq, Eq, serde::Serialize)]
pub struct FormStatus {
    /// Styling.
    pub tone: StatusTone,
    /// Text shown to the visitor.
    pub message: String,
}

impl FormStatus {
    fn error(message: impl Into<String>) -> Self {
        Self {
            tone: StatusTone::Error,
            message: message.into(),
        }
    }

    /// Whether the lead was accepted.
    pub fn is_success(&self) -> bool {
        self.tone == StatusTone::Success
    }
}

#[derive(serde::Deserialize)]
struct ServerErrors {
    #[serde(default)]
    errors: Vec<ServerError>,
}

#[derive(serde::Deserialize)]
struct ServerError {
    message: String,
}

fn rejection_message(body: &str) -> String {
    match serde_json::from_str::<ServerErrors>(body) {
        Ok(parsed) if !parsed.errors.is_empty() => parsed
            .errors
            .into_iter()
            .map(|e| e.message)
            .collect::<Vec<_>>()
            .join(", "),
        _ => REJECTED_MESSAGE.to_string(),
    }
}

/// Runs lead submissions over a host transport.
pub struct LeadSubmitter<T: LeadTransport> {
    config: LeadFormConfig,
    transport: T,
}

impl<T: LeadTransport> LeadSubmitter<T> {
    /// A submitter for one form.
    pub fn new(config: LeadFormConfig, transport: T) -> Self {
        Self { config, transport }
    }

    /// The form settings.
    pub fn config(&self) -> &LeadFormConfig {
        &self.config
    }

    /// The underlying transport.
    pub fn transport(&self) -> &T {
        &self.transport
    }

    /// Validate and post a lead. Every outcome becomes a status line; nothing escapes.
    #[tracing::instrument(skip(self, form, conversions), fields(endpoint = %self.config.endpoint))]
    pub fn submit(&mut self, form: &mut LeadForm, conversions: &mut ConversionShim) -> FormStatus {
        if let Err(err) = form.validate() {
            tracing::debug!(reason = %err, "lead rejected before sending");
            return FormStatus::error(err.to_string());
        }

        let request = TransportRequest {
            endpoint: &self.config.endpoint,
            method: self.config.method(),
            accept: "application/json",
            fields: &form.fields,
        };
        let response = match self.transport.send(&request) {
            Ok(response) => response,
            Err(err) => {
                tracing::warn!(error = %err, "lead endpoint unreachable");
                return FormStatus::error(format!(
                    "Sorry, we could not submit the form. Please call us at {}.",
                    self.config.fallback_phone
                ));
            }
        };

        if !response.is_ok() {
            tracing::warn!(status = response.status, "lead endpoint rejected submission");
            return FormStatus::error(rejection_message(&response.body));
        }

        form.reset();
        if let Some(label) = &self.config.conversion_label {
            conversions.report(ConversionEvent::new(label.clone()));
        }
        FormStatus {
            tone: StatusTone::Success,
            message: SUCCESS_MESSAGE.to_string(),
        }
    }
}

#[cfg(test)]
#[path = "../../tests/unit/lead/submit.rs"]
mod tests;
