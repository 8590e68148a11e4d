use std::collections::VecDeque;

use serde_json::{Map, Value};

/// One conversion ping, addressed to a provider label such as `AW-123/abc`.
#[derive(Clone, Debug, PartialEq, serde::Serialize, serde::Deserialize)]
pub struct ConversionEvent {
    /// Provider label.
    pub send_to: String,
    /// Extra provider parameters.
    #[serde(default)]
    pub params: Map<String, Value>,
}

impl ConversionEvent {
    /// An event with no parameters.
    pub fn new(send_to: impl Into<String>) -> Self {
        Self {
            send_to: send_to.into(),
            params: Map::new(),
        }
    }

    /// Add or replace one parameter.
    pub fn with_param(mut self, key: &str, value: impl Into<Value>) -> Self {
        self.params.insert(key.to_string(), value.into());
        self
    }
}

/// An analytics provider that accepts conversion events.
pub trait ConversionSink {
    /// Deliver one event.
    fn send(&mut self, event: &ConversionEvent) -> anyhow::Result<()>;
}

/// Sink that records every event, for tests and dry runs.
#[derive(Debug, Default)]
pub struct InMemoryConversions {
    /// Every event sent, in order.
    pub events: Vec<ConversionEvent>,
}

impl ConversionSink for InMemoryConversions {
    fn send(&mut self, event: &ConversionEvent) -> anyhow::Result<()> {
        self.events.push(event.clone());
        Ok(())
    }
}

/// Queues conversions until a provider attaches, then forwards them in order.
///
/// Reporting never fails: provider errors are logged at debug and the event is dropped.
#[derive(Default)]
pub struct ConversionShim {
    queue: VecDeque<ConversionEvent>,
    sink: Option<Box<dyn ConversionSink>>,
    delivered: usize,
    dropped: usize,
}

impl ConversionShim {
    /// An empty, detached shim.
    pub fn new() -> Self {
        Self::default()
    }

    /// Whether a provider is attached.
    pub fn is_attached(&self) -> bool {
        self.sink.is_some()
    }

    /// Events waiting for a provider.
    pub fn queued(&self) -> usize {
        self.queue.len()
    }

    /// Events the provider accepted.
    pub fn delivered(&self) -> usize {
        self.delivered
    }

    /// Events the provider rejected.
    pub fn dropped(&self) -> usize {
        self.dropped
    }

    /// Attach a provider and flush everything queued so far.
    pub fn attach(&mut self, sink: Box<dyn ConversionSink>) {
        self.sink = Some(sink);
        while let Some(event) = self.queue.pop_front() {
            self.deliver(event);
        }
    }

    /// Remove the provider; later reports queue again.
    pub fn detach(&mut self) -> Option<Box<dyn ConversionSink>> {
        self.sink.take()
    }

    /// Report a conversion. Empty labels are ignored.
    pub fn report(&mut self, event: ConversionEvent) {
        if event.send_to.trim().is_empty() {
            return;
        }
        if self.sink.is_some() {
            self.deliver(event);
        } else {
            self.queue.push_back(event);
        }
    }

    fn deliver(&mut self, event: ConversionEvent) {
        let Some(sink) = self.sink.as_mut() else {
            self.queue.push_back(event);
            return;
        };
        match sink.send(&event) {
            Ok(()) => self.delivered += 1,
            Err(err) => {
                self.dropped += 1;
                tracing::debug!(send_to = %event.send_to, error = %err, "conversion provider failed");
            }
        }
    }
}

impl std::fmt::Debug for ConversionShim {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("ConversionShim")
            .field("queued", &self.queue.len())
            .field("attached", &self.sink.is_some())
            .field("delivered", &self.delivered)
            .field("dropped", &self.dropped)
            .finish()
    }
}

/// Log a call-to-action click.
pub fn log_cta_click(label: &str, href: Option<&str>) {
    tracing::info!(label, href = href.unwrap_or(""), "cta click");
}

#[cfg(test)]
#[path = "../../tests/unit/analytics/conversion.rs"]
mod tests;
