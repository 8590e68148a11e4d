use crate::analytics::conversion::{ConversionEvent, ConversionShim};
use crate::foundation::core::Millis;

/// Navigation deadline when the provider never acknowledges a call conversion.
pub const CALL_FALLBACK_MS: u64 = 700;

/// Host instruction to follow the `tel:` link.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Navigate {
    /// The `tel:` URL.
    pub href: String,
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
enum CallState {
    Idle,
    Pending { fallback_at: Millis },
    Navigated,
}

/// A click-to-call link that reports a conversion before navigating.
///
/// Navigation happens on the provider callback or at the fallback deadline, whichever comes
/// first, and only once per click.
#[derive(Clone, Debug)]
pub struct CallLink {
    href: String,
    label: Option<String>,
    fallback_ms: u64,
    state: CallState,
}

impl CallLink {
    /// A link with an optional conversion label; blank labels count as none.
    pub fn new(href: impl Into<String>, label: Option<String>) -> Self {
        Self {
            href: href.into(),
            label: label.filter(|l| !l.trim().is_empty()),
            fallback_ms: CALL_FALLBACK_MS,
            state: CallState::Idle,
        }
    }

    /// Override the fallback deadline.
    pub fn with_fallback_ms(mut self, ms: u64) -> Self {
        self.fallback_ms = ms;
        self
    }

    /// The `tel:` URL this link navigates to.
    pub fn href(&self) -> &str {
        &self.href
    }

    /// Whether a click is waiting on the provider or the fallback.
    pub fn is_pending(&self) -> bool {
        matches!(self.state, CallState::Pending { .. })
    }

    /// Handle a click. Returns `Some` when the host should navigate right away, which is the
    /// case when no conversion label is configured.
    pub fn click(&mut self, now: Millis, shim: &mut ConversionShim) -> Option<Navigate> {
        if self.is_pending() {
            return None;
        }
        let Some(label) = self.label.clone() else {
            self.state = CallState::Navigated;
            return Some(self.navigate());
        };
        shim.report(ConversionEvent::new(label).with_param("transport_type", "beacon"));
        self.state = CallState::Pending {
            fallback_at: now.after(self.fallback_ms),
        };
        tracing::debug!(href = %self.href, "call conversion pending");
        None
    }

    /// The provider acknowledged the conversion.
    pub fn acknowledged(&mut self) -> Option<Navigate> {
        self.complete()
    }

    /// The fallback deadline of a pending click.
    pub fn next_deadline(&self) -> Option<Millis> {
        match self.state {
            CallState::Pending { fallback_at } => Some(fallback_at),
            _ => None,
        }
    }

    /// Fire the fallback navigation if it is due.
    pub fn advance(&mut self, now: Millis) -> Option<Navigate> {
        match self.state {
            CallState::Pending { fallback_at } if now >= fallback_at => self.complete(),
            _ => None,
        }
    }

    fn complete(&mut self) -> Option<Navigate> {
        if !self.is_pending() {
            return None;
        }
        self.state = CallState::Navigated;
        Some(self.navigate())
    }

    fn navigate(&self) -> Navigate {
        Navigate {
            href: self.href.clone(),
        }
    }
}

#[cfg(test)]
#[path = "../../tests/unit/analytics/call_link.rs"]
mod tests;
