//! Per-operation options.
//!
//! Every field is optional. Adapters ignore fields their backend has no use for (and document which ones), but a
//! field that does not exist cannot be set, so typos fail to compile instead of being silently dropped.
//!
//! `order_id` is the caller's idempotency/reference value. It is passed through to the backend unmodified; the
//! engine never invents one.

/// Options for `authorize` and `purchase`.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ChargeOptions {
    pub email: Option<String>,
    pub ip_address: Option<String>,
    pub description: Option<String>,
    /// Overrides the gateway's configured default currency.
    pub currency: Option<String>,
    pub order_id: Option<String>,
    /// Free-form key/value pairs, forwarded in order as `metadata[key]` where the backend supports it.
    pub metadata: Vec<(String, String)>,
}

impl ChargeOptions {
    pub fn with_email<S: Into<String>>(mut self, email: S) -> Self {
        self.email = Some(email.into());
        self
    }

    pub fn with_ip_address<S: Into<String>>(mut self, ip_address: S) -> Self {
        self.ip_address = Some(ip_address.into());
        self
    }

    pub fn with_description<S: Into<String>>(mut self, description: S) -> Self {
        self.description = Some(description.into());
        self
    }

    pub fn with_currency<S: Into<String>>(mut self, currency: S) -> Self {
        self.currency = Some(currency.into());
        self
    }

    pub fn with_order_id<S: Into<String>>(mut self, order_id: S) -> Self {
        self.order_id = Some(order_id.into());
        self
    }

    pub fn with_metadata<K: Into<String>, V: Into<String>>(mut self, key: K, value: V) -> Self {
        self.metadata.push((key.into(), value.into()));
        self
    }

    /// The currency for this charge: the override if present, otherwise `default_currency`.
    pub fn currency_or<'a>(&'a self, default_currency: &'a str) -> &'a str {
        self.currency.as_deref().unwrap_or(default_currency)
    }
}

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct CaptureOptions {
    pub order_id: Option<String>,
}

impl CaptureOptions {
    pub fn with_order_id<S: Into<String>>(mut self, order_id: S) -> Self {
        self.order_id = Some(order_id.into());
        self
    }
}

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct RefundOptions {
    pub order_id: Option<String>,
    pub reason: Option<String>,
}

impl RefundOptions {
    pub fn with_order_id<S: Into<String>>(mut self, order_id: S) -> Self {
        self.order_id = Some(order_id.into());
        self
    }

    pub fn with_reason<S: Into<String>>(mut self, reason: S) -> Self {
        self.reason = Some(reason.into());
        self
    }
}

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct StoreOptions {
    pub email: Option<String>,
    pub description: Option<String>,
    pub order_id: Option<String>,
}

impl StoreOptions {
    pub fn with_email<S: Into<String>>(mut self, email: S) -> Self {
        self.email = Some(email.into());
        self
    }

    pub fn with_description<S: Into<String>>(mut self, description: S) -> Self {
        self.description = Some(description.into());
        self
    }

    pub fn with_order_id<S: Into<String>>(mut self, order_id: S) -> Self {
        self.order_id = Some(order_id.into());
        self
    }
}

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct VoidOptions {
    pub order_id: Option<String>,
}

impl VoidOptions {
    pub fn with_order_id<S: Into<String>>(mut self, order_id: S) -> Self {
        self.order_id = Some(order_id.into());
        self
    }
}
