// In memory implementation of the WebhookTransport port.
//
// Purpose
// - Stand in for the hosted form webhook in tests and in `--dry-run` mode.
//
// Responsibilities
// - Reproduce the observable contract only: passphrase check, required fields,
//   email format, duplicate detection, rate limiting, JSON-only intake and
//   HTML escaping of echoed values.
// - Expose knobs that make the simulated service misbehave, so contract cases
//   can be shown to fail.

use crate::shared::core::primitives::{
    STATUS_BAD_REQUEST, STATUS_CONFLICT, STATUS_OK, STATUS_SERVICE_UNAVAILABLE,
    STATUS_TOO_MANY_REQUESTS, STATUS_UNAUTHORIZED, STATUS_UNSUPPORTED_MEDIA_TYPE,
};
use crate::shared::infrastructure::transport::{TransportError, WebhookReply, WebhookTransport};
use serde_json::{Map, Value, json};
use std::collections::HashSet;
use std::time::Duration;
use tokio::sync::Mutex;
use tokio::time::Instant;

const NOT_FOUND: u16 = 404;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct RateLimit {
    pub max_requests: u32,
    pub window: Duration,
}

struct SimulatorState {
    registered: HashSet<String>,
    window_started: Instant,
    window_count: u32,
    unhealthy_polls: u32,
    submissions: u64,
}

pub struct InMemoryWebhook {
    passphrase: String,
    health_path: String,
    rate_limit: Option<RateLimit>,
    slow_mode_delay: Duration,
    offline: bool,
    check_passphrase: bool,
    escape_html: bool,
    reject_duplicates: bool,
    validate_emails: bool,
    state: Mutex<SimulatorState>,
}

impl InMemoryWebhook {
    pub fn new(passphrase: impl Into<String>) -> Self {
        Self {
            passphrase: passphrase.into(),
            health_path: "/healthz".to_string(),
            rate_limit: None,
            slow_mode_delay: Duration::ZERO,
            offline: false,
            check_passphrase: true,
            escape_html: true,
            reject_duplicates: true,
            validate_emails: true,
            state: Mutex::new(SimulatorState {
                registered: HashSet::new(),
                window_started: Instant::now(),
                window_count: 0,
                unhealthy_polls: 0,
                submissions: 0,
            }),
        }
    }

    /// Stored with a leading `/`, the form URL paths are compared in.
    pub fn set_health_path(&mut self, path: impl Into<String>) {
        let path = path.into();
        self.health_path = if path.starts_with('/') {
            path
        } else {
            format!("/{path}")
        };
    }

    pub fn set_rate_limit(&mut self, max_requests: u32, window: Duration) {
        self.rate_limit = Some(RateLimit {
            max_requests,
            window,
        });
    }

    pub fn set_slow_mode_delay(&mut self, delay: Duration) {
        self.slow_mode_delay = delay;
    }

    pub fn set_unhealthy_polls(&mut self, polls: u32) {
        self.state.get_mut().unhealthy_polls = polls;
    }

    pub fn toggle_offline(&mut self) {
        self.offline = !self.offline;
    }

    pub fn ignore_passphrase(&mut self) {
        self.check_passphrase = false;
    }

    pub fn echo_raw_html(&mut self) {
        self.escape_html = false;
    }

    pub fn accept_duplicates(&mut self) {
        self.reject_duplicates = false;
    }

    pub fn accept_any_email(&mut self) {
        self.validate_emails = false;
    }

    pub async fn submissions(&self) -> u64 {
        self.state.lock().await.submissions
    }

    pub async fn handle_health(&self) -> WebhookReply {
        let mut state = self.state.lock().await;
        if state.unhealthy_polls > 0 {
            state.unhealthy_polls -= 1;
            return WebhookReply::json(
                STATUS_SERVICE_UNAVAILABLE,
                &json!({"status": "starting"}),
            );
        }
        WebhookReply::json(STATUS_OK, &json!({"status": "ok"}))
    }

    pub async fn handle_submission(&self, content_type: &str, body: &[u8]) -> WebhookReply {
        if let Some(reply) = self.throttle().await {
            return reply;
        }

        let media_type = content_type
            .split(';')
            .next()
            .unwrap_or_default()
            .trim()
            .to_ascii_lowercase();
        if media_type != "application/json" {
            return rejection(
                STATUS_UNSUPPORTED_MEDIA_TYPE,
                format!("Unsupported media type: {media_type}"),
            );
        }

        let fields = match serde_json::from_slice::<Value>(body) {
            Ok(Value::Object(fields)) => fields,
            _ => return rejection(STATUS_BAD_REQUEST, "Malformed JSON body"),
        };

        if self.check_passphrase
            && fields.get("passphrase").and_then(Value::as_str) != Some(self.passphrase.as_str())
        {
            return rejection(STATUS_UNAUTHORIZED, "Invalid passphrase");
        }

        let email = match required_text(&fields, "email") {
            Some(email) => email,
            None => return rejection(STATUS_BAD_REQUEST, "Missing required field: email"),
        };
        let name = match required_text(&fields, "name") {
            Some(name) => name,
            None => return rejection(STATUS_BAD_REQUEST, "Missing required field: name"),
        };
        if self.validate_emails && !is_plausible_email(email) {
            return rejection(STATUS_BAD_REQUEST, "Invalid email format");
        }

        if fields.get("test_mode").and_then(Value::as_str) == Some("slow") {
            tokio::time::sleep(self.slow_mode_delay).await;
        }

        let mut state = self.state.lock().await;
        let normalized = email.to_ascii_lowercase();
        if self.reject_duplicates && state.registered.contains(&normalized) {
            return rejection(STATUS_CONFLICT, "Email already registered");
        }
        state.registered.insert(normalized);
        state.submissions += 1;

        let echoed_name = if self.escape_html {
            escape_html(name)
        } else {
            name.to_string()
        };
        WebhookReply::json(
            STATUS_OK,
            &json!({
                "success": true,
                "message": "Registration received",
                "data": { "email": email, "name": echoed_name },
            }),
        )
    }

    async fn throttle(&self) -> Option<WebhookReply> {
        let limit = self.rate_limit?;
        let mut state = self.state.lock().await;
        if state.window_started.elapsed() >= limit.window {
            state.window_started = Instant::now();
            state.window_count = 0;
        }
        state.window_count += 1;
        (state.window_count > limit.max_requests)
            .then(|| rejection(STATUS_TOO_MANY_REQUESTS, "Too many requests"))
    }

    fn is_health_url(&self, url: &str) -> bool {
        url::Url::parse(url)
            .map(|parsed| parsed.path() == self.health_path)
            .unwrap_or(false)
    }
}

#[async_trait::async_trait]
impl WebhookTransport for InMemoryWebhook {
    async fn get(&self, url: &str, timeout: Duration) -> Result<WebhookReply, TransportError> {
        if self.offline {
            return Err(TransportError::Backend("webhook offline".into()));
        }
        if !self.is_health_url(url) {
            return Ok(rejection(NOT_FOUND, "Not found"));
        }
        tokio::time::timeout(timeout, self.handle_health())
            .await
            .map_err(|_| TransportError::Timeout(timeout))
    }

    async fn post(
        &self,
        _url: &str,
        content_type: &str,
        body: Vec<u8>,
        timeout: Duration,
    ) -> Result<WebhookReply, TransportError> {
        if self.offline {
            return Err(TransportError::Backend("webhook offline".into()));
        }
        tokio::time::timeout(timeout, self.handle_submission(content_type, &body))
            .await
            .map_err(|_| TransportError::Timeout(timeout))
    }
}

fn rejection(status: u16, error: impl Into<String>) -> WebhookReply {
    WebhookReply::json(status, &json!({"success": false, "error": error.into()}))
}

fn required_text<'a>(fields: &'a Map<String, Value>, key: &str) -> Option<&'a str> {
    fields
        .get(key)
        .and_then(Value::as_str)
        .map(str::trim)
        .filter(|value| !value.is_empty())
}

fn is_plausible_email(email: &str) -> bool {
    let Some((local, domain)) = email.split_once('@') else {
        return false;
    };
    let local_ok = !local.is_empty()
        && local
            .chars()
            .all(|c| c.is_ascii_alphanumeric() || "._%+-".contains(c));
    let domain_ok = domain.contains('.')
        && !domain.starts_with('.')
        && !domain.ends_with('.')
        && domain
            .chars()
            .all(|c| c.is_ascii_alphanumeric() || c == '.' || c == '-');
    local_ok && domain_ok
}

fn escape_html(raw: &str) -> String {
    let mut escaped = String::with_capacity(raw.len());
    for c in raw.chars() {
        match c {
            '&' => escaped.push_str("&amp;"),
            '<' => escaped.push_str("&lt;"),
            '>' => escaped.push_str("&gt;"),
            '"' => escaped.push_str("&quot;"),
            '\'' => escaped.push_str("&#x27;"),
            _ => escaped.push(c),
        }
    }
    escaped
}
