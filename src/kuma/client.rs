use crate::error::{LabopsError, Result};
use reqwest::blocking::Client;
use serde::Serialize;
use std::time::Duration;
use url::Url;

const PROBE_TIMEOUT: Duration = Duration::from_secs(10);

/// Monitor settings mirroring the dashboard's HTTP monitor type.
#[derive(Debug, Clone, Serialize)]
pub struct MonitorSpec {
    pub name: String,
    pub url: String,
    #[serde(rename = "type")]
    pub monitor_type: String,
    pub interval: u32,
    #[serde(rename = "retryInterval")]
    pub retry_interval: u32,
    #[serde(rename = "maxRetries")]
    pub max_retries: u32,
}

impl MonitorSpec {
    pub fn http(name: &str, url: &str) -> Self {
        Self {
            name: name.to_string(),
            url: url.to_string(),
            monitor_type: "http".to_string(),
            interval: 60,
            retry_interval: 60,
            max_retries: 3,
        }
    }
}

/// Terminal outcome of the monitor-creation attempt. Falling back to manual
/// setup is a distinct outcome, not a generic failure.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum MonitorSetup {
    Configured { endpoint: String },
    ManualSetupRequired,
}

#[derive(Debug)]
pub struct ProbeReport {
    pub status: u16,
    pub body_bytes: usize,
    pub looks_like_docs: bool,
}

impl ProbeReport {
    pub fn is_ok(&self) -> bool {
        (200..300).contains(&self.status)
    }
}

/// GET the monitored site with a 10-second timeout and report reachability.
pub fn probe_service(url: &str) -> Result<ProbeReport> {
    let client = Client::builder()
        .timeout(PROBE_TIMEOUT)
        .user_agent("labops")
        .build()
        .map_err(|e| LabopsError::MonitorSetup(format!("Failed to build HTTP client: {e}")))?;

    let response = client
        .get(url)
        .send()
        .map_err(|e| LabopsError::MonitorSetup(format!("Service is not accessible: {e}")))?;

    let status = response.status().as_u16();
    let body = response
        .text()
        .map_err(|e| LabopsError::MonitorSetup(format!("Failed to read response body: {e}")))?;
    let lowered = body.to_lowercase();

    Ok(ProbeReport {
        status,
        body_bytes: body.len(),
        looks_like_docs: lowered.contains("homelab") || lowered.contains("documentation"),
    })
}

enum LoginBody {
    Json,
    Form,
}

struct LoginCandidate {
    path: &'static str,
    body: LoginBody,
}

/// Guessed login endpoints, tried in order. The dashboard's real API speaks
/// WebSocket; these are the plain-HTTP shapes some deployments expose.
const LOGIN_CANDIDATES: &[LoginCandidate] = &[
    LoginCandidate {
        path: "/api/login",
        body: LoginBody::Json,
    },
    LoginCandidate {
        path: "/login/access-token",
        body: LoginBody::Form,
    },
];

/// Best-effort Uptime Kuma client: first full login-and-create success wins,
/// exhaustion falls back to manual setup.
pub struct UptimeKumaClient {
    client: Client,
    base_url: String,
    username: String,
    password: String,
}

impl UptimeKumaClient {
    pub fn new(base_url: &str, username: &str, password: &str) -> Result<Self> {
        validate_dashboard_url(base_url)?;

        let client = Client::builder()
            .user_agent("labops")
            .build()
            .map_err(|e| LabopsError::MonitorSetup(format!("Failed to build HTTP client: {e}")))?;

        Ok(Self {
            client,
            base_url: base_url.trim_end_matches('/').to_string(),
            username: username.to_string(),
            password: password.to_string(),
        })
    }

    pub fn try_create_monitor(&self, spec: &MonitorSpec) -> MonitorSetup {
        for candidate in LOGIN_CANDIDATES {
            let Some(token) = self.try_login(candidate) else {
                continue;
            };

            if self.try_post_monitor(&token, spec) {
                return MonitorSetup::Configured {
                    endpoint: format!("{}{}", self.base_url, candidate.path),
                };
            }
        }

        MonitorSetup::ManualSetupRequired
    }

    fn try_login(&self, candidate: &LoginCandidate) -> Option<String> {
        let url = format!("{}{}", self.base_url, candidate.path);
        verbose(&format!("Trying login endpoint: {url}"));

        let request = self.client.post(&url);
        let request = match candidate.body {
            LoginBody::Json => request.json(&serde_json::json!({
                "username": self.username,
                "password": self.password,
            })),
            LoginBody::Form => request.form(&[
                ("username", self.username.as_str()),
                ("password", self.password.as_str()),
            ]),
        };

        let response = match request.send() {
            Ok(resp) => resp,
            Err(e) => {
                verbose(&format!("Login request failed: {e}"));
                return None;
            }
        };

        if !response.status().is_success() {
            verbose(&format!("HTTP {}: {url}", response.status()));
            return None;
        }

        let body: serde_json::Value = response.json().ok()?;
        extract_token(&body)
    }

    fn try_post_monitor(&self, token: &str, spec: &MonitorSpec) -> bool {
        let url = format!("{}/api/monitor", self.base_url);
        verbose(&format!("Posting monitor to: {url}"));

        match self.client.post(&url).bearer_auth(token).json(spec).send() {
            Ok(resp) if resp.status().is_success() => true,
            Ok(resp) => {
                verbose(&format!("HTTP {}: {url}", resp.status()));
                false
            }
            Err(e) => {
                verbose(&format!("Monitor request failed: {e}"));
                false
            }
        }
    }
}

fn extract_token(body: &serde_json::Value) -> Option<String> {
    for key in ["token", "access_token"] {
        if let Some(token) = body.get(key).and_then(|v| v.as_str()) {
            return Some(token.to_string());
        }
    }
    None
}

fn validate_dashboard_url(url: &str) -> Result<()> {
    let parsed = Url::parse(url)
        .map_err(|_| LabopsError::Config(format!("Invalid dashboard URL: {url}")))?;

    match parsed.scheme() {
        "https" | "http" => Ok(()),
        scheme => Err(LabopsError::Config(format!(
            "Unsupported dashboard scheme: {scheme}"
        ))),
    }
}

fn verbose(message: &str) {
    if std::env::var("LABOPS_VERBOSE").is_ok() {
        eprintln!("[VERBOSE] {message}");
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn http_monitor_spec_defaults() {
        let spec = MonitorSpec::http("docs", "https://docs.lab.example.net");
        assert_eq!(spec.monitor_type, "http");
        assert_eq!(spec.interval, 60);
        assert_eq!(spec.retry_interval, 60);
        assert_eq!(spec.max_retries, 3);
    }

    #[test]
    fn monitor_spec_serializes_dashboard_field_names() {
        let spec = MonitorSpec::http("docs", "https://docs.lab.example.net");
        let value = serde_json::to_value(&spec).unwrap();
        assert_eq!(value["type"], "http");
        assert_eq!(value["retryInterval"], 60);
        assert_eq!(value["maxRetries"], 3);
    }

    #[test]
    fn token_extraction_accepts_both_spellings() {
        let json_body = serde_json::json!({"token": "abc"});
        assert_eq!(extract_token(&json_body).as_deref(), Some("abc"));

        let form_body = serde_json::json!({"access_token": "xyz"});
        assert_eq!(extract_token(&form_body).as_deref(), Some("xyz"));

        let neither = serde_json::json!({"ok": true});
        assert!(extract_token(&neither).is_none());
    }

    #[test]
    fn rejects_invalid_dashboard_scheme() {
        let err = validate_dashboard_url("ws://192.168.1.10:3001").unwrap_err();
        assert!(matches!(err, LabopsError::Config(_)));
    }

    #[test]
    fn probe_report_status_classification() {
        let ok = ProbeReport {
            status: 204,
            body_bytes: 0,
            looks_like_docs: false,
        };
        assert!(ok.is_ok());

        let not_ok = ProbeReport {
            status: 502,
            body_bytes: 0,
            looks_like_docs: false,
        };
        assert!(!not_ok.is_ok());
    }

    #[test]
    #[ignore] // Requires network access
    fn unroutable_dashboard_falls_back_to_manual_setup() {
        let client = UptimeKumaClient::new("http://127.0.0.1:1", "admin", "secret").unwrap();
        let spec = MonitorSpec::http("docs", "https://docs.lab.example.net");
        assert_eq!(client.try_create_monitor(&spec), MonitorSetup::ManualSetupRequired);
    }
}
