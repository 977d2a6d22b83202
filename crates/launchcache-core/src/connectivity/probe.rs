use std::time::Duration;

use async_trait::async_trait;
use reqwest::Url;
use tokio::net::TcpStream;
use tracing::debug;

use super::{ConnectivityState, TransportType};

/// Default time allowed for a reachability probe.
pub const DEFAULT_PROBE_TIMEOUT_MS: u64 = 1500;

/// Source of the current connectivity state.
#[async_trait]
pub trait ConnectivityProbe: Send + Sync {
    async fn probe(&self) -> ConnectivityState;
}

/// Reports connected when a TCP connection to the target can be opened.
#[derive(Debug, Clone)]
pub struct TcpProbe {
    target: String,
    timeout: Duration,
}

impl TcpProbe {
    pub fn new(target: impl Into<String>, timeout: Duration) -> Self {
        Self {
            target: target.into(),
            timeout,
        }
    }

    /// Probe the host and port that `url` points at.
    pub fn for_url(url: &Url, timeout: Duration) -> Option<Self> {
        let host = url.host_str()?;
        let port = url.port_or_known_default()?;
        Some(Self::new(format!("{}:{}", host, port), timeout))
    }

    pub fn target(&self) -> &str {
        &self.target
    }
}

#[async_trait]
impl ConnectivityProbe for TcpProbe {
    async fn probe(&self) -> ConnectivityState {
        match tokio::time::timeout(self.timeout, TcpStream::connect(self.target.as_str())).await {
            // A socket can't tell wifi from ethernet
            Ok(Ok(_)) => ConnectivityState::connected(TransportType::Unknown),
            Ok(Err(e)) => {
                debug!(addr = %self.target, error = %e, "Probe connection failed");
                ConnectivityState::disconnected()
            }
            Err(_) => {
                debug!(addr = %self.target, timeout_ms = self.timeout.as_millis() as u64, "Probe timed out");
                ConnectivityState::disconnected()
            }
        }
    }
}

/// Always disconnected. Used in offline mode so only cached data is served.
#[derive(Debug, Clone, Copy, Default)]
pub struct OfflineProbe;

#[async_trait]
impl ConnectivityProbe for OfflineProbe {
    async fn probe(&self) -> ConnectivityState {
        ConnectivityState::disconnected()
    }
}
