//! Network reachability checks.
//!
//! `ConnectivityGate` asks a `ConnectivityProbe` for the current state once
//! per call and only runs the wrapped action when the network is reachable.
//! State is never cached between calls.

pub mod probe;

use std::future::Future;
use std::sync::Arc;

use thiserror::Error;
use tracing::debug;

pub use probe::{ConnectivityProbe, OfflineProbe, TcpProbe};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TransportType {
    /// No usable transport
    None,
    Wifi,
    Cellular,
    Ethernet,
    /// Reachable, but the transport can't be observed
    Unknown,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ConnectivityState {
    pub connected: bool,
    pub transport: TransportType,
}

impl ConnectivityState {
    pub fn connected(transport: TransportType) -> Self {
        Self {
            connected: true,
            transport,
        }
    }

    pub fn disconnected() -> Self {
        Self {
            connected: false,
            transport: TransportType::None,
        }
    }
}

/// Not connected to the network.
#[derive(Error, Debug, Clone, Copy, PartialEq, Eq)]
#[error("No network connectivity")]
pub struct NoConnectivity;

#[derive(Clone)]
pub struct ConnectivityGate {
    probe: Arc<dyn ConnectivityProbe>,
}

impl ConnectivityGate {
    pub fn new(probe: Arc<dyn ConnectivityProbe>) -> Self {
        Self { probe }
    }

    /// Current connectivity, probed fresh.
    pub async fn status(&self) -> ConnectivityState {
        self.probe.probe().await
    }

    /// Run `action` only if the network is reachable right now.
    ///
    /// One probe per call, no retry. When disconnected the action is never
    /// invoked and `NoConnectivity` is returned; otherwise the action's own
    /// result, success or error, is returned unchanged.
    pub async fn check_and_run<T, E, F, Fut>(&self, action: F) -> Result<T, E>
    where
        F: FnOnce() -> Fut,
        Fut: Future<Output = Result<T, E>>,
        E: From<NoConnectivity>,
    {
        let state = self.status().await;
        if !state.connected {
            debug!("Connectivity check failed, skipping network action");
            return Err(NoConnectivity.into());
        }
        debug!(transport = ?state.transport, "Connectivity check passed");
        action().await
    }
}
