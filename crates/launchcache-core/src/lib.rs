//! launchcache core - tiered cache and fetch of upcoming launches.
//!
//! A listing is resolved from the in-memory tier, then the on-disk tier,
//! then the remote API (only when the network is reachable). Successful
//! remote fetches are written through to both tiers.
//!
//! The pieces are built separately and handed to an `Orchestrator`:
//!
//! ```no_run
//! use std::sync::Arc;
//! use std::time::Duration;
//!
//! use launchcache_core::{
//!     ApiClient, CacheKey, ConnectivityGate, DiskCache, MemoryCache, Orchestrator, TcpProbe, Tiers,
//! };
//!
//! # async fn run() -> anyhow::Result<()> {
//! let api = ApiClient::new("https://launchlibrary.net/1.4/", Duration::from_secs(30))?;
//! let probe = TcpProbe::new("launchlibrary.net:443", Duration::from_millis(1500));
//! let tiers = Tiers {
//!     memory: Arc::new(MemoryCache::new()),
//!     disk: Arc::new(DiskCache::new("/tmp/launchcache".into())?),
//!     gate: ConnectivityGate::new(Arc::new(probe)),
//!     source: Arc::new(api),
//! };
//!
//! let (orchestrator, mut outcomes) = Orchestrator::new(CacheKey::top_launches(), 10, tiers);
//! orchestrator.fetch(false);
//! while let Some(outcome) = outcomes.recv().await {
//!     if outcome.is_terminal() {
//!         break;
//!     }
//! }
//! # Ok(())
//! # }
//! ```

pub mod api;
pub mod cache;
pub mod config;
pub mod connectivity;
pub mod models;
pub mod orchestrator;
pub mod outcome;

pub use api::{ApiClient, ApiError, LaunchSource};
pub use cache::{CacheKey, CachedData, DiskCache, MemoryCache, StoreError};
pub use config::Config;
pub use connectivity::{
    ConnectivityGate, ConnectivityProbe, ConnectivityState, NoConnectivity, OfflineProbe, TcpProbe,
    TransportType,
};
pub use models::{Dataset, Launch, LaunchResponse};
pub use orchestrator::{Orchestrator, Tiers};
pub use outcome::{FetchError, FetchOutcome};
