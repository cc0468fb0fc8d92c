use {
    crate::{
        error::ScanError,
        metrics::{ENDPOINT_LATENCY_MS, RPC_FAILOVERS, RPC_REQUESTS, RPC_REQUEST_LATENCY_MS},
        rpc::endpoints::{
            EndpointHealth, RpcEndpoint, LATENCY_UNPROBED, PROBE_FAILED_MS, RPC_ENDPOINTS,
        },
    },
    futures::future::join_all,
    log::{debug, info, warn},
    solana_client::{
        client_error::{ClientError, ClientErrorKind},
        nonblocking::rpc_client::RpcClient,
    },
    solana_sdk::commitment_config::CommitmentConfig,
    std::{
        future::Future,
        sync::{
            atomic::{AtomicU64, AtomicUsize, Ordering},
            Arc,
        },
        time::{Duration, Instant},
    },
    tokio::time::timeout,
};

/// HTTP timeout applied to every call on every endpoint client.
const REQUEST_TIMEOUT: Duration = Duration::from_secs(60);

/// How long one latency probe may run before it counts as failed.
const PROBE_TIMEOUT: Duration = Duration::from_secs(5);

/// Retries after the first failed attempt. Three attempts total per call.
pub const MAX_RETRIES: usize = 2;

/// RPC access with latency-probed endpoint selection and failover retry.
///
/// One nonblocking client per endpoint is built up front. `execute` runs the
/// operation against the currently active endpoint and rotates to the next
/// registry entry whenever an attempt fails; the rotation persists across
/// calls. Construct once and share via `Arc`.
pub struct FailoverRpc {
    endpoints: Vec<RpcEndpoint>,
    clients: Vec<Arc<RpcClient>>,
    latencies: Vec<AtomicU64>,
    active: AtomicUsize,
    max_retries: usize,
}

impl FailoverRpc {
    /// Builds the client set over the built-in endpoint registry.
    pub fn new() -> Arc<Self> {
        Self::with_endpoints(RPC_ENDPOINTS.to_vec(), MAX_RETRIES)
    }

    /// Builds the client set over a custom endpoint list. The first entry is
    /// active until a probe or a failover moves the pointer.
    pub fn with_endpoints(endpoints: Vec<RpcEndpoint>, max_retries: usize) -> Arc<Self> {
        assert!(!endpoints.is_empty(), "endpoint list must not be empty");

        let clients = endpoints
            .iter()
            .map(|endpoint| {
                Arc::new(RpcClient::new_with_timeout_and_commitment(
                    endpoint.url.to_string(),
                    REQUEST_TIMEOUT,
                    CommitmentConfig::confirmed(),
                ))
            })
            .collect();
        let latencies = endpoints
            .iter()
            .map(|_| AtomicU64::new(LATENCY_UNPROBED))
            .collect();

        Arc::new(Self {
            endpoints,
            clients,
            latencies,
            active: AtomicUsize::new(0),
            max_retries,
        })
    }

    /// Runs the latency probe on a background task, so construction and the
    /// first requests never wait on it.
    pub fn spawn_latency_probe(self: &Arc<Self>) {
        let rpc = Arc::clone(self);
        tokio::spawn(async move {
            rpc.probe_latencies().await;
        });
    }

    /// Probes every endpoint concurrently and reroutes to the fastest.
    ///
    /// Each probe is one `getSlot` round trip. A probe that errors or times
    /// out records [`PROBE_FAILED_MS`], which sorts behind every real
    /// measurement without making the endpoint unselectable. All probes are
    /// awaited before any selection happens.
    pub async fn probe_latencies(&self) {
        info!("Probing latency of {} RPC endpoints", self.endpoints.len());

        let probes = self.clients.iter().map(|client| {
            let client = Arc::clone(client);
            async move {
                let started = Instant::now();
                match timeout(PROBE_TIMEOUT, client.get_slot()).await {
                    Ok(Ok(_)) => Some(started.elapsed().as_millis() as u64),
                    Ok(Err(err)) => {
                        warn!("Latency probe failed for {}: {}", client.url(), err);
                        None
                    }
                    Err(_) => {
                        warn!("Latency probe timed out for {}", client.url());
                        None
                    }
                }
            }
        });

        let results = join_all(probes).await;
        self.apply_probe_results(&results);
    }

    /// Records probe outcomes and moves the active pointer to the fastest
    /// endpoint. When nothing reported a real latency the pointer stays put.
    fn apply_probe_results(&self, results: &[Option<u64>]) {
        let mut fastest: Option<(usize, u64)> = None;

        for (idx, result) in results.iter().enumerate() {
            let latency = result.unwrap_or(PROBE_FAILED_MS);
            self.latencies[idx].store(latency, Ordering::Release);
            ENDPOINT_LATENCY_MS
                .with_label_values(&[self.endpoints[idx].name])
                .set(latency as f64);
            debug!("Endpoint {}: {} ms", self.endpoints[idx].name, latency);

            if result.is_some() && fastest.map_or(true, |(_, best)| latency < best) {
                fastest = Some((idx, latency));
            }
        }

        match fastest {
            Some((idx, latency)) => {
                let previous = self.active.swap(idx, Ordering::AcqRel);
                if previous == idx {
                    info!(
                        "Keeping active RPC endpoint {} ({} ms)",
                        self.endpoints[idx].name, latency
                    );
                } else {
                    info!(
                        "Switching active RPC endpoint to {} ({} ms)",
                        self.endpoints[idx].name, latency
                    );
                }
            }
            None => warn!(
                "No RPC endpoint answered its latency probe, keeping {}",
                self.active_endpoint().name
            ),
        }
    }

    /// Runs one logical RPC operation with failover retry.
    ///
    /// The closure receives the client of the currently active endpoint;
    /// every failure rotates the active pointer to the next registry entry
    /// (wrapping) before the retry, and the switch persists for later calls.
    /// Once the whole budget is spent the last transport error surfaces as
    /// [`ScanError::EndpointsExhausted`].
    pub async fn execute<T, F, Fut>(&self, mut op: F) -> Result<T, ScanError>
    where
        F: FnMut(Arc<RpcClient>) -> Fut,
        Fut: Future<Output = Result<T, ClientError>>,
    {
        let attempts = self.max_retries + 1;
        let mut last_err: Option<ClientError> = None;

        for attempt in 1..=attempts {
            let idx = self.active.load(Ordering::Acquire);
            let endpoint = self.endpoints[idx];
            RPC_REQUESTS.with_label_values(&[endpoint.name]).inc();

            let started = Instant::now();
            match op(Arc::clone(&self.clients[idx])).await {
                Ok(value) => {
                    RPC_REQUEST_LATENCY_MS
                        .with_label_values(&[endpoint.name])
                        .observe(started.elapsed().as_millis() as f64);
                    return Ok(value);
                }
                Err(err) => {
                    warn!(
                        "RPC attempt {}/{} failed on {}: {}",
                        attempt, attempts, endpoint.name, err
                    );
                    last_err = Some(err);

                    if attempt < attempts {
                        let next = (idx + 1) % self.endpoints.len();
                        self.active.store(next, Ordering::Release);
                        RPC_FAILOVERS.inc();
                        info!("Failing over to RPC endpoint {}", self.endpoints[next].name);
                    }
                }
            }
        }

        Err(ScanError::EndpointsExhausted {
            attempts,
            // The loop above always runs at least once.
            last: last_err.unwrap_or_else(|| {
                ClientErrorKind::Custom("no RPC attempt was made".to_string()).into()
            }),
        })
    }

    /// The endpoint requests currently go to.
    pub fn active_endpoint(&self) -> RpcEndpoint {
        self.endpoints[self.active.load(Ordering::Acquire)]
    }

    /// Probe-state snapshot of every endpoint, in registry order.
    pub fn endpoint_health(&self) -> Vec<EndpointHealth> {
        let active = self.active.load(Ordering::Acquire);
        self.endpoints
            .iter()
            .enumerate()
            .map(|(idx, endpoint)| EndpointHealth {
                name: endpoint.name,
                url: endpoint.url,
                latency_ms: match self.latencies[idx].load(Ordering::Acquire) {
                    LATENCY_UNPROBED => None,
                    ms => Some(ms),
                },
                active: idx == active,
            })
            .collect()
    }
}
