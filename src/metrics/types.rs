use {
    lazy_static::lazy_static,
    prometheus::{
        GaugeVec, HistogramVec, IntCounter, IntCounterVec,
        Opts, Registry,
    },
    std::sync::Once,
};

lazy_static! {
    pub static ref REGISTRY: Registry = Registry::new();

    // RPC metrics
    pub static ref RPC_REQUESTS: IntCounterVec =
        IntCounterVec::new(
            Opts::new("rpc_requests", "RPC attempts issued, by endpoint"),
            &["endpoint"]
        ).unwrap();

    pub static ref RPC_REQUEST_LATENCY_MS: HistogramVec =
        HistogramVec::new(
            Opts::new("rpc_request_latency_ms", "Latency of successful RPC calls in milliseconds").into(),
            &["endpoint"]
        ).unwrap();

    pub static ref RPC_FAILOVERS: IntCounter =
        IntCounter::new("rpc_failovers", "Times a failed call rotated the active endpoint").unwrap();

    pub static ref ENDPOINT_LATENCY_MS: GaugeVec =
        GaugeVec::new(
            Opts::new("endpoint_latency_ms", "Probed endpoint latency in milliseconds"),
            &["endpoint"]
        ).unwrap();

    // Scan metrics
    pub static ref HOLDER_SCANS: IntCounter =
        IntCounter::new("holder_scans", "Holder aggregation passes started").unwrap();

    pub static ref SIGNATURE_LOOKUP_FAILURES: IntCounter =
        IntCounter::new("signature_lookup_failures", "First-activity lookups absorbed as missing data").unwrap();
}

static REGISTER: Once = Once::new();

// Register all metrics. Safe to call more than once.
pub fn register_metrics() {
    REGISTER.call_once(|| {
        REGISTRY.register(Box::new(RPC_REQUESTS.clone())).unwrap();
        REGISTRY.register(Box::new(RPC_REQUEST_LATENCY_MS.clone())).unwrap();
        REGISTRY.register(Box::new(RPC_FAILOVERS.clone())).unwrap();
        REGISTRY.register(Box::new(ENDPOINT_LATENCY_MS.clone())).unwrap();
        REGISTRY.register(Box::new(HOLDER_SCANS.clone())).unwrap();
        REGISTRY.register(Box::new(SIGNATURE_LOOKUP_FAILURES.clone())).unwrap();
    });
}
