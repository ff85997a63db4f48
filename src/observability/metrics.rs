use prometheus::{
    Encoder, HistogramVec, IntCounter, IntCounterVec, IntGauge, Opts, Registry, TextEncoder,
};

#[derive(Clone)]
pub struct Metrics {
    registry: Registry,
    pub transitions_total: IntCounterVec,
    pub dispatched_trips: IntGauge,
    pub transition_latency_seconds: HistogramVec,
    pub trips_created_total: IntCounter,
}

impl Metrics {
    pub fn new() -> Self {
        let registry = Registry::new();

        let transitions_total = IntCounterVec::new(
            Opts::new("transitions_total", "Trip lifecycle transitions by outcome"),
            &["outcome"],
        )
        .expect("valid transitions_total metric");

        let dispatched_trips = IntGauge::new("dispatched_trips", "Trips currently dispatched")
            .expect("valid dispatched_trips metric");

        let transition_latency_seconds = HistogramVec::new(
            prometheus::HistogramOpts::new(
                "transition_latency_seconds",
                "Latency of lifecycle transition handling in seconds",
            ),
            &["outcome"],
        )
        .expect("valid transition_latency_seconds metric");

        let trips_created_total =
            IntCounter::new("trips_created_total", "Trip drafts created since start")
                .expect("valid trips_created_total metric");

        registry
            .register(Box::new(transitions_total.clone()))
            .expect("register transitions_total");
        registry
            .register(Box::new(dispatched_trips.clone()))
            .expect("register dispatched_trips");
        registry
            .register(Box::new(transition_latency_seconds.clone()))
            .expect("register transition_latency_seconds");
        registry
            .register(Box::new(trips_created_total.clone()))
            .expect("register trips_created_total");

        Self {
            registry,
            transitions_total,
            dispatched_trips,
            transition_latency_seconds,
            trips_created_total,
        }
    }

    pub fn encode(&self) -> Result<String, String> {
        let metric_families = self.registry.gather();
        let mut buffer = Vec::new();

        TextEncoder::new()
            .encode(&metric_families, &mut buffer)
            .map_err(|err| format!("failed to encode metrics: {err}"))?;

        String::from_utf8(buffer).map_err(|err| format!("metrics are not valid utf8: {err}"))
    }
}
