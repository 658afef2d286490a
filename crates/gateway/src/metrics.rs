use opentelemetry::{
    KeyValue, global,
    metrics::{Counter, Histogram},
};
use std::time::Duration;

/// Request-level instruments, no-ops unless a meter provider is installed.
#[derive(Clone)]
pub struct DetectMetrics {
    duration: Histogram<f64>,
    requests: Counter<u64>,
    failures: Counter<u64>,
    detections: Counter<u64>,
}

impl DetectMetrics {
    pub fn new(meter_name: &'static str) -> Self {
        let meter = global::meter(meter_name);
        let latency_buckets = [
            0.01, 0.025, 0.05, 0.1, 0.25, 0.5, 0.75, 1.0, 1.5, 2.0, 3.0, 5.0, 10.0,
        ];

        Self {
            duration: meter
                .f64_histogram("detect_duration_seconds")
                .with_description("Time to serve one /detect request (decode + infer + annotate + encode)")
                .with_unit("s")
                .with_boundaries(latency_buckets.to_vec())
                .build(),
            requests: meter
                .u64_counter("detect_requests_total")
                .with_description("Total /detect requests")
                .build(),
            failures: meter
                .u64_counter("detect_failures_total")
                .with_description("Total /detect requests answered with an error")
                .build(),
            detections: meter
                .u64_counter("detections_total")
                .with_description("Total detections returned")
                .build(),
        }
    }

    pub fn record_success(&self, elapsed: Duration, detections: usize) {
        self.requests.add(1, &[]);
        self.detections.add(detections as u64, &[]);
        self.duration
            .record(elapsed.as_secs_f64(), &[KeyValue::new("outcome", "success")]);
    }

    pub fn record_failure(&self, elapsed: Duration, kind: &'static str) {
        self.requests.add(1, &[]);
        self.failures.add(1, &[KeyValue::new("error", kind)]);
        self.duration
            .record(elapsed.as_secs_f64(), &[KeyValue::new("outcome", "failure")]);
    }
}
