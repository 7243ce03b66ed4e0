use prometheus::{Encoder, IntCounter, IntCounterVec, IntGauge, Opts, Registry, TextEncoder};

#[derive(Clone)]
pub struct Metrics {
    registry: Registry,
    pub wizard_transitions_total: IntCounterVec,
    pub bookings_submitted_total: IntCounter,
    pub active_wizards: IntGauge,
    pub login_attempts_total: IntCounterVec,
}

impl Metrics {
    pub fn new() -> Self {
        let registry = Registry::new();

        let wizard_transitions_total = IntCounterVec::new(
            Opts::new(
                "wizard_transitions_total",
                "Booking wizard transitions by action and outcome",
            ),
            &["action", "outcome"],
        )
        .expect("valid wizard_transitions_total metric");

        let bookings_submitted_total =
            IntCounter::new("bookings_submitted_total", "Total submitted bookings")
                .expect("valid bookings_submitted_total metric");

        let active_wizards = IntGauge::new("active_wizards", "Booking wizards currently open")
            .expect("valid active_wizards metric");

        let login_attempts_total = IntCounterVec::new(
            Opts::new("login_attempts_total", "Login attempts by outcome"),
            &["outcome"],
        )
        .expect("valid login_attempts_total metric");

        registry
            .register(Box::new(wizard_transitions_total.clone()))
            .expect("register wizard_transitions_total");
        registry
            .register(Box::new(bookings_submitted_total.clone()))
            .expect("register bookings_submitted_total");
        registry
            .register(Box::new(active_wizards.clone()))
            .expect("register active_wizards");
        registry
            .register(Box::new(login_attempts_total.clone()))
            .expect("register login_attempts_total");

        Self {
            registry,
            wizard_transitions_total,
            bookings_submitted_total,
            active_wizards,
            login_attempts_total,
        }
    }

    pub fn record_transition(&self, action: &str, ok: bool) {
        let outcome = if ok { "success" } else { "rejected" };
        self.wizard_transitions_total
            .with_label_values(&[action, outcome])
            .inc();
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

impl Default for Metrics {
    fn default() -> Self {
        Self::new()
    }
}
