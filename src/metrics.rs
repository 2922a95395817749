use std::{
    collections::BTreeMap,
    sync::{Mutex, OnceLock},
};

static METRICS: OnceLock<Mutex<MetricsState>> = OnceLock::new();

#[derive(Default)]
struct MetricsState {
    total: u64,
    errors: u64,
    per_endpoint: BTreeMap<&'static str, u64>,
    per_endpoint_err: BTreeMap<&'static str, u64>,
}

fn state() -> &'static Mutex<MetricsState> {
    METRICS.get_or_init(|| Mutex::new(MetricsState::default()))
}

pub fn count_ok(endpoint: &'static str) {
    let mut s = match state().lock() {
        Ok(guard) => guard,
        Err(poisoned) => poisoned.into_inner(), // 避免因锁污染导致 panic
    };
    s.total += 1;
    *s.per_endpoint.entry(endpoint).or_insert(0) += 1;
}

pub fn count_err(endpoint: &'static str) {
    let mut s = match state().lock() {
        Ok(guard) => guard,
        Err(poisoned) => poisoned.into_inner(),
    };
    s.total += 1;
    s.errors += 1;
    *s.per_endpoint.entry(endpoint).or_insert(0) += 1;
    *s.per_endpoint_err.entry(endpoint).or_insert(0) += 1;
}

pub fn render_prometheus() -> String {
    let s = match state().lock() {
        Ok(guard) => guard,
        Err(poisoned) => poisoned.into_inner(),
    };
    let mut out = String::new();
    out.push_str("# HELP walletfolio_requests_total Total requests\n");
    out.push_str("# TYPE walletfolio_requests_total counter\n");
    out.push_str(&format!("walletfolio_requests_total {}\n", s.total));

    out.push_str("# HELP walletfolio_errors_total Total error responses\n");
    out.push_str("# TYPE walletfolio_errors_total counter\n");
    out.push_str(&format!("walletfolio_errors_total {}\n", s.errors));

    out.push_str("# HELP walletfolio_endpoint_requests_total Requests per endpoint\n");
    out.push_str("# TYPE walletfolio_endpoint_requests_total counter\n");
    for (ep, n) in &s.per_endpoint {
        out.push_str(&format!(
            "walletfolio_endpoint_requests_total{{endpoint=\"{}\"}} {}\n",
            ep, n
        ));
    }

    out.push_str("# HELP walletfolio_endpoint_errors_total Error responses per endpoint\n");
    out.push_str("# TYPE walletfolio_endpoint_errors_total counter\n");
    for (ep, n) in &s.per_endpoint_err {
        out.push_str(&format!(
            "walletfolio_endpoint_errors_total{{endpoint=\"{}\"}} {}\n",
            ep, n
        ));
    }
    out
}
