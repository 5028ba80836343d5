use prometheus::{Counter, CounterVec, Encoder, Gauge, Histogram, HistogramOpts, Opts, Registry, TextEncoder};
use lazy_static::lazy_static;
use std::sync::{Once, OnceLock};
use std::time::{Instant, SystemTime};

use crate::utils::error::{AppError, Result};

// 全局服务启动时间
static SERVICE_START_TIME: OnceLock<SystemTime> = OnceLock::new();
static REGISTER: Once = Once::new();

lazy_static! {
    pub static ref REGISTRY: Registry = Registry::new();

    pub static ref REQUEST_COUNTER: Counter = Counter::with_opts(
        Opts::new("meme_requests_total", "Total number of meme requests")
    ).unwrap();

    pub static ref RESPONSE_TIME: Histogram = Histogram::with_opts(
        HistogramOpts::new("meme_response_duration_seconds", "Response time for meme requests")
    ).unwrap();

    pub static ref UPSTREAM_FAILURES: CounterVec = CounterVec::new(
        Opts::new("meme_upstream_failures_total", "Failed upstream meme fetches by kind"),
        &["kind"]
    ).unwrap();

    pub static ref SERVICE_UPTIME_SECONDS: Gauge = Gauge::with_opts(
        Opts::new("service_uptime_seconds", "Service uptime in seconds")
    ).unwrap();
}

/// 注册所有指标，重复调用无副作用
pub fn init_metrics() {
    REGISTER.call_once(|| {
        REGISTRY.register(Box::new(REQUEST_COUNTER.clone())).unwrap();
        REGISTRY.register(Box::new(RESPONSE_TIME.clone())).unwrap();
        REGISTRY.register(Box::new(UPSTREAM_FAILURES.clone())).unwrap();
        REGISTRY.register(Box::new(SERVICE_UPTIME_SECONDS.clone())).unwrap();
    });
}

/// 设置服务启动时间
pub fn set_service_start_time(start_time: SystemTime) {
    SERVICE_START_TIME.set(start_time).ok();
}

pub fn get_metrics() -> Result<String> {
    // 按需更新服务运行时间
    if let Some(start_time) = SERVICE_START_TIME.get() {
        if let Ok(uptime) = start_time.elapsed() {
            SERVICE_UPTIME_SECONDS.set(uptime.as_secs() as f64);
        }
    }

    let encoder = TextEncoder::new();
    let metric_families = REGISTRY.gather();
    let mut buffer = Vec::new();
    encoder
        .encode(&metric_families, &mut buffer)
        .map_err(|e| AppError::Internal(format!("Failed to encode metrics: {}", e)))?;
    String::from_utf8(buffer).map_err(|e| AppError::Internal(format!("Metrics are not UTF-8: {}", e)))
}

pub struct Timer {
    start: Instant,
    histogram: &'static Histogram,
}

impl Timer {
    pub fn new(histogram: &'static Histogram) -> Self {
        Self {
            start: Instant::now(),
            histogram,
        }
    }
}

impl Drop for Timer {
    fn drop(&mut self) {
        let duration = self.start.elapsed();
        self.histogram.observe(duration.as_secs_f64());
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn init_is_idempotent() {
        init_metrics();
        init_metrics();
        UPSTREAM_FAILURES.with_label_values(&["unreachable"]).inc();

        let text = get_metrics().unwrap();
        assert!(text.contains("meme_upstream_failures_total"));
    }

    #[test]
    fn timer_observes_on_drop() {
        let before = RESPONSE_TIME.get_sample_count();
        {
            let _timer = Timer::new(&RESPONSE_TIME);
        }
        assert!(RESPONSE_TIME.get_sample_count() > before);
    }
}
