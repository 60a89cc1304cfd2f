use crate::error::StitchError;
use dioxus::logger::tracing::{debug, error};

#[cfg(not(target_arch = "wasm32"))]
static PROCESS_START: once_cell::sync::Lazy<std::time::Instant> =
    once_cell::sync::Lazy::new(std::time::Instant::now);

/// Milliseconds on a monotonic clock. `std::time::Instant` is unavailable in
/// the browser, so the web build reads `performance.now()` instead.
#[cfg(not(target_arch = "wasm32"))]
pub fn now_ms() -> f64 {
    PROCESS_START.elapsed().as_secs_f64() * 1000.0
}

#[cfg(target_arch = "wasm32")]
pub fn now_ms() -> f64 {
    web_sys::window()
        .and_then(|w| w.performance())
        .map(|p| p.now())
        .unwrap_or(0.0)
}

#[inline]
pub fn log_perf(scope: &str, started_at_ms: f64, details: &str) {
    let elapsed_ms = (now_ms() - started_at_ms).max(0.0).round() as u64;
    if details.trim().is_empty() {
        debug!("[perf] {scope} took {elapsed_ms}ms");
    } else {
        debug!("[perf] {scope} took {elapsed_ms}ms | {details}");
    }
}

/// Errors are logged and swallowed at the call site.
#[inline]
pub fn log_failure(scope: &str, err: &StitchError) {
    error!("[{scope}] {err}");
}

/// Blocking, user-visible notice. Only logout failures go through here.
pub fn alert_user(message: &str) {
    error!("[alert] {message}");

    #[cfg(target_arch = "wasm32")]
    if let Some(window) = web_sys::window() {
        let _ = window.alert_with_message(message);
    }

    #[cfg(not(target_arch = "wasm32"))]
    {
        let script = format!("alert({});", serde_json::Value::from(message));
        let _ = dioxus::document::eval(&script);
    }
}
