//! Clock source injected into the selection core.
//!
//! The core never reads time itself; the UI samples `now_ms()` once per
//! frame and passes it in, which keeps the algorithm testable with plain
//! numbers.

/// Monotonic milliseconds since an arbitrary epoch.
#[cfg(target_arch = "wasm32")]
pub fn now_ms() -> f64 {
    match gloo_utils::window().performance() {
        Some(performance) => performance.now(),
        // Performance is absent in some embedded webviews; wall clock is
        // close enough for an animation cadence.
        None => js_sys::Date::now(),
    }
}

/// Monotonic milliseconds since the first call (native builds).
#[cfg(not(target_arch = "wasm32"))]
pub fn now_ms() -> f64 {
    use once_cell::sync::Lazy;
    use std::time::Instant;

    static EPOCH: Lazy<Instant> = Lazy::new(Instant::now);
    EPOCH.elapsed().as_secs_f64() * 1_000.0
}
