//! Millisecond wall clock shared by the time-bounded searchers.

/// Milliseconds from an arbitrary origin. Only differences are meaningful.
#[must_use]
pub fn now() -> f64 {
    #[cfg(target_arch = "wasm32")]
    {
        use wasm_bindgen::JsCast;
        if let Some(window) = web_sys::window() {
            return window.performance().map_or(0.0, |p| p.now());
        }
        let global = js_sys::global();
        if let Ok(worker) = global.dyn_into::<web_sys::WorkerGlobalScope>() {
            return worker.performance().map_or(0.0, |p| p.now());
        }
        0.0
    }
    #[cfg(not(target_arch = "wasm32"))]
    {
        use std::time::{SystemTime, UNIX_EPOCH};
        let since_the_epoch = SystemTime::now()
            .duration_since(UNIX_EPOCH)
            .unwrap_or_default();
        #[allow(clippy::cast_precision_loss)]
        let time_ms = (since_the_epoch.as_secs() as f64).mul_add(
            1000.0,
            f64::from(since_the_epoch.subsec_nanos()) / 1_000_000.0,
        );
        time_ms
    }
}

/// Start time plus an optional budget.
#[derive(Debug, Clone, Copy)]
pub struct Deadline {
    start: f64,
    budget_ms: Option<f64>,
}

impl Deadline {
    #[must_use]
    #[allow(clippy::cast_precision_loss)]
    pub fn start(budget_ms: Option<u64>) -> Self {
        Self {
            start: now(),
            budget_ms: budget_ms.map(|ms| ms as f64),
        }
    }

    #[must_use]
    pub fn unbounded() -> Self {
        Self::start(None)
    }

    #[must_use]
    pub fn elapsed_ms(&self) -> f64 {
        (now() - self.start).max(0.0)
    }

    #[must_use]
    pub fn expired(&self) -> bool {
        self.budget_ms
            .is_some_and(|budget| self.elapsed_ms() >= budget)
    }

    #[must_use]
    #[allow(clippy::cast_possible_truncation, clippy::cast_sign_loss)]
    pub fn elapsed_whole_ms(&self) -> u64 {
        self.elapsed_ms() as u64
    }
}
