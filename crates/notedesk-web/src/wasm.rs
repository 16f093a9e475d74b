#![forbid(unsafe_code)]

//! `wasm-bindgen` exports for the desk runner.
//!
//! Wraps [`super::runner_core::RunnerCore`] with JS-friendly types. Only
//! compiled on `wasm32` targets.

use js_sys::{Array, Object, Reflect};
use wasm_bindgen::JsCast;
use wasm_bindgen::prelude::*;

use super::runner_core::{RunnerCore, format_panic_report};

/// Report a desk failure through `console.error`. Silently gives up when
/// the page has no usable console.
fn report_to_console(message: &str) {
    let console = Reflect::get(&js_sys::global(), &"console".into())
        .ok()
        .filter(|console| !console.is_undefined());
    let Some(console) = console else {
        return;
    };
    let report = Reflect::get(&console, &"error".into())
        .ok()
        .and_then(|f| f.dyn_into::<js_sys::Function>().ok());
    if let Some(report) = report {
        let _ = report.call1(&console, &JsValue::from_str(message));
    }
}

/// Route desk panics to the page console instead of an opaque trap.
fn route_panics_to_console() {
    use std::sync::Once;

    static HOOKED: Once = Once::new();
    HOOKED.call_once(|| {
        std::panic::set_hook(Box::new(|info| {
            let location = info.location().map(|loc| (loc.file(), loc.line()));
            report_to_console(&format_panic_report(location, info));
        }));
    });
}

/// Field of a plain JS object handed back from [`NotebookDesk::step`].
fn put_step_field(summary: &Object, name: &str, value: JsValue) {
    let _ = Reflect::set(summary, &JsValue::from_str(name), &value);
}

/// The desk as seen from the page's JS glue.
#[wasm_bindgen]
pub struct NotebookDesk {
    inner: RunnerCore,
}

#[wasm_bindgen(start)]
pub fn wasm_start() {
    route_panics_to_console();
}

#[wasm_bindgen]
impl NotebookDesk {
    /// Default desk for a `viewport_width` (`window.innerWidth`) page. It
    /// mounts on the first `step()`.
    #[wasm_bindgen(constructor)]
    pub fn new(viewport_width: f64, seed: u32) -> Self {
        route_panics_to_console();
        Self {
            inner: RunnerCore::new(viewport_width, u64::from(seed)),
        }
    }

    /// Desk from a JSON `DeskConfig`. Throws on invalid config.
    #[wasm_bindgen(js_name = withConfig)]
    pub fn with_config(
        config_json: &str,
        viewport_width: f64,
        seed: u32,
    ) -> Result<NotebookDesk, JsValue> {
        route_panics_to_console();
        RunnerCore::from_config_json(config_json, viewport_width, u64::from(seed))
            .map(|inner| Self { inner })
            .map_err(|err| JsValue::from_str(&err.to_string()))
    }

    /// Advance the clock by `dt_ms` milliseconds.
    #[wasm_bindgen(js_name = advanceTime)]
    pub fn advance_time(&mut self, dt_ms: f64) {
        self.inner.advance_time_ms(dt_ms);
    }

    /// Set the clock to a `requestAnimationFrame` timestamp.
    #[wasm_bindgen(js_name = setTime)]
    pub fn set_time(&mut self, ts_ms: f64) {
        self.inner.set_time_ms(ts_ms);
    }

    /// Queue a JSON-encoded DOM event.
    /// Returns `true` if accepted, `false` if ignored or malformed.
    #[wasm_bindgen(js_name = pushEncodedInput)]
    pub fn push_encoded_input(&mut self, json: &str) -> bool {
        self.inner.push_encoded_input(json)
    }

    /// Replace the measurement snapshot used by the next step.
    #[wasm_bindgen(js_name = pushSnapshot)]
    pub fn push_snapshot(&mut self, json: &str) -> bool {
        self.inner.set_snapshot_json(json)
    }

    /// Run one frame, then process queued input.
    /// Returns `{ inputs_processed, commands, settle_pending, frame_idx }`.
    pub fn step(&mut self) -> JsValue {
        let result = self.inner.step();
        let summary = Object::new();
        put_step_field(&summary, "inputs_processed", result.inputs_processed.into());
        put_step_field(&summary, "commands", JsValue::from_f64(result.commands as f64));
        put_step_field(&summary, "settle_pending", result.settle_pending.into());
        put_step_field(&summary, "frame_idx", JsValue::from_f64(result.frame_idx as f64));
        summary.into()
    }

    /// Drain host commands as a JSON array of `{ "op": ..., ... }` objects.
    #[wasm_bindgen(js_name = takeCommands)]
    pub fn take_commands(&mut self) -> String {
        self.inner.take_commands_json()
    }

    /// Drain log lines since the last call.
    #[wasm_bindgen(js_name = takeLogs)]
    pub fn take_logs(&mut self) -> Array {
        let arr = Array::new();
        for log in self.inner.take_logs() {
            arr.push(&JsValue::from_str(&log));
        }
        arr
    }

    /// `"narrow"`, `"medium"` or `"wide"`.
    pub fn mode(&self) -> String {
        self.inner.desk().mode().label().to_owned()
    }

    #[wasm_bindgen(js_name = activeTab)]
    pub fn active_tab(&self) -> String {
        self.inner.desk().active_tab().label().to_owned()
    }

    #[wasm_bindgen(js_name = menuState)]
    pub fn menu_state(&self) -> String {
        self.inner.desk().menu_state().label().to_owned()
    }

    #[wasm_bindgen(js_name = hintVisible)]
    pub fn hint_visible(&self) -> bool {
        self.inner.desk().hint_visible()
    }

    /// Last container height sent to the host, or `undefined`.
    #[wasm_bindgen(js_name = containerHeight)]
    pub fn container_height(&self) -> Option<f64> {
        self.inner.desk().container_height()
    }
}
