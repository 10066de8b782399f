#![forbid(unsafe_code)]

//! `wasm-bindgen` exports for the spotlight runner.
//!
//! This module wraps [`super::runner_core::RunnerCore`] with JS-friendly
//! types. Only compiled on `wasm32` targets.

use js_sys::{Array, Object, Reflect};
use wasm_bindgen::JsCast;
use wasm_bindgen::prelude::*;

use spotlight_core::{DeviceClass, Page};

use super::runner_core::{RunnerConfig, RunnerCore, StyleCommand};

fn console_error(msg: &str) {
    let global = js_sys::global();
    let Ok(console) = Reflect::get(&global, &"console".into()) else {
        return;
    };
    let Ok(error) = Reflect::get(&console, &"error".into()) else {
        return;
    };
    let Ok(error_fn) = error.dyn_into::<js_sys::Function>() else {
        return;
    };
    let _ = error_fn.call1(&console, &JsValue::from_str(msg));
}

fn install_panic_hook() {
    use std::sync::Once;

    static ONCE: Once = Once::new();
    ONCE.call_once(|| {
        std::panic::set_hook(Box::new(|info| {
            let msg = if let Some(loc) = info.location() {
                format!(
                    "panic at {}:{}:{}: {info}",
                    loc.file(),
                    loc.line(),
                    loc.column()
                )
            } else {
                format!("panic: {info}")
            };
            console_error(&msg);
        }));
    });
}

fn set_js(obj: &Object, key: &str, value: JsValue) {
    let _ = Reflect::set(obj, &JsValue::from_str(key), &value);
}

fn page_from_str(page: &str) -> Option<Page> {
    match page {
        "index" => Some(Page::Index),
        "home" => Some(Page::Home),
        _ => None,
    }
}

fn commands_to_js(commands: Vec<StyleCommand>) -> Array {
    let arr = Array::new_with_length(commands.len() as u32);
    for (idx, command) in commands.into_iter().enumerate() {
        let obj = Object::new();
        set_js(&obj, "target", JsValue::from_str(command.target.as_str()));
        set_js(
            &obj,
            "index",
            command
                .target
                .index()
                .map_or(JsValue::NULL, |i| JsValue::from_f64(i as f64)),
        );
        set_js(&obj, "property", JsValue::from_str(command.property));
        set_js(&obj, "value", JsValue::from_str(&command.value));
        arr.set(idx as u32, obj.into());
    }
    arr
}

/// Classify the device the way the page scripts do.
#[wasm_bindgen(js_name = isMobileDevice)]
pub fn is_mobile_device(viewport_width: f64, user_agent: &str) -> bool {
    DeviceClass::detect(viewport_width, user_agent).is_mobile()
}

/// JS-facing spotlight runner.
///
/// Construction throws on degenerate layout so the host can skip this
/// animation without affecting the rest of the page.
#[wasm_bindgen]
pub struct SpotlightRunner {
    core: RunnerCore,
}

#[wasm_bindgen]
impl SpotlightRunner {
    #[allow(clippy::too_many_arguments)]
    #[wasm_bindgen(constructor)]
    pub fn new(
        page: &str,
        mobile: bool,
        container_height: f64,
        viewport_height: f64,
        section_top: f64,
        section_height: f64,
        header_text: String,
        nav_height: f64,
        footer_top: Option<f64>,
    ) -> Result<SpotlightRunner, JsValue> {
        install_panic_hook();
        let page = page_from_str(page)
            .ok_or_else(|| JsValue::from_str(&format!("unknown page: {page}")))?;
        let config = RunnerConfig {
            page,
            device: if mobile {
                DeviceClass::Mobile
            } else {
                DeviceClass::Desktop
            },
            container_height,
            viewport_height,
            section_top,
            section_height,
            header_text,
            nav_height,
            footer_top,
        };
        let core = RunnerCore::new(&config).map_err(|err| {
            tracing::warn!(%err, "spotlight runner disabled");
            JsValue::from_str(&err.to_string())
        })?;
        Ok(Self { core })
    }

    /// Header words in order; the host wraps each in a span.
    pub fn words(&self) -> Array {
        let words = self.core.words();
        let arr = Array::new_with_length(words.len() as u32);
        for (idx, word) in words.iter().enumerate() {
            arr.set(idx as u32, JsValue::from_str(word));
        }
        arr
    }

    /// Feed a scroll position; returns nav style writes.
    pub fn scroll(&mut self, scroll_y: f64) -> Array {
        commands_to_js(self.core.scroll(scroll_y))
    }

    /// Advance one frame; returns spotlight style writes.
    pub fn frame(&mut self, dt_ms: f64) -> Array {
        commands_to_js(self.core.frame(dt_ms))
    }

    #[wasm_bindgen(js_name = isIdle)]
    pub fn is_idle(&self) -> bool {
        self.core.is_idle()
    }

    pub fn invalidate(&mut self) {
        self.core.invalidate();
    }
}
