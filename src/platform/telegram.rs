//! Telegram Mini App host
//!
//! Reads `window.Telegram.WebApp` if present. Outside Telegram everything
//! here quietly returns nothing.

use js_sys::{Function, Reflect};
use wasm_bindgen::{JsCast, JsValue};

use crate::identity::HostIdentity;

fn prop(target: &JsValue, name: &str) -> Option<JsValue> {
    Reflect::get(target, &JsValue::from_str(name))
        .ok()
        .filter(|v| !v.is_undefined() && !v.is_null())
}

fn web_app() -> Option<JsValue> {
    let window: JsValue = web_sys::window()?.into();
    let telegram = prop(&window, "Telegram")?;
    prop(&telegram, "WebApp")
}

/// Expand the Mini App to full height
pub fn expand() {
    let Some(app) = web_app() else { return };
    if let Some(f) = prop(&app, "expand").and_then(|f| f.dyn_into::<Function>().ok()) {
        if f.call0(&app).is_err() {
            log::warn!("Telegram WebApp.expand() failed");
        }
    }
}

/// User id and start parameter from `initDataUnsafe`
pub fn host_identity() -> HostIdentity {
    let Some(init) = web_app().and_then(|app| prop(&app, "initDataUnsafe")) else {
        log::info!("Not running inside Telegram");
        return HostIdentity::default();
    };

    // Telegram ids are numbers; keep them as opaque strings
    let user_id = prop(&init, "user")
        .and_then(|user| prop(&user, "id"))
        .and_then(|id| {
            id.as_f64()
                .map(|n| format!("{}", n as i64))
                .or_else(|| id.as_string())
        });
    let start_param = prop(&init, "start_param").and_then(|p| p.as_string());

    log::info!(
        "Telegram host: user={}, start_param={}",
        user_id.is_some(),
        start_param.is_some()
    );
    HostIdentity::new(user_id, start_param)
}
