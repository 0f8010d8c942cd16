//! Typed wrappers around the page's D3.js renderers.
//!
//! The map and chart renderers are plain globals (`window.renderChoropleth`,
//! `window.renderLineChart`, `window.renderBarChart`) loaded by the host page
//! alongside D3. Payloads are parked on `window.__cidPayloads` as parsed JSON
//! and picked up by a polling loop once the renderer and its container exist,
//! so no JSON is ever spliced into evaluated source.

use js_sys::Reflect;
use wasm_bindgen::closure::Closure;
use wasm_bindgen::JsValue;

const PAYLOAD_STORE: &str = "__cidPayloads";
/// Global the map renderer calls with a county name when a county is clicked.
const COUNTY_CLICK_HANDLER: &str = "cidOnCountyClick";

/// Execute arbitrary JS, wrapping in try/catch to avoid panics.
pub fn call_js(code: &str) {
    let wrapped = format!(
        "try {{ {} }} catch(e) {{ console.warn('CID JS call failed:', e); }}",
        code
    );
    let _ = js_sys::eval(&wrapped);
}

fn window() -> Result<web_sys::Window, JsValue> {
    web_sys::window().ok_or_else(|| JsValue::from_str("no window"))
}

/// Store `payload_json` under `container_id` for the next render of that container.
fn stash_payload(container_id: &str, payload_json: &str) -> Result<(), JsValue> {
    let window = window()?;
    let key = JsValue::from_str(PAYLOAD_STORE);
    let mut store = Reflect::get(&window, &key)?;
    if store.is_undefined() {
        store = js_sys::Object::new().into();
        Reflect::set(&window, &key, &store)?;
    }
    let payload = js_sys::JSON::parse(payload_json)?;
    Reflect::set(&store, &JsValue::from_str(container_id), &payload)?;
    Ok(())
}

/// Call `window.<renderer>(container_id, payload)` once D3, the renderer and
/// the container are all available. A later call for the same container
/// replaces the pending payload.
fn render_when_ready(renderer: &str, container_id: &str, payload_json: &str) {
    if let Err(e) = stash_payload(container_id, payload_json) {
        log::warn!("[CID] js_bridge: {} payload rejected: {:?}", renderer, e);
        return;
    }
    call_js(&format!(
        r#"
        (function() {{
            var poll = setInterval(function() {{
                if (typeof d3 !== 'undefined' &&
                    typeof window.{renderer} === 'function' &&
                    document.getElementById('{container_id}')) {{
                    clearInterval(poll);
                    try {{
                        window.{renderer}('{container_id}', window.{PAYLOAD_STORE}['{container_id}']);
                    }} catch(e) {{ console.error('[CID] {renderer} error:', e); }}
                }}
            }}, 100);
        }})();
        "#,
    ));
}

/// Render the county map.
///
/// Payload: `{ topology, colors: {county: "#rrggbb"}, labels: {county: label}, selected }`.
pub fn render_choropleth(container_id: &str, payload_json: &str) {
    render_when_ready("renderChoropleth", container_id, payload_json);
}

/// Render a per-year line chart.
///
/// Payload: `{ data: [{year, ...series}], config: {title, series, yMax} }`.
pub fn render_line_chart(container_id: &str, payload_json: &str) {
    render_when_ready("renderLineChart", container_id, payload_json);
}

/// Render the male/female bar chart.
///
/// Payload: `{ data: [{label, value}], config: {title, barSize} }`.
pub fn render_bar_chart(container_id: &str, payload_json: &str) {
    render_when_ready("renderBarChart", container_id, payload_json);
}

/// Expose `handler` as `window.cidOnCountyClick(name)` for the map renderer.
///
/// The closure lives for the rest of the page session.
pub fn register_county_click(handler: impl FnMut(String) + 'static) -> Result<(), JsValue> {
    let window = window()?;
    let closure = Closure::<dyn FnMut(String)>::new(handler);
    Reflect::set(
        &window,
        &JsValue::from_str(COUNTY_CLICK_HANDLER),
        closure.as_ref(),
    )?;
    closure.forget();
    Ok(())
}

/// Destroy/clean up a chart in the given container.
pub fn destroy_chart(container_id: &str) {
    call_js(&format!(
        "var el = document.getElementById('{}'); if (el) el.innerHTML = '';",
        container_id
    ));
}
