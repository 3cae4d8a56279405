//! Platform glue that differs between the browser and native test builds.

/// Reload the current view from the server. The override workflow calls this
/// unconditionally so the page never shows a stale classification. Off-web
/// there is no document to reload.
pub fn reload_view() {
    #[cfg(target_arch = "wasm32")]
    if let Some(window) = web_sys::window() {
        let _ = window.location().reload();
    }
}
