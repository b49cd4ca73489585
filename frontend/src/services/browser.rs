//! Browser side effects: file downloads and clipboard writes.

use wasm_bindgen::prelude::*;
use wasm_bindgen::JsCast;
use wasm_bindgen_futures::JsFuture;
use web_sys::{Blob, BlobPropertyBag, HtmlAnchorElement, Url};

use crate::projector::DownloadableFile;
use crate::types::{AppError, AppResult};

/// Milliseconds since the Unix epoch, from the JS clock.
pub fn now_millis() -> u64 {
    js_sys::Date::now().max(0.0) as u64
}

/// Offer `file` as a download through a temporary object URL.
pub fn download_file(file: &DownloadableFile) -> AppResult<()> {
    let to_err = |e: JsValue| AppError::Download(format!("{:?}", e));

    let document = web_sys::window()
        .and_then(|w| w.document())
        .ok_or_else(|| AppError::Download("No document available".to_string()))?;
    let body = document
        .body()
        .ok_or_else(|| AppError::Download("Document has no body".to_string()))?;

    let parts = js_sys::Array::of1(&JsValue::from_str(&file.contents));
    let options = BlobPropertyBag::new();
    options.set_type(file.mime_type);
    let blob = Blob::new_with_str_sequence_and_options(&parts, &options).map_err(to_err)?;
    let url = Url::create_object_url_with_blob(&blob).map_err(to_err)?;

    let anchor: HtmlAnchorElement = document
        .create_element("a")
        .map_err(to_err)?
        .dyn_into()
        .map_err(|_| AppError::Download("Failed to create link element".to_string()))?;
    anchor.set_href(&url);
    anchor.set_download(&file.file_name);

    body.append_child(&anchor).map_err(to_err)?;
    anchor.click();
    body.remove_child(&anchor).map_err(to_err)?;
    Url::revoke_object_url(&url).map_err(to_err)?;

    log::info!("💾 Downloaded {} ({} bytes)", file.file_name, file.contents.len());
    Ok(())
}

/// Write `text` to the system clipboard via `navigator.clipboard.writeText`.
pub async fn copy_to_clipboard(text: &str) -> AppResult<()> {
    let to_err = |e: JsValue| AppError::Clipboard(format!("{:?}", e));

    let window = web_sys::window().ok_or_else(|| AppError::Clipboard("No window available".to_string()))?;
    let navigator = window.navigator();

    let clipboard = js_sys::Reflect::get(&navigator, &JsValue::from_str("clipboard")).map_err(to_err)?;
    if clipboard.is_undefined() || clipboard.is_null() {
        return Err(AppError::Clipboard("Clipboard API not available".to_string()));
    }

    let write_text: js_sys::Function = js_sys::Reflect::get(&clipboard, &JsValue::from_str("writeText"))
        .map_err(to_err)?
        .dyn_into()
        .map_err(|_| AppError::Clipboard("writeText is not a function".to_string()))?;

    let promise: js_sys::Promise = write_text
        .call1(&clipboard, &JsValue::from_str(text))
        .map_err(to_err)?
        .dyn_into()
        .map_err(|_| AppError::Clipboard("writeText did not return a promise".to_string()))?;

    JsFuture::from(promise).await.map_err(to_err)?;
    Ok(())
}
