use std::path::PathBuf;

use futures::{FutureExt, future::BoxFuture};
use log::{error, info};
use mask_canvas::{ExportError, MaskExport};

fn log_result(result: &Result<String, ExportError>) {
    match result {
        Ok(target) => info!("Mask exported to {target}"),
        Err(e) => error!("Mask export failed: {e}"),
    }
}

/// Encodes the mask and writes it to `export_dir`. Resolves to the written path.
#[cfg(not(target_arch = "wasm32"))]
pub(super) fn download_mask(
    export: MaskExport,
    export_dir: PathBuf,
) -> BoxFuture<'static, Result<String, ExportError>> {
    super::run_blocking(move || -> Result<String, ExportError> {
        let png = export.encode_png()?;
        std::fs::create_dir_all(&export_dir)?;
        let path = export_dir.join(export.file_name());
        std::fs::write(&path, png)?;
        Ok(path.display().to_string())
    })
    .map(|r| {
        let result =
            r.unwrap_or_else(|| Err(ExportError::Download("Export worker stopped".into())));
        log_result(&result);
        result
    })
    .boxed()
}

/// Hands the PNG to the browser as a download. `export_dir` has no meaning here.
#[cfg(target_arch = "wasm32")]
pub(super) fn download_mask(
    export: MaskExport,
    _export_dir: PathBuf,
) -> BoxFuture<'static, Result<String, ExportError>> {
    let result = export.encode_png().and_then(|png| {
        trigger_browser_download(&png, export.file_name())?;
        Ok(export.file_name().to_owned())
    });
    log_result(&result);
    futures::future::ready(result).boxed()
}

#[cfg(target_arch = "wasm32")]
fn trigger_browser_download(png: &[u8], file_name: &str) -> Result<(), ExportError> {
    use wasm_bindgen::JsCast as _;

    let js_err = |e: wasm_bindgen::JsValue| ExportError::Download(format!("{e:?}"));

    let document = web_sys::window()
        .and_then(|w| w.document())
        .ok_or_else(|| ExportError::Download("No document".into()))?;

    let parts = js_sys::Array::of1(&js_sys::Uint8Array::from(png));
    let options = web_sys::BlobPropertyBag::new();
    options.set_type("image/png");
    let blob = web_sys::Blob::new_with_u8_array_sequence_and_options(&parts, &options)
        .map_err(js_err)?;
    let url = web_sys::Url::create_object_url_with_blob(&blob).map_err(js_err)?;

    let anchor = document
        .create_element("a")
        .map_err(js_err)?
        .dyn_into::<web_sys::HtmlAnchorElement>()
        .map_err(|_| ExportError::Download("Not an anchor element".into()))?;
    anchor.set_href(&url);
    anchor.set_download(file_name);
    anchor.click();

    web_sys::Url::revoke_object_url(&url).map_err(js_err)
}
