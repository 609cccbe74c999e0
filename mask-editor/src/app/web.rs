use super::MaskEditorApp;
use crate::config::Config;

const CANVAS_ID: &str = "mask_editor";

pub fn run_web() {
    use eframe::wasm_bindgen::JsCast as _;

    console_error_panic_hook::set_once();
    // Redirect `log` message to `console.log` and friends:
    eframe::WebLogger::init(log::LevelFilter::Debug).ok();

    let web_options = eframe::WebOptions::default();

    wasm_bindgen_futures::spawn_local(async {
        let document = web_sys::window()
            .expect("No window")
            .document()
            .expect("No document");

        let canvas = document
            .get_element_by_id(CANVAS_ID)
            .expect("Failed to find the mask_editor canvas")
            .dyn_into::<web_sys::HtmlCanvasElement>()
            .expect("mask_editor was not a HtmlCanvasElement");

        log::info!("About to start eframe");
        let start_result = eframe::WebRunner::new()
            .start(
                canvas,
                web_options,
                Box::new(|cc| Ok(Box::new(MaskEditorApp::new(cc, Config::default(), None)))),
            )
            .await;
        log::info!("ended eframe");

        // Remove the loading text and spinner:
        if let Some(loading_text) = document.get_element_by_id("loading_text") {
            match start_result {
                Ok(_) => {
                    loading_text.remove();
                }
                Err(e) => {
                    loading_text.set_inner_html(
                        "<p> The app has crashed. See the developer console for details. </p>",
                    );
                    panic!("Failed to start eframe: {e:?}");
                }
            }
        }
    });
}
