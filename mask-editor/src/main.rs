#[cfg(not(target_arch = "wasm32"))]
fn main() -> eframe::Result {
    mask_editor::run_native()
}

#[cfg(target_arch = "wasm32")]
fn main() {
    mask_editor::run_web();
}
