use std::path::{Path, PathBuf};

use egui::load::BytesPoll;
use futures::{FutureExt, future::BoxFuture};
use log::{debug, info, warn};
use mask_canvas::{
    AsyncTask, ImageFile, ImageLoadError, LoadedImage, MaskEditor, decode_image, is_image_mime,
    mime_from_bytes, mime_from_path,
};

use super::run_blocking;

const IMAGE_EXTENSIONS: &[&str] = &["png", "jpg", "jpeg", "gif", "tif", "tiff"];

#[derive(Debug, thiserror::Error)]
pub(crate) enum LoadError {
    #[error(transparent)]
    Image(#[from] ImageLoadError),
    #[error("Cannot read {path:?}: {source}")]
    Read {
        path: PathBuf,
        source: std::io::Error,
    },
    #[error("Image loader stopped unexpectedly")]
    Canceled,
}

type LoadTask = AsyncTask<Result<LoadedImage, LoadError>>;

enum Placeholder {
    Waiting(String),
    Done,
}

/// Everything that can bring a new image into the editor
pub(crate) struct ImageLoader {
    placeholder: Placeholder,
    pending: Option<LoadTask>,
    picking: Option<AsyncTask<Option<ImageFile>>>,
}

impl ImageLoader {
    pub fn new(placeholder_url: Option<String>) -> Self {
        Self {
            placeholder: placeholder_url.map_or(Placeholder::Done, Placeholder::Waiting),
            pending: None,
            picking: None,
        }
    }

    pub fn is_pending(&self) -> bool {
        self.pending.is_some() || self.picking.is_some()
    }

    pub fn is_hovering_files(ctx: &egui::Context) -> bool {
        ctx.input(|i| !i.raw.hovered_files.is_empty())
    }

    pub fn update(&mut self, ctx: &egui::Context, editor: &mut MaskEditor) {
        self.poll_placeholder(ctx);
        self.handle_dropped_files(ctx);

        if let Some(file) = self.picking.as_mut().and_then(AsyncTask::data) {
            self.picking = None;
            if let Some(file) = file {
                self.open_file(file);
            }
        }

        if let Some(result) = self.pending.as_mut().and_then(AsyncTask::data) {
            self.pending = None;
            match result {
                Ok(image) => editor.load_image(image),
                Err(e) => warn!("Keep previous image: {e}"),
            }
        }
    }

    /// Non-image files are dropped without any feedback
    pub fn open_file(&mut self, file: ImageFile) {
        if !file.is_image() {
            debug!("Ignore {} of type {:?}", file.name, file.mime);
            return;
        }
        info!("Loading {file:?}");
        self.start(run_blocking(move || decode_image(&file).map_err(LoadError::from)));
    }

    pub fn open_path(&mut self, path: PathBuf) {
        let mime = mime_from_path(&path);
        if !is_image_mime(mime) {
            debug!("Ignore {path:?} of type {mime:?}");
            return;
        }
        info!("Loading {path:?}");
        self.start(run_blocking(move || -> Result<LoadedImage, LoadError> {
            let bytes = std::fs::read(&path).map_err(|source| LoadError::Read {
                path: path.clone(),
                source,
            })?;
            let file = ImageFile::new(path.display().to_string(), mime, bytes);
            Ok(decode_image(&file)?)
        }));
    }

    fn start(&mut self, job: BoxFuture<'static, Option<Result<LoadedImage, LoadError>>>) {
        // A user choice always wins over the placeholder
        self.placeholder = Placeholder::Done;
        self.pending = Some(AsyncTask::new(
            job.map(|r| r.unwrap_or(Err(LoadError::Canceled))).boxed(),
        ));
    }

    #[cfg(not(target_arch = "wasm32"))]
    pub fn pick_file(&mut self) {
        if let Some(path) = rfd::FileDialog::new()
            .add_filter("Images", IMAGE_EXTENSIONS)
            .pick_file()
        {
            self.open_path(path);
        }
    }

    #[cfg(target_arch = "wasm32")]
    pub fn pick_file(&mut self) {
        let (tx, rx) = futures::channel::oneshot::channel();
        wasm_bindgen_futures::spawn_local(async move {
            let picked = rfd::AsyncFileDialog::new()
                .add_filter("Images", IMAGE_EXTENSIONS)
                .pick_file()
                .await;
            let file = match picked {
                Some(handle) => {
                    let name = handle.file_name();
                    let mime = mime_from_path(Path::new(&name));
                    Some(ImageFile::new(name, mime, handle.read().await))
                }
                None => None,
            };
            tx.send(file).ok();
        });
        self.picking = Some(AsyncTask::new(rx.map(|r| r.ok().flatten()).boxed()));
    }

    fn handle_dropped_files(&mut self, ctx: &egui::Context) {
        let Some(egui::DroppedFile {
            path,
            name,
            mime,
            bytes,
            ..
        }) = ctx.input(|i| i.raw.dropped_files.first().cloned())
        else {
            return;
        };
        match (bytes, path) {
            (Some(bytes), path) => {
                let mime = if mime.is_empty() {
                    mime_from_path(path.as_deref().unwrap_or(Path::new(&name))).to_owned()
                } else {
                    mime
                };
                self.open_file(ImageFile::new(name, mime, bytes));
            }
            (None, Some(path)) => self.open_path(path),
            (None, None) => debug!("Dropped file {name:?} has no content"),
        }
    }

    fn poll_placeholder(&mut self, ctx: &egui::Context) {
        let Placeholder::Waiting(url) = &self.placeholder else {
            return;
        };
        let url = url.clone();
        match ctx.try_load_bytes(&url) {
            Ok(BytesPoll::Ready { bytes, mime, .. }) => {
                let mime = mime.unwrap_or_else(|| mime_from_bytes(&bytes).to_owned());
                let file = ImageFile::new(url.clone(), mime, bytes.to_vec());
                ctx.forget_image(&url);
                self.open_file(file);
                self.placeholder = Placeholder::Done;
            }
            Ok(BytesPoll::Pending { .. }) => {}
            Err(e) => {
                warn!("Placeholder {url} unavailable: {e}");
                self.placeholder = Placeholder::Done;
            }
        }
    }
}
