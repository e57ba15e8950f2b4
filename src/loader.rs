//! Asynchronous image loading and caching.
//!
//! Loads run on worker threads so the UI thread never blocks on the
//! network or the decoder. The store is polled once per frame: finished
//! loads move into the cache and the host repaints. Widgets render a
//! placeholder until their image is `Ready`; a failed load simply keeps
//! the placeholder. The carousel never waits on or cancels a load.

use std::collections::HashMap;
use std::io::Read;
use std::path::PathBuf;
use std::sync::mpsc::{channel, Receiver, Sender};
use std::sync::{Arc, Mutex};

use image::RgbaImage;
use thiserror::Error;

/// Refuse to buffer remote responses beyond this many bytes.
const MAX_REMOTE_BYTES: u64 = 16 * 1024 * 1024;

/// Number of loader worker threads.
const WORKERS: usize = 2;

/// Where an image comes from.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub enum ImageSource {
    /// Remote image fetched over HTTP(S).
    Url(String),
    /// Raster image from a file path.
    Path(PathBuf),
    /// Raster image from in-memory bytes.
    Bytes(Arc<[u8]>),
}

impl From<&str> for ImageSource {
    fn from(value: &str) -> Self {
        if value.starts_with("http://") || value.starts_with("https://") {
            ImageSource::Url(value.to_string())
        } else {
            ImageSource::Path(PathBuf::from(value))
        }
    }
}

impl From<String> for ImageSource {
    fn from(value: String) -> Self {
        ImageSource::from(value.as_str())
    }
}

impl From<PathBuf> for ImageSource {
    fn from(path: PathBuf) -> Self {
        ImageSource::Path(path)
    }
}

#[derive(Debug, Error)]
pub enum LoadError {
    #[error("http request failed: {0}")]
    Http(String),
    #[error("response larger than {MAX_REMOTE_BYTES} bytes")]
    TooLarge,
    #[error("io error: {0}")]
    Io(#[from] std::io::Error),
    #[error("decode error: {0}")]
    Decode(#[from] image::ImageError),
    #[error("remote image support disabled at build time")]
    RemoteDisabled,
}

/// Cache entry state for one source.
#[derive(Clone)]
pub enum LoadState {
    /// Requested but not yet finished.
    Loading,
    /// Decoded and ready to paint.
    Ready(Arc<RgbaImage>),
    /// Both attempts failed; the placeholder stays.
    Failed,
}

type LoadResult = (ImageSource, Result<RgbaImage, LoadError>);

/// Shared image cache with background loading.
pub struct ImageStore {
    cache: Mutex<HashMap<ImageSource, LoadState>>,
    jobs: Mutex<Sender<ImageSource>>,
    done: Mutex<Receiver<LoadResult>>,
}

impl ImageStore {
    /// Create a store and spawn its worker threads. Workers exit when the
    /// store is dropped.
    pub fn new() -> Arc<Self> {
        let (job_tx, job_rx) = channel::<ImageSource>();
        let (done_tx, done_rx) = channel::<LoadResult>();
        let job_rx = Arc::new(Mutex::new(job_rx));

        for i in 0..WORKERS {
            let job_rx = Arc::clone(&job_rx);
            let done_tx = done_tx.clone();
            std::thread::Builder::new()
                .name(format!("marquee-loader-{i}"))
                .spawn(move || worker_loop(job_rx, done_tx))
                .expect("failed to spawn image loader thread");
        }

        Arc::new(Self {
            cache: Mutex::new(HashMap::new()),
            jobs: Mutex::new(job_tx),
            done: Mutex::new(done_rx),
        })
    }

    /// Current state for `source`, enqueueing a load on first sight.
    pub fn get(&self, source: &ImageSource) -> LoadState {
        let mut cache = self.cache.lock().unwrap();
        if let Some(state) = cache.get(source) {
            return state.clone();
        }
        cache.insert(source.clone(), LoadState::Loading);
        drop(cache);
        // A send error means the workers are gone; the entry then stays
        // Loading, which renders as a placeholder.
        let _ = self.jobs.lock().unwrap().send(source.clone());
        LoadState::Loading
    }

    /// Enqueue a load without reading the state.
    pub fn request(&self, source: &ImageSource) {
        let _ = self.get(source);
    }

    /// Seed the cache directly (previews, tests, embedded assets).
    pub fn insert(&self, source: ImageSource, img: RgbaImage) {
        self.cache
            .lock()
            .unwrap()
            .insert(source, LoadState::Ready(Arc::new(img)));
    }

    /// Drain finished loads into the cache. Returns true when any image
    /// became ready, i.e. a repaint is warranted.
    pub fn poll(&self) -> bool {
        let mut any_ready = false;
        let done = self.done.lock().unwrap();
        while let Ok((source, result)) = done.try_recv() {
            let state = match result {
                Ok(img) => {
                    any_ready = true;
                    LoadState::Ready(Arc::new(img))
                }
                Err(err) => {
                    log::warn!("image load failed for {source:?}: {err}");
                    LoadState::Failed
                }
            };
            self.cache.lock().unwrap().insert(source, state);
        }
        any_ready
    }
}

fn worker_loop(jobs: Arc<Mutex<Receiver<ImageSource>>>, done: Sender<LoadResult>) {
    loop {
        let job = {
            let rx = jobs.lock().unwrap();
            rx.recv()
        };
        let Ok(source) = job else {
            return;
        };
        let result = load_source(&source).or_else(|err| {
            log::debug!("retrying image load for {source:?} after: {err}");
            load_source(&source)
        });
        if done.send((source, result)).is_err() {
            return;
        }
    }
}

fn load_source(source: &ImageSource) -> Result<RgbaImage, LoadError> {
    let bytes: Vec<u8> = match source {
        ImageSource::Url(url) => fetch_remote(url)?,
        ImageSource::Path(path) => std::fs::read(path)?,
        ImageSource::Bytes(bytes) => bytes.to_vec(),
    };
    let img = image::load_from_memory(&bytes)?;
    Ok(img.into_rgba8())
}

#[cfg(feature = "remote-images")]
fn fetch_remote(url: &str) -> Result<Vec<u8>, LoadError> {
    let response = ureq::get(url)
        .call()
        .map_err(|err| LoadError::Http(err.to_string()))?;
    let mut bytes = Vec::new();
    response
        .into_reader()
        .take(MAX_REMOTE_BYTES + 1)
        .read_to_end(&mut bytes)?;
    if bytes.len() as u64 > MAX_REMOTE_BYTES {
        return Err(LoadError::TooLarge);
    }
    log::debug!("fetched {url} ({} bytes)", bytes.len());
    Ok(bytes)
}

#[cfg(not(feature = "remote-images"))]
fn fetch_remote(url: &str) -> Result<Vec<u8>, LoadError> {
    log::warn!("remote image requested but the remote-images feature is off: {url}");
    Err(LoadError::RemoteDisabled)
}
