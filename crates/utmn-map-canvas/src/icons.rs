//! Process-wide icon cache.
//!
//! Icons are loaded at most once per identifier. While a load is in flight
//! further lookups report [`IconLookup::Pending`] instead of starting another
//! load. Failures are remembered and never retried.

use image::RgbaImage;
use parking_lot::Mutex;
use std::collections::HashMap;
use std::path::{Path, PathBuf};
use std::sync::{Arc, OnceLock};
use utmn_map_core::{Error, Result};

/// Source of icon bitmaps.
pub trait IconLoader: Send + Sync {
    fn load(&self, icon_id: &str) -> Result<RgbaImage>;
}

/// Loads `<dir>/<icon_id>.png`.
#[derive(Debug, Clone)]
pub struct FsIconLoader {
    dir: PathBuf,
}

impl FsIconLoader {
    pub fn new(dir: impl Into<PathBuf>) -> Self {
        Self { dir: dir.into() }
    }

    pub fn dir(&self) -> &Path {
        &self.dir
    }
}

impl IconLoader for FsIconLoader {
    fn load(&self, icon_id: &str) -> Result<RgbaImage> {
        let path = self.dir.join(format!("{icon_id}.png"));
        let image = image::open(&path)
            .map_err(|e| Error::other(format!("Failed to load icon {}: {}", path.display(), e)))?;
        Ok(image.to_rgba8())
    }
}

/// State of one icon as seen by a renderer.
#[derive(Debug, Clone)]
pub enum IconLookup {
    Ready(Arc<RgbaImage>),
    Pending,
    Failed,
}

enum Slot {
    Loading,
    Ready(Arc<RgbaImage>),
    Failed,
}

impl Slot {
    fn lookup(&self) -> IconLookup {
        match self {
            Slot::Loading => IconLookup::Pending,
            Slot::Ready(image) => IconLookup::Ready(Arc::clone(image)),
            Slot::Failed => IconLookup::Failed,
        }
    }
}

type ReadyCallback = Arc<dyn Fn(&str) + Send + Sync>;

/// Get-or-load cache keyed by icon identifier.
pub struct IconCache {
    loader: Arc<dyn IconLoader>,
    slots: Mutex<HashMap<String, Slot>>,
    on_ready: Mutex<Option<ReadyCallback>>,
}

static GLOBAL: OnceLock<Arc<IconCache>> = OnceLock::new();

impl IconCache {
    pub fn new(loader: Arc<dyn IconLoader>) -> Arc<Self> {
        Arc::new(Self {
            loader,
            slots: Mutex::new(HashMap::new()),
            on_ready: Mutex::new(None),
        })
    }

    /// Installs the process-wide cache. Returns the cache that is installed,
    /// which is the existing one if another caller got there first.
    pub fn install_global(cache: Arc<IconCache>) -> Arc<IconCache> {
        Arc::clone(GLOBAL.get_or_init(|| cache))
    }

    pub fn global() -> Option<Arc<IconCache>> {
        GLOBAL.get().cloned()
    }

    /// Called with the icon id whenever a load finishes successfully, so the
    /// host can schedule a redraw.
    pub fn set_ready_callback(&self, callback: impl Fn(&str) + Send + Sync + 'static) {
        *self.on_ready.lock() = Some(Arc::new(callback));
    }

    /// Current state without triggering a load.
    pub fn peek(&self, icon_id: &str) -> Option<IconLookup> {
        self.slots.lock().get(icon_id).map(Slot::lookup)
    }

    /// Returns the icon if loaded, otherwise starts loading it.
    ///
    /// Loads run on tokio's blocking pool when a runtime is available and
    /// inline otherwise.
    pub fn get_or_load(self: &Arc<Self>, icon_id: &str) -> IconLookup {
        {
            let mut slots = self.slots.lock();
            if let Some(slot) = slots.get(icon_id) {
                return slot.lookup();
            }
            slots.insert(icon_id.to_string(), Slot::Loading);
        }

        let id = icon_id.to_string();
        match tokio::runtime::Handle::try_current() {
            Ok(handle) => {
                let cache = Arc::clone(self);
                handle.spawn_blocking(move || {
                    let result = cache.loader.load(&id);
                    cache.finish(&id, result);
                });
                IconLookup::Pending
            }
            Err(_) => {
                let result = self.loader.load(&id);
                self.finish(&id, result);
                self.peek(icon_id).unwrap_or(IconLookup::Failed)
            }
        }
    }

    fn finish(&self, icon_id: &str, result: Result<RgbaImage>) {
        let ready = match result {
            Ok(image) => {
                self.slots
                    .lock()
                    .insert(icon_id.to_string(), Slot::Ready(Arc::new(image)));
                true
            }
            Err(e) => {
                tracing::debug!("Icon {} unavailable: {}", icon_id, e);
                self.slots.lock().insert(icon_id.to_string(), Slot::Failed);
                false
            }
        };

        if ready {
            let callback = self.on_ready.lock().clone();
            if let Some(callback) = callback {
                callback(icon_id);
            }
        }
    }
}
