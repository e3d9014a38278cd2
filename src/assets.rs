//! Background asset loader.
//!
//! Spawns one thread per image file to read and decode it into an RGBA
//! buffer ready for egui texture creation. The loader's "nothing pending"
//! state is the asset-ready signal of the loading gate.

use std::collections::{HashMap, HashSet};
use std::path::{Path, PathBuf};
use std::sync::mpsc;

/// Thumbnails are capped to this width.
const MAX_WIDTH: u32 = 640;

/// Decoded image data (RGBA).
pub struct ImageData {
    pub width: u32,
    pub height: u32,
    pub rgba: Vec<u8>,
}

/// Manages background decoding of local image assets.
pub struct AssetLoader {
    pending: HashMap<PathBuf, mpsc::Receiver<Result<ImageData, String>>>,
    loaded: HashMap<PathBuf, ImageData>,
    failed: HashSet<PathBuf>,
}

impl AssetLoader {
    pub fn new() -> Self {
        Self {
            pending: HashMap::new(),
            loaded: HashMap::new(),
            failed: HashSet::new(),
        }
    }

    /// Request an asset to be decoded in the background.
    pub fn request(&mut self, path: &Path) {
        if self.loaded.contains_key(path)
            || self.pending.contains_key(path)
            || self.failed.contains(path)
        {
            return;
        }

        let (tx, rx) = mpsc::channel();
        let owned = path.to_path_buf();

        std::thread::spawn(move || {
            let _ = tx.send(read_and_decode(&owned));
        });

        self.pending.insert(path.to_path_buf(), rx);
    }

    /// Poll for finished decodes. Call every frame.
    pub fn poll(&mut self) {
        let mut completed = Vec::new();
        for (path, rx) in &self.pending {
            match rx.try_recv() {
                Ok(Ok(data)) => {
                    log::debug!("asset ready: {} ({}x{})", path.display(), data.width, data.height);
                    self.loaded.insert(path.clone(), data);
                    completed.push(path.clone());
                }
                Ok(Err(e)) => {
                    log::warn!("asset failed: {}: {}", path.display(), e);
                    self.failed.insert(path.clone());
                    completed.push(path.clone());
                }
                Err(mpsc::TryRecvError::Empty) => {}
                Err(mpsc::TryRecvError::Disconnected) => {
                    log::warn!("asset worker vanished: {}", path.display());
                    self.failed.insert(path.clone());
                    completed.push(path.clone());
                }
            }
        }
        for path in completed {
            self.pending.remove(&path);
        }
    }

    /// True once every requested asset has either loaded or failed.
    pub fn is_settled(&self) -> bool {
        self.pending.is_empty()
    }

    pub fn get(&self, path: &Path) -> Option<&ImageData> {
        self.loaded.get(path)
    }

    /// Take ownership of a decoded image (e.g. to upload it as a texture).
    pub fn take(&mut self, path: &Path) -> Option<ImageData> {
        self.loaded.remove(path)
    }

    pub fn loaded_paths(&self) -> Vec<PathBuf> {
        self.loaded.keys().cloned().collect()
    }

    pub fn pending_count(&self) -> usize {
        self.pending.len()
    }

    pub fn failed_count(&self) -> usize {
        self.failed.len()
    }
}

impl Default for AssetLoader {
    fn default() -> Self {
        Self::new()
    }
}

fn read_and_decode(path: &Path) -> Result<ImageData, String> {
    let bytes = std::fs::read(path).map_err(|e| e.to_string())?;
    let img = image::load_from_memory(&bytes).map_err(|e| e.to_string())?;
    let rgba = img.to_rgba8();
    let (w, h) = rgba.dimensions();

    let (w, h, pixels) = if w > MAX_WIDTH {
        let ratio = MAX_WIDTH as f32 / w as f32;
        let new_h = ((h as f32 * ratio) as u32).max(1);
        let resized = image::imageops::resize(
            &rgba,
            MAX_WIDTH,
            new_h,
            image::imageops::FilterType::Triangle,
        );
        let (rw, rh) = resized.dimensions();
        (rw, rh, resized.into_raw())
    } else {
        (w, h, rgba.into_raw())
    };

    Ok(ImageData {
        width: w,
        height: h,
        rgba: pixels,
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::time::{Duration, Instant};

    fn wait_settled(loader: &mut AssetLoader) {
        let start = Instant::now();
        while !loader.is_settled() {
            loader.poll();
            assert!(start.elapsed() < Duration::from_secs(10), "loader never settled");
            std::thread::sleep(Duration::from_millis(5));
        }
    }

    #[test]
    fn empty_loader_is_settled() {
        assert!(AssetLoader::new().is_settled());
    }

    #[test]
    fn loader_deduplicates() {
        let mut loader = AssetLoader::new();
        let p = Path::new("/nonexistent/thumb.png");
        loader.request(p);
        loader.request(p);
        assert_eq!(loader.pending.len(), 1);
    }

    #[test]
    fn missing_file_settles_as_failed() {
        let mut loader = AssetLoader::new();
        loader.request(Path::new("/nonexistent/orbit-portfolio/missing.png"));
        assert!(!loader.is_settled());
        wait_settled(&mut loader);
        assert_eq!(loader.failed_count(), 1);
    }

    #[test]
    fn decodes_png_from_disk() {
        let dir = std::env::temp_dir().join(format!("orbit-portfolio-assets-{}", std::process::id()));
        std::fs::create_dir_all(&dir).unwrap();
        let path = dir.join("dot.png");
        image::RgbaImage::from_pixel(4, 2, image::Rgba([255, 0, 0, 255]))
            .save(&path)
            .unwrap();

        let mut loader = AssetLoader::new();
        loader.request(&path);
        wait_settled(&mut loader);
        let data = loader.get(&path).expect("decoded");
        assert_eq!((data.width, data.height), (4, 2));
        assert_eq!(data.rgba.len(), 4 * 2 * 4);
        let _ = std::fs::remove_dir_all(&dir);
    }
}
