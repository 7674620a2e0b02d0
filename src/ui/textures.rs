//! Remote image textures (weather icons, photo thumbnails)
//!
//! Images are downloaded on tokio tasks, decoded with the `image` crate and
//! uploaded to egui once the task finishes. Textures outlive view mounts so
//! remounting a view does not download them again; the least recently used
//! ones are dropped once the cache is full.

use std::collections::{HashMap, VecDeque};

use anyhow::{Context as _, Result};
use eframe::egui;
use tokio::task::JoinHandle;

use crate::task::{poll_task, PollResult};

enum Slot {
    Loading(Option<JoinHandle<Result<egui::ColorImage>>>),
    Ready(egui::TextureHandle),
    Failed,
}

/// Enough for a full page of photos plus the weather icons
const MAX_TEXTURES: usize = 120;

/// Texture cache keyed by URL
pub struct TextureCache {
    http: reqwest::Client,
    slots: HashMap<String, Slot>,
    /// URLs from least to most recently asked for
    recent: VecDeque<String>,
    capacity: usize,
}

impl TextureCache {
    pub fn new(http: reqwest::Client) -> Self {
        Self::with_capacity(http, MAX_TEXTURES)
    }

    pub fn with_capacity(http: reqwest::Client, capacity: usize) -> Self {
        Self {
            http,
            slots: HashMap::new(),
            recent: VecDeque::new(),
            capacity: capacity.max(1),
        }
    }

    /// Texture for `url`, starting a download the first time it is asked for
    pub fn get(&mut self, url: &str) -> Option<&egui::TextureHandle> {
        if self.slots.contains_key(url) {
            self.touch(url);
        } else {
            tracing::debug!("Downloading image {}", url);
            let http = self.http.clone();
            let target = url.to_string();
            let handle = tokio::spawn(async move { download(&http, &target).await });
            self.slots
                .insert(url.to_string(), Slot::Loading(Some(handle)));
            self.recent.push_back(url.to_string());
            self.evict();
        }

        match self.slots.get(url) {
            Some(Slot::Ready(texture)) => Some(texture),
            _ => None,
        }
    }

    fn touch(&mut self, url: &str) {
        if self.recent.back().is_some_and(|last| last == url) {
            return;
        }
        if let Some(pos) = self.recent.iter().position(|u| u == url) {
            if let Some(entry) = self.recent.remove(pos) {
                self.recent.push_back(entry);
            }
        }
    }

    fn evict(&mut self) {
        while self.recent.len() > self.capacity {
            let Some(url) = self.recent.pop_front() else {
                break;
            };
            tracing::debug!("Evicting image {}", url);
            if let Some(Slot::Loading(Some(handle))) = self.slots.remove(&url) {
                handle.abort();
            }
        }
    }

    /// Whether `url` failed to download or decode
    pub fn failed(&self, url: &str) -> bool {
        matches!(self.slots.get(url), Some(Slot::Failed))
    }

    /// Upload finished downloads
    pub fn poll(&mut self, ctx: &egui::Context) {
        let mut pending = false;

        for (url, slot) in self.slots.iter_mut() {
            let Slot::Loading(handle) = slot else {
                continue;
            };

            match poll_task(handle) {
                PollResult::Complete(Ok(Ok(image))) => {
                    let texture = ctx.load_texture(url.as_str(), image, egui::TextureOptions::LINEAR);
                    *slot = Slot::Ready(texture);
                }
                PollResult::Complete(Ok(Err(e))) => {
                    tracing::warn!("Failed to load image {}: {:#}", url, e);
                    *slot = Slot::Failed;
                }
                PollResult::Complete(Err(e)) => {
                    tracing::error!("Image task panicked: {}", e);
                    *slot = Slot::Failed;
                }
                PollResult::Pending => pending = true,
                PollResult::NoTask => *slot = Slot::Failed,
            }
        }

        if pending {
            ctx.request_repaint();
        }
    }
}

async fn download(http: &reqwest::Client, url: &str) -> Result<egui::ColorImage> {
    let bytes = http
        .get(url)
        .send()
        .await?
        .error_for_status()?
        .bytes()
        .await?;
    decode(&bytes)
}

/// Decode PNG or JPEG bytes into an egui image
pub fn decode(bytes: &[u8]) -> Result<egui::ColorImage> {
    let image = image::load_from_memory(bytes)
        .context("Unsupported image data")?
        .into_rgba8();
    let size = [image.width() as usize, image.height() as usize];
    Ok(egui::ColorImage::from_rgba_unmultiplied(size, image.as_raw()))
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Cursor;

    fn png(width: u32, height: u32) -> Vec<u8> {
        let image = image::RgbaImage::from_pixel(width, height, image::Rgba([10, 20, 30, 255]));
        let mut bytes = Cursor::new(Vec::new());
        image
            .write_to(&mut bytes, image::ImageFormat::Png)
            .unwrap();
        bytes.into_inner()
    }

    #[test]
    fn test_decode_png() {
        let image = decode(&png(3, 2)).unwrap();
        assert_eq!(image.size, [3, 2]);
        assert_eq!(image.pixels[0], egui::Color32::from_rgb(10, 20, 30));
    }

    #[test]
    fn test_decode_rejects_garbage() {
        assert!(decode(b"<html>not an image</html>").is_err());
    }

    #[tokio::test]
    async fn test_unreachable_url_marks_failed() {
        let ctx = egui::Context::default();
        let mut cache = TextureCache::new(reqwest::Client::new());
        let url = "http://127.0.0.1:9/icon.png";

        assert!(cache.get(url).is_none());
        for _ in 0..500 {
            cache.poll(&ctx);
            if cache.failed(url) {
                return;
            }
            tokio::time::sleep(std::time::Duration::from_millis(5)).await;
        }
        panic!("download never failed");
    }

    #[tokio::test]
    async fn test_least_recently_used_is_evicted() {
        let mut cache = TextureCache::with_capacity(reqwest::Client::new(), 2);
        let a = "http://127.0.0.1:9/a.png";
        let b = "http://127.0.0.1:9/b.png";
        let c = "http://127.0.0.1:9/c.png";

        cache.get(a);
        cache.get(b);
        // Asking for `a` again makes `b` the oldest
        cache.get(a);
        cache.get(c);

        assert_eq!(cache.slots.len(), 2);
        assert!(cache.slots.contains_key(a));
        assert!(cache.slots.contains_key(c));
        assert!(!cache.slots.contains_key(b));
        assert_eq!(cache.recent, [a, c]);
    }
}
