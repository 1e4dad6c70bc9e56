//! Sprite manifest and best-effort preloading
//!
//! Every sprite is optional. A failed load is logged and the renderer draws
//! a placeholder for that sprite for the rest of the page lifetime.

use std::collections::HashMap;

pub const PLAYER_SPRITE: &str = "kayak_normal";
pub const PLAYER_FLIPPED_SPRITE: &str = "kayak_flipped";

/// Sprite name -> image path. Obstacle entries use `ObstacleKind::name`.
pub const SPRITE_MANIFEST: &[(&str, &str)] = &[
    (PLAYER_SPRITE, "sprite_player.png"),
    (PLAYER_FLIPPED_SPRITE, "sprite_player_flipped.png"),
    ("log", "sprite_log.png"),
    ("fish", "sprite_fish.png"),
    ("fisherman", "sprite_boat.png"),
    ("waterfall", "sprite_waterfall.png"),
    ("rock", "sprite_rock.png"),
    ("whirlpool", "sprite_whirlpool.png"),
    ("starfish", "sprite_starfish.png"),
    ("lowbridge", "sprite_lowbridge.png"),
];

/// Loaded sprites, keyed by manifest name
#[derive(Debug, Clone)]
pub struct Sprites<I> {
    images: HashMap<&'static str, I>,
}

impl<I> Default for Sprites<I> {
    fn default() -> Self {
        Self {
            images: HashMap::new(),
        }
    }
}

impl<I> Sprites<I> {
    /// No sprites at all: everything renders as placeholders
    pub fn empty() -> Self {
        Self::default()
    }

    pub fn insert(&mut self, name: &'static str, image: I) {
        self.images.insert(name, image);
    }

    pub fn get(&self, name: &str) -> Option<&I> {
        self.images.get(name)
    }

    pub fn len(&self) -> usize {
        self.images.len()
    }

    pub fn is_empty(&self) -> bool {
        self.images.is_empty()
    }

    /// Manifest entries that did not load
    pub fn missing(&self) -> Vec<&'static str> {
        SPRITE_MANIFEST
            .iter()
            .map(|(name, _)| *name)
            .filter(|name| !self.images.contains_key(name))
            .collect()
    }
}

/// Browser image loading
#[cfg(target_arch = "wasm32")]
mod web {
    use js_sys::Promise;
    use wasm_bindgen::JsValue;
    use wasm_bindgen_futures::JsFuture;
    use web_sys::HtmlImageElement;

    use super::{SPRITE_MANIFEST, Sprites};

    /// Start one image load; the promise settles on load or error
    fn start_load(path: &str) -> Result<(HtmlImageElement, Promise), JsValue> {
        let image = HtmlImageElement::new()?;
        let promise = Promise::new(&mut |resolve, reject| {
            image.set_onload(Some(&resolve));
            image.set_onerror(Some(&reject));
        });
        image.set_src(path);
        Ok((image, promise))
    }

    /// Issue every load at once, then wait for all of them to settle.
    /// Individual failures are logged and skipped.
    pub async fn preload(base_url: &str) -> Sprites<HtmlImageElement> {
        let mut pending = Vec::with_capacity(SPRITE_MANIFEST.len());
        for &(name, file) in SPRITE_MANIFEST {
            let path = format!("{}{}", base_url, file);
            match start_load(&path) {
                Ok((image, promise)) => pending.push((name, path, image, JsFuture::from(promise))),
                Err(e) => log::warn!("Could not start loading {}: {:?}", path, e),
            }
        }

        let mut sprites = Sprites::empty();
        for (name, path, image, load) in pending {
            match load.await {
                Ok(_) => sprites.insert(name, image),
                Err(_) => log::warn!("Failed to load image {}, using placeholder", path),
            }
        }

        log::info!(
            "Sprite loading settled: {}/{} loaded",
            sprites.len(),
            SPRITE_MANIFEST.len()
        );
        let missing = sprites.missing();
        if !missing.is_empty() {
            log::info!("Drawing placeholders for: {}", missing.join(", "));
        }
        sprites
    }
}

#[cfg(target_arch = "wasm32")]
pub use web::preload;
