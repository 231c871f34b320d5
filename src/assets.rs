use std::collections::HashMap;
use std::path::Path;

use log::{info, warn};

/// Images the front end asks for. Anything else under `/assets/` is a 404.
pub const KNOWN_ASSETS: [&str; 3] = [
    "finket_portada.png",
    "finket_background.png",
    "finket_logo.png",
];

/// Image bytes read once at startup, keyed by file name.
#[derive(Debug, Default, Clone)]
pub struct AssetStore {
    images: HashMap<&'static str, Vec<u8>>,
}

impl AssetStore {
    /// Missing or unreadable files are logged and skipped; the front end
    /// falls back to plain colours for them.
    pub fn load(dir: &Path) -> AssetStore {
        let mut images = HashMap::new();
        for name in KNOWN_ASSETS {
            let path = dir.join(name);
            match std::fs::read(&path) {
                Ok(bytes) => {
                    info!("loaded asset {} ({} bytes)", path.display(), bytes.len());
                    images.insert(name, bytes);
                }
                Err(e) => warn!("asset {} unavailable: {e}", path.display()),
            }
        }
        AssetStore { images }
    }

    pub fn get(&self, name: &str) -> Option<&[u8]> {
        self.images.get(name).map(Vec::as_slice)
    }

    pub fn available(&self) -> Vec<&'static str> {
        KNOWN_ASSETS
            .into_iter()
            .filter(|name| self.images.contains_key(name))
            .collect()
    }
}
