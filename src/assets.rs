//! Embedded Assets - compile-time asset storage
//!
//! Everything under `data/` is baked into the binary. Asset names are
//! `/`-separated and rooted at `data/`, e.g. `data/images/kirk-khan.png`.

use include_dir::{include_dir, Dir, DirEntry};

/// Directory prefix of the built-in template images.
pub const IMAGE_PATH: &str = "data/images/";

/// File extension of the built-in template images.
pub const IMAGE_EXTENSION: &str = ".png";

const ASSET_ROOT: &str = "data/";

static DATA_DIR: Dir = include_dir!("$CARGO_MANIFEST_DIR/data");

/// Anything that can enumerate asset names for the template catalog
pub trait AssetSource {
    fn asset_names(&self) -> Vec<String>;
}

/// Assets compiled into the binary
#[derive(Debug, Clone, Copy, Default)]
pub struct EmbeddedAssets;

impl EmbeddedAssets {
    /// Raw bytes of a built-in template, for the image loader.
    pub fn image(&self, id: &str) -> Option<&'static [u8]> {
        let dir = IMAGE_PATH.trim_start_matches(ASSET_ROOT);
        DATA_DIR
            .get_file(format!("{}{}{}", dir, id, IMAGE_EXTENSION))
            .map(|f| f.contents())
    }
}

impl AssetSource for EmbeddedAssets {
    fn asset_names(&self) -> Vec<String> {
        let mut names = vec![];
        collect_files(&DATA_DIR, &mut names);
        names
    }
}

fn collect_files(dir: &Dir<'static>, names: &mut Vec<String>) {
    for entry in dir.entries() {
        match entry {
            DirEntry::Dir(sub) => collect_files(sub, names),
            DirEntry::File(file) => {
                let relative = file.path().to_string_lossy().replace('\\', "/");
                names.push(format!("{}{}", ASSET_ROOT, relative));
            }
        }
    }
}

/// Fixed asset list, mostly useful in tests
impl AssetSource for Vec<String> {
    fn asset_names(&self) -> Vec<String> {
        self.clone()
    }
}
