//! Loads the tiled scroll panorama from disk.
//!
//! The panorama ships as horizontal tiles named `tile_<index>.<ext>` laid out
//! left to right. Dimensions are measured from the tiles when possible;
//! otherwise the configured fallback dimensions apply. A missing or empty
//! tile directory is not an error: the viewer opens with an empty background
//! and the hotspots stay interactive.

use std::fs;
use std::path::{Path, PathBuf};
use tracing::{info, warn};

const TILE_EXTENSIONS: [&str; 4] = ["jpg", "jpeg", "png", "webp"];

/// One horizontal slice of the panorama, in panorama pixels.
#[derive(Debug, Clone)]
pub struct ScrollTile {
    pub path: PathBuf,
    pub offset_x: f32,
    pub width: f32,
    pub height: f32,
}

/// The tile strip plus the logical dimensions of the full panorama.
#[derive(Debug, Clone)]
pub struct LoadedScroll {
    pub tiles: Vec<ScrollTile>,
    pub width: f32,
    pub height: f32,
}

impl LoadedScroll {
    pub fn empty(width: f32, height: f32) -> Self {
        LoadedScroll {
            tiles: Vec::new(),
            width: width.max(1.0),
            height: height.max(1.0),
        }
    }
}

/// Discover and measure the tile strip under `dir`. Never fails; degraded
/// outcomes are logged and fall back to `fallback_width`/`fallback_height`.
pub fn load_scroll(dir: &Path, fallback_width: f32, fallback_height: f32) -> LoadedScroll {
    let mut paths = match list_tiles(dir) {
        Some(paths) if !paths.is_empty() => paths,
        _ => {
            warn!(dir = %dir.display(), "No panorama tiles found; using empty background");
            return LoadedScroll::empty(fallback_width, fallback_height);
        }
    };
    paths.sort_by_key(|path| tile_index(path));

    let mut tiles = Vec::with_capacity(paths.len());
    let mut offset_x = 0.0f32;
    let mut height = 0.0f32;
    for path in paths {
        match image::image_dimensions(&path) {
            Ok((w, h)) => {
                if height == 0.0 {
                    height = h as f32;
                }
                tiles.push(ScrollTile {
                    path,
                    offset_x,
                    width: w as f32,
                    height: h as f32,
                });
                offset_x += w as f32;
            }
            Err(err) => {
                warn!(path = %path.display(), "Unreadable panorama tile: {err}");
            }
        }
    }

    if tiles.is_empty() || offset_x <= 0.0 || height <= 0.0 {
        warn!(dir = %dir.display(), "No measurable tiles; using fallback dimensions");
        return LoadedScroll::empty(fallback_width, fallback_height);
    }

    info!(
        tiles = tiles.len(),
        width = offset_x,
        height,
        "Loaded scroll panorama"
    );
    LoadedScroll {
        tiles,
        width: offset_x,
        height,
    }
}

fn list_tiles(dir: &Path) -> Option<Vec<PathBuf>> {
    let entries = fs::read_dir(dir).ok()?;
    let paths = entries
        .filter_map(|entry| entry.ok())
        .map(|entry| entry.path())
        .filter(|path| {
            path.extension()
                .and_then(|ext| ext.to_str())
                .map(|ext| TILE_EXTENSIONS.contains(&ext.to_ascii_lowercase().as_str()))
                .unwrap_or(false)
        })
        .collect();
    Some(paths)
}

/// Numeric index embedded in the file name, so `tile_10` sorts after
/// `tile_9`. Files without digits sort first by name.
fn tile_index(path: &Path) -> (u64, String) {
    let stem = path
        .file_stem()
        .and_then(|stem| stem.to_str())
        .unwrap_or("")
        .to_string();
    let digits: String = stem.chars().filter(|c| c.is_ascii_digit()).collect();
    (digits.parse().unwrap_or(0), stem)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn missing_directory_degrades_to_empty_scroll() {
        let scroll = load_scroll(Path::new("/nonexistent/tiles"), 12_000.0, 1_000.0);
        assert!(scroll.tiles.is_empty());
        assert!((scroll.width - 12_000.0).abs() < f32::EPSILON);
        assert!((scroll.height - 1_000.0).abs() < f32::EPSILON);
    }

    #[test]
    fn tile_indices_sort_numerically() {
        let mut paths = vec![
            PathBuf::from("tiles/tile_10.jpg"),
            PathBuf::from("tiles/tile_2.jpg"),
            PathBuf::from("tiles/tile_0.jpg"),
        ];
        paths.sort_by_key(|p| tile_index(p));
        let names: Vec<_> = paths
            .iter()
            .map(|p| p.file_name().unwrap().to_str().unwrap())
            .collect();
        assert_eq!(names, vec!["tile_0.jpg", "tile_2.jpg", "tile_10.jpg"]);
    }

    #[test]
    fn empty_scroll_keeps_positive_dimensions() {
        let scroll = LoadedScroll::empty(0.0, -5.0);
        assert!(scroll.width >= 1.0 && scroll.height >= 1.0);
    }
}
