//! Hotspot catalogue: the clickable regions overlaid on the panorama.
//!
//! Hotspots normally come from an external structured store; any failure
//! there falls back to the bundled static list covering the same shape, so
//! the scene is never empty because of a network problem.

use anyhow::{Context, Result, bail};
use once_cell::sync::Lazy;
use serde::Deserialize;
use tracing::info;

/// Season the depicted scene belongs to.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "UPPERCASE")]
pub enum Season {
    Spring,
    Summer,
    Autumn,
    Winter,
}

/// Narrative granularity; controls the zoom tier a hotspot appears at.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "UPPERCASE")]
pub enum HotspotLevel {
    Chapter,
    Scene,
    Detail,
}

/// One alternative rendition of a hotspot's interpretive video.
#[derive(Debug, Clone, Deserialize)]
pub struct VideoVersion {
    pub id: String,
    pub tag: String,
    #[serde(default)]
    pub url: String,
    #[serde(default)]
    pub style_desc: String,
}

/// A caption pinned to a moment of the interpretive video.
#[derive(Debug, Clone, Deserialize)]
pub struct Annotation {
    pub time: f32,
    pub text: String,
    #[serde(default)]
    pub x: f32,
    #[serde(default)]
    pub y: f32,
}

/// A positioned region on the scroll tied to narrative content.
///
/// `x`/`y` are percentages of the panorama dimensions; `width`/`height` are
/// pixels in panorama space. Immutable at runtime except for which one is
/// selected.
#[derive(Debug, Clone, Deserialize)]
pub struct Hotspot {
    pub id: String,
    pub x: f32,
    pub y: f32,
    pub width: f32,
    pub height: f32,
    pub label: String,
    #[serde(default)]
    pub category: String,
    pub season: Season,
    pub level: HotspotLevel,
    #[serde(default)]
    pub description: String,
    #[serde(default)]
    pub video_url: String,
    #[serde(default)]
    pub original_image: Option<String>,
    #[serde(default)]
    pub prompt: String,
    #[serde(default)]
    pub versions: Vec<VideoVersion>,
    #[serde(default)]
    pub annotations: Vec<Annotation>,
    #[serde(default)]
    pub related_hotspot_ids: Vec<String>,
}

/// Discrete zoom tiers for the visibility filter.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ZoomTier {
    Far,
    Medium,
    Near,
}

impl ZoomTier {
    pub fn from_scale(scale: f32, medium_at: f32, near_at: f32) -> Self {
        if !scale.is_finite() {
            return ZoomTier::Far;
        }
        if scale >= near_at {
            ZoomTier::Near
        } else if scale >= medium_at {
            ZoomTier::Medium
        } else {
            ZoomTier::Far
        }
    }
}

/// Whether a hotspot of `level` renders at `tier`. The radar reveal
/// (`reveal_all`) overrides the tier policy entirely while it lasts.
pub fn visible_at(level: HotspotLevel, tier: ZoomTier, reveal_all: bool) -> bool {
    if reveal_all {
        return true;
    }
    match tier {
        ZoomTier::Far => matches!(level, HotspotLevel::Chapter),
        ZoomTier::Medium => matches!(level, HotspotLevel::Chapter | HotspotLevel::Scene),
        ZoomTier::Near => true,
    }
}

/// Fetch the catalogue from the external store. Callers treat any error as
/// "use the bundled list"; this function only reports what went wrong.
pub fn fetch_hotspots(http: &reqwest::blocking::Client, url: &str) -> Result<Vec<Hotspot>> {
    let response = http
        .get(url)
        .send()
        .with_context(|| format!("Requesting hotspot catalogue from {url}"))?;
    if !response.status().is_success() {
        bail!("hotspot store answered {}", response.status());
    }
    let body = response.text().context("Reading hotspot catalogue body")?;
    let hotspots: Vec<Hotspot> =
        serde_json::from_str(&body).context("Parsing hotspot catalogue")?;
    info!(count = hotspots.len(), "Fetched hotspot catalogue");
    Ok(hotspots)
}

/// The bundled catalogue used when no store is configured or the fetch fails.
pub fn builtin_hotspots() -> Vec<Hotspot> {
    BUILTIN.clone()
}

static BUILTIN: Lazy<Vec<Hotspot>> = Lazy::new(|| {
    fn hotspot(
        id: &str,
        x: f32,
        y: f32,
        label: &str,
        category: &str,
        season: Season,
        level: HotspotLevel,
        description: &str,
        related: &[&str],
    ) -> Hotspot {
        Hotspot {
            id: id.to_string(),
            x,
            y,
            width: 150.0,
            height: 180.0,
            label: label.to_string(),
            category: category.to_string(),
            season,
            level,
            description: description.to_string(),
            video_url: String::new(),
            original_image: None,
            prompt: String::new(),
            versions: Vec::new(),
            annotations: Vec::new(),
            related_hotspot_ids: related.iter().map(|s| s.to_string()).collect(),
        }
    }

    vec![
        hotspot(
            "qiyue",
            6.0,
            42.0,
            "七月",
            "章节",
            Season::Spring,
            HotspotLevel::Chapter,
            "华夏最早的农事历书：以时间为经、生产生活为纬，记录豳地农民的一年。",
            &["dongshan", "poge"],
        ),
        hotspot(
            "chixiao",
            20.5,
            58.0,
            "鸱鸮",
            "章节",
            Season::Summer,
            HotspotLevel::Chapter,
            "母鸟风雨筑巢的哀鸣，喻周公平乱的惨痛代价。",
            &["qiyue"],
        ),
        hotspot(
            "dongshan",
            36.0,
            47.5,
            "东山",
            "章节",
            Season::Autumn,
            HotspotLevel::Chapter,
            "东征三年后复员士兵的归途独白，未到家先想家。",
            &["poge"],
        ),
        hotspot(
            "poge",
            52.3,
            53.0,
            "破斧",
            "场景",
            Season::Autumn,
            HotspotLevel::Scene,
            "既破我斧，又缺我斨：以兵器残破写战争之长。",
            &[],
        ),
        hotspot(
            "fake",
            63.1,
            45.1,
            "伐柯",
            "场景",
            Season::Summer,
            HotspotLevel::Scene,
            "砍木做柄须用斧，娶妻成家须媒妁：礼法时代的契约观。",
            &[],
        ),
        hotspot(
            "jiuyu",
            74.0,
            64.0,
            "九罭",
            "细节",
            Season::Spring,
            HotspotLevel::Detail,
            "九眼渔网捕得鳟鲂，起兴贤才得用、宾主尽欢。",
            &[],
        ),
        hotspot(
            "langba",
            88.4,
            60.2,
            "狼跋",
            "细节",
            Season::Winter,
            HotspotLevel::Detail,
            "老狼进退两难，而赤舄几几：窘境中的威仪与德行。",
            &[],
        ),
    ]
});

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn far_tier_shows_chapters_only() {
        assert!(visible_at(HotspotLevel::Chapter, ZoomTier::Far, false));
        assert!(!visible_at(HotspotLevel::Scene, ZoomTier::Far, false));
        assert!(!visible_at(HotspotLevel::Detail, ZoomTier::Far, false));
    }

    #[test]
    fn medium_tier_adds_scenes() {
        assert!(visible_at(HotspotLevel::Chapter, ZoomTier::Medium, false));
        assert!(visible_at(HotspotLevel::Scene, ZoomTier::Medium, false));
        assert!(!visible_at(HotspotLevel::Detail, ZoomTier::Medium, false));
    }

    #[test]
    fn near_tier_shows_everything() {
        assert!(visible_at(HotspotLevel::Detail, ZoomTier::Near, false));
    }

    #[test]
    fn reveal_override_ignores_tier() {
        assert!(visible_at(HotspotLevel::Detail, ZoomTier::Far, true));
        assert!(visible_at(HotspotLevel::Scene, ZoomTier::Far, true));
    }

    #[test]
    fn tier_thresholds_partition_the_scale_axis() {
        assert_eq!(ZoomTier::from_scale(1.0, 1.5, 2.5), ZoomTier::Far);
        assert_eq!(ZoomTier::from_scale(1.5, 1.5, 2.5), ZoomTier::Medium);
        assert_eq!(ZoomTier::from_scale(2.49, 1.5, 2.5), ZoomTier::Medium);
        assert_eq!(ZoomTier::from_scale(2.5, 1.5, 2.5), ZoomTier::Near);
        assert_eq!(ZoomTier::from_scale(f32::NAN, 1.5, 2.5), ZoomTier::Far);
    }

    #[test]
    fn store_records_parse_with_optional_fields_missing() {
        let record = r#"[{
            "id": "h-1",
            "x": 4.39,
            "y": 60.16,
            "width": 150,
            "height": 180,
            "label": "狼跋",
            "season": "SPRING",
            "level": "DETAIL",
            "video_url": "https://example.com/img_001.mp4",
            "related_hotspot_ids": []
        }]"#;
        let parsed: Vec<Hotspot> = serde_json::from_str(record).unwrap();
        assert_eq!(parsed.len(), 1);
        assert_eq!(parsed[0].level, HotspotLevel::Detail);
        assert!(parsed[0].versions.is_empty());
        assert!(parsed[0].category.is_empty());
    }

    #[test]
    fn builtin_catalogue_has_unique_ids_and_valid_coords() {
        let list = builtin_hotspots();
        assert!(!list.is_empty());
        for (i, h) in list.iter().enumerate() {
            assert!((0.0..=100.0).contains(&h.x) && (0.0..=100.0).contains(&h.y));
            assert!(list.iter().skip(i + 1).all(|other| other.id != h.id));
        }
    }
}
