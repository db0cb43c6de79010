//! Picking a source color out of an image.
//!
//! The image is shrunk, its opaque pixels are bucketed into a coarse
//! histogram, and the buckets are ranked the way Material's scorer ranks
//! them: colors whose hue dominates the image and that carry enough chroma to
//! theme with win.
//!
//! HCT measurement and hue distances come from `material_color_utilities`.
//! Ranking stays here: the crate's `score::score_with` sorts candidates
//! lowest score first, which would hand back the least suitable color.

use std::{collections::HashMap, path::PathBuf, sync::Arc};

use base64::Engine;
use image::{DynamicImage, GenericImageView};
use thiserror::Error;
use tracing::{debug, warn};

use material_color_utilities::utils::math::difference_degrees;

use crate::{Argb, Hct};

/// Images are shrunk to fit in a square this size before counting colors.
pub const MAX_THUMBNAIL_SIZE: u32 = 112;

/// Colors with less chroma than this are never chosen.
const CUTOFF_CHROMA: f64 = 5.0;
/// Colors whose hue covers no more than this share of the image are never chosen.
const CUTOFF_EXCITED_PROPORTION: f64 = 0.01;
const TARGET_CHROMA: f64 = 48.0;
const WEIGHT_PROPORTION: f64 = 0.7;
const WEIGHT_CHROMA_ABOVE: f64 = 0.3;
const WEIGHT_CHROMA_BELOW: f64 = 0.1;
/// Bits kept per channel when bucketing pixels.
const HISTOGRAM_BITS: u8 = 5;

/// Where image data comes from.
#[derive(Clone, PartialEq, Debug)]
pub enum ImageSource {
    /// A file on disk.
    Path(PathBuf),
    /// Encoded image bytes (PNG, JPEG).
    Bytes(Arc<[u8]>),
    /// A `data:<mime>;base64,<payload>` URL.
    DataUrl(String),
    /// A remote URL. Never fetched; extraction from it fails.
    Url(String),
}

impl ImageSource {
    /// Classifies user input: `data:` URLs, `http(s)://` URLs, or a path.
    pub fn parse(input: &str) -> Self {
        let trimmed = input.trim();
        if trimmed.starts_with("data:") {
            ImageSource::DataUrl(trimmed.to_string())
        } else if trimmed.starts_with("http://") || trimmed.starts_with("https://") {
            ImageSource::Url(trimmed.to_string())
        } else {
            ImageSource::Path(PathBuf::from(trimmed))
        }
    }
}

/// Errors that can occur while extracting a source color.
#[derive(Debug, Error)]
pub enum ExtractError {
    /// The source could not be loaded or decoded into pixels.
    #[error("extraction failed: {reason}")]
    ExtractionFailed {
        /// What went wrong, for display.
        reason: String,
        /// The decoder error behind the failure, when there is one.
        #[source]
        source: Option<image::ImageError>,
    },
}

impl ExtractError {
    fn failed(reason: impl Into<String>) -> Self {
        Self::ExtractionFailed {
            reason: reason.into(),
            source: None,
        }
    }

    fn image(reason: impl Into<String>, source: image::ImageError) -> Self {
        Self::ExtractionFailed {
            reason: reason.into(),
            source: Some(source),
        }
    }
}

/// Decodes `source` and returns its best source color.
///
/// Falls back to [`Argb::GOOGLE_BLUE`] when no pixel is colorful enough.
pub fn extract_source_color(source: &ImageSource) -> Result<Argb, ExtractError> {
    let image = load_image(source)?;
    Ok(source_color_from_image(&image))
}

/// Decodes `source` and returns up to `count` candidate source colors, best
/// first. See [`ranked_source_colors`].
pub fn extract_source_colors(
    source: &ImageSource,
    count: usize,
) -> Result<Vec<Argb>, ExtractError> {
    let image = load_image(source)?;
    Ok(ranked_source_colors(&image, count))
}

/// The best source color of an already-decoded image.
pub fn source_color_from_image(image: &DynamicImage) -> Argb {
    let histogram = histogram(image);
    let ranked = score(&histogram, 1);
    match ranked.first() {
        Some(&color) => {
            debug!("Picked source color {color} from {} buckets", histogram.len());
            color
        }
        None => {
            warn!("No colorful pixels found; using fallback source color");
            Argb::GOOGLE_BLUE
        }
    }
}

/// Up to `count` candidate source colors, best first, at least 15° apart in
/// hue.
///
/// Returns just [`Argb::GOOGLE_BLUE`] when no pixel is colorful enough.
pub fn ranked_source_colors(image: &DynamicImage, count: usize) -> Vec<Argb> {
    let ranked = score(&histogram(image), count);
    if ranked.is_empty() {
        vec![Argb::GOOGLE_BLUE]
    } else {
        ranked
    }
}

fn load_image(source: &ImageSource) -> Result<DynamicImage, ExtractError> {
    let image = match source {
        ImageSource::Path(path) => image::open(path).map_err(|err| {
            ExtractError::image(format!("could not load {}", path.display()), err)
        })?,
        ImageSource::Bytes(bytes) => image::load_from_memory(bytes)
            .map_err(|err| ExtractError::image("could not decode image bytes", err))?,
        ImageSource::DataUrl(url) => image::load_from_memory(&decode_data_url(url)?)
            .map_err(|err| ExtractError::image("could not decode data URL image", err))?,
        ImageSource::Url(url) => {
            return Err(ExtractError::failed(format!(
                "remote images are not fetched: {url}"
            )));
        }
    };
    Ok(image)
}

fn decode_data_url(url: &str) -> Result<Vec<u8>, ExtractError> {
    let rest = url
        .strip_prefix("data:")
        .ok_or_else(|| ExtractError::failed("not a data URL"))?;
    let (meta, payload) = rest
        .split_once(',')
        .ok_or_else(|| ExtractError::failed("data URL has no payload"))?;
    if !meta.ends_with(";base64") {
        return Err(ExtractError::failed("only base64 data URLs are supported"));
    }
    base64::engine::general_purpose::STANDARD
        .decode(payload.trim())
        .map_err(|err| ExtractError::failed(format!("invalid base64 payload: {err}")))
}

/// Average color of each 5-bit bucket, with its pixel count.
fn histogram(image: &DynamicImage) -> HashMap<Argb, u32> {
    let (width, height) = image.dimensions();
    let thumbnail;
    let image = if width > MAX_THUMBNAIL_SIZE || height > MAX_THUMBNAIL_SIZE {
        thumbnail = image.thumbnail(MAX_THUMBNAIL_SIZE, MAX_THUMBNAIL_SIZE);
        &thumbnail
    } else {
        image
    };

    let shift = 8 - HISTOGRAM_BITS;
    let mut buckets: HashMap<(u8, u8, u8), [u64; 4]> = HashMap::new();
    for pixel in image.to_rgba8().pixels() {
        let [r, g, b, a] = pixel.0;
        if a < u8::MAX {
            continue;
        }
        let sums = buckets
            .entry((r >> shift, g >> shift, b >> shift))
            .or_insert([0; 4]);
        sums[0] += u64::from(r);
        sums[1] += u64::from(g);
        sums[2] += u64::from(b);
        sums[3] += 1;
    }

    buckets
        .into_values()
        .map(|[r, g, b, count]| {
            let average = |sum: u64| u8::try_from(sum / count).unwrap_or(u8::MAX);
            (
                Argb::from_rgb_u8(average(r), average(g), average(b)),
                u32::try_from(count).unwrap_or(u32::MAX),
            )
        })
        .fold(HashMap::new(), |mut merged, (color, count)| {
            *merged.entry(color).or_insert(0) += count;
            merged
        })
}

struct Candidate {
    color: Argb,
    hue: f64,
    score: f64,
}

/// Ranks histogram colors for use as a source color.
fn score(histogram: &HashMap<Argb, u32>, desired: usize) -> Vec<Argb> {
    let total: f64 = histogram.values().map(|&count| f64::from(count)).sum();
    if total == 0.0 || desired == 0 {
        return Vec::new();
    }

    let colors: Vec<(Argb, Hct, u32)> = histogram
        .iter()
        .map(|(&color, &count)| (color, Hct::from_argb(color), count))
        .collect();

    let mut hue_population = [0.0f64; 360];
    for (_, hct, count) in &colors {
        hue_population[hue_index(hct.hue())] += f64::from(*count);
    }

    let mut excited = [0.0f64; 360];
    for (hue, population) in hue_population.iter().enumerate() {
        let proportion = population / total;
        for offset in 0..30 {
            excited[(hue + 360 - 14 + offset) % 360] += proportion;
        }
    }

    let mut candidates: Vec<Candidate> = colors
        .iter()
        .filter_map(|&(color, hct, _)| {
            let proportion = excited[hue_index(hct.hue())];
            if hct.chroma() < CUTOFF_CHROMA || proportion <= CUTOFF_EXCITED_PROPORTION {
                return None;
            }
            let chroma_weight = if hct.chroma() < TARGET_CHROMA {
                WEIGHT_CHROMA_BELOW
            } else {
                WEIGHT_CHROMA_ABOVE
            };
            let score = proportion * 100.0 * WEIGHT_PROPORTION
                + (hct.chroma() - TARGET_CHROMA) * chroma_weight;
            Some(Candidate {
                color,
                hue: hct.hue(),
                score,
            })
        })
        .collect();
    candidates.sort_by(|a, b| {
        b.score
            .total_cmp(&a.score)
            .then_with(|| a.color.cmp(&b.color))
    });

    // Prefer widely separated hues, relaxing the separation until enough
    // colors are found.
    let mut chosen: Vec<&Candidate> = Vec::new();
    for min_difference in (15..=90).rev() {
        chosen.clear();
        for candidate in &candidates {
            let distinct = chosen
                .iter()
                .all(|c| difference_degrees(c.hue, candidate.hue) >= f64::from(min_difference));
            if distinct {
                chosen.push(candidate);
            }
            if chosen.len() >= desired {
                break;
            }
        }
        if chosen.len() >= desired {
            break;
        }
    }
    chosen.into_iter().map(|candidate| candidate.color).collect()
}

fn hue_index(hue: f64) -> usize {
    // Hue is in [0, 360); rounding can land on 360.
    (hue.round() as usize) % 360
}
