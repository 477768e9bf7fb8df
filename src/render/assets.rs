//! Fixed render inputs: band templates, fonts, and fallback pictures.

use std::fs;
use std::path::Path;

use ab_glyph::{Font, FontVec, PxScale, ScaleFont};
use image::RgbaImage;
use imageproc::drawing::text_size;
use sha2::{Digest, Sha256};

use crate::config::AssetConfig;
use crate::render::layout::{FontTier, TextMeasure};
use crate::{AppError, Result};

/// Display name font size.
pub const NAME_PX: f32 = 24.0;
/// Handle font size.
pub const HANDLE_PX: f32 = 23.0;
/// Footer timestamp font size.
pub const FOOTER_PX: f32 = 24.0;
/// Body font size at the large tier.
pub const LARGE_TEXT_PX: f32 = 70.0;
/// Body font size at the small tier.
pub const SMALL_TEXT_PX: f32 = 36.0;

/// Verified badge edge length after scaling.
const VERIFIED_SIZE: u32 = 27;

/// The two typefaces every text element is drawn with.
pub struct FontSet {
    /// Heavy weight, used for the display name.
    pub heavy: FontVec,
    /// Semi-bold weight, used for body, handle, and footer.
    pub semi_bold: FontVec,
}

impl FontSet {
    /// Rendered width of a display name candidate, in pixels.
    #[must_use]
    pub fn name_width(&self, text: &str) -> u32 {
        text_size(PxScale::from(NAME_PX), &self.heavy, text).0
    }

    /// Rendered width of a handle candidate, in pixels.
    #[must_use]
    pub fn handle_width(&self, text: &str) -> u32 {
        text_size(PxScale::from(HANDLE_PX), &self.semi_bold, text).0
    }

    /// Body font size for a tier.
    #[must_use]
    pub fn body_scale(tier: FontTier) -> PxScale {
        match tier {
            FontTier::Large => PxScale::from(LARGE_TEXT_PX),
            FontTier::Small => PxScale::from(SMALL_TEXT_PX),
        }
    }

    /// Vertical space one body line occupies at a tier.
    #[must_use]
    #[allow(clippy::cast_possible_truncation, clippy::cast_sign_loss)] // Font heights are small positive values.
    pub fn body_line_height(&self, tier: FontTier) -> u32 {
        let scaled = self.semi_bold.as_scaled(Self::body_scale(tier));
        scaled.height().ceil() as u32
    }
}

impl TextMeasure for FontSet {
    fn line_width(&self, tier: FontTier, text: &str) -> u32 {
        text_size(Self::body_scale(tier), &self.semi_bold, text).0
    }
}

/// Every fixed input the renderer needs, loaded once at startup.
pub struct RenderAssets {
    /// Header band background.
    pub header_template: RgbaImage,
    /// Body band background; stretched vertically to hug the text.
    pub body_template: RgbaImage,
    /// Footer band background.
    pub footer_template: RgbaImage,
    /// Verified badge, already scaled to its final size.
    pub verified_badge: RgbaImage,
    /// Picture substituted when a user has no reachable profile photo.
    pub fallback_picture: RgbaImage,
    /// SHA-256 of the fallback picture file; changes iff the picture does.
    pub fallback_fingerprint: String,
    /// Seed image bytes for bootstrapping a missing slot.
    pub seed_png: Vec<u8>,
    /// Loaded typefaces.
    pub fonts: FontSet,
}

impl RenderAssets {
    /// Load all configured assets from disk.
    ///
    /// # Errors
    ///
    /// Returns `AppError::Io` when a file cannot be read and
    /// `AppError::Render` when an image or font fails to parse.
    pub fn load(config: &AssetConfig) -> Result<Self> {
        let header_template = load_rgba(&config.header_template())?;
        let body_template = load_rgba(&config.body_template())?;
        let footer_template = load_rgba(&config.footer_template())?;

        let verified = load_rgba(&config.verified_template())?;
        let verified_badge = image::imageops::thumbnail(&verified, VERIFIED_SIZE, VERIFIED_SIZE);

        let fallback_bytes = read_file(&config.fallback_picture)?;
        let fallback_fingerprint = fingerprint_bytes(&fallback_bytes);
        let fallback_picture = image::load_from_memory(&fallback_bytes)
            .map_err(|err| {
                AppError::Render(format!(
                    "failed to decode fallback picture {}: {err}",
                    config.fallback_picture.display()
                ))
            })?
            .to_rgba8();

        let seed_png = read_file(&config.seed_picture)?;

        let fonts = FontSet {
            heavy: load_font(&config.font_heavy)?,
            semi_bold: load_font(&config.font_semi_bold)?,
        };

        Ok(Self {
            header_template,
            body_template,
            footer_template,
            verified_badge,
            fallback_picture,
            fallback_fingerprint,
            seed_png,
            fonts,
        })
    }
}

fn read_file(path: &Path) -> Result<Vec<u8>> {
    fs::read(path).map_err(|err| AppError::Io(format!("failed to read {}: {err}", path.display())))
}

fn load_rgba(path: &Path) -> Result<RgbaImage> {
    let bytes = read_file(path)?;
    image::load_from_memory(&bytes)
        .map(|img| img.to_rgba8())
        .map_err(|err| AppError::Render(format!("failed to decode {}: {err}", path.display())))
}

fn load_font(path: &Path) -> Result<FontVec> {
    let bytes = read_file(path)?;
    FontVec::try_from_vec(bytes)
        .map_err(|err| AppError::Render(format!("failed to parse font {}: {err}", path.display())))
}

/// Hex-encoded SHA-256 of a byte string.
fn fingerprint_bytes(bytes: &[u8]) -> String {
    let digest = Sha256::digest(bytes);
    digest.iter().fold(String::new(), |mut acc, byte| {
        use std::fmt::Write as _;
        let _ = write!(acc, "{byte:02x}");
        acc
    })
}
