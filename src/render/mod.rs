//! Sticker rendering: text layout, header painting, and band composition.
//!
//! The pipeline sees rendering through the [`Renderer`] trait so hosts and
//! tests can substitute the raster implementation; [`TemplateRenderer`] is
//! the production implementation drawing onto the configured band templates.

use chrono::DateTime;
use chrono_tz::Tz;
use image::Rgba;

use crate::config::AssetConfig;
use crate::models::profile::ProfileSnapshot;
use crate::Result;

pub mod assets;
pub mod header;
pub mod layout;
pub mod sticker;

pub use assets::RenderAssets;
pub use layout::{BodyFitter, BodyLayout, FontTier, TextMeasure};

/// Main text color.
pub(crate) const TEXT_COLOR: Rgba<u8> = Rgba([0xff, 0xff, 0xff, 0xff]);
/// Secondary text color used for handle and footer.
pub(crate) const SECONDARY_COLOR: Rgba<u8> = Rgba([0x8d, 0x99, 0xa5, 0xff]);

/// Rendering seam between the generation pipeline and the raster code.
pub trait Renderer: Send + Sync {
    /// Render the header band for a profile observation into PNG bytes.
    ///
    /// `photo_png` carries the downloaded profile photo; `None` paints the
    /// configured fallback picture.
    ///
    /// # Errors
    ///
    /// Returns `AppError::Render` if decoding or drawing fails.
    fn render_header(
        &self,
        snapshot: &ProfileSnapshot,
        photo_png: Option<&[u8]>,
    ) -> Result<Vec<u8>>;

    /// Compose the full sticker from text, a rendered header, and a
    /// localized timestamp.
    ///
    /// # Errors
    ///
    /// Returns `AppError::Layout` when the text cannot be fitted and
    /// `AppError::Render` for raster failures.
    fn compose_sticker(
        &self,
        text: &str,
        header_png: &[u8],
        timestamp: DateTime<Tz>,
    ) -> Result<Vec<u8>>;

    /// Fingerprint of the fallback picture substituted for absent photos.
    fn fallback_fingerprint(&self) -> &str;
}

/// Production renderer drawing onto the configured templates and fonts.
pub struct TemplateRenderer {
    assets: RenderAssets,
    fitter: BodyFitter,
}

impl TemplateRenderer {
    /// Load templates, fonts, and the hyphenation dictionary.
    ///
    /// # Errors
    ///
    /// Returns `AppError::Render`/`AppError::Io` when an asset cannot be
    /// loaded and `AppError::Config` when the dictionary is unavailable.
    pub fn new(config: &AssetConfig) -> Result<Self> {
        Ok(Self {
            assets: RenderAssets::load(config)?,
            fitter: BodyFitter::new()?,
        })
    }
}

impl Renderer for TemplateRenderer {
    fn render_header(
        &self,
        snapshot: &ProfileSnapshot,
        photo_png: Option<&[u8]>,
    ) -> Result<Vec<u8>> {
        let band = header::paint_header(&self.assets, snapshot, photo_png)?;
        sticker::encode_png(&band)
    }

    fn compose_sticker(
        &self,
        text: &str,
        header_png: &[u8],
        timestamp: DateTime<Tz>,
    ) -> Result<Vec<u8>> {
        let header = image::load_from_memory(header_png)?.to_rgba8();
        let layout = self.fitter.fit(text, &self.assets.fonts)?;
        let body = sticker::paint_body(&self.assets, &layout);
        let footer = sticker::paint_footer(&self.assets, timestamp);
        let canvas = sticker::stack_bands(&header, &body, &footer)?;
        sticker::encode_png(&canvas)
    }

    fn fallback_fingerprint(&self) -> &str {
        &self.assets.fallback_fingerprint
    }
}
