//! Body and footer painting and final canvas assembly.

use std::io::Cursor;

use ab_glyph::PxScale;
use chrono::DateTime;
use chrono_tz::Tz;
use image::{imageops, GenericImage, RgbaImage};
use imageproc::drawing::draw_text_mut;

use crate::render::assets::{FontSet, RenderAssets, FOOTER_PX};
use crate::render::layout::{BodyLayout, FontTier};
use crate::render::{SECONDARY_COLOR, TEXT_COLOR};
use crate::Result;

/// Canvas width shared by every band template.
pub const CANVAS_WIDTH: u32 = 512;
/// The finished sticker must fit within this square.
const STICKER_MAX: u32 = 512;

const BODY_LEFT: i32 = 27;
const BODY_TOP_LARGE: i32 = -26;
const BODY_TOP_SMALL: i32 = -12;
const LINE_SPACING: u32 = 4;
const FOOTER_TEXT_POS: (i32, i32) = (27, 28);

/// Paint the body band, stretched vertically to hug the laid-out text.
#[must_use]
#[allow(clippy::cast_possible_truncation, clippy::cast_possible_wrap, clippy::cast_sign_loss)] // Line counts and pixel offsets stay within band dimensions.
pub fn paint_body(assets: &RenderAssets, layout: &BodyLayout) -> RgbaImage {
    let fonts = &assets.fonts;
    let top = match layout.tier {
        FontTier::Large => BODY_TOP_LARGE,
        FontTier::Small => BODY_TOP_SMALL,
    };
    let line_height = fonts.body_line_height(layout.tier);
    let line_count = layout.lines.len() as u32;

    let height = if line_count <= 1 {
        i64::from(line_height) + i64::from(top) + 1
    } else {
        let block = line_count * line_height + line_count.saturating_sub(1) * LINE_SPACING;
        i64::from(block) - i64::from(LINE_SPACING)
    };
    let height = height.max(1) as u32;

    let mut band = imageops::resize(
        &assets.body_template,
        CANVAS_WIDTH,
        height,
        imageops::FilterType::Triangle,
    );

    let scale = FontSet::body_scale(layout.tier);
    let step = (line_height + LINE_SPACING) as i32;
    for (index, line) in layout.lines.iter().enumerate() {
        let y = top + index as i32 * step;
        draw_text_mut(
            &mut band,
            TEXT_COLOR,
            BODY_LEFT,
            y,
            scale,
            &fonts.semi_bold,
            line,
        );
    }
    band
}

/// Paint the footer band, stamped with the localized timestamp.
#[must_use]
pub fn paint_footer(assets: &RenderAssets, timestamp: DateTime<Tz>) -> RgbaImage {
    let mut band = assets.footer_template.clone();
    let stamp = format!(
        "{} • {}",
        timestamp.format("%I:%M %p"),
        timestamp.format("%b %d, %Y")
    );
    draw_text_mut(
        &mut band,
        SECONDARY_COLOR,
        FOOTER_TEXT_POS.0,
        FOOTER_TEXT_POS.1,
        PxScale::from(FOOTER_PX),
        &assets.fonts.semi_bold,
        &stamp,
    );
    band
}

/// Stack the three bands and downsample into the sticker budget.
///
/// # Errors
///
/// Returns `AppError::Render` if a band exceeds the canvas bounds.
#[allow(clippy::cast_possible_truncation)] // The scaled width is bounded by CANVAS_WIDTH.
pub fn stack_bands(header: &RgbaImage, body: &RgbaImage, footer: &RgbaImage) -> Result<RgbaImage> {
    let total = header.height() + body.height() + footer.height();
    let mut canvas = RgbaImage::new(CANVAS_WIDTH, total);
    canvas.copy_from(header, 0, 0)?;
    canvas.copy_from(body, 0, header.height())?;
    canvas.copy_from(footer, 0, header.height() + body.height())?;

    if total <= STICKER_MAX {
        return Ok(canvas);
    }

    // Downscale preserving aspect ratio so the tall side lands on the budget.
    let scaled_width =
        (u64::from(CANVAS_WIDTH) * u64::from(STICKER_MAX) / u64::from(total)) as u32;
    Ok(imageops::resize(
        &canvas,
        scaled_width.max(1),
        STICKER_MAX,
        imageops::FilterType::Lanczos3,
    ))
}

/// PNG-encode a finished image.
///
/// # Errors
///
/// Returns `AppError::Render` if encoding fails.
pub fn encode_png(image: &RgbaImage) -> Result<Vec<u8>> {
    let mut buffer = Cursor::new(Vec::new());
    image.write_to(&mut buffer, image::ImageFormat::Png)?;
    Ok(buffer.into_inner())
}
