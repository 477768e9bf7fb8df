//! Header band painting and the supporting image operations.

use ab_glyph::PxScale;
use image::{imageops, RgbaImage};
use imageproc::drawing::draw_text_mut;

use crate::models::profile::ProfileSnapshot;
use crate::render::assets::{RenderAssets, HANDLE_PX, NAME_PX};
use crate::render::layout::shorten_to_width;
use crate::render::{SECONDARY_COLOR, TEXT_COLOR};
use crate::Result;

/// Profile picture edge length on the header.
const PICTURE_SIZE: u32 = 78;
const PICTURE_POS: (i64, i64) = (25, 25);
const NAME_POS: (i32, i32) = (118, 30);
const NAME_MAX_WIDTH: u32 = 314;
const HANDLE_POS: (i32, i32) = (118, 62);
const HANDLE_MAX_WIDTH: u32 = 370;
const BADGE_GAP: i64 = 4;
const BADGE_TOP: i64 = 34;

/// Paint the header band for a profile observation.
///
/// The photo (or fallback picture) is cropped to a centered square, masked to
/// a circle, scaled down, and composited onto the template; name and handle
/// are truncated to their pixel budgets; the verified badge lands directly
/// right of the rendered name.
///
/// # Errors
///
/// Returns `AppError::Render` if the photo bytes fail to decode.
pub fn paint_header(
    assets: &RenderAssets,
    snapshot: &ProfileSnapshot,
    photo_png: Option<&[u8]>,
) -> Result<RgbaImage> {
    let mut canvas = assets.header_template.clone();

    let picture = match photo_png {
        Some(bytes) => image::load_from_memory(bytes)?.to_rgba8(),
        None => assets.fallback_picture.clone(),
    };
    let picture = center_square(&picture);
    let mut picture = imageops::resize(
        &picture,
        PICTURE_SIZE,
        PICTURE_SIZE,
        imageops::FilterType::Lanczos3,
    );
    mask_circle(&mut picture);
    imageops::overlay(&mut canvas, &picture, PICTURE_POS.0, PICTURE_POS.1);

    let fonts = &assets.fonts;
    let name = shorten_to_width(&snapshot.display_name, NAME_MAX_WIDTH, |s| fonts.name_width(s));
    draw_text_mut(
        &mut canvas,
        TEXT_COLOR,
        NAME_POS.0,
        NAME_POS.1,
        PxScale::from(NAME_PX),
        &fonts.heavy,
        &name,
    );

    let handle = shorten_to_width(&format!("@{}", snapshot.handle), HANDLE_MAX_WIDTH, |s| {
        fonts.handle_width(s)
    });
    draw_text_mut(
        &mut canvas,
        SECONDARY_COLOR,
        HANDLE_POS.0,
        HANDLE_POS.1,
        PxScale::from(HANDLE_PX),
        &fonts.semi_bold,
        &handle,
    );

    let badge_left = i64::from(NAME_POS.0) + i64::from(fonts.name_width(&name)) + BADGE_GAP;
    imageops::overlay(&mut canvas, &assets.verified_badge, badge_left, BADGE_TOP);

    Ok(canvas)
}

/// Crop to a centered square when the source is not already square.
#[must_use]
pub fn center_square(image: &RgbaImage) -> RgbaImage {
    let (width, height) = image.dimensions();
    if width == height {
        return image.clone();
    }
    let side = width.min(height);
    let left = (width - side) / 2;
    let top = (height - side) / 2;
    imageops::crop_imm(image, left, top, side, side).to_image()
}

/// Mask an image to an antialiased circle by attenuating the alpha channel.
#[allow(clippy::cast_precision_loss, clippy::cast_possible_truncation, clippy::cast_sign_loss)] // Thumbnail coordinates stay far below f32 precision limits.
pub fn mask_circle(image: &mut RgbaImage) {
    let (width, height) = image.dimensions();
    let center_x = width as f32 / 2.0;
    let center_y = height as f32 / 2.0;
    let radius = width.min(height) as f32 / 2.0;

    for (x, y, pixel) in image.enumerate_pixels_mut() {
        let dx = x as f32 + 0.5 - center_x;
        let dy = y as f32 + 0.5 - center_y;
        let distance = (dx * dx + dy * dy).sqrt();
        let coverage = (radius - distance + 0.5).clamp(0.0, 1.0);
        pixel[3] = (f32::from(pixel[3]) * coverage) as u8;
    }
}
