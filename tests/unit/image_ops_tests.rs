//! Raster operations that need no fonts or templates.

use image::{Rgba, RgbaImage};
use tweetpress::render::header::{center_square, mask_circle};
use tweetpress::render::sticker::{encode_png, stack_bands, CANVAS_WIDTH};

fn solid(width: u32, height: u32, rgba: [u8; 4]) -> RgbaImage {
    RgbaImage::from_pixel(width, height, Rgba(rgba))
}

#[test]
fn center_square_crops_the_long_axis() {
    let wide = solid(100, 60, [10, 20, 30, 255]);
    let cropped = center_square(&wide);
    assert_eq!(cropped.dimensions(), (60, 60));

    let tall = solid(40, 90, [10, 20, 30, 255]);
    let cropped = center_square(&tall);
    assert_eq!(cropped.dimensions(), (40, 40));
}

#[test]
fn center_square_keeps_square_input() {
    let square = solid(64, 64, [1, 2, 3, 255]);
    let cropped = center_square(&square);
    assert_eq!(cropped.dimensions(), (64, 64));
    assert_eq!(cropped, square);
}

#[test]
fn mask_circle_clears_corners_and_keeps_center() {
    let mut image = solid(80, 80, [200, 200, 200, 255]);
    mask_circle(&mut image);

    assert_eq!(image.get_pixel(0, 0)[3], 0, "corner should be transparent");
    assert_eq!(
        image.get_pixel(79, 79)[3],
        0,
        "opposite corner should be transparent"
    );
    assert_eq!(image.get_pixel(40, 40)[3], 255, "center should stay opaque");
}

#[test]
fn mask_circle_is_deterministic() {
    let mut first = solid(50, 50, [9, 9, 9, 255]);
    let mut second = solid(50, 50, [9, 9, 9, 255]);
    mask_circle(&mut first);
    mask_circle(&mut second);
    assert_eq!(first, second);
}

#[test]
fn stack_bands_places_bands_in_order() {
    let header = solid(CANVAS_WIDTH, 100, [255, 0, 0, 255]);
    let body = solid(CANVAS_WIDTH, 150, [0, 255, 0, 255]);
    let footer = solid(CANVAS_WIDTH, 100, [0, 0, 255, 255]);

    let canvas = stack_bands(&header, &body, &footer).expect("stack");
    assert_eq!(canvas.dimensions(), (CANVAS_WIDTH, 350));
    assert_eq!(canvas.get_pixel(0, 50)[0], 255, "header band row");
    assert_eq!(canvas.get_pixel(0, 175)[1], 255, "body band row");
    assert_eq!(canvas.get_pixel(0, 300)[2], 255, "footer band row");
}

#[test]
fn tall_stacks_are_downsampled_into_the_budget() {
    let header = solid(CANVAS_WIDTH, 300, [255, 0, 0, 255]);
    let body = solid(CANVAS_WIDTH, 300, [0, 255, 0, 255]);
    let footer = solid(CANVAS_WIDTH, 300, [0, 0, 255, 255]);

    let canvas = stack_bands(&header, &body, &footer).expect("stack");
    let (width, height) = canvas.dimensions();
    assert_eq!(height, 512);
    assert!(width <= 512);
    // Aspect ratio is preserved: 512/900 of the original width.
    assert_eq!(width, 512 * 512 / 900);
}

#[test]
fn encoded_png_roundtrips() {
    let image = solid(16, 8, [12, 34, 56, 255]);
    let png = encode_png(&image).expect("encode");

    let decoded = image::load_from_memory(&png).expect("decode").to_rgba8();
    assert_eq!(decoded.dimensions(), (16, 8));
    assert_eq!(decoded.get_pixel(3, 3), image.get_pixel(3, 3));
}

#[test]
fn identical_inputs_encode_identically() {
    let png_a = encode_png(&solid(10, 10, [5, 6, 7, 255])).expect("encode");
    let png_b = encode_png(&solid(10, 10, [5, 6, 7, 255])).expect("encode");
    assert_eq!(png_a, png_b);
}
