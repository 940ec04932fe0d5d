use image::{DynamicImage, ImageBuffer, Pixel};

/// Build the dark variant of an icon.
///
/// Color images with an alpha channel keep that channel as-is and get their
/// RGB channels complemented. Everything else is flattened to 8-bit RGB first,
/// dropping any alpha, and all three channels are complemented. Palette
/// images with transparency arrive here already expanded to RGBA, so they
/// keep their alpha too.
pub fn invert_icon(img: &DynamicImage) -> DynamicImage {
    let color = img.color();
    if color.has_color() && color.has_alpha() {
        let mut rgba = img.to_rgba8();
        complement_color_channels(&mut rgba);
        DynamicImage::ImageRgba8(rgba)
    } else {
        let mut rgb = img.to_rgb8();
        complement_color_channels(&mut rgb);
        DynamicImage::ImageRgb8(rgb)
    }
}

fn complement_color_channels<P>(buf: &mut ImageBuffer<P, Vec<u8>>)
where
    P: Pixel<Subpixel = u8>,
{
    for px in buf.pixels_mut() {
        px.apply_without_alpha(|v| u8::MAX - v);
    }
}
