use image::{imageops::FilterType, GrayImage, Luma};
use imageproc::distance_transform::Norm;

/// Stretch a 0/1 mask to 0/255. Values that are already 0/255 stay put.
pub fn scale_to_bytes(mask: &GrayImage) -> GrayImage {
    GrayImage::from_fn(mask.width(), mask.height(), |x, y| {
        let Luma([v]) = *mask.get_pixel(x, y);
        Luma([v.saturating_mul(255)])
    })
}

/// Pixels strictly above `threshold` become 255, the rest 0.
pub fn binarize(image: &GrayImage, threshold: u8) -> GrayImage {
    imageproc::contrast::threshold(image, threshold)
}

/// Nearest-neighbor resize by `1 / scale`.
pub fn resize_nearest(image: &GrayImage, scale: f64) -> GrayImage {
    let width = ((image.width() as f64 / scale).round() as u32).max(1);
    let height = ((image.height() as f64 / scale).round() as u32).max(1);
    if width == image.width() && height == image.height() {
        return image.clone();
    }
    image::imageops::resize(image, width, height, FilterType::Nearest)
}

/// Foreground pixels removed by one erosion pass with a square
/// `kernel` x `kernel` structuring element.
pub fn boundary_band(binary: &GrayImage, kernel: u8) -> GrayImage {
    let eroded = imageproc::morphology::erode(binary, Norm::LInf, kernel / 2);
    GrayImage::from_fn(binary.width(), binary.height(), |x, y| {
        let inside = binary.get_pixel(x, y)[0] > 0;
        let survived = eroded.get_pixel(x, y)[0] > 0;
        Luma([if inside && !survived { 255 } else { 0 }])
    })
}
