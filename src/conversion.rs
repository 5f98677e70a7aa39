//! Frame-to-image conversion helpers.

use ffmpeg_next::{
    format::Pixel,
    frame::Video as VideoFrame,
    software::scaling::{Context as ScalingContext, Flags as ScalingFlags},
};
use image::{DynamicImage, RgbImage};

use crate::error::ShotError;

/// Copy the first plane of a packed video frame into a tightly-packed buffer.
///
/// FFmpeg frames frequently carry per-row padding (stride > width × bpp),
/// which is stripped here.
fn frame_to_buffer(
    video_frame: &VideoFrame,
    width: u32,
    height: u32,
    bytes_per_pixel: usize,
) -> Vec<u8> {
    let stride = video_frame.stride(0);
    let row_length = (width as usize) * bytes_per_pixel;
    let data = video_frame.data(0);

    if stride == row_length {
        data[..row_length * (height as usize)].to_vec()
    } else {
        let mut buffer = Vec::with_capacity(row_length * (height as usize));
        for row in 0..(height as usize) {
            let row_start = row * stride;
            buffer.extend_from_slice(&data[row_start..row_start + row_length]);
        }
        buffer
    }
}

/// Wrap an RGB24 frame as a [`DynamicImage`].
fn rgb_frame_to_image(rgb_frame: &VideoFrame) -> Result<DynamicImage, ShotError> {
    let width = rgb_frame.width();
    let height = rgb_frame.height();
    let buffer = frame_to_buffer(rgb_frame, width, height, 3);
    let image = RgbImage::from_raw(width, height, buffer).ok_or_else(|| {
        ShotError::Scaling(format!(
            "RGB buffer does not match frame dimensions {width}x{height}"
        ))
    })?;
    Ok(DynamicImage::ImageRgb8(image))
}

/// Convert a decoded frame of any pixel format into an RGB [`DynamicImage`]
/// at its native resolution.
pub(crate) fn frame_to_image(video_frame: &VideoFrame) -> Result<DynamicImage, ShotError> {
    let mut scaler = ScalingContext::get(
        video_frame.format(),
        video_frame.width(),
        video_frame.height(),
        Pixel::RGB24,
        video_frame.width(),
        video_frame.height(),
        ScalingFlags::BILINEAR,
    )
    .map_err(|error| ShotError::Scaling(error.to_string()))?;

    let mut rgb_frame = VideoFrame::empty();
    scaler
        .run(video_frame, &mut rgb_frame)
        .map_err(|error| ShotError::Scaling(error.to_string()))?;
    rgb_frame_to_image(&rgb_frame)
}
