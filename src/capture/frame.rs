//! Image handles exchanged with the capture flow

/// An image handed over by the capture flow, as raw RGBA pixels.
///
/// Dimensions are in device pixels; `scale` is the device-pixel-per-point
/// factor of the screen the image came from, so the logical size seen by
/// the host UI is the pixel size divided by `scale`.
#[derive(Debug, Clone)]
pub struct CapturedFrame {
    /// Raw RGBA pixel data
    pub data: Vec<u8>,
    /// Frame width in device pixels
    pub width: u32,
    /// Frame height in device pixels
    pub height: u32,
    /// Device pixels per logical point
    pub scale: f32,
}

impl CapturedFrame {
    /// Create a frame with a 1:1 pixel-to-point scale
    pub fn new(data: Vec<u8>, width: u32, height: u32) -> Self {
        Self::with_scale(data, width, height, 1.0)
    }

    /// Create a frame with an explicit device pixel scale factor
    pub fn with_scale(data: Vec<u8>, width: u32, height: u32, scale: f32) -> Self {
        Self {
            data,
            width,
            height,
            scale,
        }
    }

    /// Get frame dimensions in device pixels as (width, height)
    pub fn dimensions(&self) -> (u32, u32) {
        (self.width, self.height)
    }

    /// Get the logical (point) size of the frame as (width, height)
    pub fn logical_size(&self) -> (f32, f32) {
        (
            self.width as f32 / self.scale,
            self.height as f32 / self.scale,
        )
    }
}
