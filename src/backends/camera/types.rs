// SPDX-License-Identifier: GPL-3.0-only
// Shared types for camera backend abstraction

//! Shared types for camera backends

use std::fmt;

/// Frame size in pixels
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct Resolution {
    pub width: u32,
    pub height: u32,
}

impl Resolution {
    pub const fn new(width: u32, height: u32) -> Self {
        Self { width, height }
    }

    /// Number of pixels in a frame of this size
    pub fn pixel_count(&self) -> usize {
        self.width as usize * self.height as usize
    }
}

impl fmt::Display for Resolution {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}x{}", self.width, self.height)
    }
}

/// Byte order of the three colour channels in a packed 24-bit pixel
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum ChannelOrder {
    /// Red, green, blue
    #[default]
    Rgb,
    /// Blue, green, red
    Bgr,
}

/// Pixel encodings a capture session can negotiate with the device
///
/// Only formats that decode to packed 24-bit colour are listed; the decode
/// step turns each of them into a [`RawFrame`].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PixelFormat {
    /// Motion JPEG (compressed, decoded to RGB)
    Mjpeg,
    /// YUV 4:2:2 packed as Y0 U Y1 V (decoded to RGB, BT.601)
    Yuyv,
    /// Packed 24-bit BGR
    Bgr24,
    /// Packed 24-bit RGB
    Rgb24,
}

impl PixelFormat {
    /// V4L2 FourCC code for this format
    pub fn fourcc(&self) -> [u8; 4] {
        match self {
            PixelFormat::Mjpeg => *b"MJPG",
            PixelFormat::Yuyv => *b"YUYV",
            PixelFormat::Bgr24 => *b"BGR3",
            PixelFormat::Rgb24 => *b"RGB3",
        }
    }

    /// Look up a format from its FourCC code
    pub fn from_fourcc(code: &[u8; 4]) -> Option<Self> {
        match code {
            b"MJPG" => Some(PixelFormat::Mjpeg),
            b"YUYV" => Some(PixelFormat::Yuyv),
            b"BGR3" => Some(PixelFormat::Bgr24),
            b"RGB3" => Some(PixelFormat::Rgb24),
            _ => None,
        }
    }

    /// Channel order of the decoded frame
    pub fn decoded_order(&self) -> ChannelOrder {
        match self {
            PixelFormat::Bgr24 => ChannelOrder::Bgr,
            PixelFormat::Mjpeg | PixelFormat::Yuyv | PixelFormat::Rgb24 => ChannelOrder::Rgb,
        }
    }
}

impl fmt::Display for PixelFormat {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let code = self.fourcc();
        write!(f, "{}", String::from_utf8_lossy(&code))
    }
}

/// A decoded frame in the device's native channel order
///
/// Pixels are packed 3 bytes each, row-major, without padding.
#[derive(Debug, Clone)]
pub struct RawFrame {
    pub width: u32,
    pub height: u32,
    pub order: ChannelOrder,
    pub data: Vec<u8>,
}

impl RawFrame {
    pub fn new(width: u32, height: u32, order: ChannelOrder, data: Vec<u8>) -> Self {
        Self {
            width,
            height,
            order,
            data,
        }
    }

    pub fn resolution(&self) -> Resolution {
        Resolution::new(self.width, self.height)
    }

    /// True when `data` holds exactly `width * height` packed pixels
    pub fn is_well_formed(&self) -> bool {
        self.data.len() == self.resolution().pixel_count() * 3
    }
}

/// Result type for camera backend operations
pub type BackendResult<T> = Result<T, BackendError>;

/// Camera backend errors
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum BackendError {
    /// Camera device not found or could not be opened
    DeviceNotFound(String),
    /// Device opened but could not be prepared for capture
    InitializationFailed(String),
    /// None of the supported pixel formats is offered by the device
    FormatNotSupported(String),
    /// The device failed to latch a frame
    CaptureFailed(String),
    /// A latched frame could not be turned into pixels
    DecodeFailed(String),
    /// The session has already been released
    Released,
    /// General I/O error
    IoError(String),
}

impl fmt::Display for BackendError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            BackendError::DeviceNotFound(msg) => write!(f, "Device not found: {}", msg),
            BackendError::InitializationFailed(msg) => write!(f, "Initialization failed: {}", msg),
            BackendError::FormatNotSupported(msg) => write!(f, "Format not supported: {}", msg),
            BackendError::CaptureFailed(msg) => write!(f, "Capture failed: {}", msg),
            BackendError::DecodeFailed(msg) => write!(f, "Decode failed: {}", msg),
            BackendError::Released => write!(f, "Camera session already released"),
            BackendError::IoError(msg) => write!(f, "I/O error: {}", msg),
        }
    }
}

impl std::error::Error for BackendError {}

impl From<std::io::Error> for BackendError {
    fn from(err: std::io::Error) -> Self {
        BackendError::IoError(err.to_string())
    }
}
