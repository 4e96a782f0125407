// SPDX-License-Identifier: GPL-3.0-only

//! V4L2 capture session
//!
//! Opens `/dev/videoN` through the v4l crate, settles on one of the pixel
//! formats we can decode and hands out decoded frames. Resolution and frame
//! rate requests are only honoured before the first grab: the memory-mapped
//! stream is created lazily on that grab, since V4L2 refuses format changes
//! while buffers are queued.

use super::format_converters::yuyv_to_rgb;
use super::types::*;
use super::{AutoControls, CaptureDevice, v4l2_controls};
use crate::constants::CAPTURE_BUFFER_COUNT;
use image::ImageFormat;
use ouroboros::self_referencing;
use std::borrow::Cow;
use tracing::{debug, info, warn};
use v4l::FourCC;
use v4l::buffer::Type;
use v4l::format::Format;
use v4l::io::traits::CaptureStream;
use v4l::prelude::*;
use v4l::video::Capture;
use v4l::video::capture::Parameters;

/// Device handle together with the mmap stream borrowing it
#[self_referencing]
struct ActiveStream {
    device: Device,
    #[borrows(mut device)]
    #[not_covariant]
    stream: MmapStream<'this>,
}

enum SessionState {
    Configuring(Device),
    Streaming(ActiveStream),
    Released,
}

/// Capture session backed by a V4L2 video node
pub struct V4l2Camera {
    path: String,
    name: String,
    pixel_format: PixelFormat,
    resolution: Resolution,
    /// Bytes per line as reported by the driver
    stride: u32,
    frame_rate: f64,
    state: SessionState,
    latched: Vec<u8>,
    has_latched: bool,
}

impl V4l2Camera {
    /// Open `/dev/video{index}` and select the first of `preferred` it offers
    pub fn open(index: usize, preferred: &[PixelFormat]) -> BackendResult<Self> {
        let path = format!("/dev/video{}", index);
        let device = Device::new(index)
            .map_err(|e| BackendError::DeviceNotFound(format!("{}: {}", path, e)))?;

        let name = device
            .query_caps()
            .map(|caps| caps.card)
            .unwrap_or_else(|_| path.clone());

        let offered: Vec<[u8; 4]> = device
            .enum_formats()
            .map_err(|e| {
                BackendError::InitializationFailed(format!("Failed to enumerate formats: {}", e))
            })?
            .into_iter()
            .map(|desc| desc.fourcc.repr)
            .collect();
        debug!(
            device = %path,
            offered = ?offered.iter().map(|c| String::from_utf8_lossy(c).into_owned()).collect::<Vec<_>>(),
            "Device pixel formats"
        );

        let pixel_format = preferred
            .iter()
            .copied()
            .find(|format| offered.contains(&format.fourcc()))
            .ok_or_else(|| {
                BackendError::FormatNotSupported(format!(
                    "{} offers none of the decodable pixel formats",
                    path
                ))
            })?;

        let mut format = device
            .format()
            .map_err(|e| BackendError::InitializationFailed(format!("Failed to query format: {}", e)))?;
        format.fourcc = FourCC::new(&pixel_format.fourcc());
        let applied = device
            .set_format(&format)
            .map_err(|e| BackendError::InitializationFailed(format!("Failed to set format: {}", e)))?;

        let frame_rate = read_frame_rate(&device).unwrap_or(0.0);

        let mut camera = Self {
            path,
            name,
            pixel_format,
            resolution: Resolution::new(applied.width, applied.height),
            stride: applied.stride,
            frame_rate,
            state: SessionState::Configuring(device),
            latched: Vec::new(),
            has_latched: false,
        };
        camera.apply_format(&applied);

        info!(
            device = %camera.path,
            name = %camera.name,
            format = %camera.pixel_format,
            resolution = %camera.resolution,
            fps = camera.frame_rate,
            "Opened V4L2 camera"
        );
        Ok(camera)
    }

    /// Device node path, e.g. `/dev/video0`
    pub fn path(&self) -> &str {
        &self.path
    }

    pub fn pixel_format(&self) -> PixelFormat {
        self.pixel_format
    }

    fn apply_format(&mut self, format: &Format) {
        self.resolution = Resolution::new(format.width, format.height);
        self.stride = format.stride;
        match PixelFormat::from_fourcc(&format.fourcc.repr) {
            Some(pixel_format) => self.pixel_format = pixel_format,
            None => warn!(
                device = %self.path,
                fourcc = ?format.fourcc,
                "Driver switched to an undecodable pixel format"
            ),
        }
    }

    fn start_streaming(&mut self) -> BackendResult<()> {
        match std::mem::replace(&mut self.state, SessionState::Released) {
            SessionState::Configuring(device) => {
                let format = device.format().map_err(|e| {
                    BackendError::InitializationFailed(format!("Failed to query format: {}", e))
                })?;
                if PixelFormat::from_fourcc(&format.fourcc.repr).is_none() {
                    return Err(BackendError::FormatNotSupported(format!(
                        "{:?} is not decodable",
                        format.fourcc
                    )));
                }
                self.apply_format(&format);

                let active = ActiveStreamTryBuilder {
                    device,
                    stream_builder: |device| {
                        MmapStream::with_buffers(device, Type::VideoCapture, CAPTURE_BUFFER_COUNT)
                    },
                }
                .try_build()
                .map_err(|e| {
                    BackendError::InitializationFailed(format!(
                        "Failed to create buffer stream: {}",
                        e
                    ))
                })?;

                info!(
                    device = %self.path,
                    format = %self.pixel_format,
                    resolution = %self.resolution,
                    buffers = CAPTURE_BUFFER_COUNT,
                    "V4L2 capture stream started"
                );
                self.state = SessionState::Streaming(active);
                Ok(())
            }
            SessionState::Streaming(active) => {
                self.state = SessionState::Streaming(active);
                Ok(())
            }
            SessionState::Released => Err(BackendError::Released),
        }
    }
}

impl CaptureDevice for V4l2Camera {
    fn name(&self) -> &str {
        &self.name
    }

    fn request_resolution(&mut self, resolution: Resolution) {
        let result = {
            let SessionState::Configuring(device) = &self.state else {
                warn!(device = %self.path, %resolution, "Resolution request ignored while streaming");
                return;
            };
            device.format().and_then(|mut format| {
                format.width = resolution.width;
                format.height = resolution.height;
                format.fourcc = FourCC::new(&self.pixel_format.fourcc());
                let applied = device.set_format(&format)?;
                Ok((applied, read_frame_rate(device)))
            })
        };

        match result {
            Ok((applied, frame_rate)) => {
                self.apply_format(&applied);
                if let Some(fps) = frame_rate {
                    self.frame_rate = fps;
                }
            }
            Err(e) => debug!(device = %self.path, %resolution, error = %e, "Device rejected resolution"),
        }
    }

    fn resolution(&self) -> Resolution {
        self.resolution
    }

    fn request_frame_rate(&mut self, fps: f64) {
        let result = {
            let SessionState::Configuring(device) = &self.state else {
                warn!(device = %self.path, fps, "Frame rate request ignored while streaming");
                return;
            };
            let requested = fps.round().max(1.0) as u32;
            device
                .set_params(&Parameters::with_fps(requested))
                .map(|_| read_frame_rate(device))
        };

        match result {
            Ok(Some(applied)) => self.frame_rate = applied,
            Ok(None) => debug!(device = %self.path, fps, "Device reported no frame interval"),
            Err(e) => debug!(device = %self.path, fps, error = %e, "Device rejected frame rate"),
        }
    }

    fn frame_rate(&self) -> f64 {
        self.frame_rate
    }

    fn enable_auto_controls(&mut self) -> AutoControls {
        AutoControls {
            exposure: v4l2_controls::enable_auto_exposure(&self.path),
            focus: v4l2_controls::enable_auto_focus(&self.path),
        }
    }

    fn grab(&mut self) -> BackendResult<()> {
        self.start_streaming()?;

        let SessionState::Streaming(active) = &mut self.state else {
            return Err(BackendError::Released);
        };
        let latched = &mut self.latched;
        active.with_stream_mut(|stream| {
            let (buf, meta) = stream
                .next()
                .map_err(|e| BackendError::CaptureFailed(e.to_string()))?;
            // Compressed formats fill only part of the buffer
            let used = (meta.bytesused as usize).min(buf.len());
            let payload = if used == 0 { buf } else { &buf[..used] };
            latched.clear();
            latched.extend_from_slice(payload);
            Ok::<(), BackendError>(())
        })?;

        self.has_latched = true;
        Ok(())
    }

    fn retrieve(&mut self) -> BackendResult<RawFrame> {
        if !self.has_latched {
            return Err(BackendError::DecodeFailed(
                "no frame has been latched".to_string(),
            ));
        }
        self.has_latched = false;
        decode_frame(self.pixel_format, self.resolution, self.stride, &self.latched)
    }
}

impl Drop for V4l2Camera {
    fn drop(&mut self) {
        info!(device = %self.path, "Releasing V4L2 camera");
    }
}

/// Current frame rate from the device's frame interval
fn read_frame_rate(device: &Device) -> Option<f64> {
    let interval = device.params().ok()?.interval;
    if interval.numerator == 0 {
        return None;
    }
    Some(interval.denominator as f64 / interval.numerator as f64)
}

/// Turn one latched buffer into packed 24-bit pixels
fn decode_frame(
    format: PixelFormat,
    resolution: Resolution,
    stride: u32,
    data: &[u8],
) -> BackendResult<RawFrame> {
    match format {
        PixelFormat::Mjpeg => {
            let image = image::load_from_memory_with_format(data, ImageFormat::Jpeg)
                .map_err(|e| BackendError::DecodeFailed(e.to_string()))?
                .into_rgb8();
            let (width, height) = image.dimensions();
            Ok(RawFrame::new(width, height, ChannelOrder::Rgb, image.into_raw()))
        }
        PixelFormat::Yuyv => {
            let packed = strip_row_padding(data, resolution, 2, stride)?;
            let rgb = yuyv_to_rgb(&packed, resolution.width, resolution.height);
            Ok(RawFrame::new(
                resolution.width,
                resolution.height,
                ChannelOrder::Rgb,
                rgb,
            ))
        }
        PixelFormat::Bgr24 | PixelFormat::Rgb24 => {
            let packed = strip_row_padding(data, resolution, 3, stride)?;
            Ok(RawFrame::new(
                resolution.width,
                resolution.height,
                format.decoded_order(),
                packed.into_owned(),
            ))
        }
    }
}

/// Drop per-line driver padding so rows are exactly `width * bytes_per_pixel`
fn strip_row_padding(
    data: &[u8],
    resolution: Resolution,
    bytes_per_pixel: usize,
    stride: u32,
) -> BackendResult<Cow<'_, [u8]>> {
    let row = resolution.width as usize * bytes_per_pixel;
    let height = resolution.height as usize;
    if row == 0 || height == 0 {
        return Err(BackendError::DecodeFailed(format!(
            "empty frame geometry {}",
            resolution
        )));
    }

    let stride = (stride as usize).max(row);
    let needed = stride * (height - 1) + row;
    if data.len() < needed {
        return Err(BackendError::DecodeFailed(format!(
            "short frame: {} of {} bytes",
            data.len(),
            needed
        )));
    }

    if stride == row {
        return Ok(Cow::Borrowed(&data[..row * height]));
    }

    let mut packed = Vec::with_capacity(row * height);
    for line in data.chunks(stride).take(height) {
        packed.extend_from_slice(&line[..row]);
    }
    Ok(Cow::Owned(packed))
}

#[cfg(test)]
mod tests {
    use super::*;
    use image::{Rgb, RgbImage};
    use std::io::Cursor;

    #[test]
    fn test_padding_is_stripped_per_row() {
        // 2x2 BGR with 2 bytes of padding per line
        let data = [1, 2, 3, 4, 5, 6, 0, 0, 7, 8, 9, 10, 11, 12, 0, 0];
        let frame = decode_frame(PixelFormat::Bgr24, Resolution::new(2, 2), 8, &data).unwrap();
        assert_eq!(frame.order, ChannelOrder::Bgr);
        assert_eq!(frame.data, vec![1, 2, 3, 4, 5, 6, 7, 8, 9, 10, 11, 12]);
    }

    #[test]
    fn test_unpadded_frame_is_borrowed() {
        let data = [0u8; 12];
        let packed = strip_row_padding(&data, Resolution::new(2, 2), 3, 6).unwrap();
        assert!(matches!(packed, Cow::Borrowed(_)));
    }

    #[test]
    fn test_short_yuyv_frame_fails_to_decode() {
        let data = [16u8, 128, 16, 128];
        let err = decode_frame(PixelFormat::Yuyv, Resolution::new(4, 2), 0, &data).unwrap_err();
        assert!(matches!(err, BackendError::DecodeFailed(_)));
    }

    #[test]
    fn test_yuyv_decodes_to_rgb() {
        let data = [90u8, 128, 90, 128, 90, 128, 90, 128];
        let frame = decode_frame(PixelFormat::Yuyv, Resolution::new(2, 2), 4, &data).unwrap();
        assert!(frame.is_well_formed());
        assert_eq!(frame.order, ChannelOrder::Rgb);
        assert!(frame.data.iter().all(|&b| b == 90));
    }

    #[test]
    fn test_mjpeg_frame_decodes() {
        let mut jpeg = Vec::new();
        RgbImage::from_pixel(16, 8, Rgb([40, 120, 200]))
            .write_to(&mut Cursor::new(&mut jpeg), ImageFormat::Jpeg)
            .unwrap();

        // Resolution hint is ignored for MJPG; the stream carries its own size
        let frame = decode_frame(PixelFormat::Mjpeg, Resolution::new(1, 1), 0, &jpeg).unwrap();
        assert_eq!(frame.resolution(), Resolution::new(16, 8));
        assert!(frame.is_well_formed());
    }

    #[test]
    fn test_corrupt_mjpeg_fails_to_decode() {
        let err = decode_frame(
            PixelFormat::Mjpeg,
            Resolution::new(2, 2),
            0,
            &[0xFF, 0xD8, 0x00, 0x01],
        )
        .unwrap_err();
        assert!(matches!(err, BackendError::DecodeFailed(_)));
    }

    #[test]
    fn test_missing_device_is_not_found() {
        let err = V4l2Camera::open(4095, &[PixelFormat::Mjpeg]).err().unwrap();
        assert!(matches!(err, BackendError::DeviceNotFound(_)));
    }
}
