use anyhow::Result;
use image::RgbImage;

/// Anything that can hand out video frames one at a time
pub trait FrameSource {
    /// Block until the next frame is available
    fn next_frame(&mut self) -> Result<RgbImage>;

    /// Human-readable description for logs
    fn describe(&self) -> String;
}

#[cfg(feature = "camera")]
pub use camera::CameraSource;

#[cfg(feature = "camera")]
mod camera {
    use anyhow::{Context, Result};
    use image::RgbImage;
    use nokhwa::{
        Camera,
        pixel_format::RgbFormat,
        utils::{CameraIndex, RequestedFormat, RequestedFormatType},
    };
    use tracing::info;

    use super::FrameSource;

    /// Webcam opened through nokhwa
    pub struct CameraSource {
        index: u32,
        camera: Camera,
    }

    impl CameraSource {
        pub fn open(index: u32) -> Result<Self> {
            let requested_format =
                RequestedFormat::new::<RgbFormat>(RequestedFormatType::AbsoluteHighestFrameRate);
            let mut camera = Camera::new(CameraIndex::Index(index), requested_format)
                .with_context(|| format!("Could not open camera {}", index))?;
            camera
                .open_stream()
                .with_context(|| format!("Could not start stream on camera {}", index))?;

            info!(
                "camera {}: {}x{} {}fps",
                index,
                camera.resolution().width(),
                camera.resolution().height(),
                camera.frame_rate()
            );

            Ok(Self { index, camera })
        }

        pub fn resolution(&self) -> (u32, u32) {
            let res = self.camera.resolution();
            (res.width(), res.height())
        }
    }

    impl FrameSource for CameraSource {
        fn next_frame(&mut self) -> Result<RgbImage> {
            let frame = self.camera.frame().context("failed to get next frame")?;
            let decoded = frame
                .decode_image::<RgbFormat>()
                .context("failed to decode frame image")?;
            let (width, height) = (decoded.width(), decoded.height());

            RgbImage::from_raw(width, height, decoded.into_raw())
                .ok_or_else(|| anyhow::anyhow!("frame buffer does not match {}x{}", width, height))
        }

        fn describe(&self) -> String {
            format!("camera {} ({})", self.index, self.camera.info().human_name())
        }
    }
}
