use anyhow::Result;
use image::RgbImage;

/// What a key press asks the tracking loop to do
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum KeyAction {
    Quit,
    SaveFrame,
    ClearTrail,
}

/// Somewhere annotated frames are shown and key presses come from
pub trait Preview {
    fn is_open(&self) -> bool;

    fn show(&mut self, frame: &RgbImage) -> Result<()>;

    fn set_status(&mut self, status: &str);

    /// Actions for keys pressed since the previous call
    fn actions(&mut self) -> Vec<KeyAction>;
}

/// Pack RGB pixels into the 0RGB u32 layout used by framebuffers
pub fn rgb_to_argb(frame: &RgbImage) -> Vec<u32> {
    frame
        .pixels()
        .map(|p| ((p[0] as u32) << 16) | ((p[1] as u32) << 8) | p[2] as u32)
        .collect()
}

#[cfg(feature = "camera")]
pub use window::PreviewWindow;

#[cfg(feature = "camera")]
mod window {
    use anyhow::Result;
    use image::RgbImage;
    use minifb::{Key, KeyRepeat, Window, WindowOptions};

    use super::{KeyAction, Preview, rgb_to_argb};

    pub const WINDOW_TITLE: &str = "Laser Pointer Detection";

    impl KeyAction {
        pub fn from_key(key: Key) -> Option<Self> {
            match key {
                Key::Q | Key::Escape => Some(KeyAction::Quit),
                Key::S => Some(KeyAction::SaveFrame),
                Key::C => Some(KeyAction::ClearTrail),
                _ => None,
            }
        }
    }

    /// Native window showing the annotated camera feed
    pub struct PreviewWindow {
        window: Window,
    }

    impl PreviewWindow {
        pub fn open(width: u32, height: u32) -> Result<Self> {
            let mut window = Window::new(
                WINDOW_TITLE,
                width as usize,
                height as usize,
                WindowOptions::default(),
            )
            .map_err(|e| anyhow::anyhow!("Failed to create window: {}", e))?;
            window.set_target_fps(60);

            Ok(Self { window })
        }
    }

    impl Preview for PreviewWindow {
        fn is_open(&self) -> bool {
            self.window.is_open()
        }

        fn show(&mut self, frame: &RgbImage) -> Result<()> {
            let buffer = rgb_to_argb(frame);
            self.window
                .update_with_buffer(&buffer, frame.width() as usize, frame.height() as usize)
                .map_err(|e| anyhow::anyhow!("Failed to update window: {}", e))
        }

        fn set_status(&mut self, status: &str) {
            self.window.set_title(&format!("{} - {}", WINDOW_TITLE, status));
        }

        fn actions(&mut self) -> Vec<KeyAction> {
            self.window
                .get_keys_pressed(KeyRepeat::No)
                .into_iter()
                .filter_map(KeyAction::from_key)
                .collect()
        }
    }
}
