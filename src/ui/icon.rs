//! Status icon rendering
//!
//! Maps a [`CheckStatus`] to a colored dot and rasterises it for the tray.

use crate::check::state::CheckStatus;
use crate::ui::presenter::TrayError;

/// Icon size in pixels
pub const ICON_SIZE: u32 = 32;

/// Colored dot describing one status
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Glyph {
    pub rgb: (u8, u8, u8),
}

impl Glyph {
    pub const GREEN: Glyph = Glyph { rgb: (0x00, 0xC8, 0x00) };
    pub const ORANGE: Glyph = Glyph { rgb: (0xFF, 0xA5, 0x00) };
    pub const VIOLET: Glyph = Glyph { rgb: (0xDD, 0xA0, 0xDD) };
    pub const RED: Glyph = Glyph { rgb: (0xFF, 0x00, 0x00) };
    /// Fallback for anything without a status color
    pub const NEUTRAL: Glyph = Glyph { rgb: (0x1E, 0x90, 0xFF) };

    /// Glyph for the given status
    pub fn for_status(status: CheckStatus) -> Self {
        match status {
            CheckStatus::Ok => Self::GREEN,
            CheckStatus::Updating => Self::ORANGE,
            CheckStatus::Starting => Self::VIOLET,
            CheckStatus::Error => Self::RED,
        }
    }

    /// Rasterise a filled circle on a transparent `size`x`size` canvas
    pub fn rgba(&self, size: u32) -> Vec<u8> {
        let (r, g, b) = self.rgb;
        let mut rgba = vec![0u8; (size * size * 4) as usize];

        let center = size as f32 / 2.0;
        let radius = center - 1.0;

        for y in 0..size {
            for x in 0..size {
                let dx = x as f32 + 0.5 - center;
                let dy = y as f32 + 0.5 - center;
                let dist = (dx * dx + dy * dy).sqrt();

                // 1px soft edge
                let coverage = (radius - dist + 0.5).clamp(0.0, 1.0);
                if coverage > 0.0 {
                    let idx = ((y * size + x) * 4) as usize;
                    rgba[idx] = r;
                    rgba[idx + 1] = g;
                    rgba[idx + 2] = b;
                    rgba[idx + 3] = (coverage * 255.0) as u8;
                }
            }
        }

        rgba
    }

    /// Build the platform tray icon for this glyph
    pub fn to_icon(&self) -> Result<tray_icon::Icon, TrayError> {
        tray_icon::Icon::from_rgba(self.rgba(ICON_SIZE), ICON_SIZE, ICON_SIZE)
            .map_err(|e| TrayError::Icon(e.to_string()))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn pixel(rgba: &[u8], size: u32, x: u32, y: u32) -> [u8; 4] {
        let idx = ((y * size + x) * 4) as usize;
        [rgba[idx], rgba[idx + 1], rgba[idx + 2], rgba[idx + 3]]
    }

    #[test]
    fn test_status_colors() {
        assert_eq!(Glyph::for_status(CheckStatus::Ok).rgb, (0x00, 0xC8, 0x00));
        assert_eq!(Glyph::for_status(CheckStatus::Updating).rgb, (0xFF, 0xA5, 0x00));
        assert_eq!(Glyph::for_status(CheckStatus::Starting).rgb, (0xDD, 0xA0, 0xDD));
        assert_eq!(Glyph::for_status(CheckStatus::Error).rgb, (0xFF, 0x00, 0x00));
    }

    #[test]
    fn test_statuses_have_distinct_colors() {
        let statuses = [
            CheckStatus::Starting,
            CheckStatus::Updating,
            CheckStatus::Ok,
            CheckStatus::Error,
        ];
        for (i, a) in statuses.iter().enumerate() {
            for b in &statuses[i + 1..] {
                assert_ne!(Glyph::for_status(*a), Glyph::for_status(*b));
            }
            assert_ne!(Glyph::for_status(*a), Glyph::NEUTRAL);
        }
    }

    #[test]
    fn test_rgba_center_filled_corner_transparent() {
        let rgba = Glyph::RED.rgba(ICON_SIZE);
        assert_eq!(rgba.len(), (ICON_SIZE * ICON_SIZE * 4) as usize);
        assert_eq!(pixel(&rgba, ICON_SIZE, 16, 16), [0xFF, 0x00, 0x00, 255]);
        assert_eq!(pixel(&rgba, ICON_SIZE, 0, 0)[3], 0);
        assert_eq!(pixel(&rgba, ICON_SIZE, ICON_SIZE - 1, ICON_SIZE - 1)[3], 0);
    }

    #[test]
    fn test_every_status_renders() {
        for status in [
            CheckStatus::Starting,
            CheckStatus::Updating,
            CheckStatus::Ok,
            CheckStatus::Error,
        ] {
            assert!(Glyph::for_status(status).to_icon().is_ok());
        }
    }
}
