/// This format is used for space-efficient color representation (32 bits).
///
/// 0-255 gamma space `sRGBA` color with straight (not premultiplied) alpha.
#[repr(C)]
#[derive(Clone, Copy, Debug, Default, Eq, Hash, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Deserialize, serde::Serialize))]
pub struct Color32(pub(crate) [u8; 4]);

impl Color32 {
    // Mostly follows CSS names:

    pub const TRANSPARENT: Self = Self([0, 0, 0, 0]);
    pub const BLACK: Self = Self::from_rgb(0, 0, 0);
    pub const DARK_GRAY: Self = Self::from_rgb(96, 96, 96);
    pub const GRAY: Self = Self::from_rgb(160, 160, 160);
    pub const LIGHT_GRAY: Self = Self::from_rgb(220, 220, 220);
    pub const WHITE: Self = Self::from_rgb(255, 255, 255);

    pub const RED: Self = Self::from_rgb(255, 0, 0);
    pub const DARK_RED: Self = Self::from_rgb(0x8B, 0, 0);
    pub const GREEN: Self = Self::from_rgb(0, 255, 0);
    pub const DARK_GREEN: Self = Self::from_rgb(0, 0x64, 0);
    pub const BLUE: Self = Self::from_rgb(0, 0, 255);
    pub const DARK_BLUE: Self = Self::from_rgb(0, 0, 0x8B);
    pub const YELLOW: Self = Self::from_rgb(255, 255, 0);
    pub const ORANGE: Self = Self::from_rgb(255, 165, 0);
    pub const CYAN: Self = Self::from_rgb(0, 255, 255);
    pub const MAGENTA: Self = Self::from_rgb(255, 0, 255);

    #[inline(always)]
    pub const fn from_rgb(r: u8, g: u8, b: u8) -> Self {
        Self([r, g, b, 255])
    }

    #[inline(always)]
    pub const fn from_rgba_unmultiplied(r: u8, g: u8, b: u8, a: u8) -> Self {
        Self([r, g, b, a])
    }

    #[inline(always)]
    pub const fn r(&self) -> u8 {
        self.0[0]
    }

    #[inline(always)]
    pub const fn g(&self) -> u8 {
        self.0[1]
    }

    #[inline(always)]
    pub const fn b(&self) -> u8 {
        self.0[2]
    }

    #[inline(always)]
    pub const fn a(&self) -> u8 {
        self.0[3]
    }

    #[inline]
    pub const fn is_transparent(&self) -> bool {
        self.a() == 0
    }

    /// Returns an opaque version of self.
    #[inline]
    pub const fn to_opaque(self) -> Self {
        let Self([r, g, b, _]) = self;
        Self([r, g, b, 255])
    }

    /// Channel-wise linear interpolation towards `other`, `t` in `0..=1`.
    pub fn lerp_to(self, other: Self, t: f32) -> Self {
        let lerp_channel = |a: u8, b: u8| -> u8 {
            (a as f32 + t.clamp(0.0, 1.0) * (b as f32 - a as f32)).round() as u8
        };
        Self([
            lerp_channel(self.r(), other.r()),
            lerp_channel(self.g(), other.g()),
            lerp_channel(self.b(), other.b()),
            lerp_channel(self.a(), other.a()),
        ])
    }

    /// Multiply the alpha channel by `factor`, leaving the color channels alone.
    ///
    /// Used e.g. to fade out minor gridlines.
    #[inline]
    pub fn alpha_multiply(self, factor: f32) -> Self {
        let Self([r, g, b, a]) = self;
        Self([r, g, b, (a as f32 * factor.clamp(0.0, 1.0)).round() as u8])
    }
}

impl From<[u8; 4]> for Color32 {
    #[inline]
    fn from(rgba: [u8; 4]) -> Self {
        Self(rgba)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn lerp_endpoints() {
        assert_eq!(Color32::BLACK.lerp_to(Color32::WHITE, 0.0), Color32::BLACK);
        assert_eq!(Color32::BLACK.lerp_to(Color32::WHITE, 1.0), Color32::WHITE);
        assert_eq!(
            Color32::BLACK.lerp_to(Color32::WHITE, 0.5),
            Color32::from_rgb(128, 128, 128)
        );
    }

    #[test]
    fn alpha_multiply_leaves_rgb() {
        let faded = Color32::RED.alpha_multiply(0.5);
        assert_eq!((faded.r(), faded.g(), faded.b()), (255, 0, 0));
        assert_eq!(faded.a(), 128);
    }
}
