//! Quality clamping and its mapping onto PNG compression effort.
//!
//! PNG is lossless, so the quality scalar never changes decoded pixels. It
//! only selects how hard the DEFLATE stage works.

/// Lowest accepted quality value.
pub const QUALITY_MIN: i32 = 0;
/// Highest accepted quality value.
pub const QUALITY_MAX: i32 = 100;

/// Clamp a caller-supplied quality into `QUALITY_MIN..=QUALITY_MAX`.
///
/// Out-of-range values are pulled to the nearest bound rather than rejected.
pub fn clamp_quality(quality: i32) -> i32 {
    let clamped = quality.clamp(QUALITY_MIN, QUALITY_MAX);
    if clamped != quality {
        log::warn!("quality {quality} out of range, clamped to {clamped}");
    }
    clamped
}

/// Compression effort selected from a quality value.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Effort {
    /// Quality 0-33.
    Fast,
    /// Quality 34-66.
    Default,
    /// Quality 67-100.
    Best,
}

impl Effort {
    /// Map an already-clamped quality onto an effort tier.
    pub fn from_quality(quality: i32) -> Self {
        match quality {
            i32::MIN..=33 => Effort::Fast,
            34..=66 => Effort::Default,
            _ => Effort::Best,
        }
    }

    /// Convert to the png crate's compression setting.
    pub fn to_png_compression(self) -> png::Compression {
        match self {
            Effort::Fast => png::Compression::Fast,
            Effort::Default => png::Compression::Default,
            Effort::Best => png::Compression::Best,
        }
    }
}
