//! Border handling for neighborhood operations
//!
//! Mirrors the boundary mode choices the filter forms offer. Resolution maps
//! an out-of-range coordinate back into the axis, or to nothing for
//! [`BorderMode::Constant`] where out-of-range samples read as zero.

use crate::error::OpsError;
use std::str::FromStr;

/// How samples beyond the stack boundary are produced
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum BorderMode {
    /// Reflect about the edge, repeating the edge sample: `d c b a | a b c d`
    #[default]
    Reflect,
    /// Out-of-range samples are zero
    Constant,
    /// Repeat the nearest edge sample: `a a a a | a b c d`
    Nearest,
    /// Reflect about the edge sample itself: `d c b | a b c d`
    Mirror,
    /// Wrap around to the opposite edge: `a b c d | a b c d`
    Wrap,
}

impl BorderMode {
    /// Mode names as the filter forms list them
    pub const CHOICES: &[&str] = &["reflect", "constant", "nearest", "mirror", "wrap"];

    /// Lowercase name
    pub fn as_str(&self) -> &'static str {
        match self {
            BorderMode::Reflect => "reflect",
            BorderMode::Constant => "constant",
            BorderMode::Nearest => "nearest",
            BorderMode::Mirror => "mirror",
            BorderMode::Wrap => "wrap",
        }
    }

    /// Map a possibly out-of-range position onto an axis of length `len`
    ///
    /// Returns `None` for [`BorderMode::Constant`] when the position is out
    /// of range; the caller substitutes zero.
    pub fn resolve(&self, pos: i64, len: usize) -> Option<usize> {
        let n = len as i64;
        if (0..n).contains(&pos) {
            return Some(pos as usize);
        }
        match self {
            BorderMode::Constant => None,
            BorderMode::Nearest => Some(pos.clamp(0, n - 1) as usize),
            BorderMode::Wrap => Some(pos.rem_euclid(n) as usize),
            BorderMode::Reflect => {
                // Period 2n triangle wave over ..aabccd..
                let period = 2 * n;
                let mut p = pos.rem_euclid(period);
                if p >= n {
                    p = period - 1 - p;
                }
                Some(p as usize)
            }
            BorderMode::Mirror => {
                if n == 1 {
                    return Some(0);
                }
                // Period 2n-2 triangle wave that skips the edge samples
                let period = 2 * (n - 1);
                let mut p = pos.rem_euclid(period);
                if p >= n {
                    p = period - p;
                }
                Some(p as usize)
            }
        }
    }
}

impl FromStr for BorderMode {
    type Err = OpsError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "reflect" => Ok(BorderMode::Reflect),
            "constant" => Ok(BorderMode::Constant),
            "nearest" => Ok(BorderMode::Nearest),
            "mirror" => Ok(BorderMode::Mirror),
            "wrap" => Ok(BorderMode::Wrap),
            other => Err(OpsError::UnknownMethod(other.to_string())),
        }
    }
}
