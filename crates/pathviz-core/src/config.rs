//! Configuration: grid size limits, weights and animation pacing.

use std::time::Duration;

use crate::error::InputError;
use crate::geom::Dims;

/// Smallest allowed number of rows or columns.
pub const MIN_DIM: i32 = 5;
/// Largest allowed number of rows or columns.
pub const MAX_DIM: i32 = 30;
/// Rows and columns of a freshly started session.
pub const DEFAULT_DIM: i32 = 10;
/// Pause after each visited cell, in milliseconds.
pub const DEFAULT_DELAY_MS: u64 = 50;
/// Traversal cost of ordinary terrain.
pub const BASE_WEIGHT: u32 = 1;
/// Traversal cost of weighted terrain.
pub const HEAVY_WEIGHT: u32 = 5;

/// Check that `dims` lies within `[MIN_DIM, MAX_DIM]` on both axes.
pub fn check_dims(dims: Dims) -> Result<(), InputError> {
    let ok = |v: i32| (MIN_DIM..=MAX_DIM).contains(&v);
    if ok(dims.rows) && ok(dims.cols) {
        Ok(())
    } else {
        Err(InputError::SizeOutOfBounds {
            rows: dims.rows,
            cols: dims.cols,
            min: MIN_DIM,
            max: MAX_DIM,
        })
    }
}

// ---------------------------------------------------------------------------
// Speed presets
// ---------------------------------------------------------------------------

/// Named animation speeds offered by front-ends.
#[derive(Copy, Clone, Debug, Default, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum Speed {
    Fast,
    #[default]
    Normal,
    Slow,
    VerySlow,
}

impl Speed {
    pub const ALL: [Speed; 4] = [Speed::Fast, Speed::Normal, Speed::Slow, Speed::VerySlow];

    /// Delay between visited cells for this preset.
    pub const fn delay_ms(self) -> u64 {
        match self {
            Self::Fast => 10,
            Self::Normal => DEFAULT_DELAY_MS,
            Self::Slow => 100,
            Self::VerySlow => 200,
        }
    }

    /// The next preset, wrapping from slowest back to fastest.
    pub fn next(self) -> Self {
        let i = Self::ALL.iter().position(|&s| s == self).unwrap_or(0);
        Self::ALL[(i + 1) % Self::ALL.len()]
    }

    pub const fn label(self) -> &'static str {
        match self {
            Self::Fast => "fast",
            Self::Normal => "normal",
            Self::Slow => "slow",
            Self::VerySlow => "very slow",
        }
    }
}

// ---------------------------------------------------------------------------
// VizConfig
// ---------------------------------------------------------------------------

/// Startup parameters consumed by a session.
#[derive(Copy, Clone, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct VizConfig {
    pub rows: i32,
    pub cols: i32,
    pub delay_ms: u64,
}

impl VizConfig {
    #[inline]
    pub fn dims(&self) -> Dims {
        Dims::new(self.rows, self.cols)
    }

    #[inline]
    pub fn delay(&self) -> Duration {
        Duration::from_millis(self.delay_ms)
    }

    /// Reject dimensions outside the allowed range.
    pub fn validate(&self) -> Result<(), InputError> {
        check_dims(Dims {
            rows: self.rows,
            cols: self.cols,
        })
    }
}

impl Default for VizConfig {
    fn default() -> Self {
        Self {
            rows: DEFAULT_DIM,
            cols: DEFAULT_DIM,
            delay_ms: DEFAULT_DELAY_MS,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn bounds_are_inclusive() {
        assert!(check_dims(Dims::new(5, 5)).is_ok());
        assert!(check_dims(Dims::new(30, 30)).is_ok());
        assert!(check_dims(Dims::new(5, 30)).is_ok());
        assert!(check_dims(Dims::new(4, 10)).is_err());
        assert!(check_dims(Dims::new(10, 31)).is_err());
    }

    #[test]
    fn default_config_is_valid() {
        let c = VizConfig::default();
        assert!(c.validate().is_ok());
        assert_eq!(c.dims(), Dims::new(10, 10));
        assert_eq!(c.delay(), Duration::from_millis(50));
    }

    #[test]
    fn speed_cycles() {
        let mut s = Speed::Fast;
        let mut seen = Vec::new();
        for _ in 0..4 {
            seen.push(s.delay_ms());
            s = s.next();
        }
        assert_eq!(s, Speed::Fast);
        assert_eq!(seen, vec![10, 50, 100, 200]);
        assert_eq!(Speed::default().delay_ms(), DEFAULT_DELAY_MS);
    }
}
