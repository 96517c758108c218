use std::fmt::Display;
use std::fmt::Formatter;

use serde::Deserialize;
use serde::Deserializer;
use serde::Serialize;

use crate::LayoutError;

/// Default pixel pitch of the snapping grid
pub const DEFAULT_GRID_SIZE: i32 = 32;

#[derive(Clone, Copy, Debug, Serialize, Eq, PartialEq, Ord, PartialOrd, Hash)]
#[cfg_attr(feature = "schemars", derive(schemars::JsonSchema))]
#[serde(transparent)]
/// Pixel pitch of the snapping grid (always at least 1)
pub struct GridSize(i32);

impl Default for GridSize {
    fn default() -> Self {
        Self(DEFAULT_GRID_SIZE)
    }
}

impl Display for GridSize {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}px", self.0)
    }
}

impl GridSize {
    pub fn new(value: i32) -> Result<Self, LayoutError> {
        if value < 1 {
            return Err(LayoutError::InvalidConfiguration(format!(
                "grid size must be at least 1 pixel, got {value}"
            )));
        }

        Ok(Self(value))
    }

    /// Accepts any value, raising anything below 1 to 1.
    #[must_use]
    pub fn clamped(value: i32) -> Self {
        if value < 1 {
            tracing::warn!("clamping grid size {} to 1", value);
            Self(1)
        } else {
            Self(value)
        }
    }

    #[must_use]
    pub const fn get(self) -> i32 {
        self.0
    }

    /// Nearest multiple of the grid size to `value`, with halves rounding to the even cell.
    #[must_use]
    pub fn snap<V: Into<f64>>(self, value: V) -> i32 {
        snap_to_grid(value, self)
    }

    /// The grid size as an iterator step
    #[must_use]
    pub const fn step(self) -> usize {
        self.0.unsigned_abs() as usize
    }

    #[must_use]
    pub fn is_aligned(self, value: i32) -> bool {
        value.rem_euclid(self.0) == 0
    }
}

impl<'de> Deserialize<'de> for GridSize {
    #[allow(clippy::cast_possible_truncation)]
    fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
    where
        D: Deserializer<'de>,
    {
        let value = f64::deserialize(deserializer)?;
        Ok(Self::clamped(value.round() as i32))
    }
}

/// Nearest multiple of `grid_size` to `value`.
///
/// A value exactly halfway between two grid lines goes to the even cell, so
/// `400` on a 32px grid (12.5 cells) snaps to `384`.
#[must_use]
#[allow(clippy::cast_possible_truncation)]
pub fn snap_to_grid<V: Into<f64>>(value: V, grid_size: GridSize) -> i32 {
    let pitch = f64::from(grid_size.get());
    // stay on a grid line that still fits in an i32
    let max_cells = (f64::from(i32::MAX) / pitch).floor();
    let cells = (value.into() / pitch)
        .round_ties_even()
        .clamp(-max_cells, max_cells);
    (cells * pitch) as i32
}

#[cfg(test)]
mod tests {
    use super::*;

    fn grid(value: i32) -> GridSize {
        GridSize::new(value).unwrap()
    }

    #[test]
    fn test_default_grid_size() {
        assert_eq!(GridSize::default().get(), 32);
    }

    #[test]
    fn test_new_rejects_non_positive() {
        assert!(matches!(
            GridSize::new(0),
            Err(LayoutError::InvalidConfiguration(_))
        ));
        assert!(GridSize::new(-8).is_err());
        assert_eq!(grid(1).get(), 1);
    }

    #[test]
    fn test_clamped() {
        assert_eq!(GridSize::clamped(0).get(), 1);
        assert_eq!(GridSize::clamped(-32).get(), 1);
        assert_eq!(GridSize::clamped(16).get(), 16);
    }

    #[test]
    fn test_snap_to_nearest_multiple() {
        let g = grid(32);
        assert_eq!(snap_to_grid(0, g), 0);
        assert_eq!(snap_to_grid(15, g), 0);
        assert_eq!(snap_to_grid(17, g), 32);
        assert_eq!(snap_to_grid(50, g), 64);
        assert_eq!(snap_to_grid(500, g), 512);
        assert_eq!(g.snap(400.5), 416);
        assert_eq!(grid(10).snap(-6), -10);
    }

    #[test]
    fn test_snap_halfway_goes_to_even_cell() {
        let g = grid(32);
        assert_eq!(snap_to_grid(400, g), 384);
        assert_eq!(snap_to_grid(16, g), 0);
        assert_eq!(snap_to_grid(48, g), 64);
        assert_eq!(grid(10).snap(-5), 0);
        assert_eq!(grid(10).snap(-15), -20);
    }

    #[test]
    fn test_snap_near_the_i32_limits_stays_aligned() {
        let g = grid(32);
        let high = g.snap(i32::MAX - 5);
        assert!(g.is_aligned(high));
        assert_eq!(high, i32::MAX - 31);

        let low = g.snap(i32::MIN);
        assert!(g.is_aligned(low));
        assert_eq!(low, -(i32::MAX - 31));
    }

    #[test]
    fn test_snap_with_unit_grid_rounds() {
        let g = grid(1);
        assert_eq!(g.snap(7), 7);
        assert_eq!(g.snap(7.5), 8);
        assert_eq!(g.snap(-3), -3);
    }

    #[test]
    fn test_is_aligned() {
        let g = grid(32);
        assert!(g.is_aligned(0));
        assert!(g.is_aligned(-64));
        assert!(g.is_aligned(384));
        assert!(!g.is_aligned(50));
    }

    #[test]
    fn test_deserialize_clamps() {
        let g: GridSize = serde_json::from_str("0").unwrap();
        assert_eq!(g.get(), 1);
        let g: GridSize = serde_json::from_str("24").unwrap();
        assert_eq!(g.get(), 24);
        assert_eq!(serde_json::to_string(&g).unwrap(), "24");
    }
}
