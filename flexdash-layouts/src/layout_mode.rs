use clap::ValueEnum;
use serde::Deserialize;
use serde::Serialize;
use strum::Display;
use strum::EnumString;

use crate::GridSize;
use crate::SizeDefaults;

#[derive(
    Clone,
    Copy,
    Debug,
    Default,
    Serialize,
    Deserialize,
    Eq,
    PartialEq,
    Display,
    EnumString,
    ValueEnum,
)]
#[cfg_attr(feature = "schemars", derive(schemars::JsonSchema))]
#[strum(serialize_all = "snake_case")]
#[serde(rename_all = "snake_case")]
/// How widgets are arranged on the canvas
pub enum LayoutMode {
    /// Freeform Mode
    ///
    /// Widgets can be dragged anywhere; a widget alone in its row is centered horizontally.
    ///
    /// ```text
    /// +-----------------------+
    /// |      +---------+      |
    /// |      +---------+      |
    /// |  +----+     +----+    |
    /// |  +----+     +----+    |
    /// |        +-----+        |
    /// |        +-----+        |
    /// +-----------------------+
    /// ```
    #[default]
    Freeform,
    /// Grid Mode
    ///
    /// Widgets snap to the grid and are pushed into the next free cell when they collide.
    ///
    /// ```text
    /// +--+--+--+--+--+--+--+--+
    /// |########|  |#####|  |  |
    /// +--+--+--+--+--+--+--+--+
    /// |#####|  |  |  |  |  |  |
    /// +--+--+--+--+--+--+--+--+
    /// ```
    Grid,
}

impl LayoutMode {
    #[must_use]
    pub const fn toggle(self) -> Self {
        match self {
            Self::Freeform => Self::Grid,
            Self::Grid => Self::Freeform,
        }
    }

    #[must_use]
    pub const fn is_grid(self) -> bool {
        matches!(self, Self::Grid)
    }
}

impl From<bool> for LayoutMode {
    /// Older settings files store a `gridMode` flag
    fn from(grid_mode: bool) -> Self {
        if grid_mode { Self::Grid } else { Self::Freeform }
    }
}

#[derive(Clone, Copy, Debug, Default, Serialize, Deserialize, PartialEq, Eq)]
#[cfg_attr(feature = "schemars", derive(schemars::JsonSchema))]
#[serde(rename_all = "camelCase")]
/// Options shared by the layout passes
pub struct LayoutOptions {
    /// Default widget sizes used when no size has been recorded
    #[serde(default)]
    pub size_defaults: SizeDefaults,
    /// Vertical tolerance used to group widgets into rows when centering (default: the grid size)
    pub row_tolerance: Option<GridSize>,
}

impl LayoutOptions {
    #[must_use]
    pub fn row_tolerance_or(&self, grid_size: GridSize) -> GridSize {
        self.row_tolerance.unwrap_or(grid_size)
    }
}
