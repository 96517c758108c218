use crate::GridSize;
use crate::LayoutMode;
use crate::LayoutOptions;
use crate::PositionMap;
use crate::Rect;
use crate::SizeMap;
use crate::Viewport;
use crate::Widget;
use crate::center_widgets;
use crate::widget::SizeFallback;
use crate::widget::collect_widgets;

pub trait Arrangement {
    /// Compute corrected positions for every widget in `positions`.
    ///
    /// Implementations never add or remove ids and never touch their inputs.
    fn calculate(
        &self,
        positions: &PositionMap,
        sizes: &SizeMap,
        viewport: Viewport,
        grid_size: GridSize,
        layout_options: Option<LayoutOptions>,
    ) -> PositionMap;
}

impl Arrangement for LayoutMode {
    fn calculate(
        &self,
        positions: &PositionMap,
        sizes: &SizeMap,
        viewport: Viewport,
        grid_size: GridSize,
        layout_options: Option<LayoutOptions>,
    ) -> PositionMap {
        tracing::debug!(
            "arranging {} widgets in {} mode on a {}x{} viewport with a {} grid",
            positions.len(),
            self,
            viewport.width,
            viewport.height,
            grid_size
        );

        match self {
            Self::Freeform => {
                center_widgets(positions, sizes, viewport.width, grid_size, layout_options)
            }
            Self::Grid => resolve_overlaps(positions, sizes, viewport, grid_size, layout_options),
        }
    }
}

/// Lay out `positions` according to `mode`.
#[must_use]
pub fn apply_layout(
    mode: LayoutMode,
    positions: &PositionMap,
    sizes: &SizeMap,
    viewport: Viewport,
    grid_size: GridSize,
    layout_options: Option<LayoutOptions>,
) -> PositionMap {
    mode.calculate(positions, sizes, viewport, grid_size, layout_options)
}

/// Snap every widget to the grid and move colliding widgets to the first free cell below.
///
/// Widgets are placed in ascending `(y, x)` order (ties broken by id). A widget whose
/// snapped rectangle overlaps nothing placed so far stays where it is; otherwise the
/// viewport is scanned row by row from the widget's snapped `y` downwards, and left to
/// right within each row, for the first cell where it fits. When no such cell exists the
/// widget keeps its snapped position and may still overlap.
#[must_use]
pub fn resolve_overlaps(
    positions: &PositionMap,
    sizes: &SizeMap,
    viewport: Viewport,
    grid_size: GridSize,
    layout_options: Option<LayoutOptions>,
) -> PositionMap {
    let options = layout_options.unwrap_or_default();
    let mut widgets = collect_widgets(
        positions,
        sizes,
        &options.size_defaults,
        SizeFallback::Uniform,
    );
    widgets.sort_by_key(|widget| (widget.rect.top, widget.rect.left));

    let mut resolved = positions.clone();
    let mut placed: Vec<Widget> = Vec::with_capacity(widgets.len());

    for mut widget in widgets {
        let snapped = widget.rect.moved_to(
            grid_size.snap(widget.rect.left),
            grid_size.snap(widget.rect.top),
        );

        widget.rect = if overlaps_any(&snapped, &widget.id, &placed) {
            find_free_slot(&snapped, &widget.id, &placed, viewport, grid_size).unwrap_or_else(
                || {
                    tracing::warn!(
                        "no free cell for widget {} within {}x{}, keeping it at ({}, {})",
                        widget.id,
                        viewport.width,
                        viewport.height,
                        snapped.left,
                        snapped.top
                    );
                    snapped
                },
            )
        } else {
            snapped
        };

        resolved.insert(widget.id.clone(), widget.position());
        placed.push(widget);
    }

    resolved
}

fn overlaps_any(rect: &Rect, id: &str, placed: &[Widget]) -> bool {
    placed
        .iter()
        .any(|other| other.id != id && rect.overlaps(&other.rect))
}

/// First free cell for `rect`, scanning rows from `rect.top` down while the widget
/// still ends above the bottom of the viewport, and columns from the left edge.
fn find_free_slot(
    rect: &Rect,
    id: &str,
    placed: &[Widget],
    viewport: Viewport,
    grid_size: GridSize,
) -> Option<Rect> {
    let step = grid_size.step();

    for top in (rect.top..viewport.height.saturating_sub(rect.bottom)).step_by(step) {
        for left in (0..=viewport.width.saturating_sub(rect.right)).step_by(step) {
            let candidate = rect.moved_to(left, top);
            if !overlaps_any(&candidate, id, placed) {
                tracing::debug!(
                    "moving widget {} from ({}, {}) to ({}, {})",
                    id,
                    rect.left,
                    rect.top,
                    left,
                    top
                );

                return Some(candidate);
            }
        }
    }

    None
}

#[cfg(test)]
#[path = "arrangement_tests.rs"]
mod tests;
