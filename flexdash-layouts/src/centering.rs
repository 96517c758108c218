use crate::GridSize;
use crate::LayoutOptions;
use crate::Position;
use crate::PositionMap;
use crate::SizeMap;
use crate::group_by_row;
use crate::widget::SizeFallback;
use crate::widget::collect_widgets;

/// Center every widget that is alone in its row horizontally within `viewport_width`.
///
/// Only x changes, and it is snapped to the grid; y is left exactly as given. Rows
/// holding two or more widgets are not touched.
#[must_use]
pub fn center_widgets(
    positions: &PositionMap,
    sizes: &SizeMap,
    viewport_width: i32,
    grid_size: GridSize,
    layout_options: Option<LayoutOptions>,
) -> PositionMap {
    let options = layout_options.unwrap_or_default();
    let widgets = collect_widgets(
        positions,
        sizes,
        &options.size_defaults,
        SizeFallback::PerKind,
    );

    let mut centered = positions.clone();
    for (row, occupants) in group_by_row(&widgets, options.row_tolerance_or(grid_size)) {
        match occupants.as_slice() {
            [widget] => {
                let free_space = f64::from(viewport_width) - f64::from(widget.rect.right);
                let x = grid_size.snap((free_space / 2.0).max(0.0));
                centered.insert(widget.id.clone(), Position::new(x, widget.rect.top));
            }
            // TODO: distribute multi-widget rows across the viewport
            _ => tracing::debug!(
                "row {} holds {} widgets, leaving them in place",
                row,
                occupants.len()
            ),
        }
    }

    centered
}
