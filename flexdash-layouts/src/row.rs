use std::collections::BTreeMap;

use crate::GridSize;
use crate::Widget;

/// Group widgets into horizontal bands keyed by their y coordinate snapped to `tolerance`.
///
/// Widgets keep their input order within a band.
#[must_use]
pub fn group_by_row(widgets: &[Widget], tolerance: GridSize) -> BTreeMap<i32, Vec<Widget>> {
    let mut rows: BTreeMap<i32, Vec<Widget>> = BTreeMap::new();
    for widget in widgets {
        rows.entry(tolerance.snap(widget.rect.top))
            .or_default()
            .push(widget.clone());
    }

    rows
}
