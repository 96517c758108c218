use serde::Deserialize;
use serde::Serialize;

use crate::Dimensions;
use crate::Position;
use crate::PositionMap;
use crate::Rect;
use crate::SizeDefaults;
use crate::SizeMap;
use crate::WidgetKind;

#[derive(Clone, Debug, Serialize, Deserialize, Eq, PartialEq)]
/// A widget as seen by a single layout pass
pub struct Widget {
    pub id: String,
    pub rect: Rect,
}

impl Widget {
    #[must_use]
    pub fn new(id: impl Into<String>, rect: Rect) -> Self {
        Self {
            id: id.into(),
            rect,
        }
    }

    #[must_use]
    pub fn kind(&self) -> WidgetKind {
        WidgetKind::from_id(&self.id)
    }

    #[must_use]
    pub const fn position(&self) -> Position {
        Position::new(self.rect.left, self.rect.top)
    }
}

/// How missing sizes are filled in when building the widget list
#[derive(Clone, Copy, Debug)]
pub enum SizeFallback {
    /// Use the default for the widget's kind
    PerKind,
    /// Use the generic default for every widget
    Uniform,
}

impl SizeFallback {
    fn resolve(self, defaults: &SizeDefaults, id: &str) -> Dimensions {
        match self {
            Self::PerKind => defaults.for_id(id),
            Self::Uniform => defaults.generic,
        }
    }
}

/// Combine positions and (possibly sparse) sizes into one widget per position entry
#[must_use]
pub fn collect_widgets(
    positions: &PositionMap,
    sizes: &SizeMap,
    defaults: &SizeDefaults,
    fallback: SizeFallback,
) -> Vec<Widget> {
    positions
        .iter()
        .map(|(id, position)| {
            let default = fallback.resolve(defaults, id);
            let dimensions = sizes.get(id).map_or(default, |size| size.or(default));

            Widget::new(
                id.clone(),
                Rect::new(position.x, position.y, dimensions.width, dimensions.height),
            )
        })
        .collect()
}
