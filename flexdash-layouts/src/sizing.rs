use std::collections::BTreeMap;
use std::ops::Deref;
use std::ops::DerefMut;

use serde::Deserialize;
use serde::Deserializer;
use serde::Serialize;
use strum::Display;
use strum::EnumString;

use crate::MAX_COORDINATE;

/// Height used for every widget kind when none is recorded
pub const DEFAULT_WIDGET_HEIGHT: i32 = 100;

/// Prefix of generated shortcut widget ids
pub const SHORTCUT_ID_PREFIX: &str = "shortcut-";

#[derive(Clone, Copy, Debug, Serialize, Deserialize, Eq, PartialEq, Hash, Display, EnumString)]
#[cfg_attr(feature = "schemars", derive(schemars::JsonSchema))]
#[strum(serialize_all = "camelCase")]
#[serde(rename_all = "camelCase")]
/// The kind of a dashboard widget, derived from its id
pub enum WidgetKind {
    /// The personal greeting
    PersonalMessage,
    /// The search box
    SearchBar,
    /// The weather readout
    Weather,
    /// A user-defined link shortcut
    Shortcut,
    /// Anything else
    Generic,
}

impl WidgetKind {
    #[must_use]
    pub fn from_id(id: &str) -> Self {
        match id {
            "personalMessage" => Self::PersonalMessage,
            "searchBar" => Self::SearchBar,
            "weather" => Self::Weather,
            id if id.starts_with(SHORTCUT_ID_PREFIX) => Self::Shortcut,
            _ => Self::Generic,
        }
    }

    /// Whether at most one widget of this kind can exist on the canvas
    #[must_use]
    pub const fn is_singleton(self) -> bool {
        matches!(self, Self::PersonalMessage | Self::SearchBar | Self::Weather)
    }
}

#[derive(Clone, Copy, Debug, Default, Serialize, Deserialize, Eq, PartialEq)]
#[cfg_attr(feature = "schemars", derive(schemars::JsonSchema))]
/// A recorded widget size; either dimension may be missing
pub struct Size {
    /// Width in pixels
    #[serde(
        default,
        deserialize_with = "deserialize_dimension",
        skip_serializing_if = "Option::is_none"
    )]
    #[cfg_attr(feature = "schemars", schemars(with = "Option<i32>"))]
    pub width: Option<i32>,
    /// Height in pixels
    #[serde(
        default,
        deserialize_with = "deserialize_dimension",
        skip_serializing_if = "Option::is_none"
    )]
    #[cfg_attr(feature = "schemars", schemars(with = "Option<i32>"))]
    pub height: Option<i32>,
}

impl Size {
    #[must_use]
    pub const fn new(width: i32, height: i32) -> Self {
        Self {
            width: Some(width),
            height: Some(height),
        }
    }

    /// Fill in any missing dimension from `fallback`
    #[must_use]
    pub fn or(self, fallback: Dimensions) -> Dimensions {
        Dimensions {
            width: self.width.unwrap_or(fallback.width),
            height: self.height.unwrap_or(fallback.height),
        }
    }
}

/// Accepts any value; only positive numbers are kept, capped at `MAX_COORDINATE`
#[allow(clippy::cast_possible_truncation)]
fn deserialize_dimension<'de, D>(deserializer: D) -> Result<Option<i32>, D::Error>
where
    D: Deserializer<'de>,
{
    let value = serde_json::Value::deserialize(deserializer)?;
    Ok(value
        .as_f64()
        .filter(|v| v.is_finite() && *v >= 1.0)
        .map(|v| v.round().min(f64::from(MAX_COORDINATE)) as i32))
}

#[derive(Clone, Copy, Debug, Serialize, Deserialize, Eq, PartialEq)]
#[cfg_attr(feature = "schemars", derive(schemars::JsonSchema))]
/// A fully resolved widget size
pub struct Dimensions {
    pub width: i32,
    pub height: i32,
}

impl Dimensions {
    #[must_use]
    pub const fn new(width: i32, height: i32) -> Self {
        Self { width, height }
    }
}

impl From<Dimensions> for Size {
    fn from(value: Dimensions) -> Self {
        Self::new(value.width, value.height)
    }
}

#[derive(Clone, Debug, Default, Serialize, Deserialize, PartialEq, Eq)]
#[cfg_attr(feature = "schemars", derive(schemars::JsonSchema))]
#[serde(transparent)]
/// Recorded widget sizes keyed by widget id; absence means "use the default"
pub struct SizeMap(BTreeMap<String, Size>);

impl Deref for SizeMap {
    type Target = BTreeMap<String, Size>;

    fn deref(&self) -> &Self::Target {
        &self.0
    }
}

impl DerefMut for SizeMap {
    fn deref_mut(&mut self) -> &mut Self::Target {
        &mut self.0
    }
}

impl<K: Into<String>> FromIterator<(K, Size)> for SizeMap {
    fn from_iter<T: IntoIterator<Item = (K, Size)>>(iter: T) -> Self {
        Self(iter.into_iter().map(|(k, v)| (k.into(), v)).collect())
    }
}

impl SizeMap {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }
}

#[derive(Clone, Copy, Debug, Serialize, Deserialize, Eq, PartialEq)]
#[cfg_attr(feature = "schemars", derive(schemars::JsonSchema))]
#[serde(rename_all = "camelCase", default)]
/// Default widget sizes used when no size has been recorded for a widget
pub struct SizeDefaults {
    /// Personal message (default: 400x100)
    pub personal_message: Dimensions,
    /// Search bar (default: 400x100)
    pub search_bar: Dimensions,
    /// Weather (default: 250x100)
    pub weather: Dimensions,
    /// Shortcuts (default: 120x100)
    pub shortcut: Dimensions,
    /// Any other widget, and every widget during overlap resolution (default: 300x100)
    pub generic: Dimensions,
}

impl Default for SizeDefaults {
    fn default() -> Self {
        Self {
            personal_message: Dimensions::new(400, DEFAULT_WIDGET_HEIGHT),
            search_bar: Dimensions::new(400, DEFAULT_WIDGET_HEIGHT),
            weather: Dimensions::new(250, DEFAULT_WIDGET_HEIGHT),
            shortcut: Dimensions::new(120, DEFAULT_WIDGET_HEIGHT),
            generic: Dimensions::new(300, DEFAULT_WIDGET_HEIGHT),
        }
    }
}

impl SizeDefaults {
    #[must_use]
    pub const fn for_kind(&self, kind: WidgetKind) -> Dimensions {
        match kind {
            WidgetKind::PersonalMessage => self.personal_message,
            WidgetKind::SearchBar => self.search_bar,
            WidgetKind::Weather => self.weather,
            WidgetKind::Shortcut => self.shortcut,
            WidgetKind::Generic => self.generic,
        }
    }

    #[must_use]
    pub fn for_id(&self, id: &str) -> Dimensions {
        self.for_kind(WidgetKind::from_id(id))
    }
}
