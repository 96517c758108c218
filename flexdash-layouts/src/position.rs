use std::collections::BTreeMap;
use std::ops::Deref;
use std::ops::DerefMut;

use serde::Deserialize;
use serde::Deserializer;
use serde::Serialize;

/// Largest distance from the origin a stored coordinate may have
pub const MAX_COORDINATE: i32 = 1_000_000;

#[derive(Clone, Copy, Debug, Default, Serialize, Deserialize, Eq, PartialEq, Hash)]
#[cfg_attr(feature = "schemars", derive(schemars::JsonSchema))]
/// Offset of a widget's top-left corner from the canvas origin
pub struct Position {
    #[serde(default, deserialize_with = "deserialize_coordinate")]
    #[cfg_attr(feature = "schemars", schemars(with = "i32"))]
    pub x: i32,
    #[serde(default, deserialize_with = "deserialize_coordinate")]
    #[cfg_attr(feature = "schemars", schemars(with = "i32"))]
    pub y: i32,
}

impl Position {
    #[must_use]
    pub const fn new(x: i32, y: i32) -> Self {
        Self { x, y }
    }

    /// Both coordinates limited to `±MAX_COORDINATE`
    #[must_use]
    pub const fn clamped(x: i32, y: i32) -> Self {
        Self {
            x: clamp_coordinate(x),
            y: clamp_coordinate(y),
        }
    }
}

const fn clamp_coordinate(value: i32) -> i32 {
    if value > MAX_COORDINATE {
        MAX_COORDINATE
    } else if value < -MAX_COORDINATE {
        -MAX_COORDINATE
    } else {
        value
    }
}

impl From<(i32, i32)> for Position {
    fn from((x, y): (i32, i32)) -> Self {
        Self { x, y }
    }
}

/// Numbers are rounded to whole pixels and limited to `±MAX_COORDINATE`, anything else reads as 0
#[allow(clippy::cast_possible_truncation)]
fn deserialize_coordinate<'de, D>(deserializer: D) -> Result<i32, D::Error>
where
    D: Deserializer<'de>,
{
    let value = serde_json::Value::deserialize(deserializer)?;
    Ok(value
        .as_f64()
        .filter(|v| v.is_finite())
        .map_or(0, |v| {
            v.round()
                .clamp(-f64::from(MAX_COORDINATE), f64::from(MAX_COORDINATE)) as i32
        }))
}

#[derive(Clone, Debug, Default, Serialize, Deserialize, PartialEq, Eq)]
#[cfg_attr(feature = "schemars", derive(schemars::JsonSchema))]
#[serde(transparent)]
/// Widget positions keyed by widget id
pub struct PositionMap(BTreeMap<String, Position>);

impl Deref for PositionMap {
    type Target = BTreeMap<String, Position>;

    fn deref(&self) -> &Self::Target {
        &self.0
    }
}

impl DerefMut for PositionMap {
    fn deref_mut(&mut self) -> &mut Self::Target {
        &mut self.0
    }
}

impl<K: Into<String>> FromIterator<(K, Position)> for PositionMap {
    fn from_iter<T: IntoIterator<Item = (K, Position)>>(iter: T) -> Self {
        Self(iter.into_iter().map(|(k, v)| (k.into(), v)).collect())
    }
}

impl IntoIterator for PositionMap {
    type Item = (String, Position);
    type IntoIter = std::collections::btree_map::IntoIter<String, Position>;

    fn into_iter(self) -> Self::IntoIter {
        self.0.into_iter()
    }
}

impl PositionMap {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Ids whose position differs between `self` and `other`, including ids present in only one
    #[must_use]
    pub fn changed_ids(&self, other: &Self) -> Vec<String> {
        let mut changed = vec![];
        for (id, position) in self.iter() {
            if other.get(id) != Some(position) {
                changed.push(id.clone());
            }
        }

        for id in other.keys() {
            if !self.contains_key(id) {
                changed.push(id.clone());
            }
        }

        changed
    }
}

#[derive(Clone, Copy, Debug, Serialize, Deserialize, Eq, PartialEq)]
#[cfg_attr(feature = "schemars", derive(schemars::JsonSchema))]
/// Size of the visible canvas in pixels
pub struct Viewport {
    pub width: i32,
    pub height: i32,
}

impl Default for Viewport {
    fn default() -> Self {
        Self {
            width: 1920,
            height: 1080,
        }
    }
}

impl Viewport {
    /// Dimensions below 1 are raised to 1
    #[must_use]
    pub fn new(width: i32, height: i32) -> Self {
        Self {
            width: width.max(1),
            height: height.max(1),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_lenient_coordinates() {
        let position: Position = serde_json::from_str(r#"{"x": 50, "y": 120.6}"#).unwrap();
        assert_eq!(position, Position::new(50, 121));

        let position: Position = serde_json::from_str(r#"{"x": "left", "y": null}"#).unwrap();
        assert_eq!(position, Position::new(0, 0));

        let position: Position = serde_json::from_str(r#"{"y": -40}"#).unwrap();
        assert_eq!(position, Position::new(0, -40));
    }

    #[test]
    fn test_far_away_coordinates_are_clamped() {
        let position: Position = serde_json::from_str(r#"{"x": 1e12, "y": -1e12}"#).unwrap();
        assert_eq!(position, Position::new(MAX_COORDINATE, -MAX_COORDINATE));

        assert_eq!(
            Position::clamped(i32::MAX, 12),
            Position::new(MAX_COORDINATE, 12)
        );
    }

    #[test]
    fn test_position_map_serializes_as_object() {
        let map: PositionMap = [
            ("searchBar", Position::new(384, 200)),
            ("weather", Position::new(50, 300)),
        ]
        .into_iter()
        .collect();

        let json = serde_json::to_string(&map).unwrap();
        assert_eq!(
            json,
            r#"{"searchBar":{"x":384,"y":200},"weather":{"x":50,"y":300}}"#
        );

        let back: PositionMap = serde_json::from_str(&json).unwrap();
        assert_eq!(back, map);
    }

    #[test]
    fn test_changed_ids() {
        let before: PositionMap = [
            ("a", Position::new(0, 0)),
            ("b", Position::new(32, 0)),
            ("c", Position::new(64, 0)),
        ]
        .into_iter()
        .collect();

        let mut after = before.clone();
        after.insert("b".to_string(), Position::new(32, 32));
        after.remove("c");
        after.insert("d".to_string(), Position::new(0, 96));

        assert_eq!(before.changed_ids(&after), vec!["b", "c", "d"]);
        assert!(before.changed_ids(&before).is_empty());
    }

    #[test]
    fn test_viewport_clamps() {
        assert_eq!(Viewport::new(0, -10), Viewport::new(1, 1));
        assert_eq!(Viewport::new(1200, 800).width, 1200);
    }
}
