use std::fs::File;
use std::io::BufReader;
use std::path::Path;

use clap::ValueEnum;
use color_eyre::Result;
use color_eyre::eyre::bail;
use flexdash_layouts::GridSize;
use flexdash_layouts::LayoutMode;
use flexdash_layouts::LayoutOptions;
use flexdash_layouts::Position;
use flexdash_layouts::PositionMap;
use flexdash_layouts::SHORTCUT_ID_PREFIX;
use flexdash_layouts::Size;
use flexdash_layouts::SizeDefaults;
use flexdash_layouts::SizeMap;
use flexdash_layouts::Viewport;
use flexdash_layouts::WidgetKind;
use percent_encoding::AsciiSet;
use percent_encoding::NON_ALPHANUMERIC;
use percent_encoding::utf8_percent_encode;
use serde::Deserialize;
use serde::Deserializer;
use serde::Serialize;
use strum::Display;
use strum::EnumString;

pub const PERSONAL_MESSAGE: &str = "personalMessage";
pub const SEARCH_BAR: &str = "searchBar";
pub const WEATHER: &str = "weather";

/// Narrowest viewport that still gets the centered search bar default
const NARROW_VIEWPORT_WIDTH: i32 = 768;

#[derive(
    Clone, Copy, Debug, Default, Serialize, Deserialize, Eq, PartialEq, Display, EnumString, ValueEnum,
)]
#[cfg_attr(feature = "schemars", derive(schemars::JsonSchema))]
#[strum(serialize_all = "snake_case")]
#[serde(rename_all = "snake_case")]
pub enum ShortcutSize {
    Small,
    #[default]
    Medium,
    Large,
}

#[derive(Clone, Copy, Debug, Default, Serialize, Deserialize, Eq, PartialEq, Display, EnumString)]
#[cfg_attr(feature = "schemars", derive(schemars::JsonSchema))]
#[strum(serialize_all = "snake_case")]
#[serde(rename_all = "snake_case")]
pub enum BackgroundType {
    #[default]
    Color,
    Image,
}

#[derive(
    Clone, Copy, Debug, Default, Serialize, Deserialize, Eq, PartialEq, Display, EnumString, ValueEnum,
)]
#[cfg_attr(feature = "schemars", derive(schemars::JsonSchema))]
#[strum(serialize_all = "lowercase")]
#[serde(rename_all = "lowercase")]
#[value(rename_all = "lower")]
pub enum SearchEngine {
    #[default]
    Google,
    DuckDuckGo,
    Startpage,
    Ecosia,
    Bing,
}

impl SearchEngine {
    #[must_use]
    pub const fn base_url(self) -> &'static str {
        match self {
            Self::Google => "https://www.google.com/search?q=",
            Self::DuckDuckGo => "https://duckduckgo.com/?q=",
            Self::Startpage => "https://www.startpage.com/sp/search?query=",
            Self::Ecosia => "https://www.ecosia.org/search?q=",
            Self::Bing => "https://www.bing.com/search?q=",
        }
    }

    /// Search URL for `query`, or `None` when the query is blank
    #[must_use]
    pub fn query_url(self, query: &str) -> Option<String> {
        if query.trim().is_empty() {
            return None;
        }

        Some(format!("{}{}", self.base_url(), utf8_percent_encode(query, COMPONENT)))
    }
}

/// Bytes left alone in a URI component
const COMPONENT: &AsciiSet = &NON_ALPHANUMERIC
    .remove(b'-')
    .remove(b'_')
    .remove(b'.')
    .remove(b'!')
    .remove(b'~')
    .remove(b'*')
    .remove(b'\'')
    .remove(b'(')
    .remove(b')');

#[derive(Clone, Debug, Serialize, Deserialize, Eq, PartialEq)]
#[cfg_attr(feature = "schemars", derive(schemars::JsonSchema))]
#[serde(rename_all = "camelCase")]
pub struct Shortcut {
    pub id: String,
    #[serde(default = "default_shortcut_name")]
    pub name: String,
    pub url: String,
    #[serde(default = "default_shortcut_icon")]
    pub icon: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub icon_url: Option<String>,
    #[serde(default)]
    pub size: ShortcutSize,
}

fn default_shortcut_name() -> String {
    String::from("Shortcut")
}

fn default_shortcut_icon() -> String {
    String::from("🔗")
}

fn default_background_color() -> String {
    String::from("#1a1a2e")
}

#[derive(Clone, Debug, Serialize, Deserialize, PartialEq)]
#[cfg_attr(feature = "schemars", derive(schemars::JsonSchema))]
#[serde(rename_all = "camelCase")]
/// The persisted dashboard configuration
pub struct Settings {
    #[serde(default)]
    pub shortcuts: Vec<Shortcut>,
    #[serde(default)]
    pub background_type: BackgroundType,
    #[serde(default = "default_background_color")]
    pub background_color: String,
    #[serde(default)]
    pub background_image: String,
    #[serde(default)]
    pub weather_enabled: bool,
    #[serde(default)]
    pub weather_location: String,
    #[serde(default)]
    pub personal_message: String,
    #[serde(default)]
    pub search_engine: SearchEngine,
    /// Arrangement mode (older files store this as a boolean `gridMode`)
    #[serde(
        default,
        alias = "gridMode",
        deserialize_with = "deserialize_layout_mode"
    )]
    pub layout_mode: LayoutMode,
    /// Pixel pitch of the grid (default: 32)
    #[serde(default)]
    pub grid_size: GridSize,
    /// Positions of the singleton widgets
    #[serde(default)]
    pub positions: PositionMap,
    #[serde(default)]
    pub sizes: SizeMap,
    #[serde(default)]
    pub shortcut_positions: PositionMap,
    #[serde(default)]
    pub shortcut_sizes: SizeMap,
    /// Override the sizes assumed for widgets that have never been resized
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub size_defaults: Option<SizeDefaults>,
}

#[derive(Deserialize)]
#[serde(untagged)]
enum LayoutModeOrFlag {
    Mode(LayoutMode),
    Flag(bool),
}

fn deserialize_layout_mode<'de, D>(deserializer: D) -> Result<LayoutMode, D::Error>
where
    D: Deserializer<'de>,
{
    Ok(match LayoutModeOrFlag::deserialize(deserializer)? {
        LayoutModeOrFlag::Mode(mode) => mode,
        LayoutModeOrFlag::Flag(grid_mode) => LayoutMode::from(grid_mode),
    })
}

/// Where the singleton widgets start out on a fresh dashboard
#[must_use]
pub fn default_positions(viewport: Viewport) -> PositionMap {
    let search_bar_x = if viewport.width > NARROW_VIEWPORT_WIDTH {
        viewport.width / 2 - 150
    } else {
        50
    };

    [
        (PERSONAL_MESSAGE, Position::new(50, 50)),
        (SEARCH_BAR, Position::new(search_bar_x, 200)),
        (WEATHER, Position::new(50, 300)),
    ]
    .into_iter()
    .collect()
}

impl Default for Settings {
    fn default() -> Self {
        Self::new(Viewport::default())
    }
}

impl Settings {
    #[must_use]
    pub fn new(viewport: Viewport) -> Self {
        Self {
            shortcuts: vec![],
            background_type: BackgroundType::default(),
            background_color: default_background_color(),
            background_image: String::new(),
            weather_enabled: false,
            weather_location: String::new(),
            personal_message: String::new(),
            search_engine: SearchEngine::default(),
            layout_mode: LayoutMode::default(),
            grid_size: GridSize::default(),
            positions: default_positions(viewport),
            sizes: SizeMap::new(),
            shortcut_positions: PositionMap::new(),
            shortcut_sizes: SizeMap::new(),
            size_defaults: None,
        }
    }

    pub fn read<P: AsRef<Path>>(path: P) -> Result<Self> {
        let path = path.as_ref();
        let settings: Self = match path.extension() {
            None => bail!("settings must be json or yaml files"),
            Some(extension) => {
                if extension == "yaml" || extension == "yml" {
                    serde_yaml::from_reader(BufReader::new(File::open(path)?))?
                } else if extension == "json" {
                    serde_json::from_reader(BufReader::new(File::open(path)?))?
                } else {
                    bail!("settings must be json or yaml files")
                }
            }
        };

        tracing::debug!("read settings from {}", path.display());

        Ok(settings)
    }

    pub fn write<P: AsRef<Path>>(&self, path: P) -> Result<()> {
        let path = path.as_ref();
        let content = match path.extension() {
            Some(extension) if extension == "yaml" || extension == "yml" => {
                serde_yaml::to_string(self)?
            }
            Some(extension) if extension == "json" => serde_json::to_string_pretty(self)?,
            _ => bail!("settings must be json or yaml files"),
        };

        if let Some(parent) = path.parent() {
            std::fs::create_dir_all(parent)?;
        }

        std::fs::write(path, content)?;
        tracing::info!("saved settings to {}", path.display());

        Ok(())
    }

    /// Read `path`, falling back to fresh settings for `viewport` when it does not exist
    pub fn load_or_default<P: AsRef<Path>>(path: P, viewport: Viewport) -> Result<Self> {
        let path = path.as_ref();
        if path.is_file() {
            Self::read(path)
        } else {
            tracing::info!(
                "no settings found at {}, starting from defaults",
                path.display()
            );

            Ok(Self::new(viewport))
        }
    }

    #[must_use]
    pub fn layout_options(&self) -> LayoutOptions {
        LayoutOptions {
            size_defaults: self.size_defaults.unwrap_or_default(),
            ..Default::default()
        }
    }

    /// Ids of every widget currently on the dashboard
    #[must_use]
    pub fn widget_ids(&self) -> Vec<String> {
        let mut ids = vec![];
        if !self.personal_message.is_empty() {
            ids.push(String::from(PERSONAL_MESSAGE));
        }

        ids.push(String::from(SEARCH_BAR));

        if self.weather_enabled {
            ids.push(String::from(WEATHER));
        }

        ids.extend(self.shortcuts.iter().map(|shortcut| shortcut.id.clone()));

        ids
    }

    #[must_use]
    pub fn has_widget(&self, id: &str) -> bool {
        self.widget_ids().iter().any(|widget| widget == id)
    }

    /// Positions and sizes of every widget currently on the dashboard.
    ///
    /// Shortcuts always carry a complete size (the shortcut default fills any missing
    /// dimension) so that ids from older files are not mistaken for generic widgets.
    #[must_use]
    pub fn widget_maps(&self) -> (PositionMap, SizeMap) {
        let mut positions = PositionMap::new();
        let mut sizes = SizeMap::new();
        let shortcut_default = self.layout_options().size_defaults.shortcut;

        for id in self.widget_ids() {
            let (stored_positions, stored_sizes) = self.maps_for(&id);
            let position = stored_positions.get(&id).copied().unwrap_or_default();
            let stored_size = stored_sizes.get(&id).copied();

            if self.is_shortcut(&id) {
                let size = stored_size.unwrap_or_default().or(shortcut_default);
                sizes.insert(id.clone(), Size::from(size));
            } else if let Some(size) = stored_size {
                sizes.insert(id.clone(), size);
            }

            positions.insert(id, position);
        }

        (positions, sizes)
    }

    #[must_use]
    pub fn is_shortcut(&self, id: &str) -> bool {
        self.shortcuts.iter().any(|shortcut| shortcut.id == id)
    }

    /// Write a layout result back, routing shortcuts and singletons to their own maps
    pub fn store_positions(&mut self, positions: &PositionMap) {
        for (id, position) in positions.iter() {
            self.maps_for_mut(id).0.insert(id.clone(), *position);
        }
    }

    pub fn store_size(&mut self, id: &str, width: i32, height: i32) {
        self.maps_for_mut(id)
            .1
            .insert(id.to_string(), Size::new(width, height));
    }

    fn maps_for(&self, id: &str) -> (&PositionMap, &SizeMap) {
        if WidgetKind::from_id(id).is_singleton() {
            (&self.positions, &self.sizes)
        } else {
            (&self.shortcut_positions, &self.shortcut_sizes)
        }
    }

    fn maps_for_mut(&mut self, id: &str) -> (&mut PositionMap, &mut SizeMap) {
        if WidgetKind::from_id(id).is_singleton() {
            (&mut self.positions, &mut self.sizes)
        } else {
            (&mut self.shortcut_positions, &mut self.shortcut_sizes)
        }
    }

    /// Append a shortcut with a fresh `shortcut-<n>` id and return that id
    pub fn add_shortcut(
        &mut self,
        url: &str,
        name: Option<String>,
        icon: Option<String>,
        size: ShortcutSize,
    ) -> Result<String> {
        if url.trim().is_empty() {
            bail!("a shortcut needs a url");
        }

        let id = self.next_shortcut_id();
        self.shortcuts.push(Shortcut {
            id: id.clone(),
            name: name.unwrap_or_else(default_shortcut_name),
            url: url.trim().to_string(),
            icon: icon.unwrap_or_else(default_shortcut_icon),
            icon_url: None,
            size,
        });

        Ok(id)
    }

    fn next_shortcut_id(&self) -> String {
        let next = self
            .shortcuts
            .iter()
            .filter_map(|shortcut| shortcut.id.strip_prefix(SHORTCUT_ID_PREFIX))
            .filter_map(|n| n.parse::<u64>().ok())
            .max()
            .map_or(1, |n| n + 1);

        format!("{SHORTCUT_ID_PREFIX}{next}")
    }

    /// Remove a shortcut along with its stored position and size
    pub fn remove_shortcut(&mut self, id: &str) -> Result<Shortcut> {
        let Some(idx) = self.shortcuts.iter().position(|shortcut| shortcut.id == id) else {
            bail!("there is no shortcut with id {id}");
        };

        self.shortcut_positions.remove(id);
        self.shortcut_sizes.remove(id);

        Ok(self.shortcuts.remove(idx))
    }
}
