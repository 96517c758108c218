use std::time::Instant;

use color_eyre::Result;
use color_eyre::eyre::bail;
use flexdash_layouts::Arrangement;
use flexdash_layouts::Dimensions;
use flexdash_layouts::GridSize;
use flexdash_layouts::LayoutMode;
use flexdash_layouts::Position;
use flexdash_layouts::PositionMap;
use flexdash_layouts::Viewport;
use flexdash_layouts::WidgetKind;

use crate::debounce::Debouncer;
use crate::debounce::RESIZE_DEBOUNCE;
use crate::debounce::SAVE_DEBOUNCE;
use crate::settings::Settings;
use crate::settings::ShortcutSize;

/// Smallest size a widget of `kind` can be resized to
#[must_use]
pub const fn minimum_size(kind: WidgetKind) -> Dimensions {
    match kind {
        WidgetKind::PersonalMessage => Dimensions::new(100, 50),
        WidgetKind::SearchBar => Dimensions::new(200, 40),
        WidgetKind::Weather => Dimensions::new(150, 100),
        WidgetKind::Shortcut | WidgetKind::Generic => Dimensions::new(50, 50),
    }
}

/// The dashboard state plus the event handlers that keep its layout valid
#[derive(Debug)]
pub struct Dashboard {
    settings: Settings,
    viewport: Viewport,
    resize_debounce: Debouncer,
    save_debounce: Debouncer,
}

impl Dashboard {
    #[must_use]
    pub const fn new(settings: Settings, viewport: Viewport) -> Self {
        Self {
            settings,
            viewport,
            resize_debounce: Debouncer::new(RESIZE_DEBOUNCE),
            save_debounce: Debouncer::new(SAVE_DEBOUNCE),
        }
    }

    #[must_use]
    pub const fn settings(&self) -> &Settings {
        &self.settings
    }

    #[must_use]
    pub const fn viewport(&self) -> Viewport {
        self.viewport
    }

    #[must_use]
    pub const fn layout_mode(&self) -> LayoutMode {
        self.settings.layout_mode
    }

    /// Current positions of every widget on the dashboard
    #[must_use]
    pub fn positions(&self) -> PositionMap {
        self.settings.widget_maps().0
    }

    /// Run the active arrangement over every widget and store the result.
    ///
    /// Returns whether any position changed.
    pub fn relayout(&mut self, now: Instant) -> bool {
        let (positions, sizes) = self.settings.widget_maps();
        let arranged = self.settings.layout_mode.calculate(
            &positions,
            &sizes,
            self.viewport,
            self.settings.grid_size,
            Some(self.settings.layout_options()),
        );

        let changed = positions.changed_ids(&arranged);
        if changed.is_empty() {
            tracing::debug!("layout unchanged");
            return false;
        }

        tracing::debug!("layout moved {}", changed.join(", "));
        self.settings.store_positions(&arranged);
        self.mark_dirty(now);

        true
    }

    fn ensure_widget(&self, id: &str) -> Result<()> {
        if !self.settings.has_widget(id) {
            bail!("there is no widget with id {id}");
        }

        Ok(())
    }

    fn mark_dirty(&mut self, now: Instant) {
        self.save_debounce.schedule(now);
    }

    /// A widget was dropped at `(x, y)`, limited to `±MAX_COORDINATE`
    pub fn drag_stop(&mut self, id: &str, x: i32, y: i32, now: Instant) -> Result<bool> {
        self.ensure_widget(id)?;

        let mut dropped = PositionMap::new();
        dropped.insert(id.to_string(), Position::clamped(x, y));
        self.settings.store_positions(&dropped);
        self.mark_dirty(now);

        tracing::info!("moved {} to ({}, {})", id, x, y);

        Ok(self.relayout(now))
    }

    /// A widget was resized to `width` x `height`.
    ///
    /// In grid mode both dimensions snap to the grid and never drop below one cell.
    pub fn resize_stop(
        &mut self,
        id: &str,
        width: i32,
        height: i32,
        now: Instant,
    ) -> Result<bool> {
        self.ensure_widget(id)?;

        let minimum = minimum_size(WidgetKind::from_id(id));
        let grid_size = self.settings.grid_size;
        let (width, height) = if self.settings.layout_mode.is_grid() {
            (
                grid_size.snap(width).max(grid_size.get()),
                grid_size.snap(height).max(grid_size.get()),
            )
        } else {
            (width, height)
        };

        let width = width.max(minimum.width);
        let height = height.max(minimum.height);

        self.settings.store_size(id, width, height);
        self.mark_dirty(now);

        tracing::info!("resized {} to {}x{}", id, width, height);

        Ok(self.relayout(now))
    }

    /// Record a new viewport; the relayout happens once resizing has settled
    pub fn viewport_resized(&mut self, viewport: Viewport, now: Instant) {
        self.viewport = viewport;
        self.resize_debounce.schedule(now);
    }

    /// Fire any debounced work that is due. Returns whether positions changed.
    pub fn tick(&mut self, now: Instant) -> bool {
        if self.resize_debounce.fire(now) {
            tracing::debug!(
                "viewport settled at {}x{}",
                self.viewport.width,
                self.viewport.height
            );

            return self.relayout(now);
        }

        false
    }

    /// Whether settings changed and the save window has passed; clears the pending save
    pub fn take_pending_save(&mut self, now: Instant) -> bool {
        self.save_debounce.fire(now)
    }

    #[must_use]
    pub const fn has_pending_save(&self) -> bool {
        self.save_debounce.is_pending()
    }

    pub fn toggle_layout_mode(&mut self, now: Instant) -> bool {
        let mode = self.settings.layout_mode.toggle();
        self.set_layout_mode(mode, now)
    }

    pub fn set_layout_mode(&mut self, mode: LayoutMode, now: Instant) -> bool {
        tracing::info!("switching layout mode to {}", mode);

        self.settings.layout_mode = mode;
        self.mark_dirty(now);
        self.relayout(now)
    }

    pub fn set_grid_size(&mut self, grid_size: GridSize, now: Instant) -> bool {
        tracing::info!("setting grid size to {}", grid_size);

        self.settings.grid_size = grid_size;
        self.mark_dirty(now);
        self.relayout(now)
    }

    pub fn set_weather_enabled(
        &mut self,
        enabled: bool,
        location: Option<String>,
        now: Instant,
    ) -> bool {
        self.settings.weather_enabled = enabled;
        if let Some(location) = location {
            self.settings.weather_location = location;
        }

        self.mark_dirty(now);
        self.relayout(now)
    }

    /// An empty message removes the personal message widget
    pub fn set_personal_message(&mut self, message: &str, now: Instant) -> bool {
        self.settings.personal_message = message.trim().to_string();
        self.mark_dirty(now);
        self.relayout(now)
    }

    /// Add a shortcut and lay it out; returns its id
    pub fn add_shortcut(
        &mut self,
        url: &str,
        name: Option<String>,
        icon: Option<String>,
        size: ShortcutSize,
        now: Instant,
    ) -> Result<String> {
        let id = self.settings.add_shortcut(url, name, icon, size)?;
        tracing::info!("added shortcut {} for {}", id, url);

        self.mark_dirty(now);
        self.relayout(now);

        Ok(id)
    }

    pub fn remove_shortcut(&mut self, id: &str, now: Instant) -> Result<bool> {
        let removed = self.settings.remove_shortcut(id)?;
        tracing::info!("removed shortcut {} for {}", removed.id, removed.url);

        self.mark_dirty(now);

        Ok(self.relayout(now))
    }
}
