#[cfg(test)]
mod dashboard_tests {
    use std::path::PathBuf;
    use std::time::Duration;
    use std::time::Instant;

    use flexdash::Dashboard;
    use flexdash::SEARCH_BAR;
    use flexdash::Settings;
    use flexdash::ShortcutSize;
    use flexdash_layouts::LayoutMode;
    use flexdash_layouts::Position;
    use flexdash_layouts::Viewport;
    use uuid::Uuid;

    fn temp_settings(extension: &str) -> PathBuf {
        std::env::temp_dir()
            .join(format!("flexdash-test-{}", Uuid::new_v4()))
            .join(format!("settings.{extension}"))
    }

    fn cleanup(path: &PathBuf) {
        if let Some(parent) = path.parent() {
            let _ = std::fs::remove_dir_all(parent);
        }
    }

    #[test]
    fn test_missing_file_loads_defaults() {
        let path = temp_settings("json");
        let settings = Settings::load_or_default(&path, Viewport::new(1366, 768)).unwrap();

        assert_eq!(settings.positions[SEARCH_BAR], Position::new(533, 200));
        assert!(!path.exists());
    }

    #[test]
    fn test_json_and_yaml_round_trip_through_disk() {
        for extension in ["json", "yaml", "yml"] {
            let path = temp_settings(extension);

            let mut settings = Settings::default();
            settings.layout_mode = LayoutMode::Grid;
            settings
                .add_shortcut("https://example.com", None, None, ShortcutSize::Large)
                .unwrap();
            settings.write(&path).unwrap();

            let loaded = Settings::read(&path).unwrap();
            assert_eq!(loaded, settings, "{extension}");

            cleanup(&path);
        }
    }

    #[test]
    fn test_unknown_extension_is_rejected() {
        let path = temp_settings("toml");
        assert!(Settings::default().write(&path).is_err());
        assert!(Settings::read(&path).is_err());
    }

    #[test]
    fn test_older_settings_files_still_load() {
        let path = temp_settings("json");
        std::fs::create_dir_all(path.parent().unwrap()).unwrap();
        std::fs::write(
            &path,
            r#"{
                "shortcuts": [{ "id": "1700000000000", "url": "https://example.com" }],
                "gridMode": true,
                "positions": { "searchBar": { "x": 810.5, "y": 200 } },
                "shortcutPositions": { "1700000000000": { "x": 40, "y": 40 } }
            }"#,
        )
        .unwrap();

        let settings = Settings::read(&path).unwrap();
        assert_eq!(settings.layout_mode, LayoutMode::Grid);
        assert_eq!(settings.shortcuts[0].name, "Shortcut");
        assert_eq!(settings.positions[SEARCH_BAR], Position::new(811, 200));

        let mut dashboard = Dashboard::new(settings, Viewport::new(1920, 1080));
        assert!(dashboard.relayout(Instant::now()));
        let positions = dashboard.positions();
        assert_eq!(positions["1700000000000"], Position::new(32, 32));
        assert_eq!(positions[SEARCH_BAR], Position::new(800, 192));

        cleanup(&path);
    }

    #[test]
    fn test_dashboard_session_persists_layout() {
        let path = temp_settings("json");
        let viewport = Viewport::new(1280, 720);
        let mut dashboard =
            Dashboard::new(Settings::load_or_default(&path, viewport).unwrap(), viewport);

        let start = Instant::now();
        dashboard.toggle_layout_mode(start);
        let id = dashboard
            .add_shortcut(
                "https://example.com",
                Some(String::from("Example")),
                None,
                ShortcutSize::Small,
                start,
            )
            .unwrap();
        dashboard
            .drag_stop(&id, 700, 190, start + Duration::from_millis(100))
            .unwrap();

        assert!(!dashboard.take_pending_save(start + Duration::from_millis(350)));
        if dashboard.take_pending_save(start + Duration::from_millis(400)) {
            dashboard.settings().write(&path).unwrap();
        }

        let reloaded = Settings::read(&path).unwrap();
        assert_eq!(reloaded.layout_mode, LayoutMode::Grid);
        assert_eq!(reloaded.shortcuts.len(), 1);
        assert_eq!(reloaded.shortcut_positions, dashboard.settings().shortcut_positions);

        let reopened = Dashboard::new(reloaded, viewport);
        assert_eq!(reopened.positions(), dashboard.positions());

        cleanup(&path);
    }
}
