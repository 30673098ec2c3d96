// src/settings/mod.rs
pub mod io;

pub use io::{load_bounded, load_flag, save, save_flag, FilePrefStore, PrefStore};

// Storage keys for the three persisted layout preferences.
pub const KEY_CHAT_PANEL_HEIGHT: &str = "chat_panel_height";
pub const KEY_CHAT_MINIMIZED: &str = "chat_minimized";
pub const KEY_SIDE_PANEL_WIDTH: &str = "side_panel_width";

pub const CHAT_PANEL_HEIGHT_MIN: i32 = 120;
pub const CHAT_PANEL_HEIGHT_MAX: i32 = 480;
pub const CHAT_PANEL_HEIGHT_DEFAULT: i32 = 220;

pub const SIDE_PANEL_WIDTH_MIN: i32 = 320;
pub const SIDE_PANEL_WIDTH_MAX: i32 = 680;
pub const SIDE_PANEL_WIDTH_DEFAULT: i32 = 420;

/// Bounded, persisted panel dimensions plus the chat minimized flag.
/// Each value is validated against its bound on load and falls back to the
/// default when absent or malformed.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PanelLayout {
    pub chat_panel_height: i32,
    pub chat_minimized: bool,
    pub side_panel_width: i32,
}

impl Default for PanelLayout {
    fn default() -> Self {
        PanelLayout {
            chat_panel_height: CHAT_PANEL_HEIGHT_DEFAULT,
            chat_minimized: false,
            side_panel_width: SIDE_PANEL_WIDTH_DEFAULT,
        }
    }
}

impl PanelLayout {
    pub fn load(store: &dyn PrefStore) -> Self {
        PanelLayout {
            chat_panel_height: load_bounded(
                store,
                KEY_CHAT_PANEL_HEIGHT,
                CHAT_PANEL_HEIGHT_MIN,
                CHAT_PANEL_HEIGHT_MAX,
                CHAT_PANEL_HEIGHT_DEFAULT,
            ),
            chat_minimized: load_flag(store, KEY_CHAT_MINIMIZED, false),
            side_panel_width: load_bounded(
                store,
                KEY_SIDE_PANEL_WIDTH,
                SIDE_PANEL_WIDTH_MIN,
                SIDE_PANEL_WIDTH_MAX,
                SIDE_PANEL_WIDTH_DEFAULT,
            ),
        }
    }

    pub fn clamp_chat_height(value: f32) -> f32 {
        value.clamp(CHAT_PANEL_HEIGHT_MIN as f32, CHAT_PANEL_HEIGHT_MAX as f32)
    }

    pub fn clamp_side_width(value: f32) -> f32 {
        value.clamp(SIDE_PANEL_WIDTH_MIN as f32, SIDE_PANEL_WIDTH_MAX as f32)
    }
}

#[cfg(test)]
mod tests {
    use super::io::tests::MemoryPrefStore;
    use super::*;

    #[test]
    fn layout_loads_defaults_from_empty_store() {
        let store = MemoryPrefStore::default();
        assert_eq!(PanelLayout::load(&store), PanelLayout::default());
    }

    #[test]
    fn layout_restores_valid_stored_values() {
        let store = MemoryPrefStore::default();
        save(&store, KEY_CHAT_PANEL_HEIGHT, 250);
        save_flag(&store, KEY_CHAT_MINIMIZED, true);
        save(&store, KEY_SIDE_PANEL_WIDTH, 500);

        let layout = PanelLayout::load(&store);
        assert_eq!(layout.chat_panel_height, 250);
        assert!(layout.chat_minimized);
        assert_eq!(layout.side_panel_width, 500);
    }

    #[test]
    fn out_of_bounds_dimensions_fall_back_per_key() {
        let store = MemoryPrefStore::default();
        save(&store, KEY_CHAT_PANEL_HEIGHT, 9999);
        save(&store, KEY_SIDE_PANEL_WIDTH, 500);

        let layout = PanelLayout::load(&store);
        assert_eq!(layout.chat_panel_height, CHAT_PANEL_HEIGHT_DEFAULT);
        assert_eq!(layout.side_panel_width, 500);
    }
}
