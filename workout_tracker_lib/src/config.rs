/// Local storage key holding the serialized workout list.
pub const DEFAULT_STORAGE_KEY: &str = "workouts";

pub const DEFAULT_ZOOM_LEVEL: f64 = 13.;

pub const DEFAULT_TILE_URL: &str = "https://{s}.tile.openstreetmap.fr/hot/{z}/{x}/{y}.png";
pub const DEFAULT_ATTRIBUTION: &str =
    "&copy; <a href=\"https://www.openstreetmap.org/copyright\">OpenStreetMap</a> contributors";

#[derive(Debug, Clone, PartialEq)]
pub struct PopupConfig {
    pub max_width: f64,
    pub max_height: f64,
}

impl Default for PopupConfig {
    fn default() -> Self {
        Self {
            max_width: 250.,
            max_height: 100.,
        }
    }
}

/// Settings shared by the tracker and the browser front end.
#[derive(Debug, Clone, PartialEq)]
pub struct TrackerConfig {
    pub storage_key: String,
    pub zoom_level: f64,
    pub tile_url: String,
    pub attribution: String,
    pub popup: PopupConfig,
    /// Duration of the animated pan when recentering on a workout.
    pub pan_duration_secs: f64,
    /// How long the form stays `display: none` after hiding, so the
    /// slide-out transition is skipped.
    pub form_reset_delay_ms: u32,
}

impl Default for TrackerConfig {
    fn default() -> Self {
        Self {
            storage_key: DEFAULT_STORAGE_KEY.to_owned(),
            zoom_level: DEFAULT_ZOOM_LEVEL,
            tile_url: DEFAULT_TILE_URL.to_owned(),
            attribution: DEFAULT_ATTRIBUTION.to_owned(),
            popup: PopupConfig::default(),
            pan_duration_secs: 1.,
            form_reset_delay_ms: 1000,
        }
    }
}
