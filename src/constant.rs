// Window size constants
pub const DEFAULT_WINDOW_WIDTH: f32 = 920.0;
pub const DEFAULT_WINDOW_HEIGHT: f32 = 560.0;
pub const DEFAULT_WINDOW_TITLE: &str = "Cotejo";

/// Application name and metadata constants
pub const APP_QUALIFIER: &str = "cl";
pub const APP_ORGANIZATION: &str = "Cotejo";
pub const APP_NAME: &str = "Cotejo";

/// App related Magic Numbers
pub const MAX_RECENT_FILES: usize = 10;

/// Sentinel text meaning "no real content here, inserted only to realign rows".
pub const BLANK_MARKER: &str = "---EN BLANCO---";
