// Window size constants
pub const DEFAULT_WINDOW_WIDTH: f32 = 560.0;
pub const DEFAULT_WINDOW_HEIGHT: f32 = 380.0;
pub const DEFAULT_WINDOW_TITLE: &str = "DLL Updater";

/// Settings sidecar, resolved against the working directory
pub const SETTINGS_FILE_NAME: &str = "config.json";

/// Matched case-insensitively against file names
pub const DLL_EXTENSION: &str = ".dll";
