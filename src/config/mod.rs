pub mod error;
pub mod load;
pub mod paths;
pub mod save;
pub mod settings;

pub use error::ConfigError;
pub use load::load_settings_from;
pub use paths::{
    default_game_scan_roots, default_global_config_path, home_dir,
    DEFAULT_GAME_SCAN_DIRS, GLOBAL_SETTINGS_FILE_NAME, GLOBAL_STATE_DIR, SANDBOX_DIR_NAME,
};
pub use save::{save_settings, save_settings_to};
pub use settings::{
    ActivitySettings, BuildSettings, ClassifySettings, SandboxSettings, ScanSettings, Settings,
    ShellSettings, SourceRootRule,
};
