//! Configuration: directory layout and `settings.conf`.

mod paths;
mod settings;

pub use paths::{config_dir, lists_dir, logs_dir, set_config_dir_override};
pub use settings::{SETTINGS_SKELETON_CONTENT, Settings, load_settings, parse_settings};
