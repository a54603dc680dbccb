pub mod environment;
pub mod logging;
pub mod paths;

pub use environment::{Settings, default_config_path, load_settings, resolve_rimworld_path, save_settings};
pub use logging::init_logging;
pub use paths::format_path_with_tilde;
