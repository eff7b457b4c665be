pub mod environment;
pub mod paths;
pub mod terminal;

pub use environment::{get_cache_root, get_config_root};
pub use paths::{
    format_path_with_tilde, relative_to_root, validate_file_size, validate_relative_path,
};
pub use terminal::sanitize_for_terminal;
