pub mod toml_loader;

pub use toml_loader::{list_toml_files, load_all_learning_sets, load_learning_set};
