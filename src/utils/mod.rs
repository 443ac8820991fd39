pub mod path;

pub use path::normalize_user_input_path;
