pub mod format;
pub mod progress;
pub mod size;

pub use format::{format_bytes, format_timestamp};
pub use progress::create_spinner;
pub use size::{bytes_to_kilobytes, bytes_to_megabytes, parse_size_string};
