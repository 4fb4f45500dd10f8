pub mod response;

pub use response::{parse_marker_blocks, parse_suggestions, strip_code_fence};
