mod broadcast_result;
mod error_body;

pub use broadcast_result::*;
pub use error_body::*;
