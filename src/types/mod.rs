pub mod block;
pub mod response;
pub mod timestamp_zone;
pub mod traits;
