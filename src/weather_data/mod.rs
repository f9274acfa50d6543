pub mod error;
pub mod frames;
pub mod normalizer;
pub mod transport;
