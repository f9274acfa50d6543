pub mod hourly_range;
