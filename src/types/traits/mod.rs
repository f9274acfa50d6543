pub mod request_time;
