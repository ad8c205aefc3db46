pub mod config;
pub mod error;
pub mod http_client;
pub mod match_fetch;
pub mod persist;
pub mod render;
pub mod reshape;
pub mod shot_map;
