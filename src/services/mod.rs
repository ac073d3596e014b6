pub mod analysis;
pub mod config;
pub mod core;
pub mod export;
pub mod extract;
pub mod fs_utils;
pub mod hashing;
pub mod history;
pub mod relations;
