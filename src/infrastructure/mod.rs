pub mod asset_source;
pub mod config;
pub mod db;
pub mod storage;
