pub mod auth;
pub mod db;
pub mod notify;
pub mod realtime;
pub mod scoring;
pub mod storage;
