pub mod config;
pub mod crypto;
pub mod db;
pub mod fs_util;
pub mod layout;
pub mod logging;
pub mod secrets;
