pub mod crypto;
pub mod db;
pub mod handlers;
pub mod models;
pub mod token;
