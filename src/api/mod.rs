// src/api/mod.rs

// Re-export API endpoint modules
pub mod health;
pub mod history;

// AppState definition
use crate::config::Config;

#[derive(Clone)]
pub struct AppState {
    pub config: Config,
}
