// All service modules
pub mod history;
pub mod token_registry;

// Re-export for convenience
pub use history::HistoryService;
