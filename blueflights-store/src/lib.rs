pub mod app_config;
pub mod database;
pub mod history_repo;
pub mod recent_repo;

pub use database::DbClient;
pub use history_repo::PostgresSearchHistoryRepository;
pub use recent_repo::PostgresRecentSelectionsRepository;
