pub mod catalog_repo;
pub mod receipt_repo;
pub mod report_repo;
pub mod user_repo;

// implementation modules
pub mod mem_repo;
pub mod sqlx_repo;
