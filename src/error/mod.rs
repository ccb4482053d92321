mod app_error;

pub use app_error::AppError;

/// Result alias shared by handlers, queries and services.
pub type Result<T, E = AppError> = std::result::Result<T, E>;
