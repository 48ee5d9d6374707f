mod di;
mod errors;
mod logger;
mod metrics;
mod params;

pub use self::di::DependenciesInject;
pub use self::errors::AppError;
pub use self::logger::init_logger;
pub use self::metrics::{Method, MethodLabels, Metrics, Status};
pub use self::params::{empty_string_as_none, finite_f64_or_none};
