pub mod error;
pub mod swap;
pub mod types;
pub mod utils;


pub use error::ServiceError;
pub use swap::SwapService;
pub use types::*;

pub(crate) type ServiceResult<T> = std::result::Result<T, ServiceError>;
