mod error;
mod profile;

pub use profile::ProfileService;

pub use error::{LinkError, ServiceError};

pub type ServiceResult<T> = Result<T, ServiceError>;
