pub mod error_code;
mod storage_error;
mod subtrack_error;

pub use error_code::SubtrackErrorCode;
pub use storage_error::{StorageError, StorageResult};
pub use subtrack_error::{SubtrackError, SubtrackResult};
