//! Request and response bodies.

pub mod request;
pub mod response;

pub use request::{AcquireLockRequest, ListSeatsQuery};
pub use response::{AcquireLockResponse, ConfirmLockResponse, HealthResponse, ReleaseLockResponse};
