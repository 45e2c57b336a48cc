//! Data Transfer Objects for API requests and responses.
//!
//! DTOs are organized by concern:
//! - `envelope` - The `{success, message, data, error}` wrapper
//! - `user` - User request/response DTOs
//! - `pagination` - List query parameters and paged payload

mod envelope;
mod pagination;
mod user;

pub use envelope::{Envelope, UserAction};
pub use pagination::{PagedResponse, PaginationParams};
pub use user::{UserRequest, UserResponse};
