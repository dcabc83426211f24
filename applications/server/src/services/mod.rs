/// RPC service implementations
pub mod users;

pub use users::{UserService, DELETE_CONFIRMATION};
