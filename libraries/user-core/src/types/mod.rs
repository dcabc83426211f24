/// Domain types
mod ids;
mod user;

pub use ids::{IdOutOfRange, NegativeId, UserId};
pub use user::{NewUser, User, UserChanges};
