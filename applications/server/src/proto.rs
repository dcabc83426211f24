//! Generated protobuf types and the `user.UserService` server and client

#![allow(clippy::all, clippy::pedantic)]

tonic::include_proto!("user");

/// Encoded descriptor set for the reflection service
pub const FILE_DESCRIPTOR_SET: &[u8] = tonic::include_file_descriptor_set!("user_descriptor");

impl TryFrom<user_core::User> for User {
    type Error = user_core::NegativeId;

    fn try_from(user: user_core::User) -> Result<Self, Self::Error> {
        Ok(Self {
            id: u64::try_from(user.id)?,
            created_at: user.created_at_rfc3339(),
            updated_at: user.updated_at_rfc3339(),
            name: user.name,
            email: user.email,
        })
    }
}
