/// `user.UserService` implementation
use crate::{
    error::{store_status, Operation},
    proto::{
        self, user_service_server, CreateUserRequest, CreateUserResponse, DeleteUserRequest,
        DeleteUserResponse, GetUserRequest, GetUserResponse, UpdateUserRequest,
        UpdateUserResponse,
    },
};
use std::sync::Arc;
use tonic::{Request, Response, Status};
use user_core::{NewUser, StoreError, User, UserChanges, UserId, UserStore};

/// Confirmation returned by every successful delete
pub const DELETE_CONFIRMATION: &str = "User deleted successfully";

/// Maps each RPC onto one store call
///
/// Stateless apart from the injected store, so tonic can run calls
/// concurrently against a shared instance.
#[derive(Clone)]
pub struct UserService {
    store: Arc<dyn UserStore>,
}

impl UserService {
    pub fn new(store: Arc<dyn UserStore>) -> Self {
        Self { store }
    }

    pub fn into_server(self) -> user_service_server::UserServiceServer<Self> {
        user_service_server::UserServiceServer::new(self)
    }
}

/// Resolve a caller id to a store key
///
/// Ids past the store's key range cannot name a row, so they are answered
/// as "not found" without a round trip.
fn store_id(id: u64, operation: Operation) -> Result<UserId, Status> {
    UserId::try_from(id).map_err(|e| {
        tracing::debug!(operation = operation.verb(), "{}", e);
        Status::not_found(operation.failure_message())
    })
}

/// Render a stored row for the caller
fn reply_user(user: User, operation: Operation) -> Result<proto::User, Status> {
    proto::User::try_from(user)
        .map_err(|e| store_status(operation, StoreError::Other(e.to_string())))
}

#[tonic::async_trait]
impl user_service_server::UserService for UserService {
    async fn create_user(
        &self,
        request: Request<CreateUserRequest>,
    ) -> Result<Response<CreateUserResponse>, Status> {
        let CreateUserRequest { name, email } = request.into_inner();

        let user = self
            .store
            .create_user(NewUser::new(name, email))
            .await
            .map_err(|e| store_status(Operation::Create, e))?;
        let reply = reply_user(user, Operation::Create)?;

        tracing::debug!(id = reply.id, "Created user");

        Ok(Response::new(CreateUserResponse {
            user: Some(reply),
        }))
    }

    async fn get_user(
        &self,
        request: Request<GetUserRequest>,
    ) -> Result<Response<GetUserResponse>, Status> {
        let id = store_id(request.into_inner().id, Operation::Get)?;

        let user = self
            .store
            .get_user(id)
            .await
            .map_err(|e| store_status(Operation::Get, e))?;
        let reply = reply_user(user, Operation::Get)?;

        Ok(Response::new(GetUserResponse {
            user: Some(reply),
        }))
    }

    async fn update_user(
        &self,
        request: Request<UpdateUserRequest>,
    ) -> Result<Response<UpdateUserResponse>, Status> {
        let UpdateUserRequest { id, name, email } = request.into_inner();
        let id = store_id(id, Operation::Update)?;

        let user = self
            .store
            .update_user(id, UserChanges::new(name, email))
            .await
            .map_err(|e| store_status(Operation::Update, e))?;
        let reply = reply_user(user, Operation::Update)?;

        Ok(Response::new(UpdateUserResponse {
            user: Some(reply),
        }))
    }

    async fn delete_user(
        &self,
        request: Request<DeleteUserRequest>,
    ) -> Result<Response<DeleteUserResponse>, Status> {
        let id = request.into_inner().id;

        // Deleting an id that matches nothing still succeeds
        if let Ok(key) = UserId::try_from(id) {
            let removed = self
                .store
                .delete_user(key)
                .await
                .map_err(|e| store_status(Operation::Delete, e))?;

            if removed == 0 {
                tracing::debug!(id, "Delete matched no rows");
            }
        } else {
            tracing::debug!(id, "Delete for id outside the store key range");
        }

        Ok(Response::new(DeleteUserResponse {
            message: DELETE_CONFIRMATION.to_string(),
        }))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::Utc;
    use tonic::Code;

    fn stored(id: i64) -> User {
        let now = Utc::now();
        User {
            id: UserId::new(id),
            name: "Alice".to_string(),
            email: "alice@example.com".to_string(),
            created_at: now,
            updated_at: now,
        }
    }

    #[test]
    fn test_reply_carries_stored_id() {
        let reply = reply_user(stored(9), Operation::Get).unwrap();
        assert_eq!(reply.id, 9);
        assert_eq!(reply.name, "Alice");
    }

    #[test]
    fn test_negative_stored_id_is_an_error_not_zero() {
        let status = reply_user(stored(-1), Operation::Get).unwrap_err();
        assert_eq!(status.code(), Code::Unknown);
        assert_eq!(status.message(), "Failed to get user");
    }

    #[test]
    fn test_out_of_range_caller_id_is_not_found() {
        let status = store_id(u64::MAX, Operation::Update).unwrap_err();
        assert_eq!(status.code(), Code::NotFound);
        assert_eq!(status.message(), "Failed to update user");
    }
}
