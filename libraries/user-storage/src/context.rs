use crate::users;
use async_trait::async_trait;
use sqlx::PgPool;
use user_core::{NewUser, Result, User, UserChanges, UserId, UserStore};

/// User store backed by a PostgreSQL pool
#[derive(Debug, Clone)]
pub struct PgUserStore {
    pool: PgPool,
}

impl PgUserStore {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }

    pub fn pool(&self) -> &PgPool {
        &self.pool
    }

    /// Close the pool, waiting for checked-out connections to be returned
    pub async fn close(&self) {
        self.pool.close().await;
    }
}

#[async_trait]
impl UserStore for PgUserStore {
    async fn create_user(&self, user: NewUser) -> Result<User> {
        users::create(&self.pool, user).await
    }

    async fn get_user(&self, id: UserId) -> Result<User> {
        users::get_by_id(&self.pool, id).await
    }

    async fn update_user(&self, id: UserId, changes: UserChanges) -> Result<User> {
        users::update(&self.pool, id, changes).await
    }

    async fn delete_user(&self, id: UserId) -> Result<u64> {
        users::delete(&self.pool, id).await
    }
}
