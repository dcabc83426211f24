//! Listener binding and the tonic serve loop

use crate::{
    config::ServerConfig,
    error::{Result, ServerError},
    lifecycle::{Lifecycle, Phase},
    proto::{self, user_service_server::UserServiceServer},
    services::UserService,
};
use std::{net::SocketAddr, sync::Arc};
use tokio::net::TcpListener;
use tokio_stream::wrappers::TcpListenerStream;
use tonic::transport::Server;
use tower_http::trace::TraceLayer;
use user_core::UserStore;
use user_storage::PgUserStore;

/// Bind the RPC listener
pub async fn bind(addr: SocketAddr) -> Result<TcpListener> {
    TcpListener::bind(addr)
        .await
        .map_err(|source| ServerError::Listen { addr, source })
}

fn reflection_builder() -> tonic_reflection::server::Builder<'static> {
    tonic_reflection::server::Builder::configure()
        .register_encoded_file_descriptor_set(proto::FILE_DESCRIPTOR_SET)
        .register_encoded_file_descriptor_set(tonic_health::pb::FILE_DESCRIPTOR_SET)
}

/// Serve `user.UserService` on `listener` until the lifecycle's shutdown
/// token is cancelled, then drain in-flight calls and return
///
/// Also registers the reflection service (v1 and v1alpha) and the standard
/// health service. Phases move to `Serving` on entry and `Draining` once
/// shutdown is requested.
pub async fn serve(
    listener: TcpListener,
    store: Arc<dyn UserStore>,
    lifecycle: &Lifecycle,
) -> Result<()> {
    let (mut health_reporter, health_service) = tonic_health::server::health_reporter();
    health_reporter
        .set_serving::<UserServiceServer<UserService>>()
        .await;

    let reflection_v1 = reflection_builder().build_v1()?;
    let reflection_v1alpha = reflection_builder().build_v1alpha()?;

    let shutdown = {
        let token = lifecycle.shutdown_token();
        let lifecycle = lifecycle.clone();
        async move {
            token.cancelled().await;
            lifecycle.enter(Phase::Draining);
            health_reporter
                .set_not_serving::<UserServiceServer<UserService>>()
                .await;
        }
    };

    if let Ok(addr) = listener.local_addr() {
        tracing::info!("gRPC server is running on {}", addr);
    }
    lifecycle.enter(Phase::Serving);

    Server::builder()
        .layer(TraceLayer::new_for_grpc())
        .add_service(health_service)
        .add_service(reflection_v1)
        .add_service(reflection_v1alpha)
        .add_service(UserService::new(store).into_server())
        .serve_with_incoming_shutdown(TcpListenerStream::new(listener), shutdown)
        .await?;

    tracing::info!("In-flight calls drained");

    Ok(())
}

/// Run the whole lifecycle against PostgreSQL
///
/// Connects the pool, binds the listener, serves until shutdown, then
/// releases the pool. Any failure before serving is fatal and returned.
pub async fn run(config: &ServerConfig, lifecycle: &Lifecycle) -> Result<()> {
    lifecycle.enter(Phase::Initializing);

    let pool = user_storage::create_pool(&config.storage.database_url)
        .await
        .map_err(ServerError::Connectivity)?;
    let store = Arc::new(PgUserStore::new(pool));
    tracing::info!("Database connected");

    let addr = config.server.socket_addr()?;
    let listener = bind(addr).await?;

    let served = serve(listener, Arc::clone(&store) as Arc<dyn UserStore>, lifecycle).await;

    store.close().await;
    tracing::info!("Database pool closed");
    lifecycle.enter(Phase::Stopped);

    served
}
