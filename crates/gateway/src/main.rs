#[macro_use]
extern crate log;

pub mod config;
pub mod events;

mod database;
mod websocket;

use async_std::net::TcpListener;

#[async_std::main]
async fn main() {
    quill_config::configure!();
    database::connect().await;

    // Setup a TCP listener to accept WebSocket connections on.
    let bind = quill_config::config().await.gateway.host;
    info!("Listening on host {bind}");
    let try_socket = TcpListener::bind(&bind).await;
    let listener = try_socket.expect("Failed to bind");

    // Start accepting new connections and spawn a client for each connection.
    while let Ok((stream, addr)) = listener.accept().await {
        async_std::task::spawn(websocket::client(database::get_db(), stream, addr));
    }
}
