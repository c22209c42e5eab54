use std::net::SocketAddr;

use async_std::{net::TcpStream, sync::Mutex};
use async_tungstenite::WebSocketStream;
use fred::clients::SubscriberClient;
use fred::interfaces::{ClientLike, EventInterface, PubsubInterface};
use futures::{
    channel::oneshot,
    pin_mut, select,
    stream::{SplitSink, SplitStream},
    FutureExt, SinkExt, StreamExt, TryStreamExt,
};
use quill_database::events::client::{ErrorEvent, EventV1, WebSocketError};
use quill_database::events::server::ClientMessage;
use quill_database::Database;
use quill_result::create_error;

use crate::config::{ProtocolConfiguration, WebsocketHandshakeCallback};
use crate::events::state::{State, SubscriptionStateChange};

type WsReader = SplitStream<WebSocketStream<TcpStream>>;
type WsWriter = SplitSink<WebSocketStream<TcpStream>, async_tungstenite::tungstenite::Message>;

/// Start a new WebSocket client worker given access to the database,
/// the relevant TCP stream and the remote address of the client.
pub async fn client(db: &'static Database, stream: TcpStream, addr: SocketAddr) {
    // Upgrade the TCP connection to a WebSocket connection.
    // In this process, we also parse any additional parameters given.
    // e.g. wss://example.com?format=json&version=1
    let (sender, receiver) = oneshot::channel();
    let Ok(ws) = async_tungstenite::accept_hdr_async_with_config(
        stream,
        WebsocketHandshakeCallback::from(sender),
        None,
    )
    .await
    else {
        return;
    };

    // Verify we've received a valid config, otherwise we should just drop the connection.
    let Ok(mut config) = receiver.await else {
        return;
    };

    info!(
        "User {addr:?} provided protocol configuration (version = {}, format = {:?})",
        config.get_protocol_version(),
        config.get_protocol_format()
    );

    // Split the socket for simultaneously read and write.
    let (mut write, mut read) = ws.split();

    // If the user has not provided authentication, request information.
    if config.get_session_token().is_none() {
        while let Ok(Some(message)) = read.try_next().await {
            if let Ok(ClientMessage::Authenticate { token }) = config.decode(&message) {
                config.set_session_token(token);
                break;
            }
        }
    }

    // Try to authenticate the user.
    let Some(token) = config.get_session_token().as_ref() else {
        return;
    };

    let user = match db.fetch_user_by_token(token).await {
        Ok(user) => user,
        Err(err) => {
            write.send(config.encode(&ErrorEvent::APIError(err))).await.ok();
            return;
        }
    };

    info!("User {addr:?} authenticated as @{}", user.username);

    // Create local session state.
    let state = Mutex::new(State::from(&user));

    // Notify socket we have authenticated.
    if write
        .send(config.encode(&EventV1::Authenticated))
        .await
        .is_err()
    {
        return;
    }

    // Create a pub/sub connection shared between both tasks.
    let Ok(subscriber) = fred::prelude::Builder::default_centralized().build_subscriber_client()
    else {
        return;
    };
    if subscriber.init().await.is_err() {
        return;
    }

    {
        let write = Mutex::new(write);
        // Forward pub/sub messages down the socket.
        let listener = listener(&subscriber, &config, &write).fuse();
        // Read from WebSocket stream.
        let worker = worker(&subscriber, &config, &state, read, &write).fuse();

        // Pin both tasks.
        pin_mut!(listener, worker);

        // Wait for either disconnect or for listener to die.
        select!(
            () = listener => {},
            () = worker => {}
        );
    }

    // Subscriptions die with the connection.
    subscriber.quit().await.ok();
    info!("User {addr:?} disconnected");
}

/// Forward events arriving on subscribed topics to the socket.
async fn listener(
    subscriber: &SubscriberClient,
    config: &ProtocolConfiguration,
    write: &Mutex<WsWriter>,
) {
    let mut message_rx = subscriber.message_rx();
    loop {
        let Ok(message) = message_rx.recv().await.map_err(|e| {
            info!("Error while consuming pub/sub messages: {e:?}");
        }) else {
            return;
        };

        let Some(event) = message
            .value
            .as_str()
            .and_then(|s| serde_json::from_str::<EventV1>(s.as_ref()).ok())
        else {
            warn!("Failed to deserialise an event for {}!", message.channel);
            return;
        };

        if write.lock().await.send(config.encode(&event)).await.is_err() {
            return;
        }
    }
}

/// Handle messages the client sends up the socket.
async fn worker(
    subscriber: &SubscriberClient,
    config: &ProtocolConfiguration,
    state: &Mutex<State>,
    mut read: WsReader,
    write: &Mutex<WsWriter>,
) {
    while let Ok(Some(msg)) = read.try_next().await {
        let Ok(payload) = config.decode(&msg) else {
            continue;
        };

        match payload {
            ClientMessage::Authenticate { .. } => {
                write
                    .lock()
                    .await
                    .send(config.encode(&ErrorEvent::Error(
                        WebSocketError::AlreadyAuthenticated,
                    )))
                    .await
                    .ok();
            }
            ClientMessage::JoinAdmin => {
                {
                    let mut state = state.lock().await;
                    if !state.privileged {
                        write
                            .lock()
                            .await
                            .send(config.encode(&ErrorEvent::APIError(create_error!(
                                NotPrivileged
                            ))))
                            .await
                            .ok();
                        continue;
                    }

                    state.join_admin();
                }

                apply_subscriptions(subscriber, state).await;
            }
            ClientMessage::JoinUser { user_id } => {
                {
                    let mut state = state.lock().await;
                    // A session may only join its own audience
                    if user_id != state.user_id {
                        write
                            .lock()
                            .await
                            .send(config.encode(&ErrorEvent::APIError(create_error!(
                                NotPrivileged
                            ))))
                            .await
                            .ok();
                        continue;
                    }

                    state.join_user();
                }

                apply_subscriptions(subscriber, state).await;
            }
            ClientMessage::Ping { data, responded } => {
                if responded.is_none() {
                    write
                        .lock()
                        .await
                        .send(config.encode(&EventV1::Pong { data }))
                        .await
                        .ok();
                }
            }
        }
    }
}

/// Push queued subscription changes to the pub/sub connection.
async fn apply_subscriptions(subscriber: &SubscriberClient, state: &Mutex<State>) {
    let mut state = state.lock().await;
    match state.apply_state() {
        SubscriptionStateChange::None => {}
        SubscriptionStateChange::Change { add, remove } => {
            for topic in remove {
                subscriber.unsubscribe(topic).await.unwrap();
            }

            for topic in add {
                subscriber.subscribe(topic).await.unwrap();
            }
        }
        SubscriptionStateChange::Reset => {
            subscriber.unsubscribe_all().await.unwrap();
            for topic in state.iter_subscriptions() {
                subscriber.subscribe(topic.as_str()).await.unwrap();
            }
        }
    }
}
