use axum::extract::ws::{Message as WsMessage, WebSocket, WebSocketUpgrade};
use axum::extract::{Query, State};
use axum::response::Response;
use pitchsync_app::infrastructure::realtime::{ChangeEvent, ChangeTable};
use pitchsync_app::AppContext;
use pitchsync_errors::AppError;
use serde::Deserialize;
use tokio::sync::{broadcast, mpsc};
use uuid::Uuid;

#[derive(Deserialize)]
pub struct SubscribeQuery {
    pub token: String,
    #[serde(default)]
    pub tables: Option<String>,
}

/// Browsers cannot attach headers to a socket upgrade, so the access token
/// rides the query string instead.
pub async fn subscribe(
    State(context): State<AppContext>,
    Query(query): Query<SubscribeQuery>,
    ws: WebSocketUpgrade,
) -> Result<Response, AppError> {
    let user = context.identity.get_session(&query.token).await?;
    let tables = parse_tables(query.tables.as_deref());
    Ok(ws.on_upgrade(move |socket| stream_changes(socket, context, user.id, tables)))
}

fn parse_tables(raw: Option<&str>) -> Vec<ChangeTable> {
    let mut tables = Vec::new();
    for part in raw.unwrap_or("").split(',') {
        let table = match part.trim() {
            "pitches" => Some(ChangeTable::Pitches),
            "messages" => Some(ChangeTable::Messages),
            _ => None,
        };
        if let Some(table) = table {
            if !tables.contains(&table) {
                tables.push(table);
            }
        }
    }
    if tables.is_empty() {
        vec![ChangeTable::Pitches, ChangeTable::Messages]
    } else {
        tables
    }
}

async fn stream_changes(
    mut socket: WebSocket,
    context: AppContext,
    viewer_id: Uuid,
    tables: Vec<ChangeTable>,
) {
    let (tx, mut rx) = mpsc::channel::<ChangeEvent>(64);

    let mut forwarders = Vec::new();
    for table in tables {
        let mut changes = context.changes.subscribe(table);
        let tx = tx.clone();
        forwarders.push(tokio::spawn(async move {
            loop {
                match changes.recv().await {
                    Ok(event) => {
                        if tx.send(event).await.is_err() {
                            break;
                        }
                    }
                    Err(broadcast::error::RecvError::Lagged(skipped)) => {
                        // Skip ahead; clients refetch on the next event.
                        tracing::debug!("change subscriber lagged, skipped {} events", skipped);
                    }
                    Err(broadcast::error::RecvError::Closed) => break,
                }
            }
        }));
    }
    drop(tx);

    loop {
        tokio::select! {
            event = rx.recv() => {
                let Some(event) = event else { break };
                if !event_concerns(&event, viewer_id) {
                    continue;
                }
                let payload = match serde_json::to_string(&event) {
                    Ok(payload) => payload,
                    Err(err) => {
                        tracing::error!("failed to encode change event: {}", err);
                        continue;
                    }
                };
                if socket.send(WsMessage::Text(payload.into())).await.is_err() {
                    break;
                }
            }
            incoming = socket.recv() => {
                match incoming {
                    Some(Ok(WsMessage::Close(_))) | None => break,
                    Some(Ok(_)) => {}
                    Some(Err(_)) => break,
                }
            }
        }
    }

    for forwarder in forwarders {
        forwarder.abort();
    }
}

/// Pitch changes are visible to every subscriber; message changes only reach
/// the two parties.
fn event_concerns(event: &ChangeEvent, viewer_id: Uuid) -> bool {
    match event.table {
        ChangeTable::Pitches => true,
        ChangeTable::Messages => {
            event.sender_id == Some(viewer_id) || event.receiver_id == Some(viewer_id)
        }
    }
}
