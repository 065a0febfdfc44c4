//! Per-connection stream loop: drives one client's telemetry session.
//!
//! Each iteration applies any command that arrived since the previous
//! tick, advances the simulation once, and pushes the snapshot. The
//! receive arm shares the timeline with a fixed 100 ms ticker, so a
//! silent client never stalls the telemetry cadence.

use std::time::Instant;

use axum::extract::ws::{Message, WebSocket};
use futures::{Sink, SinkExt, Stream, StreamExt};
use tokio::time::{interval, MissedTickBehavior};

use skylink_core::commands::ControlCommand;
use skylink_core::constants::TICK_PERIOD;
use skylink_core::enums::DroneStatus;
use skylink_sim::DroneSimulation;

/// Why a connection's stream loop terminated.
///
/// Every variant is connection-scoped: the loop ends, resources drop,
/// and nothing escalates to process level.
#[derive(Debug, thiserror::Error)]
pub enum StreamEnd {
    /// The peer closed the connection.
    #[error("peer disconnected")]
    Disconnected,
    /// The transport failed while receiving.
    #[error("receive failed: {0}")]
    ReceiveFailed(String),
    /// An inbound frame did not decode as a command.
    #[error("malformed command: {0}")]
    Malformed(String),
    /// The transport failed while sending a snapshot.
    #[error("send failed")]
    SendFailed,
}

/// Drive a WebSocket connection until it terminates.
pub async fn run(socket: WebSocket, sim: DroneSimulation) {
    let (sink, stream) = socket.split();
    match run_loop(stream, sink, sim).await {
        StreamEnd::Disconnected => tracing::info!("client disconnected"),
        reason => tracing::warn!(%reason, "stream closed"),
    }
}

/// Transport-agnostic loop body, generic over the message stream and
/// sink so tests can drive it with in-memory channels.
pub(crate) async fn run_loop<St, Si, E>(mut stream: St, mut sink: Si, mut sim: DroneSimulation) -> StreamEnd
where
    St: Stream<Item = Result<Message, E>> + Unpin,
    Si: Sink<Message> + Unpin,
    E: std::fmt::Display,
{
    let mut ticker = interval(TICK_PERIOD);
    // Fall back to a full period when behind instead of catch-up bursts;
    // the 1s physics clamp bounds the resulting drift.
    ticker.set_missed_tick_behavior(MissedTickBehavior::Delay);
    let mut last_status = sim.status();

    loop {
        tokio::select! {
            // Inbound commands are applied before the tick that follows
            // them, so a launch is visible in the very next snapshot.
            biased;

            inbound = stream.next() => {
                match inbound {
                    Some(Ok(message)) => {
                        if let Err(end) = handle_message(&mut sim, message) {
                            return end;
                        }
                    }
                    Some(Err(err)) => return StreamEnd::ReceiveFailed(err.to_string()),
                    None => return StreamEnd::Disconnected,
                }
            }

            _ = ticker.tick() => {
                let snapshot = sim.tick(Instant::now());
                log_status_change(&mut last_status, snapshot.status);

                let frame = match serde_json::to_string(&snapshot) {
                    Ok(frame) => frame,
                    Err(err) => {
                        tracing::error!(error = %err, "snapshot serialization failed");
                        return StreamEnd::SendFailed;
                    }
                };
                if sink.send(Message::Text(frame)).await.is_err() {
                    return StreamEnd::SendFailed;
                }
            }
        }
    }
}

/// Apply one inbound frame to the simulation.
fn handle_message(sim: &mut DroneSimulation, message: Message) -> Result<(), StreamEnd> {
    match message {
        Message::Text(text) => match serde_json::from_str::<ControlCommand>(&text) {
            Ok(ControlCommand::Launch { lat, lon }) => {
                tracing::info!(lat, lon, "mission started");
                sim.start_mission(lat, lon, Instant::now());
                Ok(())
            }
            Ok(ControlCommand::Unknown) => Ok(()),
            Err(err) => Err(StreamEnd::Malformed(err.to_string())),
        },
        Message::Close(_) => Err(StreamEnd::Disconnected),
        // Ping and pong are answered at the transport layer.
        _ => Ok(()),
    }
}

/// Log the battery-driven status transitions the way an operator would
/// expect to read them.
fn log_status_change(last: &mut DroneStatus, current: DroneStatus) {
    match (*last, current) {
        (DroneStatus::Flying, DroneStatus::Recharging) => {
            tracing::info!("battery empty, drone landed to recharge");
        }
        (DroneStatus::Recharging, DroneStatus::Flying) => {
            tracing::info!("battery full, resuming flight");
        }
        _ => {}
    }
    *last = current;
}

#[cfg(test)]
mod tests {
    use super::*;
    use futures::channel::mpsc;
    use futures::stream;
    use skylink_sim::SimConfig;

    fn launch_frame() -> Message {
        Message::Text(r#"{"action":"LAUNCH","lat":10.0,"lon":20.0}"#.to_string())
    }

    fn frame_json(frame: Message) -> serde_json::Value {
        match frame {
            Message::Text(text) => serde_json::from_str(&text).unwrap(),
            other => panic!("expected text frame, got {:?}", other),
        }
    }

    #[tokio::test(start_paused = true)]
    async fn test_launch_visible_in_next_snapshot() {
        let (tx, mut rx) = mpsc::unbounded::<Message>();
        let inbound = stream::iter(vec![Ok::<Message, String>(launch_frame())])
            .chain(stream::pending());
        let sim = DroneSimulation::new(SimConfig::default());

        let task = tokio::spawn(run_loop(inbound, tx, sim));

        // The very first snapshot already reflects the launch.
        let value = frame_json(rx.next().await.expect("first frame"));
        assert_eq!(value["status"], "FLYING");
        assert!((value["longitude"].as_f64().unwrap() - 20.005).abs() < 1e-3);
        assert!((value["latitude"].as_f64().unwrap() - 10.0).abs() < 1e-3);
        assert_eq!(value["battery_level"], 100.0);

        drop(rx);
        let end = task.await.unwrap();
        assert!(matches!(end, StreamEnd::SendFailed));
    }

    #[tokio::test(start_paused = true)]
    async fn test_quiet_stream_keeps_cadence() {
        let (tx, mut rx) = mpsc::unbounded::<Message>();
        let inbound = stream::pending::<Result<Message, String>>();
        let sim = DroneSimulation::new(SimConfig::default());

        let task = tokio::spawn(run_loop(inbound, tx, sim));

        // No commands ever arrive; idle frames keep flowing anyway.
        for _ in 0..3 {
            let value = frame_json(rx.next().await.expect("frame"));
            assert_eq!(value["status"], "IDLE");
            assert_eq!(value["latitude"], 0.0);
            assert_eq!(value["longitude"], 0.0);
            assert_eq!(value["battery_level"], 100.0);
        }

        drop(rx);
        assert!(matches!(task.await.unwrap(), StreamEnd::SendFailed));
    }

    #[tokio::test(start_paused = true)]
    async fn test_unrecognized_action_is_ignored() {
        let (tx, mut rx) = mpsc::unbounded::<Message>();
        let hover = Message::Text(r#"{"action":"HOVER"}"#.to_string());
        let inbound =
            stream::iter(vec![Ok::<Message, String>(hover)]).chain(stream::pending());
        let sim = DroneSimulation::new(SimConfig::default());

        let task = tokio::spawn(run_loop(inbound, tx, sim));

        let value = frame_json(rx.next().await.expect("frame"));
        assert_eq!(value["status"], "IDLE");

        drop(rx);
        assert!(matches!(task.await.unwrap(), StreamEnd::SendFailed));
    }

    #[tokio::test(start_paused = true)]
    async fn test_malformed_frame_closes_stream() {
        let (tx, _rx) = mpsc::unbounded::<Message>();
        let garbage = Message::Text("launch now please".to_string());
        let inbound =
            stream::iter(vec![Ok::<Message, String>(garbage)]).chain(stream::pending());
        let sim = DroneSimulation::new(SimConfig::default());

        let end = run_loop(inbound, tx, sim).await;
        assert!(matches!(end, StreamEnd::Malformed(_)));
    }

    #[tokio::test(start_paused = true)]
    async fn test_peer_disconnect_closes_stream() {
        let (tx, _rx) = mpsc::unbounded::<Message>();
        let inbound = stream::iter(Vec::<Result<Message, String>>::new());
        let sim = DroneSimulation::new(SimConfig::default());

        let end = run_loop(inbound, tx, sim).await;
        assert!(matches!(end, StreamEnd::Disconnected));
    }

    #[tokio::test(start_paused = true)]
    async fn test_close_frame_closes_stream() {
        let (tx, _rx) = mpsc::unbounded::<Message>();
        let inbound = stream::iter(vec![Ok::<Message, String>(Message::Close(None))])
            .chain(stream::pending());
        let sim = DroneSimulation::new(SimConfig::default());

        let end = run_loop(inbound, tx, sim).await;
        assert!(matches!(end, StreamEnd::Disconnected));
    }

    #[tokio::test(start_paused = true)]
    async fn test_receive_error_closes_stream() {
        let (tx, _rx) = mpsc::unbounded::<Message>();
        let inbound = stream::iter(vec![Err::<Message, String>("boom".to_string())]);
        let sim = DroneSimulation::new(SimConfig::default());

        let end = run_loop(inbound, tx, sim).await;
        assert!(matches!(end, StreamEnd::ReceiveFailed(_)));
    }
}
