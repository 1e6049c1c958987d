//! Server-Sent Events parsing.
//!
//! A [`LineBuffer`] reassembles physical lines from arbitrarily split chunks.
//! Each complete line is handed to a [`Framing`], which decides whether it
//! completes an event. Two framings exist because the API uses two
//! conventions:
//!
//! - [`NamedEvents`]: per-resource watch streams, where an `event:` line names
//!   the event and the following `data:` line carries the payload.
//! - [`SelfDescribing`]: the wallet-wide stream, where every `data:` line is a
//!   complete JSON object with its own `event` and `createdAt` fields.
//!
//! Malformed events are logged and dropped; they never end the stream.

use std::marker::PhantomData;
use std::pin::Pin;
use std::time::Duration;

use bytes::Bytes;
use futures::{Stream, StreamExt};
use serde::de::DeserializeOwned;
use serde_json::Value;

use crate::error::{Error, Result};
use crate::parse::parse;
use crate::types::{StreamEvent, WalletEvent};

/// Async stream of decoded events.
pub type EventStream<T> = Pin<Box<dyn Stream<Item = Result<T>> + Send>>;

// ─────────────────────────────────────────────────────────────────────────────
// Line buffering
// ─────────────────────────────────────────────────────────────────────────────

/// Accumulates raw bytes and yields complete lines.
///
/// Lines end at `\n`; a trailing `\r` is stripped. Bytes are kept undecoded
/// until a line is complete, so multi-byte characters split across chunks
/// survive.
#[derive(Debug, Default)]
pub struct LineBuffer {
    buf: Vec<u8>,
}

impl LineBuffer {
    /// Create an empty buffer.
    pub fn new() -> Self {
        Self::default()
    }

    /// Append a chunk from the transport.
    pub fn push(&mut self, chunk: &[u8]) {
        self.buf.extend_from_slice(chunk);
    }

    /// Take the next complete line, if one is buffered.
    pub fn next_line(&mut self) -> Option<String> {
        let end = self.buf.iter().position(|b| *b == b'\n')?;
        let mut line: Vec<u8> = self.buf.drain(..=end).collect();
        line.pop();
        if line.last() == Some(&b'\r') {
            line.pop();
        }
        Some(String::from_utf8_lossy(&line).into_owned())
    }

    /// Mark the end of input. A final unterminated line becomes available
    /// from [`next_line`](Self::next_line).
    pub fn close(&mut self) {
        if !self.buf.is_empty() {
            self.buf.push(b'\n');
        }
    }
}

// ─────────────────────────────────────────────────────────────────────────────
// Framing
// ─────────────────────────────────────────────────────────────────────────────

/// Turns complete lines into events.
pub trait Framing {
    /// Event type produced by this framing.
    type Event;

    /// Process one line, returning an event if the line completes one.
    fn on_line(&mut self, line: &str) -> Option<Self::Event>;
}

/// `event:` + `data:` pairs, payload decoded into `T`.
///
/// A `data:` line is only used when an event name is pending; the name is
/// consumed by the first non-empty `data:` line whether or not its payload
/// decodes.
#[derive(Debug)]
pub struct NamedEvents<T> {
    pending: Option<String>,
    _payload: PhantomData<fn() -> T>,
}

impl<T> NamedEvents<T> {
    /// Create a framing with no pending event name.
    pub fn new() -> Self {
        Self {
            pending: None,
            _payload: PhantomData,
        }
    }
}

impl<T> Default for NamedEvents<T> {
    fn default() -> Self {
        Self::new()
    }
}

impl<T: DeserializeOwned> Framing for NamedEvents<T> {
    type Event = StreamEvent<T>;

    fn on_line(&mut self, line: &str) -> Option<Self::Event> {
        if let Some(name) = line.strip_prefix("event:") {
            let name = name.trim();
            self.pending = (!name.is_empty()).then(|| name.to_string());
            return None;
        }

        let raw = line.strip_prefix("data:")?.trim();
        if raw.is_empty() {
            return None;
        }
        let Some(event) = self.pending.take() else {
            tracing::debug!(data = %raw, "Dropping data line without event name");
            return None;
        };

        match decode::<T>(raw) {
            Ok(data) => Some(StreamEvent { event, data }),
            Err(e) => {
                tracing::warn!(event = %event, error = %e, "Dropping malformed stream event");
                None
            }
        }
    }
}

/// Wallet-wide framing: each `data:` line stands alone. `event:` lines are
/// ignored.
#[derive(Debug, Default)]
pub struct SelfDescribing;

impl Framing for SelfDescribing {
    type Event = WalletEvent;

    fn on_line(&mut self, line: &str) -> Option<Self::Event> {
        let raw = line.strip_prefix("data:")?.trim();
        if raw.is_empty() {
            return None;
        }

        match decode::<WalletEvent>(raw) {
            Ok(event) => Some(event),
            Err(e) => {
                tracing::warn!(data = %raw, error = %e, "Dropping malformed wallet event");
                None
            }
        }
    }
}

fn decode<T: DeserializeOwned>(raw: &str) -> Result<T> {
    let value: Value = serde_json::from_str(raw)?;
    parse(value)
}

// ─────────────────────────────────────────────────────────────────────────────
// Parser
// ─────────────────────────────────────────────────────────────────────────────

/// Line buffer plus framing: push chunks in, pull events out.
pub struct SseParser<T> {
    lines: LineBuffer,
    framing: Box<dyn Framing<Event = T> + Send>,
}

impl<T> SseParser<T> {
    /// Create a parser with the given framing.
    pub fn new(framing: impl Framing<Event = T> + Send + 'static) -> Self {
        Self::boxed(Box::new(framing))
    }

    pub(crate) fn boxed(framing: Box<dyn Framing<Event = T> + Send>) -> Self {
        Self {
            lines: LineBuffer::new(),
            framing,
        }
    }

    /// Feed a chunk from the transport.
    pub fn push(&mut self, chunk: &[u8]) {
        self.lines.push(chunk);
    }

    /// Signal end of input so a trailing unterminated line is processed.
    pub fn close(&mut self) {
        self.lines.close();
    }

    /// Next event from the lines buffered so far.
    pub fn next_event(&mut self) -> Option<T> {
        while let Some(line) = self.lines.next_line() {
            tracing::trace!(line = %line, "SSE line");
            if let Some(event) = self.framing.on_line(&line) {
                return Some(event);
            }
        }
        None
    }
}

// ─────────────────────────────────────────────────────────────────────────────
// Async stream
// ─────────────────────────────────────────────────────────────────────────────

struct StreamState<T> {
    byte_stream: Pin<Box<dyn Stream<Item = reqwest::Result<Bytes>> + Send>>,
    parser: SseParser<T>,
    idle: Duration,
    exhausted: bool,
    failed: bool,
}

/// Drive a parser from a response body. The stream owns the body, so dropping
/// it releases the connection.
///
/// `idle` bounds the wait for each chunk, not the stream's lifetime: a stream
/// that keeps delivering stays open until the server ends it.
pub(crate) fn event_stream<T: Send + 'static>(
    byte_stream: impl Stream<Item = reqwest::Result<Bytes>> + Send + 'static,
    parser: SseParser<T>,
    idle: Duration,
) -> EventStream<T> {
    Box::pin(futures::stream::unfold(
        StreamState {
            byte_stream: Box::pin(byte_stream),
            parser,
            idle,
            exhausted: false,
            failed: false,
        },
        |mut state| async move {
            if state.failed {
                return None;
            }

            loop {
                if let Some(event) = state.parser.next_event() {
                    return Some((Ok(event), state));
                }
                if state.exhausted {
                    return None;
                }

                match tokio::time::timeout(state.idle, state.byte_stream.next()).await {
                    Ok(Some(Ok(chunk))) => state.parser.push(&chunk),
                    Ok(Some(Err(e))) => {
                        state.failed = true;
                        return Some((Err(e.into()), state));
                    }
                    Ok(None) => {
                        state.parser.close();
                        state.exhausted = true;
                    }
                    Err(_) => {
                        tracing::debug!(idle = ?state.idle, "Event stream went idle");
                        state.failed = true;
                        let idle = state.idle;
                        return Some((Err(Error::StreamIdle(idle)), state));
                    }
                }
            }
        },
    ))
}
