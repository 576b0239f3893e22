//! SSE subscription stream for `tasks/sendSubscribe` and `tasks/resubscribe`.
//!
//! Each event payload is a JSON-RPC response whose result is a
//! [`TaskStreamingResult`]. The stream ends when:
//!
//! - a status update with `final = true` has been yielded,
//! - the server closes the connection,
//! - an event fails to decode (the error is yielded first),
//! - the caller cancels it.
//!
//! Ending always drops the underlying event connection.

use std::future::Future;
use std::pin::Pin;
use std::task::{ready, Context, Poll};

use futures::future::{BoxFuture, FutureExt};
use futures::stream::{FusedStream, Stream, StreamExt};

use crate::error::A2AResult;
use crate::task::TaskStreamingResult;
use crate::transport::http::EventDataStream;
use crate::transport::jsonrpc;

/// A stream of decoded task events received over SSE.
pub struct TaskEventStream {
    events: Option<EventDataStream>,
    cancel_signal: Option<BoxFuture<'static, ()>>,
}

impl TaskEventStream {
    /// Wrap a stream of raw SSE `data` payloads.
    pub fn new(events: EventDataStream) -> Self {
        Self {
            events: Some(events),
            cancel_signal: None,
        }
    }

    /// End the stream as soon as `signal` resolves.
    pub fn with_cancellation<F>(mut self, signal: F) -> Self
    where
        F: Future<Output = ()> + Send + 'static,
    {
        self.cancel_signal = Some(signal.boxed());
        self
    }

    /// Close the event connection now. Later polls yield `None`.
    pub fn cancel(&mut self) {
        if self.events.is_some() {
            tracing::debug!("Task event stream canceled");
        }
        self.close();
    }

    /// Whether the stream has ended.
    pub fn is_closed(&self) -> bool {
        self.events.is_none()
    }

    fn close(&mut self) {
        self.events = None;
        self.cancel_signal = None;
    }
}

impl std::fmt::Debug for TaskEventStream {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("TaskEventStream")
            .field("closed", &self.is_closed())
            .field("cancelable", &self.cancel_signal.is_some())
            .finish()
    }
}

/// Decode one SSE payload into a streaming result.
pub fn parse_event(data: &str) -> A2AResult<TaskStreamingResult> {
    jsonrpc::decode_response(data)?.into_streaming_result()
}

impl Stream for TaskEventStream {
    type Item = A2AResult<TaskStreamingResult>;

    fn poll_next(self: Pin<&mut Self>, cx: &mut Context<'_>) -> Poll<Option<Self::Item>> {
        let this = self.get_mut();

        if let Some(signal) = this.cancel_signal.as_mut() {
            if signal.poll_unpin(cx).is_ready() {
                this.cancel();
                return Poll::Ready(None);
            }
        }

        loop {
            let Some(events) = this.events.as_mut() else {
                return Poll::Ready(None);
            };

            match ready!(events.poll_next_unpin(cx)) {
                None => {
                    tracing::debug!("Task event stream closed by server");
                    this.close();
                    return Poll::Ready(None);
                }
                Some(Err(err)) => {
                    tracing::warn!(error = %err, "Task event stream failed");
                    this.close();
                    return Poll::Ready(Some(Err(err)));
                }
                Some(Ok(data)) if data.trim().is_empty() => continue,
                Some(Ok(data)) => match parse_event(&data) {
                    Ok(event) => {
                        tracing::debug!(
                            task_id = %event.task_id(),
                            is_final = event.is_final(),
                            "Received task event"
                        );
                        if event.is_final() {
                            tracing::debug!(task_id = %event.task_id(), "Final status received, closing stream");
                            this.close();
                        }
                        return Poll::Ready(Some(Ok(event)));
                    }
                    Err(err) => {
                        tracing::warn!(error = %err, "Undecodable task event, closing stream");
                        this.close();
                        return Poll::Ready(Some(Err(err)));
                    }
                },
            }
        }
    }
}

impl FusedStream for TaskEventStream {
    fn is_terminated(&self) -> bool {
        self.is_closed()
    }
}
