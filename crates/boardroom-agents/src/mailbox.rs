//! The per-agent message queue kernel.
//!
//! Each advisor runs as one tokio task draining an unbounded mpsc channel.
//! The channel is the FIFO queue and the single consuming task is the
//! busy/idle discipline: messages are processed strictly one at a time, in
//! arrival order, with no overlap. The knowledge base lives inside the
//! drain task, so handlers mutate it without locks.

use tokio::sync::{mpsc, oneshot};
use tokio::task::JoinHandle;
use tokio_util::sync::CancellationToken;
use tracing::{debug, info, warn};

use boardroom_models::advisory::{AdvisoryRequest, AdvisoryResponse};
use boardroom_models::knowledge::KnowledgeBase;

use crate::advisor::Advisor;
use crate::error::AgentError;

enum Envelope {
    Advise {
        request: AdvisoryRequest,
        reply: Option<oneshot::Sender<AdvisoryResponse>>,
    },
    Snapshot {
        reply: oneshot::Sender<KnowledgeBase>,
    },
}

/// A cheap, cloneable handle to one running advisor task.
#[derive(Clone)]
pub struct AgentHandle {
    id: String,
    name: String,
    tx: mpsc::UnboundedSender<Envelope>,
}

impl AgentHandle {
    pub fn id(&self) -> &str {
        &self.id
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    /// Fire-and-forget enqueue. Returns immediately; the message is
    /// processed after everything already queued.
    pub fn send(&self, request: AdvisoryRequest) -> Result<(), AgentError> {
        self.tx
            .send(Envelope::Advise {
                request,
                reply: None,
            })
            .map_err(|_| AgentError::MailboxClosed(self.id.clone()))
    }

    /// Enqueue and await the response. The reply arrives at most once,
    /// only after the handler for this message settles.
    pub async fn ask(&self, request: AdvisoryRequest) -> Result<AdvisoryResponse, AgentError> {
        let (reply_tx, reply_rx) = oneshot::channel();
        self.tx
            .send(Envelope::Advise {
                request,
                reply: Some(reply_tx),
            })
            .map_err(|_| AgentError::MailboxClosed(self.id.clone()))?;
        reply_rx.await.map_err(|_| AgentError::ReplyDropped)
    }

    /// A copy of the agent's accumulated knowledge base, observed between
    /// messages (never mid-handler).
    pub async fn knowledge_snapshot(&self) -> Result<KnowledgeBase, AgentError> {
        let (reply_tx, reply_rx) = oneshot::channel();
        self.tx
            .send(Envelope::Snapshot { reply: reply_tx })
            .map_err(|_| AgentError::MailboxClosed(self.id.clone()))?;
        reply_rx.await.map_err(|_| AgentError::ReplyDropped)
    }
}

/// Spawn the drain task for an advisor. Cancelling the token stops the
/// loop after the in-flight message; dropping every handle does the same
/// once the queue runs dry.
pub fn spawn_advisor<A: Advisor>(
    mut advisor: A,
    cancel: CancellationToken,
) -> (AgentHandle, JoinHandle<()>) {
    let (tx, mut rx) = mpsc::unbounded_channel::<Envelope>();
    let handle = AgentHandle {
        id: advisor.id().to_string(),
        name: advisor.name().to_string(),
        tx,
    };

    let agent_id = handle.id.clone();
    let task = tokio::spawn(async move {
        let mut knowledge = KnowledgeBase::default();
        info!(agent = %agent_id, "Advisor mailbox started");

        loop {
            let envelope = tokio::select! {
                _ = cancel.cancelled() => break,
                received = rx.recv() => match received {
                    Some(envelope) => envelope,
                    None => break,
                },
            };

            match envelope {
                Envelope::Advise { request, reply } => {
                    let response = process(&mut advisor, &request, &mut knowledge).await;
                    if let Some(reply) = reply {
                        // The caller may have given up waiting; that is
                        // their loss, not a queue stall.
                        let _ = reply.send(response);
                    }
                }
                Envelope::Snapshot { reply } => {
                    let _ = reply.send(knowledge.clone());
                }
            }
        }

        info!(agent = %agent_id, "Advisor mailbox stopped");
    });

    (handle, task)
}

/// Run one handler and convert its outcome to the wire response. Errors
/// never escape: a failed message yields a structured error response and
/// the queue moves on.
async fn process<A: Advisor>(
    advisor: &mut A,
    request: &AdvisoryRequest,
    knowledge: &mut KnowledgeBase,
) -> AdvisoryResponse {
    debug!(agent = %advisor.id(), kind = %request.kind, "Processing message");
    match advisor.handle(request, knowledge).await {
        Ok(body) => AdvisoryResponse::success(body),
        Err(AgentError::UnknownKind(kind)) => {
            warn!(agent = %advisor.id(), kind = %kind, "Unroutable message type");
            AdvisoryResponse::unknown_kind(&kind)
        }
        Err(err) => {
            warn!(agent = %advisor.id(), kind = %request.kind, error = %err, "Handler failed");
            AdvisoryResponse::error(err.to_string())
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use async_trait::async_trait;
    use serde_json::{json, Value};
    use std::sync::atomic::{AtomicUsize, Ordering};
    use std::sync::Arc;
    use std::time::Duration;

    /// Records processing order and concurrency; fails on demand.
    struct ProbeAdvisor {
        in_flight: Arc<AtomicUsize>,
        max_in_flight: Arc<AtomicUsize>,
        processed: Arc<AtomicUsize>,
    }

    impl ProbeAdvisor {
        fn new() -> (Self, Arc<AtomicUsize>, Arc<AtomicUsize>) {
            let max_in_flight = Arc::new(AtomicUsize::new(0));
            let processed = Arc::new(AtomicUsize::new(0));
            (
                Self {
                    in_flight: Arc::new(AtomicUsize::new(0)),
                    max_in_flight: Arc::clone(&max_in_flight),
                    processed: Arc::clone(&processed),
                },
                max_in_flight,
                processed,
            )
        }
    }

    #[async_trait]
    impl Advisor for ProbeAdvisor {
        fn id(&self) -> &str {
            "probe"
        }
        fn name(&self) -> &str {
            "Probe"
        }
        fn description(&self) -> &str {
            "records processing order"
        }
        fn supported_kinds(&self) -> &'static [&'static str] {
            &["ECHO", "LEARN", "FAIL"]
        }

        async fn handle(
            &mut self,
            request: &AdvisoryRequest,
            knowledge: &mut KnowledgeBase,
        ) -> Result<Value, AgentError> {
            let current = self.in_flight.fetch_add(1, Ordering::SeqCst) + 1;
            self.max_in_flight.fetch_max(current, Ordering::SeqCst);
            tokio::time::sleep(Duration::from_millis(5)).await;
            self.in_flight.fetch_sub(1, Ordering::SeqCst);

            let sequence = self.processed.fetch_add(1, Ordering::SeqCst);
            match request.kind.as_str() {
                "ECHO" => Ok(json!({"echo": request.data, "sequence": sequence})),
                "LEARN" => {
                    knowledge.merge(request.data.clone());
                    Ok(json!({"learned": true}))
                }
                "FAIL" => Err(AgentError::InvalidPayload {
                    kind: request.kind.clone(),
                    reason: "intentional".to_string(),
                }),
                other => Err(AgentError::UnknownKind(other.to_string())),
            }
        }
    }

    fn echo(n: u64) -> AdvisoryRequest {
        AdvisoryRequest::new("ECHO", json!({"n": n}))
    }

    #[tokio::test]
    async fn ask_returns_handler_result() {
        let (advisor, _, _) = ProbeAdvisor::new();
        let (handle, task) = spawn_advisor(advisor, CancellationToken::new());

        let response = handle.ask(echo(1)).await.unwrap();
        assert!(response.is_success());
        assert_eq!(response.field("echo"), Some(&json!({"n": 1})));

        drop(handle);
        task.await.unwrap();
    }

    #[tokio::test]
    async fn messages_process_in_fifo_order_without_overlap() {
        let (advisor, max_in_flight, _) = ProbeAdvisor::new();
        let (handle, task) = spawn_advisor(advisor, CancellationToken::new());

        // Enqueue everything up front, then await the replies. Sequence
        // numbers must match the enqueue order.
        let mut receipts = Vec::new();
        for n in 0..8u64 {
            let (reply_tx, reply_rx) = oneshot::channel();
            handle
                .tx
                .send(Envelope::Advise {
                    request: echo(n),
                    reply: Some(reply_tx),
                })
                .unwrap();
            receipts.push(reply_rx);
        }

        for (n, receipt) in receipts.into_iter().enumerate() {
            let response = receipt.await.unwrap();
            assert_eq!(response.field("sequence"), Some(&json!(n)));
        }
        assert_eq!(max_in_flight.load(Ordering::SeqCst), 1);

        drop(handle);
        task.await.unwrap();
    }

    #[tokio::test]
    async fn failed_message_does_not_stall_the_queue() {
        let (advisor, _, processed) = ProbeAdvisor::new();
        let (handle, task) = spawn_advisor(advisor, CancellationToken::new());

        let failure = handle
            .ask(AdvisoryRequest::new("FAIL", json!({})))
            .await
            .unwrap();
        assert!(!failure.is_success());

        let next = handle.ask(echo(2)).await.unwrap();
        assert!(next.is_success());
        assert_eq!(processed.load(Ordering::SeqCst), 2);

        drop(handle);
        task.await.unwrap();
    }

    #[tokio::test]
    async fn unknown_kind_yields_the_standard_error() {
        let (advisor, _, _) = ProbeAdvisor::new();
        let (handle, task) = spawn_advisor(advisor, CancellationToken::new());

        let response = handle
            .ask(AdvisoryRequest::new("BOGUS", json!({})))
            .await
            .unwrap();
        let value = serde_json::to_value(&response).unwrap();
        assert_eq!(value["status"], "error");
        assert_eq!(value["message"], "Unknown message type: BOGUS");

        drop(handle);
        task.await.unwrap();
    }

    #[tokio::test]
    async fn knowledge_accumulates_across_messages() {
        let (advisor, _, _) = ProbeAdvisor::new();
        let (handle, task) = spawn_advisor(advisor, CancellationToken::new());

        handle
            .ask(AdvisoryRequest::new("LEARN", json!({"a": 1})))
            .await
            .unwrap();
        handle
            .ask(AdvisoryRequest::new("LEARN", json!({"b": 2})))
            .await
            .unwrap();

        let knowledge = handle.knowledge_snapshot().await.unwrap();
        assert_eq!(knowledge.get("a"), Some(&json!(1)));
        assert_eq!(knowledge.get("b"), Some(&json!(2)));

        drop(handle);
        task.await.unwrap();
    }

    #[tokio::test]
    async fn cancellation_stops_the_drain_loop() {
        let (advisor, _, _) = ProbeAdvisor::new();
        let cancel = CancellationToken::new();
        let (handle, task) = spawn_advisor(advisor, cancel.clone());

        handle.ask(echo(0)).await.unwrap();
        cancel.cancel();
        task.await.unwrap();

        // The mailbox is gone; sends now fail instead of queueing forever.
        let result = handle.ask(echo(1)).await;
        assert!(result.is_err());
    }
}
