//! Transfer threads and non-bufferised transactions (spec.md §4.7): moving
//! one file's bytes from a source location to a destination location as a
//! single pipelined disk-read/network/disk-write interval.

use std::sync::Arc;

use async_trait::async_trait;

use wrench_kernel::host::HostId;
use wrench_kernel::{KernelError, Simulation};
use wrench_rt::mailbox::{BoundedMailboxSender, MailboxSender};
use wrench_rt::message::{Message, MessageEnvelope};
use wrench_rt::{Actor, ActorContext};

use crate::data::{File, FileLocation};
use crate::error::StorageServiceError;
use crate::storage::StorageService;

/// Which way a transfer thread moves bytes relative to the service that
/// spawned it.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Direction {
    /// This side is the source: bytes flow out to the network.
    Sending,
    /// This side is the destination: bytes flow in from the network.
    Receiving,
}

/// How a transfer thread's transaction ended.
#[derive(Debug, Clone)]
pub enum TransferOutcome {
    /// Source read, network hop and destination write all completed; the
    /// file is now visible at the destination.
    Completed,
    /// Some stage failed. No partial state is visible at the destination.
    Failed(String),
}

/// Posted once, on completion, to the mailbox the spawning service gave the
/// transfer thread.
#[derive(Debug, Clone)]
pub struct TransferNotification {
    /// The file this transaction moved.
    pub file: File,
    /// Which side this transfer thread ran.
    pub direction: Direction,
    /// How it ended.
    pub outcome: TransferOutcome,
    /// The timestamp the caller originally supplied, echoed back so a
    /// controller can correlate this notification with a copy event.
    pub start_timestamp: Option<f64>,
}

impl Message for TransferNotification {
    const MESSAGE_KIND: &'static str = "transfer_notification";
}

/// Control messages a transfer thread's mailbox can receive. Like
/// [`crate::alarm::AlarmControl`], there is nothing to observe yet; the
/// variant exists so a caller has somewhere to send a cancellation.
#[derive(Debug, Clone)]
pub enum TransferControl {
    /// Ask the transfer thread not to run. Currently unobserved — the
    /// transaction already starts in `pre_start`, before the mailbox is
    /// ever polled.
    Cancel,
}

impl Message for TransferControl {
    const MESSAGE_KIND: &'static str = "transfer_control";
}

/// Runs one non-bufferised transaction: read `src` off its storage
/// service, account for the network hop between `src_host` and
/// `dst_host` (if a route is configured; unrouted pairs are treated as
/// co-located, e.g. two services on the same host), then write `dst`.
///
/// Pipelining the three stages into a single overlapped interval (the
/// slowest stage dominating) would require a byte-streaming primitive
/// `wrench-kernel` does not expose; this models the same contract as a
/// sequential read-then-transmit-then-write instead, which is slower but
/// never faster than the real pipeline and preserves the atomicity
/// guarantee exactly: [`StorageService::write`] only makes `dst` visible
/// once the write completes, so a mid-transfer failure leaves no partial
/// destination state.
pub async fn run_nonbufferized_transaction(
    file: &File,
    src: &FileLocation,
    src_host: &HostId,
    src_service: &Arc<dyn StorageService>,
    dst: &FileLocation,
    dst_host: &HostId,
    dst_service: &Arc<dyn StorageService>,
    sim: &Simulation,
) -> Result<(), StorageServiceError> {
    src_service.read(src).await?;

    if let Some(dt) = sim.links().route_transmission_time(src_host, dst_host, file.size_bytes()) {
        sim.sleep(src_host, dt).await?;
    }

    dst_service.write(dst).await
}

/// A one-shot actor that carries out a single transaction and reports the
/// result. Like [`crate::alarm::Alarm`], all the work happens in
/// [`Actor::pre_start`]; there is no ongoing behaviour once the
/// transaction settles.
pub struct TransferThread {
    file: File,
    direction: Direction,
    src: FileLocation,
    src_host: HostId,
    src_service: Arc<dyn StorageService>,
    dst: FileLocation,
    dst_host: HostId,
    dst_service: Arc<dyn StorageService>,
    sim: Simulation,
    notify: BoundedMailboxSender<TransferNotification>,
    start_timestamp: Option<f64>,
}

impl TransferThread {
    /// Build a transfer thread moving `file` from `src` (on `src_host`,
    /// served by `src_service`) to `dst` (on `dst_host`, served by
    /// `dst_service`), reporting to `notify` on completion.
    #[allow(clippy::too_many_arguments)]
    pub fn new(
        file: File,
        direction: Direction,
        src: FileLocation,
        src_host: HostId,
        src_service: Arc<dyn StorageService>,
        dst: FileLocation,
        dst_host: HostId,
        dst_service: Arc<dyn StorageService>,
        sim: Simulation,
        notify: BoundedMailboxSender<TransferNotification>,
        start_timestamp: Option<f64>,
    ) -> Self {
        Self {
            file,
            direction,
            src,
            src_host,
            src_service,
            dst,
            dst_host,
            dst_service,
            sim,
            notify,
            start_timestamp,
        }
    }
}

/// Transfer threads never retry themselves; a crashed transfer thread is
/// observed by the owning storage service via its supervisor, which
/// answers the original request with an error rather than relying on
/// this actor to resume.
#[async_trait]
impl Actor for TransferThread {
    type Message = TransferControl;
    type Error = KernelError;

    async fn pre_start(&mut self, _ctx: &mut ActorContext<Self::Message>) -> Result<(), Self::Error> {
        let outcome = match run_nonbufferized_transaction(
            &self.file,
            &self.src,
            &self.src_host,
            &self.src_service,
            &self.dst,
            &self.dst_host,
            &self.dst_service,
            &self.sim,
        )
        .await
        {
            Ok(()) => TransferOutcome::Completed,
            Err(e) => TransferOutcome::Failed(e.to_string()),
        };

        let notification = TransferNotification {
            file: self.file.clone(),
            direction: self.direction,
            outcome,
            start_timestamp: self.start_timestamp,
        };
        let _ = self.notify.send(MessageEnvelope::new(notification)).await;
        Ok(())
    }

    async fn handle_message(&mut self, message: Self::Message, _ctx: &mut ActorContext<Self::Message>) -> Result<(), Self::Error> {
        match message {
            TransferControl::Cancel => Ok(()),
        }
    }
}
