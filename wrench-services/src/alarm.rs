//! Alarms (spec.md §4.8): the simplest possible actor — sleep once, then
//! deliver a payload, dropping it silently if the host dies first.

use async_trait::async_trait;

use wrench_kernel::host::HostId;
use wrench_kernel::{KernelError, Simulation};
use wrench_rt::mailbox::{BoundedMailboxSender, MailboxSender};
use wrench_rt::message::{Message, MessageEnvelope};
use wrench_rt::{Actor, ActorContext};

/// Control messages an alarm's mailbox can receive. There is nothing to
/// cancel once the one-shot wakeup has fired; before that, `Cancel` is a
/// no-op today since nothing observes it yet — the variant exists so a
/// caller has somewhere to send a cancellation without this type needing
/// to change shape later.
#[derive(Debug, Clone)]
pub enum AlarmControl {
    /// Ask the alarm not to fire. Currently unobserved.
    Cancel,
}

impl Message for AlarmControl {
    const MESSAGE_KIND: &'static str = "alarm_control";
}

/// A one-shot sleep-then-deliver actor. All the work happens in
/// [`Actor::pre_start`], before the main loop ever polls the mailbox —
/// there is no ongoing behaviour to drive once the wakeup has fired.
pub struct Alarm<M: Message> {
    host: HostId,
    sim: Simulation,
    delay: f64,
    payload: Option<M>,
    target: BoundedMailboxSender<M>,
}

impl<M: Message> Alarm<M> {
    /// Build an alarm that will sleep `delay` virtual seconds on `host`,
    /// then deliver `payload` to `target` — unless `host` dies first, in
    /// which case the payload is dropped.
    pub fn new(host: HostId, sim: Simulation, delay: f64, payload: M, target: BoundedMailboxSender<M>) -> Self {
        Self {
            host,
            sim,
            delay,
            payload: Some(payload),
            target,
        }
    }
}

#[async_trait]
impl<M: Message> Actor for Alarm<M> {
    type Message = AlarmControl;
    type Error = KernelError;

    async fn pre_start(&mut self, _ctx: &mut ActorContext<Self::Message>) -> Result<(), Self::Error> {
        if self.sim.sleep(&self.host, self.delay).await.is_ok() {
            if let Some(payload) = self.payload.take() {
                let _ = self.target.send(MessageEnvelope::new(payload)).await;
            }
        }
        Ok(())
    }

    async fn handle_message(&mut self, message: Self::Message, _ctx: &mut ActorContext<Self::Message>) -> Result<(), Self::Error> {
        match message {
            AlarmControl::Cancel => Ok(()),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use wrench_kernel::host::HostSpec;
    use wrench_kernel::KernelConfig;
    use wrench_rt::mailbox::{BoundedMailbox, MailboxReceiver};
    use wrench_rt::util::ActorAddress;

    #[derive(Debug, Clone, PartialEq, Eq)]
    struct Ping;
    impl Message for Ping {
        const MESSAGE_KIND: &'static str = "ping";
    }

    fn ctx() -> ActorContext<AlarmControl> {
        let (_mailbox, sender) = BoundedMailbox::new(1);
        ActorContext::new(ActorAddress::anonymous(), sender)
    }

    #[tokio::test]
    async fn alarm_delivers_payload_after_the_delay() {
        let sim = Simulation::new(KernelConfig::default());
        let host = HostId::new("H1");
        sim.hosts().add_host(host.clone(), HostSpec::new(1, 1.0, 1));

        let (mut mailbox, sender) = BoundedMailbox::<Ping>::new(1);
        let mut alarm = Alarm::new(host.clone(), sim.clone(), 10.0, Ping, sender);

        let sim_for_advance = sim.clone();
        let driver = tokio::spawn(async move {
            let mut alarm_ctx = ctx();
            alarm.pre_start(&mut alarm_ctx).await
        });
        tokio::task::yield_now().await;
        sim_for_advance.clock().advance();
        driver.await.unwrap().unwrap();

        assert!(mailbox.recv().await.is_some());
        assert_eq!(sim.now(), 10.0);
    }

    #[tokio::test]
    async fn host_dying_first_drops_the_payload() {
        let sim = Simulation::new(KernelConfig::default());
        let host = HostId::new("H1");
        sim.hosts().add_host(host.clone(), HostSpec::new(1, 1.0, 1));

        let (mut mailbox, sender) = BoundedMailbox::<Ping>::new(1);
        let mut alarm = Alarm::new(host.clone(), sim.clone(), 10.0, Ping, sender);

        let driver = tokio::spawn(async move {
            let mut alarm_ctx = ctx();
            alarm.pre_start(&mut alarm_ctx).await
        });
        tokio::task::yield_now().await;
        sim.turn_off_host(&host);
        driver.await.unwrap().unwrap();

        assert!(mailbox.try_recv().is_err());
    }
}
