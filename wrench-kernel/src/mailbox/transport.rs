//! `mailbox_put` / `mailbox_get` (§4.1): the named-rendezvous registry
//! plus transmission-time modelling and host/link failure propagation
//! layered on top of `wrench-rt`'s in-process mailboxes.

use tokio::sync::oneshot;

use super::registry::NamedMailboxRegistry;
use crate::clock::{KernelError, NetworkErrorKind, VirtualClock};
use crate::config::KernelConfig;
use crate::host::{HostId, HostRegistry};
use crate::link::LinkRegistry;
use wrench_rt::mailbox::{MailboxReceiver, MailboxSender};
use wrench_rt::message::{Message, MessageEnvelope};

/// Everything `mailbox_put`/`mailbox_get` needs: the clock, the host and
/// link registries, the configured control-message default, and the
/// named-mailbox directory for one message type.
///
/// One `Transport<M>` exists per domain message enum (`wrench-services`
/// typically keeps one per service family); all share the same
/// underlying clock/host/link registries.
pub struct Transport<'a, M: Message> {
    /// Shared virtual clock.
    pub clock: &'a VirtualClock,
    /// Shared host registry.
    pub hosts: &'a HostRegistry,
    /// Shared link registry.
    pub links: &'a LinkRegistry,
    /// Named mailbox directory for this message type.
    pub registry: &'a NamedMailboxRegistry<M>,
    /// Kernel configuration (control-message size default).
    pub config: &'a KernelConfig,
}

impl<'a, M: Message> Transport<'a, M> {
    /// Delivers `envelope` to the mailbox named `to`, as if sent from an
    /// actor on `from_host`.
    ///
    /// Blocks (in virtual time) until the transmission delay has elapsed
    /// and the receiver's queue has accepted the message. Fails with
    /// [`KernelError::NetworkError`] if any link on the route is down or
    /// the destination host is off, without first spending any virtual
    /// time — a dead route is detected immediately, matching the
    /// "fails with NetworkError on link failure" contract rather than
    /// timing out.
    pub async fn put(
        &self,
        from_host: &HostId,
        to: &str,
        envelope: MessageEnvelope<M>,
    ) -> Result<(), KernelError> {
        let dest_host = self.destination_host(to)?;

        if !self.hosts.is_host_on(&dest_host) {
            return Err(KernelError::NetworkError {
                mailbox: to.to_string(),
                kind: NetworkErrorKind::DestinationUnreachable,
            });
        }

        if from_host != &dest_host {
            let route = self.links.route(from_host, &dest_host);
            match route {
                Some(route_links) => {
                    if let Some(down) = route_links.iter().find(|l| !self.links.is_link_on(l)) {
                        return Err(KernelError::NetworkError {
                            mailbox: to.to_string(),
                            kind: NetworkErrorKind::LinkDown(down.clone()),
                        });
                    }
                }
                None => {
                    return Err(KernelError::NetworkError {
                        mailbox: to.to_string(),
                        kind: NetworkErrorKind::DestinationUnreachable,
                    });
                }
            }
        }

        let bytes = match envelope.payload_bytes() {
            0 => self.config.default_control_message_size,
            n => n,
        };
        let delay = self
            .links
            .route_transmission_time(from_host, &dest_host, bytes)
            .unwrap_or(0.0);
        if delay > 0.0 {
            self.clock.sleep(delay).await;
        }

        let sender = self
            .registry
            .sender_of(to)
            .ok_or_else(|| KernelError::NetworkError {
                mailbox: to.to_string(),
                kind: NetworkErrorKind::DestinationUnreachable,
            })?;

        sender
            .send(envelope)
            .await
            .map_err(|_| KernelError::NetworkError {
                mailbox: to.to_string(),
                kind: NetworkErrorKind::DestinationUnreachable,
            })
    }

    fn destination_host(&self, to: &str) -> Result<HostId, KernelError> {
        self.registry
            .host_of(to)
            .ok_or_else(|| KernelError::NetworkError {
                mailbox: to.to_string(),
                kind: NetworkErrorKind::DestinationUnreachable,
            })
    }
}

/// Receives the next message from `receiver`, optionally racing a virtual
/// timeout registered against `clock`.
///
/// This is a free function rather than a `Transport` method because
/// receiving only ever touches the local mailbox the calling actor
/// already owns — it needs no host/link registries, just the clock for
/// the timeout.
pub async fn recv<M, R>(
    clock: &VirtualClock,
    receiver: &mut R,
    timeout: Option<f64>,
    mailbox_name: &str,
) -> Result<MessageEnvelope<M>, KernelError>
where
    M: Message,
    R: MailboxReceiver<M>,
{
    match timeout {
        None => receiver.recv().await.ok_or_else(|| KernelError::NetworkError {
            mailbox: mailbox_name.to_string(),
            kind: NetworkErrorKind::DestinationUnreachable,
        }),
        Some(dt) => {
            let timeout_rx: oneshot::Receiver<()> = clock.register(dt);
            tokio::select! {
                biased;
                message = receiver.recv() => {
                    message.ok_or_else(|| KernelError::NetworkError {
                        mailbox: mailbox_name.to_string(),
                        kind: NetworkErrorKind::DestinationUnreachable,
                    })
                }
                _ = timeout_rx => Err(KernelError::Timeout {
                    mailbox: mailbox_name.to_string(),
                }),
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::host::HostSpec;
    use crate::link::LinkSpec;
    use wrench_rt::mailbox::BoundedMailbox;

    #[derive(Debug, Clone)]
    struct Ping;
    impl Message for Ping {
        const MESSAGE_KIND: &'static str = "ping";
    }

    fn setup() -> (VirtualClock, HostRegistry, LinkRegistry, KernelConfig) {
        let clock = VirtualClock::new();
        let hosts = HostRegistry::new(clock.clone());
        let links = LinkRegistry::new(clock.clone());
        (clock, hosts, links, KernelConfig::default())
    }

    #[tokio::test]
    async fn put_to_same_host_requires_no_route() {
        let (clock, hosts, links, config) = setup();
        let a = HostId::new("A");
        hosts.add_host(a.clone(), HostSpec::new(1, 1.0, 1));

        let registry = NamedMailboxRegistry::<Ping>::new();
        let (mut mailbox, sender) = BoundedMailbox::<Ping>::new(4);
        registry.register("svc", a.clone(), sender);

        let transport = Transport {
            clock: &clock,
            hosts: &hosts,
            links: &links,
            registry: &registry,
            config: &config,
        };

        transport
            .put(&a, "svc", MessageEnvelope::new(Ping))
            .await
            .unwrap();
        assert!(mailbox.recv().await.is_some());
    }

    #[tokio::test]
    async fn put_fails_with_network_error_when_destination_host_is_off() {
        let (clock, hosts, links, config) = setup();
        let a = HostId::new("A");
        let b = HostId::new("B");
        hosts.add_host(a.clone(), HostSpec::new(1, 1.0, 1));
        hosts.add_host(b.clone(), HostSpec::new(1, 1.0, 1));
        links.add_link(crate::link::LinkId::new("l"), LinkSpec::new(1000.0, 0.0));
        links.set_route(a.clone(), b.clone(), vec![crate::link::LinkId::new("l")]);
        hosts.turn_off_host(&b);

        let registry = NamedMailboxRegistry::<Ping>::new();
        let (_mailbox, sender) = BoundedMailbox::<Ping>::new(4);
        registry.register("svc", b.clone(), sender);

        let transport = Transport {
            clock: &clock,
            hosts: &hosts,
            links: &links,
            registry: &registry,
            config: &config,
        };

        let err = transport
            .put(&a, "svc", MessageEnvelope::new(Ping))
            .await
            .unwrap_err();
        assert!(matches!(
            err,
            KernelError::NetworkError {
                kind: NetworkErrorKind::DestinationUnreachable,
                ..
            }
        ));
    }

    #[tokio::test]
    async fn put_fails_immediately_when_route_link_is_down() {
        let (clock, hosts, links, config) = setup();
        let a = HostId::new("A");
        let b = HostId::new("B");
        hosts.add_host(a.clone(), HostSpec::new(1, 1.0, 1));
        hosts.add_host(b.clone(), HostSpec::new(1, 1.0, 1));
        links.add_link(crate::link::LinkId::new("l"), LinkSpec::new(1000.0, 0.0));
        links.set_route(a.clone(), b.clone(), vec![crate::link::LinkId::new("l")]);
        links.turn_off_link(&crate::link::LinkId::new("l"));

        let registry = NamedMailboxRegistry::<Ping>::new();
        let (_mailbox, sender) = BoundedMailbox::<Ping>::new(4);
        registry.register("svc", b.clone(), sender);

        let transport = Transport {
            clock: &clock,
            hosts: &hosts,
            links: &links,
            registry: &registry,
            config: &config,
        };

        let err = transport
            .put(&a, "svc", MessageEnvelope::new(Ping))
            .await
            .unwrap_err();
        assert!(matches!(
            err,
            KernelError::NetworkError {
                kind: NetworkErrorKind::LinkDown(_),
                ..
            }
        ));
        assert_eq!(clock.now(), 0.0);
    }

    #[tokio::test]
    async fn recv_without_timeout_waits_for_message() {
        let (clock, _hosts, _links, _config) = setup();
        let (mut mailbox, sender) = BoundedMailbox::<Ping>::new(4);
        sender.send(MessageEnvelope::new(Ping)).await.unwrap();

        let envelope = recv(&clock, &mut mailbox, None, "svc").await.unwrap();
        assert!(matches!(envelope.payload, Ping));
    }

    #[tokio::test]
    async fn recv_with_timeout_fails_when_clock_advances_first() {
        let (clock, _hosts, _links, _config) = setup();
        let (mut mailbox, _sender) = BoundedMailbox::<Ping>::new(4);

        let clock_for_advance = clock.clone();
        let advancer = tokio::spawn(async move {
            tokio::task::yield_now().await;
            clock_for_advance.advance();
        });

        let err = recv(&clock, &mut mailbox, Some(5.0), "svc").await.unwrap_err();
        assert!(matches!(err, KernelError::Timeout { .. }));
        advancer.await.unwrap();
    }
}
