//! UDP and TCP listeners in front of the request pipeline.
//!
//! Every inbound query gets its own task. Two panic boundaries apply:
//! - writing the response: the panic is logged and the query goes unanswered
//! - evaluating the pipeline: the fault is fatal, see [`FatalFaultHandler`]

pub mod fatal;
pub mod tcp;
pub mod udp;

pub use fatal::FatalFaultHandler;

use crate::dns::pipeline::QueryPipeline;
use futures::FutureExt;
use hickory_proto::op::Message;
use sift_dns_domain::DomainError;
use std::any::Any;
use std::future::Future;
use std::net::SocketAddr;
use std::panic::AssertUnwindSafe;
use std::sync::Arc;
use tokio::net::{TcpListener, UdpSocket};
use tracing::{debug, error, info};

/// Sockets the server listens on, bound before the server starts.
pub struct Listeners {
    pub udp: UdpSocket,
    pub tcp: TcpListener,
}

impl Listeners {
    pub async fn bind(addr: SocketAddr) -> Result<Self, DomainError> {
        let udp = UdpSocket::bind(addr).await.map_err(|e| {
            DomainError::IoError(format!("Failed to bind UDP listener on {}: {}", addr, e))
        })?;
        // Port 0 resolves here; TCP follows whatever UDP got.
        let addr = udp.local_addr()?;
        info!(bind_address = %addr, protocol = "UDP", "DNS server listening");

        let tcp = TcpListener::bind(addr).await.map_err(|e| {
            DomainError::IoError(format!("Failed to bind TCP listener on {}: {}", addr, e))
        })?;
        info!(bind_address = %addr, protocol = "TCP", "DNS server listening");

        Ok(Self { udp, tcp })
    }

    pub fn local_addr(&self) -> Result<SocketAddr, DomainError> {
        Ok(self.udp.local_addr()?)
    }
}

pub struct DnsServer {
    pipeline: Arc<QueryPipeline>,
    fatal: Arc<FatalFaultHandler>,
}

impl DnsServer {
    pub fn new(pipeline: Arc<QueryPipeline>, fatal: Arc<FatalFaultHandler>) -> Self {
        Self { pipeline, fatal }
    }

    /// Serves both listeners until one of them fails.
    pub async fn run(self: Arc<Self>, listeners: Listeners) -> Result<(), DomainError> {
        info!("DNS server ready to accept queries");
        tokio::try_join!(
            udp::serve(Arc::clone(&self), Arc::new(listeners.udp)),
            tcp::serve(Arc::clone(&self), listeners.tcp),
        )?;
        Ok(())
    }

    /// Decodes and evaluates one request. Undecodable packets yield `None`.
    ///
    /// A panic inside the pipeline does not return.
    pub(crate) async fn answer(&self, packet: &[u8]) -> Option<Message> {
        let request = match Message::from_vec(packet) {
            Ok(request) => request,
            Err(e) => {
                debug!(error = %e, bytes = packet.len(), "Dropping undecodable request");
                return None;
            }
        };

        match AssertUnwindSafe(self.pipeline.evaluate(&request))
            .catch_unwind()
            .await
        {
            Ok(decision) => Some(decision.into_response()),
            Err(panic) => self.fatal.abort(&panic_message(panic.as_ref())),
        }
    }
}

/// Runs a response write, containing any panic it raises.
pub(crate) async fn respond_guarded<F>(write: F)
where
    F: Future<Output = Result<(), DomainError>>,
{
    match AssertUnwindSafe(write).catch_unwind().await {
        Ok(Ok(())) => {}
        Ok(Err(e)) => error!(error = %e, "Error while responding to request"),
        Err(panic) => error!(
            panic = %panic_message(panic.as_ref()),
            "Caught panic while responding to request"
        ),
    }
}

pub(crate) fn panic_message(panic: &(dyn Any + Send)) -> String {
    if let Some(message) = panic.downcast_ref::<&str>() {
        (*message).to_string()
    } else if let Some(message) = panic.downcast_ref::<String>() {
        message.clone()
    } else {
        "unknown panic".to_string()
    }
}
