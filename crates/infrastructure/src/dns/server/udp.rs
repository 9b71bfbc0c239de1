use super::{respond_guarded, DnsServer};
use crate::dns::forwarding::MessageBuilder;
use hickory_proto::op::Message;
use sift_dns_domain::DomainError;
use std::net::SocketAddr;
use std::sync::Arc;
use tokio::net::UdpSocket;
use tracing::warn;

const MAX_REQUEST_SIZE: usize = 4096;

pub(super) async fn serve(server: Arc<DnsServer>, socket: Arc<UdpSocket>) -> Result<(), DomainError> {
    let mut buf = vec![0u8; MAX_REQUEST_SIZE];

    loop {
        let (len, peer) = match socket.recv_from(&mut buf).await {
            Ok(received) => received,
            Err(e) => {
                // ICMP port-unreachable from an earlier reply surfaces here on some platforms
                warn!(error = %e, "UDP receive failed");
                continue;
            }
        };

        let packet = buf[..len].to_vec();
        let server = Arc::clone(&server);
        let socket = Arc::clone(&socket);

        tokio::spawn(async move {
            if let Some(response) = server.answer(&packet).await {
                respond_guarded(write_response(&socket, peer, &response)).await;
            }
        });
    }
}

async fn write_response(
    socket: &UdpSocket,
    peer: SocketAddr,
    response: &Message,
) -> Result<(), DomainError> {
    let bytes = MessageBuilder::serialize(response)?;
    socket.send_to(&bytes, peer).await?;
    Ok(())
}
