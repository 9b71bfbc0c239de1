use super::{respond_guarded, DnsServer};
use crate::dns::forwarding::MessageBuilder;
use hickory_proto::op::Message;
use sift_dns_domain::DomainError;
use std::sync::Arc;
use std::time::Duration;
use tokio::io::{AsyncReadExt, AsyncWriteExt};
use tokio::net::tcp::OwnedWriteHalf;
use tokio::net::{TcpListener, TcpStream};
use tracing::{debug, warn};

/// Connections with no complete request for this long are closed.
const IDLE_TIMEOUT: Duration = Duration::from_secs(10);

pub(super) async fn serve(server: Arc<DnsServer>, listener: TcpListener) -> Result<(), DomainError> {
    loop {
        let (stream, peer) = match listener.accept().await {
            Ok(accepted) => accepted,
            Err(e) => {
                warn!(error = %e, "TCP accept failed");
                continue;
            }
        };

        debug!(peer = %peer, "TCP connection accepted");
        tokio::spawn(handle_connection(Arc::clone(&server), stream));
    }
}

/// Serves length-prefixed requests on one connection, one after the other.
async fn handle_connection(server: Arc<DnsServer>, stream: TcpStream) {
    let _ = stream.set_nodelay(true);
    let (mut reader, mut writer) = stream.into_split();

    loop {
        let read = async {
            let len = reader.read_u16().await? as usize;
            let mut packet = vec![0u8; len];
            reader.read_exact(&mut packet).await?;
            Ok::<_, std::io::Error>(packet)
        };

        let packet = match tokio::time::timeout(IDLE_TIMEOUT, read).await {
            Ok(Ok(packet)) => packet,
            Ok(Err(_)) | Err(_) => break,
        };

        if let Some(response) = server.answer(&packet).await {
            respond_guarded(write_response(&mut writer, &response)).await;
        }
    }
}

async fn write_response(writer: &mut OwnedWriteHalf, response: &Message) -> Result<(), DomainError> {
    let bytes = MessageBuilder::serialize(response)?;
    let len = u16::try_from(bytes.len()).map_err(|_| {
        DomainError::InvalidDnsResponse(format!("response too large for TCP: {} bytes", bytes.len()))
    })?;

    let mut framed = Vec::with_capacity(bytes.len() + 2);
    framed.extend_from_slice(&len.to_be_bytes());
    framed.extend_from_slice(&bytes);
    writer.write_all(&framed).await?;
    Ok(())
}
