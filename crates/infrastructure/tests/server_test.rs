use hickory_proto::op::{Message, ResponseCode};
use hickory_proto::rr::RecordType;
use sift_dns_infrastructure::dns::block_filter::{BlockList, GlobBlacklist};
use sift_dns_infrastructure::dns::cache::ResponseCache;
use sift_dns_infrastructure::dns::dispatcher::QueryDispatcher;
use sift_dns_infrastructure::dns::pipeline::QueryPipeline;
use sift_dns_infrastructure::dns::server::{DnsServer, FatalFaultHandler, Listeners};
use sift_dns_infrastructure::system::NoopSystemDns;
use std::net::SocketAddr;
use std::sync::Arc;
use std::time::Duration;
use tokio::io::{AsyncReadExt, AsyncWriteExt};
use tokio::net::{TcpStream, UdpSocket};

mod helpers;
use helpers::{query, reporter, to_bytes, Behavior, MockUdpUpstream};

async fn start_server(upstream: &MockUdpUpstream) -> SocketAddr {
    let (reporter, _) = reporter();
    let pipeline = QueryPipeline::new(
        Arc::new(ResponseCache::new(2048, 30)),
        Arc::new(BlockList::new()),
        Arc::new(GlobBlacklist::new(&["wpad.*".to_string()]).unwrap()),
        QueryDispatcher::new(Duration::from_millis(500), reporter.clone()),
        vec![upstream.upstream()],
        reporter,
    );
    let server = Arc::new(DnsServer::new(
        Arc::new(pipeline),
        Arc::new(FatalFaultHandler::new(Arc::new(NoopSystemDns))),
    ));

    let listeners = Listeners::bind("127.0.0.1:0".parse().unwrap())
        .await
        .unwrap();
    let addr = listeners.local_addr().unwrap();
    tokio::spawn(server.run(listeners));
    addr
}

async fn udp_exchange(server: SocketAddr, packet: &[u8]) -> Option<Message> {
    let socket = UdpSocket::bind("127.0.0.1:0").await.unwrap();
    socket.send_to(packet, server).await.unwrap();

    let mut buf = vec![0u8; 4096];
    let received = tokio::time::timeout(Duration::from_secs(2), socket.recv_from(&mut buf)).await;
    match received {
        Ok(Ok((len, _))) => Some(Message::from_vec(&buf[..len]).unwrap()),
        _ => None,
    }
}

#[tokio::test]
async fn test_udp_query_is_answered() {
    // Arrange
    let upstream = MockUdpUpstream::start(Behavior::Answer { ttl: 60 }).await;
    let server = start_server(&upstream).await;

    // Act
    let response = udp_exchange(server, &to_bytes(&query("example.com.", RecordType::A, 4242)))
        .await
        .unwrap();

    // Assert
    assert_eq!(response.id(), 4242);
    assert_eq!(response.response_code(), ResponseCode::NoError);
    assert_eq!(response.answers().len(), 1);
}

#[tokio::test]
async fn test_undecodable_datagram_is_dropped_and_server_keeps_serving() {
    let upstream = MockUdpUpstream::start(Behavior::Answer { ttl: 60 }).await;
    let server = start_server(&upstream).await;

    let garbage = udp_exchange(server, &[0x01, 0x02, 0x03]).await;
    let valid = udp_exchange(server, &to_bytes(&query("example.com.", RecordType::A, 9))).await;

    assert!(garbage.is_none());
    assert_eq!(valid.map(|m| m.id()), Some(9));
}

#[tokio::test]
async fn test_tcp_connection_serves_several_framed_queries() {
    // Arrange
    let upstream = MockUdpUpstream::start(Behavior::Answer { ttl: 60 }).await;
    let server = start_server(&upstream).await;
    let mut stream = TcpStream::connect(server).await.unwrap();

    for id in [1u16, 2] {
        // Act
        let packet = to_bytes(&query("example.com.", RecordType::A, id));
        stream.write_u16(packet.len() as u16).await.unwrap();
        stream.write_all(&packet).await.unwrap();

        let len = stream.read_u16().await.unwrap() as usize;
        let mut buf = vec![0u8; len];
        stream.read_exact(&mut buf).await.unwrap();

        // Assert
        let response = Message::from_vec(&buf).unwrap();
        assert_eq!(response.id(), id);
        assert_eq!(response.answers().len(), 1);
    }

    // The second answer came from the cache.
    assert_eq!(upstream.requests(), 1);
}

#[tokio::test]
async fn test_blacklisted_name_is_answered_locally_over_udp() {
    let upstream = MockUdpUpstream::start(Behavior::Answer { ttl: 60 }).await;
    let server = start_server(&upstream).await;

    let response = udp_exchange(server, &to_bytes(&query("wpad.lan.", RecordType::A, 5)))
        .await
        .unwrap();

    assert!(response.authoritative());
    assert_eq!(response.answers()[0].ttl(), 2);
    assert_eq!(upstream.requests(), 0);
}
