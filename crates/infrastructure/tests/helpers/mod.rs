#![allow(dead_code)]
use hickory_proto::op::{Message, MessageType, OpCode, Query, ResponseCode};
use hickory_proto::rr::rdata::A;
use hickory_proto::rr::{Name, RData, Record, RecordType};
use hickory_proto::serialize::binary::{BinEncodable, BinEncoder};
use sift_dns_domain::UpstreamEndpoint;
use sift_dns_infrastructure::dns::dispatcher::Upstream;
use sift_dns_infrastructure::dns::events::{OutcomeReporter, QueryCounters, QueryEventEmitter};
use sift_dns_infrastructure::dns::transport::{https::HttpsTransport, Transport};
use std::net::{Ipv4Addr, SocketAddr};
use std::str::FromStr;
use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::Arc;
use tokio::io::{AsyncReadExt, AsyncWriteExt};
use tokio::net::{TcpListener, TcpStream, UdpSocket};

pub const MOCK_ANSWER: Ipv4Addr = Ipv4Addr::new(93, 184, 216, 34);

pub fn query(name: &str, record_type: RecordType, id: u16) -> Message {
    let mut message = Message::new();
    message
        .set_id(id)
        .set_message_type(MessageType::Query)
        .set_op_code(OpCode::Query)
        .set_recursion_desired(true);
    message.add_query(Query::query(Name::from_str(name).unwrap(), record_type));
    message
}

/// Upstream-style reply with one A record per address.
pub fn answer(request: &Message, addrs: &[Ipv4Addr], ttl: u32, code: ResponseCode) -> Message {
    let mut response = Message::new();
    response
        .set_id(request.id())
        .set_message_type(MessageType::Response)
        .set_op_code(OpCode::Query)
        .set_recursion_desired(request.recursion_desired())
        .set_recursion_available(true)
        .set_response_code(code);
    response.add_queries(request.queries().iter().cloned());

    if let Some(query) = request.queries().first() {
        for addr in addrs {
            response.add_answer(Record::from_rdata(
                query.name().clone(),
                ttl,
                RData::A(A::from(*addr)),
            ));
        }
    }
    response
}

pub fn to_bytes(message: &Message) -> Vec<u8> {
    let mut buf = Vec::new();
    let mut encoder = BinEncoder::new(&mut buf);
    message.emit(&mut encoder).unwrap();
    buf
}

pub fn reporter() -> (OutcomeReporter, Arc<QueryCounters>) {
    let counters = Arc::new(QueryCounters::new());
    let reporter = OutcomeReporter::new(Arc::clone(&counters), QueryEventEmitter::new_disabled());
    (reporter, counters)
}

#[derive(Debug, Clone, Copy)]
pub enum Behavior {
    /// Answers every query with `MOCK_ANSWER` and the given TTL.
    Answer { ttl: u32 },
    /// Answers with NXDOMAIN and no records.
    NxDomain,
    /// Never replies.
    Silent,
    /// Replies with bytes that do not decode as DNS.
    Garbage,
    /// Replies with a valid answer carrying the wrong transaction id.
    WrongId,
}

fn reply_for(behavior: Behavior, packet: &[u8]) -> Option<Vec<u8>> {
    let request = Message::from_vec(packet).ok()?;
    match behavior {
        Behavior::Answer { ttl } => Some(to_bytes(&answer(
            &request,
            &[MOCK_ANSWER],
            ttl,
            ResponseCode::NoError,
        ))),
        Behavior::NxDomain => Some(to_bytes(&answer(&request, &[], 0, ResponseCode::NXDomain))),
        Behavior::Silent => None,
        Behavior::Garbage => Some(vec![0xde, 0xad, 0xbe, 0xef]),
        Behavior::WrongId => {
            let mut response = answer(&request, &[MOCK_ANSWER], 60, ResponseCode::NoError);
            response.set_id(request.id().wrapping_add(1));
            Some(to_bytes(&response))
        }
    }
}

/// UDP upstream on `127.0.0.1:0` that counts every request it receives.
pub struct MockUdpUpstream {
    addr: SocketAddr,
    requests: Arc<AtomicUsize>,
}

impl MockUdpUpstream {
    pub async fn start(behavior: Behavior) -> Self {
        let socket = UdpSocket::bind("127.0.0.1:0").await.unwrap();
        let addr = socket.local_addr().unwrap();
        let requests = Arc::new(AtomicUsize::new(0));
        let counter = Arc::clone(&requests);

        tokio::spawn(async move {
            let mut buf = vec![0u8; 4096];
            while let Ok((len, peer)) = socket.recv_from(&mut buf).await {
                counter.fetch_add(1, Ordering::SeqCst);
                if let Some(reply) = reply_for(behavior, &buf[..len]) {
                    let _ = socket.send_to(&reply, peer).await;
                }
            }
        });

        Self { addr, requests }
    }

    pub fn addr(&self) -> SocketAddr {
        self.addr
    }

    pub fn requests(&self) -> usize {
        self.requests.load(Ordering::SeqCst)
    }

    pub fn endpoint(&self) -> UpstreamEndpoint {
        UpstreamEndpoint::Udp { addr: self.addr }
    }

    pub fn upstream(&self) -> Arc<Upstream> {
        Arc::new(Upstream::connect(self.endpoint()).unwrap())
    }
}

/// Plain HTTP/1.1 DoH responder. A non-200 `status` fails every request.
pub struct MockDohServer {
    url: String,
    requests: Arc<AtomicUsize>,
}

impl MockDohServer {
    pub async fn start(status: u16) -> Self {
        let listener = TcpListener::bind("127.0.0.1:0").await.unwrap();
        let url = format!("http://{}/dns-query", listener.local_addr().unwrap());
        let requests = Arc::new(AtomicUsize::new(0));
        let counter = Arc::clone(&requests);

        tokio::spawn(async move {
            while let Ok((stream, _)) = listener.accept().await {
                let counter = Arc::clone(&counter);
                tokio::spawn(async move {
                    let _ = serve_http(stream, status, &counter).await;
                });
            }
        });

        Self { url, requests }
    }

    pub fn url(&self) -> &str {
        &self.url
    }

    pub fn requests(&self) -> usize {
        self.requests.load(Ordering::SeqCst)
    }

    pub fn upstream(&self) -> Arc<Upstream> {
        let endpoint = UpstreamEndpoint::Https {
            url: self.url.clone(),
        };
        let transport = Transport::Https(HttpsTransport::new(self.url.clone()));
        Arc::new(Upstream::with_transport(endpoint, transport))
    }
}

async fn serve_http(
    mut stream: TcpStream,
    status: u16,
    counter: &AtomicUsize,
) -> std::io::Result<()> {
    let mut buf = Vec::new();
    let mut chunk = [0u8; 1024];

    let header_end = loop {
        let read = stream.read(&mut chunk).await?;
        if read == 0 {
            return Ok(());
        }
        buf.extend_from_slice(&chunk[..read]);
        if let Some(pos) = buf.windows(4).position(|w| w == b"\r\n\r\n") {
            break pos + 4;
        }
    };

    let headers = String::from_utf8_lossy(&buf[..header_end]).to_ascii_lowercase();
    let content_length = headers
        .lines()
        .find_map(|line| line.strip_prefix("content-length:"))
        .and_then(|value| value.trim().parse::<usize>().ok())
        .unwrap_or(0);

    while buf.len() < header_end + content_length {
        let read = stream.read(&mut chunk).await?;
        if read == 0 {
            break;
        }
        buf.extend_from_slice(&chunk[..read]);
    }
    counter.fetch_add(1, Ordering::SeqCst);

    let reply = match reply_for(Behavior::Answer { ttl: 60 }, &buf[header_end..]) {
        Some(body) if status == 200 => {
            let mut out = format!(
                "HTTP/1.1 200 OK\r\nContent-Type: application/dns-message\r\nContent-Length: {}\r\nConnection: close\r\n\r\n",
                body.len()
            )
            .into_bytes();
            out.extend_from_slice(&body);
            out
        }
        _ => format!(
            "HTTP/1.1 {} Error\r\nContent-Length: 0\r\nConnection: close\r\n\r\n",
            if status == 200 { 400 } else { status }
        )
        .into_bytes(),
    };

    stream.write_all(&reply).await?;
    stream.shutdown().await
}

/// TCP listener behind a `dns+tls://` endpoint that accepts connections and
/// never answers the TLS handshake.
pub struct StalledTlsServer {
    addr: SocketAddr,
    accepted: Arc<AtomicUsize>,
}

impl StalledTlsServer {
    pub async fn start() -> Self {
        let listener = TcpListener::bind("127.0.0.1:0").await.unwrap();
        let addr = listener.local_addr().unwrap();
        let accepted = Arc::new(AtomicUsize::new(0));
        let counter = Arc::clone(&accepted);

        tokio::spawn(async move {
            let mut held = Vec::new();
            while let Ok((stream, _)) = listener.accept().await {
                counter.fetch_add(1, Ordering::SeqCst);
                held.push(stream);
            }
        });

        Self { addr, accepted }
    }

    pub fn addr(&self) -> SocketAddr {
        self.addr
    }

    pub fn accepted(&self) -> usize {
        self.accepted.load(Ordering::SeqCst)
    }

    pub fn upstream(&self) -> Arc<Upstream> {
        let endpoint = UpstreamEndpoint::Tls {
            addr: self.addr,
            server_name: None,
        };
        Arc::new(Upstream::connect(endpoint).unwrap())
    }
}
