#![allow(dead_code)]
use ferrous_resolve_domain::{Header, Message, Record};
use std::io::{Read, Write};
use std::net::{SocketAddr, TcpListener, TcpStream, UdpSocket};
use std::sync::atomic::{AtomicBool, AtomicUsize, Ordering};
use std::sync::Arc;
use std::thread::{self, JoinHandle};
use std::time::Duration;

const POLL_INTERVAL: Duration = Duration::from_millis(20);

type Handler = dyn Fn(&[u8]) -> Option<Vec<u8>> + Send + Sync;

/// Name server stand-in running on a background thread.
///
/// The handler receives each request exactly as sent (without the TCP length
/// prefix) and returns the bytes to write back; `None` means stay silent.
/// TCP replies are written verbatim, so handlers frame them with [`frame`].
pub struct MockDnsServer {
    addr: SocketAddr,
    hits: Arc<AtomicUsize>,
    stop: Arc<AtomicBool>,
    worker: Option<JoinHandle<()>>,
}

impl MockDnsServer {
    pub fn udp<F>(handler: F) -> Self
    where
        F: Fn(&[u8]) -> Option<Vec<u8>> + Send + Sync + 'static,
    {
        let socket = UdpSocket::bind("127.0.0.1:0").unwrap();
        Self::serve_udp(socket, Arc::new(handler))
    }

    pub fn tcp<F>(handler: F) -> Self
    where
        F: Fn(&[u8]) -> Option<Vec<u8>> + Send + Sync + 'static,
    {
        let listener = TcpListener::bind("127.0.0.1:0").unwrap();
        Self::serve_tcp(listener, Arc::new(handler))
    }

    /// UDP and TCP servers sharing one port, as a real name server does.
    pub fn pair<U, T>(udp_handler: U, tcp_handler: T) -> (Self, Self)
    where
        U: Fn(&[u8]) -> Option<Vec<u8>> + Send + Sync + 'static,
        T: Fn(&[u8]) -> Option<Vec<u8>> + Send + Sync + 'static,
    {
        let listener = TcpListener::bind("127.0.0.1:0").unwrap();
        let socket = UdpSocket::bind(listener.local_addr().unwrap()).unwrap();
        (
            Self::serve_udp(socket, Arc::new(udp_handler)),
            Self::serve_tcp(listener, Arc::new(tcp_handler)),
        )
    }

    fn serve_udp(socket: UdpSocket, handler: Arc<Handler>) -> Self {
        let addr = socket.local_addr().unwrap();
        socket.set_read_timeout(Some(POLL_INTERVAL)).unwrap();
        let hits = Arc::new(AtomicUsize::new(0));
        let stop = Arc::new(AtomicBool::new(false));

        let worker = {
            let hits = hits.clone();
            let stop = stop.clone();
            thread::spawn(move || {
                let mut buf = vec![0u8; 4096];
                while !stop.load(Ordering::Relaxed) {
                    if let Ok((len, peer)) = socket.recv_from(&mut buf) {
                        hits.fetch_add(1, Ordering::SeqCst);
                        if let Some(reply) = handler(&buf[..len]) {
                            let _ = socket.send_to(&reply, peer);
                        }
                    }
                }
            })
        };

        Self {
            addr,
            hits,
            stop,
            worker: Some(worker),
        }
    }

    fn serve_tcp(listener: TcpListener, handler: Arc<Handler>) -> Self {
        let addr = listener.local_addr().unwrap();
        listener.set_nonblocking(true).unwrap();
        let hits = Arc::new(AtomicUsize::new(0));
        let stop = Arc::new(AtomicBool::new(false));

        let worker = {
            let hits = hits.clone();
            let stop = stop.clone();
            thread::spawn(move || {
                while !stop.load(Ordering::Relaxed) {
                    match listener.accept() {
                        Ok((stream, _)) => {
                            hits.fetch_add(1, Ordering::SeqCst);
                            let _ = handle_tcp(stream, &*handler);
                        }
                        Err(_) => thread::sleep(POLL_INTERVAL),
                    }
                }
            })
        };

        Self {
            addr,
            hits,
            stop,
            worker: Some(worker),
        }
    }

    pub fn addr(&self) -> SocketAddr {
        self.addr
    }

    pub fn hits(&self) -> usize {
        self.hits.load(Ordering::SeqCst)
    }
}

impl Drop for MockDnsServer {
    fn drop(&mut self) {
        self.stop.store(true, Ordering::Relaxed);
        if let Some(worker) = self.worker.take() {
            let _ = worker.join();
        }
    }
}

fn handle_tcp(mut stream: TcpStream, handler: &Handler) -> std::io::Result<()> {
    stream.set_nonblocking(false)?;
    stream.set_read_timeout(Some(Duration::from_secs(2)))?;

    let mut len_buf = [0u8; 2];
    stream.read_exact(&mut len_buf)?;
    let mut request = vec![0u8; u16::from_be_bytes(len_buf) as usize];
    stream.read_exact(&mut request)?;

    if let Some(reply) = handler(&request) {
        stream.write_all(&reply)?;
        stream.flush()?;
    }
    Ok(())
}

pub fn frame(message: &[u8]) -> Vec<u8> {
    let mut framed = (message.len() as u16).to_be_bytes().to_vec();
    framed.extend_from_slice(message);
    framed
}

/// Builds a response to `request` carrying `answers`.
pub fn answer(request: &[u8], answers: Vec<Record>, truncated: bool) -> Vec<u8> {
    let request = Message::parse_request(request).unwrap();
    let header = Header {
        truncated,
        recursion_available: true,
        ..*request.header()
    };
    Message::response(header, request.questions().to_vec(), answers, vec![], vec![])
        .to_bytes()
        .unwrap()
        .to_vec()
}

pub fn with_id(mut message: Vec<u8>, id: u16) -> Vec<u8> {
    message[..2].copy_from_slice(&id.to_be_bytes());
    message
}
