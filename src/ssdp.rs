//! Bridge search via SSDP multicast.

use std::collections::HashMap;
use std::net::SocketAddr;
use std::time::Duration;

use log::debug;
use serde::{Deserialize, Serialize};

use crate::errors::Error;
use crate::runtime::{self, AsyncUdpSocket, Instant, UdpSocket};

type Result<T> = std::result::Result<T, Error>;

const SSDP_ADDR: &str = "239.255.255.250:1900";

const M_SEARCH: &str = "M-SEARCH * HTTP/1.1\r\n\
HOST: 239.255.255.250:1900\r\n\
MAN: \"ssdp:discover\"\r\n\
MX: 2\r\n\
ST: ssdp:all\r\n\r\n";

const RECV_TIMEOUT: Duration = Duration::from_millis(500);

/// Pause after a failed receive before trying again.
const RECV_RETRY_DELAY: Duration = Duration::from_millis(50);

/// A bridge answering a network search, not yet paired.
#[derive(Debug, Serialize, Deserialize, Clone, PartialEq, Eq)]
pub struct BridgeCandidate {
    /// Network address of the bridge
    pub address: String,
    /// Bridge id from the search response, when advertised
    pub bridge_id: Option<String>,
}

impl BridgeCandidate {
    pub fn new(address: &str) -> Self {
        BridgeCandidate {
            address: address.to_string(),
            bridge_id: None,
        }
    }
}

/// Search the local network for Hue bridges.
///
/// Sends one SSDP `M-SEARCH` and collects answers for `window`. Devices that do
/// not identify as a Hue bridge are ignored, and each address is reported once.
///
/// ```ignore
/// use std::time::Duration;
/// use hue_bridge_rs::search_bridges;
///
/// for candidate in search_bridges(Duration::from_secs(5)).await? {
///     println!("{}", candidate.address);
/// }
/// ```
pub async fn search_bridges(window: Duration) -> Result<Vec<BridgeCandidate>> {
    let socket = UdpSocket::bind("0.0.0.0:0")
        .await
        .map_err(|e| Error::socket("bind", e))?;

    socket
        .send_to(M_SEARCH.as_bytes(), SSDP_ADDR)
        .await
        .map_err(|e| Error::socket("send_to", e))?;

    Ok(collect_answers(&socket, window).await)
}

/// Read search answers from `socket` until `window` has elapsed.
async fn collect_answers<S: AsyncUdpSocket>(socket: &S, window: Duration) -> Vec<BridgeCandidate> {
    let mut found: HashMap<String, BridgeCandidate> = HashMap::new();
    let start = Instant::now();
    let mut buffer = [0u8; 2048];

    while start.elapsed() < window {
        match runtime::timeout(RECV_TIMEOUT, socket.recv_from(&mut buffer)).await {
            Ok(Ok((size, addr))) => {
                let SocketAddr::V4(v4) = addr else { continue };
                let Ok(response) = std::str::from_utf8(&buffer[..size]) else {
                    continue;
                };
                if let Some(bridge_id) = parse_response(response) {
                    let address = v4.ip().to_string();
                    debug!("SSDP answer from bridge {address}");
                    found.insert(
                        address.clone(),
                        BridgeCandidate {
                            address,
                            bridge_id,
                        },
                    );
                }
            }
            Ok(Err(e)) => {
                // some platforms keep failing immediately, e.g. after an ICMP reset
                debug!("SSDP receive failed: {e}");
                runtime::sleep(RECV_RETRY_DELAY).await;
            }
            Err(_) => continue,
        }
    }

    found.into_values().collect()
}

/// Returns `Some(bridge_id)` if the response comes from a Hue bridge.
fn parse_response(response: &str) -> Option<Option<String>> {
    let mut bridge_id = None;
    let mut is_bridge = false;

    for line in response.lines().skip(1) {
        let Some((name, value)) = line.split_once(':') else {
            continue;
        };
        let value = value.trim();
        match name.trim().to_ascii_lowercase().as_str() {
            "hue-bridgeid" => {
                is_bridge = true;
                bridge_id = Some(value.to_string());
            }
            "server" if value.contains("IpBridge") => is_bridge = true,
            _ => {}
        }
    }

    is_bridge.then_some(bridge_id)
}

#[cfg(test)]
mod tests {
    use std::collections::VecDeque;
    use std::io;
    use std::sync::Mutex;
    use std::sync::atomic::{AtomicUsize, Ordering};

    use super::*;

    const BRIDGE_ANSWER: &str = "HTTP/1.1 200 OK\r\nhue-bridgeid: 001788FFFE123456\r\n\r\n";

    /// Socket replaying scripted datagrams, then failing every receive at once.
    #[derive(Default)]
    struct ScriptedSocket {
        answers: Mutex<VecDeque<(&'static str, SocketAddr)>>,
        receives: AtomicUsize,
    }

    impl ScriptedSocket {
        fn answering(answers: Vec<(&'static str, &str)>) -> Self {
            let answers = answers
                .into_iter()
                .map(|(body, from)| (body, from.parse().unwrap()))
                .collect();
            ScriptedSocket {
                answers: Mutex::new(answers),
                ..Self::default()
            }
        }
    }

    impl AsyncUdpSocket for ScriptedSocket {
        async fn bind(_addr: &str) -> io::Result<Self> {
            Ok(Self::default())
        }

        async fn send_to(&self, buf: &[u8], _addr: &str) -> io::Result<usize> {
            Ok(buf.len())
        }

        async fn recv_from(&self, buf: &mut [u8]) -> io::Result<(usize, SocketAddr)> {
            self.receives.fetch_add(1, Ordering::SeqCst);
            let Some((body, from)) = self.answers.lock().unwrap().pop_front() else {
                return Err(io::Error::from(io::ErrorKind::ConnectionReset));
            };
            buf[..body.len()].copy_from_slice(body.as_bytes());
            Ok((body.len(), from))
        }
    }

    #[tokio::test]
    async fn test_collect_dedups_by_address() {
        let socket = ScriptedSocket::answering(vec![
            (BRIDGE_ANSWER, "192.168.1.2:1900"),
            (BRIDGE_ANSWER, "192.168.1.2:1900"),
            ("HTTP/1.1 200 OK\r\nSERVER: Linux UPnP/1.0 Sonos/70.3\r\n\r\n", "192.168.1.9:1900"),
        ]);

        let found = collect_answers(&socket, Duration::from_millis(20)).await;

        assert_eq!(
            found,
            vec![BridgeCandidate {
                address: String::from("192.168.1.2"),
                bridge_id: Some(String::from("001788FFFE123456")),
            }]
        );
    }

    #[tokio::test]
    async fn test_failing_socket_is_not_polled_in_a_busy_loop() {
        let socket = ScriptedSocket::default();

        let found = collect_answers(&socket, Duration::from_millis(200)).await;

        assert!(found.is_empty());
        let receives = socket.receives.load(Ordering::SeqCst);
        assert!(receives <= 6, "{receives} receives in 200ms");
    }

    #[test]
    fn test_parse_bridge_response() {
        let response = "HTTP/1.1 200 OK\r\n\
HOST: 239.255.255.250:1900\r\n\
CACHE-CONTROL: max-age=100\r\n\
LOCATION: http://192.168.1.2:80/description.xml\r\n\
SERVER: Hue/1.0 UPnP/1.0 IpBridge/1.56.0\r\n\
hue-bridgeid: 001788FFFE123456\r\n\
ST: upnp:rootdevice\r\n\r\n";

        assert_eq!(
            parse_response(response),
            Some(Some(String::from("001788FFFE123456")))
        );
    }

    #[test]
    fn test_parse_server_only() {
        let response = "HTTP/1.1 200 OK\r\nSERVER: Linux/3.14.0 UPnP/1.0 IpBridge/1.16.0\r\n\r\n";
        assert_eq!(parse_response(response), Some(None));
    }

    #[test]
    fn test_parse_other_device() {
        let response = "HTTP/1.1 200 OK\r\nSERVER: Linux UPnP/1.0 Sonos/70.3\r\nST: urn:schemas-upnp-org:device:ZonePlayer:1\r\n\r\n";
        assert_eq!(parse_response(response), None);
    }

    #[test]
    fn test_header_names_ignore_case() {
        let response = "HTTP/1.1 200 OK\r\nHUE-BRIDGEID: ABC\r\n\r\n";
        assert_eq!(parse_response(response), Some(Some(String::from("ABC"))));
    }
}
