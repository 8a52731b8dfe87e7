//! Host and network diagnostics behind the `net` subcommand.
//!
//! [`Diagnostics`] owns one blocking HTTP client, built once from the
//! `[diagnostics]` config section. Host lookups ([`hostname`], [`username`],
//! [`mac_address`], [`local_ipv4`], [`reverse_dns`]) need no client.

use crate::config::DiagnosticsConfig;
use mac_address::MacAddress;
use std::io::{self, Read};
use std::net::{IpAddr, Ipv4Addr, UdpSocket};
use std::time::{Duration, Instant};
use thiserror::Error;

/// Any routable address works; the socket is connected, never written to.
const ROUTE_TARGET: &str = "8.8.8.8:80";

#[derive(Error, Debug)]
pub enum DiagnosticsError {
    #[error("Failed to build HTTP client: {0}")]
    Client(String),
    #[error("Request timed out after {0}s")]
    Timeout(u64),
    #[error("Connection failed: {0}")]
    Connect(String),
    #[error("Request failed: {0}")]
    Request(String),
    #[error("Server answered {0}")]
    Status(u16),
    #[error("{0} is not available on this host")]
    NotAvailable(&'static str),
    #[error("{what} lookup failed: {reason}")]
    Lookup { what: &'static str, reason: String },
    #[error("No host name for {ip}: {source}")]
    ReverseDns { ip: IpAddr, source: io::Error },
    #[error("IO error: {0}")]
    Io(#[from] io::Error),
}

/// Result of a download speed test.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Throughput {
    pub bytes: u64,
    pub elapsed: Duration,
    pub mbps: f64,
}

/// Megabits per second for `bytes` moved in `elapsed`.
///
/// A zero duration yields `0.0` rather than infinity.
pub fn throughput_mbps(bytes: u64, elapsed: Duration) -> f64 {
    let secs = elapsed.as_secs_f64();
    if secs == 0.0 {
        return 0.0;
    }
    (bytes as f64 * 8.0) / (secs * 1_000_000.0)
}

pub struct Diagnostics {
    client: reqwest::blocking::Client,
    config: DiagnosticsConfig,
}

impl Diagnostics {
    pub fn new(config: &DiagnosticsConfig) -> Result<Self, DiagnosticsError> {
        let client = reqwest::blocking::Client::builder()
            .timeout(Duration::from_secs(config.timeout_secs))
            .build()
            .map_err(|e| DiagnosticsError::Client(e.to_string()))?;
        Ok(Self {
            client,
            config: config.clone(),
        })
    }

    /// Public address as reported by `external_ip_url`.
    pub fn external_ip(&self) -> Result<String, DiagnosticsError> {
        let response = self.get(&self.config.external_ip_url)?;
        let body = response.text().map_err(|e| self.map_reqwest_error(e))?;
        Ok(body.trim().to_string())
    }

    /// Download `speedtest_url` to the end and time it.
    pub fn speed_test(&self) -> Result<Throughput, DiagnosticsError> {
        let start = Instant::now();
        let mut response = self.get(&self.config.speedtest_url)?;
        let bytes = drain(&mut response)?;
        let elapsed = start.elapsed();
        let mbps = throughput_mbps(bytes, elapsed);
        log::info!(
            "speed test: {} bytes in {:.2}s ({:.2} Mbps)",
            bytes,
            elapsed.as_secs_f64(),
            mbps
        );
        Ok(Throughput {
            bytes,
            elapsed,
            mbps,
        })
    }

    fn get(&self, url: &str) -> Result<reqwest::blocking::Response, DiagnosticsError> {
        log::debug!("GET {}", url);
        let response = self
            .client
            .get(url)
            .send()
            .map_err(|e| self.map_reqwest_error(e))?;
        let status = response.status();
        if !status.is_success() {
            return Err(DiagnosticsError::Status(status.as_u16()));
        }
        Ok(response)
    }

    fn map_reqwest_error(&self, e: reqwest::Error) -> DiagnosticsError {
        if e.is_timeout() {
            DiagnosticsError::Timeout(self.config.timeout_secs)
        } else if e.is_connect() {
            DiagnosticsError::Connect(e.to_string())
        } else {
            DiagnosticsError::Request(e.to_string())
        }
    }
}

/// Read a body to the end, counting bytes without keeping them.
fn drain(reader: &mut impl Read) -> Result<u64, DiagnosticsError> {
    Ok(io::copy(reader, &mut io::sink())?)
}

/// Host name as the operating system reports it.
pub fn hostname() -> Result<String, DiagnosticsError> {
    let name = gethostname::gethostname()
        .into_string()
        .map_err(|raw| DiagnosticsError::Lookup {
            what: "hostname",
            reason: format!("not valid UTF-8: {:?}", raw),
        })?;
    let name = name.trim();
    if name.is_empty() {
        return Err(DiagnosticsError::NotAvailable("hostname"));
    }
    Ok(name.to_string())
}

/// Account name of the user running the process.
pub fn username() -> Result<String, DiagnosticsError> {
    let name = whoami::fallible::username().map_err(|e| DiagnosticsError::Lookup {
        what: "user name",
        reason: e.to_string(),
    })?;
    let name = name.trim();
    if name.is_empty() {
        return Err(DiagnosticsError::NotAvailable("user name"));
    }
    Ok(name.to_string())
}

/// Hardware address of the first network interface that has one.
pub fn mac_address() -> Result<MacAddress, DiagnosticsError> {
    mac_address::get_mac_address()
        .map_err(|e| DiagnosticsError::Lookup {
            what: "MAC address",
            reason: e.to_string(),
        })?
        .ok_or(DiagnosticsError::NotAvailable("a MAC address"))
}

/// Host name registered for `ip`, via the system resolver.
pub fn reverse_dns(ip: IpAddr) -> Result<String, DiagnosticsError> {
    log::debug!("reverse lookup {}", ip);
    dns_lookup::lookup_addr(&ip).map_err(|source| DiagnosticsError::ReverseDns { ip, source })
}

/// IPv4 address of the interface that carries the default route.
pub fn local_ipv4() -> Result<Ipv4Addr, DiagnosticsError> {
    let socket = UdpSocket::bind((Ipv4Addr::UNSPECIFIED, 0))?;
    socket
        .connect(ROUTE_TARGET)
        .map_err(|_| DiagnosticsError::NotAvailable("a routable IPv4 interface"))?;
    match socket.local_addr()?.ip() {
        IpAddr::V4(ip) if !ip.is_loopback() && !ip.is_unspecified() => Ok(ip),
        _ => Err(DiagnosticsError::NotAvailable("a routable IPv4 interface")),
    }
}
