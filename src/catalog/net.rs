//! Network checks: loopback sockets and IPv4 netmask arithmetic.

use anyhow::{Context, Result};
use std::io::{Read, Write};
use std::net::{Ipv4Addr, TcpListener, TcpStream, UdpSocket};
use std::time::Duration;

use crate::core::case::{TestCase, TestMethod};

const IO_TIMEOUT: Duration = Duration::from_secs(2);

/// Prefix length of a contiguous netmask, `None` for masks with holes.
pub fn prefix_len(netmask: Ipv4Addr) -> Option<u8> {
    let bits = u32::from(netmask);
    let ones = bits.leading_ones();
    if bits.checked_shl(ones).unwrap_or(0) == 0 {
        Some(ones as u8)
    } else {
        None
    }
}

/// Broadcast address of `addr` inside a network of the given prefix length.
pub fn broadcast_addr(addr: Ipv4Addr, prefix: u8) -> Ipv4Addr {
    let host_mask = u32::MAX.checked_shr(u32::from(prefix)).unwrap_or(0);
    Ipv4Addr::from(u32::from(addr) | host_mask)
}

#[derive(Default)]
pub struct TestNet;

impl TestCase for TestNet {
    const NAME: &'static str = "TestNet";

    fn tests() -> Vec<(&'static str, TestMethod<Self>)> {
        vec![
            ("test_udp_loopback", Self::test_udp_loopback),
            ("test_tcp_loopback", Self::test_tcp_loopback),
            ("test_prefix_len", Self::test_prefix_len),
            ("test_broadcast_addr", Self::test_broadcast_addr),
        ]
    }
}

impl TestNet {
    fn test_udp_loopback(&mut self) -> Result<()> {
        let receiver = UdpSocket::bind((Ipv4Addr::LOCALHOST, 0)).context("bind receiver")?;
        receiver.set_read_timeout(Some(IO_TIMEOUT))?;
        let sender = UdpSocket::bind((Ipv4Addr::LOCALHOST, 0)).context("bind sender")?;

        sender.send_to(b"mpm", receiver.local_addr()?)?;
        let mut buf = [0u8; 16];
        let (len, from) = receiver.recv_from(&mut buf)?;

        assert_eq!(&buf[..len], b"mpm");
        assert_eq!(from, sender.local_addr()?);
        Ok(())
    }

    fn test_tcp_loopback(&mut self) -> Result<()> {
        let listener = TcpListener::bind((Ipv4Addr::LOCALHOST, 0)).context("bind listener")?;
        let addr = listener.local_addr()?;
        assert_ne!(addr.port(), 0);

        let mut client = TcpStream::connect(addr)?;
        client.write_all(b"ping")?;
        let (mut server, _) = listener.accept()?;
        server.set_read_timeout(Some(IO_TIMEOUT))?;

        let mut buf = [0u8; 4];
        server.read_exact(&mut buf)?;
        assert_eq!(&buf, b"ping");
        Ok(())
    }

    fn test_prefix_len(&mut self) -> Result<()> {
        assert_eq!(prefix_len(Ipv4Addr::new(255, 255, 255, 0)), Some(24));
        assert_eq!(prefix_len(Ipv4Addr::new(255, 255, 255, 255)), Some(32));
        assert_eq!(prefix_len(Ipv4Addr::new(0, 0, 0, 0)), Some(0));
        assert_eq!(prefix_len(Ipv4Addr::new(255, 0, 255, 0)), None);
        Ok(())
    }

    fn test_broadcast_addr(&mut self) -> Result<()> {
        let addr = Ipv4Addr::new(192, 168, 10, 2);
        assert_eq!(broadcast_addr(addr, 24), Ipv4Addr::new(192, 168, 10, 255));
        assert_eq!(broadcast_addr(addr, 16), Ipv4Addr::new(192, 168, 255, 255));
        assert_eq!(broadcast_addr(addr, 32), addr);
        Ok(())
    }
}
