//! Resynchronizing link decoder for the 8-character wire protocol.
//!
//! [`PacketDecoder`] sits between a raw byte source (serial stream or the
//! WiFi eye-data endpoint) and the control loop. It buffers incoming bytes
//! in a fixed-capacity deque and exposes a non-blocking [`poll`] that either
//! returns one validated [`MotionCommand`] or reports "no command yet".
//!
//! The recovery rule is deliberately blunt: if the 8 bytes at the head of
//! the buffer fail validation at any position, the *entire* buffer is
//! drained. A single corrupted byte would otherwise shift the frame
//! boundary and poison every subsequent read; dropping the backlog lets the
//! stream realign on the next packet the producer sends.
//!
//! [`poll`]: PacketDecoder::poll

use heapless::Deque;

use crate::packet::{MotionCommand, WIRE_LEN};

/// Capacity of the receive buffer, matching the 64-byte serial FIFO the
/// wired transport provides.
pub const BUFFER_CAPACITY: usize = 64;

/// Non-blocking packet decoder with resynchronization.
///
/// # Example
///
/// ```
/// use rs_plotter::decoder::PacketDecoder;
///
/// let mut decoder = PacketDecoder::new();
///
/// decoder.feed(b"U050");
/// assert!(decoder.poll().is_none()); // incomplete, no state change
///
/// decoder.feed(b"R100");
/// let cmd = decoder.poll().unwrap();
/// assert_eq!(&cmd.encode(), b"U050R100");
/// ```
#[derive(Debug)]
pub struct PacketDecoder {
    buf: Deque<u8, BUFFER_CAPACITY>,
}

impl Default for PacketDecoder {
    fn default() -> Self {
        Self::new()
    }
}

impl PacketDecoder {
    /// Creates an empty decoder.
    pub fn new() -> Self {
        Self { buf: Deque::new() }
    }

    /// Push received bytes into the buffer.
    ///
    /// If the buffer would overflow, the stale backlog is drained first:
    /// the consumer has fallen behind and held bytes no longer describe the
    /// current eye position.
    pub fn feed(&mut self, bytes: &[u8]) {
        for &b in bytes {
            if self.buf.is_full() {
                self.buf.clear();
            }
            // Cannot fail: the deque was cleared if full.
            let _ = self.buf.push_back(b);
        }
    }

    /// Non-blocking poll for one complete command.
    ///
    /// Returns `None` without touching the buffer when fewer than 8 bytes
    /// are available. With 8 or more, the head bytes are validated
    /// positionally: on success exactly 8 bytes are consumed and the
    /// command returned; on any failure the whole buffer is drained and
    /// `None` returned.
    pub fn poll(&mut self) -> Option<MotionCommand> {
        if self.buf.len() < WIRE_LEN {
            return None;
        }

        let mut wire = [0u8; WIRE_LEN];
        for (slot, &b) in wire.iter_mut().zip(self.buf.iter()) {
            *slot = b;
        }

        match MotionCommand::from_wire(&wire) {
            Some(cmd) => {
                for _ in 0..WIRE_LEN {
                    self.buf.pop_front();
                }
                Some(cmd)
            }
            None => {
                self.buf.clear();
                None
            }
        }
    }

    /// Number of bytes currently buffered.
    pub fn buffered(&self) -> usize {
        self.buf.len()
    }

    /// Discard all buffered bytes.
    pub fn clear(&mut self) {
        self.buf.clear();
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn empty_buffer_reports_no_command() {
        let mut decoder = PacketDecoder::new();
        assert!(decoder.poll().is_none());
        assert_eq!(decoder.buffered(), 0);
    }

    #[test]
    fn partial_packet_is_left_buffered() {
        let mut decoder = PacketDecoder::new();
        decoder.feed(b"U050R1");
        assert!(decoder.poll().is_none());
        assert_eq!(decoder.buffered(), 6);
    }

    #[test]
    fn complete_packet_is_consumed() {
        let mut decoder = PacketDecoder::new();
        decoder.feed(b"U050R100");
        let cmd = decoder.poll().unwrap();
        assert_eq!(&cmd.encode(), b"U050R100");
        assert_eq!(decoder.buffered(), 0);
    }

    #[test]
    fn consumes_exactly_eight_bytes() {
        let mut decoder = PacketDecoder::new();
        decoder.feed(b"D200L075U000");
        let cmd = decoder.poll().unwrap();
        assert_eq!(&cmd.encode(), b"D200L075");
        assert_eq!(decoder.buffered(), 4);
    }

    #[test]
    fn back_to_back_packets_decode_in_order() {
        let mut decoder = PacketDecoder::new();
        decoder.feed(b"U050R100D200L075");
        assert_eq!(&decoder.poll().unwrap().encode(), b"U050R100");
        assert_eq!(&decoder.poll().unwrap().encode(), b"D200L075");
        assert!(decoder.poll().is_none());
    }

    #[test]
    fn invalid_byte_drains_whole_buffer() {
        let mut decoder = PacketDecoder::new();
        decoder.feed(b"X050R100U050R100");
        assert!(decoder.poll().is_none());
        assert_eq!(decoder.buffered(), 0);
    }

    #[test]
    fn violation_at_every_position_drains() {
        for pos in 0..WIRE_LEN {
            let mut wire = *b"U050R100";
            wire[pos] = b'?';
            let mut decoder = PacketDecoder::new();
            decoder.feed(&wire);
            decoder.feed(b"trailing");
            assert!(decoder.poll().is_none(), "position {pos}");
            assert_eq!(decoder.buffered(), 0, "position {pos}");
        }
    }

    #[test]
    fn resynchronizes_after_drain() {
        let mut decoder = PacketDecoder::new();
        decoder.feed(b"X050R100");
        assert!(decoder.poll().is_none());

        // Next well-formed packet parses cleanly.
        decoder.feed(b"U050R100");
        let cmd = decoder.poll().unwrap();
        assert_eq!(&cmd.encode(), b"U050R100");
    }

    #[test]
    fn overflow_drops_stale_backlog() {
        let mut decoder = PacketDecoder::new();
        // Fill to capacity with misaligned garbage, then keep feeding.
        decoder.feed(&[b'0'; BUFFER_CAPACITY]);
        decoder.feed(b"U050R100");
        assert_eq!(decoder.buffered(), WIRE_LEN);
        let cmd = decoder.poll().unwrap();
        assert_eq!(&cmd.encode(), b"U050R100");
    }

    #[test]
    fn clear_discards_buffered_bytes() {
        let mut decoder = PacketDecoder::new();
        decoder.feed(b"U050");
        decoder.clear();
        assert_eq!(decoder.buffered(), 0);
        decoder.feed(b"U050R100");
        assert!(decoder.poll().is_some());
    }
}
