//! Wire packet format for directional position-error commands.
//!
//! The vision pipeline emits fixed-size 8-character packets describing how
//! far the tracked eye sits from the camera center, one magnitude per axis:
//!
//! ```text
//! <dirV><ddd><dirH><ddd>
//!
//! dirV ∈ {U, D, N}    vertical direction (up / down / neutral)
//! ddd                 three decimal digits, magnitude 0-999
//! dirH ∈ {L, R, N}    horizontal direction (left / right / neutral)
//! ```
//!
//! Examples: `"U050R100"` (up 50, right 100), `"D200L075"` (down 200,
//! left 75), `"N000N000"` (no eye detected).
//!
//! A [`MotionCommand`] is only ever constructed from 8 characters that all
//! pass positional validation; anything else yields `None` and the caller
//! (the [`decoder`](crate::decoder)) resynchronizes the stream.

/// Number of wire characters in one packet.
pub const WIRE_LEN: usize = 8;

/// Vertical component of a motion command.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Default)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(rename_all = "lowercase"))]
pub enum VerticalDirection {
    /// Move the carriage up (positive error).
    Up,
    /// Move the carriage down (negative error).
    Down,
    /// No vertical correction requested.
    #[default]
    Neutral,
}

impl VerticalDirection {
    /// Parse from the packet's first wire character.
    pub const fn from_wire(c: u8) -> Option<Self> {
        match c {
            b'U' => Some(VerticalDirection::Up),
            b'D' => Some(VerticalDirection::Down),
            b'N' => Some(VerticalDirection::Neutral),
            _ => None,
        }
    }

    /// The wire character for this direction.
    pub const fn as_wire(&self) -> u8 {
        match self {
            VerticalDirection::Up => b'U',
            VerticalDirection::Down => b'D',
            VerticalDirection::Neutral => b'N',
        }
    }
}

/// Horizontal component of a motion command.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Default)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(rename_all = "lowercase"))]
pub enum HorizontalDirection {
    /// Move the carriage left (negative error).
    Left,
    /// Move the carriage right (positive error).
    Right,
    /// No horizontal correction requested.
    #[default]
    Neutral,
}

impl HorizontalDirection {
    /// Parse from the packet's fifth wire character.
    pub const fn from_wire(c: u8) -> Option<Self> {
        match c {
            b'L' => Some(HorizontalDirection::Left),
            b'R' => Some(HorizontalDirection::Right),
            b'N' => Some(HorizontalDirection::Neutral),
            _ => None,
        }
    }

    /// The wire character for this direction.
    pub const fn as_wire(&self) -> u8 {
        match self {
            HorizontalDirection::Left => b'L',
            HorizontalDirection::Right => b'R',
            HorizontalDirection::Neutral => b'N',
        }
    }
}

/// Decoded structured form of one 8-character wire packet.
///
/// Constructed exclusively by [`MotionCommand::from_wire`]; the magnitudes
/// are guaranteed to fit in 0..=999 because they come from three validated
/// decimal digits.
///
/// # Example
///
/// ```
/// use rs_plotter::packet::{MotionCommand, VerticalDirection, HorizontalDirection};
///
/// let cmd = MotionCommand::from_wire(b"U050R100").unwrap();
/// assert_eq!(cmd.vertical, VerticalDirection::Up);
/// assert_eq!(cmd.vertical_magnitude, 50);
/// assert_eq!(cmd.horizontal, HorizontalDirection::Right);
/// assert_eq!(cmd.horizontal_magnitude, 100);
/// assert_eq!(&cmd.encode(), b"U050R100");
/// ```
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct MotionCommand {
    /// Vertical direction letter.
    pub vertical: VerticalDirection,
    /// Vertical magnitude (0..=999), unscaled wire value.
    pub vertical_magnitude: u16,
    /// Horizontal direction letter.
    pub horizontal: HorizontalDirection,
    /// Horizontal magnitude (0..=999), unscaled wire value.
    pub horizontal_magnitude: u16,
}

/// Parse three ASCII digits into 0..=999.
fn parse_magnitude(digits: &[u8]) -> Option<u16> {
    let mut value: u16 = 0;
    for &d in digits {
        if !d.is_ascii_digit() {
            return None;
        }
        value = value * 10 + u16::from(d - b'0');
    }
    Some(value)
}

impl MotionCommand {
    /// Validate and decode exactly [`WIRE_LEN`] wire bytes.
    ///
    /// Returns `None` if the slice is not exactly 8 bytes or any position
    /// fails validation; no partial command is ever produced.
    pub fn from_wire(wire: &[u8]) -> Option<Self> {
        if wire.len() != WIRE_LEN {
            return None;
        }
        let vertical = VerticalDirection::from_wire(wire[0])?;
        let vertical_magnitude = parse_magnitude(&wire[1..4])?;
        let horizontal = HorizontalDirection::from_wire(wire[4])?;
        let horizontal_magnitude = parse_magnitude(&wire[5..8])?;
        Some(Self {
            vertical,
            vertical_magnitude,
            horizontal,
            horizontal_magnitude,
        })
    }

    /// Validate and decode an 8-character string (the WiFi JSON path).
    pub fn parse(packet: &str) -> Option<Self> {
        Self::from_wire(packet.as_bytes())
    }

    /// Re-encode to the exact wire bytes this command was decoded from.
    pub fn encode(&self) -> [u8; WIRE_LEN] {
        let mut wire = [0u8; WIRE_LEN];
        wire[0] = self.vertical.as_wire();
        encode_magnitude(self.vertical_magnitude, &mut wire[1..4]);
        wire[4] = self.horizontal.as_wire();
        encode_magnitude(self.horizontal_magnitude, &mut wire[5..8]);
        wire
    }

    /// True when both axes report Neutral (the producer's no-eye sentinel).
    pub const fn is_neutral(&self) -> bool {
        matches!(self.vertical, VerticalDirection::Neutral)
            && matches!(self.horizontal, HorizontalDirection::Neutral)
    }
}

fn encode_magnitude(value: u16, out: &mut [u8]) {
    out[0] = b'0' + (value / 100 % 10) as u8;
    out[1] = b'0' + (value / 10 % 10) as u8;
    out[2] = b'0' + (value % 10) as u8;
}
