//! Mapping from a decoded [`MotionCommand`] to signed per-axis errors.
//!
//! Sign convention: positive vertical error means "up", positive horizontal
//! error means "right"; the magnitudes are the unscaled wire values.
//!
//! The all-Neutral packet is the producer's "no eye detected" sentinel and
//! gets a fixed substitution instead of `(0, 0)`: a gentle upward nudge
//! that walks the carriage back toward its home position until tracking
//! resumes. The pair must stay exactly `(+100, 0)`: the vision side and
//! the LED-feedback variant both assume it.

use crate::packet::{HorizontalDirection, MotionCommand, VerticalDirection};

/// Synthetic error pair substituted for the all-Neutral sentinel.
pub const HOME_NUDGE: (f32, f32) = (100.0, 0.0);

/// Convert a command into signed `(err_v, err_h)` errors.
///
/// A Neutral direction on a single axis contributes zero error for that
/// axis; only the both-Neutral sentinel triggers [`HOME_NUDGE`].
///
/// # Example
///
/// ```
/// use rs_plotter::error_map::axis_errors;
/// use rs_plotter::packet::MotionCommand;
///
/// let cmd = MotionCommand::from_wire(b"D200L075").unwrap();
/// assert_eq!(axis_errors(&cmd), (-200.0, -75.0));
///
/// let sentinel = MotionCommand::from_wire(b"N000N000").unwrap();
/// assert_eq!(axis_errors(&sentinel), (100.0, 0.0));
/// ```
pub fn axis_errors(cmd: &MotionCommand) -> (f32, f32) {
    if cmd.is_neutral() {
        return HOME_NUDGE;
    }

    let err_v = match cmd.vertical {
        VerticalDirection::Up => f32::from(cmd.vertical_magnitude),
        VerticalDirection::Down => -f32::from(cmd.vertical_magnitude),
        VerticalDirection::Neutral => 0.0,
    };
    let err_h = match cmd.horizontal {
        HorizontalDirection::Right => f32::from(cmd.horizontal_magnitude),
        HorizontalDirection::Left => -f32::from(cmd.horizontal_magnitude),
        HorizontalDirection::Neutral => 0.0,
    };
    (err_v, err_h)
}
