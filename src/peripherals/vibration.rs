//! Vibration motor interface
//!
//! The motor driver lives in the firmware; the face only asks for pulses.

/// Something that can buzz the wearer's wrist
pub trait Haptics {
    /// Pulse the motor once.
    fn pulse_once(&mut self);
}

impl<H: Haptics + ?Sized> Haptics for &mut H {
    fn pulse_once(&mut self) {
        (**self).pulse_once()
    }
}
