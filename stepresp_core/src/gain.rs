//! Proportional gain (Kp) as a validated newtype.
//!
//! Two distinct parse policies live side by side on purpose:
//! - [`Kp::parse`] rejects anything that is not a finite positive real and
//!   carries the offending literal. The target uses this and aborts its
//!   run-loop on failure.
//! - [`GainReply::resolve`] silently substitutes a fallback. The host uses
//!   this at its input boundary before the handshake begins; a usable input
//!   keeps its original literal for the wire.

use std::fmt;

use thiserror::Error;

/// Gain used by the host when its input is not a positive real.
pub const DEFAULT_KP: f32 = 0.01;

/// Rejected gain input, carrying the literal that failed.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
#[error("incorrect input for Kp value: {input:?} (must be a positive nonzero number)")]
pub struct InvalidGain {
    pub input: String,
}

/// Proportional gain. Invariant: finite and strictly positive.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Kp(f32);

impl Kp {
    /// Validate a raw value. NaN, infinities, zero and negatives are rejected.
    pub fn new(value: f32) -> Result<Self, InvalidGain> {
        if value.is_finite() && value > 0.0 {
            Ok(Self(value))
        } else {
            Err(InvalidGain {
                input: value.to_string(),
            })
        }
    }

    /// Strict parse: the target-side policy.
    pub fn parse(input: &str) -> Result<Self, InvalidGain> {
        let trimmed = input.trim();
        match trimmed.parse::<f32>() {
            Ok(v) if v.is_finite() && v > 0.0 => Ok(Self(v)),
            _ => Err(InvalidGain {
                input: trimmed.to_string(),
            }),
        }
    }

    /// Lenient parse: the host-side policy with the built-in fallback.
    /// Anything that does not parse as a finite positive real becomes
    /// [`DEFAULT_KP`].
    pub fn parse_or_default(input: &str) -> Self {
        GainReply::resolve(input, Self(DEFAULT_KP)).kp()
    }

    #[inline]
    pub fn get(self) -> f32 {
        self.0
    }
}

/// A gain as the host will answer the prompt with it: the validated value
/// plus the exact text that goes on the wire. A usable input keeps its
/// original literal, so `0.1000` crosses the wire as typed.
#[derive(Debug, Clone, PartialEq)]
pub struct GainReply {
    kp: Kp,
    text: String,
}

impl GainReply {
    /// The host-boundary policy: a finite positive input is forwarded
    /// verbatim, anything else is rendered from `fallback`.
    pub fn resolve(input: &str, fallback: Kp) -> Self {
        match Kp::parse(input) {
            Ok(kp) => Self {
                kp,
                text: input.trim().to_owned(),
            },
            Err(_) => Self::from(fallback),
        }
    }

    #[inline]
    pub fn kp(&self) -> Kp {
        self.kp
    }

    /// The line answered to the gain prompt, without its terminator.
    #[inline]
    pub fn text(&self) -> &str {
        &self.text
    }
}

impl From<Kp> for GainReply {
    fn from(kp: Kp) -> Self {
        Self {
            kp,
            text: kp.to_string(),
        }
    }
}

impl fmt::Display for Kp {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn strict_accepts_positive_reals() {
        assert_eq!(Kp::parse("0.05").unwrap().get(), 0.05);
        assert_eq!(Kp::parse(" 2 ").unwrap().get(), 2.0);
    }

    #[test]
    fn strict_rejects_and_keeps_literal() {
        for bad in ["0", "-1.5", "abc", "", "nan", "inf"] {
            let err = Kp::parse(bad).unwrap_err();
            assert_eq!(err.input, bad.trim());
        }
    }

    #[test]
    fn lenient_substitutes_default() {
        assert_eq!(Kp::parse_or_default("garbage").get(), DEFAULT_KP);
        assert_eq!(Kp::parse_or_default("-3").get(), DEFAULT_KP);
        assert_eq!(Kp::parse_or_default("0.06").get(), 0.06);
    }

    #[test]
    fn reply_keeps_usable_literal_verbatim() {
        let fallback = Kp::new(0.05).unwrap();
        let reply = GainReply::resolve("0.1000", fallback);
        assert_eq!(reply.text(), "0.1000");
        assert_eq!(reply.kp().get(), 0.1);
    }

    #[test]
    fn reply_renders_fallback_for_unusable_input() {
        let fallback = Kp::new(0.05).unwrap();
        for bad in ["garbage", "-3", "", "0"] {
            let reply = GainReply::resolve(bad, fallback);
            assert_eq!(reply.text(), "0.05");
            assert_eq!(reply.kp(), fallback);
        }
    }

    #[test]
    fn new_rejects_non_finite() {
        assert!(Kp::new(f32::NAN).is_err());
        assert!(Kp::new(f32::INFINITY).is_err());
        assert!(Kp::new(0.0).is_err());
        assert!(Kp::new(1.0).is_ok());
    }
}
