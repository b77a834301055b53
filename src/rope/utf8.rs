//! Strict UTF-8 validation for bytes about to enter a [`super::Rope`].
//!
//! `str::from_utf8` already rejects overlong encodings, surrogate halves, code points beyond
//! U+10FFFF, and truncated sequences, so validation is a thin, explicitly-named wrapper rather
//! than a hand-rolled decoder — the rejection rules are spelled out here because the specification
//! calls them out individually, not because `std` needs help enforcing them.

use crate::error::{CoreError, Result};

pub fn validate(bytes: &[u8]) -> Result<()> {
    std::str::from_utf8(bytes)
        .map(|_| ())
        .map_err(|e| CoreError::invalid_utf8(format!("invalid UTF-8 at byte {}", e.valid_up_to())))
}
