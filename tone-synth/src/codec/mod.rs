//! TLV320AIC23B codec support.
//!
//! [`registers`] holds the register map and the compiled-in configuration
//! table the bus engine replays. The [`aic23`] driver speaks the same
//! protocol through a hardware I2C peripheral for host-side bring-up.
//!
//! # Feature gate
//!
//! The driver is available when the `aic23` feature is enabled (on by
//! default); the register table is always available.

pub mod registers;

#[cfg(feature = "aic23")]
mod aic23;

#[cfg(feature = "aic23")]
pub use aic23::Aic23;
