//! Protocol decode dispatch
//!
//! Each channel has an ordered array of decoder functions sharing one
//! contract: take the captured interval buffer, return a structural match
//! or `None` without mutating anything. The dispatcher tries them in
//! order; the first match wins. When nothing matches, the capture is kept
//! as a raw signal with a deep copy of the buffer, so an unknown remote
//! can still be replayed and saved.

pub mod ir;
pub mod subghz;

pub use ir::{decode_ir, IrDecode, IR_DECODERS};
pub use subghz::{decode_subghz, SubGhzDecode, SUBGHZ_DECODERS};
