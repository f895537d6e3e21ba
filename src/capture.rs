//! Signal capture
//!
//! Two layers: [`sampler`] records inter-edge intervals from an interrupt
//! context into a fixed buffer, and [`session`] runs the polled state
//! machine that arms the sampler, watches for line quiet, and hands the
//! finished buffer to the decoders.

pub mod sampler;
pub mod session;

pub use sampler::{EdgeSampler, Sample};
pub use session::{CaptureError, CaptureSession};
