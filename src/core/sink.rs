//! Sink trait for log output destinations
//!
//! A sink is an opaque write target: it receives fully rendered lines plus
//! their severity and owns everything past that point (buffering, rotation,
//! shipping). The core never looks inside.

use super::{error::Result, record::RenderedRecord};

pub trait Sink: Send + Sync {
    fn write(&mut self, record: &RenderedRecord) -> Result<()>;
    fn flush(&mut self) -> Result<()>;
    fn name(&self) -> &str;
}
