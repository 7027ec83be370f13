pub mod rtdb;
pub mod surface;

pub use rtdb::{FetchError, RtdbClient};
pub use surface::{Chart, MemorySurface, Surface, TerminalSurface};
