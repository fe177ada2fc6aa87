//! Checkpoint I/O
//!
//! Saves and loads optimizer configuration, optimizer state and parameter
//! values together so a run can be resumed bit for bit.

mod checkpoint;
mod format;
mod load;
mod save;


pub use checkpoint::Checkpoint;
pub use format::CheckpointFormat;
pub use load::load_checkpoint;
pub use save::save_checkpoint;
