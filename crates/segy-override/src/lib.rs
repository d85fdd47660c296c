pub mod command;
pub mod engine;

pub use command::{CHANNELS_PER_CABLE, CHUNKSIZE, OverrideCommand};
pub use engine::GridOverrider;
