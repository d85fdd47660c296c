pub mod auto_index;
pub mod streamer;

pub use auto_index::assign_trace_ordinals;
pub use streamer::{CableStats, StreamerGeometry, StreamerShotGeometry, analyze_streamer_headers};
