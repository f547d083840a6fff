pub mod ecb;
pub mod snapshot;

pub use ecb::EcbProvider;
pub use snapshot::SnapshotWriter;
