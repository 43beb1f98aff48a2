pub mod blob;
pub mod config;
mod io;

pub use blob::LocalBlobStore;
pub use config::BlobsConfig;
pub use io::{atomic_write, atomic_write_str};
