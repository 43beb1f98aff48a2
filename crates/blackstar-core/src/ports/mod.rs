pub mod blob_store;
pub mod release_repository;

pub use blob_store::{BlobError, BlobStore};
pub use release_repository::{RegisteredArtist, ReleaseRepository, RepoError};
