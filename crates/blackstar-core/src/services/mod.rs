pub mod artist_directory;
pub mod locks;
pub mod media_lifecycle;
pub mod review_service;
pub mod submission_service;

pub use artist_directory::ArtistDirectory;
pub use locks::{ReleaseGuard, ReleaseLocks};
pub use media_lifecycle::{DEFAULT_DELETE_ATTEMPTS, MediaLifecycleManager};
pub use review_service::ReviewService;
pub use submission_service::SubmissionService;
