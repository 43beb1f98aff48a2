pub mod document;
pub mod draft;
pub mod genre;
pub mod ids;
pub mod media;
pub mod release;
pub mod release_type;
pub mod status;

pub use document::{ReleaseDocument, TrackDocument};
pub use draft::{Attachment, ImageAttachment, ReleaseDraft, TrackDraft};
pub use genre::Genre;
pub use ids::{ReleaseId, TrackId};
pub use media::{AudioFingerprint, MediaRef, StoredMedia};
pub use release::{DownloadLog, FileType, Release, ReleasePatch, Track};
pub use release_type::ReleaseType;
pub use status::{Checklist, ReleaseStatus, derive_status};
