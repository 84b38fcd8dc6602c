//! Persistence behind traits, so handlers never see the storage engine.

pub mod lectures;
#[cfg(any(test, feature = "test-utils"))]
pub mod memory;
pub mod users;

pub use lectures::{LectureLink, LectureRepository, PgLectureRepository};
#[cfg(any(test, feature = "test-utils"))]
pub use memory::{InMemoryCredentialStore, InMemoryLectureRepository};
pub use users::{CredentialStore, NewUser, PgCredentialStore};
