//! The five concrete section kinds.

mod achievement;
mod contact;
mod experience;
mod gallery;
mod link;

pub use achievement::{Achievement, AchievementAdapter, AchievementRecord};
pub use contact::{ContactAdapter, ContactDetail, ContactKind, ContactRecord};
pub use experience::{Experience, ExperienceAdapter, ExperienceRecord};
pub use gallery::{GalleryAdapter, GalleryImage, GalleryRecord, ImageUpload, IMAGE_FIELD};
pub use link::{LinkRecord, PublicLink, PublicLinkAdapter};
