//! Editable profile sections.
//!
//! One generic [`SectionController`] drives the add/edit/delete lifecycle of
//! every list-shaped profile section (achievements, contacts, experiences,
//! gallery, links). Each kind plugs in through an [`EntityAdapter`]; the
//! authoritative data lives behind a [`CollectionRemote`].

pub mod adapter;
pub mod confirm;
pub mod controller;
pub mod entities;
pub mod error;
pub mod notify;
pub mod privacy;
pub mod remote;
pub mod store;

pub use adapter::{EntityAdapter, EntityKind, InsertPosition, Mutation};
pub use confirm::{ConfirmationGate, PendingDelete};
pub use controller::{
    FailedCreate, HostRefresh, Outcome, SectionConfig, SectionController, SectionView,
};
pub use entities::*;
pub use error::{Result, SectionError};
pub use notify::{LogNotifier, Notice, Notifier, Operation};
pub use privacy::{render_mode, show_lock, RenderMode, SectionContext, Viewer};
pub use remote::{CollectionRemote, RestCollection};
pub use store::{CollectionStore, Cursor, Phase};
