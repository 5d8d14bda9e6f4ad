//! Privacy gate: decides whether a section renders its items, and whether
//! the viewer may change them.

/// How a section is rendered for the current viewer.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum RenderMode {
    /// Items are hidden behind a lock placeholder; no mutators are reachable.
    Locked,
    /// The owner sees items with add/edit/delete affordances.
    Editable,
    /// Items are visible but cannot be changed.
    ReadOnly,
}

impl RenderMode {
    #[inline]
    pub fn allows_mutation(self) -> bool {
        matches!(self, RenderMode::Editable)
    }
}

/// Relationship of the viewer to the profile being rendered.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Viewer {
    Owner,
    /// Staff or casting accounts allowed past privacy locks.
    Privileged,
    Visitor,
}

/// The host page's lock decision for one section.
pub fn show_lock(is_locked: bool, viewer: Viewer) -> bool {
    is_locked && viewer == Viewer::Visitor
}

/// Maps server lock flags and viewer context onto a render mode.
///
/// `show_lock` wins over everything else, including ownership.
pub fn render_mode(is_locked: bool, show_lock: bool, viewer_is_owner: bool) -> RenderMode {
    if show_lock {
        return RenderMode::Locked;
    }
    if viewer_is_owner {
        return RenderMode::Editable;
    }
    if is_locked {
        tracing::debug!("[Privacy] locked section shown read-only to privileged viewer");
    }
    RenderMode::ReadOnly
}

/// Lock flags and viewer context handed to a section by its host page.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct SectionContext {
    pub is_locked: bool,
    pub show_lock: bool,
    pub viewer_is_owner: bool,
}

impl SectionContext {
    /// The profile owner editing their own section.
    pub fn owner() -> Self {
        Self::for_viewer(false, Viewer::Owner)
    }

    pub fn for_viewer(is_locked: bool, viewer: Viewer) -> Self {
        Self {
            is_locked,
            show_lock: show_lock(is_locked, viewer),
            viewer_is_owner: viewer == Viewer::Owner,
        }
    }

    pub fn render_mode(&self) -> RenderMode {
        render_mode(self.is_locked, self.show_lock, self.viewer_is_owner)
    }
}
