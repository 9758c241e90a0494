use crate::codec::PropertyWriter;
use crate::info::{View, ViewSet};

/// A property writer as seen under an active view.
///
/// An unconditional entry is written under every view. A guarded entry is
/// written only when the active view is, or derives from, one of its views.
#[derive(Clone, Debug)]
pub struct ViewGuardedWriter {
    writer: PropertyWriter,
    views: Option<ViewSet>,
}

impl ViewGuardedWriter {
    #[inline]
    pub fn unconditional(writer: PropertyWriter) -> Self {
        Self {
            writer,
            views: None,
        }
    }

    #[inline]
    pub fn guarded(writer: PropertyWriter, views: ViewSet) -> Self {
        Self {
            writer,
            views: Some(views),
        }
    }

    #[inline]
    pub fn writer(&self) -> &PropertyWriter {
        &self.writer
    }

    #[inline]
    pub fn views(&self) -> Option<&ViewSet> {
        self.views.as_ref()
    }

    #[inline]
    pub fn is_guarded(&self) -> bool {
        self.views.is_some()
    }

    /// Returns `true` if the writer is written while `active` is selected.
    pub fn admits(&self, active: &View) -> bool {
        match &self.views {
            Some(views) => views.admits(active),
            None => true,
        }
    }
}
