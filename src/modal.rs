//! Exclusive project detail view.

use std::{mem, time::Duration};

use tracing::debug;

use crate::{
    catalog::{DevOpsProjectRecord, ImageRef, ProjectRecord},
    gallery::{Gallery, GalleryTick, TickSource},
};

/// The record shown in the detail view.
#[derive(Debug, Clone, Copy)]
pub enum Inspected {
    Project(&'static ProjectRecord),
    DevOps(&'static DevOpsProjectRecord),
}

impl Inspected {
    pub const fn id(self) -> &'static str {
        match self {
            Self::Project(p) => p.id,
            Self::DevOps(d) => d.id,
        }
    }

    pub const fn title(self) -> &'static str {
        match self {
            Self::Project(p) => p.title,
            Self::DevOps(d) => d.title,
        }
    }

    /// Gallery images. DevOps records have none.
    pub const fn images(self) -> &'static [ImageRef] {
        match self {
            Self::Project(p) => p.images,
            Self::DevOps(_) => &[],
        }
    }
}

impl PartialEq for Inspected {
    fn eq(&self, other: &Self) -> bool {
        matches!(
            (self, other),
            (Self::Project(_), Self::Project(_)) | (Self::DevOps(_), Self::DevOps(_))
        ) && self.id() == other.id()
    }
}

impl Eq for Inspected {}

/// Page-level scrolling, disabled while a modal is open.
pub trait ScrollLock {
    fn lock(&mut self);
    fn unlock(&mut self);
}

pub enum ModalState {
    Closed,
    Open { record: Inspected, gallery: Gallery },
}

/// What a click landed on while the modal is showing.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ModalClick {
    Backdrop,
    CloseButton,
    Content,
}

/// At most one open detail view; the scroll lock follows the open state.
pub struct Modal<L> {
    state: ModalState,
    lock: L,
    ticks: TickSource,
    interval: Duration,
}

impl<L: ScrollLock> Modal<L> {
    pub const fn new(lock: L, ticks: TickSource, interval: Duration) -> Self {
        Self {
            state: ModalState::Closed,
            lock,
            ticks,
            interval,
        }
    }

    /// Open `record` with a fresh gallery at index 0. An already open modal
    /// is closed first.
    pub fn open(&mut self, record: Inspected) {
        self.close();
        let gallery = Gallery::new(record.images().len(), self.ticks.clone(), self.interval);
        self.state = ModalState::Open { record, gallery };
        self.lock.lock();
        debug!(record = record.id(), "Modal opened");
    }

    /// Close the modal; no-op when closed.
    pub fn close(&mut self) {
        if let ModalState::Open { record, .. } = mem::replace(&mut self.state, ModalState::Closed) {
            self.lock.unlock();
            debug!(record = record.id(), "Modal closed");
        }
    }

    /// Route a click. Only the backdrop and the close control dismiss.
    pub fn click(&mut self, target: ModalClick) {
        match target {
            ModalClick::Backdrop | ModalClick::CloseButton => self.close(),
            ModalClick::Content => {}
        }
    }

    pub const fn is_open(&self) -> bool {
        matches!(self.state, ModalState::Open { .. })
    }

    pub const fn current(&self) -> Option<Inspected> {
        match &self.state {
            ModalState::Open { record, .. } => Some(*record),
            ModalState::Closed => None,
        }
    }

    pub const fn gallery(&self) -> Option<&Gallery> {
        match &self.state {
            ModalState::Open { gallery, .. } => Some(gallery),
            ModalState::Closed => None,
        }
    }

    pub fn gallery_mut(&mut self) -> Option<&mut Gallery> {
        match &mut self.state {
            ModalState::Open { gallery, .. } => Some(gallery),
            ModalState::Closed => None,
        }
    }

    /// Forward a timer tick to the open gallery, if any.
    pub fn on_tick(&mut self, tick: GalleryTick) -> bool {
        self.gallery_mut().is_some_and(|g| g.on_tick(tick))
    }

    #[cfg(test)]
    pub const fn scroll_lock(&self) -> &L {
        &self.lock
    }

    pub fn scroll_lock_mut(&mut self) -> &mut L {
        &mut self.lock
    }
}
