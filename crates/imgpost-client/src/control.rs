//! Handles to the two controls the upload handler is wired to: the file
//! input it reads from and the submit control it listens on.

use std::sync::atomic::{AtomicU32, AtomicU64, Ordering};
use std::sync::{Arc, RwLock};

use tokio::sync::mpsc;

use imgpost_core::FileSelection;

/// Source of the current file selection, read at activation time.
pub trait FileInput: Send + Sync {
    fn selection(&self) -> FileSelection;
}

impl FileInput for FileSelection {
    fn selection(&self) -> FileSelection {
        self.clone()
    }
}

/// A file-input widget whose selection can be replaced by the user between
/// activations.
#[derive(Debug, Default)]
pub struct FileInputControl {
    selection: RwLock<FileSelection>,
}

impl FileInputControl {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn select(&self, selection: FileSelection) {
        match self.selection.write() {
            Ok(mut guard) => *guard = selection,
            Err(poisoned) => *poisoned.into_inner() = selection,
        }
    }

    pub fn clear(&self) {
        self.select(FileSelection::empty());
    }
}

impl FileInput for FileInputControl {
    fn selection(&self) -> FileSelection {
        match self.selection.read() {
            Ok(guard) => guard.clone(),
            Err(poisoned) => poisoned.into_inner().clone(),
        }
    }
}

/// One user activation of the submit control.
///
/// Clones share the same state, so whoever fired the activation can observe
/// whether its default action was suppressed.
#[derive(Debug, Clone)]
pub struct Activation {
    id: u64,
    prevented: Arc<AtomicU32>,
}

impl Activation {
    fn new(id: u64) -> Self {
        Self {
            id,
            prevented: Arc::new(AtomicU32::new(0)),
        }
    }

    pub fn id(&self) -> u64 {
        self.id
    }

    /// Suppress the default submission (no navigation, no reload).
    pub fn prevent_default(&self) {
        self.prevented.fetch_add(1, Ordering::SeqCst);
    }

    pub fn default_prevented(&self) -> bool {
        self.prevent_count() > 0
    }

    pub fn prevent_count(&self) -> u32 {
        self.prevented.load(Ordering::SeqCst)
    }
}

/// The submit control. Every call to [`SubmitControl::activate`] delivers one
/// activation to whoever holds the matching [`ActivationStream`].
#[derive(Debug, Clone)]
pub struct SubmitControl {
    tx: mpsc::UnboundedSender<Activation>,
    next_id: Arc<AtomicU64>,
}

#[derive(Debug)]
pub struct ActivationStream {
    rx: mpsc::UnboundedReceiver<Activation>,
}

impl SubmitControl {
    pub fn new() -> (Self, ActivationStream) {
        let (tx, rx) = mpsc::unbounded_channel();
        let control = Self {
            tx,
            next_id: Arc::new(AtomicU64::new(1)),
        };
        (control, ActivationStream { rx })
    }

    /// Fire an activation. Returns `None` once nothing listens any more.
    pub fn activate(&self) -> Option<Activation> {
        let id = self.next_id.fetch_add(1, Ordering::Relaxed);
        let activation = Activation::new(id);
        self.tx.send(activation.clone()).ok()?;
        Some(activation)
    }
}

impl ActivationStream {
    /// Next activation, or `None` when every control handle is dropped.
    pub async fn next(&mut self) -> Option<Activation> {
        self.rx.recv().await
    }
}
