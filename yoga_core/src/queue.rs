use crossbeam_channel::{unbounded, Receiver, Sender};

/// Unbounded multi-producer queue drained by the thread that owns the session.
///
/// Producers either share the queue or take a [`sender`](Self::sender) to
/// another thread; the owner pops without blocking.
pub struct EventQueue<T> {
    sender: Sender<T>,
    receiver: Receiver<T>,
}

impl<T> EventQueue<T> {
    pub fn new() -> Self {
        let (sender, receiver) = unbounded();
        Self { sender, receiver }
    }

    pub fn push(&self, item: T) {
        // The receiver lives in `self`, so the channel cannot be disconnected.
        let _ = self.sender.send(item);
    }

    /// Returns `None` when nothing is waiting.
    pub fn pop(&self) -> Option<T> {
        self.receiver.try_recv().ok()
    }

    /// Everything queued right now, oldest first. Items pushed while iterating
    /// are picked up too.
    pub fn drain(&self) -> impl Iterator<Item = T> + '_ {
        self.receiver.try_iter()
    }

    pub fn len(&self) -> usize {
        self.receiver.len()
    }

    pub fn is_empty(&self) -> bool {
        self.receiver.is_empty()
    }

    pub fn sender(&self) -> Sender<T> {
        self.sender.clone()
    }
}

impl<T> Default for EventQueue<T> {
    fn default() -> Self {
        Self::new()
    }
}
