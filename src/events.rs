//! `rangechanged` notifications.
//!
//! Listeners are plain callbacks run synchronously, in subscription order,
//! at the end of every render pass.

use crate::index::MarkerRecord;

/// Payload of a `rangechanged` notification: the markers now visible.
#[derive(Debug)]
pub struct RangeChanged<'a, M> {
    pub visible: Vec<&'a MarkerRecord<M>>,
}

impl<M> RangeChanged<'_, M> {
    pub fn indices(&self) -> Vec<usize> {
        self.visible.iter().map(|record| record.index).collect()
    }

    pub fn len(&self) -> usize {
        self.visible.len()
    }

    pub fn is_empty(&self) -> bool {
        self.visible.is_empty()
    }
}

pub type RangeListener<M> = Box<dyn FnMut(&RangeChanged<'_, M>) + Send>;

/// Token returned by [`RangeEvents::subscribe`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct SubscriptionId(u64);

pub struct RangeEvents<M> {
    listeners: Vec<(SubscriptionId, RangeListener<M>)>,
    next_id: u64,
}

impl<M> Default for RangeEvents<M> {
    fn default() -> Self {
        Self {
            listeners: Vec::new(),
            next_id: 0,
        }
    }
}

impl<M> std::fmt::Debug for RangeEvents<M> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("RangeEvents")
            .field("listeners", &self.listeners.len())
            .finish()
    }
}

impl<M> RangeEvents<M> {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn subscribe(
        &mut self,
        listener: impl FnMut(&RangeChanged<'_, M>) + Send + 'static,
    ) -> SubscriptionId {
        let id = SubscriptionId(self.next_id);
        self.next_id += 1;
        self.listeners.push((id, Box::new(listener)));
        id
    }

    /// Remove a listener. Returns `false` if it was not subscribed.
    pub fn unsubscribe(&mut self, id: SubscriptionId) -> bool {
        let before = self.listeners.len();
        self.listeners.retain(|(listener_id, _)| *listener_id != id);
        self.listeners.len() != before
    }

    pub fn emit(&mut self, event: &RangeChanged<'_, M>) {
        for (_, listener) in self.listeners.iter_mut() {
            listener(event);
        }
    }

    pub fn listener_count(&self) -> usize {
        self.listeners.len()
    }
}
