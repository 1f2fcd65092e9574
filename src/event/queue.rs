use std::collections::VecDeque;

use super::OverlayEvent;

/// First-in, first-out queue of pending overlay events.
///
/// Input handlers push onto it while a frame is being processed; the app then
/// drains it into the overlay so that every event is handled to completion,
/// in arrival order, before the next one.
pub struct EventQueue<S> {
    events: VecDeque<OverlayEvent<S>>,
}

impl<S> std::fmt::Debug for EventQueue<S> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("EventQueue")
            .field("events", &format!("<{} pending>", self.events.len()))
            .finish()
    }
}

impl<S> Default for EventQueue<S> {
    fn default() -> Self {
        Self::new()
    }
}

impl<S> EventQueue<S> {
    pub fn new() -> Self {
        Self {
            events: VecDeque::new(),
        }
    }

    pub fn push(&mut self, event: OverlayEvent<S>) {
        self.events.push_back(event);
    }

    pub fn pop(&mut self) -> Option<OverlayEvent<S>> {
        self.events.pop_front()
    }

    pub fn len(&self) -> usize {
        self.events.len()
    }

    pub fn is_empty(&self) -> bool {
        self.events.is_empty()
    }
}

impl<S> Extend<OverlayEvent<S>> for EventQueue<S> {
    fn extend<I: IntoIterator<Item = OverlayEvent<S>>>(&mut self, iter: I) {
        self.events.extend(iter);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use egui::Pos2;

    #[test]
    fn pops_in_arrival_order() {
        let mut queue: EventQueue<()> = EventQueue::new();
        queue.push(OverlayEvent::PointerDown(Pos2::new(1.0, 1.0)));
        queue.extend([OverlayEvent::PointerMove(Pos2::new(2.0, 2.0)), OverlayEvent::PointerUp]);

        assert_eq!(queue.len(), 3);
        assert_eq!(queue.pop().map(|e| e.name()), Some("PointerDown"));
        assert_eq!(queue.pop().map(|e| e.name()), Some("PointerMove"));
        assert_eq!(queue.pop().map(|e| e.name()), Some("PointerUp"));
        assert!(queue.pop().is_none());
        assert!(queue.is_empty());
    }
}
