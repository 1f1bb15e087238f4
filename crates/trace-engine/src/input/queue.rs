/// Letter navigation requested by the UI layer (buttons, keyboard).
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum NavCommand {
    Next,
    Previous,
    /// Restart the current letter.
    Reset,
    /// Jump to a letter by its identifier.
    Select(char),
}

/// Input event types the tracer understands.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum InputEvent {
    /// A touch/click began at canvas coordinates (x, y).
    PointerDown { x: f32, y: f32 },
    /// A touch/cursor moved to canvas coordinates (x, y).
    PointerMove { x: f32, y: f32 },
    /// A touch/click ended at canvas coordinates (x, y).
    PointerUp { x: f32, y: f32 },
    /// The pointer left the canvas or the touch was cancelled.
    PointerCancel,
    Command(NavCommand),
}

/// A queue of input events.
/// JS writes events into the queue; Rust drains them each tick.
pub struct InputQueue {
    events: Vec<InputEvent>,
}

impl InputQueue {
    pub fn new() -> Self {
        Self {
            events: Vec::with_capacity(32),
        }
    }

    pub fn push(&mut self, event: InputEvent) {
        self.events.push(event);
    }

    /// Drain all pending events. Returns a Vec and clears the queue.
    pub fn drain(&mut self) -> Vec<InputEvent> {
        std::mem::take(&mut self.events)
    }

    pub fn iter(&self) -> impl Iterator<Item = &InputEvent> {
        self.events.iter()
    }

    pub fn is_empty(&self) -> bool {
        self.events.is_empty()
    }

    pub fn len(&self) -> usize {
        self.events.len()
    }
}

impl Default for InputQueue {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn push_and_drain() {
        let mut q = InputQueue::new();
        q.push(InputEvent::PointerDown { x: 10.0, y: 20.0 });
        q.push(InputEvent::PointerCancel);
        assert_eq!(q.len(), 2);
        let events = q.drain();
        assert_eq!(events.len(), 2);
        assert!(q.is_empty());
    }

    #[test]
    fn preserves_order() {
        let mut q = InputQueue::new();
        q.push(InputEvent::Command(NavCommand::Select('B')));
        q.push(InputEvent::PointerMove { x: 1.0, y: 2.0 });
        q.push(InputEvent::Command(NavCommand::Next));
        let events: Vec<_> = q.iter().copied().collect();
        assert_eq!(
            events,
            vec![
                InputEvent::Command(NavCommand::Select('B')),
                InputEvent::PointerMove { x: 1.0, y: 2.0 },
                InputEvent::Command(NavCommand::Next),
            ]
        );
        assert_eq!(q.len(), 3);
    }
}
