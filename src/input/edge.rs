// Edge detector for the timing key
// A report fires once per discrete press; holding the key is a no-op

/// Key state (released/pressed)
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum KeyState {
    #[default]
    Released,
    Pressed,
}

/// Two-state edge detector.
///
/// `update` is fed the raw held-down state every tick and returns true only
/// on the Released -> Pressed transition. Pressed -> Pressed is a no-op, so
/// a held key reports nothing until it is released and pressed again.
#[derive(Debug, Clone, Default)]
pub struct EdgeDetector {
    state: KeyState,
}

impl EdgeDetector {
    pub fn new() -> Self {
        Self {
            state: KeyState::Released,
        }
    }

    /// Feed the current held-down state; true on a fresh press edge.
    pub fn update(&mut self, is_down: bool) -> bool {
        match (self.state, is_down) {
            (KeyState::Released, true) => {
                self.state = KeyState::Pressed;
                true
            }
            (KeyState::Pressed, false) => {
                self.state = KeyState::Released;
                false
            }
            _ => false,
        }
    }

    /// Current debounced state
    pub fn state(&self) -> KeyState {
        self.state
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_press_edge_fires_once() {
        let mut edge = EdgeDetector::new();

        assert!(edge.update(true)); // Released -> Pressed
        assert!(!edge.update(true)); // still held, suppressed
        assert!(!edge.update(true));
        assert_eq!(edge.state(), KeyState::Pressed);
    }

    #[test]
    fn test_release_rearms() {
        let mut edge = EdgeDetector::new();

        assert!(edge.update(true));
        assert!(!edge.update(false)); // release never reports
        assert_eq!(edge.state(), KeyState::Released);
        assert!(edge.update(true)); // fresh press fires again
    }

    #[test]
    fn test_idle_stays_silent() {
        let mut edge = EdgeDetector::new();

        for _ in 0..10 {
            assert!(!edge.update(false));
        }
        assert_eq!(edge.state(), KeyState::Released);
    }
}
