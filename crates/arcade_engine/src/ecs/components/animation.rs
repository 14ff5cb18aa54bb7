//! Animation requests waiting for the render sync system

use crate::ecs::Component;

/// Queue of animations to play on the entity's render handle
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct AnimationComponent {
    pending: Vec<String>,
    current: Option<String>,
}

impl AnimationComponent {
    /// Create an empty animation queue
    pub fn new() -> Self {
        Self::default()
    }

    /// Create a queue starting with one animation
    pub fn playing(name: impl Into<String>) -> Self {
        let mut animation = Self::new();
        animation.play(name);
        animation
    }

    /// Request an animation; it starts on the next render sync
    pub fn play(&mut self, name: impl Into<String>) {
        self.pending.push(name.into());
    }

    /// Animation most recently handed to the render engine
    pub fn current(&self) -> Option<&str> {
        self.current.as_deref()
    }

    /// Whether requests are waiting for render sync
    pub fn has_pending(&self) -> bool {
        !self.pending.is_empty()
    }

    /// Take pending requests in request order, marking the last as current
    pub fn drain(&mut self) -> Vec<String> {
        let drained = std::mem::take(&mut self.pending);
        if let Some(last) = drained.last() {
            self.current = Some(last.clone());
        }
        drained
    }
}

impl Component for AnimationComponent {}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_drain_updates_current() {
        let mut animation = AnimationComponent::playing("idle");
        animation.play("hit");

        assert_eq!(animation.drain(), vec!["idle".to_string(), "hit".to_string()]);
        assert_eq!(animation.current(), Some("hit"));
        assert!(!animation.has_pending());
        assert!(animation.drain().is_empty());
        assert_eq!(animation.current(), Some("hit"));
    }
}
