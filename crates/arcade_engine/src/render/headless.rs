//! Headless render engine
//!
//! Keeps sprite state in memory. Used by the demo binary and by tests that
//! need to observe what the simulation asked the render engine to do.

use super::{RenderEngine, RenderHandle};
use crate::foundation::math::Vec2;
use std::sync::{Arc, Mutex, MutexGuard, PoisonError};

/// Observable state of a headless sprite
#[derive(Debug, Clone, PartialEq)]
pub struct SpriteSnapshot {
    /// Visual key the sprite was created with
    pub visual_key: String,
    /// Horizontal position
    pub x: f32,
    /// Vertical position
    pub y: f32,
    /// Rotation in radians
    pub rotation: f32,
    /// Velocity in units per second
    pub velocity: Vec2,
    /// Animations played, oldest first
    pub animations: Vec<String>,
    /// Whether the sprite has been destroyed
    pub destroyed: bool,
}

type SharedSprite = Arc<Mutex<SpriteSnapshot>>;

fn lock(sprite: &SharedSprite) -> MutexGuard<'_, SpriteSnapshot> {
    sprite.lock().unwrap_or_else(PoisonError::into_inner)
}

struct HeadlessSprite {
    state: SharedSprite,
}

impl RenderHandle for HeadlessSprite {
    fn x(&self) -> f32 {
        lock(&self.state).x
    }

    fn y(&self) -> f32 {
        lock(&self.state).y
    }

    fn set_position(&mut self, x: f32, y: f32) {
        let mut state = lock(&self.state);
        state.x = x;
        state.y = y;
    }

    fn rotation(&self) -> f32 {
        lock(&self.state).rotation
    }

    fn set_rotation(&mut self, rotation: f32) {
        lock(&self.state).rotation = rotation;
    }

    fn velocity(&self) -> Vec2 {
        lock(&self.state).velocity
    }

    fn set_velocity(&mut self, velocity: Vec2) {
        lock(&self.state).velocity = velocity;
    }

    fn play_animation(&mut self, name: &str) {
        lock(&self.state).animations.push(name.to_string());
    }

    fn destroy(&mut self) {
        lock(&self.state).destroyed = true;
    }

    fn is_active(&self) -> bool {
        !lock(&self.state).destroyed
    }
}

/// In-memory render engine
#[derive(Default)]
pub struct HeadlessRenderer {
    sprites: Vec<SharedSprite>,
}

impl HeadlessRenderer {
    /// Create an empty headless renderer
    pub fn new() -> Self {
        Self::default()
    }

    /// Snapshots of every sprite ever created, in creation order
    pub fn sprites(&self) -> Vec<SpriteSnapshot> {
        self.sprites.iter().map(|sprite| lock(sprite).clone()).collect()
    }

    /// Snapshot of the most recently created sprite
    pub fn last_sprite(&self) -> Option<SpriteSnapshot> {
        self.sprites.last().map(|sprite| lock(sprite).clone())
    }

    /// Total number of sprites ever created
    pub fn created_count(&self) -> usize {
        self.sprites.len()
    }

    /// Number of sprites not yet destroyed
    pub fn live_count(&self) -> usize {
        self.sprites.iter().filter(|sprite| !lock(sprite).destroyed).count()
    }
}

impl RenderEngine for HeadlessRenderer {
    fn create_sprite(&mut self, x: f32, y: f32, visual_key: &str) -> Box<dyn RenderHandle> {
        let state = Arc::new(Mutex::new(SpriteSnapshot {
            visual_key: visual_key.to_string(),
            x,
            y,
            rotation: 0.0,
            velocity: Vec2::zeros(),
            animations: Vec::new(),
            destroyed: false,
        }));
        self.sprites.push(Arc::clone(&state));
        Box::new(HeadlessSprite { state })
    }
}
