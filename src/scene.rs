//! Scenes and the scene sequencer.
//!
//! A scene is a named partial assignment of desired levels to channels;
//! the sequencer walks an ordered, cyclic table of them. Scene tables are
//! static configuration and are validated once at startup — a scene that
//! references an unknown channel is rejected whole rather than silently
//! dropping the assignment.

use crate::channel::ChannelBank;

/// Error found while validating a scene table at startup.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ConfigError {
    /// The scene table holds no scenes.
    EmptyTable,
    /// A scene assigns a level to a channel the bank does not hold.
    UnknownChannel {
        /// Name of the offending scene.
        scene: &'static str,
        /// The unresolved channel name.
        channel: &'static str,
    },
}

/// A named partial assignment of desired levels.
///
/// Channels omitted from `levels` keep their previous desired value when
/// the scene is entered.
#[derive(Debug, Clone, Copy)]
pub struct Scene {
    /// Diagnostic scene name.
    pub name: &'static str,
    /// `(channel name, desired level)` pairs applied on entry.
    pub levels: &'static [(&'static str, u8)],
}

/// Check a scene table against the bank, failing fast on the first error.
pub fn validate<const N: usize>(
    scenes: &[Scene],
    bank: &ChannelBank<N>,
) -> Result<(), ConfigError> {
    if scenes.is_empty() {
        return Err(ConfigError::EmptyTable);
    }

    for scene in scenes {
        for &(channel, _) in scene.levels {
            if bank.find(channel).is_none() {
                return Err(ConfigError::UnknownChannel {
                    scene: scene.name,
                    channel,
                });
            }
        }
    }

    Ok(())
}

/// Ordered, cyclic walk over a scene table.
///
/// The initial position is the first scene; advancing past the last scene
/// wraps back to it. There is no terminal state.
#[derive(Debug)]
pub struct SceneSequencer<'a> {
    scenes: &'a [Scene],
    position: usize,
}

impl<'a> SceneSequencer<'a> {
    /// Create a sequencer positioned at the first scene.
    ///
    /// The table must be non-empty; [`validate`] enforces this before the
    /// controller constructs one.
    pub const fn new(scenes: &'a [Scene]) -> Self {
        Self {
            scenes,
            position: 0,
        }
    }

    /// The scene the sequencer is currently in.
    pub fn current(&self) -> &'a Scene {
        &self.scenes[self.position]
    }

    /// Index of the current scene.
    pub const fn position(&self) -> usize {
        self.position
    }

    /// Number of scenes in the table.
    pub const fn len(&self) -> usize {
        self.scenes.len()
    }

    /// Whether the table holds no scenes.
    pub const fn is_empty(&self) -> bool {
        self.scenes.is_empty()
    }

    /// Step to the next scene, wrapping after the last one.
    pub fn advance(&mut self) -> &'a Scene {
        self.position = (self.position + 1) % self.scenes.len();
        self.current()
    }
}
