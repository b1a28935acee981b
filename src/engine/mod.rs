//! Engine loop: archive loading and the per-tick update

mod state;
mod wad;

pub use state::{GameState, MOVE_STEP, START_HEALTH, TURN_STEP};
pub use wad::{classify, ArchiveKind, IWAD_MAGIC, PWAD_MAGIC};

use crate::error::Result;
use crate::input::InputState;

/// Owns the game state and the identity of the loaded archive
#[derive(Debug, Default)]
pub struct Engine {
    state: GameState,
    archive: Option<LoadedArchive>,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct LoadedArchive {
    pub kind: ArchiveKind,
    pub size: usize,
}

impl Engine {
    /// Engine with nothing loaded; ticks do nothing until `load` succeeds
    pub fn new() -> Self {
        Self::default()
    }

    pub fn state(&self) -> &GameState {
        &self.state
    }

    pub fn state_mut(&mut self) -> &mut GameState {
        &mut self.state
    }

    pub fn archive(&self) -> Option<LoadedArchive> {
        self.archive
    }

    /// Identify `wad` and start a fresh session.
    ///
    /// On a bad magic nothing changes: the previous state (or the unloaded
    /// state) stays in place.
    pub fn load(&mut self, wad: &[u8]) -> Result<ArchiveKind> {
        let kind = match classify(wad) {
            Ok(kind) => kind,
            Err(e) => {
                tracing::error!("Invalid WAD format! ({})", e);
                return Err(e);
            },
        };
        tracing::info!("{} detected ({} bytes)", kind, wad.len());

        self.archive = Some(LoadedArchive {
            kind,
            size: wad.len(),
        });
        self.state.reset();
        Ok(kind)
    }

    /// Asset stage after `load`. Textures, sprites, maps and sounds are not
    /// decoded yet, so this only reports what would be loaded from.
    pub fn load_assets(&self) {
        match self.archive {
            Some(archive) => tracing::info!(
                "Loading game assets from {} ({} bytes): nothing to decode yet",
                archive.kind,
                archive.size
            ),
            None => tracing::warn!("load_assets called before a WAD was loaded"),
        }
    }

    /// One engine tick. Reads the held buttons once, then updates.
    pub fn tick(&mut self, input: &InputState) {
        if !self.state.is_active() {
            return;
        }
        let keys = input.current_keys();
        self.state.tick(keys);
    }
}
