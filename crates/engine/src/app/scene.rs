use super::input::{ActionStates, InputAction};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SceneCommand {
    None,
    Exit,
}

#[derive(Debug, Clone, Copy, Default)]
pub struct InputSnapshot {
    quit_requested: bool,
    actions: ActionStates,
}

impl InputSnapshot {
    pub fn empty() -> Self {
        Self::default()
    }

    pub(crate) fn new(quit_requested: bool, actions: ActionStates) -> Self {
        Self {
            quit_requested,
            actions,
        }
    }

    pub fn quit_requested(&self) -> bool {
        self.quit_requested
    }

    pub fn is_down(&self, action: InputAction) -> bool {
        self.actions.is_down(action)
    }

    pub fn with_action_down(mut self, action: InputAction, is_down: bool) -> Self {
        self.actions.set(action, is_down);
        self
    }

    pub fn with_quit_requested(mut self, quit_requested: bool) -> Self {
        self.quit_requested = quit_requested;
        self
    }
}

#[derive(Debug, Clone, Copy, Default, PartialEq)]
pub struct Vec2 {
    pub x: f32,
    pub y: f32,
}

/// Fixed design-resolution coordinate space. Gameplay positions live here;
/// the renderer maps it onto whatever surface the window currently has.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct LogicalViewport {
    pub width: u32,
    pub height: u32,
}

impl LogicalViewport {
    pub fn center(&self) -> Vec2 {
        Vec2 {
            x: self.width as f32 * 0.5,
            y: self.height as f32 * 0.5,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Player {
    pub position: Vec2,
    pub half_extent: Vec2,
}

#[derive(Debug, Clone)]
pub struct World {
    logical: LogicalViewport,
    player: Player,
}

impl World {
    /// The player spawns centered; its half extent comes from the loaded
    /// sprite and stays fixed for the run.
    pub fn new(logical: LogicalViewport, player_half_extent: Vec2) -> Self {
        Self {
            logical,
            player: Player {
                position: logical.center(),
                half_extent: player_half_extent,
            },
        }
    }

    pub fn logical(&self) -> LogicalViewport {
        self.logical
    }

    pub fn player(&self) -> &Player {
        &self.player
    }

    pub fn player_mut(&mut self) -> &mut Player {
        &mut self.player
    }
}

pub trait Scene {
    fn load(&mut self, world: &mut World);
    fn update(
        &mut self,
        dt_seconds: f32,
        input: &InputSnapshot,
        world: &mut World,
    ) -> SceneCommand;
    fn unload(&mut self, world: &mut World);
}
