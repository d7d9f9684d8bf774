//! Sources of player intent.
//!
//! Sessions are driven by an [`InputProvider`] so the same loop can run a
//! scripted fixture in tests or a seeded random walk in the headless client.
use std::collections::VecDeque;

use crakers_core::{Direction, MapOracle, PcgStream};

use crate::player::PlayerInput;
use crate::session::SessionView;

/// Supplies the player's input for the next tick.
pub trait InputProvider {
    fn next_input(&mut self, view: &SessionView<'_>) -> PlayerInput;
}

/// Replays a fixed sequence of inputs, then idles forever.
#[derive(Clone, Debug, Default)]
pub struct ScriptedInput {
    inputs: VecDeque<PlayerInput>,
}

impl ScriptedInput {
    pub fn new(inputs: impl IntoIterator<Item = PlayerInput>) -> Self {
        Self {
            inputs: inputs.into_iter().collect(),
        }
    }

    pub fn remaining(&self) -> usize {
        self.inputs.len()
    }
}

impl InputProvider for ScriptedInput {
    fn next_input(&mut self, _view: &SessionView<'_>) -> PlayerInput {
        self.inputs.pop_front().unwrap_or_default()
    }
}

/// Seeded random walk that prefers open cells and dashes now and then.
#[derive(Clone, Debug)]
pub struct WanderInput {
    rng: PcgStream,
    /// Percent chance per tick to attempt a dash.
    dash_chance: u32,
    /// Percent chance per tick to stand still.
    idle_chance: u32,
}

impl WanderInput {
    pub const DEFAULT_DASH_CHANCE: u32 = 5;
    pub const DEFAULT_IDLE_CHANCE: u32 = 20;

    pub fn new(seed: u64) -> Self {
        Self {
            rng: PcgStream::new(seed),
            dash_chance: Self::DEFAULT_DASH_CHANCE,
            idle_chance: Self::DEFAULT_IDLE_CHANCE,
        }
    }
}

impl InputProvider for WanderInput {
    fn next_input(&mut self, view: &SessionView<'_>) -> PlayerInput {
        if self.rng.chance(self.idle_chance) {
            return PlayerInput::Idle;
        }
        if view.player.can_dash(view.tick + 1) && self.rng.chance(self.dash_chance) {
            return PlayerInput::Dash;
        }

        let position = view.player.position();
        let open: Vec<Direction> = Direction::ALL
            .into_iter()
            .filter(|&direction| view.map.is_walkable(position.step(direction)))
            .collect();
        self.rng
            .pick(&open)
            .map_or(PlayerInput::Idle, |&direction| PlayerInput::Move(direction))
    }
}
