//! Player state and input handling.
use crakers_core::{Cell, Delta, Direction, GameConfig, MapOracle};

/// One tick worth of player intent.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub enum PlayerInput {
    /// Step one cell if the destination is walkable.
    Move(Direction),
    /// Jump up to `dash_distance` cells along the last movement direction.
    Dash,
    #[default]
    Idle,
}

#[derive(Clone, Debug, PartialEq, Eq)]
pub struct PlayerState {
    position: Cell,
    lives: u32,
    /// Last direction the player tried to move in; dashes follow it.
    facing: Direction,
    last_delta: Delta,
    dash_ready_at: u64,
    invincible_until: u64,
}

impl PlayerState {
    /// Players face down the screen until their first move.
    pub const SPAWN_FACING: Direction = Direction::South;

    pub fn new(position: Cell, lives: u32) -> Self {
        Self {
            position,
            lives,
            facing: Self::SPAWN_FACING,
            last_delta: Delta::ZERO,
            dash_ready_at: 0,
            invincible_until: 0,
        }
    }

    pub fn position(&self) -> Cell {
        self.position
    }

    pub fn lives(&self) -> u32 {
        self.lives
    }

    pub fn facing(&self) -> Direction {
        self.facing
    }

    /// Cells moved during the most recent step, used by enemies for look-ahead.
    pub fn last_delta(&self) -> Delta {
        self.last_delta
    }

    pub fn is_alive(&self) -> bool {
        self.lives > 0
    }

    pub fn is_invincible(&self, tick: u64) -> bool {
        tick < self.invincible_until
    }

    pub fn can_dash(&self, tick: u64) -> bool {
        tick >= self.dash_ready_at
    }

    /// Ticks left before the next dash is allowed.
    pub fn dash_cooldown_remaining(&self, tick: u64) -> u64 {
        self.dash_ready_at.saturating_sub(tick)
    }

    /// Applies `input` at `tick` and returns the resulting movement.
    ///
    /// A dash while cooling down does nothing and does not restart the cooldown.
    /// A dash blocked by an adjacent wall still uses it up.
    pub fn apply<M>(&mut self, map: &M, input: PlayerInput, tick: u64, config: &GameConfig) -> Delta
    where
        M: MapOracle + ?Sized,
    {
        let start = self.position;
        match input {
            PlayerInput::Move(direction) => {
                self.facing = direction;
                self.advance(map, direction, 1);
            }
            PlayerInput::Dash => {
                if self.can_dash(tick) {
                    self.advance(map, self.facing, config.dash_distance);
                    self.dash_ready_at = tick + config.dash_cooldown_ticks;
                }
            }
            PlayerInput::Idle => {}
        }
        self.last_delta = Delta::between(start, self.position);
        self.last_delta
    }

    /// Removes a life unless invincible. Returns whether the hit landed.
    pub fn take_hit(&mut self, tick: u64, config: &GameConfig) -> bool {
        if self.is_invincible(tick) || !self.is_alive() {
            return false;
        }
        self.lives -= 1;
        self.invincible_until = tick + config.invincibility_ticks;
        true
    }

    fn advance<M>(&mut self, map: &M, direction: Direction, cells: u32)
    where
        M: MapOracle + ?Sized,
    {
        for _ in 0..cells {
            let next = self.position.step(direction);
            if !map.is_walkable(next) {
                break;
            }
            self.position = next;
        }
    }
}
