/// Game configuration constants and tunable parameters.
///
/// Durations are expressed in simulation ticks. The handheld frame advances one
/// tick every 50 ms, so 20 ticks make one second of play.
#[derive(Clone, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(default))]
pub struct GameConfig {
    pub ai: AiConfig,
    pub player_lives: u32,
    /// Maximum cells covered by a single dash.
    pub dash_distance: u32,
    pub dash_cooldown_ticks: u64,
    /// Grace period after a hit during which further contact is ignored.
    pub invincibility_ticks: u64,
    /// Enemies advance once every this many ticks.
    pub enemy_move_interval: u64,
}

impl GameConfig {
    pub const TICK_MILLIS: u64 = 50;

    pub const DEFAULT_PLAYER_LIVES: u32 = 3;
    pub const DEFAULT_DASH_DISTANCE: u32 = 2;
    pub const DEFAULT_DASH_COOLDOWN_TICKS: u64 = 60;
    pub const DEFAULT_INVINCIBILITY_TICKS: u64 = 30;
    pub const DEFAULT_ENEMY_MOVE_INTERVAL: u64 = 10;

    pub fn new() -> Self {
        Self {
            ai: AiConfig::default(),
            player_lives: Self::DEFAULT_PLAYER_LIVES,
            dash_distance: Self::DEFAULT_DASH_DISTANCE,
            dash_cooldown_ticks: Self::DEFAULT_DASH_COOLDOWN_TICKS,
            invincibility_ticks: Self::DEFAULT_INVINCIBILITY_TICKS,
            enemy_move_interval: Self::DEFAULT_ENEMY_MOVE_INTERVAL,
        }
    }

    #[must_use]
    pub fn with_ai(mut self, ai: AiConfig) -> Self {
        self.ai = ai;
        self
    }

    #[must_use]
    pub fn with_enemy_move_interval(mut self, interval: u64) -> Self {
        self.enemy_move_interval = interval;
        self
    }
}

impl Default for GameConfig {
    fn default() -> Self {
        Self::new()
    }
}

/// Per-agent perception and pursuit tuning.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(default))]
pub struct AiConfig {
    /// Vision radius in tiles, measured as Euclidean distance.
    pub vision_radius: u32,
    /// Lead the player by their last movement while chasing.
    pub predict_player: bool,
    /// Consecutive stuck ticks after which a search is abandoned.
    /// `None` keeps searching until the last known cell is reached.
    pub search_patience: Option<u32>,
}

impl AiConfig {
    pub const DEFAULT_VISION_RADIUS: u32 = 6;

    pub const fn new() -> Self {
        Self {
            vision_radius: Self::DEFAULT_VISION_RADIUS,
            predict_player: true,
            search_patience: None,
        }
    }

    #[must_use]
    pub const fn with_vision_radius(mut self, vision_radius: u32) -> Self {
        self.vision_radius = vision_radius;
        self
    }

    #[must_use]
    pub const fn with_prediction(mut self, predict_player: bool) -> Self {
        self.predict_player = predict_player;
        self
    }

    #[must_use]
    pub const fn with_search_patience(mut self, ticks: u32) -> Self {
        self.search_patience = Some(ticks);
        self
    }
}

impl Default for AiConfig {
    fn default() -> Self {
        Self::new()
    }
}
