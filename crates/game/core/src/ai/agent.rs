//! Enemy decision loop: patrol, chase and search.
//!
//! One [`EnemyAgent::tick`] per simulation step. Each tick the agent checks
//! line of sight to the player, updates its state, and emits at most one
//! orthogonal step. Sight always wins: a visible player puts the agent into
//! [`AgentState::Chase`] from any state, and losing sight while chasing moves
//! it to [`AgentState::Search`] before any other rule is considered.

use crate::config::AiConfig;
use crate::error::{ErrorSeverity, GameError};
use crate::grid::{Cell, Delta, MapOracle};

use super::path::{Path, find_path};
use super::state::{AgentState, MoveDecision, StateTransition};
use super::vision::can_see;

#[derive(Clone, Copy, Debug, PartialEq, Eq, thiserror::Error)]
pub enum AgentError {
    #[error("patrol route must contain at least one cell")]
    EmptyPatrolRoute,

    #[error("enemy start {cell} is not a walkable cell")]
    StartNotWalkable { cell: Cell },

    #[error("patrol waypoint #{index} at {cell} is not a walkable cell")]
    WaypointNotWalkable { index: usize, cell: Cell },
}

impl GameError for AgentError {
    fn severity(&self) -> ErrorSeverity {
        ErrorSeverity::Validation
    }

    fn error_code(&self) -> &'static str {
        match self {
            Self::EmptyPatrolRoute => "AGENT_EMPTY_PATROL_ROUTE",
            Self::StartNotWalkable { .. } => "AGENT_START_NOT_WALKABLE",
            Self::WaypointNotWalkable { .. } => "AGENT_WAYPOINT_NOT_WALKABLE",
        }
    }
}

/// Cached A* route toward a specific target cell.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Plan {
    target: Cell,
    steps: Vec<Cell>,
    next: usize,
}

impl Plan {
    fn new(target: Cell, path: Path) -> Self {
        Self {
            target,
            steps: path.into_steps(),
            next: 0,
        }
    }

    pub fn target(&self) -> Cell {
        self.target
    }

    /// Steps not yet taken, in order.
    pub fn remaining(&self) -> &[Cell] {
        &self.steps[self.next..]
    }

    pub fn is_exhausted(&self) -> bool {
        self.next >= self.steps.len()
    }

    fn peek(&self) -> Option<Cell> {
        self.steps.get(self.next).copied()
    }

    fn advance(&mut self) {
        self.next += 1;
    }
}

/// Result of trying to walk toward a target.
enum Step {
    Move(Cell),
    Arrived,
    Blocked,
}

/// A single enemy and everything it remembers between ticks.
#[derive(Clone, Debug)]
pub struct EnemyAgent {
    config: AiConfig,
    state: AgentState,
    position: Cell,
    patrol_route: Vec<Cell>,
    patrol_index: usize,
    last_known_player: Option<Cell>,
    plan: Option<Plan>,
    stuck_ticks: u32,
    last_transition: Option<StateTransition>,
}

impl EnemyAgent {
    /// Creates an agent in [`AgentState::Patrol`] heading for the first waypoint.
    ///
    /// # Errors
    ///
    /// Fails when the route is empty or when the start or any waypoint is not
    /// a walkable in-bounds cell.
    pub fn new<M>(
        map: &M,
        start: Cell,
        patrol_route: Vec<Cell>,
        config: AiConfig,
    ) -> Result<Self, AgentError>
    where
        M: MapOracle + ?Sized,
    {
        if patrol_route.is_empty() {
            return Err(AgentError::EmptyPatrolRoute);
        }
        if !map.is_walkable(start) {
            return Err(AgentError::StartNotWalkable { cell: start });
        }
        if let Some((index, &cell)) = patrol_route
            .iter()
            .enumerate()
            .find(|&(_, &cell)| !map.is_walkable(cell))
        {
            return Err(AgentError::WaypointNotWalkable { index, cell });
        }

        Ok(Self {
            config,
            state: AgentState::Patrol,
            position: start,
            patrol_route,
            patrol_index: 0,
            last_known_player: None,
            plan: None,
            stuck_ticks: 0,
            last_transition: None,
        })
    }

    pub fn state(&self) -> AgentState {
        self.state
    }

    pub fn position(&self) -> Cell {
        self.position
    }

    /// Most recent cell the player was seen in. `None` if never seen since the
    /// last return to patrol.
    pub fn last_known_player(&self) -> Option<Cell> {
        self.last_known_player
    }

    pub fn patrol_route(&self) -> &[Cell] {
        &self.patrol_route
    }

    pub fn patrol_index(&self) -> usize {
        self.patrol_index
    }

    pub fn current_plan(&self) -> Option<&Plan> {
        self.plan.as_ref()
    }

    pub fn config(&self) -> &AiConfig {
        &self.config
    }

    /// Transition made during the most recent tick, if any.
    ///
    /// When several transitions chain within one tick, `from` is the state the
    /// tick started in and `to` the state it ended in.
    pub fn last_transition(&self) -> Option<StateTransition> {
        self.last_transition
    }

    /// Advances the agent by one simulation step.
    ///
    /// `player_delta` is the player's movement over their last step and is used
    /// for one-cell look-ahead while chasing. The agent applies its own move,
    /// so [`EnemyAgent::position`] reflects the returned decision.
    pub fn tick<M>(&mut self, map: &M, player: Cell, player_delta: Delta) -> MoveDecision
    where
        M: MapOracle + ?Sized,
    {
        self.last_transition = None;

        let decision = if can_see(map, self.position, player, self.config.vision_radius) {
            if self.state != AgentState::Chase {
                self.enter(AgentState::Chase);
            }
            self.last_known_player = Some(player);
            self.chase(map, player, player_delta)
        } else {
            match self.state {
                AgentState::Chase => {
                    self.enter(AgentState::Search);
                    self.search(map)
                }
                AgentState::Search => self.search(map),
                AgentState::Patrol => self.patrol(map),
            }
        };

        if let MoveDecision::MoveTo(cell) = decision {
            self.position = cell;
            if self.state == AgentState::Patrol && cell == self.patrol_target() {
                self.advance_patrol();
            }
        }
        decision
    }

    fn chase<M>(&mut self, map: &M, player: Cell, player_delta: Delta) -> MoveDecision
    where
        M: MapOracle + ?Sized,
    {
        let predicted = self
            .config
            .predict_player
            .then(|| self.predict(map, player, player_delta))
            .flatten();

        if let Some(goal) = predicted
            && let Step::Move(cell) = self.follow(map, goal)
        {
            return MoveDecision::MoveTo(cell);
        }

        match self.follow(map, player) {
            Step::Move(cell) => MoveDecision::MoveTo(cell),
            Step::Arrived | Step::Blocked => MoveDecision::Stay,
        }
    }

    /// One-cell look-ahead along the player's last movement.
    fn predict<M>(&self, map: &M, player: Cell, player_delta: Delta) -> Option<Cell>
    where
        M: MapOracle + ?Sized,
    {
        let lead = player_delta.unit();
        if lead.is_zero() {
            return None;
        }
        let predicted = player + lead;
        (predicted != self.position && map.is_walkable(predicted)).then_some(predicted)
    }

    fn search<M>(&mut self, map: &M) -> MoveDecision
    where
        M: MapOracle + ?Sized,
    {
        let Some(target) = self.last_known_player else {
            self.resume_patrol();
            return self.patrol(map);
        };
        if self.position == target {
            self.resume_patrol();
            return self.patrol(map);
        }

        match self.follow(map, target) {
            Step::Move(cell) => {
                self.stuck_ticks = 0;
                MoveDecision::MoveTo(cell)
            }
            Step::Arrived => MoveDecision::Stay,
            Step::Blocked => {
                self.stuck_ticks += 1;
                if self
                    .config
                    .search_patience
                    .is_some_and(|patience| self.stuck_ticks >= patience)
                {
                    self.resume_patrol();
                }
                MoveDecision::Stay
            }
        }
    }

    fn patrol<M>(&mut self, map: &M) -> MoveDecision
    where
        M: MapOracle + ?Sized,
    {
        if self.position == self.patrol_target() {
            self.advance_patrol();
        }
        match self.follow(map, self.patrol_target()) {
            Step::Move(cell) => MoveDecision::MoveTo(cell),
            Step::Arrived => MoveDecision::Stay,
            Step::Blocked => {
                // Unreachable waypoint: try the next one on the following tick.
                self.advance_patrol();
                MoveDecision::Stay
            }
        }
    }

    /// Next step toward `target`, replanning when the cached plan is missing,
    /// aimed elsewhere, exhausted, or no longer starts next to the agent.
    fn follow<M>(&mut self, map: &M, target: Cell) -> Step
    where
        M: MapOracle + ?Sized,
    {
        if self.position == target {
            return Step::Arrived;
        }

        let position = self.position;
        let reusable = self.plan.as_ref().is_some_and(|plan| {
            plan.target == target && plan.peek().is_some_and(|next| next.is_adjacent(position))
        });
        if !reusable {
            self.plan = match find_path(map, position, target) {
                Ok(Some(path)) if !path.is_empty() => Some(Plan::new(target, path)),
                _ => None,
            };
        }

        let Some(plan) = self.plan.as_mut() else {
            return Step::Blocked;
        };
        match plan.peek() {
            Some(next) if next.is_adjacent(position) && map.is_walkable(next) => {
                plan.advance();
                Step::Move(next)
            }
            _ => {
                self.plan = None;
                Step::Blocked
            }
        }
    }

    fn enter(&mut self, next: AgentState) {
        let from = self.last_transition.map_or(self.state, |transition| transition.from);
        self.last_transition = Some(StateTransition { from, to: next });
        self.state = next;
        self.plan = None;
        self.stuck_ticks = 0;
    }

    /// Returns to patrol from the stored route index.
    fn resume_patrol(&mut self) {
        self.last_known_player = None;
        self.enter(AgentState::Patrol);
    }

    fn patrol_target(&self) -> Cell {
        self.patrol_route[self.patrol_index]
    }

    fn advance_patrol(&mut self) {
        self.patrol_index = (self.patrol_index + 1) % self.patrol_route.len();
    }
}
