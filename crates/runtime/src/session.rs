//! Tick pipeline for a single play session.
use std::collections::BTreeSet;

use crakers_core::{Cell, Delta, EnemyAgent, GameConfig, GridMap, Level, LevelError, MoveDecision};

use crate::error::{Result, RuntimeError};
use crate::events::{Outcome, SessionEvent, SessionStatus, StepReport};
use crate::player::{PlayerInput, PlayerState};
use crate::providers::InputProvider;

/// Read-only snapshot handed to input providers and renderers.
#[derive(Clone, Copy, Debug)]
pub struct SessionView<'a> {
    pub tick: u64,
    pub map: &'a GridMap,
    pub player: &'a PlayerState,
    pub enemies: &'a [EnemyAgent],
    pub gems: &'a BTreeSet<Cell>,
    pub status: SessionStatus,
}

/// One run through a level, from spawn until every gem is taken or the
/// player runs out of lives.
#[derive(Clone, Debug)]
pub struct Session {
    map: GridMap,
    config: GameConfig,
    player: PlayerState,
    gems: BTreeSet<Cell>,
    enemies: Vec<EnemyAgent>,
    /// Player movement accumulated since enemies last acted.
    pending_delta: Delta,
    tick: u64,
    status: SessionStatus,
}

impl Session {
    /// Validates `level` and spawns one agent per enemy.
    pub fn new(level: Level, config: GameConfig) -> Result<Self> {
        level.validate()?;

        let enemies = level
            .enemies
            .iter()
            .enumerate()
            .map(|(index, spawn)| {
                spawn
                    .spawn(&level.map, config.ai)
                    .map_err(|source| LevelError::Enemy { index, source })
            })
            .collect::<std::result::Result<Vec<_>, _>>()?;

        tracing::info!(
            "Session started: {}x{} map, {} gems, {} enemies",
            level.map.width(),
            level.map.height(),
            level.gems.len(),
            enemies.len()
        );

        Ok(Self {
            player: PlayerState::new(level.player_spawn, config.player_lives),
            map: level.map,
            gems: level.gems,
            enemies,
            config,
            pending_delta: Delta::ZERO,
            tick: 0,
            status: SessionStatus::Running,
        })
    }

    pub fn tick(&self) -> u64 {
        self.tick
    }

    pub fn status(&self) -> SessionStatus {
        self.status
    }

    pub fn map(&self) -> &GridMap {
        &self.map
    }

    pub fn config(&self) -> &GameConfig {
        &self.config
    }

    pub fn player(&self) -> &PlayerState {
        &self.player
    }

    pub fn enemies(&self) -> &[EnemyAgent] {
        &self.enemies
    }

    pub fn gems(&self) -> &BTreeSet<Cell> {
        &self.gems
    }

    pub fn view(&self) -> SessionView<'_> {
        SessionView {
            tick: self.tick,
            map: &self.map,
            player: &self.player,
            enemies: &self.enemies,
            gems: &self.gems,
            status: self.status,
        }
    }

    /// Asks `provider` for the next input and simulates one tick with it.
    pub fn step_with<P>(&mut self, provider: &mut P) -> Result<StepReport>
    where
        P: InputProvider + ?Sized,
    {
        let input = provider.next_input(&self.view());
        self.step(input)
    }

    /// Simulates one tick: player input, gem pickup, enemy movement,
    /// collision, then win/lose checks.
    ///
    /// # Errors
    ///
    /// [`RuntimeError::SessionFinished`] once the session has been won or lost.
    pub fn step(&mut self, input: PlayerInput) -> Result<StepReport> {
        if let SessionStatus::Finished(outcome) = self.status {
            return Err(RuntimeError::SessionFinished { outcome });
        }

        self.tick += 1;
        let tick = self.tick;
        let mut events = Vec::new();

        let from = self.player.position();
        let delta = self.player.apply(&self.map, input, tick, &self.config);
        let player = self.player.position();
        if !delta.is_zero() {
            self.pending_delta += delta;
            events.push(SessionEvent::PlayerMoved { from, to: player });
        }

        if self.gems.remove(&player) {
            tracing::debug!("Gem collected at {}, {} left", player, self.gems.len());
            events.push(SessionEvent::GemCollected {
                cell: player,
                remaining: self.gems.len(),
            });
        }

        if self.enemies_act_on(tick) {
            self.tick_enemies(player, &mut events);
        }

        self.resolve_contact(tick, &mut events);
        self.resolve_outcome(&mut events);

        Ok(StepReport {
            tick,
            events,
            status: self.status,
        })
    }

    fn enemies_act_on(&self, tick: u64) -> bool {
        tick % self.config.enemy_move_interval.max(1) == 0
    }

    fn tick_enemies(&mut self, player: Cell, events: &mut Vec<SessionEvent>) {
        let player_delta = std::mem::replace(&mut self.pending_delta, Delta::ZERO);

        for (index, enemy) in self.enemies.iter_mut().enumerate() {
            let from = enemy.position();
            let decision = enemy.tick(&self.map, player, player_delta);

            if let Some(transition) = enemy.last_transition() {
                tracing::info!(
                    "Enemy {} {} -> {} ({}) at {}",
                    index,
                    transition.from,
                    transition.to,
                    transition.to.tone().hex(),
                    from
                );
                events.push(SessionEvent::EnemyStateChanged {
                    enemy: index,
                    transition,
                });
            }

            match decision {
                MoveDecision::MoveTo(to) => {
                    tracing::debug!("Enemy {} ({}) moved {} -> {}", index, enemy.state(), from, to);
                    events.push(SessionEvent::EnemyMoved {
                        enemy: index,
                        from,
                        to,
                    });
                }
                MoveDecision::Stay => {
                    tracing::debug!("Enemy {} ({}) stays at {}", index, enemy.state(), from);
                }
            }
        }
    }

    fn resolve_contact(&mut self, tick: u64, events: &mut Vec<SessionEvent>) {
        let player = self.player.position();
        let Some(index) = self
            .enemies
            .iter()
            .position(|enemy| enemy.position() == player)
        else {
            return;
        };

        if self.player.take_hit(tick, &self.config) {
            tracing::info!(
                "Player hit by enemy {} at {}, {} lives left",
                index,
                player,
                self.player.lives()
            );
            events.push(SessionEvent::PlayerHit {
                enemy: index,
                lives_left: self.player.lives(),
            });
        }
    }

    fn resolve_outcome(&mut self, events: &mut Vec<SessionEvent>) {
        let outcome = if !self.player.is_alive() {
            Outcome::Lost
        } else if self.gems.is_empty() {
            Outcome::Won
        } else {
            return;
        };

        tracing::info!("Session finished at tick {}: {}", self.tick, outcome);
        self.status = SessionStatus::Finished(outcome);
        events.push(match outcome {
            Outcome::Won => SessionEvent::Won,
            Outcome::Lost => SessionEvent::Lost,
        });
    }
}
