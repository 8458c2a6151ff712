//! Round engine shared by every mode.
//!
//! A play action draws (or picks) symbols, turns the round into a fixed
//! schedule of steps and hands that schedule to a [`Timeline`]. The steps
//! mutate state only when the virtual clock reaches them, so scoring always
//! lands after the last reveal and at most one round is in flight.

use super::board::GridBoard;
use super::config::{ConfigError, GameConfig, GridConfig, LineConfig, ModeConfig};
use super::line::LineRound;
use super::progression::{experience_for_round, LevelUp, Progression};
use super::schedule::Timeline;
use super::scoring::{base_points, detect_bonus, scale};
use super::symbol::Position;
use rand::prelude::*;
use serde::{Deserialize, Serialize};

#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub enum Phase {
    Ready,
    InProgress,
    GameOver,
}

#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub enum Popup {
    Bonus { message: String, points: i64 },
    LevelUp(LevelUp),
}

#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct GameState {
    pub score: i64,
    pub remaining_attempts: u32,
    pub game_over: bool,
    pub in_progress: bool,
    pub last_points_change: i64,
    pub popup: Option<Popup>,
    /// Survives restarts. `None` when the mode has no level table.
    pub progression: Option<Progression>,
}

impl GameState {
    fn new(config: &GameConfig, progression: Option<Progression>) -> Self {
        GameState {
            score: 0,
            remaining_attempts: config.attempts,
            game_over: false,
            in_progress: false,
            last_points_change: 0,
            popup: None,
            progression,
        }
    }

    pub fn phase(&self) -> Phase {
        if self.game_over {
            Phase::GameOver
        } else if self.in_progress {
            Phase::InProgress
        } else {
            Phase::Ready
        }
    }

    pub fn can_play(&self) -> bool {
        self.phase() == Phase::Ready && self.remaining_attempts > 0
    }
}

/// Whatever the current mode has on the table.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub enum Field {
    Grid {
        board: GridBoard,
        last_revealed: Vec<usize>,
    },
    Line(Option<LineRound>),
}

#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub enum RoundStep {
    Reveal(Position),
    CreditBase(i64),
    CreditBonus { points: i64, message: String },
    GainExperience(u64),
    Resolve,
}

/// One fired step, as seen by the presentation layer.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub enum EngineEvent {
    Revealed(Position),
    ScoreCredited { points: i64, score: i64 },
    BonusCredited { points: i64, score: i64, message: String },
    ExperienceGained { amount: u64, level_up: Option<LevelUp> },
    Resolved { game_over: bool },
}

#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
pub struct RoundOutcome {
    pub base: i64,
    pub bonus: i64,
    pub bonus_message: Option<String>,
    pub experience: u64,
    pub level_up: Option<LevelUp>,
}

#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct RoundResult {
    /// Offsets in milliseconds from the play action.
    pub schedule: Vec<(u64, RoundStep)>,
    pub outcome: RoundOutcome,
    /// Steps at offset zero, applied by the play action itself.
    pub immediate: Vec<EngineEvent>,
    /// State once every step has fired.
    pub state: GameState,
}

#[derive(Clone, Debug)]
struct Session {
    state: GameState,
    field: Field,
}

impl Session {
    fn apply(&mut self, step: RoundStep, config: &GameConfig) -> EngineEvent {
        let state = &mut self.state;
        match step {
            RoundStep::Reveal(position) => {
                match (&mut self.field, position) {
                    (Field::Grid { board, .. }, Position::Cell(id)) => {
                        board.reveal(&[id]);
                    }
                    (Field::Line(Some(round)), Position::Line { row, col }) => {
                        round.reveal(row, col);
                    }
                    (_, position) => log::warn!("reveal {:?} does not fit the field", position),
                }
                EngineEvent::Revealed(position)
            }
            RoundStep::CreditBase(points) => {
                if let Field::Line(Some(round)) = &self.field {
                    debug_assert!(round.is_revealed());
                }
                state.score += points;
                state.last_points_change = points;
                EngineEvent::ScoreCredited {
                    points,
                    score: state.score,
                }
            }
            RoundStep::CreditBonus { points, message } => {
                state.score += points;
                state.last_points_change = points;
                state.popup = Some(Popup::Bonus {
                    message: message.clone(),
                    points,
                });
                EngineEvent::BonusCredited {
                    points,
                    score: state.score,
                    message,
                }
            }
            RoundStep::GainExperience(amount) => {
                let level_up = match (&mut state.progression, &config.levels) {
                    (Some(progression), Some(levels)) => progression.add_experience(amount, levels),
                    _ => None,
                };
                if let Some(level_up) = &level_up {
                    state.popup = Some(Popup::LevelUp(level_up.clone()));
                }
                EngineEvent::ExperienceGained { amount, level_up }
            }
            RoundStep::Resolve => {
                state.in_progress = false;
                if state.remaining_attempts == 0 {
                    state.game_over = true;
                    log::info!("game over with score {}", state.score);
                }
                EngineEvent::Resolved {
                    game_over: state.game_over,
                }
            }
        }
    }
}

#[derive(Clone, Debug)]
pub struct RoundEngine {
    config: GameConfig,
    rng: StdRng,
    session: Session,
    timeline: Timeline<RoundStep>,
}

impl RoundEngine {
    pub fn new(config: GameConfig, seed: u64) -> Result<Self, ConfigError> {
        config.validate()?;
        let mut rng = StdRng::seed_from_u64(seed);
        let progression = config.levels.as_ref().map(Progression::new);
        let session = Session {
            state: GameState::new(&config, progression),
            field: Self::initial_field(&config, &mut rng),
        };
        Ok(RoundEngine {
            config,
            rng,
            session,
            timeline: Timeline::new(),
        })
    }

    fn initial_field(config: &GameConfig, rng: &mut StdRng) -> Field {
        match &config.mode {
            ModeConfig::Grid(grid) => Field::Grid {
                board: GridBoard::generate(grid, rng),
                last_revealed: Vec::new(),
            },
            ModeConfig::Line(_) => Field::Line(None),
        }
    }

    pub fn config(&self) -> &GameConfig {
        &self.config
    }

    pub fn state(&self) -> &GameState {
        &self.session.state
    }

    pub fn field(&self) -> &Field {
        &self.session.field
    }

    /// Re-initialises score, attempts and the field from `config`. Level
    /// and experience carry over while the new config still has levels.
    /// Ignored while a round is in flight.
    pub fn start_or_restart(&mut self, config: GameConfig) -> Result<&GameState, ConfigError> {
        config.validate()?;
        if self.session.state.in_progress {
            log::debug!("restart ignored while a round is in progress");
            return Ok(&self.session.state);
        }

        let progression = match (&config.levels, self.session.state.progression.take()) {
            (Some(_), Some(progression)) => Some(progression),
            (Some(levels), None) => Some(Progression::new(levels)),
            (None, _) => None,
        };
        self.session = Session {
            state: GameState::new(&config, progression),
            field: Self::initial_field(&config, &mut self.rng),
        };
        self.config = config;
        self.timeline = Timeline::new();
        Ok(&self.session.state)
    }

    pub fn restart(&mut self) -> &GameState {
        if self.session.state.in_progress {
            return &self.session.state;
        }
        let progression = self.session.state.progression.take();
        self.session = Session {
            state: GameState::new(&self.config, progression),
            field: Self::initial_field(&self.config, &mut self.rng),
        };
        self.timeline = Timeline::new();
        &self.session.state
    }

    /// Starts a round. Returns `None` without drawing when a round is in
    /// flight, the game is over, or no attempts remain.
    pub fn play_round(&mut self) -> Option<RoundResult> {
        let state = &mut self.session.state;
        if state.in_progress || state.game_over {
            return None;
        }
        if state.remaining_attempts == 0 {
            state.game_over = true;
            return None;
        }

        let multiplier = match (&state.progression, &self.config.levels) {
            (Some(progression), Some(levels)) => progression.multiplier(levels),
            _ => 1.0,
        };
        let leveling = self.config.levels.is_some();

        let (schedule, outcome) = match &self.config.mode {
            ModeConfig::Grid(grid) => {
                let Field::Grid { board, last_revealed } = &mut self.session.field else {
                    unreachable!("grid mode always holds a board");
                };
                let picked = match board.pick_hidden(grid.reveal_count, &mut self.rng) {
                    Some(picked) => picked,
                    None => {
                        log::info!("board exhausted, game over with score {}", state.score);
                        state.game_over = true;
                        return None;
                    }
                };
                let outcome = grid_outcome(board, &picked, multiplier, leveling);
                *last_revealed = picked.clone();
                (grid_schedule(grid, &self.config, &picked, &outcome), outcome)
            }
            ModeConfig::Line(line) => {
                let round = LineRound::generate(line, &mut self.rng);
                let outcome = line_outcome(&round, line, multiplier, leveling);
                let schedule = line_schedule(&round, &self.config, &outcome);
                self.session.field = Field::Line(Some(round));
                (schedule, outcome)
            }
        };

        let state = &mut self.session.state;
        state.remaining_attempts -= 1;
        state.in_progress = true;
        state.popup = None;
        log::debug!(
            "round started: {} steps, {} attempts left",
            schedule.len(),
            state.remaining_attempts
        );

        let mut projection = self.session.clone();
        let mut level_up = None;
        for (_, step) in schedule.iter() {
            if let EngineEvent::ExperienceGained {
                level_up: Some(reached),
                ..
            } = projection.apply(step.clone(), &self.config)
            {
                level_up = Some(reached);
            }
        }

        self.timeline = Timeline::from_events(schedule.clone());
        let immediate = self.advance(0);

        Some(RoundResult {
            schedule,
            outcome: RoundOutcome {
                level_up,
                ..outcome
            },
            immediate,
            state: projection.state,
        })
    }

    /// Moves the virtual clock forward and applies every step now due.
    pub fn advance(&mut self, ms: u64) -> Vec<EngineEvent> {
        let steps = self.timeline.advance(ms);
        let events: Vec<EngineEvent> = steps
            .into_iter()
            .map(|step| self.session.apply(step, &self.config))
            .collect();
        if events
            .iter()
            .any(|event| matches!(event, EngineEvent::Resolved { .. }))
        {
            log::debug!(
                "round resolved: score {}, {} attempts left",
                self.session.state.score,
                self.session.state.remaining_attempts
            );
        }
        events
    }

    /// Runs the current round to completion.
    pub fn finish_round(&mut self) -> Vec<EngineEvent> {
        let remaining = self.timeline.remaining();
        self.advance(remaining)
    }

    pub fn is_settled(&self) -> bool {
        self.timeline.is_over()
    }

    /// Clears the transient popup. Round state is untouched.
    pub fn dismiss_popup(&mut self) {
        self.session.state.popup = None;
    }
}

fn grid_outcome(board: &GridBoard, picked: &[usize], multiplier: f64, leveling: bool) -> RoundOutcome {
    let revealed: Vec<_> = picked.iter().map(|&id| board.cells[id]).collect();
    let base = scale(base_points(&revealed), multiplier);
    RoundOutcome {
        base,
        experience: if leveling {
            experience_for_round(base, 0)
        } else {
            0
        },
        ..RoundOutcome::default()
    }
}

fn grid_schedule(
    grid: &GridConfig,
    config: &GameConfig,
    picked: &[usize],
    outcome: &RoundOutcome,
) -> Vec<(u64, RoundStep)> {
    debug_assert_eq!(picked.len(), grid.reveal_count);
    let mut schedule: Vec<(u64, RoundStep)> = picked
        .iter()
        .map(|&id| (0, RoundStep::Reveal(Position::Cell(id))))
        .collect();
    schedule.push((0, RoundStep::CreditBase(outcome.base)));
    if config.levels.is_some() {
        schedule.push((0, RoundStep::GainExperience(outcome.experience)));
    }
    schedule.push((config.timing.grid_cooldown_ms, RoundStep::Resolve));
    schedule
}

fn line_outcome(round: &LineRound, line: &LineConfig, multiplier: f64, leveling: bool) -> RoundOutcome {
    let base = scale(base_points(round.active()), multiplier);
    let bonus = detect_bonus(round.active(), &line.symbols);
    let bonus_points = scale(bonus.points, multiplier);
    RoundOutcome {
        base,
        bonus: bonus_points,
        bonus_message: bonus.message,
        experience: if leveling {
            experience_for_round(base, bonus_points)
        } else {
            0
        },
        level_up: None,
    }
}

fn line_schedule(round: &LineRound, config: &GameConfig, outcome: &RoundOutcome) -> Vec<(u64, RoundStep)> {
    let timing = &config.timing;
    let mut schedule: Vec<(u64, RoundStep)> = round
        .reveal_order()
        .into_iter()
        .enumerate()
        .map(|(order, (row, col))| {
            (
                (order as u64 + 1) * timing.reveal_step_ms,
                RoundStep::Reveal(Position::Line { row, col }),
            )
        })
        .collect();

    let last_reveal = schedule.last().map(|&(offset, _)| offset).unwrap_or(0);
    let mut end = last_reveal + timing.settle_ms;
    // A losing combination lands with the base credit.
    let base_credit = if outcome.bonus < 0 {
        outcome.base + outcome.bonus
    } else {
        outcome.base
    };
    schedule.push((end, RoundStep::CreditBase(base_credit)));

    if outcome.bonus > 0 {
        end += timing.bonus_delay_ms;
        schedule.push((
            end,
            RoundStep::CreditBonus {
                points: outcome.bonus,
                message: outcome
                    .bonus_message
                    .clone()
                    .unwrap_or_else(|| "Bonus!".to_string()),
            },
        ));
    }
    if config.levels.is_some() {
        schedule.push((end, RoundStep::GainExperience(outcome.experience)));
    }
    schedule.push((end, RoundStep::Resolve));
    schedule
}
