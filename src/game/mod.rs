mod board;
mod config;
mod draw;
mod engine;
mod line;
mod progression;
mod schedule;
mod scoring;
mod symbol;

use crate::animation::*;
use std::cell::RefCell;
use std::rc::Rc;
use yew::Reducible;

pub use board::GridBoard;
pub use config::{ConfigError, GameConfig};
pub use engine::{EngineEvent, Field, GameState, Popup, RoundEngine};
pub use line::LineRound;
pub use progression::LevelTable;
pub use symbol::{Position, Symbol, SymbolKind, SymbolTable};

#[derive(Clone)]
pub struct Game {
    pub engine: RoundEngine,
    clock: Rc<RefCell<FrameClock>>,
    pub score_animator: Rc<RefCell<FloatAnimator<i64, NumberAnimator>>>,
}

pub enum GameAction {
    Play,
    Restart,
    /// Switches to another mode, keeping progression where it applies.
    Start(GameConfig),
    DismissPopup,
    Animate,
}

fn random_seed() -> u64 {
    let random = js_sys::Math::random();
    u64::from_be_bytes(random.to_be_bytes())
}

impl Game {
    pub fn new(config: GameConfig) -> Result<Self, ConfigError> {
        Ok(Game {
            engine: RoundEngine::new(config, random_seed())?,
            clock: Rc::new(RefCell::new(FrameClock::new())),
            score_animator: Rc::new(RefCell::new(FloatAnimator::new(NumberAnimator::new(0)))),
        })
    }

    pub fn state(&self) -> &GameState {
        self.engine.state()
    }

    pub fn symbols(&self) -> &SymbolTable {
        self.engine.config().mode.symbols()
    }

    pub fn levels(&self) -> Option<&LevelTable> {
        self.engine.config().levels.as_ref()
    }

    fn sync_score(&self) {
        self.score_animator
            .borrow_mut()
            .animation
            .set_target(self.engine.state().score);
    }
}

fn log_event(event: &EngineEvent) {
    match event {
        EngineEvent::Revealed(position) => log::trace!("revealed {:?}", position),
        EngineEvent::ScoreCredited { points, score } => {
            log::debug!("credited {:+}, score {}", points, score)
        }
        EngineEvent::BonusCredited {
            points,
            score,
            message,
        } => log::debug!("{} {:+}, score {}", message, points, score),
        EngineEvent::ExperienceGained { amount, level_up } => match level_up {
            Some(level_up) => log::debug!("+{} xp, reached {}", amount, level_up.title),
            None => log::debug!("+{} xp", amount),
        },
        EngineEvent::Resolved { game_over } => log::debug!("round over, game over: {}", game_over),
    }
}

impl Reducible for Game {
    type Action = GameAction;

    fn reduce(self: Rc<Self>, action: Self::Action) -> Rc<Self> {
        let mut game = (*self).clone();

        match action {
            GameAction::Play => {
                if let Some(result) = game.engine.play_round() {
                    log::debug!(
                        "dig: base {} bonus {} ({}) experience {}, {} steps, score heading to {}",
                        result.outcome.base,
                        result.outcome.bonus,
                        result.outcome.bonus_message.as_deref().unwrap_or("none"),
                        result.outcome.experience,
                        result.schedule.len(),
                        result.state.score
                    );
                    if let Some(level_up) = &result.outcome.level_up {
                        log::debug!("this dig reaches level {}", level_up.level);
                    }
                    result.immediate.iter().for_each(log_event);
                    game.sync_score();
                }
            }
            GameAction::Start(config) => {
                if game.engine.config() == &config {
                    return self;
                }
                game.engine.finish_round().iter().for_each(log_event);
                match game.engine.start_or_restart(config) {
                    Ok(state) => log::info!("new game with {} attempts", state.remaining_attempts),
                    Err(error) => {
                        log::error!("{}", error);
                        return self;
                    }
                }
                game.score_animator.borrow_mut().animation.reset(0);
            }
            GameAction::Restart => {
                game.engine.restart();
                game.score_animator.borrow_mut().animation.reset(0);
            }
            GameAction::DismissPopup => {
                if game.engine.state().popup.is_none() {
                    return self;
                }
                game.engine.dismiss_popup();
            }
            GameAction::Animate => {
                let ms = game.clock.borrow_mut().tick();
                let counter_idle = game.score_animator.borrow().is_over();
                game.score_animator.borrow_mut().animate();
                if game.engine.is_settled() {
                    // Nothing on screen moves, skip the render.
                    if counter_idle {
                        return self;
                    }
                    return game.into();
                }
                let events = game.engine.advance(ms);
                events.iter().for_each(log_event);
                if !events.is_empty() {
                    game.sync_score();
                }
            }
        }

        game.into()
    }
}
