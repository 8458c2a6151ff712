use super::board::Board;
use super::button::Button;
use super::lines::Lines;
use super::panel::Panel;
use super::popup::Popup;
use crate::game::{self, Field, GameAction, GameConfig};
use std::cell::{Cell, RefCell};
use std::rc::Rc;
use wasm_bindgen::prelude::*;
use wasm_bindgen::JsCast;
use yew::prelude::*;

/// Calls `func` every animation frame until `running` is cleared.
fn raf_loop(running: Rc<Cell<bool>>, mut func: impl FnMut() + 'static) {
    let f = Rc::new(RefCell::new(None));
    let g = f.clone();

    let request_animation_frame = |window: &web_sys::Window, f: &Closure<dyn FnMut()>| {
        window
            .request_animation_frame(f.as_ref().unchecked_ref())
            .unwrap();
    };

    let window = web_sys::window().unwrap();
    let cloned_window = window.clone();
    *f.borrow_mut() = Some(Closure::wrap(Box::new(move || {
        if !running.get() {
            return;
        }
        func();
        request_animation_frame(&cloned_window, g.borrow().as_ref().unwrap());
    }) as Box<dyn FnMut()>));
    request_animation_frame(&window, f.borrow().as_ref().unwrap());
}

#[derive(Clone, PartialEq, Properties)]
pub struct Props {
    pub config: GameConfig,
    pub cell_size: f64,
}

#[function_component(Game)]
pub fn game_component(props: &Props) -> Html {
    let Props { config, cell_size } = props.clone();

    let initial_config = config.clone();
    let game = use_reducer(move || {
        game::Game::new(initial_config).unwrap_or_else(|error| {
            log::error!("{}, falling back to the excavation board", error);
            game::Game::new(GameConfig::grid()).unwrap()
        })
    });

    let cloned_game = game.clone();
    use_effect_with_deps(
        move |_| {
            let running = Rc::new(Cell::new(true));
            raf_loop(running.clone(), move || {
                cloned_game.dispatch(GameAction::Animate)
            });
            move || running.set(false)
        },
        (),
    );

    let cloned_game = game.clone();
    use_effect_with_deps(
        move |config| {
            cloned_game.dispatch(GameAction::Start(config.clone()));
            || ()
        },
        config,
    );

    let dispatch = |action: fn() -> GameAction| {
        let game = game.clone();
        Callback::from(move |_: web_sys::MouseEvent| game.dispatch(action()))
    };
    let on_play = dispatch(|| GameAction::Play);
    let on_restart = dispatch(|| GameAction::Restart);
    let on_dismiss = dispatch(|| GameAction::DismissPopup);

    let state = game.state().clone();
    let score = game.score_animator.borrow().frame();
    let symbols = game.symbols().clone();

    let field = match game.engine.field() {
        Field::Grid {
            board,
            last_revealed,
        } => html! {
            <Board
                board={board.clone()}
                last_revealed={last_revealed.clone()}
                symbols={symbols}
                cell_size={cell_size} />
        },
        Field::Line(round) => html! {
            <Lines round={round.clone()} symbols={symbols} cell_size={cell_size} />
        },
    };

    let font_size = cell_size * 0.4;
    let width = cell_size * 8.;
    let center_x = width / 2.;
    let label = if state.in_progress {
        "DIGGING..."
    } else {
        "DIG!"
    };

    html! {
        <div class="game">
            <Panel
                state={state.clone()}
                score={score}
                levels={game.levels().cloned()} />
            {field}
            <svg width={width.to_string()} height={(cell_size * 1.2).to_string()}>
                if state.game_over {
                    <text x={center_x.to_string()} y={(cell_size * 0.3).to_string()} class="text-center" font-size={format!("{}px", font_size)}>
                        {format!("GAME OVER - FINAL SCORE {}", state.score)}
                    </text>
                    <Button x={center_x} y={cell_size * 0.8} font_size={format!("{}px", font_size)} disabled={state.in_progress} onclick={on_restart}>
                        {"NEW GAME"}
                    </Button>
                } else {
                    <Button x={center_x} y={cell_size * 0.6} font_size={format!("{}px", font_size * 1.5)} disabled={!state.can_play()} onclick={on_play}>
                        {label}
                    </Button>
                }
            </svg>
            if let Some(popup) = state.popup.clone() {
                <Popup popup={popup} ondismiss={on_dismiss} />
            }
        </div>
    }
}
