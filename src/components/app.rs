use super::game::Game;
use crate::game::GameConfig;
use yew::prelude::*;

const VIEW_WIDTH: f64 = 8.;
const VIEW_HEIGHT: f64 = 9.;

/// Element the host page may fill with a JSON `GameConfig`.
const CUSTOM_CONFIG_ID: &str = "custom-mode";

fn fit_with_aspect_ratio(
    width: f64,
    height: f64,
    aspect_width: f64,
    aspect_height: f64,
) -> (f64, f64) {
    if width * aspect_height > height * aspect_width {
        (height * aspect_width / aspect_height, height)
    } else {
        (width, width * aspect_height / aspect_width)
    }
}

fn custom_config() -> Option<GameConfig> {
    let json = web_sys::window()?
        .document()?
        .get_element_by_id(CUSTOM_CONFIG_ID)?
        .text_content()?;
    match GameConfig::from_json(&json) {
        Ok(config) => Some(config),
        Err(error) => {
            log::error!("custom mode ignored: {}", error);
            None
        }
    }
}

#[derive(Clone, Copy, PartialEq)]
enum GameMode {
    Excavation,
    Expedition,
    QuickDig,
    Custom,
}

impl GameMode {
    fn title(self) -> &'static str {
        match self {
            GameMode::Excavation => "EXCAVATION",
            GameMode::Expedition => "EXPEDITION",
            GameMode::QuickDig => "QUICK DIG",
            GameMode::Custom => "CUSTOM",
        }
    }
}

#[function_component(App)]
pub fn app() -> Html {
    let mode: UseStateHandle<Option<GameMode>> = use_state(|| None);
    let custom = use_state(custom_config);
    let window = web_sys::window().unwrap();
    let width = window.inner_width().unwrap().as_f64().unwrap();
    let height = window.inner_height().unwrap().as_f64().unwrap();
    let (resized_width, _) =
        fit_with_aspect_ratio(width - 20., height - 20., VIEW_WIDTH, VIEW_HEIGHT);
    let cell_size = (resized_width / VIEW_WIDTH).min(96.);

    let mut modes = vec![GameMode::Excavation, GameMode::Expedition, GameMode::QuickDig];
    if custom.is_some() {
        modes.push(GameMode::Custom);
    }

    let cloned_mode = mode.clone();
    let select_mode = |selected: GameMode| {
        let cloned_mode = cloned_mode.clone();
        Callback::from(move |event: web_sys::MouseEvent| {
            event.prevent_default();
            cloned_mode.set(Some(selected));
        })
    };
    let links = modes.iter().map(|&each| {
        let class = if *mode == Some(each) { "tab selected" } else { "tab" };
        html! {
            <a href="#" class={class} onclick={select_mode(each)}>{each.title()}</a>
        }
    });

    match *mode {
        None => html! {
            <div class="app">
                <h1>{"Archaeological Expedition"}</h1>
                <h2>{"Help the archaeologist find the treasures"}</h2>
                {for links.map(|link| html! { <h3>{link}</h3> })}
                <p class="notice">{"Free to play. No real money, no prizes: points have no real-world value."}</p>
            </div>
        },
        Some(selected) => {
            let config = match selected {
                GameMode::Excavation => GameConfig::grid(),
                GameMode::Expedition => GameConfig::expedition(),
                GameMode::QuickDig => GameConfig::quick_dig(),
                GameMode::Custom => (*custom).clone().unwrap_or_else(GameConfig::grid),
            };
            html! {
                <div class="app">
                    <nav class="tabs">{for links}</nav>
                    <Game config={config} cell_size={cell_size} />
                </div>
            }
        }
    }
}
