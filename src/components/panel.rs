use crate::game::{GameState, LevelTable};
use yew::prelude::*;

#[derive(Properties, PartialEq)]
pub struct Props {
    pub state: GameState,
    /// Displayed score, eased toward `state.score`.
    pub score: i64,
    #[prop_or_default]
    pub levels: Option<LevelTable>,
}

#[function_component(Panel)]
pub fn panel(props: &Props) -> Html {
    let Props {
        state,
        score,
        levels,
    } = props;

    let change = match state.last_points_change {
        0 => html! {},
        points => {
            let class = if points > 0 { "gain" } else { "loss" };
            html! { <span class={class}>{format!(" ({:+})", points)}</span> }
        }
    };

    let progression = match (&state.progression, levels) {
        (Some(progression), Some(levels)) => {
            let next = match levels.next_threshold(progression.level) {
                Some(threshold) => format!("{} / {} XP", progression.experience, threshold),
                None => format!("{} XP", progression.experience),
            };
            html! {
                <div class="progression">
                    <span>{format!("LV {} {}", progression.level, levels.title(progression.level))}</span>
                    <span>{next}</span>
                    <span>{format!("x{:.2}", progression.multiplier(levels))}</span>
                </div>
            }
        }
        _ => html! {},
    };

    html! {
        <div class="panel">
            <div class="score">
                {format!("SCORE: {}", score)}
                {change}
            </div>
            <div class="attempts">{format!("DIGS LEFT: {}", state.remaining_attempts)}</div>
            {progression}
        </div>
    }
}
