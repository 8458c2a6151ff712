use crate::game;
use yew::prelude::*;

#[derive(Properties, PartialEq)]
pub struct Props {
    pub popup: game::Popup,
    pub ondismiss: Callback<web_sys::MouseEvent>,
}

#[function_component(Popup)]
pub fn popup(props: &Props) -> Html {
    let Props { popup, ondismiss } = props;

    let stop = Callback::from(|event: web_sys::MouseEvent| event.stop_propagation());
    let on_continue = {
        let ondismiss = ondismiss.clone();
        Callback::from(move |event: web_sys::MouseEvent| {
            event.prevent_default();
            ondismiss.emit(event);
        })
    };

    let body = match popup {
        game::Popup::Bonus { message, points } => html! {
            <>
                <h2>{"BONUS!"}</h2>
                <p>{message}</p>
                <p class="gain">{format!("{:+} points", points)}</p>
            </>
        },
        game::Popup::LevelUp(level_up) => html! {
            <>
                <h2>{format!("LEVEL {}!", level_up.level)}</h2>
                <p>{format!("You are now a {}", level_up.title)}</p>
                <ul>
                    {for level_up.rewards.iter().map(|reward| html! { <li>{reward}</li> })}
                </ul>
            </>
        },
    };

    html! {
        <div class="popup-overlay" onclick={ondismiss.clone()}>
            <div class="popup" onclick={stop}>
                {body}
                <a href="#" onclick={on_continue}>{"CONTINUE"}</a>
            </div>
        </div>
    }
}
