use yew::prelude::*;

#[derive(Properties, PartialEq)]
pub struct Props {
    pub x: f64,
    pub y: f64,
    pub font_size: String,
    #[prop_or_default]
    pub disabled: bool,
    #[prop_or_default]
    pub children: Children,
    pub onclick: Callback<web_sys::MouseEvent>,
}

/// SVG text button framed by its own bounding box.
#[function_component(Button)]
pub fn button(props: &Props) -> Html {
    let Props {
        x,
        y,
        font_size,
        disabled,
        children,
        onclick,
    } = props;

    let rect = use_state(|| None);
    let text_ref = use_node_ref();

    let cloned_rect = rect.clone();
    use_effect_with_deps(
        move |(text_ref, _)| {
            if let Some(text) = text_ref.cast::<web_sys::SvgGraphicsElement>() {
                if let Ok(bbox) = text.get_b_box() {
                    cloned_rect.set(Some((
                        bbox.x() - 4.,
                        bbox.y() - 2.,
                        bbox.width() + 8.,
                        bbox.height() + 4.,
                    )));
                }
            }
            || ()
        },
        (text_ref.clone(), children.clone()),
    );

    let onclick = {
        let onclick = onclick.clone();
        let disabled = *disabled;
        Callback::from(move |event: web_sys::MouseEvent| {
            if !disabled {
                onclick.emit(event);
            }
        })
    };
    let class = if *disabled { "button disabled" } else { "button" };

    html! {
        <g class={class}>
            if let Some((x, y, width, height)) = *rect {
                <rect x={x.to_string()} y={y.to_string()} width={width.to_string()} height={height.to_string()} stroke="#FFF" stroke-width="1px" fill="#000" />
            }
            <text
                x={x.to_string()}
                y={y.to_string()}
                font-size={font_size.clone()}
                onclick={onclick}
                fill="#FFF"
                dominant-baseline="middle"
                text-anchor="middle"
                ref={text_ref}>
                {for children.iter()}
            </text>
        </g>
    }
}
