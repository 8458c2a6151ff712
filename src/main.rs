mod animation;
mod components;
mod game;

fn main() {
    console_error_panic_hook::set_once();
    console_log::init_with_level(log::Level::Debug).ok();
    yew::start_app::<components::app::App>();
}
