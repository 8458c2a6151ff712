pub mod app;
mod board;
mod button;
mod cell;
mod game;
mod lines;
mod panel;
mod popup;
