//! Ant-Todo Frontend Entry Point

mod models;
mod error;
mod selection;
mod search;
mod form;
mod gateway;
mod controller;
mod context;
mod components;
mod app;

use app::App;
use leptos::prelude::*;

fn main() {
    console_error_panic_hook::set_once();
    let _ = console_log::init_with_level(log::Level::Info);
    mount_to_body(App);
}
