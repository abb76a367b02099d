mod app;
mod config;
mod controller;
mod error;
mod library;
mod logging;
mod media;
mod runtime;
mod source;
mod ui;

fn main() -> Result<(), Box<dyn std::error::Error>> {
    runtime::run()
}
