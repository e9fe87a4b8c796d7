mod app;
mod config;
mod library;
mod player;
mod runtime;
mod ui;
mod wave;

fn main() -> Result<(), Box<dyn std::error::Error>> {
    runtime::run()
}
