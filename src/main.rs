mod app;
mod audio;
mod config;
mod embed;
mod library;
mod mpris;
mod prefs;
mod runtime;
mod ui;

fn main() -> Result<(), Box<dyn std::error::Error>> {
    runtime::run()
}
