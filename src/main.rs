// Timers and per-card animation handles only exist under the GTK front-end
#[cfg(any(test, feature = "ui"))]
mod animation;
mod assets;
// The window drives these state machines; a headless build only prints their resting views
#[cfg_attr(not(feature = "ui"), allow(dead_code))]
mod card;
mod cli;
mod config;
mod contact;
mod device;
mod error;
#[cfg_attr(not(feature = "ui"), allow(dead_code))]
mod hero;
mod layout;
mod models;
mod routes;
mod sections;

#[cfg(feature = "ui")]
mod app;
#[cfg(feature = "ui")]
mod ui;

use anyhow::Result;

use config::Settings;

fn main() -> Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::from_default_env()
                .add_directive("thirdspace=info".parse()?),
        )
        .init();

    let settings = Settings::from_env();
    let command = cli::parse_args(std::env::args().skip(1))?;

    match command {
        #[cfg(feature = "ui")]
        cli::Command::Default => {
            let catalog = cli::load_catalog(&settings)?;
            let app = app::ThirdspaceApp::new(settings, catalog);
            std::process::exit(app.run());
        }
        command => cli::run(command, &settings),
    }
}
