use clap::Parser;
use color_eyre::Result;
use engine::APP_NAME;
use luminagen::{Gui, cli::Cli, load_config};

pub fn main() -> Result<()> {
    color_eyre::install()?;
    pretty_env_logger::init();
    let cfg = load_config(Cli::parse())?;
    iced::application(move || Gui::new(cfg.clone()), Gui::update, Gui::view)
        .title(APP_NAME)
        .theme(Gui::theme)
        .run()?;
    Ok(())
}
