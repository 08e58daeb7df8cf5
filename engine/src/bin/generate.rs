use std::path::PathBuf;

use clap::Parser;
use color_eyre::{Result, eyre::eyre};
use engine::{
    AspectRatio, GenerationClient, Studio,
    config::Config,
    generation::save_image,
    image_model::Model,
};

/// Generate a single image and write it to disk
#[derive(clap::Parser)]
struct Arg {
    prompt: String,

    #[arg(short, long, default_value = "1:1")]
    aspect_ratio: AspectRatio,

    #[arg(short, long)]
    model: Option<Model>,

    /// Takes precedence over the config file and the environment
    #[arg(long)]
    api_key: Option<String>,

    #[arg(short, long, default_value = ".")]
    out_dir: PathBuf,
}

#[tokio::main]
async fn main() -> Result<()> {
    color_eyre::install()?;
    pretty_env_logger::init();

    let Arg {
        prompt,
        aspect_ratio,
        model,
        api_key,
        out_dir,
    } = Arg::parse();

    let mut cfg = Config::load()?.with_credential(api_key);
    if let Some(model) = model {
        cfg.model = model;
    }
    let client = GenerationClient::from_config(&cfg);

    let mut studio = Studio::new();
    studio.set_prompt(prompt);
    studio.set_aspect_ratio(aspect_ratio);
    if !studio.submit_with(&client).await {
        return Err(eyre!("Prompt must not be empty"));
    }

    if let Some(error) = studio.error() {
        return Err(eyre!("{error}"));
    }

    let image = studio
        .gallery()
        .list()
        .first()
        .ok_or(eyre!("Generation finished without an image"))?;
    let path = save_image(image, &out_dir)?;
    println!("{} -> {}", image.id, path.display());

    Ok(())
}
