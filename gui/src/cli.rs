use engine::image_model::Model;

#[derive(Debug, clap::Parser)]
pub struct Cli {
    /// Overrides API_KEY / GEMINI_API_KEY and the config file
    #[arg(short, long)]
    pub api_key: Option<String>,

    #[arg(short, long)]
    pub model: Option<Model>,
}
