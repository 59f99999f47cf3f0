use clap::{Args as ClapArgs, Parser, Subcommand};

#[derive(Debug, Parser)]
#[command(name = "castmind", version, about = "Context routing and assembly for podcast QA")]
pub struct Args {
    #[command(subcommand)]
    pub command: Commands,
}

#[derive(Debug, Subcommand)]
pub enum Commands {
    /// Answer-context assembly for one question.
    Ask(AskArgs),
    /// Write a commented starter config.toml to the current directory.
    Init(InitArgs),
}

#[derive(Debug, ClapArgs)]
pub struct AskArgs {
    /// The question to build context for.
    pub question: String,

    /// Restrict local retrieval to one episode.
    #[arg(long, default_value = "")]
    pub episode: String,

    /// Print the full outcome as JSON instead of the text summary.
    #[arg(long)]
    pub json: bool,
}

#[derive(Debug, ClapArgs)]
pub struct InitArgs {
    /// Overwrite an existing config.toml.
    #[arg(long)]
    pub force: bool,
}
