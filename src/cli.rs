use clap::{Parser, Subcommand, ValueEnum};

#[derive(Debug, Parser)]
#[command(
    name = "podshelf",
    version,
    about = "Browse podcast shows, seasons and episodes from the terminal"
)]
pub struct Cli {
    /// Podcast API base URL (overrides PODSHELF_BASE_URL)
    #[arg(long, global = true)]
    pub base_url: Option<String>,

    /// Enable debug logging
    #[arg(short, long, global = true)]
    pub verbose: bool,

    #[command(subcommand)]
    pub command: Option<Command>,
}

#[derive(Debug, Subcommand)]
pub enum Command {
    /// Interactive browser (default)
    Tui,
    /// Print all show previews
    List {
        #[arg(long, value_enum, default_value_t = SortArg::Title)]
        sort: SortArg,
        /// Only show titles containing this text
        #[arg(long)]
        filter: Option<String>,
    },
    /// Print one show with its seasons and episodes
    Show { id: String },
    /// Fetch one genre from the API
    Genre { id: u32 },
    /// Print the built-in genre table
    Genres,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub enum SortArg {
    Title,
    TitleDesc,
    Newest,
    Oldest,
}

impl Cli {
    pub fn is_interactive(&self) -> bool {
        matches!(self.command, None | Some(Command::Tui))
    }
}
