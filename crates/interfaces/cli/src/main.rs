mod note_cmds;

use std::path::{Path, PathBuf};

use anyhow::{Result, bail};
use chrono::Local;
use clap::{ArgAction, Parser, Subcommand};
use tracing::debug;
use tracing_subscriber::EnvFilter;

use note_config::NotePaths;
use note_store::Manager;

#[derive(Debug, Parser)]
#[command(
    name = "note",
    version,
    about = "Personal markdown notes from the command line"
)]
struct Cli {
    /// Config file to use instead of `{config_dir}/note.json`.
    #[arg(long, global = true, env = "NOTE_CONFIG", value_name = "PATH")]
    config_file: Option<PathBuf>,
    /// Note index to use instead of `{data_dir}/notes/manager.json`.
    #[arg(long, global = true, env = "NOTE_INDEX", value_name = "PATH")]
    index_file: Option<PathBuf>,
    /// Notes directory written into a freshly created config.
    #[arg(long, global = true, env = "NOTE_DIRECTORY", value_name = "PATH")]
    notes_dir: Option<PathBuf>,
    /// Log to stderr (`-v` info, `-vv` debug).  `RUST_LOG` takes precedence.
    #[arg(short, long, global = true, action = ArgAction::Count)]
    verbose: u8,
    #[command(subcommand)]
    command: Commands,
}

#[derive(Debug, Subcommand)]
enum Commands {
    /// Create a new note and open it in the editor.
    New { title: String },
    /// Open and edit an existing note.
    Edit { title: String },
    /// Remove a note.
    #[command(visible_alias = "rm")]
    Remove { title: String },
    /// List existing notes.
    #[command(visible_alias = "ls")]
    List,
    /// Show metadata about a note.
    Info { title: String },
    /// Save a note, with front matter, to a directory.
    Publish {
        title: String,
        #[arg(default_value = ".")]
        directory: PathBuf,
    },
    /// Open the configuration file in the editor.
    Config,
}

fn main() -> Result<()> {
    dotenvy::dotenv().ok();
    let cli = Cli::parse();
    init_tracing(cli.verbose);

    let paths = resolve_paths(&cli)?;
    debug!(?paths, "resolved note paths");

    match cli.command {
        Commands::New { title } => {
            let title = require_title(&title)?;
            let mut manager = Manager::bootstrap(paths)?;
            manager.create_note(title)?;
            manager.open_note(title)?;
            println!("note created successfully");
        }
        Commands::Edit { title } => {
            let title = require_title(&title)?;
            let mut manager = Manager::bootstrap(paths)?;
            manager.open_note(title)?;
            println!("note \"{title}\" saved successfully");
        }
        Commands::Remove { title } => {
            let title = require_title(&title)?;
            let mut manager = Manager::bootstrap(paths)?;
            manager.delete_note(title)?;
            println!("note removed successfully");
        }
        Commands::List => {
            let manager = Manager::bootstrap(paths)?;
            for line in note_cmds::list_lines(manager.get_notes(), &Local) {
                println!("{line}");
            }
        }
        Commands::Info { title } => {
            let title = require_title(&title)?;
            let manager = Manager::bootstrap(paths)?;
            let Some(note) = manager.get_note(title) else {
                bail!("note \"{title}\" does not exist");
            };
            for line in note_cmds::info_lines(note, &Local) {
                println!("{line}");
            }
        }
        Commands::Publish { title, directory } => {
            let title = require_title(&title)?;
            if directory.as_os_str().is_empty() {
                bail!("directory cannot be empty");
            }
            let manager = Manager::bootstrap(paths)?;
            manager.publish_note(title, &directory)?;
            if directory == Path::new(".") {
                println!("note saved to current directory");
            } else {
                println!("note saved to {}", directory.display());
            }
        }
        Commands::Config => {
            let mut manager = Manager::bootstrap(paths)?;
            manager.open_config()?;
            println!("configuration file edited successfully");
        }
    }

    Ok(())
}

fn init_tracing(verbose: u8) {
    let default_level = match verbose {
        0 => "off",
        1 => "info",
        _ => "debug",
    };
    let filter =
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default_level));
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .init();
}

fn resolve_paths(cli: &Cli) -> Result<NotePaths> {
    let mut paths = NotePaths::for_current_user()?;
    if let Some(path) = &cli.config_file {
        paths = paths.with_config_path(path);
    }
    if let Some(path) = &cli.index_file {
        paths = paths.with_index_path(path);
    }
    if let Some(path) = &cli.notes_dir {
        paths = paths.with_default_directory(path);
    }
    Ok(paths)
}

fn require_title(title: &str) -> Result<&str> {
    if title.trim().is_empty() {
        bail!("title cannot be empty");
    }
    Ok(title)
}

#[cfg(test)]
mod tests {
    use super::*;
    use clap::CommandFactory;

    #[test]
    fn cli_definition_is_valid() {
        Cli::command().debug_assert();
    }

    #[test]
    fn aliases_parse() {
        let cli = Cli::try_parse_from(["note", "rm", "old"]).unwrap();
        assert!(matches!(cli.command, Commands::Remove { ref title } if title == "old"));

        let cli = Cli::try_parse_from(["note", "ls"]).unwrap();
        assert!(matches!(cli.command, Commands::List));
    }

    #[test]
    fn publish_defaults_to_current_directory() {
        let cli = Cli::try_parse_from(["note", "publish", "draft"]).unwrap();
        match cli.command {
            Commands::Publish { title, directory } => {
                assert_eq!(title, "draft");
                assert_eq!(directory, PathBuf::from("."));
            }
            other => panic!("unexpected command {other:?}"),
        }
    }

    #[test]
    fn global_path_overrides_apply() {
        let cli = Cli::try_parse_from([
            "note",
            "list",
            "--config-file",
            "/tmp/cfg.json",
            "--index-file",
            "/tmp/index.json",
            "--notes-dir",
            "/tmp/entries",
        ])
        .unwrap();
        let paths = resolve_paths(&cli).unwrap();
        assert_eq!(paths.config_path, PathBuf::from("/tmp/cfg.json"));
        assert_eq!(paths.index_path, PathBuf::from("/tmp/index.json"));
        assert_eq!(paths.default_directory, PathBuf::from("/tmp/entries"));
    }

    #[test]
    fn new_requires_a_title() {
        assert!(Cli::try_parse_from(["note", "new"]).is_err());
        assert!(require_title("  ").is_err());
        assert_eq!(require_title("ideas").unwrap(), "ideas");
    }
}
