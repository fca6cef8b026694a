//! SaveScum CLI - Backup or restore They Are Billions saves from the command line

use clap::Parser;
use savescum::{delete_all, list_all, Config, Error, GameSave, ListingOptions};
use std::io::{self, BufRead, Write};
use std::path::PathBuf;

#[derive(Parser)]
#[command(name = "savescum")]
#[command(author, version)]
#[command(about = "Backup or restore a save from the game They Are Billions")]
#[command(arg_required_else_help = true)]
struct Cli {
    /// The name of the save
    #[arg(required_unless_present_any = ["list_all", "delete_all"])]
    name: Option<String>,

    /// Backup the active save files (default mode)
    #[arg(short, long, group = "mode")]
    backup: bool,

    /// Restore a backup over the active save files
    #[arg(short, long, group = "mode")]
    restore: bool,

    /// List all backups for the save
    #[arg(short, long, group = "mode")]
    list: bool,

    /// List all backups for all saves
    #[arg(short = 'L', long, group = "mode")]
    list_all: bool,

    /// Delete all backups for the save
    #[arg(long, group = "mode")]
    delete: bool,

    /// Delete all backups for all saves
    #[arg(long, group = "mode")]
    delete_all: bool,

    /// The index to use; defaults to a new index when backing up and the
    /// greatest existing index when restoring
    #[arg(short)]
    n: Option<u32>,

    /// Include the directory path column in listings
    #[arg(short, long)]
    path: bool,

    /// Auto-complete all confirmation dialogs
    #[arg(short = 'y', long)]
    auto_confirm: bool,

    /// Attach a message to a new backup; as a bare flag in list modes,
    /// include the message column
    #[arg(short, long, num_args = 0..=1, default_missing_value = "")]
    message: Option<String>,

    /// Output more information
    #[arg(short, long)]
    verbose: bool,
}

fn main() {
    let cli = Cli::parse();

    if let Err(e) = run(cli) {
        eprintln!("Error: {}", e);
        std::process::exit(1);
    }
}

fn run(cli: Cli) -> savescum::Result<()> {
    let config = load_or_init_config()?;

    let options = ListingOptions {
        verbose: cli.verbose,
        include_path: cli.path,
        include_message: cli.message.is_some(),
    };

    if cli.delete_all {
        return delete_all();
    }
    if cli.list_all {
        println!("{}", list_all(&config, &options, None)?);
        return Ok(());
    }

    let name = match cli.name {
        Some(name) => name,
        None => return Err(Error::InvalidArgument("a save name is required".to_string())),
    };
    let mut save = GameSave::new(&name, &config)?;

    if cli.list {
        println!("{}", save.get_listing(&options)?);
    } else if cli.restore {
        save.restore(cli.n)?;
    } else if cli.delete {
        save.delete(!cli.auto_confirm, yn_input)?;
    } else {
        let message = cli.message.as_deref().filter(|m| !m.is_empty());
        save.backup(cli.n, message)?;
    }
    Ok(())
}

/// Load the config, interactively creating it on first run
fn load_or_init_config() -> savescum::Result<Config> {
    if Config::config_path()?.is_file() {
        return Config::load();
    }

    let stdin = io::stdin();
    loop {
        print!("We need to know the absolute path to the They Are Billions save directory.\nPath: ");
        io::stdout().flush()?;

        let mut line = String::new();
        if stdin.lock().read_line(&mut line)? == 0 {
            return Err(Error::InvalidArgument(
                "no save directory provided".to_string(),
            ));
        }

        let path = PathBuf::from(line.trim());
        if path.is_dir() {
            let config = Config::new(path);
            config.save()?;
            return Ok(config);
        }
        println!("That was not a directory... try again.");
    }
}

/// Ask a yes/no question until an answer expands to "yes" or "no"
///
/// Any prefix counts: "y", "ye" and "yes" all affirm. EOF declines.
fn yn_input(prompt: &str) -> bool {
    let stdin = io::stdin();
    loop {
        print!("{}", prompt);
        let _ = io::stdout().flush();

        let mut line = String::new();
        match stdin.lock().read_line(&mut line) {
            Ok(0) | Err(_) => return false,
            Ok(_) => {}
        }

        let answer = line.trim().to_lowercase();
        if can_expand_to_match(&answer, "yes") {
            return true;
        }
        if can_expand_to_match(&answer, "no") {
            return false;
        }
    }
}

/// Check whether `abr` is an abbreviation of (or equal to) `target`
fn can_expand_to_match(abr: &str, target: &str) -> bool {
    target.starts_with(abr)
}
