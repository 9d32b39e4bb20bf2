use clap::{CommandFactory, Parser, Subcommand};
use std::path::PathBuf;

#[derive(Parser, Debug)]
#[command(name = "dossier", bin_name = "dossier", version)]
#[command(about = "Build press dossiers out of paginated documents", long_about = None)]
pub struct Cli {
    /// Directory holding config.json (defaults to $DOSSIER_HOME, then the platform config dir)
    #[arg(long, value_name = "DIR")]
    pub config_dir: Option<PathBuf>,

    /// Verbose logging on stderr
    #[arg(short, long)]
    pub verbose: bool,

    /// Documents to load before the shell starts
    pub files: Vec<PathBuf>,
}

/// One line typed into the shell. The first word is the command name.
#[derive(Parser, Debug)]
#[command(multicall = true, disable_help_subcommand = true)]
pub struct ShellLine {
    #[command(subcommand)]
    pub command: ShellCommand,
}

#[derive(Subcommand, Debug)]
pub enum ShellCommand {
    /// List loaded documents
    #[command(alias = "documents", display_order = 1)]
    Docs,

    /// Load a form-feed paginated text document
    #[command(display_order = 2)]
    Load {
        file: PathBuf,

        /// Display name (defaults to the file name)
        #[arg(long)]
        name: Option<String>,
    },

    /// Show every page of a document
    #[command(display_order = 3)]
    Browse {
        /// Document number, as listed by `docs`
        document: usize,
    },

    /// List dossiers
    #[command(alias = "ls", display_order = 10)]
    Dossiers,

    /// Create a dossier and select it
    #[command(display_order = 11)]
    New {
        #[arg(required = true, trailing_var_arg = true, allow_hyphen_values = true)]
        name: Vec<String>,
    },

    /// Select the dossier pages are added to
    #[command(display_order = 12)]
    Select {
        /// Dossier number, as listed by `dossiers`
        dossier: usize,
    },

    /// Show the selected dossier
    #[command(display_order = 13)]
    Show {
        /// Print the dossier as JSON
        #[arg(long)]
        json: bool,
    },

    /// Add a document page to the selected dossier
    #[command(display_order = 20)]
    Add { document: usize, page: u32 },

    /// Remove pages from the selected dossier (e.g. `remove 2 4-5`)
    #[command(alias = "rm", display_order = 21)]
    Remove {
        #[arg(required = true)]
        positions: Vec<String>,
    },

    /// Set the page order; pages left out are removed
    #[command(display_order = 22)]
    Order {
        #[arg(required = true)]
        positions: Vec<String>,
    },

    /// Attach a marker to a page
    #[command(display_order = 23)]
    Mark {
        position: String,

        #[arg(trailing_var_arg = true, allow_hyphen_values = true)]
        text: Vec<String>,
    },

    /// Remove a marker from a page
    #[command(display_order = 24)]
    Unmark {
        position: String,
        /// Marker number, as shown by `show`
        marker: usize,
    },

    /// Show or change configuration (`config cover-subtitle Resumen`)
    #[command(display_order = 30)]
    Config {
        /// Configuration key (e.g. cover-subtitle)
        key: Option<String>,

        /// Value to set (if omitted, prints the current value)
        #[arg(trailing_var_arg = true, allow_hyphen_values = true)]
        value: Vec<String>,
    },

    /// List commands
    #[command(display_order = 31)]
    Help,

    /// Leave the shell
    #[command(alias = "exit", display_order = 32)]
    Quit,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CommandGroup {
    Documents,
    Dossiers,
    Pages,
    Misc,
}

impl CommandGroup {
    pub fn heading(&self) -> &'static str {
        match self {
            CommandGroup::Documents => "Document Commands:",
            CommandGroup::Dossiers => "Dossier Commands:",
            CommandGroup::Pages => "Page Commands:",
            CommandGroup::Misc => "Miscellaneous:",
        }
    }

    pub fn for_command(name: &str) -> Option<Self> {
        match name {
            "docs" | "load" | "browse" => Some(CommandGroup::Documents),
            "dossiers" | "new" | "select" | "show" => Some(CommandGroup::Dossiers),
            "add" | "remove" | "order" | "mark" | "unmark" => Some(CommandGroup::Pages),
            "config" | "help" | "quit" => Some(CommandGroup::Misc),
            _ => None,
        }
    }

    pub fn all() -> &'static [CommandGroup] {
        &[
            CommandGroup::Documents,
            CommandGroup::Dossiers,
            CommandGroup::Pages,
            CommandGroup::Misc,
        ]
    }
}

/// Shell help with commands grouped by what they act on.
pub fn get_grouped_help() -> String {
    let cmd = ShellLine::command();
    let subcommands: Vec<_> = cmd.get_subcommands().collect();
    let mut output = String::new();

    for group in CommandGroup::all() {
        let group_cmds: Vec<_> = subcommands
            .iter()
            .filter(|sc| CommandGroup::for_command(sc.get_name()) == Some(*group))
            .collect();

        if group_cmds.is_empty() {
            continue;
        }
        if !output.is_empty() {
            output.push('\n');
        }
        output.push_str(&format!("{}\n", group.heading()));
        for sc in group_cmds {
            let about = sc.get_about().map(|s| s.to_string()).unwrap_or_default();
            output.push_str(&format!("  {:<10} {}\n", sc.get_name(), about));
        }
    }

    output
}
