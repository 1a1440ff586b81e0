use clap::{CommandFactory, Parser, Subcommand};

#[derive(Parser, Debug)]
#[command(
    name = "marknotes",
    bin_name = "marknotes",
    version,
    disable_help_flag = true,
    disable_help_subcommand = true
)]
#[command(about = "Markdown notebook for the terminal", long_about = None)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Option<Commands>,

    /// Verbose output (debug logging)
    #[arg(short, long, global = true, help_heading = "Options")]
    pub verbose: bool,

    /// Print help
    #[arg(short, long, global = true)]
    pub help: bool,
}

/// Command group definitions for help output
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CommandGroup {
    Core,
    Note,
    Organize,
    Data,
    Misc,
}

impl CommandGroup {
    pub fn heading(&self) -> &'static str {
        match self {
            CommandGroup::Core => "Core Commands:",
            CommandGroup::Note => "Per-Note Commands:",
            CommandGroup::Organize => "Organizing:",
            CommandGroup::Data => "Data Commands:",
            CommandGroup::Misc => "Miscellaneous:",
        }
    }

    pub fn for_command(name: &str) -> Option<Self> {
        match name {
            "create" | "list" | "search" => Some(CommandGroup::Core),
            "view" | "edit" | "select" | "delete" | "restore" | "favorite" | "color" => {
                Some(CommandGroup::Note)
            }
            "tag" | "folder" | "template" => Some(CommandGroup::Organize),
            "purge" | "export" | "import" | "stats" => Some(CommandGroup::Data),
            "settings" | "help" => Some(CommandGroup::Misc),
            _ => None,
        }
    }

    pub fn all() -> &'static [CommandGroup] {
        &[
            CommandGroup::Core,
            CommandGroup::Note,
            CommandGroup::Organize,
            CommandGroup::Data,
            CommandGroup::Misc,
        ]
    }
}

pub fn get_grouped_help() -> String {
    let cmd = Cli::command();
    let version = cmd.get_version().unwrap_or("unknown");

    let mut output = String::new();
    output.push_str(&format!("marknotes {version}\n"));
    output.push_str("Markdown notebook for the terminal\n");
    output.push('\n');
    output.push_str("Usage: marknotes [OPTIONS] [COMMAND]\n");

    let subcommands: Vec<_> = cmd.get_subcommands().collect();

    for group in CommandGroup::all() {
        let group_cmds: Vec<_> = subcommands
            .iter()
            .filter(|sc| {
                !sc.is_hide_set() && CommandGroup::for_command(sc.get_name()) == Some(*group)
            })
            .collect();

        if !group_cmds.is_empty() {
            output.push('\n');
            output.push_str(&format!("{}\n", group.heading()));
            for sc in group_cmds {
                let name = sc.get_name();
                let about = sc.get_about().map(|s| s.to_string()).unwrap_or_default();
                output.push_str(&format!("  {:<12} {}\n", name, about));
            }
        }
    }

    output.push('\n');
    output.push_str("Notes are addressed by index (1, f1 for favorites, d1 for trash),\n");
    output.push_str("by id, or by a piece of their title.\n");
    output.push('\n');
    output.push_str("Options:\n");
    output.push_str("  -v, --verbose    Verbose output\n");
    output.push_str("  -h, --help       Print help\n");
    output.push_str("  -V, --version    Print version\n");

    output
}

pub fn print_grouped_help() {
    print!("{}", get_grouped_help());
}

/// Prints help for a command by name, falling back to the grouped help.
pub fn print_help_for_command(name: &str) {
    let mut cmd = Cli::command();

    for subcmd in cmd.get_subcommands_mut() {
        if subcmd.get_name() == name {
            let help = subcmd.render_help();
            print!("{}", help);
            return;
        }
    }

    eprintln!("Unknown command: {}", name);
    eprintln!();
    print_grouped_help();
}

/// Name of the subcommand that was parsed, for `<command> --help`.
pub fn command_name(command: &Commands) -> &'static str {
    match command {
        Commands::Core(c) => match c {
            CoreCommands::Create { .. } => "create",
            CoreCommands::List { .. } => "list",
            CoreCommands::Search { .. } => "search",
        },
        Commands::Note(c) => match c {
            NoteCommands::View { .. } => "view",
            NoteCommands::Edit { .. } => "edit",
            NoteCommands::Select { .. } => "select",
            NoteCommands::Delete { .. } => "delete",
            NoteCommands::Restore { .. } => "restore",
            NoteCommands::Favorite { .. } => "favorite",
            NoteCommands::Color { .. } => "color",
        },
        Commands::Organize(c) => match c {
            OrganizeCommands::Tag { .. } => "tag",
            OrganizeCommands::Folder { .. } => "folder",
            OrganizeCommands::Template { .. } => "template",
        },
        Commands::Data(c) => match c {
            DataCommands::Purge { .. } => "purge",
            DataCommands::Export { .. } => "export",
            DataCommands::Import { .. } => "import",
            DataCommands::Stats => "stats",
        },
        Commands::Misc(c) => match c {
            MiscCommands::Settings { .. } => "settings",
            MiscCommands::Help { .. } => "help",
        },
    }
}

#[derive(Subcommand, Debug)]
pub enum Commands {
    #[command(flatten)]
    Core(CoreCommands),

    #[command(flatten)]
    Note(NoteCommands),

    #[command(flatten)]
    Organize(OrganizeCommands),

    #[command(flatten)]
    Data(DataCommands),

    #[command(flatten)]
    Misc(MiscCommands),
}

#[derive(Subcommand, Debug)]
pub enum CoreCommands {
    /// Create a new note
    #[command(alias = "n", display_order = 1)]
    Create {
        /// Note body (skips the editor)
        #[arg(short, long)]
        content: Option<String>,

        /// Folder name or id
        #[arg(short, long)]
        folder: Option<String>,

        /// Tags to add (repeatable)
        #[arg(short, long = "tag")]
        tags: Vec<String>,

        /// Skip opening the editor
        #[arg(long)]
        no_editor: bool,

        /// Title words (joined with spaces)
        #[arg(trailing_var_arg = true)]
        title: Vec<String>,
    },

    /// List notes
    #[command(alias = "ls", display_order = 2)]
    List {
        /// Only notes in this folder (name or id)
        #[arg(long)]
        folder: Option<String>,

        /// Only notes carrying this tag
        #[arg(long)]
        tag: Option<String>,

        /// Only favorites
        #[arg(long)]
        favorites: bool,

        /// Only notes outside any folder
        #[arg(long)]
        unfiled: bool,

        /// Only notes updated recently
        #[arg(long)]
        recent: bool,

        /// Show the trash
        #[arg(long)]
        deleted: bool,
    },

    /// Search notes
    #[command(display_order = 3)]
    Search {
        /// Text to look for in titles and content
        #[arg(num_args = 0..)]
        term: Vec<String>,

        /// Required tag (repeatable, all must match)
        #[arg(short, long = "tag")]
        tags: Vec<String>,

        /// Only favorites
        #[arg(long, conflicts_with = "recent")]
        favorites: bool,

        /// Only notes updated recently
        #[arg(long)]
        recent: bool,

        /// Sort order: relevance, date or title
        #[arg(long, default_value = "relevance")]
        sort: String,
    },
}

#[derive(Subcommand, Debug)]
pub enum NoteCommands {
    /// View one or more notes
    #[command(alias = "v", display_order = 10)]
    View {
        /// Notes (e.g. 1 f1 d1 2-4, an id, or title words)
        #[arg(required = true, num_args = 1..)]
        indexes: Vec<String>,
    },

    /// Edit a note in $EDITOR, or directly with --title/--content
    #[command(alias = "e", display_order = 11)]
    Edit {
        /// New title
        #[arg(long)]
        title: Option<String>,

        /// New body
        #[arg(long)]
        content: Option<String>,

        /// Notes (e.g. 1 f1, an id, or title words)
        #[arg(required = true, num_args = 1..)]
        indexes: Vec<String>,
    },

    /// Make a note the current note
    #[command(display_order = 12)]
    Select {
        /// Note (e.g. 1, an id, or title words)
        #[arg(required = true, num_args = 1..)]
        indexes: Vec<String>,
    },

    /// Move notes to the trash
    #[command(alias = "rm", display_order = 13)]
    Delete {
        #[arg(required = true, num_args = 1..)]
        indexes: Vec<String>,
    },

    /// Restore notes from the trash
    #[command(display_order = 14)]
    Restore {
        /// Trash indexes (e.g. d1 d2)
        #[arg(required = true, num_args = 1..)]
        indexes: Vec<String>,
    },

    /// Toggle the favorite flag
    #[command(alias = "fav", display_order = 15)]
    Favorite {
        #[arg(required = true, num_args = 1..)]
        indexes: Vec<String>,
    },

    /// Set or clear a note's color
    #[command(display_order = 16)]
    Color {
        /// Note index
        index: String,

        /// Color such as #ff8800; omit to clear
        color: Option<String>,
    },
}

#[derive(Subcommand, Debug)]
pub enum OrganizeCommands {
    /// Manage tags
    #[command(display_order = 20)]
    Tag {
        #[command(subcommand)]
        action: TagCommands,
    },

    /// Manage folders
    #[command(display_order = 21)]
    Folder {
        #[command(subcommand)]
        action: FolderCommands,
    },

    /// Manage templates
    #[command(display_order = 22)]
    Template {
        #[command(subcommand)]
        action: TemplateCommands,
    },
}

#[derive(Subcommand, Debug)]
pub enum TagCommands {
    /// Add tags to a note
    Add {
        index: String,
        #[arg(required = true, num_args = 1..)]
        tags: Vec<String>,
    },

    /// Remove tags from a note
    Rm {
        index: String,
        #[arg(required = true, num_args = 1..)]
        tags: Vec<String>,
    },

    /// List tags in use and tag records
    Ls,

    /// Create a tag record
    Create {
        name: String,
        #[arg(long, default_value = "#3b82f6")]
        color: String,
    },

    /// Update a tag record
    Update {
        name: String,
        #[arg(long = "name")]
        new_name: Option<String>,
        #[arg(long)]
        color: Option<String>,
    },

    /// Delete a tag record (notes keep the tag)
    Delete { name: String },
}

#[derive(Subcommand, Debug)]
pub enum FolderCommands {
    /// Create a folder
    Create {
        name: String,
        /// Parent folder name or id
        #[arg(long)]
        parent: Option<String>,
    },

    /// List folders
    Ls {
        /// Show trashed folders
        #[arg(long)]
        deleted: bool,
    },

    /// Rename a folder
    Rename { folder: String, name: String },

    /// Move a note into a folder, or out of any folder when none is given
    Move { index: String, folder: Option<String> },

    /// Trash a folder and its direct subfolders; its notes become unfiled
    Delete { folder: String },

    /// Restore a trashed folder
    Restore { folder: String },

    /// Permanently remove a trashed folder
    Purge { folder: String },
}

#[derive(Subcommand, Debug)]
pub enum TemplateCommands {
    /// List templates
    Ls,

    /// Create a note from a template
    Use {
        /// Template id or name
        template: String,

        /// Folder name or id
        #[arg(short, long)]
        folder: Option<String>,

        /// Title words (defaults to the template name)
        #[arg(trailing_var_arg = true)]
        title: Vec<String>,
    },

    /// Create a template
    Create {
        name: String,
        #[arg(long)]
        content: Option<String>,
        #[arg(long, default_value = "")]
        description: String,
        #[arg(long, default_value = "General")]
        category: String,
    },

    /// Delete a template
    Delete { template: String },
}

#[derive(Subcommand, Debug)]
pub enum DataCommands {
    /// Permanently delete notes from the trash
    #[command(display_order = 30)]
    Purge {
        /// Trash indexes (e.g. d1 d2); if omitted, empties the whole trash
        #[arg(required = false, num_args = 0..)]
        indexes: Vec<String>,

        /// Only purge items past the retention window
        #[arg(long, conflicts_with = "indexes")]
        expired: bool,

        /// Skip confirmation
        #[arg(long, short = 'y')]
        yes: bool,
    },

    /// Export active notes to a JSON file
    #[command(display_order = 31)]
    Export {
        /// Output file (defaults to markdown-notes-export-<date>.json)
        path: Option<String>,
    },

    /// Import notes from an export file
    #[command(display_order = 32)]
    Import { file: String },

    /// Show notebook statistics
    #[command(display_order = 33)]
    Stats,
}

#[derive(Subcommand, Debug)]
pub enum MiscCommands {
    /// Show or change app settings
    #[command(display_order = 40)]
    Settings {
        /// Setting name (e.g. theme, font-size, auto-save)
        key: Option<String>,

        /// Value to set (if omitted, prints current value)
        value: Option<String>,
    },

    /// Print help for marknotes or a subcommand
    #[command(display_order = 41)]
    Help {
        command: Option<String>,
    },
}
