//! cli::args
//!
//! Command-line argument definitions using clap derive.
//!
//! # Global Flags
//!
//! These flags are available on all commands:
//! - `--help` / `-h`: Show help
//! - `--version`: Show version
//! - `--cwd <path>`: Resolve paths and `.tierlist.toml` from that directory
//! - `--debug`: Enable debug logging
//! - `--interactive` / `--no-interactive`: Control prompts
//! - `--quiet` / `-q`: Minimal output
//!
//! # Addresses
//!
//! Commands that point at containers or items take short addresses:
//! `row:N`, `untiered`, `header:N`, `trash`, and for single items
//! `row:N:I` or `untiered:I` (all zero-based).

use std::path::PathBuf;

use clap::{Parser, Subcommand};

use crate::engine::placement::{DropSurface, ItemSlot};

/// tl - Build and rearrange tierlists stored as JSON
#[derive(Parser, Debug)]
#[command(name = "tl")]
#[command(author, version, long_about = None)]
pub struct Cli {
    /// Run as if tl was started in this directory
    #[arg(long, global = true)]
    pub cwd: Option<PathBuf>,

    /// Enable debug logging
    #[arg(long, global = true)]
    pub debug: bool,

    /// Minimal output; implies --no-interactive
    #[arg(short, long, global = true)]
    pub quiet: bool,

    /// Enable interactive prompts
    #[arg(
        long = "interactive",
        global = true,
        conflicts_with = "no_interactive"
    )]
    pub interactive_flag: bool,

    /// Disable interactive prompts
    #[arg(long, global = true)]
    pub no_interactive: bool,

    #[command(subcommand)]
    pub command: Command,
}

impl Cli {
    /// Parse command-line arguments.
    pub fn parse_args() -> Self {
        Parser::parse()
    }

    /// Explicit interactive choice from flags, if any.
    ///
    /// `--interactive` wins; `--no-interactive` and `--quiet` disable.
    /// `None` means "decide from config and the terminal".
    pub fn interactive_override(&self) -> Option<bool> {
        if self.interactive_flag {
            Some(true)
        } else if self.no_interactive || self.quiet {
            Some(false)
        } else {
            None
        }
    }
}

/// Available commands.
#[derive(Subcommand, Debug)]
pub enum Command {
    /// Create a new tierlist file
    #[command(
        name = "new",
        long_about = "Create a new tierlist file.\n\n\
            The title and rows default to the configured `default_title` and \
            `default_rows` (Tierlist; S A B C D). Row colors come from the \
            configured palette.",
        after_help = "\
EXAMPLES:
    # Default rows S A B C D
    tl new snacks.json --title Snacks

    # Custom rows
    tl new pizza.json --rows Great,Fine,Never"
    )]
    New {
        /// File to create
        file: PathBuf,

        /// Document title
        #[arg(long)]
        title: Option<String>,

        /// Comma-separated row names
        #[arg(long, value_delimiter = ',')]
        rows: Option<Vec<String>>,

        /// Overwrite an existing file
        #[arg(long)]
        force: bool,
    },

    /// Print a tierlist
    #[command(
        name = "show",
        long_about = "Print a tierlist as text.\n\n\
            One line per row: name, color, then items in order. The last line \
            is the untiered pool. Items without a name show as <unnamed>."
    )]
    Show {
        /// Tierlist file
        file: PathBuf,

        /// Prefix items with their index
        #[arg(short, long)]
        indices: bool,

        /// Print the document as JSON instead
        #[arg(long)]
        json: bool,
    },

    /// Drag an item onto a surface
    #[command(
        name = "drag",
        long_about = "Drag one item and drop it, exactly as a pointer would.\n\n\
            --from names the item (row:N:I or untiered:I). --to names what the \
            pointer is over when released:\n\
            \x20 row:N / untiered   append to that container\n\
            \x20 header:N           same as row:N\n\
            \x20 row:N:I            take that item's slot\n\
            \x20 trash              delete the item\n\n\
            Hovering an item later in the same row moves the dragged item to \
            that item's position; everything between shifts left.",
        after_help = "\
EXAMPLES:
    # Move the first item of row 0 to where the fourth item is
    tl drag list.json --from row:0:0 --to row:0:3

    # Move an untiered item to the end of row 1
    tl drag list.json --from untiered:2 --to header:1

    # Preview the insertion marker without saving
    tl drag list.json --from untiered:0 --to row:0:1 --dry-run

    # Delete an item
    tl drag list.json --from row:2:0 --to trash"
    )]
    Drag {
        /// Tierlist file
        file: PathBuf,

        /// Item to pick up
        #[arg(long, value_name = "SLOT")]
        from: ItemSlot,

        /// Surface to drop on
        #[arg(long, value_name = "SURFACE")]
        to: DropSurface,

        /// Show the marker and result without writing
        #[arg(long)]
        dry_run: bool,
    },

    /// Set the document title
    Title {
        /// Tierlist file
        file: PathBuf,

        /// New title
        title: String,
    },

    /// Add, remove, rename or recolor rows
    Row {
        #[command(subcommand)]
        action: RowAction,
    },

    /// Add local image files to the untiered pool
    #[command(
        name = "add-image",
        long_about = "Add local image files to the untiered pool.\n\n\
            Each file is embedded as a base64 data URI without re-encoding. \
            Supported formats: webp, png, jpeg, gif. Items are named after the \
            file name without extension unless --name is given."
    )]
    AddImage {
        /// Tierlist file
        file: PathBuf,

        /// Image files
        #[arg(required = true)]
        images: Vec<PathBuf>,

        /// Item name (single image only)
        #[arg(long)]
        name: Option<String>,
    },

    /// Download images and append them to the untiered pool
    #[command(
        name = "append-image",
        long_about = "Download images and append them to the untiered pool.\n\n\
            The file is backed up, then rewritten atomically under an exclusive \
            lock. URLs that fail to download are reported and skipped.",
        after_help = "\
EXAMPLES:
    tl append-image food.json https://example.com/logos/kfc.png

    tl append-image food.json https://example.com/a.webp --name \"Pizza Hut\""
    )]
    AppendImage {
        /// Tierlist file
        file: PathBuf,

        /// Image URLs (http or https)
        #[arg(required = true)]
        urls: Vec<String>,

        /// Item name (single URL only)
        #[arg(long)]
        name: Option<String>,

        /// Skip the backup copy
        #[arg(long)]
        no_backup: bool,
    },

    /// Import a tierlist from a URL
    #[command(
        name = "import",
        long_about = "Fetch a tierlist document from a URL.\n\n\
            Accepts an http(s) URL of a JSON document, or an editor page URL \
            carrying the document address in its `url` query parameter. Other \
            addresses are ignored. On any fetch or format error the target \
            file is left untouched.",
        after_help = "\
EXAMPLES:
    # Print the imported document
    tl import https://example.com/list.json

    # Replace a local file
    tl import https://example.com/list.json --out list.json --force"
    )]
    Import {
        /// Document or page URL
        url: String,

        /// Write to this file instead of stdout
        #[arg(long)]
        out: Option<PathBuf>,

        /// Replace --out without asking
        #[arg(long)]
        force: bool,
    },

    /// Remove items with near-duplicate names
    #[command(
        name = "dedupe",
        long_about = "Find and remove items whose names contain one another.\n\n\
            Names are compared case-insensitively. Matches chain: if A matches B \
            and B matches C, all three are one group. Each group keeps its \
            shortest name (first in document order on ties).\n\n\
            The groups are shown and confirmed before anything is removed. The \
            file is backed up, then rewritten atomically under an exclusive lock.",
        after_help = "\
EXAMPLES:
    # Review and confirm
    tl dedupe food.json

    # See the groups only
    tl dedupe food.json --dry-run

    # Scripted
    tl dedupe food.json --yes"
    )]
    Dedupe {
        /// Tierlist file
        file: PathBuf,

        /// Show groups without removing anything
        #[arg(long)]
        dry_run: bool,

        /// Skip confirmation
        #[arg(short, long)]
        yes: bool,

        /// Skip the backup copy
        #[arg(long)]
        no_backup: bool,
    },

    /// Show configuration
    #[command(
        name = "config",
        long_about = "Show configuration.\n\n\
            User config is read from $TIERLIST_CONFIG, \
            $XDG_CONFIG_HOME/tierlist/config.toml or ~/.tierlist/config.toml. \
            A .tierlist.toml in the working directory overrides it.",
        after_help = "\
EXAMPLES:
    tl config list"
    )]
    Config {
        #[command(subcommand)]
        action: ConfigAction,
    },

    /// Generate shell completion scripts
    #[command(
        name = "completion",
        long_about = "Generate shell completion scripts for tab-completion.\n\n\
            Outputs a completion script for the specified shell. Add the output \
            to your shell's configuration to enable tab-completion for tl.",
        after_help = "\
EXAMPLES:
    # Bash (add to ~/.bashrc)
    tl completion bash >> ~/.bashrc

    # Zsh (add to ~/.zshrc)
    tl completion zsh >> ~/.zshrc

    # Fish
    tl completion fish > ~/.config/fish/completions/tl.fish

    # PowerShell
    tl completion powershell >> $PROFILE"
    )]
    Completion {
        /// Shell to generate completions for
        #[arg(value_enum)]
        shell: Shell,
    },
}

/// Row subcommands
#[derive(Subcommand, Debug, Clone)]
pub enum RowAction {
    /// Insert an empty row
    Add {
        /// Tierlist file
        file: PathBuf,
        /// Row name
        name: String,
        /// Position (default: last)
        #[arg(long)]
        at: Option<usize>,
    },
    /// Remove a row; its items move to untiered
    Remove {
        /// Tierlist file
        file: PathBuf,
        /// Row index
        index: usize,
        /// Skip confirmation
        #[arg(short, long)]
        yes: bool,
    },
    /// Rename a row
    Rename {
        /// Tierlist file
        file: PathBuf,
        /// Row index
        index: usize,
        /// New name
        name: String,
    },
    /// Change a row's color
    Recolor {
        /// Tierlist file
        file: PathBuf,
        /// Row index
        index: usize,
        /// Color as #rrggbb
        color: String,
    },
}

/// Config subcommands
#[derive(Subcommand, Debug, Clone)]
pub enum ConfigAction {
    /// List effective configuration values
    List,
}

/// Supported shells for completion
#[derive(clap::ValueEnum, Debug, Clone, Copy)]
#[allow(clippy::enum_variant_names)]
pub enum Shell {
    Bash,
    Zsh,
    Fish,
    PowerShell,
}
