use clap::Subcommand;

#[derive(Subcommand)]
pub enum BoardCommands {
    /// List boards
    List,
    /// Show a board grouped by column
    Show {
        /// Board ID
        id: i64,
    },
    /// Create a board
    Create {
        #[arg(long)]
        title: String,
        #[arg(long)]
        description: Option<String>,
        /// Hide the board from other users
        #[arg(long)]
        private: bool,
    },
    /// Rename, describe or change visibility of a board
    Update {
        /// Board ID
        id: i64,
        #[arg(long)]
        title: Option<String>,
        #[arg(long)]
        description: Option<String>,
        #[arg(long)]
        public: Option<bool>,
    },
    /// Delete a board
    Delete {
        /// Board ID
        id: i64,
    },
}
