use clap::Subcommand;

#[derive(Subcommand)]
pub enum ColumnCommands {
    /// Add a column to a board
    Create {
        #[arg(long)]
        board_id: i64,
        #[arg(long)]
        name: String,
    },
    /// Delete a column
    Delete {
        #[arg(long)]
        board_id: i64,
        /// Column ID
        id: i64,
    },
    /// Move the column at one position to another
    Move {
        #[arg(long)]
        board_id: i64,
        /// Current position (0-based)
        #[arg(long)]
        from: usize,
        /// Target position (0-based)
        #[arg(long)]
        to: usize,
    },
}
