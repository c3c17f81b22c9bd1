use clap::Subcommand;

#[derive(Subcommand)]
pub enum TaskCommands {
    /// Create a task in a column
    Create {
        #[arg(long)]
        board_id: i64,
        #[arg(long)]
        column_id: i64,
        #[arg(long)]
        title: String,
        #[arg(long)]
        description: Option<String>,
        /// low, medium, high or urgent
        #[arg(long)]
        priority: Option<String>,
        /// YYYY-MM-DD or RFC 3339
        #[arg(long)]
        due: Option<String>,
        #[arg(long)]
        budget: Option<f64>,
        /// Comma-separated
        #[arg(long)]
        tags: Option<String>,
        #[arg(long)]
        assignee_id: Option<i64>,
    },
    /// Move a task to another column
    Move {
        #[arg(long)]
        board_id: i64,
        /// Task ID
        id: i64,
        #[arg(long)]
        column_id: i64,
    },
    /// Delete a task
    Delete {
        #[arg(long)]
        board_id: i64,
        /// Task ID
        id: i64,
    },
}
