use clap::Subcommand;

#[derive(Subcommand)]
pub enum OrderCommands {
    /// List orders
    List {
        /// Only orders still taking proposals
        #[arg(long, conflicts_with = "mine")]
        open: bool,
        /// Only orders you created or were assigned
        #[arg(long)]
        mine: bool,
    },
    /// Show an order with its proposals
    Show {
        /// Order ID
        id: i64,
    },
    /// Publish an order
    Create {
        #[arg(long)]
        title: String,
        #[arg(long)]
        description: String,
        #[arg(long)]
        budget: f64,
        /// YYYY-MM-DD or RFC 3339; must be in the future
        #[arg(long)]
        deadline: String,
        /// low, medium, high or urgent
        #[arg(long)]
        priority: Option<String>,
        /// Comma-separated
        #[arg(long)]
        tags: Option<String>,
    },
    /// Edit an order
    Update {
        /// Order ID
        id: i64,
        #[arg(long)]
        title: Option<String>,
        #[arg(long)]
        description: Option<String>,
        #[arg(long)]
        budget: Option<f64>,
        #[arg(long)]
        deadline: Option<String>,
        #[arg(long)]
        priority: Option<String>,
    },
    /// Delete an order
    Delete {
        /// Order ID
        id: i64,
    },
    /// Mark an in-progress order as completed
    Complete {
        /// Order ID
        id: i64,
    },
    /// Cancel an open or in-progress order
    Cancel {
        /// Order ID
        id: i64,
    },
    /// Reopen a cancelled order
    Restore {
        /// Order ID
        id: i64,
    },
}
