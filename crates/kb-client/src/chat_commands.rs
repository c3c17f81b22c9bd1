use clap::Subcommand;

#[derive(Subcommand)]
pub enum ChatCommands {
    /// Print an order's messages and follow new ones
    Watch {
        /// Order ID
        order_id: i64,
        /// Poll interval in seconds (defaults to chat.poll_interval_secs)
        #[arg(long)]
        interval: Option<u64>,
    },
    /// Send a message on an order
    Send {
        /// Order ID
        order_id: i64,
        content: String,
        /// Receiver ID (defaults to the other side of the conversation)
        #[arg(long)]
        to: Option<i64>,
    },
    /// Mark an order's messages as read
    Read {
        /// Order ID
        order_id: i64,
    },
}
