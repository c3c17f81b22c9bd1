use crate::{
    board_commands::BoardCommands, chat_commands::ChatCommands, column_commands::ColumnCommands,
    order_commands::OrderCommands, proposal_commands::ProposalCommands,
    task_commands::TaskCommands,
};

use clap::Subcommand;

#[derive(Subcommand)]
pub(crate) enum Commands {
    /// Log in and store the token
    Login {
        username: String,
        /// Read from stdin when omitted
        password: Option<String>,
    },

    /// Forget the stored token
    Logout,

    /// Show the logged-in user
    Whoami,

    /// Board operations
    Board {
        #[command(subcommand)]
        action: BoardCommands,
    },

    /// Column operations
    Column {
        #[command(subcommand)]
        action: ColumnCommands,
    },

    /// Task operations
    Task {
        #[command(subcommand)]
        action: TaskCommands,
    },

    /// Order operations
    Order {
        #[command(subcommand)]
        action: OrderCommands,
    },

    /// Proposal operations
    Proposal {
        #[command(subcommand)]
        action: ProposalCommands,
    },

    /// Order chat operations
    Chat {
        #[command(subcommand)]
        action: ChatCommands,
    },
}
