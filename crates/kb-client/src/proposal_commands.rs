use clap::Subcommand;

#[derive(Subcommand)]
pub enum ProposalCommands {
    /// Bid on an order
    Create {
        #[arg(long)]
        order_id: i64,
        #[arg(long)]
        description: String,
        #[arg(long)]
        price: f64,
        /// Estimated duration in days
        #[arg(long)]
        days: Option<i64>,
    },
    /// List your proposals, or the proposals on one order
    List {
        #[arg(long)]
        order_id: Option<i64>,
    },
    /// Show a proposal
    Show {
        /// Proposal ID
        id: i64,
    },
    /// Accept a proposal; the order's other pending proposals are rejected
    Accept {
        /// Proposal ID
        id: i64,
    },
    /// Reject a proposal
    Reject {
        /// Proposal ID
        id: i64,
    },
    /// Withdraw your own proposal
    Withdraw {
        /// Proposal ID
        id: i64,
    },
    /// Delete your own proposal
    Delete {
        /// Proposal ID
        id: i64,
    },
}
