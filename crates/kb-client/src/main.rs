//! kb - kanban board CLI
//!
//! Command-line front end for the kanban REST API.
//!
//! # Examples
//!
//! ```bash
//! # Log in once; the token is kept in .kb/credentials.json
//! kb login alice
//!
//! # Show a board grouped by column
//! kb board show 4 --pretty
//!
//! # Drag the first column to the end
//! kb column move --board-id 4 --from 0 --to 2
//!
//! # Move a task into the "Done" column
//! kb task move 17 --board-id 4 --column-id 9
//!
//! # Accept a bid; the order's other pending bids are rejected
//! kb proposal accept 12
//! ```

mod board_commands;
mod chat_commands;
mod cli;
mod column_commands;
mod commands;
mod order_commands;
mod proposal_commands;
mod task_commands;

use crate::{
    board_commands::BoardCommands, chat_commands::ChatCommands, cli::Cli,
    column_commands::ColumnCommands, commands::Commands, order_commands::OrderCommands,
    proposal_commands::ProposalCommands, task_commands::TaskCommands,
};

use kb_client::{
    BoardController, BoardState, ChatPoller, Client, ClientError, ClientResult,
    FileCredentialStore, OrderScope, Outcome, ProposalAction, RecordingNotifier, Session,
    counterpart, logger,
};
use kb_config::{ChatConfig, Config, LogLevel, MAX_POLL_INTERVAL_SECS, MIN_POLL_INTERVAL_SECS};
use kb_core::{
    BoardId, BoardUpdate, BoardView, ColumnId, DoneColumnMatcher, Message, MessageId, NewBoard,
    NewMessage, NewOrder, NewProposal, NewTask, OrderAction, OrderId, OrderUpdate, Priority,
    ProposalId, TaskId, UserId, parse_timestamp,
};

use std::io::BufRead;
use std::path::PathBuf;
use std::process::ExitCode;
use std::sync::Arc;
use std::time::Duration;

use chrono::{DateTime, Utc};
use clap::Parser;
use log::{LevelFilter, info};
use serde_json::{Value, json};

type Controller = BoardController<Client, RecordingNotifier>;

#[tokio::main]
async fn main() -> ExitCode {
    let cli = Cli::parse();

    let config = match setup(cli.verbose) {
        Ok(config) => config,
        Err(e) => {
            eprintln!("Error: {}", e.user_message());
            return ExitCode::FAILURE;
        }
    };

    let result = run(cli.command, &config, cli.server.as_deref()).await;

    // Handle result
    match result {
        Ok(Value::Null) => ExitCode::SUCCESS,
        Ok(value) => {
            let failed = matches!(
                value.get("outcome").and_then(Value::as_str),
                Some("failed" | "invalid")
            );

            let output = if cli.pretty {
                serde_json::to_string_pretty(&value)
            } else {
                serde_json::to_string(&value)
            };

            match output {
                Ok(json) => {
                    println!("{}", json);
                    if failed {
                        ExitCode::FAILURE
                    } else {
                        ExitCode::SUCCESS
                    }
                }
                Err(e) => {
                    eprintln!("Error serializing response: {}", e);
                    ExitCode::FAILURE
                }
            }
        }
        Err(e) => {
            eprintln!("Error: {}", e.user_message());
            ExitCode::FAILURE
        }
    }
}

/// Load and validate config, then start logging
fn setup(verbose: bool) -> ClientResult<Config> {
    let config = Config::load().map_err(|e| ClientError::setup(e.to_string()))?;
    config
        .validate()
        .map_err(|e| ClientError::setup(e.to_string()))?;

    let level = if verbose {
        LogLevel(LevelFilter::Debug)
    } else {
        config.logging.level
    };
    logger::initialize(
        level,
        config.logging.file.as_ref().map(PathBuf::from),
        config.logging.colored,
    )?;

    if verbose {
        config.log_summary();
    }

    Ok(config)
}

async fn run(command: Commands, config: &Config, server: Option<&str>) -> ClientResult<Value> {
    let credentials_path = config
        .credentials_path()
        .map_err(|e| ClientError::setup(e.to_string()))?;
    let credentials = Arc::new(FileCredentialStore::new(credentials_path));
    let client = Arc::new(Client::with_timeout(
        server.unwrap_or(&config.api.base_url),
        credentials,
        config.api.timeout(),
    )?);
    let session = Session::new(Arc::clone(&client));

    match command {
        Commands::Login { username, password } => {
            let password = match password {
                Some(password) => password,
                None => read_password()?,
            };
            let user = session.login(&username, &password).await?;
            Ok(serde_json::to_value(user)?)
        }
        Commands::Logout => {
            session.logout()?;
            Ok(json!({ "logged_out": true }))
        }
        Commands::Whoami => {
            let user = require_user(&session).await?;
            Ok(serde_json::to_value(user)?)
        }
        Commands::Board { action } => board_command(action, &client, config).await,
        Commands::Column { action } => column_command(action, &client, config).await,
        Commands::Task { action } => task_command(action, &client, config).await,
        Commands::Order { action } => order_command(action, &client).await,
        Commands::Proposal { action } => proposal_command(action, &client).await,
        Commands::Chat { action } => chat_command(action, &client, &session, config).await,
    }
}

// =========================================================================
// Boards, columns, tasks
// =========================================================================

async fn board_command(
    action: BoardCommands,
    client: &Arc<Client>,
    config: &Config,
) -> ClientResult<Value> {
    match action {
        BoardCommands::List => Ok(serde_json::to_value(client.list_boards().await?)?),
        BoardCommands::Show { id } => {
            let (mut controller, notifier) = new_controller(id, client, config);
            let outcome = controller.load().await;
            Ok(report(outcome, &controller, &notifier))
        }
        BoardCommands::Create {
            title,
            description,
            private,
        } => {
            let board = NewBoard {
                title,
                description,
                is_public: !private,
            };
            board.validate()?;
            Ok(serde_json::to_value(client.create_board(&board).await?)?)
        }
        BoardCommands::Update {
            id,
            title,
            description,
            public,
        } => {
            let (mut controller, notifier) = loaded_controller(id, client, config).await;
            let update = BoardUpdate {
                title,
                description,
                is_public: public,
            };
            let outcome = controller.update_settings(update).await;
            Ok(report(outcome, &controller, &notifier))
        }
        BoardCommands::Delete { id } => {
            client.delete_board(BoardId(id)).await?;
            Ok(json!({ "deleted": id }))
        }
    }
}

async fn column_command(
    action: ColumnCommands,
    client: &Arc<Client>,
    config: &Config,
) -> ClientResult<Value> {
    match action {
        ColumnCommands::Create { board_id, name } => {
            let (mut controller, notifier) = loaded_controller(board_id, client, config).await;
            let outcome = controller.create_column(&name).await;
            Ok(report(outcome, &controller, &notifier))
        }
        ColumnCommands::Delete { board_id, id } => {
            let (mut controller, notifier) = loaded_controller(board_id, client, config).await;
            let outcome = controller.delete_column(ColumnId(id)).await;
            Ok(report(outcome, &controller, &notifier))
        }
        ColumnCommands::Move { board_id, from, to } => {
            let (mut controller, notifier) = loaded_controller(board_id, client, config).await;
            if controller.view().is_none() {
                return Ok(report(Outcome::Failed, &controller, &notifier));
            }

            controller.begin_column_drag()?;
            if let Err(e) = controller.hover_column(from, to) {
                controller.cancel_column_drag()?;
                return Err(e.into());
            }
            let outcome = controller.end_column_drag().await?;
            Ok(report(outcome, &controller, &notifier))
        }
    }
}

async fn task_command(
    action: TaskCommands,
    client: &Arc<Client>,
    config: &Config,
) -> ClientResult<Value> {
    match action {
        TaskCommands::Create {
            board_id,
            column_id,
            title,
            description,
            priority,
            due,
            budget,
            tags,
            assignee_id,
        } => {
            let mut task = NewTask::new(BoardId(board_id), ColumnId(column_id), title);
            task.description = description;
            if let Some(priority) = priority {
                task.priority = priority.parse::<Priority>()?;
            }
            if let Some(due) = due {
                task.due_date = Some(parse_date("due date", &due)?);
            }
            task.budget = budget;
            task.tags = split_tags(tags.as_deref());
            task.assigned_to_id = assignee_id.map(UserId);

            let (mut controller, notifier) = loaded_controller(board_id, client, config).await;
            let outcome = controller.create_task(task).await;
            Ok(report(outcome, &controller, &notifier))
        }
        TaskCommands::Move {
            board_id,
            id,
            column_id,
        } => {
            let (mut controller, notifier) = loaded_controller(board_id, client, config).await;
            let outcome = controller.move_task(TaskId(id), ColumnId(column_id)).await;
            Ok(report(outcome, &controller, &notifier))
        }
        TaskCommands::Delete { board_id, id } => {
            let (mut controller, notifier) = loaded_controller(board_id, client, config).await;
            let outcome = controller.delete_task(TaskId(id)).await;
            Ok(report(outcome, &controller, &notifier))
        }
    }
}

fn new_controller(
    board_id: i64,
    client: &Arc<Client>,
    config: &Config,
) -> (Controller, Arc<RecordingNotifier>) {
    let notifier = Arc::new(RecordingNotifier::new());
    let controller = BoardController::with_done_columns(
        BoardId(board_id),
        Arc::clone(client),
        Arc::clone(&notifier),
        DoneColumnMatcher::new(&config.board.done_keywords),
    );
    (controller, notifier)
}

async fn loaded_controller(
    board_id: i64,
    client: &Arc<Client>,
    config: &Config,
) -> (Controller, Arc<RecordingNotifier>) {
    let (mut controller, notifier) = new_controller(board_id, client, config);
    controller.load().await;
    (controller, notifier)
}

/// Outcome, notices and the board as it ended up on screen
fn report(outcome: Outcome, controller: &Controller, notifier: &RecordingNotifier) -> Value {
    let notices: Vec<Value> = notifier
        .notices()
        .iter()
        .map(|notice| json!({ "level": notice.level.as_str(), "message": notice.message }))
        .collect();

    let board = match controller.state() {
        BoardState::Ready(view) => view_json(view),
        BoardState::Unavailable { message } => json!({ "unavailable": message }),
        BoardState::Loading => Value::Null,
    };

    json!({ "outcome": outcome.as_str(), "notices": notices, "board": board })
}

fn view_json(view: &BoardView) -> Value {
    let columns: Vec<Value> = view
        .groups
        .iter()
        .map(|group| {
            json!({
                "id": group.column_id,
                "name": group.name,
                "tasks": group.tasks,
            })
        })
        .collect();

    json!({
        "id": view.board_id,
        "title": view.title,
        "description": view.description,
        "columns": columns,
    })
}

// =========================================================================
// Orders and proposals
// =========================================================================

async fn order_command(action: OrderCommands, client: &Client) -> ClientResult<Value> {
    match action {
        OrderCommands::List { open, mine } => {
            let scope = if open {
                OrderScope::Open
            } else if mine {
                OrderScope::Mine
            } else {
                OrderScope::All
            };
            Ok(serde_json::to_value(client.list_orders(scope).await?)?)
        }
        OrderCommands::Show { id } => {
            Ok(serde_json::to_value(client.get_order(OrderId(id)).await?)?)
        }
        OrderCommands::Create {
            title,
            description,
            budget,
            deadline,
            priority,
            tags,
        } => {
            let deadline = parse_date("deadline", &deadline)?;
            let mut order = NewOrder::new(title, description, budget, deadline);
            if let Some(priority) = priority {
                order.priority = priority.parse::<Priority>()?;
            }
            order.tags = split_tags(tags.as_deref());
            order.validate(Utc::now())?;
            Ok(serde_json::to_value(client.create_order(&order).await?)?)
        }
        OrderCommands::Update {
            id,
            title,
            description,
            budget,
            deadline,
            priority,
        } => {
            let update = OrderUpdate {
                title,
                description,
                budget,
                deadline: deadline
                    .map(|raw| parse_date("deadline", &raw))
                    .transpose()?,
                priority: priority.map(|raw| raw.parse::<Priority>()).transpose()?,
            };
            if update.is_empty() {
                return Err(ClientError::validation("Nothing to update"));
            }
            update.validate(Utc::now())?;
            Ok(serde_json::to_value(client.update_order(OrderId(id), &update).await?)?)
        }
        OrderCommands::Delete { id } => {
            client.delete_order(OrderId(id)).await?;
            Ok(json!({ "deleted": id }))
        }
        OrderCommands::Complete { id } => {
            order_transition(client, id, OrderAction::Complete).await
        }
        OrderCommands::Cancel { id } => order_transition(client, id, OrderAction::Cancel).await,
        OrderCommands::Restore { id } => order_transition(client, id, OrderAction::Restore).await,
    }
}

async fn order_transition(client: &Client, id: i64, action: OrderAction) -> ClientResult<Value> {
    let order = client.change_order_status(OrderId(id), action).await?;
    info!("Order {} is now {}", id, order.status);
    Ok(serde_json::to_value(order)?)
}

async fn proposal_command(action: ProposalCommands, client: &Client) -> ClientResult<Value> {
    match action {
        ProposalCommands::Create {
            order_id,
            description,
            price,
            days,
        } => {
            let proposal = NewProposal::new(OrderId(order_id), &description, price, days)?;
            Ok(serde_json::to_value(client.create_proposal(&proposal).await?)?)
        }
        ProposalCommands::List { order_id } => {
            let proposals = match order_id {
                Some(order_id) => client.proposals_for_order(OrderId(order_id)).await?,
                None => client.my_proposals().await?,
            };
            Ok(serde_json::to_value(proposals)?)
        }
        ProposalCommands::Show { id } => {
            Ok(serde_json::to_value(client.get_proposal(ProposalId(id)).await?)?)
        }
        ProposalCommands::Accept { id } => decide(client, id, ProposalAction::Accept).await,
        ProposalCommands::Reject { id } => decide(client, id, ProposalAction::Reject).await,
        ProposalCommands::Withdraw { id } => decide(client, id, ProposalAction::Withdraw).await,
        ProposalCommands::Delete { id } => {
            client.delete_proposal(ProposalId(id)).await?;
            Ok(json!({ "deleted": id }))
        }
    }
}

async fn decide(client: &Client, id: i64, action: ProposalAction) -> ClientResult<Value> {
    let proposal = client.decide_proposal(ProposalId(id), action).await?;
    Ok(serde_json::to_value(proposal)?)
}

// =========================================================================
// Chat
// =========================================================================

async fn chat_command(
    action: ChatCommands,
    client: &Arc<Client>,
    session: &Session,
    config: &Config,
) -> ClientResult<Value> {
    match action {
        ChatCommands::Watch { order_id, interval } => {
            let interval = match interval {
                Some(secs) => poll_interval(secs)?,
                None => config.chat.poll_interval(),
            };
            let user = require_user(session).await?;

            let (poller, mut updates) =
                ChatPoller::spawn(Arc::clone(client), OrderId(order_id), user.id, interval);
            poller.set_auto_refresh(config.chat.auto_refresh);

            let mut last_printed: Option<MessageId> = None;
            loop {
                tokio::select! {
                    update = updates.recv() => {
                        let Some(update) = update else { break };
                        for message in &update.messages {
                            if last_printed.is_none_or(|last| message.id > last) {
                                println!("{}", message_line(message));
                                last_printed = Some(message.id);
                            }
                        }
                        if update.should_alert() {
                            info!("New message on order {}", order_id);
                        }
                        if !poller.auto_refresh() {
                            break;
                        }
                    }
                    _ = tokio::signal::ctrl_c() => break,
                }
            }

            poller.stop();
            Ok(Value::Null)
        }
        ChatCommands::Send {
            order_id,
            content,
            to,
        } => {
            let receiver_id = match to {
                Some(id) => UserId(id),
                None => {
                    let user = require_user(session).await?;
                    let history = client.messages_by_order(OrderId(order_id)).await?;
                    counterpart(&history, user.id).ok_or_else(|| {
                        ClientError::validation("No conversation yet; pass --to <user id>")
                    })?
                }
            };

            let message = NewMessage::new(OrderId(order_id), receiver_id, &content)?;
            Ok(serde_json::to_value(client.send_message(&message).await?)?)
        }
        ChatCommands::Read { order_id } => {
            client.mark_order_read(OrderId(order_id)).await?;
            Ok(json!({ "order_id": order_id, "read": true }))
        }
    }
}

fn message_line(message: &Message) -> String {
    let sender = message
        .sender_name
        .clone()
        .unwrap_or_else(|| message.sender_id.to_string());
    format!(
        "[{}] {}: {}",
        message.created_at.format("%Y-%m-%d %H:%M"),
        sender,
        message.content
    )
}

// =========================================================================
// Helpers
// =========================================================================

/// `--interval` obeys the same bounds as `chat.poll_interval_secs`
fn poll_interval(secs: u64) -> ClientResult<Duration> {
    ChatConfig::interval_from_secs(secs).map_err(|_| {
        ClientError::validation(format!(
            "--interval must be {}-{} seconds, got {}",
            MIN_POLL_INTERVAL_SECS, MAX_POLL_INTERVAL_SECS, secs
        ))
    })
}

fn parse_date(what: &str, raw: &str) -> ClientResult<DateTime<Utc>> {
    parse_timestamp(raw)
        .ok_or_else(|| ClientError::validation(format!("Unrecognised {}: {}", what, raw)))
}

fn split_tags(raw: Option<&str>) -> Vec<String> {
    raw.map(|tags| {
        tags.split(',')
            .map(str::trim)
            .filter(|tag| !tag.is_empty())
            .map(str::to_string)
            .collect()
    })
    .unwrap_or_default()
}

async fn require_user(session: &Session) -> ClientResult<kb_core::User> {
    session
        .restore()
        .await?
        .ok_or_else(|| ClientError::credentials("Not logged in; run `kb login` first"))
}

fn read_password() -> ClientResult<String> {
    let mut line = String::new();
    std::io::stdin()
        .lock()
        .read_line(&mut line)
        .map_err(|e| ClientError::credentials(format!("Cannot read password: {}", e)))?;
    Ok(line.trim_end_matches(['\r', '\n']).to_string())
}
