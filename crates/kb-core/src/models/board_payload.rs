//! Conversion of an untyped board response into the typed model.
//!
//! The board shell and its columns must be well-formed or the whole payload is
//! rejected. Tasks are converted one by one: an entry that looks like an error
//! object (`type`/`loc`/`msg` keys, as validation errors are reported) or that
//! does not parse is dropped with a warning so one bad record cannot take the
//! board view down.

use crate::{Board, BoardId, Column, CoreError, Result as CoreResult, Task};

use log::warn;
use serde_json::{Map, Value};

const ERROR_SHAPE_KEYS: [&str; 3] = ["type", "loc", "msg"];

/// Parse a `GET /boards/{id}` response.
///
/// `board_id` fills in the id when the payload omits it.
#[track_caller]
pub fn parse_board(board_id: BoardId, payload: Value) -> CoreResult<Board> {
    let Value::Object(mut object) = payload else {
        return Err(CoreError::decode("board payload is not an object"));
    };

    let columns = match object.remove("columns") {
        Some(Value::Array(items)) => items,
        _ => return Err(CoreError::decode("board payload has no columns array")),
    };

    let tasks = match object.remove("tasks") {
        Some(Value::Array(items)) => items,
        None | Some(Value::Null) => Vec::new(),
        Some(_) => return Err(CoreError::decode("board tasks is not an array")),
    };

    object
        .entry("id")
        .or_insert_with(|| Value::from(board_id.get()));

    let mut board: Board = serde_json::from_value(Value::Object(object))
        .map_err(|e| CoreError::decode(format!("invalid board: {e}")))?;

    board.columns = columns
        .into_iter()
        .enumerate()
        .map(|(index, item)| {
            serde_json::from_value::<Column>(item)
                .map_err(|e| CoreError::decode(format!("invalid column at index {index}: {e}")))
        })
        .collect::<CoreResult<Vec<_>>>()?;

    board.tasks = tasks.into_iter().filter_map(parse_task).collect();

    Ok(board)
}

/// Parse a single task entry, returning `None` for anything that is not a task.
pub fn parse_task(item: Value) -> Option<Task> {
    let object = match item {
        Value::Object(object) => object,
        other => {
            warn!("Dropping non-object task entry: {other}");
            return None;
        }
    };

    if looks_like_error(&object) {
        warn!("Dropping error-shaped task entry: {}", Value::Object(object));
        return None;
    }

    match serde_json::from_value::<Task>(Value::Object(object)) {
        Ok(task) => Some(task),
        Err(e) => {
            warn!("Dropping malformed task entry: {e}");
            None
        }
    }
}

fn looks_like_error(object: &Map<String, Value>) -> bool {
    ERROR_SHAPE_KEYS.iter().any(|key| object.contains_key(*key))
}
