use crate::{ColumnId, ColumnPosition, CoreError, Result as CoreResult};

use std::panic::Location;

use error_location::ErrorLocation;

/// Drag gesture state
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum GestureState {
    /// No column is being dragged
    Idle,
    /// A column drag is in progress
    Dragging {
        /// Order when the gesture started
        snapshot: Vec<ColumnId>,
        /// Local order after every hover seen so far
        current: Vec<ColumnId>,
        /// Number of hovers that actually moved a column
        moves: usize,
    },
}

/// Holds the column order while a drag is in progress.
///
/// Every hover is applied to the current local order, so intermediate moves
/// compound. Nothing is sent while dragging; `finish` yields at most one
/// complete set of dense positions for the whole gesture.
#[derive(Debug, Clone)]
pub struct ReorderBuffer {
    state: GestureState,
}

impl ReorderBuffer {
    pub fn new() -> Self {
        Self {
            state: GestureState::Idle,
        }
    }

    pub fn state(&self) -> &GestureState {
        &self.state
    }

    pub fn is_dragging(&self) -> bool {
        matches!(self.state, GestureState::Dragging { .. })
    }

    /// Local order while dragging, `None` when idle
    pub fn current(&self) -> Option<&[ColumnId]> {
        match &self.state {
            GestureState::Idle => None,
            GestureState::Dragging { current, .. } => Some(current.as_slice()),
        }
    }

    /// Start a gesture from the order currently on screen
    #[track_caller]
    pub fn begin(&mut self, order: Vec<ColumnId>) -> CoreResult<()> {
        if self.is_dragging() {
            return Err(CoreError::GestureInProgress {
                location: ErrorLocation::from(Location::caller()),
            });
        }

        log::debug!("Column drag started over {} columns", order.len());
        self.state = GestureState::Dragging {
            snapshot: order.clone(),
            current: order,
            moves: 0,
        };
        Ok(())
    }

    /// Move the column at `from` to `to` in the local order.
    ///
    /// Returns the new local order. `from == to` leaves it as is.
    #[track_caller]
    pub fn hover(&mut self, from: usize, to: usize) -> CoreResult<&[ColumnId]> {
        let GestureState::Dragging { current, moves, .. } = &mut self.state else {
            return Err(CoreError::NotDragging {
                location: ErrorLocation::from(Location::caller()),
            });
        };

        let len = current.len();
        for index in [from, to] {
            if index >= len {
                return Err(CoreError::IndexOutOfRange {
                    index,
                    len,
                    location: ErrorLocation::from(Location::caller()),
                });
            }
        }

        if from != to {
            let moved = current.remove(from);
            current.insert(to, moved);
            *moves += 1;
        }

        Ok(current.as_slice())
    }

    /// Abandon the gesture, returning the order it started from
    #[track_caller]
    pub fn cancel(&mut self) -> CoreResult<Vec<ColumnId>> {
        match std::mem::replace(&mut self.state, GestureState::Idle) {
            GestureState::Idle => Err(CoreError::NotDragging {
                location: ErrorLocation::from(Location::caller()),
            }),
            GestureState::Dragging { snapshot, .. } => {
                log::debug!("Column drag cancelled");
                Ok(snapshot)
            }
        }
    }

    /// End the gesture.
    ///
    /// `Some` carries every column with its new dense position when at least
    /// one hover moved a column; `None` means there is nothing to send.
    #[track_caller]
    pub fn finish(&mut self) -> CoreResult<Option<Vec<ColumnPosition>>> {
        match std::mem::replace(&mut self.state, GestureState::Idle) {
            GestureState::Idle => Err(CoreError::NotDragging {
                location: ErrorLocation::from(Location::caller()),
            }),
            GestureState::Dragging { moves: 0, .. } => {
                log::debug!("Column drag ended without a move");
                Ok(None)
            }
            GestureState::Dragging { current, moves, .. } => {
                log::debug!("Column drag ended after {} move(s)", moves);
                Ok(Some(dense_positions(&current)))
            }
        }
    }
}

impl Default for ReorderBuffer {
    fn default() -> Self {
        Self::new()
    }
}

/// Positions `0..N-1` in list order
pub fn dense_positions(order: &[ColumnId]) -> Vec<ColumnPosition> {
    order
        .iter()
        .enumerate()
        .map(|(index, id)| ColumnPosition {
            id: *id,
            order_index: index as i32,
        })
        .collect()
}
