use crate::models::GameEvent;

/// Receives every event the engine publishes, in order.
///
/// Implementations match on [`GameEvent`] exhaustively and must not panic
/// for any variant; a panic aborts the whole game.
pub trait GameObserver: Send {
    fn notify_game_event(&mut self, event: &GameEvent);

    /// Human-readable name for logging.
    fn name(&self) -> &str;
}
