/// Renderer trait separating drawing from game logic
use ratatui::Frame;

/// Draws a read-only view of `S`. Implementations hold no game state.
pub trait GameRenderer<S> {
    fn render(frame: &mut Frame, state: &S);
}
