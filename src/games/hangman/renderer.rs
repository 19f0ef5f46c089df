/// Hangman drawing: gallows, word, stats, keyboard and the round-over dialog
use rand::Rng;
use ratatui::{
    layout::{Alignment, Constraint, Direction, Layout, Rect},
    prelude::*,
    symbols::Marker,
    widgets::{
        canvas::{Canvas, Circle, Context, Line as CanvasLine},
        Block, Borders, Clear, Paragraph, Wrap,
    },
};

use crate::core::renderer::GameRenderer;
use super::game::{BodyPart, KeyState, LetterReveal, RoundStatus, MAX_ATTEMPTS};
use super::presenter::{HangmanPresenter, KEYS_PER_ROW};

/// Canvas coordinates are given on a 300x300 grid with y growing down.
const CANVAS_SIZE: f64 = 300.0;
const INK: Color = Color::White;

#[derive(Debug)]
pub struct HangmanRenderer;

impl<R: Rng> GameRenderer<HangmanPresenter<R>> for HangmanRenderer {
    fn render(frame: &mut Frame, state: &HangmanPresenter<R>) {
        let chunks = Layout::default()
            .direction(Direction::Vertical)
            .constraints([
                Constraint::Length(3), // Header
                Constraint::Min(10),   // Gallows + word
                Constraint::Length(5), // Keyboard
                Constraint::Length(3), // Status
                Constraint::Length(1), // Help
            ])
            .split(frame.area());

        let header = Paragraph::new("═══ EL AHORCADO ═══")
            .block(Block::default().borders(Borders::ALL))
            .style(Style::default().fg(Color::Cyan).add_modifier(Modifier::BOLD))
            .alignment(Alignment::Center);
        frame.render_widget(header, chunks[0]);

        let body = Layout::default()
            .direction(Direction::Horizontal)
            .constraints([Constraint::Percentage(40), Constraint::Percentage(60)])
            .split(chunks[1]);

        frame.render_widget(Self::gallows(state.engine().wrong_guesses()), body[0]);
        frame.render_widget(Self::board(state), body[1]);
        frame.render_widget(Self::keyboard(state), chunks[2]);

        let status = Paragraph::new(state.message())
            .block(Block::default().borders(Borders::ALL).title("Estado"))
            .style(Style::default().fg(Color::Yellow));
        frame.render_widget(status, chunks[3]);

        let help = Paragraph::new("[a-z] Adivinar  [←↑↓→ Enter] Teclado  [Tab] Categoría  [F2] Nuevo juego  [Esc] Salir")
            .style(Style::default().fg(Color::Gray))
            .alignment(Alignment::Center);
        frame.render_widget(help, chunks[4]);

        if let Some(summary) = state.summary() {
            let (title, message, color) = match summary.outcome {
                RoundStatus::Won => ("¡Felicidades!", "¡Has ganado!", Color::Green),
                _ => ("¡Game Over!", "¡Has perdido!", Color::Red),
            };
            let text = vec![
                Line::from(message),
                Line::from(""),
                Line::from(vec![
                    Span::raw("La palabra era: "),
                    Span::styled(summary.secret_word.clone(), Style::default().add_modifier(Modifier::BOLD)),
                ]),
                Line::from(format!("Puntuación: {}", summary.score)),
                Line::from(""),
                Line::from("[Enter] Jugar de nuevo").style(Style::default().fg(Color::Gray)),
            ];

            let area = centered(frame.area(), 50, 40);
            frame.render_widget(Clear, area);
            frame.render_widget(
                Paragraph::new(text)
                    .block(Block::default().borders(Borders::ALL).title(title).border_style(Style::default().fg(color)))
                    .alignment(Alignment::Center)
                    .wrap(Wrap { trim: true }),
                area,
            );
        }
    }
}

impl HangmanRenderer {
    fn gallows(wrong_guesses: u8) -> impl Widget {
        Canvas::default()
            .block(Block::default().borders(Borders::ALL))
            .marker(Marker::Braille)
            .x_bounds([0.0, CANVAS_SIZE])
            .y_bounds([0.0, CANVAS_SIZE])
            .paint(move |ctx| {
                // base, post, beam, rope
                stroke(ctx, (50.0, 250.0), (250.0, 250.0));
                stroke(ctx, (100.0, 250.0), (100.0, 50.0));
                stroke(ctx, (100.0, 50.0), (200.0, 50.0));
                stroke(ctx, (200.0, 50.0), (200.0, 80.0));

                for part in BodyPart::revealed(wrong_guesses) {
                    match part {
                        BodyPart::Head => ctx.draw(&Circle {
                            x: 200.0,
                            y: CANVAS_SIZE - 100.0,
                            radius: 20.0,
                            color: INK,
                        }),
                        BodyPart::Body => stroke(ctx, (200.0, 120.0), (200.0, 180.0)),
                        BodyPart::LeftArm => stroke(ctx, (200.0, 140.0), (160.0, 160.0)),
                        BodyPart::RightArm => stroke(ctx, (200.0, 140.0), (240.0, 160.0)),
                        BodyPart::LeftLeg => stroke(ctx, (200.0, 180.0), (160.0, 220.0)),
                        BodyPart::RightLeg => stroke(ctx, (200.0, 180.0), (240.0, 220.0)),
                    }
                }
            })
    }

    fn board<R: Rng>(state: &HangmanPresenter<R>) -> Paragraph<'static> {
        let engine = state.engine();

        let word: Vec<Span> = engine
            .reveal()
            .into_iter()
            .map(|r| match r {
                LetterReveal::Shown(c) => {
                    Span::styled(format!("[{}]", c), Style::default().fg(Color::Green).add_modifier(Modifier::BOLD))
                }
                LetterReveal::Hidden => Span::raw("[ ]"),
            })
            .collect();

        let attempts = engine.remaining_attempts();
        let text = vec![
            Line::from(format!("Categoría: {}", engine.category())),
            Line::from(format!(
                "Intentos: {} {}",
                attempts,
                "♥".repeat(usize::from(attempts)) + &"·".repeat(usize::from(MAX_ATTEMPTS - attempts))
            )),
            Line::from(format!("Letras usadas: {}", engine.used_letters_label())),
            Line::from(format!("Puntuación: {}", engine.score())),
            Line::from(""),
            Line::from(word),
        ];

        Paragraph::new(text)
            .block(Block::default().borders(Borders::ALL).title("Palabra"))
            .wrap(Wrap { trim: false })
    }

    fn keyboard<R: Rng>(state: &HangmanPresenter<R>) -> Paragraph<'static> {
        let engine = state.engine();

        let rows: Vec<Line> = state
            .keys()
            .chunks(KEYS_PER_ROW)
            .enumerate()
            .map(|(row, keys)| {
                let spans: Vec<Span> = keys
                    .iter()
                    .enumerate()
                    .map(|(col, &key)| {
                        let mut style = match engine.letter_state(key) {
                            KeyState::Correct => Style::default().fg(Color::Black).bg(Color::Green),
                            KeyState::Wrong => Style::default().fg(Color::Black).bg(Color::Red),
                            KeyState::Unused => Style::default(),
                        };
                        if row * KEYS_PER_ROW + col == state.selected() {
                            style = style.add_modifier(Modifier::REVERSED | Modifier::BOLD);
                        }
                        Span::styled(format!(" {} ", key), style)
                    })
                    .collect();
                Line::from(spans)
            })
            .collect();

        Paragraph::new(rows)
            .block(Block::default().borders(Borders::ALL).title("Teclado"))
            .alignment(Alignment::Center)
    }
}

/// Draw a line given in top-down coordinates.
fn stroke(ctx: &mut Context<'_>, from: (f64, f64), to: (f64, f64)) {
    ctx.draw(&CanvasLine::new(from.0, CANVAS_SIZE - from.1, to.0, CANVAS_SIZE - to.1, INK));
}

fn centered(area: Rect, percent_x: u16, percent_y: u16) -> Rect {
    let vertical = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Percentage((100 - percent_y) / 2),
            Constraint::Percentage(percent_y),
            Constraint::Percentage((100 - percent_y) / 2),
        ])
        .split(area);

    Layout::default()
        .direction(Direction::Horizontal)
        .constraints([
            Constraint::Percentage((100 - percent_x) / 2),
            Constraint::Percentage(percent_x),
            Constraint::Percentage((100 - percent_x) / 2),
        ])
        .split(vertical[1])[1]
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::games::hangman::{GameEngine, WordBank};
    use ratatui::{backend::TestBackend, Terminal};

    fn draw<R: Rng>(state: &HangmanPresenter<R>) -> String {
        let mut terminal = Terminal::new(TestBackend::new(100, 40)).unwrap();
        terminal.draw(|f| HangmanRenderer::render(f, state)).unwrap();
        terminal.backend().buffer().content.iter().map(|cell| cell.symbol()).collect()
    }

    fn presenter(word: &str) -> HangmanPresenter {
        let bank = WordBank::from_pairs([("animales", &[word][..])]).unwrap();
        HangmanPresenter::new(GameEngine::with_seed(bank, 3))
    }

    #[test]
    fn draws_category_and_hidden_word() {
        let screen = draw(&presenter("león"));
        assert!(screen.contains("Categoría: animales"));
        assert!(screen.contains("[ ][ ][ ][ ]"));
        assert!(!screen.contains("¡Has ganado!"));
    }

    #[test]
    fn draws_revealed_letters_and_summary() {
        let mut p = presenter("león");
        for c in ['l', 'e', 'o', 'n'] {
            p.guess(c);
        }
        let screen = draw(&p);
        assert!(screen.contains("[l][e][ó][n]"));
        assert!(screen.contains("¡Has ganado!"));
        assert!(screen.contains("Letras usadas: e, l, n, o"));
    }
}
