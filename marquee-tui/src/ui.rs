//! Widget rendering: input bar, suggestion dropdown, movie cards.

use marquee_core::MovieDetails;
use ratatui::Frame;
use ratatui::layout::{Constraint, Direction, Layout, Rect};
use ratatui::style::{Color, Modifier, Style};
use ratatui::text::{Line, Span};
use ratatui::widgets::{Block, Borders, List, ListItem, Paragraph};

use crate::app::App;

/// Fixed banner shown while a fetch cycle has failed.
pub const ERROR_MESSAGE: &str = "Something went wrong. Please try again later.";
/// Shown when the movie list is empty and nothing is loading or failed.
pub const NO_RESULTS_MESSAGE: &str = "No movies found. Try searching for another title!";
/// Local placeholder for the catalog's missing-artwork sentinel.
pub const POSTER_PLACEHOLDER: &str = "(no poster available)";
/// Spinner-less loading indicator.
pub const LOADING_MESSAGE: &str = "Loading...";

/// Renders one frame of the application.
pub fn draw(frame: &mut Frame, app: &mut App) {
    let chunks = Layout::default()
        .direction(Direction::Vertical)
        .margin(1)
        .constraints([
            Constraint::Length(3), // Header
            Constraint::Length(3), // Search input
            Constraint::Length(1), // Status line
            Constraint::Min(8),    // Suggestions + cards
            Constraint::Length(1), // Footer
        ])
        .split(frame.area());

    draw_header(frame, chunks[0]);
    draw_search_input(frame, chunks[1], app);
    draw_status_line(frame, chunks[2], app);
    draw_body(frame, chunks[3], app);
    draw_footer(frame, chunks[4]);
}

fn draw_header(frame: &mut Frame, area: Rect) {
    let header = Paragraph::new("Marquee")
        .style(Style::default().fg(Color::Cyan))
        .block(Block::default().borders(Borders::ALL).title("Movie Search"));
    frame.render_widget(header, area);
}

fn draw_search_input(frame: &mut Frame, area: Rect, app: &App) {
    let cursor_style = Style::default()
        .fg(Color::Yellow)
        .add_modifier(Modifier::SLOW_BLINK);

    let input_line = Line::from(vec![
        Span::raw(app.session().query().to_string()),
        Span::styled("█", cursor_style),
    ]);

    let input = Paragraph::new(vec![input_line]).block(
        Block::default()
            .borders(Borders::ALL)
            .title(" Search for a movie... "),
    );
    frame.render_widget(input, area);
}

fn draw_status_line(frame: &mut Frame, area: Rect, app: &App) {
    let mut spans = Vec::new();

    if app.session().is_loading() {
        spans.push(Span::styled(
            LOADING_MESSAGE,
            Style::default().fg(Color::Yellow),
        ));
    }
    if app.session().has_error() {
        if !spans.is_empty() {
            spans.push(Span::raw("  "));
        }
        spans.push(Span::styled(
            ERROR_MESSAGE,
            Style::default().fg(Color::Red).add_modifier(Modifier::BOLD),
        ));
    }
    if spans.is_empty() {
        if let Some(query) = app.session().committed_query() {
            spans.push(Span::styled(
                format!("Results for \"{query}\""),
                Style::default().fg(Color::DarkGray),
            ));
        }
    }

    frame.render_widget(Paragraph::new(Line::from(spans)), area);
}

fn draw_body(frame: &mut Frame, area: Rect, app: &mut App) {
    let suggestion_count = app.session().suggestions().len();
    if suggestion_count > 0 {
        // Dropdown sits directly beneath the input, above the cards.
        let dropdown_height = (suggestion_count as u16 + 2).min(area.height / 2);
        let chunks = Layout::default()
            .direction(Direction::Vertical)
            .constraints([Constraint::Length(dropdown_height), Constraint::Min(4)])
            .split(area);

        draw_suggestions(frame, chunks[0], app);
        draw_cards(frame, chunks[1], app);
    } else {
        draw_cards(frame, area, app);
    }
}

fn draw_suggestions(frame: &mut Frame, area: Rect, app: &App) {
    let items: Vec<ListItem> = app
        .session()
        .suggestions()
        .iter()
        .enumerate()
        .map(|(index, suggestion)| {
            let style = if app.selected_suggestion() == Some(index) {
                Style::default()
                    .fg(Color::Black)
                    .bg(Color::Cyan)
                    .add_modifier(Modifier::BOLD)
            } else {
                Style::default()
            };
            ListItem::new(Line::styled(suggestion.display_label(), style))
        })
        .collect();

    let list = List::new(items).block(
        Block::default()
            .borders(Borders::ALL)
            .title(" Suggestions (Enter to search) "),
    );
    frame.render_widget(list, area);
}

fn draw_cards(frame: &mut Frame, area: Rect, app: &mut App) {
    let movies = app.session().movies();

    if movies.is_empty() {
        if !app.session().is_loading() && !app.session().has_error() {
            let empty = Paragraph::new(NO_RESULTS_MESSAGE)
                .style(Style::default().fg(Color::DarkGray))
                .block(Block::default().borders(Borders::ALL).title(" Movies "));
            frame.render_widget(empty, area);
        } else {
            frame.render_widget(
                Block::default().borders(Borders::ALL).title(" Movies "),
                area,
            );
        }
        return;
    }

    // Wrap width: block borders eat two columns.
    let text_width = area.width.saturating_sub(2).max(20) as usize;
    let items: Vec<ListItem> = movies
        .iter()
        .map(|movie| movie_card(movie, text_width))
        .collect();

    let count = movies.len();
    let list = List::new(items).block(
        Block::default()
            .borders(Borders::ALL)
            .title(format!(" Movies ({count}) ")),
    );
    frame.render_stateful_widget(list, area, app.card_state());
}

/// Builds the multi-line card for one movie.
fn movie_card(movie: &MovieDetails, width: usize) -> ListItem<'static> {
    let mut lines = Vec::new();

    let title = match movie.year {
        Some(year) => format!("{} ({year})", movie.title),
        None => movie.title.clone(),
    };
    lines.push(Line::styled(
        title,
        Style::default()
            .fg(Color::Cyan)
            .add_modifier(Modifier::BOLD),
    ));

    lines.push(detail_line(
        "Poster",
        movie.poster_url.as_deref().unwrap_or(POSTER_PLACEHOLDER),
    ));
    lines.push(detail_line("Genre", movie.genre.as_deref().unwrap_or("—")));
    lines.push(detail_line(
        "Director",
        movie.director.as_deref().unwrap_or("—"),
    ));

    let plot = movie.plot.as_deref().unwrap_or("—");
    for (index, row) in wrap_text(plot, width.saturating_sub(8)).into_iter().enumerate() {
        if index == 0 {
            lines.push(detail_line("Plot", &row));
        } else {
            lines.push(Line::from(format!("        {row}")));
        }
    }

    lines.push(Line::raw(""));
    ListItem::new(lines)
}

fn detail_line(label: &str, value: &str) -> Line<'static> {
    Line::from(vec![
        Span::styled(
            format!("{label}: "),
            Style::default().add_modifier(Modifier::BOLD),
        ),
        Span::raw(value.to_string()),
    ])
}

/// Greedy word wrap for card text; terminal cells, not graphemes.
fn wrap_text(text: &str, width: usize) -> Vec<String> {
    let width = width.max(1);
    let mut rows = Vec::new();
    let mut current = String::new();

    for word in text.split_whitespace() {
        if current.is_empty() {
            current = word.to_string();
        } else if current.len() + 1 + word.len() <= width {
            current.push(' ');
            current.push_str(word);
        } else {
            rows.push(current);
            current = word.to_string();
        }
    }
    if !current.is_empty() {
        rows.push(current);
    }
    if rows.is_empty() {
        rows.push(String::new());
    }
    rows
}
