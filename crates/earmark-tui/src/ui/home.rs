use ratatui::{
    layout::{Constraint, Direction, Layout, Rect},
    text::{Line, Span},
    widgets::{Block, Borders, List, ListItem, ListState, Paragraph, Wrap},
    Frame,
};

use crate::app::{App, AppState, Pane};

use super::styles;

pub fn render(frame: &mut Frame, app: &App, area: Rect) {
    let show_search_bar = matches!(app.state, AppState::Searching) || app.showing_search_results();

    let area = if show_search_bar {
        let rows = Layout::default()
            .direction(Direction::Vertical)
            .constraints([Constraint::Length(1), Constraint::Min(5)])
            .split(area);
        render_search_bar(frame, app, rows[0]);
        rows[1]
    } else {
        area
    };

    let chunks = Layout::default()
        .direction(Direction::Horizontal)
        .constraints([
            Constraint::Percentage(25),
            Constraint::Percentage(35),
            Constraint::Percentage(40),
        ])
        .split(area);

    render_collections(frame, app, chunks[0]);
    if app.showing_search_results() {
        render_search_results(frame, app, chunks[1]);
    } else {
        render_audios(frame, app, chunks[1]);
    }
    render_transcript(frame, app, chunks[2]);
}

fn render_search_bar(frame: &mut Frame, app: &App, area: Rect) {
    let cursor = if matches!(app.state, AppState::Searching) { "▌" } else { "" };
    let line = Line::from(vec![
        Span::styled(" Search: ", styles::search_style()),
        Span::raw(format!("{}{}", app.search_query, cursor)),
    ]);
    frame.render_widget(Paragraph::new(line), area);
}

fn pane_block(title: String, focused: bool) -> Block<'static> {
    Block::default()
        .title(title)
        .title_style(styles::title_style())
        .borders(Borders::ALL)
        .border_style(styles::border_style(focused))
}

fn list_items<'a, I>(labels: I, selection: usize) -> Vec<ListItem<'a>>
where
    I: Iterator<Item = &'a str>,
{
    labels
        .enumerate()
        .map(|(i, label)| {
            let style = if i == selection {
                styles::selected_style()
            } else {
                styles::list_item_style()
            };
            ListItem::new(Line::from(label)).style(style)
        })
        .collect()
}

fn render_list(frame: &mut Frame, area: Rect, items: Vec<ListItem>, block: Block, selection: usize) {
    let mut state = ListState::default();
    if !items.is_empty() {
        state.select(Some(selection));
    }
    frame.render_stateful_widget(List::new(items).block(block), area, &mut state);
}

fn render_collections(frame: &mut Frame, app: &App, area: Rect) {
    let items = list_items(
        app.collections.iter().map(|c| c.name.as_str()),
        app.collection_selection,
    );
    let block = pane_block(
        format!(" Collections ({}) ", app.collections.len()),
        app.pane == Pane::Collections,
    );
    render_list(frame, area, items, block, app.collection_selection);
}

fn render_audios(frame: &mut Frame, app: &App, area: Rect) {
    let title = match app.audio_collection {
        Some(ref id) => {
            let name = app
                .collections
                .iter()
                .find(|c| &c.id == id)
                .map_or(id.as_str(), |c| c.name.as_str());
            format!(" {} ({}) ", name, app.audios.len())
        }
        None => " Audio ".to_string(),
    };

    let items = list_items(app.audios.iter().map(|a| a.title.as_str()), app.audio_selection);
    let block = pane_block(title, app.pane == Pane::Audios);
    render_list(frame, area, items, block, app.audio_selection);
}

fn render_search_results(frame: &mut Frame, app: &App, area: Rect) {
    let query = app.search_results_for.as_deref().unwrap_or_default();
    let items = list_items(
        app.search_results.iter().map(String::as_str),
        app.search_selection,
    );
    let block = pane_block(
        format!(" Matches for \"{}\" ({}) ", query, app.search_results.len()),
        app.pane == Pane::Audios,
    );
    render_list(frame, area, items, block, app.search_selection);
}

fn render_transcript(frame: &mut Frame, app: &App, area: Rect) {
    let focused = app.pane == Pane::Transcript;

    let (title, lines) = match app.transcript {
        Some((ref title, ref transcript)) => {
            let lines: Vec<Line> = transcript.text.lines().map(Line::from).collect();
            (format!(" {} ", title), lines)
        }
        None => {
            let mut lines = vec![Line::from(Span::styled(
                "Select an audio file and press Enter",
                styles::muted_style(),
            ))];
            if let Some(url) = app.selected_media_url() {
                lines.push(Line::from(""));
                lines.push(Line::from(vec![
                    Span::styled("Stream: ", styles::highlight_style()),
                    Span::raw(url),
                ]));
            }
            (" Transcript ".to_string(), lines)
        }
    };

    let block = pane_block(title, focused);
    let inner = block.inner(area);
    let paragraph = Paragraph::new(lines).wrap(Wrap { trim: false });

    // Scrolling is bounded by wrapped rows, not source lines
    let rows = paragraph.line_count(inner.width);
    let max_scroll = u16::try_from(rows.saturating_sub(usize::from(inner.height)))
        .unwrap_or(u16::MAX);
    if app.transcript.is_some() {
        app.set_transcript_max_scroll(max_scroll);
    }

    let paragraph = paragraph
        .block(block)
        .scroll((app.transcript_scroll.min(max_scroll), 0));
    frame.render_widget(paragraph, area);
}

#[cfg(test)]
mod tests {
    use super::*;
    use earmark_core::auth::MemoryStore;
    use earmark_core::config::Config;
    use earmark_core::models::Transcript;
    use ratatui::{backend::TestBackend, Terminal};

    fn screen_text(terminal: &Terminal<TestBackend>) -> String {
        terminal
            .backend()
            .buffer()
            .content()
            .iter()
            .map(|cell| cell.symbol())
            .collect()
    }

    #[test]
    fn test_end_of_wrapped_transcript_reachable() {
        let config = Config {
            base_url: Some("http://127.0.0.1:9".to_string()),
            last_username: None,
        };
        let mut app = App::with_storage(config, Box::new(MemoryStore::new())).unwrap();

        // Each segment wraps over several rows of the transcript pane
        let text = (0..40)
            .map(|i| format!("{}END{}", "spoken words here ".repeat(8), i))
            .collect::<Vec<_>>()
            .join("\n");
        app.transcript = Some(("episode-12".to_string(), Transcript { text }));
        app.pane = Pane::Transcript;

        let mut terminal = Terminal::new(TestBackend::new(100, 30)).unwrap();
        terminal.draw(|f| render(f, &app, f.area())).unwrap();
        assert!(!screen_text(&terminal).contains("END39"));

        for _ in 0..1000 {
            app.scroll_transcript(1);
        }
        terminal.draw(|f| render(f, &app, f.area())).unwrap();
        assert!(screen_text(&terminal).contains("END39"));
    }
}
