//! UI rendering for the TUI.

use buddy_core::{questions, summary, ChatRole, Screen};
use chrono::{Local, TimeZone};
use ratatui::{
    layout::{Alignment, Constraint, Layout, Rect},
    style::{Color, Modifier, Style, Stylize},
    text::{Line, Span},
    widgets::{Block, BorderType, Borders, Cell, Gauge, Paragraph, Row, Table, Wrap},
    Frame,
};

use crate::app::{App, SummaryMode};

/// Colors for one theme
struct Palette {
    bg: Color,
    fg: Color,
    dim: Color,
    accent: Color,
    highlight: Color,
    user: Color,
    success: Color,
}

const DARK: Palette = Palette {
    bg: Color::Rgb(17, 24, 39),
    fg: Color::Rgb(243, 244, 246),
    dim: Color::Rgb(156, 163, 175),
    accent: Color::Rgb(129, 140, 248),
    highlight: Color::Rgb(168, 85, 247),
    user: Color::Rgb(99, 102, 241),
    success: Color::Rgb(34, 197, 94),
};

const LIGHT: Palette = Palette {
    bg: Color::Rgb(249, 250, 251),
    fg: Color::Rgb(17, 24, 39),
    dim: Color::Rgb(107, 114, 128),
    accent: Color::Rgb(79, 70, 229),
    highlight: Color::Rgb(147, 51, 234),
    user: Color::Rgb(67, 56, 202),
    success: Color::Rgb(22, 163, 74),
};

fn palette(app: &App) -> &'static Palette {
    if app.dark_mode {
        &DARK
    } else {
        &LIGHT
    }
}

/// Render the application UI.
pub fn render(frame: &mut Frame, app: &mut App) {
    let p = palette(app);
    let area = frame.area();
    frame.render_widget(Block::default().style(Style::default().bg(p.bg).fg(p.fg)), area);

    let chunks = Layout::vertical([
        Constraint::Min(5),    // Screen
        Constraint::Length(1), // Notice
        Constraint::Length(1), // Key help
    ])
    .split(area);

    match app.controller().screen() {
        Screen::Start => render_start(frame, app, chunks[0]),
        Screen::Questioning(_) => render_question(frame, app, chunks[0]),
        Screen::Summary => render_summary(frame, app, chunks[0]),
        Screen::SavedList => render_saved(frame, app, chunks[0]),
        Screen::Chat => render_chat(frame, app, chunks[0]),
    }

    if let Some(notice) = &app.notice {
        frame.render_widget(
            Paragraph::new(notice.as_str()).style(Style::default().fg(p.success)),
            chunks[1],
        );
    }
    frame.render_widget(
        Paragraph::new(key_help(app)).style(Style::default().fg(p.dim)),
        chunks[2],
    );
}

fn key_help(app: &App) -> &'static str {
    match app.controller().screen() {
        Screen::Start => "Enter new idea · 1-3 open recent · s saved ideas · t theme · q quit",
        Screen::Questioning(_) => {
            "Enter next · Tab skip · F3 saved ideas · F2 theme · Ctrl+C quit"
        }
        Screen::Summary if app.summary_mode == SummaryMode::EditingTitle => {
            "Enter save · Esc cancel"
        }
        Screen::Summary => {
            "s save · c chat · x share · p PDF · v saved ideas · r start over · j/k scroll · q quit"
        }
        Screen::SavedList if app.searching => "type to filter · Enter/Esc done",
        Screen::SavedList => {
            "Enter open · f fork & extend · d delete · / search · Esc back · q quit"
        }
        Screen::Chat => "Enter send · PgUp/PgDn scroll · Esc back to summary",
    }
}

fn titled_block(title: &str, color: Color) -> Block<'_> {
    Block::default()
        .borders(Borders::ALL)
        .border_type(BorderType::Rounded)
        .border_style(Style::default().fg(color))
        .title(Span::styled(
            format!(" {} ", title),
            Style::default().fg(color).add_modifier(Modifier::BOLD),
        ))
}

fn format_date(timestamp: i64) -> String {
    Local
        .timestamp_millis_opt(timestamp)
        .single()
        .map(|dt| dt.format("%b %-d, %Y %H:%M").to_string())
        .unwrap_or_else(|| "unknown date".to_string())
}

fn render_start(frame: &mut Frame, app: &App, area: Rect) {
    let p = palette(app);
    let mut lines = vec![
        Line::from(""),
        Line::from("BrainstormBuddy".bold().fg(p.highlight)).alignment(Alignment::Center),
        Line::from(""),
        Line::from(Span::styled(
            format!("\"{}\"", app.quote.text),
            Style::default().add_modifier(Modifier::ITALIC),
        ))
        .alignment(Alignment::Center),
        Line::from(format!("- {}", app.quote.author).fg(p.dim)).alignment(Alignment::Center),
        Line::from(""),
        Line::from("[Enter] Start New Brainstorming Session".fg(p.accent))
            .alignment(Alignment::Center),
        Line::from(""),
    ];

    let recent = app.recent_sessions();
    if !recent.is_empty() {
        lines.push(Line::from("Recent Ideas".bold()));
        for (i, session) in recent.iter().enumerate() {
            lines.push(Line::from(vec![
                Span::styled(format!(" {}  ", i + 1), Style::default().fg(p.accent)),
                Span::styled(session.title.clone(), Style::default().bold()),
                Span::styled(
                    format!("  {}", format_date(session.timestamp)),
                    Style::default().fg(p.dim),
                ),
            ]));
            lines.push(Line::from(Span::styled(
                format!(
                    "    {}",
                    session
                        .app_idea
                        .answer("problem")
                        .unwrap_or("No problem statement")
                ),
                Style::default().fg(p.dim),
            )));
        }
        lines.push(Line::from(""));
        lines.push(Line::from("[s] Browse All Saved Ideas".fg(p.accent)));
    }

    frame.render_widget(
        Paragraph::new(lines)
            .wrap(Wrap { trim: false })
            .block(titled_block("Welcome", p.highlight)),
        area,
    );
}

fn render_question(frame: &mut Frame, app: &App, area: Rect) {
    let p = palette(app);
    let state = app.controller().state();
    let (Some(question), Some((step, total))) = (state.current_question(), state.progress()) else {
        return;
    };

    let chunks = Layout::vertical([
        Constraint::Length(3), // Progress
        Constraint::Length(5), // Question
        Constraint::Min(3),    // Answer
    ])
    .split(area);

    frame.render_widget(
        Gauge::default()
            .block(titled_block(&format!("Step {} of {}", step, total), p.accent))
            .gauge_style(Style::default().fg(p.accent))
            .ratio(step as f64 / total as f64),
        chunks[0],
    );

    frame.render_widget(
        Paragraph::new(vec![
            Line::from(question.category.fg(p.highlight).bold()),
            Line::from(question.text.bold()),
            Line::from(question.placeholder.fg(p.dim)),
        ])
        .wrap(Wrap { trim: false })
        .block(titled_block("Question", p.highlight)),
        chunks[1],
    );

    frame.render_widget(
        Paragraph::new(format!("{}▏", app.input))
            .wrap(Wrap { trim: false })
            .block(titled_block("Your answer", p.accent)),
        chunks[2],
    );
}

fn render_summary(frame: &mut Frame, app: &App, area: Rect) {
    let p = palette(app);
    let state = app.controller().state();
    let idea = &state.idea;

    let chunks = Layout::vertical([
        Constraint::Length(3), // Save
        Constraint::Min(5),    // Body
    ])
    .split(area);

    let save_label = if state.active_session.is_some() {
        "Update your idea"
    } else {
        "Save your idea"
    };
    let save_text = match app.summary_mode {
        SummaryMode::EditingTitle => format!("{}▏", app.title_input),
        SummaryMode::Browse if app.title_input.is_empty() => {
            "press s to enter a title".to_string()
        }
        SummaryMode::Browse => app.title_input.clone(),
    };
    frame.render_widget(
        Paragraph::new(save_text).block(titled_block(save_label, p.accent)),
        chunks[0],
    );

    let mut lines = vec![
        Line::from("App Description".bold().fg(p.highlight)),
        Line::from(""),
    ];
    lines.extend(summary::describe(idea).lines().map(|l| Line::from(l.to_string())));
    lines.push(Line::from(""));
    lines.push(Line::from(summary::PROMPT_LABEL.bold().fg(p.highlight)));
    lines.push(Line::from(summary::build_prompt(idea).fg(p.accent)));
    lines.push(Line::from(""));
    lines.push(Line::from("AI Brainstorming Suggestions".bold().fg(p.highlight)));

    match &state.suggestions {
        None => lines.push(Line::from("Generating suggestions...".fg(p.dim))),
        Some(suggestions) => {
            for suggestion in suggestions {
                lines.push(Line::from(vec![
                    Span::styled("▌ ", Style::default().fg(p.accent)),
                    Span::raw(suggestion.clone()),
                ]));
            }
        }
    }

    lines.push(Line::from(""));
    lines.push(Line::from("Your Answers".bold().fg(p.highlight)));
    for question in questions::QUESTIONS {
        if let Some(answer) = idea.answer(question.id) {
            lines.push(Line::from(vec![
                Span::styled(format!("{}: ", question.category), Style::default().fg(p.dim)),
                Span::raw(answer.to_string()),
            ]));
        }
    }

    frame.render_widget(
        Paragraph::new(lines)
            .wrap(Wrap { trim: false })
            .scroll((app.scroll_offset, 0))
            .block(titled_block("Your App Idea Summary", p.highlight)),
        chunks[1],
    );
}

fn render_saved(frame: &mut Frame, app: &mut App, area: Rect) {
    let p = palette(app);

    let chunks = Layout::vertical([
        Constraint::Length(3), // Search
        Constraint::Min(3),    // Table
    ])
    .split(area);

    let search_text = if app.searching {
        format!("{}▏", app.search)
    } else if app.search.is_empty() {
        "press / to search your ideas".to_string()
    } else {
        app.search.clone()
    };
    frame.render_widget(
        Paragraph::new(search_text).block(titled_block("Search", p.accent)),
        chunks[0],
    );

    let confirming = app.confirming_delete().map(str::to_string);
    let rows: Vec<Row> = app
        .visible_sessions()
        .iter()
        .map(|session| {
            let preview = session.preview();
            let mut details = preview.chips.join("  ");
            if let Some(more) = preview.more {
                details.push_str(&format!("  +{} more", more));
            }
            let title = if confirming.as_deref() == Some(session.id.as_str()) {
                format!("{} (press d to confirm delete)", session.title)
            } else {
                session.title.clone()
            };
            Row::new(vec![
                Cell::from(format_date(session.timestamp)),
                Cell::from(title),
                Cell::from(preview.headline),
                Cell::from(details),
            ])
        })
        .collect();

    let empty = rows.is_empty();
    let table = Table::new(
        rows,
        [
            Constraint::Length(20),
            Constraint::Percentage(25),
            Constraint::Percentage(35),
            Constraint::Percentage(40),
        ],
    )
    .header(
        Row::new(vec!["Saved", "Title", "Problem", "Details"])
            .style(Style::default().fg(p.dim).add_modifier(Modifier::BOLD)),
    )
    .row_highlight_style(Style::default().bg(p.user).fg(Color::White))
    .block(titled_block("Your Saved Ideas", p.highlight));

    if empty {
        let message = if app.search.is_empty() {
            "No saved ideas yet. Start brainstorming to create some ideas!"
        } else {
            "No ideas found. Try a different search term"
        };
        frame.render_widget(
            Paragraph::new(message)
                .alignment(Alignment::Center)
                .block(titled_block("Your Saved Ideas", p.highlight)),
            chunks[1],
        );
    } else {
        frame.render_stateful_widget(table, chunks[1], &mut app.saved_table_state);
    }
}

fn render_chat(frame: &mut Frame, app: &App, area: Rect) {
    let p = palette(app);
    let state = app.controller().state();

    let chunks = Layout::vertical([
        Constraint::Min(5),    // Transcript
        Constraint::Length(3), // Input
    ])
    .split(area);

    let mut lines = Vec::new();
    for message in &state.chat {
        let (label, color) = match message.role {
            ChatRole::User => ("You", p.user),
            ChatRole::Assistant => ("AI", p.highlight),
        };
        let time = Local
            .timestamp_millis_opt(message.timestamp)
            .single()
            .map(|dt| dt.format("%H:%M").to_string())
            .unwrap_or_default();
        lines.push(Line::from(vec![
            Span::styled(label, Style::default().fg(color).bold()),
            Span::styled(format!("  {}", time), Style::default().fg(p.dim)),
        ]));
        lines.extend(message.content.lines().map(|l| Line::from(l.to_string())));
        lines.push(Line::from(""));
    }
    if state.is_waiting_for_reply() {
        lines.push(Line::from("AI is thinking...".fg(p.dim)));
    }

    // Keep the newest messages in view; scroll_offset counts lines up from the bottom
    let inner_height = chunks[0].height.saturating_sub(2);
    let bottom = (lines.len() as u16).saturating_sub(inner_height);
    let scroll = bottom.saturating_sub(app.scroll_offset);

    frame.render_widget(
        Paragraph::new(lines)
            .scroll((scroll, 0))
            .block(titled_block("AI Brainstorming Chat", p.highlight)),
        chunks[0],
    );

    frame.render_widget(
        Paragraph::new(format!("{}▏", app.input)).block(titled_block("Message", p.accent)),
        chunks[1],
    );
}
