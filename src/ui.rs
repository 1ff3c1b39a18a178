use ratatui::{
    Frame,
    layout::{Alignment, Constraint, Layout, Rect},
    style::{Color, Modifier, Style, Stylize},
    text::{Line, Span},
    widgets::{
        Block, Borders, Clear, List, ListItem, Paragraph, Scrollbar, ScrollbarOrientation,
        ScrollbarState, Wrap,
    },
};
use tilawah_core::presentation::{reading_blocks, verse_marker, ReadingBlock, INVOCATION, MUSHAF_TITLE};
use tilawah_core::{FetchError, ReaderMode};
use crate::app::{App, FormField, Screen};

const ACCENT: Color = Color::Cyan;

pub fn render(app: &mut App, frame: &mut Frame) {
    let area = frame.area();

    // Main layout: header, body, footer
    let [header_area, body_area, footer_area] = Layout::vertical([
        Constraint::Length(1),
        Constraint::Min(0),
        Constraint::Length(1),
    ])
    .areas(area);

    render_header(app, frame, header_area);

    match app.screen {
        Screen::Home => render_home(app, frame, body_area),
        Screen::Login | Screen::Signup => render_auth_form(app, frame, body_area),
    }

    render_footer(app, frame, footer_area);

    if app.screen == Screen::Home && app.reader.is_picker_open() {
        render_picker(app, frame, area);
    } else {
        app.picker_area = None;
    }
}

fn render_header(app: &App, frame: &mut Frame, area: Rect) {
    let user_indicator = match &app.session {
        Some(session) => format!(" [{}]", session.username),
        None => String::new(),
    };

    let title = Line::from(vec![
        Span::styled(" Tilawah ", Style::default().fg(ACCENT).bold()),
        Span::styled(user_indicator, Style::default().fg(Color::White)),
        Span::raw(" "),
        Span::styled(
            format!("v{}", env!("CARGO_PKG_VERSION")),
            Style::default().fg(Color::DarkGray),
        ),
    ]);

    let header = Paragraph::new(title).style(Style::default().bg(Color::DarkGray));
    frame.render_widget(header, area);
}

fn render_footer(app: &App, frame: &mut Frame, area: Rect) {
    // Key style: dark background with bright text for visibility on both light/dark terminals
    let key_style = Style::default().bg(Color::DarkGray).fg(Color::White);
    let label_style = Style::default().bg(Color::Black).fg(Color::White);
    let hint = |key: &'static str, label: &'static str| {
        [
            Span::styled(format!(" {} ", key), key_style),
            Span::styled(format!(" {} ", label), label_style),
        ]
    };

    let mut hints: Vec<Span> = match app.screen {
        Screen::Home if app.reader.is_picker_open() => [
            hint("type", "search"),
            hint("↑/↓", "nav"),
            hint("Enter", "read"),
            hint("Esc", "close"),
        ]
        .concat(),
        Screen::Home => {
            let mut hints = Vec::new();
            if !app.reader.is_content_loading() {
                hints.extend(hint("Enter", "choose surah"));
            }
            hints.extend(hint("j/k", "scroll"));
            if app.reader.surahs().is_none() && !app.reader.is_index_loading() {
                hints.extend(hint("r", "retry"));
            }
            let account = if app.session.is_some() { "log out" } else { "log in" };
            hints.extend(hint("L", account));
            hints.extend(hint("q", "quit"));
            hints
        }
        Screen::Login => [
            hint("Tab", "next field"),
            hint("Enter", "sign in"),
            hint("C-s", "sign up"),
            hint("Esc", "back"),
        ]
        .concat(),
        Screen::Signup => [
            hint("Tab", "next field"),
            hint("Enter", "create account"),
            hint("C-s", "log in"),
            hint("Esc", "back"),
        ]
        .concat(),
    };
    hints.insert(0, Span::styled(" TILAWAH ", Style::default().bg(Color::Blue).fg(Color::White)));

    frame.render_widget(Paragraph::new(Line::from(hints)), area);
}

fn render_home(app: &mut App, frame: &mut Frame, area: Rect) {
    let error = app.reader.last_error().cloned();
    let content_area = match &error {
        Some(error) => {
            let [banner_area, rest] =
                Layout::vertical([Constraint::Length(2), Constraint::Min(0)]).areas(area);
            render_error_banner(error, frame, banner_area);
            rest
        }
        None => area,
    };

    app.content_area = Some(content_area);

    match app.reader.mode() {
        ReaderMode::ContentShown => render_content(app, frame, content_area),
        ReaderMode::ContentLoading => render_centered(
            frame,
            content_area,
            vec![Line::styled("Loading Surah...", Style::default().fg(ACCENT))],
        ),
        ReaderMode::Bootstrapping | ReaderMode::Idle => render_welcome(frame, content_area),
    }
}

fn render_error_banner(error: &FetchError, frame: &mut Frame, area: Rect) {
    let mut text = error.to_string();
    if *error == FetchError::Index {
        text.push_str(" Press r to retry.");
    }
    let banner = Paragraph::new(Line::from(text).alignment(Alignment::Center))
        .style(Style::default().fg(Color::Red));
    frame.render_widget(banner, area);
}

fn render_welcome(frame: &mut Frame, area: Rect) {
    let lines = vec![
        Line::styled(MUSHAF_TITLE, Style::default().bold()),
        Line::default(),
        Line::styled(
            "Select a Surah to begin your reading journey.",
            Style::default().fg(Color::Gray),
        ),
        Line::default(),
        Line::from(vec![
            Span::styled(" Enter ", Style::default().bg(ACCENT).fg(Color::Black).bold()),
            Span::raw("  Choose Surah"),
        ]),
    ];
    render_centered(frame, area, lines);
}

fn render_centered(frame: &mut Frame, area: Rect, lines: Vec<Line>) {
    let height = lines.len() as u16;
    let top = area.height.saturating_sub(height) / 2;
    let centered = Rect::new(area.x, area.y + top, area.width, height.min(area.height));
    frame.render_widget(Paragraph::new(lines).alignment(Alignment::Center), centered);
}

fn render_content(app: &mut App, frame: &mut Frame, area: Rect) {
    let block = Block::default()
        .borders(Borders::ALL)
        .border_style(Style::default().fg(ACCENT))
        .title(format!(" {} ", app.content_title()));

    let inner_area = block.inner(area);
    app.content_height = inner_area.height;

    let Some(content) = app.reader.content() else {
        return;
    };

    let mut lines: Vec<Line> = Vec::new();
    for reading_block in reading_blocks(content) {
        match reading_block {
            ReadingBlock::Header {
                name,
                english_name,
                english_name_translation,
                subtitle,
            } => {
                lines.push(Line::styled(name.to_string(), Style::default().bold()).centered());
                lines.push(
                    Line::styled(english_name.to_string(), Style::default().fg(Color::White).bold())
                        .centered(),
                );
                lines.push(
                    Line::styled(english_name_translation.to_string(), Style::default().fg(Color::Gray))
                        .centered(),
                );
                lines.push(Line::styled(subtitle, Style::default().fg(Color::DarkGray)).centered());
                lines.push(
                    Line::styled(
                        "─".repeat(inner_area.width as usize),
                        Style::default().fg(ACCENT),
                    ),
                );
                lines.push(Line::default());
            }
            ReadingBlock::Invocation => {
                lines.push(Line::styled(INVOCATION, Style::default().bold()).centered());
                lines.push(Line::default());
            }
            ReadingBlock::Verse(verse) => {
                // Original text reads right to left, translation left to right
                lines.push(
                    Line::from(vec![
                        Span::raw(verse.ayah.text.clone()),
                        Span::raw(" "),
                        Span::styled(
                            verse_marker(verse.ayah.number_in_surah),
                            Style::default().fg(ACCENT),
                        ),
                    ])
                    .right_aligned(),
                );
                lines.push(Line::from(vec![
                    Span::styled("│ ", Style::default().fg(ACCENT)),
                    Span::styled(verse.translation_text.clone(), Style::default().fg(Color::Gray)),
                ]));
                lines.push(Line::default());
            }
        }
    }

    let paragraph = Paragraph::new(lines).wrap(Wrap { trim: true });
    // Counted before the block is attached so borders are not included
    app.total_content_lines = paragraph
        .line_count(inner_area.width)
        .min(u16::MAX as usize) as u16;

    let paragraph = paragraph.block(block).scroll((app.content_scroll, 0));

    frame.render_widget(paragraph, area);

    // Render scrollbar
    if app.total_content_lines > app.content_height {
        let scrollbar = Scrollbar::new(ScrollbarOrientation::VerticalRight)
            .begin_symbol(Some("^"))
            .end_symbol(Some("v"));

        let mut scrollbar_state = ScrollbarState::new(app.total_content_lines as usize)
            .position(app.content_scroll as usize);

        frame.render_stateful_widget(
            scrollbar,
            area.inner(ratatui::layout::Margin {
                vertical: 1,
                horizontal: 0,
            }),
            &mut scrollbar_state,
        );
    }
}

fn render_picker(app: &mut App, frame: &mut Frame, area: Rect) {
    // Sheet anchored to the bottom, most of the screen tall
    let popup_width = 72.min(area.width.saturating_sub(4));
    let popup_height = ((area.height as u32 * 85 / 100) as u16).max(8).min(area.height);
    let popup_x = (area.width.saturating_sub(popup_width)) / 2;
    let popup_y = area.height.saturating_sub(popup_height);
    let popup_area = Rect::new(popup_x, popup_y, popup_width, popup_height);
    app.picker_area = Some(popup_area);

    // Clear the area behind the popup
    frame.render_widget(Clear, popup_area);

    let block = Block::default()
        .borders(Borders::ALL)
        .border_style(Style::default().fg(ACCENT))
        .title(" Select a Surah ")
        .title_alignment(Alignment::Center);
    let inner = block.inner(popup_area);
    frame.render_widget(block, popup_area);

    let [search_area, list_area] =
        Layout::vertical([Constraint::Length(3), Constraint::Min(0)]).areas(inner);

    let query = app.reader.search_query();
    let search_line = if query.is_empty() {
        Line::styled("Search by name or number...", Style::default().fg(Color::DarkGray))
    } else {
        Line::from(vec![Span::raw(query.to_string()), Span::styled("█", Style::default().fg(ACCENT))])
    };
    let search = Paragraph::new(search_line).block(
        Block::default()
            .borders(Borders::ALL)
            .border_style(Style::default().fg(Color::Yellow)),
    );
    frame.render_widget(search, search_area);

    if app.reader.is_index_loading() {
        render_centered(frame, list_area, vec![Line::styled("Loading...", Style::default().fg(ACCENT))]);
        return;
    }

    let items: Vec<ListItem> = app
        .reader
        .filtered_surahs()
        .into_iter()
        .map(|surah| {
            ListItem::new(Line::from(vec![
                Span::styled(format!("{:>4}  ", surah.number), Style::default().fg(ACCENT).bold()),
                Span::styled(surah.english_name.clone(), Style::default().bold()),
                Span::styled(
                    format!("  {}  ", surah.english_name_translation),
                    Style::default().fg(Color::DarkGray),
                ),
                Span::raw(surah.name.clone()),
            ]))
        })
        .collect();

    if items.is_empty() {
        let message = if app.reader.surahs().is_none() {
            "Surah list unavailable"
        } else {
            "No Surah matches your search"
        };
        render_centered(frame, list_area, vec![Line::styled(message, Style::default().fg(Color::DarkGray))]);
        return;
    }

    let list = List::new(items)
        .highlight_style(
            Style::default()
                .bg(Color::Blue)
                .fg(Color::White)
                .add_modifier(Modifier::BOLD),
        )
        .highlight_symbol("> ");

    frame.render_stateful_widget(list, list_area, &mut app.picker_state);
}

fn render_auth_form(app: &App, frame: &mut Frame, area: Rect) {
    let signup = app.screen == Screen::Signup;

    let form_width = 56.min(area.width.saturating_sub(4));
    let form_height: u16 = if signup { 16 } else { 12 };
    let form_height = form_height.min(area.height);
    let form_area = Rect::new(
        area.x + (area.width.saturating_sub(form_width)) / 2,
        area.y + (area.height.saturating_sub(form_height)) / 2,
        form_width,
        form_height,
    );

    let title = if signup { " Create an account " } else { " Log in to your account " };
    let block = Block::default()
        .borders(Borders::ALL)
        .border_style(Style::default().fg(ACCENT))
        .title(title)
        .title_alignment(Alignment::Center);
    let inner = block.inner(form_area);
    frame.render_widget(block, form_area);

    let mut constraints = Vec::new();
    if signup {
        constraints.push(Constraint::Length(2));
    }
    constraints.extend([Constraint::Length(3), Constraint::Length(3)]);
    if signup {
        constraints.push(Constraint::Length(3));
    }
    constraints.push(Constraint::Min(0));
    let rows = Layout::vertical(constraints).split(inner);

    let mut row = 0;
    if signup {
        let note = Paragraph::new(
            "This is for demonstration purposes. Your data is stored in local storage on this machine.",
        )
        .style(Style::default().fg(Color::DarkGray))
        .wrap(Wrap { trim: true });
        frame.render_widget(note, rows[row]);
        row += 1;
    }

    let mut fields = vec![
        ("Your email", app.form.email.clone(), FormField::Email),
        ("Password", mask(&app.form.password), FormField::Password),
    ];
    if signup {
        fields.push(("Confirm password", mask(&app.form.confirm_password), FormField::Confirm));
    }

    for (label, value, field) in fields {
        let focused = app.form.focus == field;
        let border_color = if focused { Color::Yellow } else { Color::DarkGray };
        let mut spans = vec![Span::raw(value)];
        if focused {
            spans.push(Span::styled("█", Style::default().fg(ACCENT)));
        }
        let input = Paragraph::new(Line::from(spans)).block(
            Block::default()
                .borders(Borders::ALL)
                .border_style(Style::default().fg(border_color))
                .title(format!(" {} ", label)),
        );
        frame.render_widget(input, rows[row]);
        row += 1;
    }

    if let Some(error) = &app.form.error {
        let message = Paragraph::new(error.as_str())
            .style(Style::default().fg(Color::Red))
            .wrap(Wrap { trim: true });
        frame.render_widget(message, rows[row]);
    }
}

fn mask(secret: &str) -> String {
    "•".repeat(secret.chars().count())
}
