//! UI rendering for the TUI.

use ratatui::{
    layout::{Constraint, Layout, Rect},
    style::{Modifier, Style},
    text::{Line, Span},
    widgets::{Block, Paragraph},
    Frame,
};

use super::{
    app::App,
    widgets::{
        detail::{self, DetailInput},
        help_menu::HelpMenuWidget,
        render_helpers::{wrap_words, PageLines},
        selection::{Section, Target},
        status_bar::{StatusBarInput, StatusBarWidget},
        theme::{focus_marker, Palette},
        InteractiveStatefulWidget,
    },
};
use crate::{
    catalog::{preview_tags, PROFILE},
    contact::{Field, SubmitStatus},
    theme::Theme,
};

const PAGE_KEYS: &[(&str, &str)] = &[("tab", "focus"), ("enter", "open"), ("1-5", "section")];
const FIELD_KEYS: &[(&str, &str)] = &[("tab", "next field"), ("esc", "leave field")];
const HELP_KEYS: &[(&str, &str)] = &[("esc", "close help")];
const DETAIL_KEYS: &[(&str, &str)] = &[("h/l", "image"), ("space", "pause"), ("esc", "close")];

/// Render the UI.
pub fn render(frame: &mut Frame, app: &mut App) {
    let palette = Palette::for_theme(app.theme());
    let area = frame.area();
    frame.render_widget(Block::new().style(palette.base()), area);

    let [nav_area, page_area, status_area] = Layout::vertical([
        Constraint::Length(1),
        Constraint::Fill(1),
        Constraint::Length(1),
    ])
    .areas(area);

    app.focus.clear_regions();
    render_nav(frame, app, &palette, nav_area);
    render_page(frame, app, &palette, page_area);
    render_status(frame, app, palette, status_area);

    if let Some(record) = app.modal.current() {
        let input = DetailInput {
            palette,
            record,
            gallery: app.modal.gallery(),
        };
        app.detail.regions = detail::render(frame, page_area, &input, &mut app.detail.scroll);
    }

    HelpMenuWidget::update_state(&mut app.help_menu, palette);
    frame.render_stateful_widget(HelpMenuWidget, area, &mut app.help_menu);
}

/// Top navigation: brand, section anchors and the theme toggle.
fn render_nav(frame: &mut Frame, app: &mut App, palette: &Palette, area: Rect) {
    let focused = app.focus.focused();
    let brand = format!(" {} ", PROFILE.name);
    let mut x = area.x + brand.chars().count() as u16 + 1;
    let mut spans = vec![
        Span::styled(brand, palette.heading()),
        Span::raw(" "),
    ];

    let toggle = match app.theme() {
        Theme::Dark => " ☀ Light ",
        Theme::Light => " ☾ Dark ",
    };
    let toggle_width = toggle.chars().count() as u16;
    let [_, toggle_area] =
        Layout::horizontal([Constraint::Fill(1), Constraint::Length(toggle_width)]).areas(area);

    for (i, section) in Section::ALL.into_iter().enumerate() {
        let label = format!(" {} {} ", i + 1, section.label());
        let width = label.chars().count() as u16;
        let target = Target::Anchor(section);
        if x + width <= toggle_area.x {
            app.focus.add_region(Rect::new(x, area.y, width, 1), target);
        }
        spans.push(Span::styled(
            label,
            palette.focused(focused == Some(target), palette.text),
        ));
        x += width;
    }
    app.focus.add_region(toggle_area, Target::ThemeToggle);

    frame.render_widget(
        Paragraph::new(Line::from(spans)).style(palette.base().bg(palette.surface)),
        area,
    );
    frame.render_widget(
        Paragraph::new(toggle).style(
            palette
                .focused(focused == Some(Target::ThemeToggle), palette.accent_alt)
                .add_modifier(Modifier::BOLD),
        ),
        toggle_area,
    );
}

fn render_page(frame: &mut Frame, app: &mut App, palette: &Palette, area: Rect) {
    let (page, sections) = build_page(app, palette, area.width);
    let viewport = usize::from(area.height);
    app.layout.sections = sections;
    app.layout.viewport = viewport;
    app.page_scroll().set_max(page.len().saturating_sub(viewport));

    if std::mem::take(&mut app.reveal_focus) && !app.page_scroll().is_locked() {
        let line = app.focus.focused().and_then(|target| page.line_of(target));
        if let Some(line) = line {
            let offset = app.page_scroll().offset();
            if line < offset || line + 3 >= offset + viewport {
                app.page_scroll().scroll_to(line.saturating_sub(2));
            }
        }
    }

    let offset = app.page_scroll().offset();
    for (region, target) in page.visible_regions(area, offset) {
        app.focus.add_region(region, target);
    }
    let top = u16::try_from(offset).unwrap_or(u16::MAX);
    frame.render_widget(
        Paragraph::new(page.into_lines())
            .style(palette.base())
            .scroll((top, 0)),
        area,
    );
}

fn render_status(frame: &mut Frame, app: &mut App, palette: Palette, area: Rect) {
    let keybindings = if app.help_menu.is_visible() {
        HELP_KEYS
    } else if app.modal.is_open() {
        DETAIL_KEYS
    } else if matches!(app.focus.focused(), Some(Target::Field(_))) {
        FIELD_KEYS
    } else {
        PAGE_KEYS
    };
    let theme = app.theme();
    StatusBarWidget::update_state(
        &mut app.status_bar,
        StatusBarInput {
            palette,
            theme,
            keybindings,
        },
    );
    frame.render_stateful_widget(StatusBarWidget, area, &mut app.status_bar);
}

/// Lay out the whole page. Returns the lines and the first line of each
/// section.
fn build_page(app: &App, palette: &Palette, width: u16) -> (PageLines, [usize; 5]) {
    let mut page = PageLines::default();
    let mut sections = [0; 5];
    let focused = app.focus.focused();

    sections[Section::Home.index()] = page.len();
    home_section(&mut page, palette, width);

    sections[Section::About.index()] = page.len();
    about_section(&mut page, palette, width);

    sections[Section::Work.index()] = page.len();
    section_title(&mut page, Section::Work, palette);
    page.push(
        Span::styled(
            format!(
                "  Showing {} of {} projects",
                app.project_pages.visible_count(),
                app.project_pages.total()
            ),
            palette.dimmed(),
        ),
        None,
    );
    page.blank();
    for (i, project) in app.project_pages.visible(app.projects.list()).iter().enumerate() {
        let target = Target::Project(i);
        let is_focused = focused == Some(target);
        let row = palette.focused(is_focused, palette.text);
        page.push(
            Line::from(vec![
                Span::styled(focus_marker(is_focused), palette.key()),
                Span::styled(project.title, row.add_modifier(Modifier::BOLD)),
                Span::raw("  "),
                Span::styled(
                    project.status.label(),
                    Style::new().fg(palette.status(project.status)),
                ),
            ]),
            Some(target),
        );
        page.push(
            Span::styled(
                format!("    {} · {}", project.category, project.tagline),
                palette.dimmed(),
            ),
            Some(target),
        );
        page.wrapped(project.summary, width, "    ", Style::new(), Some(target));
        tags_line(&mut page, &preview_tags(&project.tags), palette, Some(target));
        page.blank();
    }
    if app.project_pages.has_more() {
        let remaining = app.project_pages.total() - app.project_pages.visible_count();
        load_more_line(&mut page, Target::LoadMoreProjects, remaining, focused, palette);
    }

    sections[Section::DevOps.index()] = page.len();
    section_title(&mut page, Section::DevOps, palette);
    page.blank();
    for (i, project) in app.devops_pages.visible(app.devops.list()).iter().enumerate() {
        let target = Target::DevOps(i);
        let is_focused = focused == Some(target);
        page.push(
            Line::from(vec![
                Span::styled(focus_marker(is_focused), palette.key()),
                Span::styled(
                    project.title,
                    palette
                        .focused(is_focused, palette.text)
                        .add_modifier(Modifier::BOLD),
                ),
                Span::styled(format!("  {}", project.slug), palette.dimmed()),
            ]),
            Some(target),
        );
        page.wrapped(project.summary, width, "    ", Style::new(), Some(target));
        let tools: Vec<&str> = project.tools.iter().copied().take(5).collect();
        tags_line(&mut page, &tools, palette, Some(target));
        page.blank();
    }
    if app.devops_pages.has_more() {
        let remaining = app.devops_pages.total() - app.devops_pages.visible_count();
        load_more_line(&mut page, Target::LoadMoreDevOps, remaining, focused, palette);
    }

    sections[Section::Contact.index()] = page.len();
    contact_section(&mut page, app, palette, width);

    page.blank();
    page.push(
        Span::styled(
            format!("  {} · {}", PROFILE.name, PROFILE.location),
            palette.dimmed(),
        ),
        None,
    );
    (page, sections)
}

fn section_title(page: &mut PageLines, section: Section, palette: &Palette) {
    page.blank();
    page.push(
        Line::from(vec![
            Span::styled("  ── ", palette.border(false)),
            Span::styled(section.label(), palette.heading()),
            Span::styled(" ──", palette.border(false)),
        ]),
        None,
    );
}

fn home_section(page: &mut PageLines, palette: &Palette, width: u16) {
    page.blank();
    page.push(
        Span::styled(
            format!("  {}", PROFILE.name.to_uppercase()),
            palette.heading(),
        ),
        None,
    );
    page.push(
        Line::from(vec![
            Span::styled(format!("  {}", PROFILE.role), Style::new().fg(palette.accent_alt)),
            Span::styled(format!(" · {}", PROFILE.location), palette.dimmed()),
        ]),
        None,
    );
    page.blank();
    page.wrapped(PROFILE.headline, width, "  ", Style::new(), None);
}

fn about_section(page: &mut PageLines, palette: &Palette, width: u16) {
    section_title(page, Section::About, palette);
    for paragraph in PROFILE.bio {
        page.blank();
        page.wrapped(paragraph, width, "  ", Style::new(), None);
    }
    page.blank();
    for (value, label) in PROFILE.highlights {
        page.push(
            Line::from(vec![
                Span::styled(format!("  {value:>4}  "), palette.heading()),
                Span::styled(*label, palette.dimmed()),
            ]),
            None,
        );
    }
    page.blank();
    let skills: Vec<&str> = PROFILE.skills.to_vec();
    for row in chunk_tags(&skills, usize::from(width).saturating_sub(4)) {
        tags_line(page, &row, palette, None);
    }
}

fn contact_section(page: &mut PageLines, app: &App, palette: &Palette, width: u16) {
    section_title(page, Section::Contact, palette);
    page.push(
        Span::styled(
            "  Have a project in mind? Send a message.",
            palette.dimmed(),
        ),
        None,
    );
    page.blank();

    let focused = app.focus.focused();
    let form = &app.contact;
    let sending = form.is_sending();
    for field in Field::ALL {
        let target = Target::Field(field);
        let is_focused = focused == Some(target);
        let required = if matches!(field, Field::Phone | Field::Subject) { " " } else { "*" };
        let label = Span::styled(
            format!("{}{:<8}{required} ", focus_marker(is_focused), field.label()),
            if is_focused { palette.key() } else { palette.dimmed() },
        );
        let value_style = if sending {
            palette.dimmed()
        } else {
            palette.focused(is_focused, palette.text)
        };
        let cursor = if is_focused && !sending { "▏" } else { "" };

        if field == Field::Subject {
            page.push(
                Line::from(vec![
                    label,
                    Span::styled("◀ ", palette.key()),
                    Span::styled(form.fields().subject.label(), value_style),
                    Span::styled(" ▶", palette.key()),
                ]),
                Some(target),
            );
        } else {
            let value = form.fields().value(field);
            let available = usize::from(width).saturating_sub(14).max(10);
            let rows = field_rows(value, available);
            let last = rows.len() - 1;
            for (i, row) in rows.into_iter().enumerate() {
                let head = if i == 0 {
                    label.clone()
                } else {
                    Span::raw(" ".repeat(12))
                };
                let tail = if i == last { cursor } else { "" };
                page.push(
                    Line::from(vec![
                        head,
                        Span::styled(row, value_style),
                        Span::styled(tail, palette.key()),
                    ]),
                    Some(target),
                );
            }
        }

        if let Some(error) = form.errors().and_then(|errors| errors.for_field(field)) {
            page.push(
                Span::styled(format!("            {error}"), Style::new().fg(palette.error)),
                Some(target),
            );
        }
    }

    page.blank();
    let send_label = if sending { "[ Sending… ]" } else { "[ Send message ]" };
    page.push(
        Line::from(vec![
            Span::styled(focus_marker(focused == Some(Target::Send)), palette.key()),
            Span::styled(
                send_label,
                palette
                    .focused(focused == Some(Target::Send), palette.accent)
                    .add_modifier(Modifier::BOLD),
            ),
        ]),
        Some(Target::Send),
    );

    match form.status() {
        SubmitStatus::Idle | SubmitStatus::Sending => {}
        SubmitStatus::Success => {
            page.blank();
            page.push(
                Span::styled(
                    "  ✓ Message sent. I'll get back to you soon.",
                    Style::new().fg(palette.success),
                ),
                None,
            );
            new_message_line(page, focused, palette);
        }
        SubmitStatus::Error(error) => {
            page.blank();
            page.wrapped(
                &format!("✗ Could not send your message: {error}"),
                width,
                "  ",
                Style::new().fg(palette.error),
                None,
            );
            page.push(
                Span::styled("  Your input was kept. Press Send to retry.", palette.dimmed()),
                None,
            );
            new_message_line(page, focused, palette);
        }
    }
}

fn new_message_line(page: &mut PageLines, focused: Option<Target>, palette: &Palette) {
    let is_focused = focused == Some(Target::NewMessage);
    page.push(
        Line::from(vec![
            Span::styled(focus_marker(is_focused), palette.key()),
            Span::styled(
                "[ Send another message ]",
                palette.focused(is_focused, palette.accent_alt),
            ),
        ]),
        Some(Target::NewMessage),
    );
}

fn load_more_line(
    page: &mut PageLines,
    target: Target,
    remaining: usize,
    focused: Option<Target>,
    palette: &Palette,
) {
    let is_focused = focused == Some(target);
    page.push(
        Line::from(vec![
            Span::styled(focus_marker(is_focused), palette.key()),
            Span::styled(
                format!("[ Load more · {remaining} remaining ]"),
                palette
                    .focused(is_focused, palette.accent)
                    .add_modifier(Modifier::BOLD),
            ),
        ]),
        Some(target),
    );
}

fn tags_line(page: &mut PageLines, tags: &[&str], palette: &Palette, target: Option<Target>) {
    let mut spans = vec![Span::raw("    ")];
    for tag in tags {
        spans.push(Span::styled(format!(" {tag} "), palette.tag()));
        spans.push(Span::raw(" "));
    }
    page.push(Line::from(spans), target);
}

/// Rows of a field value. A value that fits is drawn as typed, trailing
/// spaces included; longer ones are word-wrapped.
fn field_rows(value: &str, width: usize) -> Vec<String> {
    if value.chars().count() < width {
        vec![value.to_owned()]
    } else {
        wrap_words(value, width)
    }
}

/// Split tags into rows that fit `width` once padded.
fn chunk_tags<'a>(tags: &[&'a str], width: usize) -> Vec<Vec<&'a str>> {
    let mut rows: Vec<Vec<&str>> = vec![];
    let mut used = 0;
    for &tag in tags {
        let cost = tag.chars().count() + 3;
        match rows.last_mut() {
            Some(row) if used + cost <= width => row.push(tag),
            _ => {
                rows.push(vec![tag]);
                used = 0;
            }
        }
        used += cost;
    }
    rows
}
