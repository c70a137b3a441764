use ratatui::{
    layout::{Alignment, Constraint, Direction, Layout, Rect},
    style::{Color as TermColor, Modifier, Style},
    text::{Line, Span},
    widgets::{Block, Borders, Clear, List, ListItem, ListState, Paragraph, Wrap},
    Frame,
};

use super::editor::{AddField, EditorApp, GalleryFocus, GridGeometry, Modal};
use crate::core::color::Color;
use crate::core::grid::Grid;
use crate::core::theme::ThemeColors;
use crate::renderer::GridProcessor;
use crate::shared::constants;

const LABEL_WIDTH: u16 = 4;
const CELL_WIDTH: u16 = 2;
const SIDEBAR_WIDTH: u16 = 38;

fn term(color: Color) -> TermColor {
    TermColor::Rgb(color.r, color.g, color.b)
}

/// Black or white, whichever reads better on `color`.
fn contrast(color: Color) -> TermColor {
    if color.luma() > 128 {
        TermColor::Black
    } else {
        TermColor::White
    }
}

pub fn draw_editor(frame: &mut Frame<'_>, app: &mut EditorApp) {
    let area = frame.size();
    let colors = app.editor.theme().colors();
    let base = Style::default()
        .fg(term(colors.text))
        .bg(term(colors.background));
    frame.render_widget(Block::default().style(base), area);

    let grid = app.editor.grid();
    let header = Paragraph::new(Span::styled(
        format!(
            " {} | {} | {}x{} | {} theme | grid lines {} ",
            constants::APP_NAME,
            app.modal.title(),
            grid.width(),
            grid.height(),
            app.editor.theme().name(),
            if app.editor.show_grid_lines() { "on" } else { "off" },
        ),
        Style::default()
            .fg(term(colors.accent))
            .add_modifier(Modifier::BOLD),
    ));

    let palette_lines = palette_lines(app, area.width, &colors);
    let layout = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Length(1),
            Constraint::Length(palette_lines.len() as u16 + 1),
            Constraint::Min(3),
            Constraint::Length(2),
        ])
        .split(area);

    frame.render_widget(header, layout[0]);
    draw_palette_bar(frame, layout[1], app, palette_lines, &colors);
    app.geometry = draw_grid(frame, layout[2], app, &colors);
    draw_footer(frame, layout[3], app, &colors);

    match app.modal {
        Modal::None => {}
        Modal::Gallery => draw_gallery(frame, area, app, &colors),
        Modal::Stats => draw_stats_sidebar(frame, area, app, &colors),
        Modal::Export => draw_export(frame, area, app, &colors),
        Modal::Import => draw_import(frame, area, app, &colors),
        Modal::Resize => draw_resize(frame, area, app, &colors),
        Modal::Palette => draw_palette_editor(frame, area, app, &colors),
        Modal::AddFilament => draw_add_filament(frame, area, app, &colors),
    }
}

/// Filament swatches packed into lines of at most `width` columns. A
/// filament label is never split across lines.
fn palette_lines(app: &EditorApp, width: u16, colors: &ThemeColors) -> Vec<Line<'static>> {
    let current = app.editor.current_color();
    let width = width.max(1) as usize;

    let mut lines: Vec<Line<'static>> = Vec::new();
    let mut row: Vec<Span<'static>> = Vec::new();
    let mut row_width = 0;

    for (i, filament) in app.editor.palette().iter().enumerate() {
        let label_style = if filament.color == current {
            Style::default()
                .fg(term(colors.accent))
                .add_modifier(Modifier::BOLD | Modifier::UNDERLINED)
        } else {
            Style::default().fg(term(colors.text))
        };
        let key = if i < 9 {
            format!("{}:", i + 1)
        } else {
            String::new()
        };
        let swatch = Span::styled("██", Style::default().fg(term(filament.color)));
        let label = Span::styled(format!("{}{}  ", key, filament.name), label_style);
        let chunk_width = swatch.width() + label.width();

        if row_width > 0 && row_width + chunk_width > width {
            lines.push(Line::from(std::mem::take(&mut row)));
            row_width = 0;
        }
        row.push(swatch);
        row.push(label);
        row_width += chunk_width;
    }

    if !row.is_empty() {
        lines.push(Line::from(row));
    }
    if lines.is_empty() {
        lines.push(Line::from(Span::styled(
            "No filaments. Press f to add some.",
            Style::default().fg(term(colors.muted)),
        )));
    }
    lines
}

fn draw_palette_bar(
    frame: &mut Frame<'_>,
    area: Rect,
    app: &EditorApp,
    lines: Vec<Line<'static>>,
    colors: &ThemeColors,
) {
    let current = app.editor.current_color();
    let title = match app.editor.palette().find(current) {
        Some(f) => format!(" Current: {} ({}) ", f.name, f.color),
        None => format!(" Current: {} ", current),
    };

    let bar = Paragraph::new(lines).block(
        Block::default()
            .borders(Borders::TOP)
            .border_style(Style::default().fg(term(colors.cell_border)))
            .title(title),
    );
    frame.render_widget(bar, area);
}

/// First visible index that keeps `cursor` on screen, moving as little as
/// possible from `previous`.
fn scroll_offset(previous: usize, cursor: usize, visible: usize, total: usize) -> usize {
    let offset = previous.min(total - visible);
    if cursor < offset {
        cursor
    } else if cursor >= offset + visible {
        cursor + 1 - visible
    } else {
        offset
    }
}

/// Draws the visible part of the grid with 1-based labels on every side and
/// returns where the cells ended up.
fn draw_grid(
    frame: &mut Frame<'_>,
    area: Rect,
    app: &EditorApp,
    colors: &ThemeColors,
) -> Option<GridGeometry> {
    let grid = app.editor.grid();
    if area.width <= LABEL_WIDTH * 2 || area.height <= 2 {
        return None;
    }

    let columns = grid
        .width()
        .min(((area.width - LABEL_WIDTH * 2) / CELL_WIDTH) as usize);
    let rows = grid.height().min((area.height - 2) as usize);
    if columns == 0 || rows == 0 {
        return None;
    }

    let previous = app.geometry.map(|g| g.offset).unwrap_or((0, 0));
    let offset = (
        scroll_offset(previous.0, app.cursor.0, columns, grid.width()),
        scroll_offset(previous.1, app.cursor.1, rows, grid.height()),
    );

    let content_w = LABEL_WIDTH * 2 + CELL_WIDTH * columns as u16;
    let content_h = rows as u16 + 2;
    let origin_x = area.x + (area.width - content_w) / 2;
    let origin_y = area.y + (area.height - content_h) / 2;

    let label = Style::default().fg(term(colors.muted));
    let column_labels = || {
        let mut spans = vec![Span::raw(" ".repeat(LABEL_WIDTH as usize))];
        spans.extend(
            (offset.0..offset.0 + columns)
                .map(|x| Span::styled(format!("{:>2}", (x + 1) % 100), label)),
        );
        Line::from(spans)
    };

    let mut lines = Vec::with_capacity(content_h as usize);
    lines.push(column_labels());
    for y in offset.1..offset.1 + rows {
        let mut spans = Vec::with_capacity(columns + 2);
        spans.push(Span::styled(format!("{:>3} ", y + 1), label));
        for x in offset.0..offset.0 + columns {
            let cell = grid.get(x, y).unwrap_or(app.editor.config().default_color);
            spans.push(cell_span(cell, app.cursor == (x, y), app.editor.show_grid_lines(), colors));
        }
        spans.push(Span::styled(format!(" {:<3}", y + 1), label));
        lines.push(Line::from(spans));
    }
    lines.push(column_labels());

    let grid_area = Rect::new(origin_x, origin_y, content_w, content_h);
    frame.render_widget(Paragraph::new(lines), grid_area);

    Some(GridGeometry {
        cells: Rect::new(
            origin_x + LABEL_WIDTH,
            origin_y + 1,
            CELL_WIDTH * columns as u16,
            rows as u16,
        ),
        cell_width: CELL_WIDTH,
        columns,
        rows,
        offset,
    })
}

fn cell_span(cell: Color, is_cursor: bool, grid_lines: bool, colors: &ThemeColors) -> Span<'static> {
    let style = Style::default().bg(term(cell));
    if is_cursor {
        Span::styled("[]", style.fg(contrast(cell)).add_modifier(Modifier::BOLD))
    } else if grid_lines {
        Span::styled("▏ ", style.fg(term(colors.cell_border)))
    } else {
        Span::styled("  ", style)
    }
}

fn footer_hints(modal: Modal) -> &'static str {
    match modal {
        Modal::None => constants::EDITOR_KEY_HINTS,
        Modal::Gallery => "[Tab] name/list [Enter] save/load [d] delete [Esc] close",
        Modal::Stats => "[s/Esc] close",
        Modal::Export => "[w] write file [Enter/Esc] close",
        Modal::Import => "[Enter] import [Backspace] delete [Esc] cancel",
        Modal::Resize => "[Enter] resize [Esc] cancel",
        Modal::Palette => "[↑↓] move [Enter] select [a] add [d] delete [x] reset [Esc] close",
        Modal::AddFilament => "[Tab] next field [Enter] add [Esc] back",
    }
}

fn draw_footer(frame: &mut Frame<'_>, area: Rect, app: &EditorApp, colors: &ThemeColors) {
    let footer = Paragraph::new(vec![
        Line::from(Span::styled(
            footer_hints(app.modal),
            Style::default().fg(term(colors.muted)),
        )),
        Line::from(Span::styled(
            app.status.as_str(),
            Style::default().fg(term(colors.text)),
        )),
    ])
    .alignment(Alignment::Left);

    frame.render_widget(footer, area);
}

/// Half-block rendering of a grid, two rows per line.
pub fn preview_lines(grid: &Grid, pad: Color) -> Vec<Line<'static>> {
    let (cells, columns) = GridProcessor::new(pad).process(grid);
    cells
        .chunks(columns.max(1))
        .map(|row| {
            Line::from(
                row.iter()
                    .map(|cell| {
                        Span::styled(
                            cell.char.to_string(),
                            Style::default()
                                .fg(TermColor::Rgb(cell.fg.0, cell.fg.1, cell.fg.2))
                                .bg(TermColor::Rgb(cell.bg.0, cell.bg.1, cell.bg.2)),
                        )
                    })
                    .collect::<Vec<_>>(),
            )
        })
        .collect()
}

fn centered_rect(percent_x: u16, percent_y: u16, area: Rect) -> Rect {
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

fn modal_block(title: &str, colors: &ThemeColors) -> Block<'static> {
    Block::default()
        .borders(Borders::ALL)
        .border_style(Style::default().fg(term(colors.accent)))
        .style(
            Style::default()
                .fg(term(colors.text))
                .bg(term(colors.background)),
        )
        .title(Span::styled(
            format!(" {} ", title),
            Style::default()
                .fg(term(colors.accent))
                .add_modifier(Modifier::BOLD),
        ))
}

fn input_block(title: &'static str, focused: bool, colors: &ThemeColors) -> Block<'static> {
    let border = if focused { colors.accent } else { colors.cell_border };
    Block::default()
        .borders(Borders::ALL)
        .border_style(Style::default().fg(term(border)))
        .title(title)
}

fn input_text(value: &str, focused: bool) -> String {
    if focused {
        format!("{}_", value)
    } else {
        value.to_string()
    }
}

fn highlight(colors: &ThemeColors) -> Style {
    Style::default()
        .fg(term(colors.background))
        .bg(term(colors.accent))
        .add_modifier(Modifier::BOLD)
}

fn draw_gallery(frame: &mut Frame<'_>, area: Rect, app: &EditorApp, colors: &ThemeColors) {
    let popup = centered_rect(85, 85, area);
    frame.render_widget(Clear, popup);
    let block = modal_block(Modal::Gallery.title(), colors);
    let inner = block.inner(popup);
    frame.render_widget(block, popup);

    let layout = Layout::default()
        .direction(Direction::Vertical)
        .constraints([Constraint::Length(3), Constraint::Min(3)])
        .split(inner);

    let name_focused = app.gallery_focus == GalleryFocus::Name;
    let name = Paragraph::new(input_text(&app.name_input, name_focused))
        .block(input_block("Name your pixelplate...", name_focused, colors));
    frame.render_widget(name, layout[0]);

    let body = Layout::default()
        .direction(Direction::Horizontal)
        .constraints([Constraint::Percentage(45), Constraint::Percentage(55)])
        .split(layout[1]);

    let gallery = app.editor.gallery();
    let list_focused = app.gallery_focus == GalleryFocus::List;
    let items: Vec<ListItem<'_>> = gallery
        .entries()
        .iter()
        .map(|entry| {
            ListItem::new(Line::from(vec![
                Span::raw(entry.name.clone()),
                Span::styled(
                    format!("  {}x{}", entry.data.width(), entry.data.height()),
                    Style::default().fg(term(colors.muted)),
                ),
            ]))
        })
        .collect();

    if items.is_empty() {
        let empty = Paragraph::new("No pixelplates saved yet.")
            .style(Style::default().fg(term(colors.muted)))
            .block(input_block("Saved", list_focused, colors));
        frame.render_widget(empty, body[0]);
    } else {
        let list = List::new(items)
            .block(input_block("Saved", list_focused, colors))
            .highlight_style(if list_focused {
                highlight(colors)
            } else {
                Style::default().add_modifier(Modifier::BOLD)
            })
            .highlight_symbol("▶ ");
        let mut state = ListState::default();
        state.select(Some(app.gallery_index));
        frame.render_stateful_widget(list, body[0], &mut state);
    }

    let preview = gallery
        .get(app.gallery_index)
        .map(|entry| preview_lines(&entry.data, colors.background))
        .unwrap_or_default();
    let preview = Paragraph::new(preview)
        .alignment(Alignment::Center)
        .block(input_block("Preview", false, colors));
    frame.render_widget(preview, body[1]);
}

fn draw_stats_sidebar(frame: &mut Frame<'_>, area: Rect, app: &EditorApp, colors: &ThemeColors) {
    let width = SIDEBAR_WIDTH.min(area.width);
    let sidebar = Rect::new(area.x + area.width - width, area.y, width, area.height);
    frame.render_widget(Clear, sidebar);

    let stats = app.editor.stats();
    let mut lines = vec![
        Line::from(format!("Grid Size: {} × {}", stats.width, stats.height)),
        Line::from(""),
        Line::from(Span::styled(
            "Tile Counts:",
            Style::default().add_modifier(Modifier::BOLD),
        )),
    ];
    for ((color, _), text) in stats.counts().iter().zip(app.stats_lines()) {
        lines.push(Line::from(vec![
            Span::styled("██ ", Style::default().fg(term(*color))),
            Span::raw(text),
        ]));
    }
    lines.push(Line::from(""));
    lines.extend(preview_lines(app.editor.grid(), colors.background));

    let panel = Paragraph::new(lines).block(modal_block(Modal::Stats.title(), colors));
    frame.render_widget(panel, sidebar);
}

fn draw_export(frame: &mut Frame<'_>, area: Rect, app: &EditorApp, colors: &ThemeColors) {
    let popup = centered_rect(80, 70, area);
    frame.render_widget(Clear, popup);
    let text = Paragraph::new(app.editor.export_grid_text())
        .wrap(Wrap { trim: false })
        .block(modal_block(Modal::Export.title(), colors));
    frame.render_widget(text, popup);
}

fn draw_import(frame: &mut Frame<'_>, area: Rect, app: &EditorApp, colors: &ThemeColors) {
    let popup = centered_rect(80, 70, area);
    frame.render_widget(Clear, popup);
    let content = if app.text_input.is_empty() {
        Paragraph::new("Exported pixelplate data here...")
            .style(Style::default().fg(term(colors.muted)))
    } else {
        Paragraph::new(input_text(&app.text_input, true))
    };
    frame.render_widget(
        content
            .wrap(Wrap { trim: false })
            .block(modal_block(Modal::Import.title(), colors)),
        popup,
    );
}

fn draw_resize(frame: &mut Frame<'_>, area: Rect, app: &EditorApp, colors: &ThemeColors) {
    let popup = centered_rect(40, 30, area);
    frame.render_widget(Clear, popup);
    let block = modal_block(Modal::Resize.title(), colors);
    let inner = block.inner(popup);
    frame.render_widget(block, popup);

    let layout = Layout::default()
        .direction(Direction::Vertical)
        .constraints([Constraint::Length(3), Constraint::Min(1)])
        .split(inner);
    frame.render_widget(
        Paragraph::new(input_text(&app.text_input, true))
            .block(input_block("Size (N or WxH)", true, colors)),
        layout[0],
    );
    frame.render_widget(
        Paragraph::new(format!(
            "Every cell is reset to {}. Limit {}x{}.",
            app.editor.config().default_color,
            constants::MAX_GRID_DIMENSION,
            constants::MAX_GRID_DIMENSION
        ))
        .style(Style::default().fg(term(colors.muted)))
        .wrap(Wrap { trim: true }),
        layout[1],
    );
}

fn draw_palette_editor(frame: &mut Frame<'_>, area: Rect, app: &EditorApp, colors: &ThemeColors) {
    let popup = centered_rect(70, 70, area);
    frame.render_widget(Clear, popup);

    let current = app.editor.current_color();
    let items: Vec<ListItem<'_>> = app
        .editor
        .palette()
        .iter()
        .enumerate()
        .map(|(i, f)| {
            let mut spans = vec![
                Span::raw(if f.color == current { "● " } else { "  " }),
                Span::styled("██ ", Style::default().fg(term(f.color))),
                Span::raw(format!("{:>2}. {}", i + 1, f.name)),
                Span::styled(
                    format!("  {}", f.color),
                    Style::default().fg(term(colors.muted)),
                ),
            ];
            if let Some(material) = &f.material {
                spans.push(Span::styled(
                    format!("  {}", material),
                    Style::default().fg(term(colors.muted)),
                ));
            }
            ListItem::new(Line::from(spans))
        })
        .collect();

    let list = List::new(items)
        .block(modal_block(Modal::Palette.title(), colors))
        .highlight_style(highlight(colors))
        .highlight_symbol("▶ ");
    let mut state = ListState::default();
    if !app.editor.palette().is_empty() {
        state.select(Some(app.palette_index));
    }
    frame.render_stateful_widget(list, popup, &mut state);
}

fn draw_add_filament(frame: &mut Frame<'_>, area: Rect, app: &EditorApp, colors: &ThemeColors) {
    let popup = centered_rect(50, 40, area);
    frame.render_widget(Clear, popup);
    let block = modal_block(Modal::AddFilament.title(), colors);
    let inner = block.inner(popup);
    frame.render_widget(block, popup);

    let layout = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Length(3),
            Constraint::Length(3),
            Constraint::Min(1),
        ])
        .split(inner);

    let name_focused = app.add_field == AddField::Name;
    frame.render_widget(
        Paragraph::new(input_text(&app.add_name, name_focused))
            .block(input_block("Name", name_focused, colors)),
        layout[0],
    );
    frame.render_widget(
        Paragraph::new(input_text(&app.add_color, !name_focused))
            .block(input_block("Color (#rrggbb)", !name_focused, colors)),
        layout[1],
    );

    let swatch = match Color::parse(&app.add_color) {
        Ok(color) => Line::from(vec![
            Span::styled("██████ ", Style::default().fg(term(color))),
            Span::raw(color.to_string()),
        ]),
        Err(_) => Line::from(Span::styled(
            "Enter a hex color such as #ff8800",
            Style::default().fg(term(colors.muted)),
        )),
    };
    frame.render_widget(Paragraph::new(swatch), layout[2]);
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::editor::Editor;
    use crate::store::MemoryStore;
    use crate::utils::config::AppConfig;
    use ratatui::{backend::TestBackend, Terminal};

    fn app() -> EditorApp {
        let editor = Editor::open(Box::new(MemoryStore::new()), AppConfig::default()).unwrap();
        EditorApp::new(editor)
    }

    fn buffer_text(terminal: &Terminal<TestBackend>) -> String {
        let buffer = terminal.backend().buffer();
        buffer.content().iter().map(|cell| cell.symbol()).collect()
    }

    #[test]
    fn test_draw_records_grid_geometry() {
        let mut terminal = Terminal::new(TestBackend::new(100, 30)).unwrap();
        let mut app = app();
        terminal.draw(|frame| draw_editor(frame, &mut app)).unwrap();

        let geometry = app.geometry.unwrap();
        assert_eq!((geometry.columns, geometry.rows), (16, 16));
        assert_eq!(geometry.cells.width, 32);

        let text = buffer_text(&terminal);
        assert!(text.contains("Pixelfinity"));
        assert!(text.contains("Red PLA"));
    }

    #[test]
    fn test_standard_terminal_fits_default_grid_and_palette() {
        let mut terminal = Terminal::new(TestBackend::new(80, 24)).unwrap();
        let mut app = app();
        terminal.draw(|frame| draw_editor(frame, &mut app)).unwrap();

        let geometry = app.geometry.unwrap();
        assert_eq!((geometry.columns, geometry.rows), (16, 16));
        assert_eq!(geometry.offset, (0, 0));

        let text = buffer_text(&terminal);
        for name in ["1:Red PLA", "5:Grey PLA", "6:Light Blue PLA", "9:Black PLA"] {
            assert!(text.contains(name), "{} missing from palette bar", name);
        }
        assert!(text.contains("Click or press Space to paint"));
    }

    #[test]
    fn test_small_terminal_clips_grid() {
        let mut terminal = Terminal::new(TestBackend::new(30, 20)).unwrap();
        let mut app = app();
        terminal.draw(|frame| draw_editor(frame, &mut app)).unwrap();

        let geometry = app.geometry.unwrap();
        assert!(geometry.columns < 16);
        assert!(geometry.rows < 16);
        assert!(buffer_text(&terminal).contains("9:Black PLA"));
    }

    #[test]
    fn test_viewport_follows_cursor() {
        let mut terminal = Terminal::new(TestBackend::new(80, 24)).unwrap();
        let mut app = app();
        app.editor.resize(40, 40).unwrap();

        app.cursor = (39, 39);
        terminal.draw(|frame| draw_editor(frame, &mut app)).unwrap();
        let geometry = app.geometry.unwrap();
        assert_eq!(geometry.offset, (40 - geometry.columns, 40 - geometry.rows));
        let last = geometry.cells;
        assert_eq!(
            geometry.cell_at(last.x + last.width - 1, last.y + last.height - 1),
            Some((39, 39))
        );
        assert!(buffer_text(&terminal).contains(" 40 "));

        // Moving back inside the window keeps the offset.
        app.cursor = (39, 30);
        terminal.draw(|frame| draw_editor(frame, &mut app)).unwrap();
        assert_eq!(app.geometry.unwrap().offset, geometry.offset);

        app.cursor = (0, 0);
        terminal.draw(|frame| draw_editor(frame, &mut app)).unwrap();
        assert_eq!(app.geometry.unwrap().offset, (0, 0));
    }

    #[test]
    fn test_scroll_offset() {
        assert_eq!(scroll_offset(0, 5, 10, 40), 0);
        assert_eq!(scroll_offset(0, 15, 10, 40), 6);
        assert_eq!(scroll_offset(6, 3, 10, 40), 3);
        assert_eq!(scroll_offset(35, 39, 10, 40), 30);
        assert_eq!(scroll_offset(4, 2, 16, 16), 0);
    }

    #[test]
    fn test_every_modal_draws() {
        let mut terminal = Terminal::new(TestBackend::new(100, 40)).unwrap();
        let mut app = app();
        app.editor.save_pixelplate("heart").unwrap();

        for modal in [
            Modal::Gallery,
            Modal::Stats,
            Modal::Export,
            Modal::Import,
            Modal::Resize,
            Modal::Palette,
            Modal::AddFilament,
        ] {
            app.modal = modal;
            terminal.draw(|frame| draw_editor(frame, &mut app)).unwrap();
            assert!(buffer_text(&terminal).contains(modal.title()));
        }
    }

    #[test]
    fn test_preview_lines_pack_two_rows() {
        let grid = Grid::filled(4, Color::rgb(1, 1, 1)).unwrap();
        let lines = preview_lines(&grid, Color::rgb(0, 0, 0));
        assert_eq!(lines.len(), 2);
        assert_eq!(lines[0].spans.len(), 4);
    }
}
