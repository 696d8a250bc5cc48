use std::mem;

use anyhow::{Context, Result};
use crossterm::event::KeyCode;
use ratatui::layout::{Alignment, Constraint, Direction, Layout, Rect};
use ratatui::prelude::*;
use ratatui::text::{Line, Span};
use ratatui::widgets::{Block, Borders, Cell, Clear, Paragraph, Row, Table, TableState, Wrap};
use ratatui::Frame;
use rusqlite::Connection;

use crate::auth::{Credentials, LoginGate};
use crate::db::{create_book, delete_book, fetch_books, update_book};

use super::forms::{BookField, BookForm, CatalogError, LoginField, LoginForm, Notice};
use super::helpers::{centered_rect, key_hints};
use super::screens::CatalogView;

/// Footer space reserved for status messages and instructions.
const FOOTER_HEIGHT: u16 = 3;
/// Form block: three fields plus borders.
const FORM_HEIGHT: u16 = 5;
/// Width of a padded form label plus its `": "` separator.
const FORM_LABEL_WIDTH: u16 = 9;
/// Rows moved by PageUp/PageDown in the listing.
const PAGE_STEP: isize = 5;

/// Which of the two screens is live. There is no way back from `Catalog`.
enum Screen {
    Login(LoginForm),
    Catalog,
}

/// Modal layer on top of the current screen.
enum Mode {
    Normal,
    Notice(Notice),
}

/// Keyboard focus on the catalog screen.
#[derive(Copy, Clone, Debug, PartialEq, Eq)]
enum Focus {
    Field(BookField),
    Listing,
}

impl Focus {
    fn next(self) -> Self {
        match self {
            Focus::Field(BookField::Title) => Focus::Field(BookField::Author),
            Focus::Field(BookField::Author) => Focus::Field(BookField::Status),
            Focus::Field(BookField::Status) => Focus::Listing,
            Focus::Listing => Focus::Field(BookField::Title),
        }
    }

    fn previous(self) -> Self {
        match self {
            Focus::Field(BookField::Title) => Focus::Listing,
            Focus::Field(BookField::Author) => Focus::Field(BookField::Title),
            Focus::Field(BookField::Status) => Focus::Field(BookField::Author),
            Focus::Listing => Focus::Field(BookField::Status),
        }
    }
}

/// Central application state: the open connection, the login gate, the form
/// values, and the current projection of the `books` table.
pub struct App {
    conn: Connection,
    gate: LoginGate,
    screen: Screen,
    mode: Mode,
    form: BookForm,
    focus: Focus,
    view: CatalogView,
    /// Footer confirmation of the last successful action.
    status: Option<String>,
}

impl App {
    pub fn new(conn: Connection, credentials: Credentials) -> Self {
        Self {
            conn,
            gate: LoginGate::new(credentials),
            screen: Screen::Login(LoginForm::default()),
            mode: Mode::Normal,
            form: BookForm::default(),
            focus: Focus::Field(BookField::Title),
            view: CatalogView::default(),
            status: None,
        }
    }

    /// Close the database connection. Called once on normal shutdown.
    pub fn close(self) -> Result<()> {
        self.conn
            .close()
            .map_err(|(_, err)| err)
            .context("failed to close SQLite database")
    }

    /// Dispatch a plain key press. Returns `true` when the user asked to quit.
    pub fn handle_key(&mut self, code: KeyCode) -> Result<bool> {
        if let Mode::Notice(_) = self.mode {
            if matches!(code, KeyCode::Enter | KeyCode::Esc | KeyCode::Char(' ')) {
                self.mode = Mode::Normal;
            }
            return Ok(false);
        }

        let screen = mem::replace(&mut self.screen, Screen::Catalog);
        match screen {
            Screen::Login(form) => self.handle_login_key(code, form),
            Screen::Catalog => {
                self.handle_catalog_key(code)?;
                Ok(false)
            }
        }
    }

    /// Dispatch a Ctrl-modified key. Quitting works everywhere; the catalog
    /// actions only once logged in and with no notice open.
    pub(crate) fn handle_ctrl(&mut self, ch: char) -> Result<bool> {
        if matches!(ch, 'q' | 'c') {
            return Ok(true);
        }
        if matches!(self.mode, Mode::Notice(_)) || !matches!(self.screen, Screen::Catalog) {
            return Ok(false);
        }
        match ch {
            'a' => self.add_book()?,
            'u' => self.update_book()?,
            'd' => self.delete_book()?,
            _ => {}
        }
        Ok(false)
    }

    fn handle_login_key(&mut self, code: KeyCode, mut form: LoginForm) -> Result<bool> {
        match code {
            KeyCode::Esc => {
                self.screen = Screen::Login(form);
                return Ok(true);
            }
            KeyCode::Tab | KeyCode::BackTab | KeyCode::Up | KeyCode::Down => form.toggle_field(),
            KeyCode::Backspace => form.backspace(),
            KeyCode::Char(ch) => {
                form.push_char(ch);
            }
            KeyCode::Enter => match self.gate.submit(&form.username, &form.password) {
                Ok(()) => {
                    // The login form is dropped here and never rebuilt.
                    self.screen = Screen::Catalog;
                    self.refresh()?;
                    self.set_status("Logged in.");
                    return Ok(false);
                }
                Err(err) => self.mode = Mode::Notice(Notice::login_failed(err.to_string())),
            },
            _ => {}
        }
        self.screen = Screen::Login(form);
        Ok(false)
    }

    fn handle_catalog_key(&mut self, code: KeyCode) -> Result<()> {
        match code {
            KeyCode::Tab => self.focus = self.focus.next(),
            KeyCode::BackTab => self.focus = self.focus.previous(),
            KeyCode::Esc => self.view.clear_selection(),
            _ => match self.focus {
                Focus::Field(field) => self.handle_field_key(code, field),
                Focus::Listing => self.handle_listing_key(code)?,
            },
        }
        Ok(())
    }

    fn handle_field_key(&mut self, code: KeyCode, field: BookField) {
        match (field, code) {
            (BookField::Status, KeyCode::Left | KeyCode::Right | KeyCode::Char(' ')) => {
                self.form.toggle_status();
            }
            (_, KeyCode::Enter | KeyCode::Down) => self.focus = self.focus.next(),
            (_, KeyCode::Up) => {
                if field != BookField::Title {
                    self.focus = self.focus.previous();
                }
            }
            (_, KeyCode::Backspace) => self.form.backspace(field),
            (_, KeyCode::Char(ch)) => {
                self.form.push_char(field, ch);
            }
            _ => {}
        }
    }

    fn handle_listing_key(&mut self, code: KeyCode) -> Result<()> {
        match code {
            KeyCode::Up => self.view.move_selection(-1),
            KeyCode::Down => self.view.move_selection(1),
            KeyCode::PageUp => self.view.move_selection(-PAGE_STEP),
            KeyCode::PageDown => self.view.move_selection(PAGE_STEP),
            KeyCode::Home => self.view.select_first(),
            KeyCode::End => self.view.select_last(),
            KeyCode::Enter => {
                if let Some(book) = self.view.selected_book() {
                    self.form = BookForm::from_book(book);
                    self.focus = Focus::Field(BookField::Title);
                }
            }
            KeyCode::Delete => self.delete_book()?,
            _ => {}
        }
        Ok(())
    }

    /// Insert the form values as a new record. The form keeps its contents.
    fn add_book(&mut self) -> Result<()> {
        let (title, author, status) = match self.form.parse_inputs() {
            Ok(values) => values,
            Err(err) => {
                self.reject(err);
                return Ok(());
            }
        };

        let book = create_book(&self.conn, &title, &author, &status)?;
        self.refresh()?;
        self.set_status(format!("Added \"{}\" as #{}.", book.title, book.id));
        Ok(())
    }

    /// Overwrite the selected record with the form values, then clear the form.
    fn update_book(&mut self) -> Result<()> {
        let Some(id) = self.view.selected_id else {
            self.reject(CatalogError::NoSelection { action: "update" });
            return Ok(());
        };
        let (title, author, status) = match self.form.parse_inputs() {
            Ok(values) => values,
            Err(err) => {
                self.reject(err);
                return Ok(());
            }
        };

        update_book(&self.conn, id, &title, &author, &status)?;
        self.form.clear();
        self.refresh()?;
        self.set_status(format!("Updated #{id}."));
        Ok(())
    }

    fn delete_book(&mut self) -> Result<()> {
        let Some(id) = self.view.selected_id else {
            self.reject(CatalogError::NoSelection { action: "delete" });
            return Ok(());
        };

        delete_book(&self.conn, id)?;
        self.refresh()?;
        self.set_status(format!("Deleted #{id}."));
        Ok(())
    }

    /// Re-read every record and rebuild the listing and summary from it.
    fn refresh(&mut self) -> Result<()> {
        let books = fetch_books(&self.conn)?;
        tracing::debug!(rows = books.len(), "catalog refreshed");
        self.view.set_books(books);
        Ok(())
    }

    fn reject(&mut self, err: CatalogError) {
        tracing::debug!(%err, "action rejected");
        self.mode = Mode::Notice(Notice::error(err.to_string()));
    }

    fn set_status<S: Into<String>>(&mut self, text: S) {
        self.status = Some(text.into());
    }

    pub(crate) fn draw(&self, frame: &mut Frame) {
        let area = frame.area();
        let footer_height = FOOTER_HEIGHT.min(area.height);

        let (content_area, footer_area) = if area.height > footer_height {
            let chunks = Layout::default()
                .direction(Direction::Vertical)
                .constraints([Constraint::Min(0), Constraint::Length(footer_height)])
                .split(area);
            (chunks[0], chunks[1])
        } else {
            (area, area)
        };

        match &self.screen {
            Screen::Login(form) => self.draw_login(frame, content_area, form),
            Screen::Catalog => self.draw_catalog(frame, content_area),
        }

        if area.height >= footer_height {
            self.draw_footer(frame, footer_area);
        }

        if let Mode::Notice(notice) = &self.mode {
            self.draw_notice(frame, area, notice);
        }
    }

    fn draw_login(&self, frame: &mut Frame, area: Rect, form: &LoginForm) {
        let popup_area = centered_rect(50, 40, area);
        let block = Block::default().title("Login").borders(Borders::ALL);
        frame.render_widget(block.clone(), popup_area);
        let inner = block.inner(popup_area);

        let lines = vec![
            form.build_line(LoginField::Username),
            form.build_line(LoginField::Password),
            Line::from(""),
            Line::from(Span::styled(
                "Enter to log in - Tab to switch - Esc to quit",
                Style::default().fg(Color::Gray),
            )),
        ];
        frame.render_widget(Paragraph::new(lines).wrap(Wrap { trim: true }), inner);

        if matches!(self.mode, Mode::Normal) {
            let (prefix, row) = match form.active {
                LoginField::Username => ("Username: ".len() as u16, 0),
                LoginField::Password => ("Password: ".len() as u16, 1),
            };
            frame.set_cursor_position((
                inner.x + prefix + form.value_len(form.active) as u16,
                inner.y + row,
            ));
        }
    }

    fn draw_catalog(&self, frame: &mut Frame, area: Rect) {
        let chunks = Layout::default()
            .direction(Direction::Vertical)
            .constraints([
                Constraint::Length(FORM_HEIGHT),
                Constraint::Percentage(55),
                Constraint::Min(4),
                Constraint::Length(1),
            ])
            .split(area);

        self.draw_form(frame, chunks[0]);
        self.draw_listing(frame, chunks[1]);
        self.draw_summary(frame, chunks[2]);

        let totals = Paragraph::new(Span::styled(
            self.view.summary.totals_label(),
            Style::default().add_modifier(Modifier::BOLD),
        ))
        .alignment(Alignment::Center);
        frame.render_widget(totals, chunks[3]);
    }

    fn draw_form(&self, frame: &mut Frame, area: Rect) {
        let border_style = if matches!(self.focus, Focus::Field(_)) {
            Style::default().fg(Color::Cyan)
        } else {
            Style::default()
        };
        let block = Block::default()
            .title("Book")
            .borders(Borders::ALL)
            .border_style(border_style);
        frame.render_widget(block.clone(), area);
        let inner = block.inner(area);

        let fields = [BookField::Title, BookField::Author, BookField::Status];
        let lines: Vec<Line> = fields
            .iter()
            .map(|&field| self.form.build_line(field, self.focus == Focus::Field(field)))
            .collect();
        frame.render_widget(Paragraph::new(lines), inner);

        if let (Mode::Normal, Focus::Field(field)) = (&self.mode, self.focus) {
            let row = match field {
                BookField::Title => 0,
                BookField::Author => 1,
                BookField::Status => return,
            };
            frame.set_cursor_position((
                inner.x + FORM_LABEL_WIDTH + self.form.value_len(field) as u16,
                inner.y + row,
            ));
        }
    }

    fn draw_listing(&self, frame: &mut Frame, area: Rect) {
        let border_style = if self.focus == Focus::Listing {
            Style::default().fg(Color::Cyan)
        } else {
            Style::default()
        };
        let block = Block::default()
            .title(format!("Books ({})", self.view.books.len()))
            .borders(Borders::ALL)
            .border_style(border_style);

        if self.view.books.is_empty() {
            let message = Paragraph::new("No books yet. Fill in the form and press Ctrl-A.")
                .alignment(Alignment::Center)
                .block(block);
            frame.render_widget(message, area);
            return;
        }

        let rows = self.view.books.iter().map(|book| {
            Row::new(vec![
                Cell::from(book.id.to_string()),
                Cell::from(book.title.clone()),
                Cell::from(book.author.clone()),
                Cell::from(book.status.to_string()),
            ])
        });
        let table = Table::new(
            rows,
            [
                Constraint::Length(6),
                Constraint::Percentage(45),
                Constraint::Percentage(35),
                Constraint::Min(10),
            ],
        )
        .header(header_row(["ID", "Title", "Author", "Status"]))
        .row_highlight_style(Style::default().add_modifier(Modifier::REVERSED))
        .block(block);

        let mut state = TableState::default().with_selected(self.view.selected_index());
        frame.render_stateful_widget(table, area, &mut state);
    }

    fn draw_summary(&self, frame: &mut Frame, area: Rect) {
        let summary = &self.view.summary;
        let mut rows: Vec<Row> = summary
            .tallies
            .iter()
            .map(|tally| {
                Row::new(vec![
                    Cell::from(tally.title.clone()),
                    Cell::from(tally.author.clone()),
                    Cell::from(tally.available.to_string()),
                    Cell::from(tally.issued.to_string()),
                ])
            })
            .collect();
        rows.push(
            Row::new(vec![
                Cell::from("Total:"),
                Cell::from(""),
                Cell::from(summary.total_available.to_string()),
                Cell::from(summary.total_issued.to_string()),
            ])
            .style(Style::default().add_modifier(Modifier::BOLD)),
        );

        let table = Table::new(
            rows,
            [
                Constraint::Percentage(40),
                Constraint::Percentage(30),
                Constraint::Length(10),
                Constraint::Length(8),
            ],
        )
        .header(header_row(["Title", "Author", "Available", "Issued"]))
        .block(Block::default().title("Counts").borders(Borders::ALL));
        frame.render_widget(table, area);
    }

    fn draw_footer(&self, frame: &mut Frame, area: Rect) {
        let block = Block::default().borders(Borders::TOP);
        frame.render_widget(block.clone(), area);
        let inner = block.inner(area);

        let status_line = if let Some(status) = &self.status {
            Line::from(Span::styled(status.clone(), Style::default().fg(Color::Green)))
        } else {
            Line::from("")
        };

        let paragraph =
            Paragraph::new(vec![status_line, self.footer_instructions()]).wrap(Wrap { trim: true });
        frame.render_widget(paragraph, inner);
    }

    fn footer_instructions(&self) -> Line<'static> {
        let hints: &[(&str, &str)] = match (&self.screen, &self.mode, self.focus) {
            (_, Mode::Notice(_), _) => &[("Enter", "Dismiss")],
            (Screen::Login(_), _, _) => &[("Enter", "Log in"), ("Tab", "Switch"), ("Esc", "Quit")],
            (Screen::Catalog, _, Focus::Listing) => &[
                ("↑↓", "Select"),
                ("Enter", "Edit"),
                ("Del", "Delete"),
                ("Esc", "Deselect"),
                ("Tab", "Form"),
                ("Ctrl-Q", "Quit"),
            ],
            (Screen::Catalog, _, Focus::Field(_)) => &[
                ("Ctrl-A", "Add"),
                ("Ctrl-U", "Update"),
                ("Ctrl-D", "Delete"),
                ("Tab", "Next"),
                ("←→", "Status"),
                ("Ctrl-Q", "Quit"),
            ],
        };
        Line::from(key_hints(hints))
    }

    fn draw_notice(&self, frame: &mut Frame, area: Rect, notice: &Notice) {
        let popup_area = centered_rect(50, 30, area);
        frame.render_widget(Clear, popup_area);

        let block = Block::default()
            .title(notice.title.clone())
            .borders(Borders::ALL)
            .border_style(Style::default().fg(Color::Red));
        frame.render_widget(block.clone(), popup_area);
        let inner = block.inner(popup_area);

        let lines = vec![
            Line::from(notice.message.clone()),
            Line::from(""),
            Line::from(Span::styled(
                "Press Enter or Esc to dismiss.",
                Style::default().fg(Color::Gray),
            )),
        ];
        let paragraph = Paragraph::new(lines)
            .alignment(Alignment::Center)
            .wrap(Wrap { trim: true });
        frame.render_widget(paragraph, inner);
    }
}

fn header_row(titles: [&'static str; 4]) -> Row<'static> {
    Row::new(titles).style(
        Style::default()
            .fg(Color::Yellow)
            .add_modifier(Modifier::BOLD),
    )
}
