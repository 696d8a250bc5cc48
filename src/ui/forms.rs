use ratatui::style::{Color, Style};
use ratatui::text::{Line, Span};
use thiserror::Error;

use crate::models::{Book, BookStatus};

/// User-facing validation failures. None of them touch storage; the action is
/// simply not performed.
#[derive(Debug, Error, PartialEq, Eq)]
pub(crate) enum CatalogError {
    #[error("Please enter both title and author.")]
    MissingFields,
    #[error("Please select a book to {action}.")]
    NoSelection { action: &'static str },
}

/// Fields of the catalog form, in focus order.
#[derive(Copy, Clone, Debug, Default, PartialEq, Eq)]
pub(crate) enum BookField {
    #[default]
    Title,
    Author,
    Status,
}

/// Current title/author/status values typed by the user.
#[derive(Default, Clone, Debug)]
pub(crate) struct BookForm {
    pub(crate) title: String,
    pub(crate) author: String,
    pub(crate) status: BookStatus,
}

impl BookForm {
    /// Copy a listed record into the form for editing. Statuses outside the
    /// vocabulary fall back to the default.
    pub(crate) fn from_book(book: &Book) -> Self {
        let status = match book.status {
            BookStatus::Other(_) => BookStatus::default(),
            ref known => known.clone(),
        };
        Self {
            title: book.title.clone(),
            author: book.author.clone(),
            status,
        }
    }

    /// Append a character to a text field. The status field only toggles.
    pub(crate) fn push_char(&mut self, field: BookField, ch: char) -> bool {
        if ch.is_control() {
            return false;
        }
        match field {
            BookField::Title => self.title.push(ch),
            BookField::Author => self.author.push(ch),
            BookField::Status => return false,
        }
        true
    }

    pub(crate) fn backspace(&mut self, field: BookField) {
        match field {
            BookField::Title => {
                self.title.pop();
            }
            BookField::Author => {
                self.author.pop();
            }
            BookField::Status => {}
        }
    }

    pub(crate) fn toggle_status(&mut self) {
        self.status = self.status.toggled();
    }

    /// Reset every field, status included.
    pub(crate) fn clear(&mut self) {
        *self = Self::default();
    }

    /// Require a non-empty title and author. Values are passed through exactly
    /// as typed, surrounding whitespace included.
    pub(crate) fn parse_inputs(&self) -> Result<(String, String, BookStatus), CatalogError> {
        if self.title.is_empty() || self.author.is_empty() {
            return Err(CatalogError::MissingFields);
        }
        Ok((self.title.clone(), self.author.clone(), self.status.clone()))
    }

    /// Render one labelled form line, highlighting the focused field.
    pub(crate) fn build_line(&self, field: BookField, focused: bool) -> Line<'static> {
        let (label, value, placeholder) = match field {
            BookField::Title => ("Title", self.title.clone(), "<required>"),
            BookField::Author => ("Author", self.author.clone(), "<required>"),
            BookField::Status => ("Status", format!("< {} >", self.status), ""),
        };

        let style = if focused {
            Style::default().fg(Color::Yellow)
        } else if value.is_empty() {
            Style::default().fg(Color::DarkGray)
        } else {
            Style::default()
        };
        let display = if value.is_empty() {
            placeholder.to_string()
        } else {
            value
        };

        Line::from(vec![
            Span::raw(format!("{}: ", field_label(label))),
            Span::styled(display, style),
        ])
    }

    pub(crate) fn value_len(&self, field: BookField) -> usize {
        match field {
            BookField::Title => self.title.chars().count(),
            BookField::Author => self.author.chars().count(),
            BookField::Status => 0,
        }
    }
}

/// Pad labels so the form values line up.
pub(crate) fn field_label(label: &str) -> String {
    format!("{label:<7}")
}

#[derive(Copy, Clone, Debug, Default, PartialEq, Eq)]
pub(crate) enum LoginField {
    #[default]
    Username,
    Password,
}

/// Username and password inputs of the login screen.
#[derive(Default, Clone)]
pub(crate) struct LoginForm {
    pub(crate) username: String,
    pub(crate) password: String,
    pub(crate) active: LoginField,
}

impl LoginForm {
    pub(crate) fn toggle_field(&mut self) {
        self.active = match self.active {
            LoginField::Username => LoginField::Password,
            LoginField::Password => LoginField::Username,
        };
    }

    pub(crate) fn push_char(&mut self, ch: char) -> bool {
        if ch.is_control() {
            return false;
        }
        match self.active {
            LoginField::Username => self.username.push(ch),
            LoginField::Password => self.password.push(ch),
        }
        true
    }

    pub(crate) fn backspace(&mut self) {
        match self.active {
            LoginField::Username => {
                self.username.pop();
            }
            LoginField::Password => {
                self.password.pop();
            }
        }
    }

    /// Render a login line. The password is masked with `*`.
    pub(crate) fn build_line(&self, field: LoginField) -> Line<'static> {
        let (label, display) = match field {
            LoginField::Username => ("Username", self.username.clone()),
            LoginField::Password => ("Password", "*".repeat(self.password.chars().count())),
        };
        let style = if self.active == field {
            Style::default().fg(Color::Yellow)
        } else {
            Style::default()
        };
        Line::from(vec![
            Span::raw(format!("{label}: ")),
            Span::styled(display, style),
        ])
    }

    pub(crate) fn value_len(&self, field: LoginField) -> usize {
        match field {
            LoginField::Username => self.username.chars().count(),
            LoginField::Password => self.password.chars().count(),
        }
    }
}

/// Modal notification. The screen beneath stays frozen until it is dismissed.
#[derive(Clone, Debug, PartialEq, Eq)]
pub(crate) struct Notice {
    pub(crate) title: String,
    pub(crate) message: String,
}

impl Notice {
    pub(crate) fn error(message: impl Into<String>) -> Self {
        Self {
            title: "Error".to_string(),
            message: message.into(),
        }
    }

    pub(crate) fn login_failed(message: impl Into<String>) -> Self {
        Self {
            title: "Login Failed".to_string(),
            message: message.into(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn empty_title_or_author_is_rejected() {
        let mut form = BookForm::default();
        assert_eq!(form.parse_inputs(), Err(CatalogError::MissingFields));

        form.title = "Dune".into();
        assert_eq!(form.parse_inputs(), Err(CatalogError::MissingFields));

        form.author = "Herbert".into();
        assert_eq!(
            form.parse_inputs(),
            Ok(("Dune".into(), "Herbert".into(), BookStatus::Available))
        );
    }

    #[test]
    fn whitespace_is_kept_verbatim() {
        let form = BookForm {
            title: "  Dune ".into(),
            author: " ".into(),
            status: BookStatus::Issued,
        };
        assert_eq!(
            form.parse_inputs(),
            Ok(("  Dune ".into(), " ".into(), BookStatus::Issued))
        );
    }

    #[test]
    fn status_field_ignores_typing_and_toggles() {
        let mut form = BookForm::default();
        assert!(!form.push_char(BookField::Status, 'x'));
        form.toggle_status();
        assert_eq!(form.status, BookStatus::Issued);
        form.clear();
        assert_eq!(form.status, BookStatus::Available);
    }

    #[test]
    fn editing_unknown_status_falls_back_to_default() {
        let book = Book {
            id: 7,
            title: "A".into(),
            author: "X".into(),
            status: BookStatus::Other("Lost".into()),
        };
        assert_eq!(BookForm::from_book(&book).status, BookStatus::Available);
    }

    #[test]
    fn no_selection_message_names_the_action() {
        let err = CatalogError::NoSelection { action: "delete" };
        assert_eq!(err.to_string(), "Please select a book to delete.");
    }

    #[test]
    fn password_is_masked() {
        let mut form = LoginForm::default();
        form.toggle_field();
        for ch in "hunter2".chars() {
            form.push_char(ch);
        }
        let line = form.build_line(LoginField::Password);
        let text: String = line.spans.iter().map(|s| s.content.as_ref()).collect();
        assert_eq!(text, "Password: *******");
    }
}
