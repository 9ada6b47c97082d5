//! Notification content: `[<title>]<body>`

use super::cursor::Cursor;

/// Title/body pair read from stdin. Empty title means "no title line".
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Notification {
    pub title: String,
    pub body: String,
}

/// Split input into title and body. Never fails.
///
/// A leading `[` opens the title, which ends at the first `]` outside any
/// nested bracket pair. Without a matching `]` all remaining input is the
/// title and the body stays empty.
pub fn parse_notification(input: &str) -> Notification {
    let (cursor, bracketed) = Cursor::new(input.trim()).consume_if(|c| c == '[');
    if !bracketed {
        return Notification {
            title: String::new(),
            body: cursor.remaining().trim().to_string(),
        };
    }

    match cursor.lex_balanced('[', ']') {
        Ok((title, rest)) => Notification {
            title: title.trim().to_string(),
            body: rest.remaining().trim().to_string(),
        },
        Err((title, _)) => Notification {
            title: title.trim().to_string(),
            body: String::new(),
        },
    }
}
