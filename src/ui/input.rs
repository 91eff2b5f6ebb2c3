//! Command-line input mapping.
//!
//! The terminal front end reads whole lines from stdin. Each line is mapped
//! to an [`Event`] for the running application:
//!
//! | Line                          | Event                          |
//! |-------------------------------|--------------------------------|
//! | `/text` or plain `text`       | `SearchInput("text")`          |
//! | `:page N`                     | `PageChange(N)`                |
//! | `:next`, `:prev`              | `NextPage`, `PrevPage`         |
//! | `:open ID`                    | `SelectItem(ID)`               |
//! | `:del ID`                     | `DeleteItem(ID)`               |
//! | `:new`                        | `OpenCreateForm`               |
//! | `:new title \| content \| tag`| `CreateItem(payload)`          |
//! | `:close`                      | `CloseModal`                   |
//! | `:q`, `:quit`                 | quit                           |

use crate::app::Event;
use crate::domain::{CreateNotePayload, ItemId};

#[derive(Debug, Clone, PartialEq)]
pub enum Input {
    Event(Event),
    Quit,
    /// Unrecognized or malformed command, with a reason.
    Invalid(String),
    /// Blank line.
    Nothing,
}

/// Maps one input line to an [`Input`].
///
/// # Examples
///
/// ```
/// use notehub::app::Event;
/// use notehub::ui::input::{parse_command, Input};
///
/// assert_eq!(parse_command(":page 3"), Input::Event(Event::PageChange(3)));
/// assert_eq!(parse_command("/milk"), Input::Event(Event::SearchInput("milk".to_string())));
/// ```
#[must_use]
pub fn parse_command(line: &str) -> Input {
    let line = line.trim_end_matches(['\r', '\n']);

    if let Some(term) = line.strip_prefix('/') {
        return Input::Event(Event::SearchInput(term.to_string()));
    }

    let Some(command) = line.strip_prefix(':') else {
        if line.trim().is_empty() {
            return Input::Nothing;
        }
        return Input::Event(Event::SearchInput(line.to_string()));
    };

    let (name, arg) = command
        .trim()
        .split_once(char::is_whitespace)
        .map_or((command.trim(), ""), |(name, arg)| (name, arg.trim()));

    match name {
        "q" | "quit" => Input::Quit,
        "next" | "n" => Input::Event(Event::NextPage),
        "prev" | "p" => Input::Event(Event::PrevPage),
        "close" | "c" => Input::Event(Event::CloseModal),
        "page" => arg.parse::<u32>().map_or_else(
            |_| Input::Invalid(format!("Invalid page number: {arg}")),
            |page| Input::Event(Event::PageChange(page)),
        ),
        "open" | "del" | "delete" if arg.is_empty() => Input::Invalid(format!(":{name} needs an id")),
        "open" => Input::Event(Event::SelectItem(ItemId::new(arg))),
        "del" | "delete" => Input::Event(Event::DeleteItem(ItemId::new(arg))),
        "new" if arg.is_empty() => Input::Event(Event::OpenCreateForm),
        "new" => CreateNotePayload::parse(arg).map_or_else(
            |error| Input::Invalid(error.to_string()),
            |payload| Input::Event(Event::CreateItem(payload)),
        ),
        _ => Input::Invalid(format!("Unknown command: :{name}")),
    }
}
