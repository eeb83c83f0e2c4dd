//! `;`-separated command scripts for `-c/--command`.

use anyhow::{Context, Result, bail};
use gridpad_core::{CellId, Document, PropertyChange};
use log::warn;

#[derive(Clone, Debug, PartialEq, Eq)]
pub enum Command {
    Focus(CellId),
    Edit(CellId),
    Commit(CellId, String),
    Blur,
    Set(PropertyChange),
    Merge(Option<CellId>),
    Clear(CellId),
    ClearAll,
}

fn split_word(s: &str) -> (&str, &str) {
    let s = s.trim_start();
    match s.split_once(char::is_whitespace) {
        Some((word, rest)) => (word, rest),
        None => (s, ""),
    }
}

fn cell_id(word: &str) -> Result<CellId> {
    if word.is_empty() {
        bail!("missing cell id");
    }
    Ok(word.parse::<CellId>()?)
}

pub fn parse_command(line: &str) -> Result<Command> {
    let (name, rest) = split_word(line);
    let command = match name {
        "focus" => Command::Focus(cell_id(rest.trim())?),
        "edit" => Command::Edit(cell_id(rest.trim())?),
        "commit" => {
            let (id, text) = split_word(rest);
            Command::Commit(cell_id(id)?, text.to_string())
        }
        "blur" => Command::Blur,
        "set" => {
            let (property, value) = split_word(rest);
            Command::Set(PropertyChange::parse(property, value.trim())?)
        }
        "merge" => match rest.trim() {
            "" => Command::Merge(None),
            id => Command::Merge(Some(cell_id(id)?)),
        },
        "clear" => Command::Clear(cell_id(rest.trim())?),
        "clear-all" => Command::ClearAll,
        other => bail!("Unknown command: {:?}", other),
    };
    Ok(command)
}

pub fn parse_script(script: &str) -> Result<Vec<Command>> {
    script
        .split(';')
        .map(str::trim)
        .filter(|line| !line.is_empty())
        .map(|line| parse_command(line).with_context(|| format!("in command {:?}", line)))
        .collect()
}

pub fn apply(doc: &mut Document, command: &Command) -> gridpad_core::Result<()> {
    match command {
        Command::Focus(id) => doc.focus(id)?,
        Command::Edit(id) => {
            if !doc.begin_edit(id) {
                warn!("Cell {} is not focused; edit ignored", id);
            }
        }
        Command::Commit(id, text) => doc.commit_edit(id, text.as_str())?,
        Command::Blur => doc.clear_focus(),
        Command::Set(change) => doc.set_focused_property(change.clone())?,
        Command::Merge(target) => {
            let merged = match target {
                Some(id) => doc.merge(id)?,
                None => doc.merge_focused()?,
            };
            if !merged {
                warn!("Nothing to merge: cell is in the last column");
            }
        }
        Command::Clear(id) => doc.clear(id)?,
        Command::ClearAll => doc.clear_all(),
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use gridpad_core::FontFamily;

    #[test]
    fn test_parse_commands() {
        assert_eq!(
            parse_command("focus 1-2").unwrap(),
            Command::Focus(CellId::new(1, 2))
        );
        assert_eq!(
            parse_command("commit 0-0 hello  world").unwrap(),
            Command::Commit(CellId::new(0, 0), "hello  world".into())
        );
        assert_eq!(
            parse_command("commit 0-0").unwrap(),
            Command::Commit(CellId::new(0, 0), String::new())
        );
        assert_eq!(
            parse_command("set font monospace").unwrap(),
            Command::Set(PropertyChange::FontFamily(FontFamily::Monospace))
        );
        assert_eq!(parse_command("merge").unwrap(), Command::Merge(None));
        assert_eq!(parse_command("clear-all").unwrap(), Command::ClearAll);
    }

    #[test]
    fn test_parse_errors() {
        assert!(parse_command("focus").is_err());
        assert!(parse_command("focus A1").is_err());
        assert!(parse_command("set bold").is_err());
        assert!(parse_command("undo").is_err());
    }

    #[test]
    fn test_script_runs_against_document() {
        let mut doc = Document::new(3, 3);
        let script = "focus 0-0; commit 0-0 AB; commit 0-1 CD; set bold true; merge; clear 2-2";
        for command in parse_script(script).unwrap() {
            apply(&mut doc, &command).unwrap();
        }
        let cell = doc.cell(&CellId::new(0, 0)).unwrap();
        assert_eq!(cell.content, "ABCD");
        assert!(cell.bold);
        assert!(doc.cell(&CellId::new(0, 1)).unwrap().is_blank());
    }

    #[test]
    fn test_set_without_focus_fails() {
        let mut doc = Document::new(1, 1);
        let command = parse_command("set italic true").unwrap();
        assert!(apply(&mut doc, &command).is_err());
    }
}
