use std::fmt::Write;

use crate::state::PeopleState;

pub const HELP: &str = "\
Commands:
  name <text>    set the name field
  age <number>   set the age field
  add            add the person in the form
  edit <n>       copy person n into the form
  save           save the person being edited
  cancel         stop editing and clear the form
  delete <n>     delete person n
  reload         fetch the list again
  help           show this message
  quit           exit";

#[derive(Debug, Clone, PartialEq)]
pub enum Command {
    Name(String),
    Age(String),
    Add,
    Edit(usize),
    Save,
    Cancel,
    Delete(usize),
    Reload,
    Help,
    Quit,
}

/// Parses one line typed by the user, rows are numbered from 1 as shown in the list
pub fn parse_command(line: &str) -> Result<Command, String> {
    let line = line.trim();

    let (command, argument) = match line.split_once(char::is_whitespace) {
        Some((command, argument)) => (command, argument.trim()),
        None => (line, ""),
    };

    let row = |argument: &str| -> Result<usize, String> {
        match argument.parse::<usize>() {
            Ok(row) if row > 0 => Ok(row),
            _ => Err(format!("Expected a row number, got [{}]", argument)),
        }
    };

    match command {
        "name" => Ok(Command::Name(argument.to_string())),
        "age" => Ok(Command::Age(argument.to_string())),
        "add" => Ok(Command::Add),
        "edit" => row(argument).map(Command::Edit),
        "save" | "update" => Ok(Command::Save),
        "cancel" => Ok(Command::Cancel),
        "delete" => row(argument).map(Command::Delete),
        "reload" | "list" => Ok(Command::Reload),
        "help" | "?" => Ok(Command::Help),
        "quit" | "exit" => Ok(Command::Quit),
        "" => Err("Type a command, or help".to_string()),
        other => Err(format!("Unknown command [{}], try help", other)),
    }
}

pub fn render(state: &PeopleState) -> String {
    let mut out = String::new();

    let button = match state.editing {
        Some(_) => "Update",
        None => "Add",
    };

    let _ = writeln!(out, "People CRUD");
    let _ = writeln!(
        out,
        "Name: [{}]  Age: [{}]  ({})",
        state.form.name, state.form.age, button
    );
    let _ = writeln!(out, "{}", "-".repeat(40));

    if state.people.is_empty() {
        let _ = writeln!(out, "(nobody yet)");
    }

    for (index, person) in state.people.iter().enumerate() {
        let marker = match &state.editing {
            Some(id) if id == &person.id => " *",
            _ => "",
        };

        let _ = writeln!(
            out,
            "{}. {} - {}{}",
            index + 1,
            person.name,
            person.age,
            marker
        );
    }

    out
}

#[cfg(test)]
mod tests {
    use database::model::person::Person;
    use serde_json::Number;

    use super::*;

    #[test]
    fn parses_commands_with_arguments() {
        assert_eq!(
            parse_command("name  Ann Lee "),
            Ok(Command::Name("Ann Lee".to_string()))
        );
        assert_eq!(parse_command("age 30"), Ok(Command::Age("30".to_string())));
        assert_eq!(parse_command("edit 2"), Ok(Command::Edit(2)));
        assert_eq!(parse_command("delete 1"), Ok(Command::Delete(1)));
        assert_eq!(parse_command("add"), Ok(Command::Add));
    }

    #[test]
    fn rejects_bad_rows() {
        assert!(parse_command("edit 0").is_err());
        assert!(parse_command("delete").is_err());
        assert!(parse_command("edit two").is_err());
    }

    #[test]
    fn rejects_unknown_commands() {
        assert!(parse_command("frobnicate").is_err());
        assert!(parse_command("   ").is_err());
    }

    #[test]
    fn renders_form_and_rows() {
        let ann = Person::new("Ann".to_string(), Number::from(30));
        let bob = Person::new("Bob".to_string(), Number::from(41));

        let mut state = PeopleState::default();
        state.replace_people(vec![ann.clone(), bob]);
        state.start_edit(&ann);

        let rendered = render(&state);

        assert!(rendered.contains("Name: [Ann]  Age: [30]  (Update)"));
        assert!(rendered.contains("1. Ann - 30 *"));
        assert!(rendered.contains("2. Bob - 41\n"));
    }

    #[test]
    fn renders_empty_list() {
        let rendered = render(&PeopleState::default());

        assert!(rendered.contains("(Add)"));
        assert!(rendered.contains("(nobody yet)"));
    }
}
