//! Interactive form loop.
//!
//! Mirrors the desktop window: a four-field form with "Save Record" and
//! "View Registry" actions. Dialogs become `[Success]` / `[Error]` lines.

use crate::registry_table;
use car_registry_core::{
    CarField, CarForm, CarRepository, CarService, SaveError, SAVE_SUCCESS_MESSAGE,
};
use log::error;
use std::io::{self, BufRead, Write};

const MENU: &str = "Actions: [1] save  [2] view  [q] quit";

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Action {
    Save,
    View,
    Quit,
}

fn parse_action(line: &str) -> Option<Action> {
    match line.trim().to_ascii_lowercase().as_str() {
        "1" | "save" | "s" => Some(Action::Save),
        "2" | "view" | "v" => Some(Action::View),
        "q" | "quit" | "exit" => Some(Action::Quit),
        _ => None,
    }
}

/// One terminal session bound to a service and a pair of streams.
pub struct Session<'s, R: CarRepository, I: BufRead, O: Write> {
    service: &'s CarService<R>,
    input: I,
    output: O,
    form: CarForm,
}

impl<'s, R: CarRepository, I: BufRead, O: Write> Session<'s, R, I, O> {
    pub fn new(service: &'s CarService<R>, input: I, output: O) -> Self {
        Self {
            service,
            input,
            output,
            form: CarForm::default(),
        }
    }

    /// Runs until `quit` or end of input.
    pub fn run(&mut self) -> io::Result<()> {
        loop {
            writeln!(self.output, "{MENU}")?;
            write!(self.output, "> ")?;
            self.output.flush()?;

            let Some(line) = self.read_line()? else {
                return Ok(());
            };
            match parse_action(&line) {
                Some(Action::Save) => {
                    if !self.fill_form()? {
                        return Ok(());
                    }
                    self.save()?;
                }
                Some(Action::View) => self.view()?,
                Some(Action::Quit) => return Ok(()),
                None if line.trim().is_empty() => {}
                None => writeln!(self.output, "Unknown action `{}`.", line.trim())?,
            }
        }
    }

    /// Prompts for every field. Returns `false` when input ended mid-form.
    fn fill_form(&mut self) -> io::Result<bool> {
        for field in CarField::ALL {
            write!(self.output, "{}: ", field.label())?;
            self.output.flush()?;
            match self.read_line()? {
                Some(value) => self.form.set(field, value),
                None => return Ok(false),
            }
        }
        Ok(true)
    }

    fn save(&mut self) -> io::Result<()> {
        match self.service.save_record(&mut self.form) {
            Ok(_) => writeln!(self.output, "[Success] {SAVE_SUCCESS_MESSAGE}"),
            Err(err @ SaveError::Validation(_)) => writeln!(self.output, "[Error] {err}"),
            Err(err) => {
                error!("event=cli_save module=cli status=error error={err}");
                writeln!(self.output, "[Error] Could not save record: {err}")
            }
        }
    }

    fn view(&mut self) -> io::Result<()> {
        match self.service.view_registry() {
            Ok(snapshot) => writeln!(self.output, "{}", registry_table::render(&snapshot)),
            Err(err) => {
                error!("event=cli_view module=cli status=error error={err}");
                writeln!(self.output, "[Error] Could not load registry: {err}")
            }
        }
    }

    fn read_line(&mut self) -> io::Result<Option<String>> {
        let mut line = String::new();
        if self.input.read_line(&mut line)? == 0 {
            return Ok(None);
        }
        let trimmed_len = line.trim_end_matches(['\n', '\r']).len();
        line.truncate(trimmed_len);
        Ok(Some(line))
    }
}

#[cfg(test)]
mod tests {
    use super::{parse_action, Action, Session};
    use car_registry_core::db::open_db_in_memory;
    use car_registry_core::{CarRepository, CarService, SqliteCarRepository};
    use std::io::Cursor;

    fn run_script<R: CarRepository>(service: &CarService<R>, script: &str) -> String {
        let mut output = Vec::new();
        Session::new(service, Cursor::new(script.as_bytes()), &mut output)
            .run()
            .unwrap();
        String::from_utf8(output).unwrap()
    }

    #[test]
    fn parse_action_accepts_aliases() {
        assert_eq!(parse_action(" SAVE "), Some(Action::Save));
        assert_eq!(parse_action("2"), Some(Action::View));
        assert_eq!(parse_action("exit"), Some(Action::Quit));
        assert_eq!(parse_action("delete"), None);
    }

    #[test]
    fn save_then_view_shows_the_new_row() {
        let conn = open_db_in_memory().unwrap();
        let service = CarService::new(SqliteCarRepository::try_new(&conn).unwrap());

        let output = run_script(&service, "1\nGrace\nFord\nMustang\n1967\n2\nq\n");

        assert!(output.contains("Owner Name: "));
        assert!(output.contains("Car Make: "));
        assert!(output.contains("[Success] Car ownership record saved successfully!"));
        assert!(output.contains("Owner Name"));
        assert!(output.contains("Mustang"));
        assert_eq!(service.count().unwrap(), 1);
    }

    #[test]
    fn invalid_input_prints_error_and_writes_nothing() {
        let conn = open_db_in_memory().unwrap();
        let service = CarService::new(SqliteCarRepository::try_new(&conn).unwrap());

        let output = run_script(&service, "save\nAda\n\n500\n1957\nsave\nAda\nFiat\n500\n3000\n");

        assert!(output.contains("[Error] All fields are required!"));
        assert!(output.contains("[Error] Year must be a valid number between 1886 and 2025!"));
        assert_eq!(service.count().unwrap(), 0);
    }

    #[test]
    fn view_on_empty_registry_prints_placeholder() {
        let conn = open_db_in_memory().unwrap();
        let service = CarService::new(SqliteCarRepository::try_new(&conn).unwrap());

        let output = run_script(&service, "view\n");
        assert!(output.contains("No records yet."));
    }

    #[test]
    fn end_of_input_mid_form_stops_without_saving() {
        let conn = open_db_in_memory().unwrap();
        let service = CarService::new(SqliteCarRepository::try_new(&conn).unwrap());

        let output = run_script(&service, "1\nAda\nFiat\n");
        assert!(!output.contains("[Success]"));
        assert_eq!(service.count().unwrap(), 0);
    }

    #[test]
    fn unknown_action_is_reported() {
        let conn = open_db_in_memory().unwrap();
        let service = CarService::new(SqliteCarRepository::try_new(&conn).unwrap());

        let output = run_script(&service, "delete\nq\n");
        assert!(output.contains("Unknown action `delete`."));
    }
}
