//! # Shell Router
//!
//! The read-evaluate-print loop. It owns the available modules and which one,
//! if any, is active, and decides for every line who handles it:
//!
//! - no active module: the line is a shell command (`help`, `modules`,
//!   `enter_module <name>`, `exit`)
//! - active module: `exit` and `module_exit` return to the shell; anything
//!   else goes to the module verbatim
//!
//! The exit phrases are checked before the module sees the line, so no module
//! can shadow them.

use crate::console::{write_message, CmdMessage};
use crate::error::Result;
use crate::module::CommandModule;
use colored::Colorize;
use std::io::{BufRead, Write};

pub const SHELL_PROMPT: &str = "> ";
pub const ENTER_COMMAND: &str = "enter_module";
pub const EXIT_PHRASES: [&str; 2] = ["exit", "module_exit"];

const SHELL_HELP: &str = "\
--- Main Help ---
help                - Shows this help
modules             - Lists all available modules
enter_module <name> - Enters a specific module
exit                - Exits the shell";

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Flow {
    Continue,
    Exit,
}

pub struct Shell {
    modules: Vec<Box<dyn CommandModule>>,
    active: Option<usize>,
}

impl Shell {
    pub fn new(modules: Vec<Box<dyn CommandModule>>) -> Self {
        Self {
            modules,
            active: None,
        }
    }

    pub fn active_module(&self) -> Option<&dyn CommandModule> {
        self.active.map(|i| self.modules[i].as_ref())
    }

    pub fn prompt(&self) -> String {
        match self.active_module() {
            Some(module) => format!("{}> ", module.name()),
            None => SHELL_PROMPT.to_string(),
        }
    }

    /// Run until `exit` at the top level or end of input.
    ///
    /// Lines are read as bytes; invalid UTF-8 is replaced rather than
    /// rejected so a stray byte cannot end the session.
    pub fn run<R: BufRead, W: Write>(&mut self, mut input: R, mut out: W) -> Result<()> {
        let mut buf = Vec::new();
        loop {
            write!(out, "{}", self.prompt())?;
            out.flush()?;

            buf.clear();
            if input.read_until(b'\n', &mut buf)? == 0 {
                writeln!(out)?;
                log::debug!("End of input, leaving shell");
                return Ok(());
            }

            let line = String::from_utf8_lossy(&buf);
            if self.handle_line(&line, &mut out)? == Flow::Exit {
                return Ok(());
            }
        }
    }

    /// Interpret one line of input.
    pub fn handle_line(&mut self, line: &str, out: &mut dyn Write) -> Result<Flow> {
        let input = line.trim();
        if input.is_empty() {
            return Ok(Flow::Continue);
        }

        match self.active {
            None => self.handle_shell_command(input, out),
            Some(index) => {
                self.handle_module_input(index, input, out)?;
                Ok(Flow::Continue)
            }
        }
    }

    fn handle_shell_command(&mut self, input: &str, out: &mut dyn Write) -> Result<Flow> {
        match input {
            "help" => writeln!(out, "{}", SHELL_HELP)?,
            "modules" => self.list_modules(out)?,
            "exit" => return Ok(Flow::Exit),
            ENTER_COMMAND => writeln!(out, "Usage: {} <name>", ENTER_COMMAND)?,
            _ => match input.strip_prefix(ENTER_COMMAND) {
                Some(rest) if rest.starts_with(char::is_whitespace) => {
                    self.enter_module(rest.trim(), out)?
                }
                _ => writeln!(out, "Unknown command. Type 'help'.")?,
            },
        }
        Ok(Flow::Continue)
    }

    fn list_modules(&self, out: &mut dyn Write) -> Result<()> {
        writeln!(out, "--- Available Modules ---")?;
        if self.modules.is_empty() {
            writeln!(out, "No modules found.")?;
        }
        for module in &self.modules {
            writeln!(out, "{} - {}", module.name().bold(), module.description())?;
        }
        Ok(())
    }

    fn enter_module(&mut self, name: &str, out: &mut dyn Write) -> Result<()> {
        let wanted = name.to_lowercase();
        let Some(index) = self
            .modules
            .iter()
            .position(|m| m.name().to_lowercase() == wanted)
        else {
            write_message(out, &CmdMessage::warning("Module not found."))?;
            return Ok(());
        };

        self.active = Some(index);
        let module = &self.modules[index];
        log::debug!("Entering module {}", module.name());
        writeln!(
            out,
            "Entering module: {}. Type 'exit' to return.",
            module.name()
        )?;
        self.report(module.show_help(out), out)
    }

    fn handle_module_input(
        &mut self,
        index: usize,
        input: &str,
        out: &mut dyn Write,
    ) -> Result<()> {
        if EXIT_PHRASES.contains(&input) {
            writeln!(out, "Exiting {} module.", self.modules[index].name())?;
            self.active = None;
            return Ok(());
        }

        let outcome = self.modules[index].process_command(input, out);
        self.report(outcome, out)
    }

    /// Module failures are printed and swallowed so the loop keeps going.
    fn report(&self, outcome: Result<()>, out: &mut dyn Write) -> Result<()> {
        if let Err(e) = outcome {
            log::debug!("Module command failed: {:?}", e);
            writeln!(out, "{}", format!("Error: {}", e).red())?;
        }
        Ok(())
    }
}
