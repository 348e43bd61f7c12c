//! Command tokenization and dispatch.

use heapless::Vec;

use weave_rt::{await_some, Context, Routine, Step};

use crate::console::Console;
use crate::reader::LineChannel;

/// Most tokens considered per line, command name included; the rest of the
/// line is ignored.
pub const MAX_ARGS: usize = 10;

/// Handler signature; `args[0]` is the command name, like `argv` in `main`.
pub type CommandFn = fn(args: &[&str], console: &dyn Console);

/// One dispatch table entry. `help` is the usage string minus the command
/// name; the built-in help command prefixes the name itself.
pub struct Command {
    pub name: &'static str,
    pub help: &'static str,
    pub run: CommandFn,
}

#[cfg(feature = "defmt")]
impl defmt::Format for Command {
    fn format(&self, fmt: defmt::Formatter) {
        defmt::write!(fmt, "{=str} {=str}", self.name, self.help);
    }
}

/// Routine that runs completed lines against a static command table.
///
/// Tokenizes on whitespace and scans the table linearly, which is plenty for
/// the handful of commands a console carries. `help` is built in: bare, it
/// lists the table; with a topic, it prints that command's usage.
pub struct Dispatcher {
    console: &'static dyn Console,
    lines: &'static LineChannel,
    table: &'static [Command],
}

impl Dispatcher {
    pub const fn new(
        console: &'static dyn Console,
        lines: &'static LineChannel,
        table: &'static [Command],
    ) -> Self {
        Self {
            console,
            lines,
            table,
        }
    }

    fn run_line(&self, line: &str) {
        let mut argv: Vec<&str, MAX_ARGS> = Vec::new();
        for token in line.split_whitespace() {
            if argv.push(token).is_err() {
                break;
            }
        }
        let Some(&command) = argv.first() else {
            return;
        };

        if command == "help" {
            self.run_help(&argv);
            return;
        }

        for entry in self.table {
            if entry.name == command {
                (entry.run)(&argv, self.console);
                return;
            }
        }

        self.console.write_str("unknown command: ");
        self.console.write_line(command);
    }

    fn run_help(&self, argv: &[&str]) {
        if argv.len() == 2 {
            let topic = argv[1];
            if topic == "help" {
                self.console.write_line("usage: help [command]");
                return;
            }
            for entry in self.table {
                if entry.name == topic {
                    self.console.write_str("usage: ");
                    self.console.write_str(entry.name);
                    self.console.write_str(" ");
                    self.console.write_line(entry.help);
                    return;
                }
            }
            self.console.write_str("unknown command: ");
            self.console.write_line(topic);
        } else {
            self.console.write_str("commands: help");
            for entry in self.table {
                self.console.write_str(" ");
                self.console.write_str(entry.name);
            }
            self.console.write_byte(b'\n');
        }
    }
}

impl Routine for Dispatcher {
    fn name(&self) -> &'static str {
        "dispatcher"
    }

    fn step(&mut self, _cx: &mut Context) -> Step {
        loop {
            let line = await_some!(self.lines.read());
            if line.truncated {
                self.console.write_str("line too long: ");
                self.console.write_bytes(&line.bytes);
                self.console.write_byte(b'\n');
                continue;
            }
            let Some(text) = line.as_str() else {
                self.console.write_line("line is not valid utf-8");
                continue;
            };
            self.run_line(text);
        }
    }
}
