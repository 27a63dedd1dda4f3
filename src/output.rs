use colored::Colorize;

use crate::registers::Word;

/// Sink for everything a running program makes observable.
pub trait Output {
    /// `PRN`: one decimal value per line.
    fn print_value(&mut self, value: Word);
    /// `HLT`: printed once, before the machine stops.
    fn halted(&mut self);
    /// Diagnostic trace line, see [`crate::Machine::trace`].
    fn trace(&mut self, line: &str);
}

/// Writes program output to stdout and diagnostics to stderr.
#[derive(Clone, Copy, Debug, Default)]
pub struct Terminal {
    minimal: bool,
}

impl Terminal {
    pub fn new(minimal: bool) -> Self {
        Self { minimal }
    }
}

impl Output for Terminal {
    fn print_value(&mut self, value: Word) {
        println!("{value}");
    }

    fn halted(&mut self) {
        if self.minimal {
            println!("Halted");
        } else {
            println!("\n{:>12}", "Halted".cyan());
        }
    }

    fn trace(&mut self, line: &str) {
        if self.minimal {
            eprintln!("{line}");
        } else {
            eprintln!("{}", line.blue());
        }
    }
}

/// Captures output in memory.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct Recorder {
    pub values: Vec<Word>,
    pub traces: Vec<String>,
    pub halted: bool,
}

impl Output for Recorder {
    fn print_value(&mut self, value: Word) {
        self.values.push(value);
    }

    fn halted(&mut self) {
        self.halted = true;
    }

    fn trace(&mut self, line: &str) {
        self.traces.push(line.to_string());
    }
}
