use std::fs;
use std::io::ErrorKind;
use std::path::{Path, PathBuf};
use std::process::ExitCode;

use clap::error::ErrorKind as ClapErrorKind;
use clap::Parser;
use colored::Colorize;
use miette::{miette, Report, Severity};

use ls8::output::Terminal;
use ls8::{env, error, Machine};

/// Exit status for a wrong number of arguments or an unknown flag
const EXIT_USAGE: u8 = 1;
/// Exit status for a program image which does not exist
const EXIT_NOT_FOUND: u8 = 2;
/// Exit status for a program image which cannot be read or parsed
const EXIT_LOAD: u8 = 3;
/// Exit status for a program which failed while running
const EXIT_RUNTIME: u8 = 4;

/// ls8 runs binary program images for the LS-8, an 8-bit stack-and-register machine.
#[derive(Parser)]
#[command(version)]
struct Args {
    /// `.ls8` program image to run
    path: PathBuf,
    /// Print machine state to stderr before every instruction
    #[arg(short, long)]
    trace: bool,
    /// Print registers, pointers and flags once the program halts
    #[arg(short, long)]
    dump: bool,
    /// Produce minimal output, suited for blackbox tests
    #[arg(short, long)]
    minimal: bool,
}

/// Error to report, and the status to exit with.
struct Failure {
    status: u8,
    report: Report,
}

impl Failure {
    fn new(status: u8, report: Report) -> Self {
        Self { status, report }
    }
}

fn main() -> ExitCode {
    let args = match Args::try_parse() {
        Ok(args) => args,
        Err(e) => {
            let _ = e.print();
            return match e.kind() {
                ClapErrorKind::DisplayHelp | ClapErrorKind::DisplayVersion => ExitCode::SUCCESS,
                _ => ExitCode::from(EXIT_USAGE),
            };
        }
    };
    env::init();

    let _ = miette::set_hook(Box::new(|_| {
        Box::new(
            miette::MietteHandlerOpts::new() //
                .context_lines(ls8::DIAGNOSTIC_CONTEXT_LINES)
                .build(),
        )
    }));

    match run(&args) {
        Ok(()) => ExitCode::SUCCESS,
        Err(failure) => {
            eprintln!("{:?}", failure.report);
            ExitCode::from(failure.status)
        }
    }
}

fn run(args: &Args) -> Result<(), Failure> {
    let minimal = args.minimal || env::minimal();
    let say = |color, left: &str, right: &str| {
        if !minimal {
            message(color, left, right);
        }
    };

    say(MsgColor::Green, "Loading", &target(&args.path));
    let src = fs::read_to_string(&args.path).map_err(|e| {
        let status = match e.kind() {
            ErrorKind::NotFound => EXIT_NOT_FOUND,
            _ => EXIT_LOAD,
        };
        Failure::new(
            status,
            miette!(
                severity = Severity::Error,
                code = "load::io",
                "{}: {e}",
                args.path.display()
            ),
        )
    })?;

    let name = args.path.display().to_string();
    let image = ls8::parse_image(&name, &src).map_err(|report| Failure::new(EXIT_LOAD, report))?;
    let mut machine = Machine::new(&image)
        .map_err(|e| Failure::new(EXIT_LOAD, error::runtime(e, 0)))?;
    machine.set_trace(args.trace || env::trace());

    say(MsgColor::Green, "Running", &format!("{} bytes", image.len()));
    let mut out = Terminal::new(minimal);
    if let Err(e) = machine.run(&mut out) {
        say(MsgColor::Red, "Failed", &target(&args.path));
        return Err(Failure::new(EXIT_RUNTIME, error::runtime(e, machine.pc())));
    }

    if args.dump {
        print!("{}", machine.dump());
    }
    say(MsgColor::Green, "Completed", &target(&args.path));
    Ok(())
}

#[derive(Clone, Copy)]
enum MsgColor {
    Green,
    Red,
}

fn target(path: &Path) -> String {
    format!("target {}", path.display())
}

fn message(color: MsgColor, left: &str, right: &str) {
    let left = match color {
        MsgColor::Green => left.green(),
        MsgColor::Red => left.red(),
    };
    println!("{left:>12} {right}");
}
