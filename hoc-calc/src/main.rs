//! Command-line interface for hoc-calc.
//!
//! Evaluates expression strings (`-e` or bare arguments) and files (`-f`,
//! `-` meaning standard input) in command-line order against one
//! [`Calculator`], so a variable set by one argument is visible to the next.
//! Without any input arguments standard input is read until end of input.
//!
//! The exit status is the number of errors reported, saturated at 255.

use anyhow::{Context, Result};
use clap::{ArgAction, ArgMatches, CommandFactory, FromArgMatches, Parser as ClapParser};
use hoc_calc::{Calculator, Source};
use std::ffi::OsString;
use std::io::{self, Write};
use std::path::Path;
use std::process::ExitCode;

#[derive(ClapParser, Debug)]
#[command(
    name = "calc",
    version,
    about,
    disable_help_flag = true,
    disable_version_flag = true
)]
struct Args {
    /// Evaluate an expression string
    #[arg(short = 'e', value_name = "EXPR", allow_hyphen_values = true)]
    expr: Vec<String>,

    /// Evaluate a file ("-" reads standard input)
    #[arg(short = 'f', value_name = "FILE")]
    file: Vec<String>,

    /// Expression strings, evaluated like -e
    #[arg(value_name = "EXPR")]
    exprs: Vec<String>,

    /// Print the version and carry on
    #[arg(short = 'V', long = "version")]
    version: bool,

    /// Print help
    #[arg(short = 'h', long = "help", short_alias = '?', action = ArgAction::Help)]
    help: Option<bool>,
}

/// Arguments that are options rather than expressions.
const OPTIONS: [&str; 8] = ["-e", "-f", "-h", "-?", "--help", "-V", "--version", "--"];

/// Puts `-e` in front of bare arguments such as `-3+4` that start with a
/// hyphen but name no option, so they evaluate as expressions.
fn mark_expressions(args: impl IntoIterator<Item = OsString>) -> Vec<OsString> {
    let mut marked = Vec::new();
    let mut value_next = false;
    let mut positional_only = false;
    for (i, arg) in args.into_iter().enumerate() {
        if i == 0 || value_next || positional_only {
            value_next = false;
            marked.push(arg);
            continue;
        }
        match arg.to_str() {
            Some("-e" | "-f") => value_next = true,
            Some("--") => positional_only = true,
            Some(s) if s.len() > 1 && s.starts_with('-') && !OPTIONS.contains(&s) => {
                marked.push(OsString::from("-e"));
            }
            _ => {}
        }
        marked.push(arg);
    }
    marked
}

#[derive(Debug, PartialEq, Eq)]
enum Input {
    Text(String),
    File(String),
    Version,
}

/// Inputs in the order they appeared on the command line.
fn ordered_inputs(matches: &ArgMatches, args: Args) -> Vec<Input> {
    let indices = |id: &'static str| matches.indices_of(id).into_iter().flatten();
    let mut inputs: Vec<(usize, Input)> = Vec::new();
    inputs.extend(indices("expr").zip(args.expr.into_iter().map(Input::Text)));
    inputs.extend(indices("file").zip(args.file.into_iter().map(Input::File)));
    inputs.extend(indices("exprs").zip(args.exprs.into_iter().map(Input::Text)));
    if args.version {
        inputs.extend(indices("version").take(1).map(|i| (i, Input::Version)));
    }
    inputs.sort_by_key(|(index, _)| *index);
    inputs.into_iter().map(|(_, input)| input).collect()
}

fn prog_name() -> String {
    std::env::args_os()
        .next()
        .as_deref()
        .and_then(|arg0| Path::new(arg0).file_name())
        .map(|name| name.to_string_lossy().into_owned())
        .unwrap_or_else(|| "calc".to_owned())
}

/// Exit status for `errors` reported errors.
fn exit_status(errors: usize) -> u8 {
    u8::try_from(errors).unwrap_or(u8::MAX)
}

fn run_stdin(calc: &mut Calculator, out: &mut impl Write) -> Result<()> {
    let mut stdin = io::stdin().lock();
    calc.run(Source::borrowed(&mut stdin), out)?;
    Ok(())
}

/// Evaluates `inputs` in order, stopping at the first file that can't be opened.
fn run(calc: &mut Calculator, inputs: Vec<Input>, out: &mut impl Write) -> Result<()> {
    if inputs.is_empty() {
        return run_stdin(calc, out);
    }
    for input in inputs {
        log::debug!("input: {input:?}");
        match input {
            Input::Text(text) => calc.run(Source::text(text), out)?,
            Input::File(path) if path == "-" => run_stdin(calc, out)?,
            Input::File(path) => {
                let source =
                    Source::open(&path).with_context(|| format!("error opening '{path}'"))?;
                calc.run(source, out)?;
            }
            Input::Version => write!(out, "{}", Args::command().render_version())?,
        }
    }
    Ok(())
}

fn main() -> ExitCode {
    env_logger::init();

    let prog = prog_name();
    let matches = Args::command().get_matches_from(mark_expressions(std::env::args_os()));
    let args = match Args::from_arg_matches(&matches) {
        Ok(args) => args,
        Err(e) => e.exit(),
    };

    let mut calc = Calculator::new(&prog);
    let inputs = ordered_inputs(&matches, args);
    if let Err(e) = run(&mut calc, inputs, &mut io::stdout().lock()) {
        eprintln!("{prog}: {e:#}");
        return ExitCode::FAILURE;
    }
    let errors = calc.error_count();
    log::debug!("{errors} error(s)");
    ExitCode::from(exit_status(errors))
}

#[cfg(test)]
mod tests {
    use super::*;
    use hoc_calc::Session;

    fn inputs(argv: &[&str]) -> Vec<Input> {
        let argv = mark_expressions(argv.iter().map(OsString::from));
        let matches = Args::command().try_get_matches_from(argv).unwrap();
        let args = Args::from_arg_matches(&matches).unwrap();
        ordered_inputs(&matches, args)
    }

    fn text(s: &str) -> Input {
        Input::Text(s.to_owned())
    }

    fn silent() -> Calculator {
        Calculator::with_session(Session::silent("calc"))
    }

    #[test]
    fn inputs_keep_command_line_order() {
        let _ = env_logger::builder().is_test(true).try_init();
        assert_eq!(
            inputs(&["calc", "-e", "1", "-f", "a.calc", "2", "-e", "3", "4", "-f", "-"]),
            vec![
                text("1"),
                Input::File("a.calc".to_owned()),
                text("2"),
                text("3"),
                text("4"),
                Input::File("-".to_owned()),
            ]
        );
        assert!(inputs(&["calc"]).is_empty());
    }

    #[test]
    fn hyphen_led_expressions_are_not_options() {
        let _ = env_logger::builder().is_test(true).try_init();
        assert_eq!(
            inputs(&["calc", "-3+4", "x = 1", "-e", "-x", "--2", "-f", "-"]),
            vec![
                text("-3+4"),
                text("x = 1"),
                text("-x"),
                text("--2"),
                Input::File("-".to_owned())
            ]
        );
        assert_eq!(inputs(&["calc", "--", "-1"]), vec![text("-1")]);
    }

    #[test]
    fn version_prints_in_place_and_continues() {
        let _ = env_logger::builder().is_test(true).try_init();
        let order = inputs(&["calc", "-e", "1", "-V", "-e", "2"]);
        assert_eq!(order, vec![text("1"), Input::Version, text("2")]);

        let mut calc = silent();
        let mut out = Vec::new();
        run(&mut calc, order, &mut out).unwrap();
        let out = String::from_utf8(out).unwrap();
        assert!(out.starts_with("\t1\ncalc "));
        assert!(out.ends_with("\n\t2\n"));
    }

    #[test]
    fn bindings_carry_across_arguments() {
        let _ = env_logger::builder().is_test(true).try_init();
        let mut calc = silent();
        let mut out = Vec::new();
        run(&mut calc, inputs(&["calc", "r = 3", "-e", "r * 2", "-3+r"]), &mut out).unwrap();
        assert_eq!(out, b"\t6\n\t0\n");
        assert_eq!(calc.error_count(), 0);
    }

    #[test]
    fn unopenable_file_stops_before_later_inputs() {
        let _ = env_logger::builder().is_test(true).try_init();
        let mut calc = silent();
        let mut out = Vec::new();
        let order = vec![
            text("x = 1"),
            Input::File("/no/such/dir/input.calc".to_owned()),
            text("y = 2"),
        ];
        let err = run(&mut calc, order, &mut out).unwrap_err();
        let message = format!("{err:#}");
        assert!(message.starts_with("error opening '/no/such/dir/input.calc': "));
        assert_eq!(calc.session().value("x"), Some(1.0));
        assert_eq!(calc.session().value("y"), None);
        assert!(out.is_empty());
    }

    #[test]
    fn exit_status_saturates() {
        assert_eq!(exit_status(0), 0);
        assert_eq!(exit_status(3), 3);
        assert_eq!(exit_status(255), 255);
        assert_eq!(exit_status(256), 255);
        assert_eq!(exit_status(10_000), 255);
    }
}
