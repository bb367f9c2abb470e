use std::fs::File;
use std::io::{self, Read, Write};
use std::process;

use clap::{App, Arg};

use bf2c::{emit, fold, parse_program};

enum Action {
    Transpile,
    DumpIr,
}

struct Options {
    action: Action,
    output: Option<String>,
    input: String,
}

impl Options {
    fn match_options() -> Self {
        let matches = App::new("bf2c")
            .version("0.1.0")
            .about("Brainfuck to C transpiler")
            .arg(
                Arg::with_name("dump_ir")
                    .long("dump-ir")
                    .help("Dump the optimized tree instead of emitting C; for debugging"),
            )
            .arg(
                Arg::with_name("out_name")
                    .short("o")
                    .help("Output file name; - for stdout")
                    .takes_value(true)
                    .empty_values(false)
                    .value_name("file"),
            )
            .arg(
                Arg::with_name("FILENAME")
                    .help("Source file to compile; - for stdin")
                    .required(true)
                    .index(1),
            )
            .get_matches();

        let action = if matches.is_present("dump_ir") {
            Action::DumpIr
        } else {
            Action::Transpile
        };

        Options {
            action,
            output: matches.value_of("out_name").map(str::to_string),
            input: matches.value_of("FILENAME").unwrap().to_string(),
        }
    }

    fn get_output<'a>(&'a self, default: &'a str) -> &'a str {
        match self.output.as_ref() {
            Some(output) => output,
            None => default,
        }
    }
}

fn main() -> io::Result<()> {
    let options = Options::match_options();

    let mut code = Vec::new();
    if options.input == "-" {
        io::stdin().read_to_end(&mut code)?;
    } else {
        File::open(&options.input)?.read_to_end(&mut code)?;
    }

    let program = match parse_program(&code) {
        Ok(program) => program,
        Err(err) => {
            eprintln!("Parse error: {}", err);
            process::exit(1);
        }
    };
    let program = fold(program);

    let output = match options.action {
        Action::DumpIr => format!("{:#?}\n", program),
        Action::Transpile => emit(&program),
    };

    match options.get_output("-") {
        "-" => io::stdout().write_all(output.as_bytes())?,
        out_name => File::create(out_name)?.write_all(output.as_bytes())?,
    }
    Ok(())
}
