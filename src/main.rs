use std::{env, io, process};

use simply::repl::{self, Config, USAGE};

fn main() {
    let config = match Config::from_args(env::args().skip(1)) {
        Ok(config) => config,
        Err(argument) => {
            eprintln!("Unknown argument `{}`", argument);
            eprintln!("{}", USAGE);
            process::exit(2);
        }
    };

    let user = env::var("USER").unwrap_or_else(|_| String::from("there"));
    println!("Hello, {}! Welcome to the Simply programming language.", user);
    println!("Type in commands; end input (Ctrl-D) to quit.");

    let stdin = io::stdin();
    if let Err(error) = repl::start(stdin.lock(), io::stdout(), &config) {
        eprintln!("I/O error: {}", error);
        process::exit(1);
    }
}
