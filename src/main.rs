use std::io::{self, BufRead, Write};

use anyhow::Result;

use sysf::interpreter::Strategy;
use sysf::session::Session;

const BANNER: &str = r"
  ___ _   _ ___ _____ ___ _  _   ___
 / __| | | / __|_   _| __| \/ | | __|
 \__ \ |_| \__ \ | | | _||    | | _|
 |___/\__, |___/ |_| |___|_||_| |_|
      |___/   a System F interpreter
";

const HELP: &str = "\
commands:
  help                 show this help
  mode                 show the current evaluation mode
  mode <value|name|need>
                       switch the evaluation mode
  clear                clear the screen
  exit                 leave the interpreter

anything else is evaluated: let id = /\\a. \\x: a. x
";

fn main() -> Result<()> {
    println!("{BANNER}");
    println!("type 'help' for a list of commands\n");

    let mut session = Session::new();
    let stdin = io::stdin();
    let mut stdout = io::stdout();

    loop {
        write!(stdout, "sysf> ")?;
        stdout.flush()?;

        let mut line = String::new();
        if stdin.lock().read_line(&mut line)? == 0 {
            break;
        }
        let line = line.trim();

        match line {
            "" => {}
            "exit" => break,
            "help" => print!("{HELP}"),
            "clear" => {
                write!(stdout, "\x1b[2J\x1b[1;1H")?;
                stdout.flush()?;
            }
            "mode" => println!("mode: {}", session.strategy()),
            _ => {
                if let Some(mode) = line.strip_prefix("mode ") {
                    match mode.trim().parse::<Strategy>() {
                        Ok(strategy) => {
                            session.set_strategy(strategy);
                            println!("mode: {strategy}");
                        }
                        Err(message) => println!("Error: {message}"),
                    }
                    continue;
                }
                match session.eval_line(line) {
                    Ok(entry) => println!("{entry}"),
                    Err(err) => println!("Error: {err}"),
                }
            }
        }
    }

    Ok(())
}
