mod format;

use anyhow::Result;
use cert_engine::numeric::pow10;
use cert_engine::{EvalMode, Evaluator, TraceLevel};
use rustyline::error::ReadlineError;
use rustyline::DefaultEditor;

use crate::format::format_sig_digits;

struct Session {
    digits: usize,
    mode: EvalMode,
}

impl Session {
    fn new() -> Self {
        Session {
            digits: 50,
            mode: EvalMode::Compute,
        }
    }

    fn handle_command(&mut self, cmd: &str) -> bool {
        let mut parts = cmd.split_whitespace();
        match parts.next() {
            Some("digits") => match parts.next().and_then(|s| s.parse::<usize>().ok()) {
                Some(n) if n > 0 => {
                    self.digits = n;
                    println!("significant digits set to {}", n);
                }
                _ => println!("usage: :digits N"),
            },
            Some("mode") => match parts.next() {
                Some("compute") => {
                    self.mode = EvalMode::Compute;
                    println!("mode set to compute");
                }
                Some("explain") => {
                    self.mode = EvalMode::Explain;
                    println!("mode set to explain");
                }
                _ => println!("usage: :mode compute|explain"),
            },
            Some("quit") | Some("q") => return false,
            _ => println!("commands: :digits N, :mode compute|explain, :quit"),
        }
        true
    }

    fn evaluate(&self, line: &str) {
        let expr = match cert_parser::parse(line) {
            Ok(expr) => expr,
            Err(e) => {
                println!("Error: {}", e);
                return;
            }
        };
        // A couple of guard digits so presentation rounding cannot eat
        // into the certified ones.
        let eps = pow10(-(self.digits as i64 + 2));
        let mut evaluator = Evaluator::with_mode(self.mode);
        match evaluator.evaluate(&expr, &eps) {
            Ok(value) => {
                println!("= {}", format_sig_digits(&value, self.digits));
                if self.mode == EvalMode::Explain {
                    for event in evaluator.trace_events() {
                        let tag = match event.level {
                            TraceLevel::Summary => "SUMMARY",
                            TraceLevel::Detail => "DETAIL",
                            TraceLevel::None => continue,
                        };
                        println!("  [{}] {}", tag, event.message);
                    }
                }
            }
            Err(e) => println!("Error: {}", e),
        }
    }
}

fn main() -> Result<()> {
    let mut rl = DefaultEditor::new()?;
    let mut session = Session::new();

    println!("certicalc — certified arbitrary-precision calculator");
    println!("every result y satisfies |y - exact| < 10^-(digits+2)");
    println!("commands: :digits N, :mode compute|explain, :quit");

    loop {
        match rl.readline("> ") {
            Ok(line) => {
                let line = line.trim();
                if line.is_empty() {
                    continue;
                }
                let _ = rl.add_history_entry(line);
                if let Some(cmd) = line.strip_prefix(':') {
                    if !session.handle_command(cmd) {
                        break;
                    }
                    continue;
                }
                session.evaluate(line);
            }
            Err(ReadlineError::Interrupted) | Err(ReadlineError::Eof) => break,
            Err(e) => return Err(e.into()),
        }
    }
    Ok(())
}
