//! Binary entrypoint for the simplify-expression refactoring plugin.

use std::io::{self, BufReader, Write};

use pruner_plugin::{run, telemetry};

fn main() {
    if let Err(error) = telemetry::initialise() {
        // Telemetry is best-effort; the protocol still works without it.
        writeln!(io::stderr().lock(), "{error}").ok();
    }

    let stdin = io::stdin();
    let mut reader = BufReader::new(stdin.lock());
    let stdout = io::stdout();
    let mut writer = stdout.lock();

    if let Err(error) = run(&mut reader, &mut writer) {
        writeln!(io::stderr().lock(), "{error}").ok();
        std::process::exit(1);
    }
}
