use fidy::cli::{Args, run};
use fidy::config::{ConfigStore, JsonConfigStore, MemoryConfigStore};
use fidy::output::{ConsoleReporter, OutputFormatter};
use std::env;
use std::process::ExitCode;

fn main() -> ExitCode {
    let args = match Args::try_parse_normalized(env::args_os()) {
        Ok(args) => args,
        Err(e) => e.exit(),
    };

    // Without a home directory the name only lives for this run.
    let store: Box<dyn ConfigStore> = match JsonConfigStore::at_default_location() {
        Ok(store) => Box::new(store),
        Err(e) => {
            OutputFormatter::warning(&format!("Error locating config: {}", e));
            Box::new(MemoryConfigStore::default())
        }
    };

    match run(&args, store.as_ref(), &mut ConsoleReporter) {
        Ok(_) => ExitCode::SUCCESS,
        Err(e) => {
            OutputFormatter::error(&e.to_string());
            ExitCode::from(e.exit_code())
        }
    }
}
