use anyhow::{anyhow, Result};
use dotenv::dotenv;
use env_logger::Env;

use buscfg::{argsets, command};

const CMD_COMPILE: &str = "compile";
const CMD_CHECK: &str = "check";

const LOG_LEVEL_ENV_VAR: &str = "LOGGING_LEVEL";
const DEFAULT_LOG_LEVEL: &str = "INFO";

fn main() -> Result<()> {
    let _ = dotenv();
    env_logger::Builder::from_env(Env::default().filter_or(LOG_LEVEL_ENV_VAR, DEFAULT_LOG_LEVEL))
        .init();

    let mut args = pico_args::Arguments::from_env();
    match args.subcommand()?.as_deref() {
        Some(CMD_COMPILE) => command::compile(argsets::CompileArgs {
            output_dir: args.opt_value_from_str(["-o", "--output-dir"])?,
            input: args.free_from_str()?,
        }),
        Some(CMD_CHECK) => command::check(argsets::CheckArgs {
            input: args.free_from_str()?,
        }),
        _ => Err(anyhow!("Subcommand must be one of 'compile', 'check'")),
    }
}
