// SPDX-License-Identifier: MPL-2.0
use film_showcase::app::{self, paths, Flags};
use film_showcase::logging;
use film_showcase::ui::gallery::{Gallery, SERIES};
use std::process::ExitCode;

const USAGE: &str = "\
Usage: film_showcase [OPTIONS]

Options:
  --lang <bcp47>        Interface language (e.g. en-US, zh-CN)
  --assets-dir <dir>    Directory containing assets/
  --config-dir <dir>    Directory holding settings.toml
  --video <file>        Showreel to play instead of the configured one
  -h, --help            Print this help
";

fn parse_flags() -> Result<Option<Flags>, pico_args::Error> {
    let mut args = pico_args::Arguments::from_env();

    if args.contains(["-h", "--help"]) {
        return Ok(None);
    }

    let flags = Flags {
        lang: args.opt_value_from_str("--lang")?,
        assets_dir: args.opt_value_from_str("--assets-dir")?,
        config_dir: args.opt_value_from_str("--config-dir")?,
        video: args.opt_value_from_str("--video")?,
    };

    let rest = args.finish();
    if !rest.is_empty() {
        tracing::warn!(?rest, "ignoring unexpected arguments");
    }

    Ok(Some(flags))
}

fn main() -> ExitCode {
    logging::init();

    let flags = match parse_flags() {
        Ok(Some(flags)) => flags,
        Ok(None) => {
            print!("{USAGE}");
            return ExitCode::SUCCESS;
        }
        Err(err) => {
            eprintln!("error: {err}\n\n{USAGE}");
            return ExitCode::FAILURE;
        }
    };

    paths::init_cli_override(flags.config_dir.clone());

    let gallery = match Gallery::new(SERIES.to_vec()) {
        Ok(gallery) => gallery,
        Err(err) => {
            tracing::error!(%err, "cannot build the gallery");
            return ExitCode::FAILURE;
        }
    };

    match app::run(flags, gallery) {
        Ok(()) => ExitCode::SUCCESS,
        Err(err) => {
            tracing::error!(%err, "application exited with an error");
            ExitCode::FAILURE
        }
    }
}
