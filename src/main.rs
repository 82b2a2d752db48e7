mod config;
mod error;
mod fetch;
mod ranges;
mod store;
mod tracker;

use std::io;
use std::process;

use env_logger::Env;
use log::debug;

use config::Config;
use error::TrackerError;
use fetch::MetaClient;
use store::FileStore;

fn main() {
    env_logger::Builder::from_env(Env::default().default_filter_or("warn")).init();

    let result = try_main();
    if let Err(err) = &result {
        eprintln!("Error: {}", err);
    }
    process::exit(exit_code(&result));
}

fn exit_code<T>(result: &Result<T, TrackerError>) -> i32 {
    match result {
        Ok(_) => 0,
        Err(_) => 1,
    }
}

fn try_main() -> Result<(), TrackerError> {
    let config = Config::from_env();
    debug!("using {:?}", config);

    let source = MetaClient::new(&config)?;
    let store = FileStore::new(&config.cache_path);

    let stdout = io::stdout();
    let outcome = tracker::run(&source, &store, &mut stdout.lock())?;
    debug!("finished: {:?}", outcome);

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::{Error as IoError, ErrorKind};
    use std::path::PathBuf;
    use crate::tracker::Outcome;

    #[test]
    fn success_exits_zero() {
        for outcome in &[Outcome::Initialized, Outcome::Unchanged, Outcome::Updated] {
            assert_eq!(exit_code(&Ok::<_, TrackerError>(*outcome)), 0);
        }
    }

    #[test]
    fn failures_exit_one() {
        let corrupt = serde_json::from_str::<serde_json::Value>("{").unwrap_err();
        let failures = vec![
            TrackerError::Network("Unable to reach GitHub API: connection refused".to_owned()),
            TrackerError::Format("GitHub API did not return any Actions IP ranges.".to_owned()),
            TrackerError::Corrupt {
                path: PathBuf::from("github_actions_ip_cache.json"),
                source: corrupt,
            },
            TrackerError::io(
                "github_actions_ip_cache.json",
                IoError::from(ErrorKind::PermissionDenied),
            ),
        ];

        for err in failures {
            assert_eq!(exit_code(&Err::<Outcome, _>(err)), 1);
        }
    }
}
