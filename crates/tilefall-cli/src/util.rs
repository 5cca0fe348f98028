use std::{
    fs::File,
    io::{self, BufReader, BufWriter, Write},
    path::Path,
};

use anyhow::Context;
use serde::{Serialize, de::DeserializeOwned};

/// Writes `value` as pretty-printed JSON to `path`, or to stdout if no path
/// is given.
pub fn save_json<T>(value: &T, path: Option<&Path>) -> anyhow::Result<()>
where
    T: Serialize + ?Sized,
{
    let (mut writer, target): (Box<dyn Write>, String) = match path {
        Some(path) => {
            let file = File::create(path)
                .with_context(|| format!("Failed to create report file: {}", path.display()))?;
            (Box::new(BufWriter::new(file)), path.display().to_string())
        }
        None => (Box::new(io::stdout().lock()), "stdout".to_owned()),
    };
    serde_json::to_writer_pretty(&mut writer, value)
        .with_context(|| format!("Failed to write report to {target}"))?;
    writeln!(writer)
        .and_then(|()| writer.flush())
        .with_context(|| format!("Failed to finish report on {target}"))?;
    Ok(())
}

/// Reads a JSON document of `kind` (used in error messages) from `path`.
pub fn read_json_file<T>(kind: &str, path: &Path) -> anyhow::Result<T>
where
    T: DeserializeOwned,
{
    let file = File::open(path)
        .with_context(|| format!("Failed to open {kind} file: {}", path.display()))?;
    serde_json::from_reader(BufReader::new(file))
        .with_context(|| format!("Failed to parse {kind} file: {}", path.display()))
}

#[cfg(test)]
mod tests {
    use std::{env, fs, process};

    use tilefall_engine::SessionConfig;

    use super::*;

    #[test]
    fn test_saved_config_reads_back() {
        let path = env::temp_dir().join(format!("tilefall-config-{}.json", process::id()));
        let config = SessionConfig {
            start_speed: 30,
            fast_speed: 2,
            speedup_score_step: 10,
        };

        save_json(&config, Some(path.as_path())).unwrap();
        let loaded: SessionConfig = read_json_file("session config", &path).unwrap();
        fs::remove_file(&path).unwrap();
        assert_eq!(loaded, config);
    }

    #[test]
    fn test_missing_file_names_kind_and_path() {
        let path = env::temp_dir().join("tilefall-missing/config.json");
        let err = read_json_file::<SessionConfig>("session config", &path).unwrap_err();
        let message = err.to_string();
        assert!(message.contains("session config"), "{message}");
        assert!(message.contains("config.json"), "{message}");
    }
}
