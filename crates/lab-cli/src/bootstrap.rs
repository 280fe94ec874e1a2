use anyhow::Context;

/// Read `.env` (if any) and load layered configuration.
pub fn load_config() -> anyhow::Result<lab_config::CodelabConfig> {
    match dotenvy::dotenv() {
        Ok(path) => tracing::debug!(path = %path.display(), "loaded dotenv file"),
        Err(error) if error.not_found() => {}
        Err(error) => return Err(error).context("failed to load .env"),
    }
    lab_config::CodelabConfig::load().context("failed to load codelab configuration")
}
