use anyhow::Context;
use lec_config::LecternConfig;
use lec_core::ids;

use crate::cli::GlobalFlags;

pub fn load_config(flags: &GlobalFlags) -> anyhow::Result<LecternConfig> {
    let cwd = std::env::current_dir().context("failed to determine current directory")?;
    let env_path = cwd.join(".env");
    if env_path.exists() {
        dotenvy::from_path(&env_path)
            .with_context(|| format!("failed to load dotenv file at {}", env_path.display()))?;
    }

    match &flags.config {
        Some(path) => LecternConfig::load_from(path)
            .with_context(|| format!("failed to load config from {}", path.display())),
        None => LecternConfig::load().map_err(anyhow::Error::from),
    }
}

/// The chapter a command works on: the `--chapter` flag, else the
/// configured default. Placeholder values count as unset.
pub fn resolve_chapter(explicit: Option<&str>, config: &LecternConfig) -> Option<String> {
    explicit
        .or(config.general.default_chapter_id.as_deref())
        .map(str::trim)
        .filter(|chapter| !ids::is_placeholder(chapter))
        .map(str::to_string)
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    fn config_with_default(chapter: Option<&str>) -> LecternConfig {
        let mut config = LecternConfig::default();
        config.general.default_chapter_id = chapter.map(str::to_string);
        config
    }

    #[test]
    fn flag_wins_over_configured_default() {
        let config = config_with_default(Some("ch-default"));
        assert_eq!(resolve_chapter(Some("ch-1"), &config), Some("ch-1".into()));
        assert_eq!(resolve_chapter(None, &config), Some("ch-default".into()));
    }

    #[test]
    fn placeholder_chapter_is_unset() {
        assert_eq!(resolve_chapter(Some("undefined"), &config_with_default(None)), None);
        assert_eq!(resolve_chapter(None, &config_with_default(Some("  "))), None);
    }
}
