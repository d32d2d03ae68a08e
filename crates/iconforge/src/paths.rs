use std::env;
use std::path::{Path, PathBuf};

use anyhow::{anyhow, Context, Result};
use directories_next::ProjectDirs;
use tracing::debug;

pub const ENV_CONFIG_DIR: &str = "ICONFORGE_CONFIG_DIR";
pub const MANIFEST_FILE: &str = "iconforge.toml";

const QUALIFIER: &str = "org";
const ORGANISATION: &str = "IconForge";
const APPLICATION: &str = "iconforge";

#[derive(Debug, Clone)]
pub struct AppPaths {
    config_dir: PathBuf,
    working_dir: PathBuf,
}

impl AppPaths {
    pub fn discover() -> Result<Self> {
        let config_dir = match env_override(ENV_CONFIG_DIR) {
            Some(dir) => dir,
            None => ProjectDirs::from(QUALIFIER, ORGANISATION, APPLICATION)
                .ok_or_else(|| anyhow!("failed to determine user directories"))?
                .config_dir()
                .to_path_buf(),
        };
        let working_dir = env::current_dir().context("failed to read current directory")?;
        Ok(Self {
            config_dir,
            working_dir,
        })
    }

    pub fn config_dir(&self) -> &Path {
        &self.config_dir
    }

    /// Picks the manifest: an explicit path (flag or `ICONFORGE_MANIFEST`),
    /// then `./iconforge.toml`, then `iconforge.toml` in the config directory.
    pub fn locate_manifest(&self, explicit: Option<&Path>) -> Result<PathBuf> {
        if let Some(path) = explicit {
            return Ok(self.working_dir.join(path));
        }

        let candidates = [
            self.working_dir.join(MANIFEST_FILE),
            self.config_dir.join(MANIFEST_FILE),
        ];
        for candidate in &candidates {
            if candidate.is_file() {
                debug!(path = %candidate.display(), "found asset manifest");
                return Ok(candidate.clone());
            }
        }

        Err(anyhow!(
            "no asset manifest found (looked for {} and {}); pass --manifest or set ICONFORGE_MANIFEST",
            candidates[0].display(),
            candidates[1].display()
        ))
    }

    /// Directory relative asset outputs land in: an explicit directory
    /// (flag or `ICONFORGE_OUT_DIR`), then the manifest's `out_dir` taken
    /// relative to the manifest, then the manifest's own directory.
    pub fn output_dir(
        &self,
        explicit: Option<&Path>,
        manifest_path: &Path,
        manifest_out_dir: Option<&Path>,
    ) -> PathBuf {
        if let Some(dir) = explicit {
            return self.working_dir.join(dir);
        }
        let manifest_dir = manifest_path
            .parent()
            .map(Path::to_path_buf)
            .unwrap_or_else(|| self.working_dir.clone());
        match manifest_out_dir {
            Some(dir) => manifest_dir.join(dir),
            None => manifest_dir,
        }
    }
}

fn env_override(name: &str) -> Option<PathBuf> {
    match env::var_os(name) {
        Some(value) if !value.is_empty() => Some(PathBuf::from(value)),
        _ => None,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::fs;
    use tempfile::TempDir;

    fn paths_in(root: &Path) -> AppPaths {
        AppPaths {
            config_dir: root.join("config"),
            working_dir: root.join("work"),
        }
    }

    #[test]
    fn explicit_manifest_is_taken_relative_to_working_dir() {
        let root = TempDir::new().unwrap();
        let paths = paths_in(root.path());
        let found = paths.locate_manifest(Some(Path::new("custom.toml"))).unwrap();
        assert_eq!(found, root.path().join("work/custom.toml"));
    }

    #[test]
    fn working_dir_manifest_wins_over_config_dir() {
        let root = TempDir::new().unwrap();
        let paths = paths_in(root.path());
        fs::create_dir_all(root.path().join("config")).unwrap();
        fs::write(root.path().join("config").join(MANIFEST_FILE), "").unwrap();
        assert_eq!(
            paths.locate_manifest(None).unwrap(),
            root.path().join("config").join(MANIFEST_FILE)
        );

        fs::create_dir_all(root.path().join("work")).unwrap();
        fs::write(root.path().join("work").join(MANIFEST_FILE), "").unwrap();
        assert_eq!(
            paths.locate_manifest(None).unwrap(),
            root.path().join("work").join(MANIFEST_FILE)
        );
    }

    #[test]
    fn missing_manifest_is_an_error() {
        let root = TempDir::new().unwrap();
        let err = paths_in(root.path()).locate_manifest(None).unwrap_err();
        assert!(err.to_string().contains("--manifest"));
    }

    #[test]
    fn output_dir_resolution_order() {
        let root = TempDir::new().unwrap();
        let paths = paths_in(root.path());
        let manifest = root.path().join("project/iconforge.toml");

        assert_eq!(
            paths.output_dir(Some(Path::new("out")), &manifest, Some(Path::new("assets"))),
            root.path().join("work/out")
        );
        assert_eq!(
            paths.output_dir(None, &manifest, Some(Path::new("assets"))),
            root.path().join("project/assets")
        );
        assert_eq!(
            paths.output_dir(None, &manifest, None),
            root.path().join("project")
        );
    }
}
