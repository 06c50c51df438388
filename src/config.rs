use anyhow::{Context, bail};
use serde::Deserialize;
use std::path::Path;

use crate::catalog::{MusicGroup, operations::MusicCatalog};

const SUPPORTED_VERSION: u32 = 1;

/// Catalog seed file: albums and songs to load at startup
#[derive(Debug, Deserialize)]
pub struct Config {
    pub version: u32,
    #[serde(default)]
    pub albums: Vec<AlbumEntry>,
    #[serde(default)]
    pub songs: Vec<SongEntry>,
}

#[derive(Debug, Deserialize, Clone)]
pub struct AlbumEntry {
    pub name: String,
    pub year: i32,
}

#[derive(Debug, Deserialize, Clone)]
pub struct SongEntry {
    pub name: String,
    pub album: Option<String>,
    pub duration: f64,
}

impl Config {
    pub fn load(path: &Path) -> anyhow::Result<Config> {
        let contents = std::fs::read_to_string(path)
            .with_context(|| format!("Failed to read catalog file {}", path.display()))?;
        Self::parse(&contents)
    }

    pub fn parse(contents: &str) -> anyhow::Result<Config> {
        let cfg: Config =
            toml::from_str(contents).with_context(|| "Failed to parse catalog TOML")?;
        if cfg.version != SUPPORTED_VERSION {
            bail!(
                "Unsupported catalog version {}, expected {SUPPORTED_VERSION}",
                cfg.version
            );
        }
        Ok(cfg)
    }

    /// Builds a catalog, adding all albums before any song
    pub fn into_catalog(self) -> anyhow::Result<MusicCatalog> {
        let mut catalog = MusicCatalog::new();

        for album in &self.albums {
            catalog.add_album(&album.name, album.year);
        }

        for song in &self.songs {
            catalog
                .add_song(&song.name, song.album.as_deref(), song.duration)
                .with_context(|| format!("Failed to add song {}", song.name))?;
        }

        Ok(catalog)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::catalog::error::CatalogError;
    use std::fs;
    use tempfile::tempdir;

    #[test]
    fn test_parse_config_toml() -> anyhow::Result<()> {
        let toml_str = r#"
version = 1

[[albums]]
name = "A"
year = 2000

[[songs]]
name = "s1"
album = "A"
duration = 3.0

[[songs]]
name = "s3"
duration = 1.0
"#;

        let cfg: Config = toml::from_str(toml_str)?;

        assert_eq!(cfg.version, 1);
        assert_eq!(cfg.albums.len(), 1);
        assert_eq!(cfg.albums[0].year, 2000);
        assert_eq!(cfg.songs[0].album.as_deref(), Some("A"));

        // missing album key means no album, not an empty name
        assert_eq!(cfg.songs[1].album, None);

        Ok(())
    }

    #[test]
    fn test_parse_empty_catalog() -> anyhow::Result<()> {
        let cfg: Config = toml::from_str("version = 1")?;

        assert!(cfg.albums.is_empty());
        assert!(cfg.songs.is_empty());

        let catalog = cfg.into_catalog()?;
        assert_eq!(catalog.song_count(), 0);

        Ok(())
    }

    #[test]
    fn test_load_builds_catalog() -> anyhow::Result<()> {
        let dir = tempdir()?;
        let path = dir.path().join("catalog.toml");

        // songs listed before albums still resolve
        fs::write(
            &path,
            r#"
version = 1

[[songs]]
name = "s2"
album = "A"
duration = 5.0

[[albums]]
name = "A"
year = 2000
"#,
        )?;

        let catalog = Config::load(&path)?.into_catalog()?;

        assert_eq!(catalog.count_songs("A"), 1);
        assert_eq!(catalog.album_year("A"), Some(2000));

        Ok(())
    }

    #[test]
    fn test_unknown_album_in_file_fails() -> anyhow::Result<()> {
        let cfg: Config = toml::from_str(
            r#"
version = 1

[[songs]]
name = "s"
album = "Unknown"
duration = 2.0
"#,
        )?;

        let err = cfg.into_catalog().unwrap_err();

        assert!(matches!(
            err.downcast_ref::<CatalogError>(),
            Some(CatalogError::InvalidReference { .. })
        ));

        Ok(())
    }

    #[test]
    fn test_unsupported_version_rejected() -> anyhow::Result<()> {
        let dir = tempdir()?;
        let path = dir.path().join("catalog.toml");
        fs::write(&path, "version = 2")?;

        let err = Config::load(&path).unwrap_err();

        assert!(err.to_string().contains("Unsupported catalog version 2"));
        assert!(Config::parse("version = 1").is_ok());

        Ok(())
    }

    #[test]
    fn test_load_missing_file_fails() {
        let dir = tempdir().unwrap();

        assert!(Config::load(&dir.path().join("nope.toml")).is_err());
    }
}
