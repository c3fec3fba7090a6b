use std::{
    fs::{self, File},
    io::{self, Write},
    path::{Path, PathBuf},
};

use chrono::Local;
use directories::ProjectDirs;
use serde::{Deserialize, Serialize};

use crate::{
    constants::{FALLBACK_COLOR, FILE_NAMES, TABLE_BACKUPS},
    domain::{Category, WeightConfig, color_to_hex, parse_hex_color},
    error::{AppError, ConfigError},
};

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct CategoryRecord {
    pub key: String,
    #[serde(default)]
    pub name: String,
    pub weight: f64,
    #[serde(default)]
    pub color: String,
}

impl CategoryRecord {
    fn into_category(self) -> Result<Category, ConfigError> {
        let color = if self.color.trim().is_empty() {
            FALLBACK_COLOR
        } else {
            parse_hex_color(&self.color).ok_or_else(|| ConfigError::InvalidColor {
                key: self.key.clone(),
                color: self.color.clone(),
            })?
        };
        let name = if self.name.trim().is_empty() {
            self.key.clone()
        } else {
            self.name
        };

        Ok(Category::new(self.key.trim(), &name, self.weight, color))
    }

    fn from_category(category: &Category) -> Self {
        Self {
            key: category.key.to_string(),
            name: category.name.clone(),
            weight: category.weight,
            color: color_to_hex(category.color),
        }
    }
}

fn project_dirs() -> Option<ProjectDirs> {
    ProjectDirs::from("com", "rankwheel", "rankwheel")
}

pub fn get_data_dir() -> PathBuf {
    if Path::new(".").join(FILE_NAMES.categories).exists() {
        return PathBuf::from(".");
    }

    if let Some(proj_dirs) = project_dirs() {
        let data_dir = proj_dirs.data_dir().to_path_buf();
        fs::create_dir_all(&data_dir).ok();
        data_dir
    } else {
        PathBuf::from(".")
    }
}

pub fn get_state_dir() -> PathBuf {
    if let Some(proj_dirs) = project_dirs() {
        let dir = proj_dirs
            .state_dir()
            .unwrap_or_else(|| proj_dirs.cache_dir())
            .to_path_buf();
        fs::create_dir_all(&dir).ok();
        return dir;
    }
    std::env::temp_dir()
}

pub fn get_categories_path() -> PathBuf {
    get_data_dir().join(FILE_NAMES.categories)
}

pub fn get_log_path() -> PathBuf {
    get_state_dir().join(FILE_NAMES.log)
}

/// A missing file means the built-in rank table.
pub fn load_weight_config(path: &Path) -> Result<WeightConfig, ConfigError> {
    if !path.exists() {
        log::info!(
            "{} not found, using built-in ranks",
            path.display()
        );
        return Ok(WeightConfig::default_ranks());
    }

    let content = fs::read_to_string(path).map_err(|source| ConfigError::Read {
        path: path.to_path_buf(),
        source,
    })?;

    let mut reader = csv::ReaderBuilder::new()
        .trim(csv::Trim::All)
        .from_reader(content.as_bytes());

    let mut categories = Vec::new();
    for record in reader.deserialize::<CategoryRecord>() {
        let record = record.map_err(|source| ConfigError::Csv {
            path: path.to_path_buf(),
            source,
        })?;
        categories.push(record.into_category()?);
    }

    let config = WeightConfig::new(categories)?;
    if config.is_empty() {
        log::warn!("{} has no categories", path.display());
    } else {
        log::info!("loaded {} categories from {}", config.len(), path.display());
    }
    Ok(config)
}

pub fn save_weight_config(path: &Path, config: &WeightConfig) -> Result<(), AppError> {
    let mut writer = csv::Writer::from_writer(Vec::new());
    for category in config.categories() {
        writer.serialize(CategoryRecord::from_category(category))?;
    }
    let bytes = writer.into_inner().map_err(|e| e.into_error())?;
    write_category_table(path, &bytes)?;
    log::info!(
        "saved {} categories to {}",
        config.len(),
        path.display()
    );
    Ok(())
}

/// Writes through a sibling temp file so a crash never leaves a half-written
/// table. The previous table is backed up first unless it is unchanged.
fn write_category_table(path: &Path, content: &[u8]) -> io::Result<()> {
    match fs::read(path) {
        Ok(existing) if existing == content => {
            log::debug!("{} unchanged, skipping backup", path.display());
        }
        Ok(_) => {
            let backup = backup_category_table(path)?;
            log::info!("backed up {} to {}", path.display(), backup.display());
        }
        Err(e) if e.kind() == io::ErrorKind::NotFound => {}
        Err(e) => return Err(e),
    }

    let file_name = path
        .file_name()
        .map(|name| name.to_string_lossy().into_owned())
        .unwrap_or_else(|| FILE_NAMES.categories.to_string());
    let tmp_path = path.with_file_name(format!(".{}.tmp", file_name));

    let mut tmp_file = File::create(&tmp_path)?;
    tmp_file.write_all(content)?;
    tmp_file.sync_all()?;
    fs::rename(&tmp_path, path)
}

fn backup_dir_for(path: &Path) -> PathBuf {
    path.parent()
        .unwrap_or(Path::new("."))
        .join(TABLE_BACKUPS.dir_name)
}

fn backup_prefix(path: &Path) -> String {
    let stem = path
        .file_stem()
        .map(|stem| stem.to_string_lossy().into_owned())
        .unwrap_or_else(|| "categories".to_string());
    format!("{}-", stem)
}

fn backup_category_table(path: &Path) -> io::Result<PathBuf> {
    let backup_dir = backup_dir_for(path);
    fs::create_dir_all(&backup_dir)?;

    let stamp = Local::now().format(TABLE_BACKUPS.stamp_format);
    let backup = backup_dir.join(format!("{}{}.csv", backup_prefix(path), stamp));
    fs::copy(path, &backup)?;

    prune_backups(&backup_dir, &backup_prefix(path), TABLE_BACKUPS.keep)?;
    Ok(backup)
}

/// Stamps sort lexically, so the oldest backups come first by name.
fn prune_backups(backup_dir: &Path, prefix: &str, keep: usize) -> io::Result<usize> {
    let mut backups: Vec<PathBuf> = fs::read_dir(backup_dir)?
        .filter_map(|entry| entry.ok())
        .map(|entry| entry.path())
        .filter(|path| {
            path.extension().is_some_and(|ext| ext == "csv")
                && path
                    .file_name()
                    .is_some_and(|name| name.to_string_lossy().starts_with(prefix))
        })
        .collect();
    backups.sort();

    let excess = backups.len().saturating_sub(keep);
    for stale in &backups[..excess] {
        fs::remove_file(stale)?;
        log::debug!("pruned backup {}", stale.display());
    }
    Ok(excess)
}
