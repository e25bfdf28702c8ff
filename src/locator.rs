use std::path::{Path, PathBuf};

use os_api::OS;
use walkdir::WalkDir;

use crate::errors::MedalLogError;
use crate::settings::Settings;

pub const LOG_FILE_NAME: &str = "medallog.txt";

/// Save folder below the (Windows) user profile. Each Steam account gets its
/// own subfolder holding a medallog.txt.
const SAVE_DIR: [&str; 4] = ["AppData", "LocalLow", "Little Flag Software, LLC", "Neon White"];

/// Steam app id of Neon White.
pub const NEON_WHITE_APP_ID: u32 = 1533420;

/// Picks the file to read: the explicit path, then `log_path` from the
/// settings, then the game's save folder.
pub fn resolve(explicit: Option<&Path>, settings: &Settings) -> Result<PathBuf, MedalLogError> {
    if let Some(path) = explicit {
        tracing::debug!(path = %path.display(), "using path from command line");
        return Ok(path.to_path_buf());
    }
    if let Some(path) = &settings.log_path {
        tracing::debug!(path = %path.display(), "using path from settings");
        return Ok(path.clone());
    }
    find_in_save_dir(&default_save_dir()?)
}

/// The game's save folder for the current user.
pub fn default_save_dir() -> Result<PathBuf, MedalLogError> {
    let profile = game_profile_dir().ok_or_else(|| MedalLogError::LogNotFound {
        searched: PathBuf::from(SAVE_DIR.join("/")),
        reason: "the user profile directory is unknown".into(),
    })?;
    Ok(save_dir_in(&profile))
}

/// Save folder below a given game profile directory.
pub fn save_dir_in(profile: &Path) -> PathBuf {
    SAVE_DIR.iter().fold(profile.to_path_buf(), |p, part| p.join(part))
}

fn game_profile_dir() -> Option<PathBuf> {
    OS::user_profile_dir().map(|home| game_profile_in(&home))
}

#[cfg(target_os = "windows")]
fn game_profile_in(home: &Path) -> PathBuf {
    home.to_path_buf()
}

// On Linux the game runs under Proton, inside its own Wine prefix.
#[cfg(not(target_os = "windows"))]
fn game_profile_in(home: &Path) -> PathBuf {
    home.join(".steam/steam/steamapps/compatdata")
        .join(NEON_WHITE_APP_ID.to_string())
        .join("pfx/drive_c/users/steamuser")
}

/// Finds `<save_dir>/<account>/medallog.txt`.
///
/// Hidden account folders are skipped. With several accounts the first in
/// path order wins and a warning names it.
pub fn find_in_save_dir(save_dir: &Path) -> Result<PathBuf, MedalLogError> {
    if !save_dir.is_dir() {
        return Err(MedalLogError::LogNotFound {
            searched: save_dir.to_path_buf(),
            reason: "the folder does not exist".into(),
        });
    }

    let matches: Vec<PathBuf> = WalkDir::new(save_dir)
        .min_depth(2)
        .max_depth(2)
        .follow_links(true)
        .sort_by_file_name()
        .into_iter()
        .filter_map(Result::ok)
        .filter(|entry| entry.file_type().is_file() && entry.file_name() == LOG_FILE_NAME)
        .filter(|entry| {
            !entry
                .path()
                .parent()
                .and_then(Path::file_name)
                .and_then(|n| n.to_str())
                .is_some_and(|n| n.starts_with('.'))
        })
        .map(|entry| entry.into_path())
        .collect();

    match matches.as_slice() {
        [] => Err(MedalLogError::LogNotFound {
            searched: save_dir.to_path_buf(),
            reason: format!("no account folder contains {LOG_FILE_NAME}"),
        }),
        [only] => Ok(only.clone()),
        [first, ..] => {
            tracing::warn!(
                count = matches.len(),
                chosen = %first.display(),
                "several {LOG_FILE_NAME} files found, pass a path to pick another"
            );
            Ok(first.clone())
        }
    }
}
