use std::fs;
use std::io::ErrorKind;
use std::path::Path;

use serde::Serialize;
use serde::de::DeserializeOwned;

use crate::error::Result;
use crate::models::{RecommendationStore, UserProfile};

/// Read a JSON document. A missing file is `Ok(None)`.
fn load_json<T: DeserializeOwned, P: AsRef<Path>>(path: P) -> Result<Option<T>> {
    let content = match fs::read_to_string(path.as_ref()) {
        Ok(content) => content,
        Err(e) if e.kind() == ErrorKind::NotFound => return Ok(None),
        Err(e) => return Err(e.into()),
    };
    if content.trim().is_empty() {
        return Ok(None);
    }
    Ok(Some(serde_json::from_str(&content)?))
}

fn save_json<T: Serialize, P: AsRef<Path>>(path: P, value: &T) -> Result<()> {
    let json = serde_json::to_string_pretty(value)?;
    fs::write(path, json)?;
    Ok(())
}

/// Delete a stored document. Returns whether a file was there.
fn remove_json<P: AsRef<Path>>(path: P) -> Result<bool> {
    match fs::remove_file(path.as_ref()) {
        Ok(()) => Ok(true),
        Err(e) if e.kind() == ErrorKind::NotFound => Ok(false),
        Err(e) => Err(e.into()),
    }
}

/// Load the stored user profile, if any.
pub fn load_profile<P: AsRef<Path>>(path: P) -> Result<Option<UserProfile>> {
    load_json(path)
}

pub fn save_profile<P: AsRef<Path>>(path: P, profile: &UserProfile) -> Result<()> {
    save_json(path, profile)
}

pub fn clear_profile<P: AsRef<Path>>(path: P) -> Result<bool> {
    remove_json(path)
}

/// Load cached recommendations. Day keys come back canonicalized.
pub fn load_recommendations<P: AsRef<Path>>(path: P) -> Result<Option<RecommendationStore>> {
    load_json(path)
}

pub fn save_recommendations<P: AsRef<Path>>(path: P, store: &RecommendationStore) -> Result<()> {
    save_json(path, store)
}

pub fn clear_recommendations<P: AsRef<Path>>(path: P) -> Result<bool> {
    remove_json(path)
}

/// Load recommendations, treating any failure as "nothing cached".
pub fn load_recommendations_or_none<P: AsRef<Path>>(path: P) -> Option<RecommendationStore> {
    match load_recommendations(path.as_ref()) {
        Ok(store) => store,
        Err(e) => {
            log::warn!(
                "ignoring unreadable recommendations at {}: {}",
                path.as_ref().display(),
                e
            );
            None
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::{Goal, MealType, PhysicalProfile};
    use std::io::Write;
    use tempfile::NamedTempFile;

    #[test]
    fn test_profile_roundtrip() {
        let profile = UserProfile {
            physical: PhysicalProfile {
                age: Some(41),
                weight_kg: Some(92.5),
                goal: Some(Goal::LoseWeight),
                ..Default::default()
            },
            allergies: vec!["fish".to_string()],
            dietary_preferences: vec!["keto".to_string()],
            hall: Some("Wiley".to_string()),
        };

        let file = NamedTempFile::new().unwrap();
        save_profile(file.path(), &profile).unwrap();
        let loaded = load_profile(file.path()).unwrap();
        assert_eq!(loaded, Some(profile));
    }

    #[test]
    fn test_missing_file_is_none() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("absent.json");
        assert!(load_profile(&path).unwrap().is_none());
        assert!(load_recommendations(&path).unwrap().is_none());
    }

    #[test]
    fn test_numeric_day_keys_canonicalized() {
        let json = r#"{"0.0": {"lunch": {"name": "Bowl", "calories": 320}}}"#;
        let mut file = NamedTempFile::new().unwrap();
        file.write_all(json.as_bytes()).unwrap();

        let store = load_recommendations(file.path()).unwrap().unwrap();
        let day = store.day(0).unwrap();
        assert_eq!(day.get(MealType::Lunch).title(), "Bowl");
    }

    #[test]
    fn test_corrupt_recommendations_degrade() {
        let mut file = NamedTempFile::new().unwrap();
        file.write_all(b"{ not json").unwrap();

        assert!(load_recommendations(file.path()).is_err());
        assert!(load_recommendations_or_none(file.path()).is_none());
    }

    #[test]
    fn test_clear_removes_saved_state() {
        let dir = tempfile::tempdir().unwrap();
        let profile_path = dir.path().join("profile.json");
        let recs_path = dir.path().join("recommendations.json");

        save_profile(&profile_path, &UserProfile::default()).unwrap();
        let mut store = RecommendationStore::new();
        store.insert(0, MealType::Lunch, crate::models::MealSlot::no_data());
        save_recommendations(&recs_path, &store).unwrap();

        assert!(clear_recommendations(&recs_path).unwrap());
        assert!(load_recommendations(&recs_path).unwrap().is_none());
        assert!(load_profile(&profile_path).unwrap().is_some());

        assert!(clear_profile(&profile_path).unwrap());
        assert!(load_profile(&profile_path).unwrap().is_none());
    }

    #[test]
    fn test_clear_missing_file_is_false() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("never-written.json");
        assert!(!clear_profile(&path).unwrap());
        assert!(!clear_recommendations(&path).unwrap());
    }
}
