//! Seed Configuration
//!
//! The activity catalog is fixed at process start: either the built-in
//! Mergington High catalog or a YAML seed file passed on the command line.
//! A restart resets every roster to the seed state.

use crate::error::{Error, Result};
use crate::roster::Activity;
use indexmap::IndexMap;
use serde::{Deserialize, Serialize};
use std::path::Path;

/// One activity entry in a YAML seed file
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SeedActivity {
    pub name: String,
    pub description: String,
    pub schedule: String,
    pub max_participants: u32,
    #[serde(default)]
    pub participants: Vec<String>,
}

/// Load an activity catalog from a YAML seed file.
///
/// The file holds a list of [`SeedActivity`] entries; catalog order follows
/// file order.
pub fn load_seed_file(path: impl AsRef<Path>) -> Result<IndexMap<String, Activity>> {
    let raw = std::fs::read_to_string(path.as_ref())?;
    let entries: Vec<SeedActivity> = serde_yaml::from_str(&raw)?;
    build_catalog(entries)
}

/// Validate seed entries and build the catalog
pub fn build_catalog(entries: Vec<SeedActivity>) -> Result<IndexMap<String, Activity>> {
    if entries.is_empty() {
        return Err(Error::Configuration(
            "seed catalog must contain at least one activity".into(),
        ));
    }

    let mut catalog = IndexMap::with_capacity(entries.len());

    for entry in entries {
        if entry.name.trim().is_empty() {
            return Err(Error::Configuration(
                "activity name must not be empty".into(),
            ));
        }
        if entry.max_participants == 0 {
            return Err(Error::Configuration(format!(
                "activity {:?} must allow at least one participant",
                entry.name
            )));
        }
        if entry.participants.len() as u32 > entry.max_participants {
            return Err(Error::Configuration(format!(
                "activity {:?} seeds {} participants but allows only {}",
                entry.name,
                entry.participants.len(),
                entry.max_participants
            )));
        }
        for (i, email) in entry.participants.iter().enumerate() {
            if email.trim().is_empty() {
                return Err(Error::Configuration(format!(
                    "activity {:?} has an empty participant email",
                    entry.name
                )));
            }
            if entry.participants[..i].contains(email) {
                return Err(Error::Configuration(format!(
                    "activity {:?} seeds duplicate participant {:?}",
                    entry.name, email
                )));
            }
        }

        let activity = Activity {
            description: entry.description,
            schedule: entry.schedule,
            max_participants: entry.max_participants,
            participants: entry.participants,
        };

        if catalog.insert(entry.name.clone(), activity).is_some() {
            return Err(Error::Configuration(format!(
                "duplicate activity name {:?} in seed catalog",
                entry.name
            )));
        }
    }

    Ok(catalog)
}

/// The built-in Mergington High School activity catalog
pub fn default_catalog() -> IndexMap<String, Activity> {
    let mut catalog = IndexMap::new();

    catalog.insert(
        "Chess Club".to_string(),
        Activity::new(
            "Learn strategies and compete in chess tournaments",
            "Fridays, 3:30 PM - 5:00 PM",
            12,
        )
        .with_participants(["michael@mergington.edu", "daniel@mergington.edu"]),
    );
    catalog.insert(
        "Programming Class".to_string(),
        Activity::new(
            "Learn programming fundamentals and build software projects",
            "Tuesdays and Thursdays, 3:30 PM - 4:30 PM",
            20,
        )
        .with_participants(["emma@mergington.edu", "sophia@mergington.edu"]),
    );
    catalog.insert(
        "Gym Class".to_string(),
        Activity::new(
            "Physical education and sports activities",
            "Mondays, Wednesdays, Fridays, 2:00 PM - 3:00 PM",
            30,
        )
        .with_participants(["john@mergington.edu", "olivia@mergington.edu"]),
    );
    catalog.insert(
        "Soccer Team".to_string(),
        Activity::new(
            "Join the school soccer team and compete in matches",
            "Tuesdays and Thursdays, 4:00 PM - 5:30 PM",
            22,
        )
        .with_participants(["liam@mergington.edu", "noah@mergington.edu"]),
    );
    catalog.insert(
        "Basketball Club".to_string(),
        Activity::new(
            "Practice basketball skills and play friendly games",
            "Wednesdays, 4:00 PM - 5:30 PM",
            15,
        )
        .with_participants(["ava@mergington.edu", "mia@mergington.edu"]),
    );
    catalog.insert(
        "Art Club".to_string(),
        Activity::new(
            "Explore your creativity through painting and drawing",
            "Thursdays, 3:30 PM - 5:00 PM",
            15,
        )
        .with_participants(["amelia@mergington.edu", "harper@mergington.edu"]),
    );
    catalog.insert(
        "Drama Society".to_string(),
        Activity::new(
            "Act, direct, and produce plays and performances",
            "Mondays and Wednesdays, 4:00 PM - 5:30 PM",
            20,
        )
        .with_participants(["ella@mergington.edu", "scarlett@mergington.edu"]),
    );
    catalog.insert(
        "Math Olympiad".to_string(),
        Activity::new(
            "Solve challenging problems and prepare for math competitions",
            "Tuesdays, 3:30 PM - 4:30 PM",
            10,
        )
        .with_participants(["james@mergington.edu", "benjamin@mergington.edu"]),
    );
    catalog.insert(
        "Science Club".to_string(),
        Activity::new(
            "Explore scientific concepts through experiments and projects",
            "Wednesdays, 3:30 PM - 4:30 PM",
            15,
        )
        .with_participants(["isabella@mergington.edu", "charlotte@mergington.edu"]),
    );

    catalog
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;

    #[test]
    fn test_default_catalog() {
        let catalog = default_catalog();
        assert_eq!(catalog.len(), 9);

        let chess = &catalog["Chess Club"];
        assert_eq!(chess.max_participants, 12);
        assert_eq!(
            chess.participants,
            vec!["michael@mergington.edu", "daniel@mergington.edu"]
        );

        assert_eq!(catalog["Basketball Club"].max_participants, 15);

        // Every seeded roster starts within capacity
        for (name, activity) in &catalog {
            assert!(
                activity.participants.len() as u32 <= activity.max_participants,
                "{} over capacity",
                name
            );
        }
    }

    #[test]
    fn test_build_catalog_rejects_duplicate_name() {
        let entry = SeedActivity {
            name: "Chess Club".into(),
            description: "Chess".into(),
            schedule: "Fridays".into(),
            max_participants: 12,
            participants: vec![],
        };
        let result = build_catalog(vec![entry.clone(), entry]);
        assert!(matches!(result, Err(Error::Configuration(_))));
    }

    #[test]
    fn test_build_catalog_rejects_zero_capacity() {
        let entry = SeedActivity {
            name: "Chess Club".into(),
            description: "Chess".into(),
            schedule: "Fridays".into(),
            max_participants: 0,
            participants: vec![],
        };
        assert!(build_catalog(vec![entry]).is_err());
    }

    #[test]
    fn test_build_catalog_rejects_overfull_seed() {
        let entry = SeedActivity {
            name: "Chess Club".into(),
            description: "Chess".into(),
            schedule: "Fridays".into(),
            max_participants: 1,
            participants: vec!["a@mergington.edu".into(), "b@mergington.edu".into()],
        };
        assert!(build_catalog(vec![entry]).is_err());
    }

    #[test]
    fn test_build_catalog_rejects_duplicate_participant() {
        let entry = SeedActivity {
            name: "Chess Club".into(),
            description: "Chess".into(),
            schedule: "Fridays".into(),
            max_participants: 5,
            participants: vec!["a@mergington.edu".into(), "a@mergington.edu".into()],
        };
        assert!(build_catalog(vec![entry]).is_err());
    }

    #[test]
    fn test_load_seed_file() {
        let yaml = r#"
- name: Chess Club
  description: Learn chess
  schedule: Fridays, 3:30 PM - 5:00 PM
  max_participants: 12
  participants:
    - michael@mergington.edu
- name: Art Club
  description: Painting and drawing
  schedule: Thursdays, 3:30 PM - 5:00 PM
  max_participants: 15
"#;
        let mut file = tempfile::NamedTempFile::new().unwrap();
        file.write_all(yaml.as_bytes()).unwrap();

        let catalog = load_seed_file(file.path()).unwrap();
        assert_eq!(catalog.len(), 2);
        assert_eq!(
            catalog["Chess Club"].participants,
            vec!["michael@mergington.edu"]
        );
        assert!(catalog["Art Club"].participants.is_empty());
    }

    #[test]
    fn test_load_seed_file_missing() {
        assert!(load_seed_file("/nonexistent/seed.yaml").is_err());
    }
}
