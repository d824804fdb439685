//! Reading profiles and saved records

use anyhow::{bail, Context, Result};
use partnerfit_core::{ActorProfile, EcosystemValues, SavedAnalysis};
use serde::Deserialize;
use std::path::Path;

/// `{ "corp": ActorProfile, "startup": ActorProfile }`
#[derive(Debug, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct ProfilesInput {
    pub corp: ActorProfile,
    pub startup: ActorProfile,
}

/// A records file holds either one record or a list of them
#[derive(Debug, Deserialize)]
#[serde(untagged)]
enum RecordsInput {
    Many(Vec<SavedAnalysis>),
    One(Box<SavedAnalysis>),
}

pub fn read_profiles(path: &Path) -> Result<(ActorProfile, ActorProfile)> {
    let content = std::fs::read_to_string(path)
        .with_context(|| format!("reading profiles '{}'", path.display()))?;
    let input: ProfilesInput = serde_json::from_str(&content)
        .with_context(|| format!("parsing profiles '{}'", path.display()))?;
    Ok((input.corp, input.startup))
}

/// Build a profile from a name and a `speed=8,risk=2,...` list
pub fn profile_from_flags(name: &str, ratings: &str) -> Result<ActorProfile> {
    if name.trim().is_empty() {
        bail!("actor name must not be empty");
    }
    let values = EcosystemValues::parse(name, ratings)?;
    Ok(ActorProfile::new(name.trim(), values))
}

pub fn read_records(path: &Path) -> Result<Vec<SavedAnalysis>> {
    let content = std::fs::read_to_string(path)
        .with_context(|| format!("reading records '{}'", path.display()))?;
    parse_records(&content).with_context(|| format!("parsing records '{}'", path.display()))
}

fn parse_records(content: &str) -> Result<Vec<SavedAnalysis>> {
    let records = match serde_json::from_str::<RecordsInput>(content)? {
        RecordsInput::Many(records) => records,
        RecordsInput::One(record) => vec![*record],
    };
    Ok(records)
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;

    const RECORD: &str = r#"{
        "id": "6f1c2b9e-3d4a-4c5b-8e7f-1a2b3c4d5e6f",
        "createdAt": 1735689600000,
        "corpName": "Acme",
        "startupName": "Rocket",
        "score": 37,
        "riskLevel": "CRITICAL",
        "corpValues": { "speed": 8, "risk": 2, "cashflow": 9, "ip": 3 },
        "startupValues": { "speed": 3, "risk": 7, "cashflow": 2, "ip": 8 }
    }"#;

    #[test]
    fn test_profile_flags_parse() {
        let profile = profile_from_flags(" Acme ", "speed=8,risk=2,cashflow=9,ip=3").unwrap();
        assert_eq!(profile.name, "Acme");
        assert_eq!(profile.values, EcosystemValues::new(8, 2, 9, 3));
    }

    #[test]
    fn test_empty_name_rejected() {
        assert!(profile_from_flags("  ", "speed=8,risk=2,cashflow=9,ip=3").is_err());
    }

    #[test]
    fn test_incomplete_ratings_rejected() {
        let err = profile_from_flags("Acme", "speed=8,risk=2").unwrap_err();
        assert!(err.to_string().contains("cashflow"));
    }

    #[test]
    fn test_single_record_and_list_both_parse() {
        assert_eq!(parse_records(RECORD).unwrap().len(), 1);
        assert_eq!(parse_records(&format!("[{RECORD},{RECORD}]")).unwrap().len(), 2);
        assert!(parse_records("[]").unwrap().is_empty());
    }

    #[test]
    fn test_profiles_file() {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        write!(
            file,
            r#"{{
                "corp": {{ "name": "Acme", "values": {{ "speed": 8, "risk": 2, "cashflow": 9, "ip": 3 }} }},
                "startup": {{ "name": "Rocket", "values": {{ "speed": 3, "risk": 7, "cashflow": 2, "ip": 8 }} }}
            }}"#
        )
        .unwrap();

        let (corp, startup) = read_profiles(file.path()).unwrap();
        assert_eq!(corp.name, "Acme");
        assert_eq!(startup.values.cashflow, 2);
    }
}
