//! Question profiles
//!
//! A profile is a named prompt list. The bank ships `general` and
//! `engineering`; configuration may add profiles or replace built-ins.

use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};

/// Profile used when a role is missing or unknown
pub const DEFAULT_PROFILE: &str = "general";

const GENERAL: &[&str] = &[
    "Tell me about yourself.",
    "Describe a challenging project you worked on.",
    "How do you handle tight deadlines?",
    "What motivates you at work?",
    "Where do you see yourself in five years?",
];

const ENGINEERING: &[&str] = &[
    "Explain the SOLID principles.",
    "How do you ensure code quality in a large codebase?",
    "Describe a time you improved system performance.",
    "What is your approach to incident response?",
    "How do you mentor junior engineers?",
];

/// Named prompt lists keyed by lowercase profile name
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct QuestionBank {
    profiles: BTreeMap<String, Vec<String>>,
}

impl Default for QuestionBank {
    fn default() -> Self {
        Self::builtin()
    }
}

impl QuestionBank {
    /// The built-in `general` and `engineering` profiles
    pub fn builtin() -> Self {
        let mut profiles = BTreeMap::new();
        profiles.insert("general".to_string(), to_owned(GENERAL));
        profiles.insert("engineering".to_string(), to_owned(ENGINEERING));
        Self { profiles }
    }

    /// Overlay custom profiles; a custom profile replaces a built-in of the
    /// same name
    pub fn with_profiles(mut self, custom: BTreeMap<String, Vec<String>>) -> Self {
        for (name, prompts) in custom {
            self.profiles.insert(name.to_lowercase(), prompts);
        }
        self
    }

    /// Prompts for `profile`, falling back to the default profile when the
    /// name is unknown. May be empty if configuration defines it that way.
    pub fn resolve(&self, profile: Option<&str>) -> Vec<String> {
        let name = profile
            .map(|p| p.trim().to_lowercase())
            .filter(|p| !p.is_empty())
            .unwrap_or_else(|| DEFAULT_PROFILE.to_string());

        self.profiles
            .get(&name)
            .or_else(|| self.profiles.get(DEFAULT_PROFILE))
            .cloned()
            .unwrap_or_default()
    }

    /// Profile names in sorted order
    pub fn names(&self) -> Vec<&str> {
        self.profiles.keys().map(String::as_str).collect()
    }

    pub fn get(&self, profile: &str) -> Option<&[String]> {
        self.profiles.get(&profile.to_lowercase()).map(Vec::as_slice)
    }
}

fn to_owned(prompts: &[&str]) -> Vec<String> {
    prompts.iter().map(|p| p.to_string()).collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn builtin_has_two_profiles_of_five() {
        let bank = QuestionBank::builtin();
        assert_eq!(bank.names(), vec!["engineering", "general"]);
        assert_eq!(bank.resolve(Some("general")).len(), 5);
        assert_eq!(bank.resolve(Some("engineering")).len(), 5);
    }

    #[test]
    fn resolve_is_case_insensitive() {
        let bank = QuestionBank::builtin();
        assert_eq!(
            bank.resolve(Some("Engineering"))[0],
            "Explain the SOLID principles."
        );
    }

    #[test]
    fn unknown_or_missing_role_falls_back_to_general() {
        let bank = QuestionBank::builtin();
        assert_eq!(bank.resolve(Some("astronaut")), bank.resolve(Some("general")));
        assert_eq!(bank.resolve(None)[0], "Tell me about yourself.");
        assert_eq!(bank.resolve(Some("  ")), bank.resolve(None));
    }

    #[test]
    fn custom_profiles_overlay_builtins() {
        let mut custom = BTreeMap::new();
        custom.insert("Design".to_string(), vec!["Walk me through a redesign.".to_string()]);
        custom.insert("general".to_string(), vec!["Why us?".to_string()]);

        let bank = QuestionBank::builtin().with_profiles(custom);

        assert_eq!(bank.resolve(Some("design")), vec!["Walk me through a redesign."]);
        assert_eq!(bank.resolve(Some("general")), vec!["Why us?"]);
        assert_eq!(bank.resolve(Some("engineering")).len(), 5);
    }

    #[test]
    fn empty_custom_profile_resolves_empty() {
        let mut custom = BTreeMap::new();
        custom.insert("empty".to_string(), vec![]);
        let bank = QuestionBank::builtin().with_profiles(custom);
        assert!(bank.resolve(Some("empty")).is_empty());
    }

    #[test]
    fn deserializes_from_toml_table() {
        let toml = r#"
            sales = ["How do you handle objections?"]
        "#;
        let bank: QuestionBank = toml::from_str(toml).unwrap();
        assert_eq!(bank.get("sales").unwrap().len(), 1);
    }
}
