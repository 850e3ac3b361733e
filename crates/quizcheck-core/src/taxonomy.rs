//! # Taxonomy Module
//!
//! The fixed set of profiles a quiz is expected to assign.
//!
//! The reference taxonomy has 15 profiles. A quiz that only implements a
//! subset of them (the 4-profile draft, for instance) shows up as
//! missing profiles in the coverage analysis.

use crate::error::{QuizError, Result};
use crate::{Profile, ProfileName};
use serde::Serialize;
use std::collections::BTreeSet;

/// Reference profiles: (name, short description).
pub const REFERENCE_PROFILES: [(&str, &str); 15] = [
    ("Stratège", "Pense à long terme et planifie chaque coup"),
    ("Créatif", "Imagine des solutions originales"),
    ("Organisateur", "Structure les tâches et les ressources"),
    ("Communicant", "Crée du lien et transmet les idées"),
    ("Leader", "Fédère et entraîne les autres"),
    ("Collaboratif", "Avance en équipe et cherche le consensus"),
    ("Mentor", "Accompagne et fait grandir les autres"),
    ("Indépendant", "Travaille en autonomie et décide seul"),
    ("Entrepreneur", "Saisit les opportunités et prend des risques"),
    ("Réaliste", "Reste pragmatique et ancré dans les faits"),
    ("Visionnaire", "Anticipe les tendances et voit loin"),
    ("Méthodique", "Procède étape par étape avec rigueur"),
    ("Explorateur", "Cherche la nouveauté et la découverte"),
    ("Idéaliste", "Agit selon ses valeurs et ses convictions"),
    ("Perfectionniste", "Vise l'excellence dans chaque détail"),
];

/// Number of profiles in the reference taxonomy.
pub const REFERENCE_SIZE: usize = REFERENCE_PROFILES.len();

/// An ordered set of profiles with unique names.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Taxonomy {
    profiles: Vec<Profile>,
}

impl Taxonomy {
    /// Build a taxonomy, rejecting empty lists and duplicate names.
    pub fn new(profiles: Vec<Profile>) -> Result<Self> {
        if profiles.is_empty() {
            return Err(QuizError::EmptyTaxonomy);
        }
        let mut seen = BTreeSet::new();
        for profile in &profiles {
            if !seen.insert(&profile.name) {
                return Err(QuizError::DuplicateProfile(profile.name.clone()));
            }
        }
        Ok(Self { profiles })
    }

    /// The 15-profile reference taxonomy.
    #[must_use]
    pub fn reference() -> Self {
        let profiles = REFERENCE_PROFILES
            .iter()
            .map(|(name, description)| Profile {
                name: ProfileName(name.to_string()),
                description: (*description).to_string(),
            })
            .collect();
        Self { profiles }
    }

    /// Number of profiles.
    #[must_use]
    pub fn len(&self) -> usize {
        self.profiles.len()
    }

    /// Always false for a constructed taxonomy.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.profiles.is_empty()
    }

    /// Profiles in declaration order.
    pub fn profiles(&self) -> impl Iterator<Item = &Profile> {
        self.profiles.iter()
    }

    /// Profile names in declaration order.
    pub fn names(&self) -> impl Iterator<Item = &ProfileName> {
        self.profiles.iter().map(|p| &p.name)
    }

    /// Profile names as a sorted set.
    #[must_use]
    pub fn name_set(&self) -> BTreeSet<ProfileName> {
        self.names().cloned().collect()
    }

    #[must_use]
    pub fn contains(&self, name: &ProfileName) -> bool {
        self.profiles.iter().any(|p| &p.name == name)
    }

    #[must_use]
    pub fn get(&self, name: &ProfileName) -> Option<&Profile> {
        self.profiles.iter().find(|p| &p.name == name)
    }
}

impl Default for Taxonomy {
    fn default() -> Self {
        Self::reference()
    }
}

// =============================================================================
// TESTS
// =============================================================================
