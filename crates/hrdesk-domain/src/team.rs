//! Team-title visibility table.

use std::collections::{BTreeMap, BTreeSet};

use serde::{Deserialize, Serialize};

/// Maps a supervisory title to the set of member titles that lead may view.
///
/// Loaded from configuration so alternate org structures can be plugged in;
/// `Default` yields the front-end / back-end split used in production.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct TeamDirectory {
    leads: BTreeMap<String, BTreeSet<String>>,
}

impl Default for TeamDirectory {
    fn default() -> Self {
        Self::from_pairs([
            (
                "Frontend Lead",
                &["Frontend Lead", "Frontend Developer", "UI/UX"][..],
            ),
            ("Backend Lead", &["Backend Lead", "Backend Developer", "RA"][..]),
        ])
    }
}

impl TeamDirectory {
    pub fn from_pairs<'a, I>(pairs: I) -> Self
    where
        I: IntoIterator<Item = (&'a str, &'a [&'a str])>,
    {
        let leads = pairs
            .into_iter()
            .map(|(lead, members)| {
                let members = members.iter().map(|m| (*m).to_owned()).collect();
                (lead.to_owned(), members)
            })
            .collect();
        Self { leads }
    }

    /// Member titles visible to `lead_title`, if it is a recognized lead title.
    pub fn members_of(&self, lead_title: &str) -> Option<&BTreeSet<String>> {
        self.leads.get(lead_title)
    }

    /// Resolve what a caller may see. Admins see everyone; a recognized lead sees
    /// their team; anyone else sees nobody.
    pub fn visibility(&self, is_admin: bool, caller_title: Option<&str>) -> Visibility {
        if is_admin {
            return Visibility::All;
        }
        match caller_title.and_then(|t| self.members_of(t)) {
            Some(members) => Visibility::Titles(members.clone()),
            None => Visibility::Nothing,
        }
    }
}

/// The employee universe a caller is allowed to view.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Visibility {
    All,
    Titles(BTreeSet<String>),
    Nothing,
}

impl Visibility {
    pub fn allows(&self, employee_title: Option<&str>) -> bool {
        match self {
            Self::All => true,
            Self::Titles(titles) => employee_title.is_some_and(|t| titles.contains(t)),
            Self::Nothing => false,
        }
    }

    pub fn is_nothing(&self) -> bool {
        matches!(self, Self::Nothing)
    }
}
