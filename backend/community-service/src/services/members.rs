//! Member roster
//!
//! The roster is static site data: a JSON array of members loaded once at
//! start-up. Attendance registration only accepts names found here.

use crate::models::{Member, MemberCategory};
use anyhow::Context;
use std::collections::HashSet;
use std::path::Path;

const BUILTIN_ROSTER: &str = include_str!("../../data/members.json");

/// Members of one category, in roster order
#[derive(Debug, Clone)]
pub struct MemberGroup<'a> {
    pub category: MemberCategory,
    pub members: Vec<&'a Member>,
}

#[derive(Debug, Clone)]
pub struct MemberDirectory {
    members: Vec<Member>,
    names: HashSet<String>,
}

impl MemberDirectory {
    pub fn new(members: Vec<Member>) -> Self {
        let names = members.iter().map(|m| m.name.trim().to_string()).collect();
        Self { members, names }
    }

    /// Roster shipped with the binary
    pub fn builtin() -> anyhow::Result<Self> {
        Self::parse(BUILTIN_ROSTER).context("Built-in member roster is malformed")
    }

    /// Roster from `path`, or the built-in one when no path is configured
    pub fn load(path: Option<&Path>) -> anyhow::Result<Self> {
        let Some(path) = path else {
            return Self::builtin();
        };

        let raw = std::fs::read_to_string(path)
            .with_context(|| format!("Failed to read member roster {}", path.display()))?;
        let directory = Self::parse(&raw)
            .with_context(|| format!("Failed to parse member roster {}", path.display()))?;

        tracing::info!(path = %path.display(), members = directory.len(), "Loaded member roster");
        Ok(directory)
    }

    fn parse(raw: &str) -> anyhow::Result<Self> {
        let members: Vec<Member> = serde_json::from_str(raw)?;
        Ok(Self::new(members))
    }

    pub fn contains(&self, name: &str) -> bool {
        self.names.contains(name.trim())
    }

    pub fn members(&self) -> &[Member] {
        &self.members
    }

    pub fn len(&self) -> usize {
        self.members.len()
    }

    pub fn is_empty(&self) -> bool {
        self.members.is_empty()
    }

    /// Members grouped in display order; empty groups are left out
    pub fn grouped(&self) -> Vec<MemberGroup<'_>> {
        MemberCategory::ALL
            .iter()
            .map(|&category| MemberGroup {
                category,
                members: self
                    .members
                    .iter()
                    .filter(|m| m.category == category)
                    .collect(),
            })
            .filter(|group| !group.members.is_empty())
            .collect()
    }
}
