use std::fs;
use std::path::Path;

use tracing::warn;

/// Built-in class list, used when no roster file is configured.
const DEFAULT_STUDENTS: &[&str] = &[
    "Ahmad Fauzi",
    "Aisyah Putri",
    "Budi Santoso",
    "Dewi Lestari",
    "Fatimah Azzahra",
    "Hasan Basri",
    "Intan Permata",
    "Muhammad Rizki",
    "Nurul Hidayah",
    "Siti Rahma",
    "Umar Said",
    "Zainab Alya",
];

/// Fixed list of eligible student names. Order matters: it seeds the
/// leaderboard and breaks ties between equal totals.
#[derive(Debug, Clone)]
pub struct Roster {
    names: Vec<String>,
}

impl Roster {
    pub fn from_names<I, S>(names: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        Self {
            names: names.into_iter().map(Into::into).collect(),
        }
    }

    /// Load from a newline-separated file, falling back to the built-in
    /// list when the path is unset, unreadable, or empty.
    pub fn load(path: Option<&Path>) -> Self {
        let Some(path) = path else {
            return Self::built_in();
        };

        match fs::read_to_string(path) {
            Ok(contents) => {
                let names: Vec<String> = contents
                    .lines()
                    .map(str::trim)
                    .filter(|line| !line.is_empty())
                    .map(String::from)
                    .collect();
                if names.is_empty() {
                    warn!("roster file {} is empty, using built-in roster", path.display());
                    Self::built_in()
                } else {
                    Self { names }
                }
            }
            Err(err) => {
                warn!(
                    "failed to read roster file {}: {}, using built-in roster",
                    path.display(),
                    err
                );
                Self::built_in()
            }
        }
    }

    pub fn built_in() -> Self {
        Self::from_names(DEFAULT_STUDENTS.iter().copied())
    }

    pub fn names(&self) -> &[String] {
        &self.names
    }

    pub fn contains(&self, name: &str) -> bool {
        self.names.iter().any(|n| n == name)
    }

    pub fn len(&self) -> usize {
        self.names.len()
    }

    pub fn is_empty(&self) -> bool {
        self.names.is_empty()
    }
}
