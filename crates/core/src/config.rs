use std::fmt;

use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct Version {
    pub major: u16,
    pub minor: u16,
    pub patch: u16,
}

impl Version {
    #[must_use]
    pub const fn new(major: u16, minor: u16, patch: u16) -> Self {
        Self {
            major,
            minor,
            patch,
        }
    }
}

impl fmt::Display for Version {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}.{}.{}", self.major, self.minor, self.patch)
    }
}

/// Server product behind a MySQL-protocol connection.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
pub enum Flavor {
    #[default]
    #[serde(rename = "mysql", alias = "MySQL")]
    Mysql,
    #[serde(rename = "mariadb", alias = "MariaDB")]
    MariaDb,
}

impl Flavor {
    #[must_use]
    pub const fn name(self) -> &'static str {
        match self {
            Self::Mysql => "MySQL",
            Self::MariaDb => "MariaDB",
        }
    }
}

impl fmt::Display for Flavor {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct GrammarConfig {
    pub database: String,
    pub prefix: String,
    pub server_version: String,
    pub flavor: Flavor,
}

impl GrammarConfig {
    #[must_use]
    pub fn new(database: impl Into<String>, prefix: impl Into<String>) -> Self {
        Self {
            database: database.into(),
            prefix: prefix.into(),
            ..Self::default()
        }
    }

    #[must_use]
    pub fn with_server_version(mut self, server_version: impl Into<String>, flavor: Flavor) -> Self {
        self.server_version = server_version.into();
        self.flavor = flavor;
        self
    }
}
