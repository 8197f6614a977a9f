use ddlgram_core::{Flavor, Version};

/// First MySQL release with `alter table ... rename column`.
pub const MYSQL_RENAME_COLUMN_VERSION: Version = Version::new(8, 0, 3);
/// First MariaDB release with `alter table ... rename column`.
pub const MARIADB_RENAME_COLUMN_VERSION: Version = Version::new(10, 5, 2);

const MARIADB_MARKER: &str = "MariaDB";
const MARIADB_SUFFIX: &str = "-MariaDB";
const MARIADB_REPLICATION_PREFIX: &str = "5.5.5-";

/// Output of `SELECT VERSION()` split into the release and the server product.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ServerVersion {
    pub version: String,
    pub flavor: Flavor,
}

impl ServerVersion {
    #[must_use]
    pub fn detect(raw: &str) -> Self {
        let raw = raw.trim();
        if !raw.contains(MARIADB_MARKER) {
            return Self {
                version: raw.to_string(),
                flavor: Flavor::Mysql,
            };
        }

        let version = raw.strip_prefix(MARIADB_REPLICATION_PREFIX).unwrap_or(raw);
        let version = version
            .split_once(MARIADB_SUFFIX)
            .map_or(version, |(version, _)| version);

        Self {
            version: version.to_string(),
            flavor: Flavor::MariaDb,
        }
    }

    #[must_use]
    pub fn parsed(&self) -> Option<Version> {
        parse_server_version(&self.version)
    }
}

pub fn parse_server_version(raw: &str) -> Option<Version> {
    let mut parts = raw.split_whitespace().next()?.split('.');
    let major = parse_version_component(parts.next()?)?;
    let minor = parts.next().and_then(parse_version_component).unwrap_or(0);
    let patch = parts.next().and_then(parse_version_component).unwrap_or(0);

    Some(Version {
        major,
        minor,
        patch,
    })
}

/// Whether the server predates direct column renames.
pub(crate) fn requires_legacy_rename_column(version: Version, flavor: Flavor) -> bool {
    match flavor {
        Flavor::Mysql => version < MYSQL_RENAME_COLUMN_VERSION,
        Flavor::MariaDb => version < MARIADB_RENAME_COLUMN_VERSION,
    }
}

fn parse_version_component(raw: &str) -> Option<u16> {
    let digits = raw
        .chars()
        .take_while(|ch| ch.is_ascii_digit())
        .collect::<String>();
    if digits.is_empty() {
        return None;
    }
    digits.parse::<u16>().ok()
}
