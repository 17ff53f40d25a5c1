//! Topic identity and station-name normalization.

/// Name and layout of a topic a producer writes to.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TopicSpec {
    name: String,
    partitions: i32,
    replicas: i32,
}

impl TopicSpec {
    pub(crate) fn new(name: String, partitions: i32, replicas: i32) -> Self {
        Self {
            name,
            partitions,
            replicas,
        }
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn partitions(&self) -> i32 {
        self.partitions
    }

    pub fn replicas(&self) -> i32 {
        self.replicas
    }
}

/// Turn a human-readable station name into a topic name.
///
/// Lowercases, replaces `/` with `_and_`, spaces and `-` with `_`, and drops
/// apostrophes. Applying it twice gives the same result as applying it once.
pub fn normalize_station_name(name: &str) -> String {
    let mut out = String::with_capacity(name.len());
    for c in name.chars() {
        match c {
            '/' => out.push_str("_and_"),
            ' ' | '-' => out.push('_'),
            '\'' => {}
            c => out.extend(c.to_lowercase()),
        }
    }
    out
}

#[cfg(test)]
mod tests {
    use super::*;

    const STATIONS: &[&str] = &[
        "Clark/Lake",
        "Harlem/Lake",
        "Addison-O'Hare",
        "O'Hare",
        "Washington/Wells",
        "Kedzie-Homan-Forest Park",
        "Chicago/State",
        "95th/Dan Ryan",
        "",
    ];

    #[test]
    fn test_normalize_known_stations() {
        assert_eq!(normalize_station_name("Clark/Lake"), "clark_and_lake");
        assert_eq!(normalize_station_name("Addison-O'Hare"), "addison_ohare");
        assert_eq!(
            normalize_station_name("Kedzie-Homan-Forest Park"),
            "kedzie_homan_forest_park"
        );
        assert_eq!(normalize_station_name("95th/Dan Ryan"), "95th_and_dan_ryan");
    }

    #[test]
    fn test_normalized_names_have_no_reserved_characters() {
        for station in STATIONS {
            let topic = normalize_station_name(station);
            assert!(
                !topic.contains(['/', ' ', '-', '\'']),
                "{station} -> {topic}"
            );
        }
    }

    #[test]
    fn test_normalize_is_idempotent() {
        for station in STATIONS {
            let once = normalize_station_name(station);
            assert_eq!(normalize_station_name(&once), once);
        }
    }

    #[test]
    fn test_empty_name_stays_empty() {
        assert_eq!(normalize_station_name(""), "");
    }
}
