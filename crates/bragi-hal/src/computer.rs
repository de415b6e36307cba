//! Computer descriptors.

use serde::{Deserialize, Serialize};

/// A named execution target with a queue-time estimate.
///
/// Descriptors come from the `GET /computers` listing and are not cached:
/// each refresh replaces the previous list wholesale.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Computer {
    /// Unique computer name, used as the submission path segment.
    pub name: String,
    /// Estimated queue wait in seconds.
    pub queue_time: u64,
}

impl Computer {
    /// Create a new computer descriptor.
    pub fn new(name: impl Into<String>, queue_time: u64) -> Self {
        Self {
            name: name.into(),
            queue_time,
        }
    }
}

impl std::fmt::Display for Computer {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{} (queue ~{}s)", self.name, self.queue_time)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_wire_shape() {
        let json = r#"[{"name": "GladOs", "queue_time": 12}, {"name": "TARS", "queue_time": 0}]"#;
        let computers: Vec<Computer> = serde_json::from_str(json).unwrap();
        assert_eq!(computers.len(), 2);
        assert_eq!(computers[0].name, "GladOs");
        assert_eq!(computers[0].queue_time, 12);
    }
}
