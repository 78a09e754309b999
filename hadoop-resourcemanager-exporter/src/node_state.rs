//! YARN node states and their exported ordinals.

use std::fmt;
use std::str::FromStr;

use hadoop_exporter_common::Error;

/// State of a NodeManager as reported by the ResourceManager.
///
/// Exported as `hadoop_resourcemanager_node_state`:
///
/// | state          | value |
/// |----------------|-------|
/// | NEW            | 1     |
/// | RUNNING        | 2     |
/// | UNHEALTHY      | 3     |
/// | DECOMMISSIONED | 4     |
/// | LOST           | 5     |
/// | REBOOTED       | 6     |
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum NodeState {
    New,
    Running,
    Unhealthy,
    Decommissioned,
    Lost,
    Rebooted,
}

impl NodeState {
    pub const ALL: [NodeState; 6] = [
        NodeState::New,
        NodeState::Running,
        NodeState::Unhealthy,
        NodeState::Decommissioned,
        NodeState::Lost,
        NodeState::Rebooted,
    ];

    /// The exported gauge value.
    pub fn ordinal(&self) -> i64 {
        match self {
            NodeState::New => 1,
            NodeState::Running => 2,
            NodeState::Unhealthy => 3,
            NodeState::Decommissioned => 4,
            NodeState::Lost => 5,
            NodeState::Rebooted => 6,
        }
    }

    /// The upstream spelling.
    pub fn as_str(&self) -> &'static str {
        match self {
            NodeState::New => "NEW",
            NodeState::Running => "RUNNING",
            NodeState::Unhealthy => "UNHEALTHY",
            NodeState::Decommissioned => "DECOMMISSIONED",
            NodeState::Lost => "LOST",
            NodeState::Rebooted => "REBOOTED",
        }
    }
}

impl FromStr for NodeState {
    type Err = Error;

    /// Exact, case-sensitive match. Anything else is an error.
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        NodeState::ALL
            .into_iter()
            .find(|state| state.as_str() == s)
            .ok_or_else(|| Error::UnknownNodeState(s.to_string()))
    }
}

impl fmt::Display for NodeState {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}
