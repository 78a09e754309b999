//! NameNode JMX beans.

use serde_json::Value;

use hadoop_exporter_common::{Error, RawRecord, Result};

/// Bean carrying aggregate health counters (newer layout).
pub const FS_NAMESYSTEM_STATE: &str = "Hadoop:service=NameNode,name=FSNamesystemState";
/// Bean carrying aggregate health counters.
pub const FS_NAMESYSTEM: &str = "Hadoop:service=NameNode,name=FSNamesystem";
/// Bean carrying the live and dead data-node maps.
pub const NAMENODE_INFO: &str = "Hadoop:service=NameNode,name=NameNodeInfo";

/// The bean types the exporter understands.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum BeanKind {
    FsNamesystemState,
    FsNamesystem,
    NameNodeInfo,
    /// Any other bean; ignored.
    Unrecognized,
}

impl BeanKind {
    /// Classify a bean by its `name`.
    pub fn from_name(name: &str) -> Self {
        match name {
            FS_NAMESYSTEM_STATE => BeanKind::FsNamesystemState,
            FS_NAMESYSTEM => BeanKind::FsNamesystem,
            NAMENODE_INFO => BeanKind::NameNodeInfo,
            _ => BeanKind::Unrecognized,
        }
    }
}

/// One element of the `beans` array.
#[derive(Debug, Clone, PartialEq)]
pub struct Bean {
    pub kind: BeanKind,
    pub record: RawRecord,
}

impl Bean {
    pub fn from_value(index: usize, value: Value) -> Result<Self> {
        let name = value
            .get("name")
            .and_then(Value::as_str)
            .map(str::to_string);

        let kind = name
            .as_deref()
            .map(BeanKind::from_name)
            .unwrap_or(BeanKind::Unrecognized);
        let context = name.unwrap_or_else(|| format!("beans[{}]", index));

        Ok(Self {
            kind,
            record: RawRecord::from_value(context, value)?,
        })
    }
}

/// Split a JMX response (`{"beans": [...]}`) into beans.
pub fn parse_beans(payload: Value) -> Result<Vec<Bean>> {
    let beans = match payload {
        Value::Object(mut object) => object.remove("beans"),
        _ => None,
    };

    match beans {
        Some(Value::Array(beans)) => beans
            .into_iter()
            .enumerate()
            .map(|(index, value)| Bean::from_value(index, value))
            .collect(),
        Some(_) => Err(Error::invalid("JMX response", "beans", "expected an array")),
        None => Err(Error::missing("JMX response", "beans")),
    }
}
