use serde::{Deserialize, Serialize};

use crate::harness::Measured;
use crate::workloads::ResultValue;

pub const SCHEMA_VERSION: u32 = 1;

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RunMeta {
    pub schema_version: u32,
    pub harness_version: String,
    pub impl_name: String,
    pub seed: u64,
    pub timestamp_utc: String,
    pub git_sha: Option<String>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Measurement {
    pub name: String,
    pub unit: String,
    pub size: u64,

    pub iters: u64,
    pub warmup_iters: u64,

    pub total_ns: u64,
    pub ns_per_iter: u64,

    pub result: Option<serde_json::Value>,
    pub checksum: Option<u64>,

    pub extra: serde_json::Value,
}

impl Measurement {
    pub fn from_measured(name: &str, size: u64, m: &Measured) -> Self {
        let mut extra = serde_json::Map::new();
        if let Some((first, last)) = m.result.bounds {
            extra.insert("first".into(), first.into());
            extra.insert("last".into(), last.into());
        }
        if let Some(sum) = m.result.sum {
            extra.insert("sum".into(), sum.into());
        }
        extra.insert("guard".into(), m.guard.into());

        Self {
            name: name.to_string(),
            unit: "ns/iter".to_string(),
            size,
            iters: m.iters,
            warmup_iters: m.warmup_iters,
            total_ns: m.total_ns,
            ns_per_iter: m.ns_per_iter,
            result: m.result.value.map(|v| match v {
                ResultValue::Int(i) => serde_json::Value::from(i),
                ResultValue::Float(f) => serde_json::Value::from(f),
            }),
            checksum: m.result.checksum,
            extra: serde_json::Value::Object(extra),
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct BenchReport {
    pub run: RunMeta,
    pub measurements: Vec<Measurement>,
}
