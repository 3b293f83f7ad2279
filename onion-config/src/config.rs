// Configuration record
//
// The shape of the node config as it is stored in the repo. Field names are
// serialized exactly as the on-disk JSON spells them.

use onion_keys::NodeIdentity;
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use std::fmt;

/// The complete node configuration produced on first run.
#[derive(Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "PascalCase")]
pub struct Config {
    pub identity: NodeIdentity,
    pub datastore: Datastore,
    pub addresses: Addresses,
    pub mounts: Mounts,
    pub discovery: Discovery,
    pub ipns: Ipns,
    pub bootstrap: Vec<String>,
    pub gateway: Gateway,
    pub reprovider: Reprovider,
    pub swarm: SwarmConfig,
    /// Onion fingerprint immediately followed by the base64 onion private key.
    pub onion_keys: String,
}

impl Config {
    /// Render the config the way the repo stores it.
    pub fn to_json_pretty(&self) -> serde_json::Result<String> {
        serde_json::to_string_pretty(self)
    }

    pub fn from_json(json: &str) -> serde_json::Result<Self> {
        serde_json::from_str(json)
    }
}

// OnionKeys carries a private key, so it is left out
impl fmt::Debug for Config {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Config")
            .field("identity", &self.identity)
            .field("datastore", &self.datastore)
            .field("addresses", &self.addresses)
            .field("mounts", &self.mounts)
            .field("discovery", &self.discovery)
            .field("ipns", &self.ipns)
            .field("bootstrap", &self.bootstrap)
            .field("gateway", &self.gateway)
            .field("reprovider", &self.reprovider)
            .field("swarm", &self.swarm)
            .finish_non_exhaustive()
    }
}

/* ------------------------------ Addresses -------------------------------- */

#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "PascalCase")]
pub struct Addresses {
    /// addresses the swarm listens on
    pub swarm: Vec<String>,
    pub announce: Vec<String>,
    pub no_announce: Vec<String>,
    #[serde(rename = "API")]
    pub api: String,
    pub gateway: String,
}

/* ------------------------------ Datastore -------------------------------- */

#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "PascalCase")]
pub struct Datastore {
    pub storage_max: String,
    /// Percentage of StorageMax at which garbage collection starts.
    #[serde(rename = "StorageGCWatermark")]
    pub storage_gc_watermark: u32,
    #[serde(rename = "GCPeriod")]
    pub gc_period: String,
    pub spec: DatastoreSpec,
    pub hash_on_read: bool,
    pub bloom_filter_size: u64,
}

/// Tree describing how datastore backends are composed.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "lowercase")]
pub enum DatastoreSpec {
    /// Routes keys to child datastores by prefix.
    Mount { mounts: Vec<MountSpec> },
    /// Metrics wrapper; `prefix` names the metrics it reports.
    Measure {
        prefix: String,
        child: Box<DatastoreSpec>,
    },
    Flatfs {
        path: String,
        sync: bool,
        #[serde(rename = "shardFunc")]
        shard_func: String,
    },
    Levelds { path: String, compression: String },
}

#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct MountSpec {
    pub mountpoint: String,
    #[serde(flatten)]
    pub spec: DatastoreSpec,
}

/* ------------------------------ Services --------------------------------- */

#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "PascalCase")]
pub struct Mounts {
    #[serde(rename = "IPFS")]
    pub ipfs: String,
    #[serde(rename = "IPNS")]
    pub ipns: String,
    pub fuse_allow_other: bool,
}

#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct Discovery {
    #[serde(rename = "MDNS")]
    pub mdns: Mdns,
}

#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "PascalCase")]
pub struct Mdns {
    pub enabled: bool,
    /// Seconds between local network announcements.
    pub interval: u32,
}

#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "PascalCase")]
pub struct Ipns {
    pub republish_period: String,
    pub record_lifetime: String,
    pub resolve_cache_size: u32,
}

#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "PascalCase")]
pub struct Gateway {
    #[serde(rename = "HTTPHeaders")]
    pub http_headers: BTreeMap<String, Vec<String>>,
    pub root_redirect: String,
    pub writable: bool,
    pub path_prefixes: Vec<String>,
}

#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "PascalCase")]
pub struct Reprovider {
    pub interval: String,
    pub strategy: String,
}

/* ------------------------------ Swarm ------------------------------------ */

#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct SwarmConfig {
    #[serde(rename = "ConnMgr")]
    pub conn_mgr: ConnMgr,
}

/// Connection manager thresholds. Once HighWater connections are open the
/// node trims down to LowWater, sparing connections younger than GracePeriod.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "PascalCase")]
pub struct ConnMgr {
    #[serde(rename = "Type")]
    pub kind: String,
    pub low_water: u32,
    pub high_water: u32,
    pub grace_period: String,
}
