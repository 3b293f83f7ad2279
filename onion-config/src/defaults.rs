// Default values for a freshly initialized node.

use crate::config::{Datastore, DatastoreSpec, MountSpec};
use std::time::Duration;

/// Connection count at which the connection manager starts trimming.
pub const DEFAULT_CONN_MGR_HIGH_WATER: u32 = 900;

/// Connection count the connection manager trims down to.
pub const DEFAULT_CONN_MGR_LOW_WATER: u32 = 600;

/// How long a new connection is protected from trimming.
pub const DEFAULT_CONN_MGR_GRACE_PERIOD: Duration = Duration::from_secs(20);

pub const DEFAULT_STORAGE_MAX: &str = "10GB";
pub const DEFAULT_STORAGE_GC_WATERMARK: u32 = 90;
pub const DEFAULT_GC_PERIOD: &str = "1h";

pub const DEFAULT_SWARM_PORT: u16 = 4001;
pub const DEFAULT_ONION_PORT: u16 = 4003;

/// Stock public bootstrap peers.
pub const DEFAULT_BOOTSTRAP_ADDRESSES: &[&str] = &[
    "/dnsaddr/bootstrap.libp2p.io/ipfs/QmNnooDu7bfjPFoTZYxMNLWUQJyrVwtbZg5gBMjTezGAJN",
    "/dnsaddr/bootstrap.libp2p.io/ipfs/QmQCU2EcMqAqQPR2i9bChDtGNJchTbq5TbXJJ16u19uLTa",
    "/dnsaddr/bootstrap.libp2p.io/ipfs/QmbLHAnMoJPWSCR5Zhtx6BHJX9KiKNN6tpvbUcqanj75Nb",
    "/dnsaddr/bootstrap.libp2p.io/ipfs/QmcZf59bWwK5XFi76CZX8cbJ4BhTzzA3gU1ZjYZcYW3dwt",
    "/ip4/104.131.131.82/tcp/4001/ipfs/QmaCpDMGvV2BGHeYERUEnRQAwe3N8SzbUtfsmvsqQLuvuJ",
    "/ip4/104.236.179.241/tcp/4001/ipfs/QmSoLPppuBtQSGwKDZT2M73ULpjvfd3aZ6ha4oFGL1KrGM",
    "/ip4/128.199.219.111/tcp/4001/ipfs/QmSoLSafTMBsPKadTEgaXctDQVcqN88CNLHXMkTNwMKPnu",
    "/ip4/104.236.76.40/tcp/4001/ipfs/QmSoLV4Bbm51jM9C4gDYZQ9Cy3U6aXMJDAbzgu2fzaDs64",
    "/ip4/178.62.158.247/tcp/4001/ipfs/QmSoLer265NRgSp2LA3dPaeykiS1J6DifTC88f5uVQKNAd",
    "/ip6/2604:a880:1:20::203:d001/tcp/4001/ipfs/QmSoLPppuBtQSGwKDZT2M73ULpjvfd3aZ6ha4oFGL1KrGM",
    "/ip6/2400:6180:0:d0::151:6001/tcp/4001/ipfs/QmSoLSafTMBsPKadTEgaXctDQVcqN88CNLHXMkTNwMKPnu",
    "/ip6/2604:a880:800:10::4a:5001/tcp/4001/ipfs/QmSoLV4Bbm51jM9C4gDYZQ9Cy3U6aXMJDAbzgu2fzaDs64",
    "/ip6/2a03:b0c0:0:1010::23:1001/tcp/4001/ipfs/QmSoLer265NRgSp2LA3dPaeykiS1J6DifTC88f5uVQKNAd",
];

/// Tunable defaults handed to the config assembler.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct ConfigDefaults {
    pub conn_mgr_low_water: u32,
    pub conn_mgr_high_water: u32,
    pub conn_mgr_grace_period: Duration,
    pub storage_max: String,
    pub storage_gc_watermark: u32,
    pub gc_period: String,
    pub swarm_port: u16,
    pub onion_port: u16,
}

impl Default for ConfigDefaults {
    fn default() -> Self {
        Self {
            conn_mgr_low_water: DEFAULT_CONN_MGR_LOW_WATER,
            conn_mgr_high_water: DEFAULT_CONN_MGR_HIGH_WATER,
            conn_mgr_grace_period: DEFAULT_CONN_MGR_GRACE_PERIOD,
            storage_max: DEFAULT_STORAGE_MAX.to_string(),
            storage_gc_watermark: DEFAULT_STORAGE_GC_WATERMARK,
            gc_period: DEFAULT_GC_PERIOD.to_string(),
            swarm_port: DEFAULT_SWARM_PORT,
            onion_port: DEFAULT_ONION_PORT,
        }
    }
}

impl ConfigDefaults {
    /// Set the connection manager low and high water marks
    pub fn with_conn_mgr_watermarks(mut self, low: u32, high: u32) -> Self {
        self.conn_mgr_low_water = low;
        self.conn_mgr_high_water = high;
        self
    }

    /// Set the connection manager grace period
    pub fn with_grace_period(mut self, grace_period: Duration) -> Self {
        self.conn_mgr_grace_period = grace_period;
        self
    }

    /// Set the storage ceiling, e.g. "10GB"
    pub fn with_storage_max(mut self, storage_max: impl Into<String>) -> Self {
        self.storage_max = storage_max.into();
        self
    }

    /// Set the GC watermark (percent) and sweep period
    pub fn with_gc(mut self, watermark: u32, period: impl Into<String>) -> Self {
        self.storage_gc_watermark = watermark;
        self.gc_period = period.into();
        self
    }

    pub fn with_swarm_port(mut self, port: u16) -> Self {
        self.swarm_port = port;
        self
    }

    pub fn with_onion_port(mut self, port: u16) -> Self {
        self.onion_port = port;
        self
    }
}

pub fn default_bootstrap_peers() -> Vec<String> {
    DEFAULT_BOOTSTRAP_ADDRESSES
        .iter()
        .map(|addr| addr.to_string())
        .collect()
}

/// Datastore with a measured flatfs block store mounted at `/blocks` and a
/// measured leveldb store for everything else.
pub fn default_datastore_config(defaults: &ConfigDefaults) -> Datastore {
    Datastore {
        storage_max: defaults.storage_max.clone(),
        storage_gc_watermark: defaults.storage_gc_watermark,
        gc_period: defaults.gc_period.clone(),
        spec: DatastoreSpec::Mount {
            mounts: vec![
                MountSpec {
                    mountpoint: "/blocks".to_string(),
                    spec: measured(
                        "flatfs.datastore",
                        DatastoreSpec::Flatfs {
                            path: "blocks".to_string(),
                            sync: true,
                            shard_func: "/repo/flatfs/shard/v1/next-to-last/2".to_string(),
                        },
                    ),
                },
                MountSpec {
                    mountpoint: "/".to_string(),
                    spec: measured(
                        "leveldb.datastore",
                        DatastoreSpec::Levelds {
                            path: "datastore".to_string(),
                            compression: "none".to_string(),
                        },
                    ),
                },
            ],
        },
        hash_on_read: false,
        bloom_filter_size: 0,
    }
}

fn measured(prefix: &str, child: DatastoreSpec) -> DatastoreSpec {
    DatastoreSpec::Measure {
        prefix: prefix.to_string(),
        child: Box::new(child),
    }
}

/// Render a duration the way the config file spells durations: "20s", "1h0m0s",
/// "1m30s", "1.5s", "250ms", "500µs", "250ns".
pub fn format_duration(duration: Duration) -> String {
    let secs = duration.as_secs();
    let nanos = u64::from(duration.subsec_nanos());

    if secs == 0 {
        return match nanos {
            0 => "0s".to_string(),
            1..=999 => format!("{nanos}ns"),
            1_000..=999_999 => with_fraction(nanos / 1_000, nanos % 1_000, 3, "µs"),
            _ => with_fraction(nanos / 1_000_000, nanos % 1_000_000, 6, "ms"),
        };
    }

    let hours = secs / 3600;
    let minutes = (secs % 3600) / 60;
    let seconds = secs % 60;

    let mut out = String::new();
    if hours > 0 {
        out.push_str(&format!("{hours}h"));
    }
    if hours > 0 || minutes > 0 {
        out.push_str(&format!("{minutes}m"));
    }
    out.push_str(&with_fraction(seconds, nanos, 9, "s"));
    out
}

// `whole` plus `fraction` out of 10^digits, trailing zeros trimmed
fn with_fraction(whole: u64, fraction: u64, digits: usize, unit: &str) -> String {
    if fraction == 0 {
        return format!("{whole}{unit}");
    }
    let fraction = format!("{fraction:0digits$}");
    format!("{whole}.{}{unit}", fraction.trim_end_matches('0'))
}
