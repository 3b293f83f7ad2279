// Default config assembly
//
// Pure: every input has already been validated by the derivation steps, and
// nothing here generates keys, touches the network or fails.

use crate::config::{
    Addresses, Config, ConnMgr, Datastore, Discovery, Gateway, Ipns, Mdns, Mounts, Reprovider,
    SwarmConfig,
};
use crate::defaults::{format_duration, ConfigDefaults};
use onion_keys::{NodeIdentity, OnionAddress};
use std::collections::BTreeMap;

pub const DEFAULT_API_ADDRESS: &str = "/ip4/127.0.0.1/tcp/5001";
pub const DEFAULT_GATEWAY_ADDRESS: &str = "/ip4/127.0.0.1/tcp/8080";

/// Swarm multiaddr of an onion service.
pub fn onion_multiaddr(fingerprint: &str, port: u16) -> String {
    format!("/onion/{fingerprint}:{port}")
}

/// Combine the derived identity and onion address with the static defaults.
pub fn assemble_default_config(
    identity: NodeIdentity,
    onion: &OnionAddress,
    bootstrap: Vec<String>,
    datastore: Datastore,
    defaults: &ConfigDefaults,
) -> Config {
    Config {
        addresses: Addresses {
            swarm: vec![
                onion_multiaddr(&onion.fingerprint, defaults.onion_port),
                format!("/ip4/0.0.0.0/tcp/{}", defaults.swarm_port),
                format!("/ip6/::/tcp/{}", defaults.swarm_port),
            ],
            announce: Vec::new(),
            no_announce: Vec::new(),
            api: DEFAULT_API_ADDRESS.to_string(),
            gateway: DEFAULT_GATEWAY_ADDRESS.to_string(),
        },
        datastore,
        bootstrap,
        identity,
        // no delimiter: readers split on the fixed fingerprint length
        onion_keys: format!("{}{}", onion.fingerprint, onion.private_key),
        discovery: Discovery {
            mdns: Mdns {
                enabled: true,
                interval: 10,
            },
        },
        mounts: Mounts {
            ipfs: "/ipfs".to_string(),
            ipns: "/ipns".to_string(),
            fuse_allow_other: false,
        },
        ipns: Ipns {
            republish_period: String::new(),
            record_lifetime: String::new(),
            resolve_cache_size: 128,
        },
        gateway: Gateway {
            http_headers: default_gateway_headers(),
            root_redirect: String::new(),
            writable: false,
            path_prefixes: Vec::new(),
        },
        reprovider: Reprovider {
            interval: "12h".to_string(),
            strategy: "all".to_string(),
        },
        swarm: SwarmConfig {
            conn_mgr: ConnMgr {
                kind: "basic".to_string(),
                low_water: defaults.conn_mgr_low_water,
                high_water: defaults.conn_mgr_high_water,
                grace_period: format_duration(defaults.conn_mgr_grace_period),
            },
        },
    }
}

fn header(name: &str, values: &[&str]) -> (String, Vec<String>) {
    (
        name.to_string(),
        values.iter().map(|v| v.to_string()).collect(),
    )
}

fn default_gateway_headers() -> BTreeMap<String, Vec<String>> {
    BTreeMap::from([
        header("Access-Control-Allow-Origin", &["*"]),
        header("Access-Control-Allow-Methods", &["GET"]),
        header("Access-Control-Allow-Headers", &["X-Requested-With", "Range"]),
    ])
}
