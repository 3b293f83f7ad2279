//! Onion Config
//!
//! Builds the default configuration of a node on first run: the node
//! identity, the onion rendezvous address and the static defaults for
//! addresses, storage, gateway, reprovider and connection manager.
//!
//! ```no_run
//! let config = onion_config::init(&mut std::io::stdout(), 2048)?;
//! println!("{}", config.identity.peer_id);
//! # Ok::<(), onion_keys::KeyError>(())
//! ```

pub mod assembler;
pub mod config;
pub mod defaults;
pub mod init;

pub use assembler::{assemble_default_config, onion_multiaddr};
pub use config::{
    Addresses, Config, ConnMgr, Datastore, DatastoreSpec, Discovery, Gateway, Ipns, Mdns,
    MountSpec, Mounts, Reprovider, SwarmConfig,
};
pub use defaults::{default_bootstrap_peers, default_datastore_config, ConfigDefaults};
pub use init::{init, init_with};
