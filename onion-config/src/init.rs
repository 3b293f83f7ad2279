// First-run initialization entry point

use crate::assembler::assemble_default_config;
use crate::config::Config;
use crate::defaults::{default_bootstrap_peers, default_datastore_config, ConfigDefaults};
use onion_common::{Component, Logger};
use onion_keys::{derive_identity, derive_onion_address, KeypairGenerator, OsRngGenerator, Result};
use std::io::Write;

/// Initialize a new node config with a `bits`-bit identity key, the stock
/// bootstrap peers and the default datastore.
///
/// Progress lines go to `out`; nothing is persisted.
pub fn init(out: &mut dyn Write, bits: usize) -> Result<Config> {
    let defaults = ConfigDefaults::default();
    init_with(
        &OsRngGenerator,
        out,
        bits,
        default_bootstrap_peers(),
        &defaults,
    )
}

/// Same as [`init`] with an explicit key generator, bootstrap list and defaults.
///
/// Either both key derivations succeed and a complete config is returned, or
/// the first error is returned and no config exists.
pub fn init_with<G>(
    generator: &G,
    out: &mut dyn Write,
    bits: usize,
    bootstrap: Vec<String>,
    defaults: &ConfigDefaults,
) -> Result<Config>
where
    G: KeypairGenerator + ?Sized,
{
    let identity = derive_identity(generator, out, bits)?;
    let onion = derive_onion_address(generator)?;

    let logger = Logger::new_root(Component::Init, &identity.peer_id);
    let datastore = default_datastore_config(defaults);
    let config = assemble_default_config(identity, &onion, bootstrap, datastore, defaults);

    logger
        .with_component(Component::Config)
        .info_args(format_args!(
            "assembled default config with {} swarm addresses and {} bootstrap peers",
            config.addresses.swarm.len(),
            config.bootstrap.len()
        ));
    Ok(config)
}
