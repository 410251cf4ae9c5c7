pub mod config;
pub mod identity;
pub mod join;
pub mod launcher;
pub mod render;

use std::process::ExitStatus;

use tracing::{error, info, warn};

use config::Config;
use identity::{
    resolve_gateway_id, sysfs::SysfsAddressProvider, HardwareAddressProvider, HardwareAddressSet,
};

use crate::errors::{StarterError, StarterErrorKind};

/// Starter prepares the multiplexer's configuration for this gateway and then runs the multiplexer.
pub struct Starter {
    pub config: Config,
    provider: Box<dyn HardwareAddressProvider>,
}

impl Starter {
    /// Creates a Starter that reads hardware addresses from sysfs.
    pub fn new(config: Config) -> Self {
        let provider = SysfsAddressProvider::new(
            &config.sysfs_net,
            &config.ethernet_interface,
            &config.wifi_interface,
        );

        Starter::with_provider(config, Box::new(provider))
    }

    pub fn with_provider(config: Config, provider: Box<dyn HardwareAddressProvider>) -> Self {
        Starter { config, provider }
    }

    /// Resolves the gateway identifier from the hardware addresses.
    ///
    /// An empty identifier is an error unless `allow_empty_gateway_id` is set, in which case the
    /// multiplexer is configured with an empty identifier.
    pub async fn resolve_identity(&self) -> Result<String, StarterError> {
        let mut addresses = HardwareAddressSet::new();
        self.provider.populate(&mut addresses).await;

        let gateway_id = resolve_gateway_id(&addresses);
        if gateway_id.is_empty() {
            if !self.config.allow_empty_gateway_id {
                error!("No hardware address available for the gateway identifier");

                return Err(StarterError::new(
                    StarterErrorKind::NoHardwareAddressAvailable,
                    format!(
                        "No hardware address found on {} or {}",
                        self.config.ethernet_interface, self.config.wifi_interface
                    ),
                ));
            }

            warn!("No hardware address available, using an empty gateway identifier");
        }

        info!(gateway_id = %gateway_id, "Gateway identifier resolved");

        Ok(gateway_id)
    }

    /// Resolves the identifier, loads the join config and renders the multiplexer's config file.
    /// Returns the gateway identifier written to the config.
    pub async fn prepare(&self) -> Result<String, StarterError> {
        let gateway_id = self.resolve_identity().await?;

        let join_config = join::load_join_config(&self.config.join_config_path).await?;

        render::render_config(
            self.config.template_path(),
            &self.config.config_path,
            &gateway_id,
            &join_config,
        )
        .await?;

        Ok(gateway_id)
    }

    /// Runs the multiplexer until it exits.
    pub async fn launch(&self) -> Result<ExitStatus, StarterError> {
        launcher::launch_multiplexer(&self.config.multiplexer, &self.config.multiplexer_args).await
    }
}
