use std::path::{Path, PathBuf};

/// CONFIG_FILE is the multiplexer's configuration file. It is both the template source and the
/// rendered output unless a separate template is given.
pub const CONFIG_FILE: &str =
    "/etc/chirpstack-packet-multiplexer/chirpstack-packet-multiplexer.toml";

/// JOIN_CONFIG_FILE is the optional network-join settings document.
pub const JOIN_CONFIG_FILE: &str = "/etc/chirpstack-packet-multiplexer/ttn_config.json";

/// MULTIPLEXER_BIN is resolved against the working directory, as the gateway image ships the
/// binary next to the shim.
pub const MULTIPLEXER_BIN: &str = "./chirpstack-packet-multiplexer";

pub const SYSFS_NET: &str = "/sys/class/net";
pub const ETHERNET_INTERFACE: &str = "eth0";
pub const WIFI_INTERFACE: &str = "wlan0";

#[derive(Debug, Clone)]
pub struct Config {
    pub config_path: PathBuf,
    /// Template source. `None` means render the config file in place.
    pub template_path: Option<PathBuf>,
    pub join_config_path: PathBuf,
    pub multiplexer: PathBuf,
    pub multiplexer_args: Vec<String>,
    pub sysfs_net: PathBuf,
    pub ethernet_interface: String,
    pub wifi_interface: String,
    pub allow_empty_gateway_id: bool,
}

impl Config {
    pub fn template_path(&self) -> &Path {
        self.template_path.as_deref().unwrap_or(&self.config_path)
    }
}

impl Default for Config {
    fn default() -> Self {
        Config {
            config_path: PathBuf::from(CONFIG_FILE),
            template_path: None,
            join_config_path: PathBuf::from(JOIN_CONFIG_FILE),
            multiplexer: PathBuf::from(MULTIPLEXER_BIN),
            multiplexer_args: Vec::new(),
            sysfs_net: PathBuf::from(SYSFS_NET),
            ethernet_interface: ETHERNET_INTERFACE.to_string(),
            wifi_interface: WIFI_INTERFACE.to_string(),
            allow_empty_gateway_id: false,
        }
    }
}
