use std::path::PathBuf;

use async_trait::async_trait;

use tracing::{debug, warn};

use super::{HardwareAddressProvider, HardwareAddressSet, ETHERNET, WIFI};

/// SysfsAddressProvider reads MAC addresses from the kernel's per-interface `address` files, e.g.
/// `/sys/class/net/eth0/address`.
#[derive(Debug, Clone)]
pub struct SysfsAddressProvider {
    /// Directory holding one sub-directory per network interface.
    root: PathBuf,
    /// Interface name for each label of the address set.
    interfaces: Vec<(String, String)>,
}

impl SysfsAddressProvider {
    pub fn new(root: impl Into<PathBuf>, ethernet: &str, wifi: &str) -> Self {
        SysfsAddressProvider {
            root: root.into(),
            interfaces: vec![
                (ETHERNET.to_string(), ethernet.to_string()),
                (WIFI.to_string(), wifi.to_string()),
            ],
        }
    }

    async fn read_address(&self, interface: &str) -> String {
        let path = self.root.join(interface).join("address");

        match tokio::fs::read_to_string(&path).await {
            Ok(content) => content.trim().to_string(),
            Err(e) => {
                if e.kind() == std::io::ErrorKind::NotFound {
                    debug!(interface = interface, "interface not present");
                } else {
                    warn!(interface = interface, "Error reading hardware address: {}", e);
                }

                String::new()
            }
        }
    }
}

#[async_trait]
impl HardwareAddressProvider for SysfsAddressProvider {
    async fn populate(&self, addresses: &mut HardwareAddressSet) {
        for (label, interface) in &self.interfaces {
            let address = self.read_address(interface).await;
            debug!(
                label = %label,
                interface = %interface,
                address = %address,
                "hardware address"
            );

            addresses.set(label, address);
        }
    }
}

#[cfg(test)]
mod tests {
    use std::fs;

    use super::*;

    fn write_address(root: &std::path::Path, interface: &str, address: &str) {
        let dir = root.join(interface);
        fs::create_dir_all(&dir).unwrap();
        fs::write(dir.join("address"), address).unwrap();
    }

    #[tokio::test]
    async fn test_reads_both_interfaces() {
        let root = tempfile::tempdir().unwrap();
        write_address(root.path(), "eth0", "aa:bb:cc:dd:ee:ff\n");
        write_address(root.path(), "wlan0", "11:22:33:44:55:66\n");

        let provider = SysfsAddressProvider::new(root.path(), "eth0", "wlan0");
        let mut addresses = HardwareAddressSet::new();
        provider.populate(&mut addresses).await;

        assert_eq!(addresses.get(ETHERNET), "aa:bb:cc:dd:ee:ff");
        assert_eq!(addresses.get(WIFI), "11:22:33:44:55:66");
    }

    #[tokio::test]
    async fn test_missing_interface_is_empty() {
        let root = tempfile::tempdir().unwrap();
        write_address(root.path(), "wlan0", "de:ad:be:ef:00:01\n");

        let provider = SysfsAddressProvider::new(root.path(), "eth0", "wlan0");
        let mut addresses = HardwareAddressSet::new();
        provider.populate(&mut addresses).await;

        assert_eq!(addresses.get(ETHERNET), "");
        assert_eq!(addresses.get(WIFI), "de:ad:be:ef:00:01");
    }

    #[tokio::test]
    async fn test_custom_interface_names() {
        let root = tempfile::tempdir().unwrap();
        write_address(root.path(), "end0", "02:00:00:00:00:01");

        let provider = SysfsAddressProvider::new(root.path(), "end0", "wlp2s0");
        let mut addresses = HardwareAddressSet::new();
        provider.populate(&mut addresses).await;

        assert_eq!(addresses.get(ETHERNET), "02:00:00:00:00:01");
        assert_eq!(addresses.get(WIFI), "");
    }
}
