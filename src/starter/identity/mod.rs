pub mod sysfs;

use std::collections::BTreeMap;

use async_trait::async_trait;

/// Label of the Ethernet interface inside a [`HardwareAddressSet`].
pub const ETHERNET: &str = "E0";
/// Label of the WiFi interface inside a [`HardwareAddressSet`].
pub const WIFI: &str = "W0";

/// HardwareAddressSet maps an interface label to its MAC address. An interface without an address
/// is kept as an empty string rather than removed.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct HardwareAddressSet {
    addresses: BTreeMap<String, String>,
}

impl HardwareAddressSet {
    /// Creates a set with empty entries for the Ethernet and WiFi labels.
    pub fn new() -> Self {
        let mut addresses = BTreeMap::new();
        addresses.insert(ETHERNET.to_string(), String::new());
        addresses.insert(WIFI.to_string(), String::new());

        HardwareAddressSet { addresses }
    }

    pub fn get(&self, label: &str) -> &str {
        self.addresses.get(label).map(String::as_str).unwrap_or("")
    }

    pub fn set(&mut self, label: &str, address: impl Into<String>) {
        self.addresses.insert(label.to_string(), address.into());
    }
}

impl Default for HardwareAddressSet {
    fn default() -> Self {
        Self::new()
    }
}

/// HardwareAddressProvider fills a [`HardwareAddressSet`] with the addresses of the interfaces it
/// knows. An interface it cannot read is left as an empty string; populating never fails.
#[async_trait]
pub trait HardwareAddressProvider: Send + Sync {
    async fn populate(&self, addresses: &mut HardwareAddressSet);
}

/// Derives the gateway identifier from the addresses, preferring Ethernet and falling back to WiFi.
///
/// NOTE: When neither interface has an address the identifier is an empty string. Callers that
/// must not run with an empty identifier check for it themselves.
pub fn resolve_gateway_id(addresses: &HardwareAddressSet) -> String {
    let mut mac = addresses.get(ETHERNET);
    if mac.is_empty() {
        mac = addresses.get(WIFI);
    }

    mac.replace(':', "")
}
