use std::collections::HashSet;
use std::net::Ipv4Addr;

use ip_network::Ipv4Network;

use crate::error::{WlError, WlResult};

/// Expands an IPv4 address or CIDR block into its member addresses.
///
/// A bare address (or a `/0` suffix) yields a single-element set. Any other
/// prefix expands inclusively: the network and broadcast addresses are part
/// of the result, so `a.b.c.d/31` yields 2 tokens and `/32` yields 1.
pub fn ip_range(input: &str) -> WlResult<HashSet<String>> {
    if input.is_empty() {
        return Err(WlError::InvalidAddress(input.to_string()));
    }

    let (address, prefix) = match input.split_once('/') {
        Some((address, prefix)) => {
            let prefix: u8 = prefix
                .parse()
                .map_err(|_| WlError::InvalidAddress(input.to_string()))?;
            (address, prefix)
        }
        None => (input, 0),
    };

    let address: Ipv4Addr = address
        .parse()
        .map_err(|_| WlError::InvalidAddress(address.to_string()))?;

    if prefix == 0 {
        return Ok(HashSet::from([address.to_string()]));
    }

    let network = Ipv4Network::new_truncate(address, prefix)
        .map_err(|_| WlError::InvalidAddress(input.to_string()))?;
    let start: u32 = network.network_address().into();
    let end: u32 = network.broadcast_address().into();

    let mut range = HashSet::with_capacity((end - start) as usize + 1);
    for value in start..=end {
        range.insert(Ipv4Addr::from(value).to_string());
    }
    Ok(range)
}

/// Returns true when the input denotes a CIDR block spanning more than one
/// address. Malformed input is classified, not reported: the answer is false.
pub fn is_ip_range(input: &str) -> bool {
    let (address, prefix) = match input.split_once('/') {
        Some((address, prefix)) => (address, prefix),
        None => return false,
    };

    let address: Ipv4Addr = match address.parse() {
        Ok(address) => address,
        Err(_) => return false,
    };
    let prefix: u8 = match prefix.parse() {
        Ok(prefix) => prefix,
        Err(_) => return false,
    };

    match Ipv4Network::new_truncate(address, prefix) {
        Ok(network) => {
            u32::from(network.broadcast_address()) > u32::from(network.network_address())
        }
        Err(_) => false,
    }
}
