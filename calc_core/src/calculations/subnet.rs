//! # IPv4 Subnet Calculation
//!
//! Computes the network, broadcast, and host range for an IPv4 address and
//! CIDR prefix by masking the address as a 32-bit integer.
//!
//! ## Assumptions
//!
//! - Usable hosts = 2^(32 − prefix) − 2, clamped at 0. /31 and /32 have no
//!   usable host range, so `first_host`/`last_host` are `None` there.
//! - The address is parsed strictly: four decimal octets 0–255.
//!
//! ## Example
//!
//! ```rust
//! use calc_core::calculations::subnet::{calculate, SubnetInput};
//!
//! let result = calculate(&SubnetInput::parse("192.168.1.0", 24).unwrap()).unwrap();
//! assert_eq!(result.broadcast.to_string(), "192.168.1.255");
//! assert_eq!(result.usable_hosts, 254);
//! ```

use std::net::Ipv4Addr;

use serde::{Deserialize, Serialize};

use crate::errors::{CalcError, CalcResult};

/// Address and prefix length.
///
/// ## JSON Example
///
/// ```json
/// { "address": "10.0.0.17", "prefix": 28 }
/// ```
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SubnetInput {
    pub address: Ipv4Addr,
    pub prefix: u8,
}

impl SubnetInput {
    /// Parse a dotted-quad address.
    pub fn parse(address: &str, prefix: u8) -> CalcResult<Self> {
        Ok(SubnetInput {
            address: parse_address(address)?,
            prefix,
        })
    }

    /// Parse `"192.168.1.0/24"`
    pub fn parse_cidr(cidr: &str) -> CalcResult<Self> {
        let (address, prefix) = cidr.split_once('/').ok_or_else(|| {
            CalcError::invalid_input("cidr", cidr, "Expected address/prefix, e.g. 192.168.1.0/24")
        })?;
        let prefix = prefix
            .trim()
            .parse::<u8>()
            .map_err(|_| CalcError::invalid_input("prefix", prefix.trim(), "Prefix must be 0-32"))?;
        SubnetInput::parse(address, prefix)
    }

    pub fn validate(&self) -> CalcResult<()> {
        if self.prefix > 32 {
            return Err(CalcError::invalid_input(
                "prefix",
                self.prefix.to_string(),
                "Prefix must be between 0 and 32",
            ));
        }
        Ok(())
    }
}

/// Parse four decimal octets, reporting which octet is wrong
pub fn parse_address(address: &str) -> CalcResult<Ipv4Addr> {
    let address = address.trim();
    let parts: Vec<&str> = address.split('.').collect();
    if parts.len() != 4 {
        return Err(CalcError::invalid_input(
            "address",
            address,
            "IPv4 address must have four octets",
        ));
    }

    let mut octets = [0u8; 4];
    for (i, part) in parts.iter().enumerate() {
        let valid_digits = !part.is_empty() && part.len() <= 3 && part.bytes().all(|b| b.is_ascii_digit());
        octets[i] = match part.parse::<u16>() {
            Ok(v) if valid_digits && v <= 255 => v as u8,
            _ => {
                return Err(CalcError::invalid_input(
                    format!("address octet {}", i + 1),
                    *part,
                    "Octet must be a number from 0 to 255",
                ))
            }
        };
    }
    Ok(Ipv4Addr::from(octets))
}

/// Subnet mask for a prefix length (prefix must be ≤ 32)
pub fn prefix_mask(prefix: u8) -> u32 {
    if prefix == 0 {
        0
    } else {
        u32::MAX << (32 - u32::from(prefix))
    }
}

/// Subnet details
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SubnetResult {
    pub prefix: u8,
    pub mask: Ipv4Addr,
    pub wildcard: Ipv4Addr,
    pub network: Ipv4Addr,
    pub broadcast: Ipv4Addr,
    /// First usable host (None for /31 and /32)
    pub first_host: Option<Ipv4Addr>,
    /// Last usable host (None for /31 and /32)
    pub last_host: Option<Ipv4Addr>,
    /// All addresses in the block, including network and broadcast
    pub total_addresses: u64,
    pub usable_hosts: u64,
}

/// Calculate the subnet containing `input.address`.
pub fn calculate(input: &SubnetInput) -> CalcResult<SubnetResult> {
    input.validate()?;

    let mask = prefix_mask(input.prefix);
    let ip = u32::from(input.address);
    let network = ip & mask;
    let broadcast = network | !mask;

    let total_addresses = 1u64 << (32 - u32::from(input.prefix));
    let usable_hosts = total_addresses.saturating_sub(2);

    let (first_host, last_host) = if usable_hosts > 0 {
        (
            Some(Ipv4Addr::from(network + 1)),
            Some(Ipv4Addr::from(broadcast - 1)),
        )
    } else {
        (None, None)
    };

    tracing::debug!(address = %input.address, prefix = input.prefix, "subnet calculated");

    Ok(SubnetResult {
        prefix: input.prefix,
        mask: Ipv4Addr::from(mask),
        wildcard: Ipv4Addr::from(!mask),
        network: Ipv4Addr::from(network),
        broadcast: Ipv4Addr::from(broadcast),
        first_host,
        last_host,
        total_addresses,
        usable_hosts,
    })
}
