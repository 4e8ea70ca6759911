use ipnetwork::IpNetwork;

/*-------------------------------------------------------------------------------------------------
  Prefix Type
-------------------------------------------------------------------------------------------------*/

/// Classification of an address prefix string.
#[derive(Debug, Clone, Copy, Eq, PartialEq)]
pub enum PrefixType {
    IPv4,
    IPv6,
    Unrecognized,
}

impl PrefixType {
    /// Classify a CIDR-formatted prefix. Host addresses are accepted as single-host networks
    /// and host bits are not required to be zero.
    ///
    /// ```
    /// use servicetag_edl::PrefixType;
    ///
    /// assert_eq!(PrefixType::classify("10.0.0.0/8"), PrefixType::IPv4);
    /// assert_eq!(PrefixType::classify("2001:db8::/32"), PrefixType::IPv6);
    /// assert_eq!(PrefixType::classify("not-an-ip"), PrefixType::Unrecognized);
    /// ```
    pub fn classify(prefix: &str) -> Self {
        match prefix.parse::<IpNetwork>() {
            Ok(IpNetwork::V4(_)) => PrefixType::IPv4,
            Ok(IpNetwork::V6(_)) => PrefixType::IPv6,
            Err(_) => PrefixType::Unrecognized,
        }
    }
}

/*-------------------------------------------------------------------------------------------------
  Unit Tests
-------------------------------------------------------------------------------------------------*/
