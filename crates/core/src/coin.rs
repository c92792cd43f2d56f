//! Static coin descriptors.
//!
//! Ids follow SLIP-0044 so they can be stored in `Tx::coin` unchanged.

use serde::Serialize;

/// Descriptor of a chain's native coin.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct Coin {
    pub id: u32,
    pub handle: &'static str,
    pub symbol: &'static str,
    pub name: &'static str,
    pub decimals: u32,
}

pub const ETH: Coin = Coin {
    id: 60,
    handle: "ethereum",
    symbol: "ETH",
    name: "Ethereum",
    decimals: 18,
};

pub const ATOM: Coin = Coin {
    id: 118,
    handle: "cosmos",
    symbol: "ATOM",
    name: "Cosmos",
    decimals: 6,
};

pub const ALGO: Coin = Coin {
    id: 283,
    handle: "algorand",
    symbol: "ALGO",
    name: "Algorand",
    decimals: 6,
};

pub const BNB: Coin = Coin {
    id: 714,
    handle: "binance",
    symbol: "BNB",
    name: "Binance",
    decimals: 8,
};

const ALL: &[Coin] = &[ETH, ATOM, ALGO, BNB];

impl Coin {
    /// Looks up a coin by its SLIP-0044 id.
    pub fn by_id(id: u32) -> Option<&'static Coin> {
        ALL.iter().find(|c| c.id == id)
    }

    /// Looks up a coin by its platform handle (e.g. "cosmos").
    pub fn by_handle(handle: &str) -> Option<&'static Coin> {
        ALL.iter().find(|c| c.handle == handle)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_lookup_by_id() {
        assert_eq!(Coin::by_id(283), Some(&ALGO));
        assert_eq!(Coin::by_id(118).map(|c| c.symbol), Some("ATOM"));
        assert!(Coin::by_id(1).is_none());
    }

    #[test]
    fn test_lookup_by_handle() {
        assert_eq!(Coin::by_handle("binance"), Some(&BNB));
        assert!(Coin::by_handle("unknown").is_none());
    }
}
