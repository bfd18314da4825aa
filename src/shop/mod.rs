//! Token shop
//!
//! Fixed packages priced in wei. A purchase sends the price from the
//! buyer's wallet to the treasury address, waits for the transfer to
//! confirm, then credits the tokens through the ledger with the chain
//! transaction hash as the idempotency key. A wallet failure anywhere in
//! the flow aborts the purchase with no partial credit.

use std::time::Duration;

use tracing::info;

use crate::domain::User;
use crate::ledger::{Ledger, LedgerError};
use crate::wallet::{WalletClient, WalletError};

/// A purchasable token bundle
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TokenPackage {
    pub tokens: i64,
    pub price_wei: u128,
}

/// All packages on sale (50 tokens at 0.00013 ETH up to 5000 at 0.013)
pub static TOKEN_PACKAGES: &[TokenPackage] = &[
    TokenPackage {
        tokens: 50,
        price_wei: 130_000_000_000_000,
    },
    TokenPackage {
        tokens: 100,
        price_wei: 260_000_000_000_000,
    },
    TokenPackage {
        tokens: 250,
        price_wei: 650_000_000_000_000,
    },
    TokenPackage {
        tokens: 500,
        price_wei: 1_300_000_000_000_000,
    },
    TokenPackage {
        tokens: 1000,
        price_wei: 2_600_000_000_000_000,
    },
    TokenPackage {
        tokens: 5000,
        price_wei: 13_000_000_000_000_000,
    },
];

impl TokenPackage {
    /// Find the package selling exactly this many tokens.
    pub fn by_tokens(tokens: i64) -> Option<&'static TokenPackage> {
        TOKEN_PACKAGES.iter().find(|p| p.tokens == tokens)
    }
}

/// Purchase failure
#[derive(Debug, thiserror::Error)]
pub enum ShopError {
    #[error("no package sells {0} tokens")]
    UnknownPackage(i64),

    #[error(transparent)]
    Wallet(#[from] WalletError),

    #[error(transparent)]
    Ledger(#[from] LedgerError),
}

/// What a completed purchase settled
#[derive(Debug, Clone)]
pub struct PurchaseReceipt {
    pub tokens: i64,
    pub tx_hash: String,
    pub buyer_address: String,
    /// False when the confirmation was a replay of an already-credited
    /// transaction
    pub credited: bool,
}

/// Buy a package for `buyer`, settling on chain before crediting.
pub fn purchase(
    ledger: &Ledger,
    wallet: &WalletClient,
    buyer: &User,
    package: &TokenPackage,
    treasury_address: &str,
    receipt_timeout: Duration,
) -> Result<PurchaseReceipt, ShopError> {
    let buyer_address = wallet.connect()?;

    let tx_hash = wallet.send_value(&buyer_address, treasury_address, package.price_wei)?;
    wallet.wait_for_receipt(&tx_hash, receipt_timeout)?;

    let credited = ledger.credit_tokens(&buyer.id, package.tokens, &tx_hash)?;
    ledger.link_wallet(&buyer.id, &buyer_address)?;

    info!(
        buyer = %buyer.id,
        tokens = package.tokens,
        tx = %tx_hash,
        "purchase settled"
    );
    Ok(PurchaseReceipt {
        tokens: package.tokens,
        tx_hash,
        buyer_address,
        credited,
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::wallet::format_eth;

    #[test]
    fn test_package_lookup() {
        assert_eq!(TokenPackage::by_tokens(50).unwrap().price_wei, 130_000_000_000_000);
        assert_eq!(TokenPackage::by_tokens(5000).unwrap().price_wei, 13_000_000_000_000_000);
        assert!(TokenPackage::by_tokens(33).is_none());
    }

    #[test]
    fn test_prices_scale_linearly() {
        let base = TokenPackage::by_tokens(50).unwrap();
        for pkg in TOKEN_PACKAGES {
            assert_eq!(
                pkg.price_wei,
                base.price_wei * pkg.tokens as u128 / base.tokens as u128
            );
        }
    }

    #[test]
    fn test_display_prices() {
        assert_eq!(format_eth(TOKEN_PACKAGES[0].price_wei), "0.00013");
        assert_eq!(format_eth(TOKEN_PACKAGES[5].price_wei), "0.013");
    }
}
