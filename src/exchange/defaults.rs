//! Seed data for a fresh dashboard.

use super::models::{Balance, Coin, TradeAsset, User};

pub const TEST_EMAIL: &str = "test@coinbase.com";
pub const TEST_PASSWORD: &str = "password123";

pub fn default_coins() -> Vec<Coin> {
    [
        ("USD", "US Dollar", 1.0),
        ("BTC", "Bitcoin", 45000.0),
        ("ETH", "Ethereum", 2500.0),
    ]
    .into_iter()
    .map(|(symbol, name, price)| Coin {
        symbol: symbol.to_string(),
        name: name.to_string(),
        current_price_usd: price,
    })
    .collect()
}

pub fn default_users() -> Vec<User> {
    vec![User {
        email: TEST_EMAIL.to_string(),
        password: TEST_PASSWORD.to_string(),
    }]
}

/// Starting balances for the test user: USD $9,826.87, BTC ~$617, ETH ~$232.
pub fn default_balances(user_id: &str) -> Vec<Balance> {
    [("USD", 9826.87), ("BTC", 0.01372), ("ETH", 0.09288)]
        .into_iter()
        .map(|(coin, amount)| Balance {
            user_id: user_id.to_string(),
            coin_symbol: coin.to_string(),
            amount,
        })
        .collect()
}

pub fn default_trade_assets() -> Vec<TradeAsset> {
    [
        ("virtual", "Virtuals Protocol", "VIRTUAL", 0.85, 46, "$560.2M", -3.14),
        ("reppo", "Reppo", "REPPO", 0.0281, 21, "$27.7M", 29.39),
        ("degen", "Degen", "DEGEN", 0.0016, 0, "$33.6M", -3.43),
        ("ping", "Ping", "PING", 0.0069, 0, "$6.9M", 0.47),
        ("horizen", "Horizen", "ZEN", 9.34, 0, "$165.3M", -10.81),
        ("bitcoin", "Bitcoin", "BTC", 97234.56, 1250, "$1.9T", 2.34),
        ("ethereum", "Ethereum", "ETH", 3456.78, 890, "$415.6B", -1.23),
        ("solana", "Solana", "SOL", 198.45, 567, "$92.3B", 5.67),
    ]
    .into_iter()
    .map(
        |(slug, name, symbol, market_price, trades, market_cap, change_24h)| TradeAsset {
            slug: slug.to_string(),
            name: name.to_string(),
            symbol: symbol.to_string(),
            icon_url: String::new(),
            market_price,
            trades,
            market_cap: market_cap.to_string(),
            change_24h,
            is_favorite: false,
        },
    )
    .collect()
}
