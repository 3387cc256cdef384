//! Users, coins and balances, plus the demo login.

use std::fmt;

use chrono::{DateTime, Utc};
use log::warn;
use serde::Serialize;

use crate::backend::Backend;
use crate::error::StoreError;
use crate::model::Record;
use crate::store::{Collection, CollectionStore};

use super::models::{Balance, BalancePatch, Coin, CoinPatch, User};

impl<'a, B: Backend> Collection<'a, B, User> {
    /// Case-insensitive lookup by email.
    pub fn find_by_email(&self, email: &str) -> Option<Record<User>> {
        let email = email.trim();
        self.get_all()
            .into_iter()
            .find(|user| user.email.eq_ignore_ascii_case(email))
    }
}

impl<'a, B: Backend> Collection<'a, B, Coin> {
    pub fn find_by_symbol(&self, symbol: &str) -> Option<Record<Coin>> {
        self.find_first(&CoinPatch::default().symbol(symbol))
    }

    pub fn update_by_symbol(
        &self,
        symbol: &str,
        changes: &CoinPatch,
    ) -> Result<Option<Record<Coin>>, StoreError> {
        match self.find_by_symbol(symbol) {
            Some(coin) => self.update(&coin.id, changes),
            None => Ok(None),
        }
    }
}

impl<'a, B: Backend> Collection<'a, B, Balance> {
    pub fn for_user(&self, user_id: &str) -> Vec<Record<Balance>> {
        self.find(&BalancePatch::default().user_id(user_id))
    }

    pub fn for_user_and_coin(&self, user_id: &str, coin_symbol: &str) -> Option<Record<Balance>> {
        self.find_first(&BalancePatch::default().user_id(user_id).coin_symbol(coin_symbol))
    }

    /// Set a user's amount of one coin, creating the balance if needed.
    pub fn set_amount(
        &self,
        user_id: &str,
        coin_symbol: &str,
        amount: f64,
    ) -> Result<Record<Balance>, StoreError> {
        if let Some(existing) = self.for_user_and_coin(user_id, coin_symbol) {
            if let Some(updated) = self.update(&existing.id, &BalancePatch::default().amount(amount))? {
                return Ok(updated);
            }
        }
        self.create(Balance {
            user_id: user_id.to_string(),
            coin_symbol: coin_symbol.to_string(),
            amount,
        })
    }

    pub fn delete_for_user(&self, user_id: &str) -> Result<usize, StoreError> {
        self.delete_by(&crate::query::Criteria::matching(
            &BalancePatch::default().user_id(user_id),
        ))
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LoginError {
    /// Email or password was blank.
    MissingCredentials,
    /// No such user, or the password did not match. The two are not
    /// distinguished.
    InvalidCredentials,
}

impl fmt::Display for LoginError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            LoginError::MissingCredentials => write!(f, "email and password are required"),
            LoginError::InvalidCredentials => write!(f, "invalid email or password"),
        }
    }
}

impl std::error::Error for LoginError {}

/// A user as shown to the client: no password.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct UserProfile {
    pub id: String,
    pub email: String,
    pub created_at: DateTime<Utc>,
}

/// One balance joined with its coin.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct BalanceLine {
    pub coin: String,
    pub coin_name: String,
    pub amount: f64,
    pub price_usd: f64,
}

impl BalanceLine {
    pub fn value_usd(&self) -> f64 {
        self.amount * self.price_usd
    }
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct LoginSummary {
    pub user: UserProfile,
    pub balances: Vec<BalanceLine>,
}

impl LoginSummary {
    pub fn total_usd(&self) -> f64 {
        self.balances.iter().map(BalanceLine::value_usd).sum()
    }
}

/// Check an email/password pair against the users collection and return the
/// user's balances priced with the current coin data.
///
/// Balances whose coin is unknown are left out.
pub fn login<B: Backend>(
    store: &CollectionStore<B>,
    email: &str,
    password: &str,
) -> Result<LoginSummary, LoginError> {
    if email.trim().is_empty() || password.is_empty() {
        return Err(LoginError::MissingCredentials);
    }

    let user = store
        .collection::<User>()
        .find_by_email(email)
        .filter(|user| user.password == password)
        .ok_or(LoginError::InvalidCredentials)?;

    let coins = store.collection::<Coin>();
    let balances = store
        .collection::<Balance>()
        .for_user(&user.id)
        .into_iter()
        .filter_map(|balance| match coins.find_by_symbol(&balance.coin_symbol) {
            Some(coin) => Some(BalanceLine {
                coin: coin.symbol.clone(),
                coin_name: coin.name.clone(),
                amount: balance.amount,
                price_usd: coin.current_price_usd,
            }),
            None => {
                warn!(
                    "balance {} references unknown coin {}",
                    balance.id, balance.coin_symbol
                );
                None
            }
        })
        .collect();

    Ok(LoginSummary {
        user: UserProfile {
            id: user.id.clone(),
            email: user.email.clone(),
            created_at: user.created_at,
        },
        balances,
    })
}
