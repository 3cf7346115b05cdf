use rust_decimal::Decimal;
use serde::Serialize;
use uuid::Uuid;

use crate::domain::errors::{DomainError, DomainResult};

/// A player registered with exactly one team
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Player {
    pub id: Uuid,
    pub team_id: Uuid,
    pub name: String,
    /// Market price managers pay to select the player
    pub price: Decimal,
    pub is_goalkeeper: bool,
}

impl Player {
    /// Creates a new Player
    ///
    /// # Business Rules Enforced
    /// - Name must not be empty
    /// - Price cannot be negative
    pub fn new(
        team_id: Uuid,
        name: impl Into<String>,
        price: Decimal,
        is_goalkeeper: bool,
    ) -> DomainResult<Self> {
        let name = name.into();
        if name.trim().is_empty() {
            return Err(DomainError::invalid("Player name cannot be empty"));
        }
        if price.is_sign_negative() && !price.is_zero() {
            return Err(DomainError::invalid("Player price cannot be negative"));
        }

        Ok(Self {
            id: Uuid::new_v4(),
            team_id,
            name,
            price,
            is_goalkeeper,
        })
    }
}
