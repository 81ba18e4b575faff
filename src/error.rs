//! Crate-wide error types.

use thiserror::Error;

/// Coarse classification of a [`GameError`], used by callers to decide how
/// to surface a refusal.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ErrorKind {
    /// Not enough gold, gems, energy, HP, spins or ingredients.
    InsufficientResource,
    /// Unknown item, dungeon, recipe, chest, pack, invoice, promo code or
    /// character.
    InvalidReference,
    /// A game rule forbids the action right now.
    Refused,
    /// Payment or ad API failure.
    External,
    /// Snapshot storage failure.
    Storage,
}

#[derive(Debug, Error)]
pub enum GameError {
    #[error("not enough energy: need {need}, have {have}")]
    NotEnoughEnergy { need: u32, have: u32 },
    #[error("not enough gold: need {need}, have {have}")]
    NotEnoughGold { need: u64, have: u64 },
    #[error("not enough gems: need {need}, have {have}")]
    NotEnoughGems { need: u64, have: u64 },
    #[error("missing ingredient {item}: need {need}, have {have}")]
    MissingIngredients { item: String, need: u32, have: u32 },
    #[error("HP too low: need more than {min}, have {have}")]
    HpTooLow { min: u32, have: u32 },
    #[error("no wheel spins left")]
    NoSpins,

    #[error("unknown {kind} '{key}'")]
    NotFound { kind: &'static str, key: String },

    #[error("level {required} required, character is level {level}")]
    LevelTooLow { required: u32, level: u32 },
    #[error("choose a class first")]
    NoClassChosen,
    #[error("class already chosen")]
    ClassAlreadyChosen,
    #[error("daily reward already claimed today")]
    AlreadyClaimed,
    #[error("free spin already used today")]
    FreeSpinUsed,
    #[error("HP is already full")]
    HpFull,
    #[error("energy is already full")]
    EnergyFull,
    #[error("an expedition is already in progress")]
    ExpeditionInProgress,
    #[error("no expedition in progress")]
    NoExpedition,
    #[error("expedition finishes in {minutes_left} minutes")]
    ExpeditionNotFinished { minutes_left: i64 },
    #[error("no elite monster available at level {level}")]
    NoEliteAvailable { level: u32 },
    #[error("{0} cannot be used that way")]
    WrongItemKind(String),
    #[error("invoice {0} was already credited")]
    AlreadyCredited(String),
    #[error("promo code {0} has no uses left")]
    PromoExhausted(String),
    #[error("promo code {0} was already redeemed")]
    PromoAlreadyUsed(String),
    #[error("reward table is empty or has no positive weight")]
    InvalidRewardTable,

    #[error(transparent)]
    Ledger(#[from] LedgerError),
    #[error(transparent)]
    Payment(#[from] PaymentError),
}

impl GameError {
    pub fn not_found(kind: &'static str, key: impl Into<String>) -> Self {
        GameError::NotFound {
            kind,
            key: key.into(),
        }
    }

    pub fn kind(&self) -> ErrorKind {
        match self {
            GameError::NotEnoughEnergy { .. }
            | GameError::NotEnoughGold { .. }
            | GameError::NotEnoughGems { .. }
            | GameError::MissingIngredients { .. }
            | GameError::HpTooLow { .. }
            | GameError::NoSpins => ErrorKind::InsufficientResource,
            GameError::NotFound { .. } | GameError::Ledger(LedgerError::UnknownCharacter(_)) => {
                ErrorKind::InvalidReference
            }
            GameError::LevelTooLow { .. }
            | GameError::NoClassChosen
            | GameError::ClassAlreadyChosen
            | GameError::AlreadyClaimed
            | GameError::FreeSpinUsed
            | GameError::HpFull
            | GameError::EnergyFull
            | GameError::ExpeditionInProgress
            | GameError::NoExpedition
            | GameError::ExpeditionNotFinished { .. }
            | GameError::NoEliteAvailable { .. }
            | GameError::WrongItemKind(_)
            | GameError::AlreadyCredited(_)
            | GameError::PromoExhausted(_)
            | GameError::PromoAlreadyUsed(_)
            | GameError::InvalidRewardTable => ErrorKind::Refused,
            GameError::Payment(_) => ErrorKind::External,
            GameError::Ledger(_) => ErrorKind::Storage,
        }
    }
}

/// Failures of the character store.
#[derive(Debug, Error)]
pub enum LedgerError {
    #[error("character {0} not found")]
    UnknownCharacter(u64),
    #[error("character {0} already exists")]
    AlreadyExists(u64),
    #[error("snapshot I/O failed: {0}")]
    Io(#[from] std::io::Error),
    #[error("snapshot encoding failed: {0}")]
    Encoding(#[from] bincode::Error),
    #[error("snapshot for character {0} is corrupt")]
    Corrupt(u64),
    #[error("store {} is corrupt", .0.display())]
    CorruptStore(std::path::PathBuf),
}

/// Failures talking to the payment provider.
#[derive(Debug, Error)]
pub enum PaymentError {
    #[error("payment gateway is not configured")]
    NotConfigured,
    #[error("payment request failed: {0}")]
    Transport(String),
    #[error("payment provider rejected the request: {0}")]
    Rejected(String),
    #[error("unexpected payment provider response: {0}")]
    Malformed(String),
}

pub type Result<T, E = GameError> = std::result::Result<T, E>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_error_kinds() {
        assert_eq!(
            GameError::NotEnoughGold { need: 10, have: 0 }.kind(),
            ErrorKind::InsufficientResource
        );
        assert_eq!(
            GameError::not_found("item", "excalibur").kind(),
            ErrorKind::InvalidReference
        );
        assert_eq!(GameError::AlreadyClaimed.kind(), ErrorKind::Refused);
        assert_eq!(
            GameError::PromoExhausted("WELCOME".into()).kind(),
            ErrorKind::Refused
        );
        assert_eq!(
            GameError::from(PaymentError::NotConfigured).kind(),
            ErrorKind::External
        );
        assert_eq!(
            GameError::from(LedgerError::Corrupt(1)).kind(),
            ErrorKind::Storage
        );
        assert_eq!(
            GameError::from(LedgerError::UnknownCharacter(7)).kind(),
            ErrorKind::InvalidReference
        );
    }

    #[test]
    fn test_error_messages() {
        let err = GameError::NotEnoughEnergy { need: 2, have: 1 };
        assert_eq!(err.to_string(), "not enough energy: need 2, have 1");
        let err = GameError::not_found("dungeon", "9");
        assert_eq!(err.to_string(), "unknown dungeon '9'");
    }
}
