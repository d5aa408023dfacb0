use clap::ValueEnum;

use tablefact_claim::Encoding;
use tablefact_retriever::KeyStrategy;

#[derive(Copy, Clone, Default, ValueEnum)]
pub(crate) enum KeyStrategyFlag {
    #[default]
    Random,
    First,
    Sensible,
    Entity,
}

impl KeyStrategyFlag {
    pub(crate) const fn as_domain(self) -> KeyStrategy {
        match self {
            KeyStrategyFlag::Random => KeyStrategy::Random,
            KeyStrategyFlag::First => KeyStrategy::First,
            KeyStrategyFlag::Sensible => KeyStrategy::Sensible,
            KeyStrategyFlag::Entity => KeyStrategy::Entity,
        }
    }
}

#[derive(Copy, Clone, Default, ValueEnum)]
pub(crate) enum EncodingFlag {
    #[default]
    Compact,
    Totto,
}

impl EncodingFlag {
    pub(crate) const fn as_domain(self) -> Encoding {
        match self {
            EncodingFlag::Compact => Encoding::Compact,
            EncodingFlag::Totto => Encoding::Totto,
        }
    }
}
