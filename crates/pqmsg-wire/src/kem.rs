//! Enumerated tags naming the requested key-exchange scheme and operation.
//!
//! Discriminants are part of the wire contract: they travel as 4-byte
//! little-endian tags and must never be reassigned. New schemes append at the
//! end with the next free value.

use crate::error::WireError;

/// A post-quantum or hybrid (post-quantum + classical ECDH) key-exchange
/// scheme. `NoAlgorithm` is the sentinel used by default-constructed headers.
#[allow(non_camel_case_types)]
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
#[cfg_attr(feature = "arbitrary", derive(arbitrary::Arbitrary))]
#[repr(u32)]
pub enum Algorithm {
    #[default]
    NoAlgorithm = 0,
    FRODO640__ECDHp256 = 1,
    FRODO640 = 2,
    FRODO976__ECDHp384 = 3,
    FRODO976 = 4,
    FRODO1344__ECDHp521 = 5,
    FRODO1344 = 6,
    NTRU_HRSS_701 = 7,
    NTRU_HRSS_701__ECDHp256 = 8,
    NTRU_HPS_2048509 = 9,
    NTRU_HPS_2048509__ECDHp256 = 10,
    RND5_1CCA_5D = 11,
    RND5_1CCA_5D__ECDHp256 = 12,
    RND5_3CCA_5D = 13,
    RND5_3CCA_5D__ECDHp384 = 14,
    RND5_5CCA_5D = 15,
    RND5_5CCA_5D__ECDHp521 = 16,
    KYBER_512 = 17,
    KYBER_512__ECDHp256 = 18,
    KYBER_768 = 19,
    KYBER_768__ECDHp384 = 20,
    KYBER_1024 = 21,
    KYBER_1024__ECDHp521 = 22,
    SABER_LIGHT = 23,
    SABER_LIGHT__ECDHp256 = 24,
    SABER = 25,
    SABER__ECDHp384 = 26,
    SABER_FIRE = 27,
    SABER_FIRE__ECDHp521 = 28,
}

impl Algorithm {
    /// The wire tag for this scheme.
    pub fn tag(self) -> u32 {
        self as u32
    }
}

impl TryFrom<u32> for Algorithm {
    type Error = WireError;

    fn try_from(tag: u32) -> Result<Self, Self::Error> {
        match tag {
            0 => Ok(Self::NoAlgorithm),
            1 => Ok(Self::FRODO640__ECDHp256),
            2 => Ok(Self::FRODO640),
            3 => Ok(Self::FRODO976__ECDHp384),
            4 => Ok(Self::FRODO976),
            5 => Ok(Self::FRODO1344__ECDHp521),
            6 => Ok(Self::FRODO1344),
            7 => Ok(Self::NTRU_HRSS_701),
            8 => Ok(Self::NTRU_HRSS_701__ECDHp256),
            9 => Ok(Self::NTRU_HPS_2048509),
            10 => Ok(Self::NTRU_HPS_2048509__ECDHp256),
            11 => Ok(Self::RND5_1CCA_5D),
            12 => Ok(Self::RND5_1CCA_5D__ECDHp256),
            13 => Ok(Self::RND5_3CCA_5D),
            14 => Ok(Self::RND5_3CCA_5D__ECDHp384),
            15 => Ok(Self::RND5_5CCA_5D),
            16 => Ok(Self::RND5_5CCA_5D__ECDHp521),
            17 => Ok(Self::KYBER_512),
            18 => Ok(Self::KYBER_512__ECDHp256),
            19 => Ok(Self::KYBER_768),
            20 => Ok(Self::KYBER_768__ECDHp384),
            21 => Ok(Self::KYBER_1024),
            22 => Ok(Self::KYBER_1024__ECDHp521),
            23 => Ok(Self::SABER_LIGHT),
            24 => Ok(Self::SABER_LIGHT__ECDHp256),
            25 => Ok(Self::SABER),
            26 => Ok(Self::SABER__ECDHp384),
            27 => Ok(Self::SABER_FIRE),
            28 => Ok(Self::SABER_FIRE__ECDHp521),
            other => Err(WireError::UnknownAlgorithm(other)),
        }
    }
}

/// The cryptographic action requested from the executing process.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
#[cfg_attr(feature = "arbitrary", derive(arbitrary::Arbitrary))]
#[repr(u32)]
pub enum Operation {
    #[default]
    NoOperation = 0,
    KeypairGeneration = 1,
    Encapsulation = 2,
    Decapsulation = 3,
}

impl Operation {
    /// The wire tag for this operation.
    pub fn tag(self) -> u32 {
        self as u32
    }
}

impl TryFrom<u32> for Operation {
    type Error = WireError;

    fn try_from(tag: u32) -> Result<Self, Self::Error> {
        match tag {
            0 => Ok(Self::NoOperation),
            1 => Ok(Self::KeypairGeneration),
            2 => Ok(Self::Encapsulation),
            3 => Ok(Self::Decapsulation),
            other => Err(WireError::UnknownOperation(other)),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn algorithm_tags_are_pinned() {
        assert_eq!(Algorithm::NoAlgorithm.tag(), 0);
        assert_eq!(Algorithm::FRODO640__ECDHp256.tag(), 1);
        assert_eq!(Algorithm::NTRU_HRSS_701.tag(), 7);
        assert_eq!(Algorithm::KYBER_768.tag(), 19);
        assert_eq!(Algorithm::SABER_FIRE__ECDHp521.tag(), 28);
    }

    #[test]
    fn operation_tags_are_pinned() {
        assert_eq!(Operation::NoOperation.tag(), 0);
        assert_eq!(Operation::KeypairGeneration.tag(), 1);
        assert_eq!(Operation::Encapsulation.tag(), 2);
        assert_eq!(Operation::Decapsulation.tag(), 3);
    }

    #[test]
    fn algorithm_tag_roundtrip() {
        for tag in 0..=28 {
            let algorithm = Algorithm::try_from(tag).unwrap();
            assert_eq!(algorithm.tag(), tag);
        }
    }

    #[test]
    fn unknown_tags_rejected() {
        assert!(matches!(
            Algorithm::try_from(29),
            Err(WireError::UnknownAlgorithm(29))
        ));
        assert!(matches!(
            Algorithm::try_from(u32::MAX),
            Err(WireError::UnknownAlgorithm(_))
        ));
        assert!(matches!(
            Operation::try_from(4),
            Err(WireError::UnknownOperation(4))
        ));
    }

    #[test]
    fn defaults_are_sentinels() {
        assert_eq!(Algorithm::default(), Algorithm::NoAlgorithm);
        assert_eq!(Operation::default(), Operation::NoOperation);
    }
}
