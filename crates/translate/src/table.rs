//! # Overview
//!
//! A [`BitTable`] is the declarative heart of the codec: a finite,
//! ordered sequence of `(canonical, native)` bit-pattern pairings for one
//! platform, constructed once at startup and read-only afterwards.
//! Translation is table-driven rather than hard-coded per permission
//! because native bit assignments vary per platform and kernel version;
//! new platforms are added by data, not code.
//!
//! # Design
//!
//! Entries are applied in declaration order and every matched entry
//! consumes the bits it covers. For single-bit vocabularies (permissions,
//! inheritance flags) this is exactly "look up each set bit"; for
//! multi-bit field codes (tag and entry-type codes) table authors list
//! codes most-specific first so a narrower code never shadows a wider
//! one. Bits left over after all entries have run are returned as the
//! unmapped residue, never silently dropped.
//!
//! Ambiguity is rejected up front: construction fails if any canonical or
//! native pattern repeats, so runtime translation never needs to branch
//! on it.

use std::fmt;

use rustc_hash::FxHashSet;

/// One pairing of a canonical bit pattern with a native bit pattern.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct MapPair {
    /// Pattern in the canonical 32-bit layout.
    pub canonical: u32,
    /// Pattern in the platform's native bit assignment.
    pub native: u32,
}

impl MapPair {
    /// Creates a pairing.
    #[must_use]
    pub const fn new(canonical: u32, native: u32) -> Self {
        Self { canonical, native }
    }
}

/// Which side of a pairing an error refers to.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MapSide {
    /// The canonical-layout side.
    Canonical,
    /// The platform-native side.
    Native,
}

impl fmt::Display for MapSide {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Canonical => f.write_str("canonical"),
            Self::Native => f.write_str("native"),
        }
    }
}

/// A malformed table definition, detected at construction time.
///
/// Platform tables are static data; a failure here is a programming
/// error in the table definition and must halt startup rather than be
/// handled per translation call.
#[derive(Debug, Clone, Copy, PartialEq, Eq, thiserror::Error)]
pub enum TableError {
    /// The same pattern appears in more than one pairing, making the
    /// mapping ambiguous in one direction.
    #[error("duplicate {side} pattern {value:#010x} in translation table")]
    DuplicateMapping {
        /// The side on which the pattern repeats.
        side: MapSide,
        /// The repeated pattern.
        value: u32,
    },
    /// A pairing with an all-zero side, which would match unconditionally.
    #[error("translation table entry {index} has an empty bit pattern")]
    EmptyPattern {
        /// Index of the offending pairing.
        index: usize,
    },
}

/// Result of translating one bit group through a table.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Translated {
    /// The bits that found a counterpart.
    pub bits: u32,
    /// Input bits with no counterpart in the table. Callers decide
    /// whether a nonzero residue is an error.
    pub unmapped: u32,
}

impl Translated {
    /// Returns `true` when every input bit was mapped.
    #[must_use]
    pub const fn is_clean(&self) -> bool {
        self.unmapped == 0
    }
}

/// A bidirectional, partially bijective mapping between canonical and
/// native bit patterns.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct BitTable {
    entries: Vec<MapPair>,
}

impl BitTable {
    /// Builds a table from an ordered pair sequence.
    ///
    /// Fails with [`TableError::DuplicateMapping`] if any canonical or
    /// native pattern repeats, and with [`TableError::EmptyPattern`] if
    /// either side of a pairing is zero.
    pub fn build<I>(pairs: I) -> Result<Self, TableError>
    where
        I: IntoIterator<Item = MapPair>,
    {
        let entries: Vec<MapPair> = pairs.into_iter().collect();
        let mut canonical_seen = FxHashSet::default();
        let mut native_seen = FxHashSet::default();

        for (index, pair) in entries.iter().enumerate() {
            if pair.canonical == 0 || pair.native == 0 {
                return Err(TableError::EmptyPattern { index });
            }
            if !canonical_seen.insert(pair.canonical) {
                return Err(TableError::DuplicateMapping {
                    side: MapSide::Canonical,
                    value: pair.canonical,
                });
            }
            if !native_seen.insert(pair.native) {
                return Err(TableError::DuplicateMapping {
                    side: MapSide::Native,
                    value: pair.native,
                });
            }
        }

        Ok(Self { entries })
    }

    /// The empty table: everything translates to zero with full residue.
    #[must_use]
    pub const fn empty() -> Self {
        Self {
            entries: Vec::new(),
        }
    }

    /// Number of pairings.
    #[must_use]
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    /// Returns `true` when the table holds no pairings.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Translates native bits into canonical bits.
    ///
    /// Never fails; input bits without a counterpart are surfaced in
    /// [`Translated::unmapped`].
    #[must_use]
    pub fn encode(&self, native: u32) -> Translated {
        let mut bits = 0;
        let mut rest = native;
        for pair in &self.entries {
            if rest & pair.native == pair.native {
                bits |= pair.canonical;
                rest &= !pair.native;
            }
        }
        Translated {
            bits,
            unmapped: rest,
        }
    }

    /// Translates canonical bits into native bits; the mirror of
    /// [`BitTable::encode`] with the same residue contract.
    #[must_use]
    pub fn decode(&self, canonical: u32) -> Translated {
        let mut bits = 0;
        let mut rest = canonical;
        for pair in &self.entries {
            if rest & pair.canonical == pair.canonical {
                bits |= pair.native;
                rest &= !pair.canonical;
            }
        }
        Translated {
            bits,
            unmapped: rest,
        }
    }
}

/// Builds a [`BitTable`] from an ordered pair sequence.
///
/// Free-function spelling of [`BitTable::build`] for callers assembling
/// tables from configuration.
pub fn build_table<I>(pairs: I) -> Result<BitTable, TableError>
where
    I: IntoIterator<Item = MapPair>,
{
    BitTable::build(pairs)
}
