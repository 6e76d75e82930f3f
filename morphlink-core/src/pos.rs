//! Normalized tag enumerations
//!
//! Every backend speaks its own tagset. The enumerations here are the
//! backend-independent vocabulary the model is expressed in; the raw backend
//! string always travels next to the normalized value.

use std::fmt;
use std::str::FromStr;

use crate::error::UnknownTag;

macro_rules! tagset {
    (
        $(#[$meta:meta])*
        $name:ident, fallback = $fallback:ident {
            $($(#[$vmeta:meta])* $variant:ident),+ $(,)?
        }
    ) => {
        $(#[$meta])*
        #[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
        #[cfg_attr(
            feature = "serde",
            derive(serde::Serialize, serde::Deserialize),
            serde(try_from = "String")
        )]
        pub enum $name {
            $($(#[$vmeta])* $variant),+
        }

        impl $name {
            /// Every value, in declaration order
            pub const ALL: &'static [$name] = &[$($name::$variant),+];

            /// Canonical tag string
            pub const fn as_str(&self) -> &'static str {
                match self {
                    $($name::$variant => stringify!($variant)),+
                }
            }

            /// Total normalization of a backend tag string.
            ///
            /// Matching ignores surrounding whitespace and ASCII case. Strings
            /// outside the tagset map to the fallback value.
            pub fn from_tag(tag: &str) -> Self {
                tag.parse().unwrap_or($name::$fallback)
            }
        }

        impl FromStr for $name {
            type Err = UnknownTag;

            fn from_str(s: &str) -> Result<Self, Self::Err> {
                let key = s.trim();
                $(
                    if key.eq_ignore_ascii_case(stringify!($variant)) {
                        return Ok($name::$variant);
                    }
                )+
                Err(UnknownTag(s.to_string()))
            }
        }

        impl TryFrom<String> for $name {
            type Error = UnknownTag;

            fn try_from(tag: String) -> Result<Self, Self::Error> {
                tag.parse()
            }
        }

        impl fmt::Display for $name {
            fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
                f.write_str(self.as_str())
            }
        }
    };
}

tagset! {
    /// Part-of-speech tags (Sejong-derived tagset)
    #[allow(clippy::upper_case_acronyms)]
    Pos, fallback = NA {
        /// General noun
        NNG,
        /// Proper noun
        NNP,
        /// Bound noun
        NNB,
        /// Unit noun
        NNM,
        /// Numeral
        NR,
        /// Pronoun
        NP,
        /// Verb
        VV,
        /// Adjective
        VA,
        /// Auxiliary predicate
        VX,
        /// Positive copula
        VCP,
        /// Negative copula
        VCN,
        /// Determiner
        MM,
        /// General adverb
        MAG,
        /// Conjunctive adverb
        MAJ,
        /// Interjection
        IC,
        /// Subjective case particle
        JKS,
        /// Complemental case particle
        JKC,
        /// Adnominal case particle
        JKG,
        /// Objective case particle
        JKO,
        /// Adverbial case particle
        JKB,
        /// Vocative case particle
        JKV,
        /// Quotative case particle
        JKQ,
        /// Conjunctive particle
        JC,
        /// Auxiliary particle
        JX,
        /// Pre-final ending
        EP,
        /// Final ending
        EF,
        /// Connective ending
        EC,
        /// Nominalizing ending
        ETN,
        /// Adnominalizing ending
        ETM,
        /// Nominal prefix
        XPN,
        /// Predicate prefix
        XPV,
        /// Noun-derivational suffix
        XSN,
        /// Verb-derivational suffix
        XSV,
        /// Adjective-derivational suffix
        XSM,
        /// Other suffix
        XSO,
        /// Root
        XR,
        /// Closing punctuation
        SF,
        /// Separator punctuation
        SP,
        /// Quotation or bracket
        SS,
        /// Ellipsis
        SE,
        /// Hyphen or tilde
        SO,
        /// Other symbol
        SW,
        /// Foreign word
        SL,
        /// Chinese character
        SH,
        /// Number
        SN,
        /// Unknown, probably a noun
        NF,
        /// Unknown, probably a predicate
        NV,
        /// Unknown
        NA,
    }
}

impl Pos {
    /// Nouns, pronouns and numerals
    pub fn is_noun(&self) -> bool {
        matches!(
            self,
            Pos::NNG | Pos::NNP | Pos::NNB | Pos::NNM | Pos::NR | Pos::NP
        )
    }

    /// Verbs, adjectives, auxiliaries and copulas
    pub fn is_predicate(&self) -> bool {
        matches!(
            self,
            Pos::VV | Pos::VA | Pos::VX | Pos::VCP | Pos::VCN
        )
    }

    /// Determiners and adverbs
    pub fn is_modifier(&self) -> bool {
        matches!(self, Pos::MM | Pos::MAG | Pos::MAJ)
    }

    /// Particles
    pub fn is_postposition(&self) -> bool {
        matches!(
            self,
            Pos::JKS
                | Pos::JKC
                | Pos::JKG
                | Pos::JKO
                | Pos::JKB
                | Pos::JKV
                | Pos::JKQ
                | Pos::JC
                | Pos::JX
        )
    }

    /// Endings
    pub fn is_ending(&self) -> bool {
        matches!(self, Pos::EP | Pos::EF | Pos::EC | Pos::ETN | Pos::ETM)
    }

    /// Prefixes, suffixes and roots
    pub fn is_affix(&self) -> bool {
        self.is_suffix() || matches!(self, Pos::XPN | Pos::XPV | Pos::XR)
    }

    /// Derivational suffixes
    pub fn is_suffix(&self) -> bool {
        matches!(self, Pos::XSN | Pos::XSV | Pos::XSM | Pos::XSO)
    }

    /// Punctuation, symbols, foreign words and numbers
    pub fn is_symbol(&self) -> bool {
        matches!(
            self,
            Pos::SF
                | Pos::SP
                | Pos::SS
                | Pos::SE
                | Pos::SO
                | Pos::SW
                | Pos::SL
                | Pos::SH
                | Pos::SN
        )
    }

    /// Tags a backend emits when it could not classify the token
    pub fn is_unknown(&self) -> bool {
        matches!(self, Pos::NF | Pos::NV | Pos::NA)
    }
}

tagset! {
    /// Dependency relation labels (phrase-level tags)
    #[allow(clippy::upper_case_acronyms)]
    Label, fallback = Undefined {
        /// Sentence
        S,
        /// Quotative clause
        Q,
        /// Noun phrase
        NP,
        /// Verb phrase
        VP,
        /// Copula phrase
        VNP,
        /// Adverb phrase
        AP,
        /// Determiner phrase
        DP,
        /// Interjection phrase
        IP,
        /// Pseudo phrase
        X,
        /// Left parenthesis or quote
        L,
        /// Right parenthesis or quote
        R,
        /// Parenthetical
        PRN,
        /// Label outside the set
        Undefined,
    }
}
