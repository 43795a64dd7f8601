//! Per-character classification.

use std::fmt;

/// Quotation marks rendered by the latin face even in CJK text.
const LATIN_LIKE: &[char] = &['\u{2018}', '\u{2019}', '\u{201C}', '\u{201D}'];

/// Full-width punctuation with its own subset.
///
/// `、` and `。` are deliberately absent: they always go to the CJK bucket.
const CJK_PUNCT: &[char] = &[
    '，', '．', '：', '；', '！', '？', '「', '」', '『', '』', '（', '）', '《', '》', '〈', '〉',
    '【', '】', '〔', '〕', '～', '・',
];

/// Marks added to the normal CJK bucket whether or not the corpus uses them.
pub const ALWAYS_CJK: [char; 2] = ['、', '。'];

/// Typeface context of a character.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub enum Region {
    Normal,
    /// Inside a blockquote.
    Sans,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub enum CharClass {
    Latin,
    Cjk,
    CjkPunct,
}

/// One of the six output buckets.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct Bucket {
    pub region: Region,
    pub class: CharClass,
}

impl Bucket {
    pub const ALL: [Self; 6] = [
        Self::new(Region::Normal, CharClass::Latin),
        Self::new(Region::Normal, CharClass::Cjk),
        Self::new(Region::Normal, CharClass::CjkPunct),
        Self::new(Region::Sans, CharClass::Latin),
        Self::new(Region::Sans, CharClass::Cjk),
        Self::new(Region::Sans, CharClass::CjkPunct),
    ];

    pub const fn new(region: Region, class: CharClass) -> Self {
        Self { region, class }
    }

    /// Position in [`Bucket::ALL`].
    pub const fn index(self) -> usize {
        let class = match self.class {
            CharClass::Latin => 0,
            CharClass::Cjk => 1,
            CharClass::CjkPunct => 2,
        };
        match self.region {
            Region::Normal => class,
            Region::Sans => 3 + class,
        }
    }

    /// Output file stem, e.g. `cjk-punct-sans`.
    pub const fn name(self) -> &'static str {
        match (self.region, self.class) {
            (Region::Normal, CharClass::Latin) => "latin",
            (Region::Normal, CharClass::Cjk) => "cjk",
            (Region::Normal, CharClass::CjkPunct) => "cjk-punct",
            (Region::Sans, CharClass::Latin) => "latin-sans",
            (Region::Sans, CharClass::Cjk) => "cjk-sans",
            (Region::Sans, CharClass::CjkPunct) => "cjk-punct-sans",
        }
    }
}

impl fmt::Display for Bucket {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

/// Classify a single character.
#[inline]
pub fn classify(c: char) -> CharClass {
    if c <= '\u{FF}' || LATIN_LIKE.contains(&c) {
        CharClass::Latin
    } else if CJK_PUNCT.contains(&c) {
        CharClass::CjkPunct
    } else {
        CharClass::Cjk
    }
}
