//! Arabic collation for table sorting
//!
//! Raw codepoint order already matches the Arabic alphabet for the base
//! letters, but hamza carriers, ta marbuta and presentation marks do not
//! collate where readers expect them. Keys fold those forms onto their base
//! letters and drop harakat and tatweel before comparing.

use std::cmp::Ordering;

/// Build a collation key for an Arabic (or mixed) string
pub fn collation_key(s: &str) -> String {
    let mut key = String::with_capacity(s.len());
    for c in s.chars() {
        match c {
            // harakat, dagger alef, tatweel carry no ordering weight
            '\u{064B}'..='\u{0652}' | '\u{0670}' | '\u{0640}' => {}
            'آ' | 'أ' | 'إ' | 'ٱ' => key.push('ا'),
            'ؤ' => key.push('و'),
            'ئ' | 'ى' => key.push('ي'),
            'ة' => key.push('ه'),
            _ => {
                for folded in c.to_lowercase() {
                    key.push(folded);
                }
            }
        }
    }
    key
}

/// Compare two strings under Arabic collation
///
/// Keys that fold to the same value fall back to raw comparison so the
/// ordering stays total.
pub fn compare(a: &str, b: &str) -> Ordering {
    collation_key(a)
        .cmp(&collation_key(b))
        .then_with(|| a.cmp(b))
}
