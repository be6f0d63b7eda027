//! Spell out numerals so they can be looked up in the dictionary.
//!
//! Readings follow common English conventions: cardinals use "and" after
//! hundreds ("one hundred and five"), four-digit numbers are read as years
//! ("nineteen eighty four"), and `21st`-style tokens become ordinals.

const ONES: [&str; 20] = [
    "zero", "one", "two", "three", "four", "five", "six", "seven", "eight", "nine", "ten",
    "eleven", "twelve", "thirteen", "fourteen", "fifteen", "sixteen", "seventeen", "eighteen",
    "nineteen",
];

const TENS: [&str; 10] = [
    "", "", "twenty", "thirty", "forty", "fifty", "sixty", "seventy", "eighty", "ninety",
];

const SCALES: &[(u64, &str)] = &[
    (1_000_000_000_000_000_000, "quintillion"),
    (1_000_000_000_000_000, "quadrillion"),
    (1_000_000_000_000, "trillion"),
    (1_000_000_000, "billion"),
    (1_000_000, "million"),
    (1_000, "thousand"),
];

const ORDINAL_SUFFIXES: &[&str] = &["nd", "rd", "st", "th"];

/// Result of running one token through numeral expansion.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Expansion {
    /// The token, unchanged or spelled out as a single word.
    Word(String),
    /// A numeral spelled out as several words, in reading order.
    Words(Vec<String>),
    /// A numeral that could not be read. Poisons the containing title.
    Unresolvable,
}

/// Expand a digit token into words; other tokens pass through unchanged.
pub fn expand(token: &str) -> Expansion {
    let spelled = if is_digits(token) {
        if token.len() == 4 {
            token.parse().ok().map(year)
        } else {
            token.parse().ok().map(cardinal)
        }
    } else if let Some(digits) = ordinal_digits(token) {
        digits.parse().ok().map(ordinal)
    } else {
        return Expansion::Word(token.to_string());
    };

    match spelled {
        Some(mut words) if words.len() == 1 => Expansion::Word(words.remove(0)),
        Some(words) => Expansion::Words(words),
        None => {
            log::debug!("Could not read numeral {:?}", token);
            Expansion::Unresolvable
        }
    }
}

fn is_digits(s: &str) -> bool {
    !s.is_empty() && s.bytes().all(|b| b.is_ascii_digit())
}

/// Numeric part of an ordinal token like `21st`, if it is one.
fn ordinal_digits(token: &str) -> Option<&str> {
    ORDINAL_SUFFIXES.iter().find_map(|suffix| {
        token
            .strip_suffix(suffix)
            .filter(|digits| is_digits(digits))
    })
}

/// Words for 1..=99.
fn below_hundred(n: u64, out: &mut Vec<String>) {
    debug_assert!(n > 0 && n < 100);
    if n < 20 {
        out.push(ONES[n as usize].to_string());
    } else {
        out.push(TENS[(n / 10) as usize].to_string());
        if n % 10 > 0 {
            out.push(ONES[(n % 10) as usize].to_string());
        }
    }
}

/// Words for 1..=999; `and_before_tail` inserts "and" before a bare
/// sub-hundred remainder.
fn below_thousand(n: u64, and_before_tail: bool, out: &mut Vec<String>) {
    let hundreds = n / 100;
    let rest = n % 100;
    if hundreds > 0 {
        out.push(ONES[hundreds as usize].to_string());
        out.push("hundred".to_string());
        if rest > 0 {
            out.push("and".to_string());
        }
    } else if rest > 0 && and_before_tail {
        out.push("and".to_string());
    }
    if rest > 0 {
        below_hundred(rest, out);
    }
}

/// Cardinal reading: `1234` → "one thousand two hundred and thirty four".
pub fn cardinal(n: u64) -> Vec<String> {
    if n == 0 {
        return vec![ONES[0].to_string()];
    }
    let mut out = Vec::new();
    let mut rest = n;
    for &(scale, name) in SCALES {
        if rest >= scale {
            below_thousand(rest / scale, false, &mut out);
            out.push(name.to_string());
            rest %= scale;
        }
    }
    if rest > 0 {
        below_thousand(rest, !out.is_empty(), &mut out);
    }
    out
}

/// Year reading: `1984` → "nineteen eighty four", `1905` → "nineteen oh
/// five", `1900` → "nineteen hundred".
///
/// Years that don't split naturally (`2005`, `0042`) fall back to the
/// cardinal reading.
pub fn year(n: u64) -> Vec<String> {
    let high = n / 100;
    let low = n % 100;
    if high == 0 || (high % 10 == 0 && low < 10) || high >= 100 {
        return cardinal(n);
    }
    let mut out = cardinal(high);
    match low {
        0 => out.push("hundred".to_string()),
        1..=9 => {
            out.push("oh".to_string());
            out.extend(cardinal(low));
        }
        _ => out.extend(cardinal(low)),
    }
    out
}

/// Ordinal reading: `21` → "twenty first", `100` → "one hundredth".
pub fn ordinal(n: u64) -> Vec<String> {
    let mut out = cardinal(n);
    if let Some(last) = out.pop() {
        out.push(ordinal_word(&last));
    }
    out
}

fn ordinal_word(word: &str) -> String {
    let irregular = match word {
        "one" => Some("first"),
        "two" => Some("second"),
        "three" => Some("third"),
        "five" => Some("fifth"),
        "eight" => Some("eighth"),
        "nine" => Some("ninth"),
        "twelve" => Some("twelfth"),
        _ => None,
    };
    match irregular {
        Some(w) => w.to_string(),
        None => match word.strip_suffix('y') {
            Some(stem) => format!("{}ieth", stem),
            None => format!("{}th", word),
        },
    }
}
