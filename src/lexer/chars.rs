//! Character classes used by the scanner
//!
//! Classes follow Unicode general categories: letters are `L*`, digits are
//! `Nd`, and the symbol class is every `S*` or `P*` character except `;`.

use unicode_general_category::{get_general_category, GeneralCategory};

/// Punctuation kept out of the symbol class
const EXCLUDED_SYMBOLS: &[char] = &[';'];

/// Characters skipped between tokens
pub fn is_skippable_whitespace(c: char) -> bool {
    matches!(c, ' ' | '\t' | '\n')
}

/// Characters that end an identifier or numeric literal
pub fn is_terminating_whitespace(c: char) -> bool {
    c.is_whitespace()
}

pub fn is_letter(c: char) -> bool {
    matches!(
        get_general_category(c),
        GeneralCategory::UppercaseLetter
            | GeneralCategory::LowercaseLetter
            | GeneralCategory::TitlecaseLetter
            | GeneralCategory::ModifierLetter
            | GeneralCategory::OtherLetter
    )
}

pub fn is_decimal_digit(c: char) -> bool {
    get_general_category(c) == GeneralCategory::DecimalNumber
}

/// Symbol or punctuation allowed in identifiers
pub fn is_symbol(c: char) -> bool {
    if EXCLUDED_SYMBOLS.contains(&c) {
        return false;
    }
    matches!(
        get_general_category(c),
        GeneralCategory::MathSymbol
            | GeneralCategory::CurrencySymbol
            | GeneralCategory::ModifierSymbol
            | GeneralCategory::OtherSymbol
            | GeneralCategory::ConnectorPunctuation
            | GeneralCategory::DashPunctuation
            | GeneralCategory::OpenPunctuation
            | GeneralCategory::ClosePunctuation
            | GeneralCategory::InitialPunctuation
            | GeneralCategory::FinalPunctuation
            | GeneralCategory::OtherPunctuation
    )
}

pub fn is_ident_start(c: char) -> bool {
    is_letter(c) || is_symbol(c)
}

pub fn is_ident_continue(c: char) -> bool {
    is_letter(c) || is_decimal_digit(c) || is_symbol(c)
}

pub fn is_numeric_continue(c: char) -> bool {
    is_decimal_digit(c) || matches!(c, '-' | '+' | '.')
}
