// ABOUTME: Parses whitespace-separated "name quantity" sequences into food quantities
// ABOUTME: Pure and synchronous; quantities default to 1 when the next token is not numeric
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Fridge Companion Contributors

//! # Food Quantity Parser
//!
//! Turns the argument tokens of commands such as `新增 蘋果 3 香蕉` into
//! `[(蘋果, 3), (香蕉, 1)]`. Parsing is greedy and left to right:
//!
//! - if the token after a name is an integer literal, it is that name's
//!   quantity and both tokens are consumed
//! - otherwise the name gets quantity 1 and only the name is consumed
//!
//! Names are single tokens. An integer literal in name position, a zero
//! quantity, or a quantity that does not fit in `u32` is rejected.

use crate::models::FoodQuantity;
use thiserror::Error;

/// Rejected token sequence
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum MalformedCommand {
    /// A numeric token appeared where a food name was expected
    #[error("expected a food name at position {position}, found quantity '{token}'")]
    MissingName {
        /// Zero-based token index
        position: usize,
        /// Offending token
        token: String,
    },
    /// The quantity is zero, negative, or too large
    #[error("quantity '{token}' at position {position} must be a positive integer")]
    InvalidQuantity {
        /// Zero-based token index
        position: usize,
        /// Offending token
        token: String,
    },
}

/// Split free text into tokens on any whitespace, including U+3000
#[must_use]
pub fn tokenize(text: &str) -> Vec<&str> {
    text.split_whitespace().collect()
}

/// Parse tokens into ordered `(name, quantity)` pairs
///
/// # Errors
///
/// Returns [`MalformedCommand`] when a quantity has no preceding name or is
/// not a positive `u32`
pub fn parse_food_quantities<S: AsRef<str>>(
    tokens: &[S],
) -> Result<Vec<FoodQuantity>, MalformedCommand> {
    let mut parsed = Vec::with_capacity(tokens.len());
    let mut position = 0;

    while let Some(token) = tokens.get(position) {
        let name = token.as_ref();
        if is_integer_literal(name) {
            return Err(MalformedCommand::MissingName {
                position,
                token: name.to_owned(),
            });
        }

        match tokens.get(position + 1).map(AsRef::as_ref) {
            Some(next) if is_integer_literal(next) => {
                let quantity = parse_quantity(next).ok_or_else(|| {
                    MalformedCommand::InvalidQuantity {
                        position: position + 1,
                        token: next.to_owned(),
                    }
                })?;
                parsed.push(FoodQuantity::new(name, quantity));
                position += 2;
            }
            _ => {
                parsed.push(FoodQuantity::new(name, 1));
                position += 1;
            }
        }
    }

    Ok(parsed)
}

/// Optional sign followed by ASCII or full-width digits
fn is_integer_literal(token: &str) -> bool {
    let digits = token
        .strip_prefix(['-', '+', '－', '＋'])
        .unwrap_or(token);
    !digits.is_empty() && digits.chars().all(|c| normalize_digit(c).is_some())
}

fn parse_quantity(token: &str) -> Option<u32> {
    if token.starts_with(['-', '－']) {
        return None;
    }
    let digits: String = token
        .trim_start_matches(['+', '＋'])
        .chars()
        .filter_map(normalize_digit)
        .collect();
    digits.parse::<u32>().ok().filter(|quantity| *quantity > 0)
}

fn normalize_digit(c: char) -> Option<char> {
    match c {
        '0'..='9' => Some(c),
        '０'..='９' => char::from_u32(u32::from(c) - u32::from('０') + u32::from('0')),
        _ => None,
    }
}
