//! Input cleanup and read-out formatting for the collected answers.

use super::sequencer::Step;

/// A non-negative integer amount in 万円, kept as its decimal digits so
/// no length of input is ever rejected or truncated.
#[derive(Clone, Debug, PartialEq, Eq, Hash)]
pub struct Amount(String);

impl Amount {
    /// Digits without leading zeros; zero is `"0"`.
    pub fn digits(&self) -> &str {
        &self.0
    }
}

impl From<u64> for Amount {
    fn from(value: u64) -> Self {
        Amount(value.to_string())
    }
}

impl std::fmt::Display for Amount {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(&self.0)
    }
}

/// Keeps only ASCII digits. An empty result means the field is unset.
pub fn sanitize_amount(raw: &str) -> Option<Amount> {
    let digits: String = raw.chars().filter(|c| c.is_ascii_digit()).collect();
    if digits.is_empty() {
        return None;
    }
    let trimmed = digits.trim_start_matches('0');
    Some(Amount(if trimmed.is_empty() {
        "0".to_string()
    } else {
        trimmed.to_string()
    }))
}

/// Gate for the proceed button: the amount must be a non-negative integer.
pub fn can_proceed(amount: Option<&Amount>) -> bool {
    amount.is_some()
}

/// Groups a digit string by thousands the way the ja-JP locale does.
pub fn group_thousands(digits: &str) -> String {
    let mut out = String::with_capacity(digits.len() + digits.len() / 3);
    for (i, ch) in digits.chars().enumerate() {
        if i > 0 && (digits.len() - i) % 3 == 0 {
            out.push(',');
        }
        out.push(ch);
    }
    out
}

/// What the input box shows for a stored amount.
pub fn field_text(amount: Option<&Amount>) -> String {
    amount.map(|a| a.digits().to_string()).unwrap_or_default()
}

/// Read-out of a stored amount. Unset reads as zero.
pub fn format_man_yen(amount: Option<&Amount>) -> String {
    format!("{}万円", group_thousands(amount.map_or("0", Amount::digits)))
}

/// Text shown at the right of the header.
pub fn progress_label(step: Step) -> String {
    if step.is_terminal() {
        "結果".to_string()
    } else {
        format!("質問進行: {}/3", step.index().clamp(1, 3))
    }
}
