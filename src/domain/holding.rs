//! Client holding rows shown on the holding detail screen.

use serde::{Deserialize, Serialize};

/// A client's position in the security affected by an action.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ClientHolding {
    pub id: String,
    pub chinese_name: String,
    pub english_name: String,
    pub account_number: String,
    pub quantity: u64,
}

impl ClientHolding {
    /// Quantity with thousands separators, e.g. `2,500`.
    #[must_use]
    pub fn formatted_quantity(&self) -> String {
        let digits = self.quantity.to_string();
        let mut out = String::with_capacity(digits.len() + digits.len() / 3);
        for (idx, ch) in digits.chars().enumerate() {
            if idx > 0 && (digits.len() - idx) % 3 == 0 {
                out.push(',');
            }
            out.push(ch);
        }
        out
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn holding(quantity: u64) -> ClientHolding {
        ClientHolding {
            id: "client1".into(),
            chinese_name: "张三".into(),
            english_name: "Zhang San".into(),
            account_number: "12345678".into(),
            quantity,
        }
    }

    #[test]
    fn groups_thousands() {
        assert_eq!(holding(500).formatted_quantity(), "500");
        assert_eq!(holding(2500).formatted_quantity(), "2,500");
        assert_eq!(holding(1_234_567).formatted_quantity(), "1,234,567");
    }
}
