use serde::{Deserialize, Deserializer, Serialize, Serializer};
use std::fmt;

/// Label stored on transactions synthesized from a bill that has no category.
pub const BILLS_LABEL: &str = "Bills";

/// A transaction category.
///
/// The `transactions.category` column is free text. Clients normally send the
/// numeric id of a category, but older rows and bill payments carry a plain
/// label such as `"Bills"`. Parsing is total, so every stored value maps to
/// exactly one variant and is written back unchanged.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub enum Category {
    Id(i32),
    Label(String),
}

impl Category {
    pub fn parse(raw: &str) -> Self {
        let trimmed = raw.trim();
        match trimmed.parse::<i32>() {
            Ok(id) => Category::Id(id),
            Err(_) => Category::Label(trimmed.to_string()),
        }
    }

    /// Category of the expense recorded when a bill is marked paid. Ids that
    /// cannot be a serial key (`0` and below) fall back to the label too.
    pub fn for_bill(category_id: Option<i32>) -> Self {
        match category_id {
            Some(id) if id > 0 => Category::Id(id),
            _ => Category::Label(BILLS_LABEL.to_string()),
        }
    }

    pub fn id(&self) -> Option<i32> {
        match self {
            Category::Id(id) => Some(*id),
            Category::Label(_) => None,
        }
    }

    pub fn is_empty(&self) -> bool {
        matches!(self, Category::Label(label) if label.is_empty())
    }
}

impl fmt::Display for Category {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Category::Id(id) => write!(f, "{}", id),
            Category::Label(label) => f.write_str(label),
        }
    }
}

impl Serialize for Category {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.collect_str(self)
    }
}

impl<'de> Deserialize<'de> for Category {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        #[derive(Deserialize)]
        #[serde(untagged)]
        enum Raw {
            Id(i32),
            Text(String),
        }

        Ok(match Raw::deserialize(deserializer)? {
            Raw::Id(id) => Category::Id(id),
            Raw::Text(text) => Category::parse(&text),
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn numeric_text_is_an_id() {
        assert_eq!(Category::parse("7"), Category::Id(7));
        assert_eq!(Category::parse(" 12 "), Category::Id(12));
    }

    #[test]
    fn free_text_is_a_label() {
        assert_eq!(Category::parse("Bills"), Category::Label("Bills".into()));
        assert_eq!(Category::parse("3.5"), Category::Label("3.5".into()));
    }

    #[test]
    fn bill_without_category_falls_back_to_bills_label() {
        assert_eq!(Category::for_bill(Some(4)), Category::Id(4));
        assert_eq!(Category::for_bill(None).to_string(), "Bills");
        assert_eq!(Category::for_bill(Some(0)), Category::Label(BILLS_LABEL.into()));
    }

    #[test]
    fn accepts_number_or_string_on_the_wire() {
        let from_number: Category = serde_json::from_str("5").unwrap();
        let from_string: Category = serde_json::from_str("\"5\"").unwrap();
        let label: Category = serde_json::from_str("\"Groceries\"").unwrap();

        assert_eq!(from_number, Category::Id(5));
        assert_eq!(from_string, Category::Id(5));
        assert_eq!(label.id(), None);
        assert_eq!(serde_json::to_string(&from_number).unwrap(), "\"5\"");
    }
}
