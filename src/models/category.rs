use std::fmt::Display;

use serde::{Deserialize, Serialize};

/// The fixed set of review facets the zero-shot classifier scores against
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, Hash)]
#[serde(rename_all = "snake_case")]
pub enum Category {
    ServiceQuality,
    ValueForMoney,
    FoodQuality,
    Ambiance,
}

impl Category {
    /// All categories in declaration order
    pub const ALL: [Category; 4] = [
        Category::ServiceQuality,
        Category::ValueForMoney,
        Category::FoodQuality,
        Category::Ambiance,
    ];

    /// The candidate label sent to the classifier for this category
    pub fn label(&self) -> &'static str {
        match self {
            Category::ServiceQuality => "service quality",
            Category::ValueForMoney => "value for money",
            Category::FoodQuality => "food quality",
            Category::Ambiance => "ambiance",
        }
    }

    /// Maps a classifier label back into the fixed set
    ///
    /// Accepts both the spaced form the classifier echoes back and the
    /// snake_case form used on the wire. Returns `None` for out-of-set labels.
    pub fn from_label(label: &str) -> Option<Category> {
        match label.trim().to_lowercase().as_str() {
            "service quality" | "service_quality" => Some(Category::ServiceQuality),
            "value for money" | "value_for_money" => Some(Category::ValueForMoney),
            "food quality" | "food_quality" => Some(Category::FoodQuality),
            "ambiance" => Some(Category::Ambiance),
            _ => None,
        }
    }
}

impl Display for Category {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.label())
    }
}

/// Category assigned to a review after classification
///
/// A review carries `NotApplicable` whenever its rating is missing or below
/// the qualifying threshold, or when the classifier's top label falls outside
/// the fixed category set. Out-of-set labels are an expected outcome, not an
/// error.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
#[serde(untagged)]
pub enum ReviewCategory {
    Known(Category),
    /// Serialized as JSON null
    NotApplicable,
}

impl ReviewCategory {
    /// Returns the category if one was assigned
    pub fn as_category(&self) -> Option<Category> {
        match self {
            ReviewCategory::Known(category) => Some(*category),
            ReviewCategory::NotApplicable => None,
        }
    }

    pub fn is_applicable(&self) -> bool {
        matches!(self, ReviewCategory::Known(_))
    }
}

impl From<Option<Category>> for ReviewCategory {
    fn from(category: Option<Category>) -> Self {
        match category {
            Some(category) => ReviewCategory::Known(category),
            None => ReviewCategory::NotApplicable,
        }
    }
}

impl Display for ReviewCategory {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            ReviewCategory::Known(category) => write!(f, "{}", category),
            ReviewCategory::NotApplicable => write!(f, "not applicable"),
        }
    }
}
