use std::fmt;
use std::str::FromStr;

/// Reporting period a transaction is filed under.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Category {
    Daily,
    Weekly,
    Monthly,
}

impl Category {
    pub fn as_str(&self) -> &'static str {
        match self {
            Category::Daily => "daily",
            Category::Weekly => "weekly",
            Category::Monthly => "monthly",
        }
    }

    pub fn title(&self) -> &'static str {
        match self {
            Category::Daily => "Daily",
            Category::Weekly => "Weekly",
            Category::Monthly => "Monthly",
        }
    }

    pub fn all() -> Vec<Category> {
        vec![Category::Daily, Category::Weekly, Category::Monthly]
    }

    pub fn index(&self) -> usize {
        match self {
            Category::Daily => 0,
            Category::Weekly => 1,
            Category::Monthly => 2,
        }
    }

    pub fn next(&self) -> Category {
        match self {
            Category::Daily => Category::Weekly,
            Category::Weekly => Category::Monthly,
            Category::Monthly => Category::Daily,
        }
    }

    pub fn previous(&self) -> Category {
        match self {
            Category::Daily => Category::Monthly,
            Category::Weekly => Category::Daily,
            Category::Monthly => Category::Weekly,
        }
    }
}

impl fmt::Display for Category {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[error("unknown category '{0}' (expected daily, weekly or monthly)")]
pub struct UnknownCategory(pub String);

impl FromStr for Category {
    type Err = UnknownCategory;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_lowercase().as_str() {
            "daily" => Ok(Category::Daily),
            "weekly" => Ok(Category::Weekly),
            "monthly" => Ok(Category::Monthly),
            other => Err(UnknownCategory(other.to_string())),
        }
    }
}
