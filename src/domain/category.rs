#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Category {
    Features,
    Fixes,
    Maintenance,
}

impl Category {
    /// Emission order of the ticket sections.
    pub const ORDERED: [Category; 3] = [Category::Features, Category::Fixes, Category::Maintenance];

    pub fn as_str(&self) -> &'static str {
        match self {
            Category::Features => "features",
            Category::Fixes => "fixes",
            Category::Maintenance => "maintenance",
        }
    }

    pub fn heading(&self) -> &'static str {
        match self {
            Category::Features => "## ✨ New Features & Enhancements",
            Category::Fixes => "## 🐛 Bug Fixes",
            Category::Maintenance => "## 🔧 Technical & Maintenance",
        }
    }

    /// Maps a JIRA issue type name onto its bucket. Unknown types are
    /// treated as maintenance work.
    pub fn from_issue_type(issue_type: &str) -> Self {
        match issue_type {
            "Story" | "New Feature" | "Improvement" | "Epic" => Category::Features,
            "Bug" | "Defect" => Category::Fixes,
            _ => Category::Maintenance,
        }
    }
}
