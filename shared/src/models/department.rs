//! Department Model

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Department {
    pub id: i64,
    pub name: String,
    pub description: Option<String>,
    pub created_at: DateTime<Utc>,
}

/// Departments created on first start when seeding is enabled
pub const DEFAULT_DEPARTMENTS: [(&str, &str); 10] = [
    ("Information Technology", "Software Development, IT Support, and System Administration"),
    ("Human Resources", "Recruitment, Employee Relations, and HR Operations"),
    ("Finance & Accounting", "Financial Planning, Accounting, and Budget Management"),
    ("Sales & Marketing", "Sales Operations, Digital Marketing, and Brand Management"),
    ("Operations", "Business Operations, Process Management, and Quality Assurance"),
    ("Customer Support", "Customer Service, Technical Support, and Client Relations"),
    ("Research & Development", "Product Development, Innovation, and Technical Research"),
    ("Legal & Compliance", "Legal Affairs, Regulatory Compliance, and Risk Management"),
    ("Supply Chain", "Procurement, Logistics, and Inventory Management"),
    ("Product Management", "Product Strategy, Roadmap Planning, and Market Analysis"),
];
