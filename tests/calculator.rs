//! Calculator Integration Tests
//!
//! Tests for the public calculation API through `BusinessCaseData`

// Include test modules from calculator/ directory
#[path = "calculator/test_properties.rs"]
mod test_properties;

#[path = "calculator/test_scenarios.rs"]
mod test_scenarios;

#[path = "calculator/test_merge.rs"]
mod test_merge;

#[path = "calculator/test_sensitivity.rs"]
mod test_sensitivity;
