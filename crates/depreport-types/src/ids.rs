//! Stable identifiers for report sections.
//!
//! Section ids double as anchors in rendered output; they never change between runs.

pub const SECTION_NO_DEPENDENCIES: &str = "dependencies";
pub const SECTION_PROJECT_DEPENDENCIES: &str = "dependencies.project";
pub const SECTION_TRANSITIVE_DEPENDENCIES: &str = "dependencies.transitive";
pub const SECTION_DEPENDENCY_TREE: &str = "dependencies.tree";
pub const SECTION_LICENSES: &str = "dependencies.licenses";
pub const SECTION_FILE_DETAILS: &str = "dependencies.file_details";
pub const SECTION_REPOSITORY_LOCATIONS: &str = "dependencies.repository_locations";

// Tree node identifier prefixes.
pub const NODE_DETAIL_PREFIX: &str = "_dep";
pub const NODE_TOGGLE_PREFIX: &str = "_img";
