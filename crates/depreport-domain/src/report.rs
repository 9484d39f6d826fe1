use depreport_types::Section;

/// Counters describing one engine run.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct RunStats {
    pub direct: usize,
    pub transitive: usize,
    pub tree_nodes: usize,
    pub archives_inspected: usize,
    pub repositories: usize,
    pub repositories_probed: usize,
    pub repositories_blacklisted: usize,
}

#[derive(Clone, Debug)]
pub struct DomainReport {
    pub sections: Vec<Section>,
    pub stats: RunStats,
}
