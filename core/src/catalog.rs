//! The five remote files a probe pass measures.
use probe_types::PayloadFormat;

/// One remote dataset file under the base URL.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Dataset {
    Nodes,
    HighwayEdges,
    RailwayEdges,
    WaterwayEdges,
    Demand,
}

impl Dataset {
    /// Probe order. Matches the order of [`SECTIONS`] flattened.
    pub const ALL: [Dataset; 5] = [
        Dataset::Nodes,
        Dataset::HighwayEdges,
        Dataset::RailwayEdges,
        Dataset::WaterwayEdges,
        Dataset::Demand,
    ];

    /// The three per-mode adjacency files.
    pub const EDGES: [Dataset; 3] = [
        Dataset::HighwayEdges,
        Dataset::RailwayEdges,
        Dataset::WaterwayEdges,
    ];

    #[must_use]
    pub const fn file_name(self) -> &'static str {
        match self {
            Dataset::Nodes => "intermodal-217.csv",
            Dataset::HighwayEdges => "H-adj.pickle",
            Dataset::RailwayEdges => "R-adj.pickle",
            Dataset::WaterwayEdges => "W-adj.pickle",
            Dataset::Demand => "demand.pickle",
        }
    }

    #[must_use]
    pub const fn format(self) -> PayloadFormat {
        match self {
            Dataset::Nodes => PayloadFormat::Csv,
            Dataset::HighwayEdges
            | Dataset::RailwayEdges
            | Dataset::WaterwayEdges
            | Dataset::Demand => PayloadFormat::Pickle,
        }
    }

    /// Short label used in the summary table.
    #[must_use]
    pub const fn summary_label(self) -> &'static str {
        match self {
            Dataset::Nodes => "Load nodes CSV",
            Dataset::HighwayEdges => "Load Highway edges",
            Dataset::RailwayEdges => "Load Railway edges",
            Dataset::WaterwayEdges => "Load Waterway edges",
            Dataset::Demand => "Load demand data",
        }
    }

    /// Operation name, e.g. `Load Highway edges (H-adj.pickle)`.
    #[must_use]
    pub fn title(self) -> String {
        format!("{} ({})", self.summary_label(), self.file_name())
    }

    #[must_use]
    pub const fn is_edges(self) -> bool {
        matches!(
            self,
            Dataset::HighwayEdges | Dataset::RailwayEdges | Dataset::WaterwayEdges
        )
    }
}

/// A titled group of datasets, printed as one banner.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Section {
    pub title: &'static str,
    pub datasets: &'static [Dataset],
}

pub const SECTIONS: [Section; 3] = [
    Section {
        title: "EXAMPLE 1: Basic Node/Edge Exploration",
        datasets: &[Dataset::Nodes],
    },
    Section {
        title: "EXAMPLE 1 & 2: Load Edges by Mode",
        datasets: &Dataset::EDGES,
    },
    Section {
        title: "EXAMPLE 3: Demand Lookup",
        datasets: &[Dataset::Demand],
    },
];
