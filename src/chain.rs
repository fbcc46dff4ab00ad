use alloc::vec::Vec;
use core::slice;

use displaydoc::Display;

use crate::error::AllocationError;
use crate::fat::{Entry, Table, is_valid_entry};
use crate::types::ClusterID;

const INITIAL_CAPACITY: usize = 16;

/// Reason why a candidate chain is not part of chain set
#[derive(Copy, Clone, Debug, Display, PartialEq, Eq)]
pub enum Defect {
    /// Cluster {cluster_id} holds invalid entry {value:#05X}
    InvalidEntry { cluster_id: ClusterID, value: u16 },
    /// Cluster {cluster_id} visited twice within one chain
    CycleDetected { cluster_id: ClusterID },
    /// Cluster {cluster_id} already belongs to another chain
    CrossLinked { cluster_id: ClusterID },
}

/// Clusters from chain head to the cluster holding end-of-chain marker, never empty
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Chain {
    clusters: Vec<ClusterID>,
}

impl Chain {
    pub fn head(&self) -> ClusterID {
        self.clusters[0]
    }

    pub fn clusters(&self) -> &[ClusterID] {
        &self.clusters
    }

    pub fn len(&self) -> usize {
        self.clusters.len()
    }

    pub fn contains(&self, cluster_id: ClusterID) -> bool {
        self.clusters.contains(&cluster_id)
    }
}

/// Candidate chain failed validation, with clusters walked before the defect
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Rejection {
    pub head: ClusterID,
    pub clusters: Vec<ClusterID>,
    pub defect: Defect,
}

impl Rejection {
    /// Lone cluster marked bad which no entry points to, an ordinary bad sector mark
    pub fn is_bad_cluster(&self) -> bool {
        let bad = u16::from(Entry::BadCluster);
        match self.defect {
            Defect::InvalidEntry { cluster_id, value } if value == bad => {
                cluster_id == self.head && self.clusters.len() == 1
            }
            _ => false,
        }
    }
}

#[derive(Copy, Clone, Debug, PartialEq, Eq)]
enum Mark {
    Unseen,
    OnPath,
    Committed,
    Rejected(Defect),
}

enum Outcome {
    Chain(Chain),
    Rejected(Rejection),
}

fn filled<T: Clone>(value: T, size: usize) -> Result<Vec<T>, AllocationError> {
    let mut vec = Vec::new();
    vec.try_reserve_exact(size)?;
    vec.resize(size, value);
    Ok(vec)
}

fn try_push<T>(vec: &mut Vec<T>, value: T) -> Result<(), AllocationError> {
    vec.try_reserve(1)?;
    vec.push(value);
    Ok(())
}

struct Walker<'a> {
    table: &'a Table,
    marks: Vec<Mark>,
}

impl<'a> Walker<'a> {
    fn mark(&mut self, clusters: &[ClusterID], mark: Mark) {
        clusters.iter().for_each(|cluster_id| self.marks[cluster_id.index()] = mark);
    }

    fn walk(&mut self, head: ClusterID) -> Result<Outcome, AllocationError> {
        let size = self.table.len();
        let mut clusters = Vec::new();
        let mut cluster_id = head;
        let defect = loop {
            match self.marks[cluster_id.index()] {
                Mark::Unseen => (),
                Mark::OnPath => break Defect::CycleDetected { cluster_id },
                Mark::Committed => break Defect::CrossLinked { cluster_id },
                Mark::Rejected(defect) => break defect,
            }
            self.marks[cluster_id.index()] = Mark::OnPath;
            try_push(&mut clusters, cluster_id)?;
            let value = self.table.entries()[cluster_id.index()];
            // Free is a valid marker, yet never within a chain
            let valid = is_valid_entry(value, size) && value != u16::from(Entry::Free);
            match Entry::classify(value, size) {
                Ok(Entry::Next(next)) if valid => cluster_id = next,
                Ok(Entry::Last) if valid => {
                    self.mark(&clusters, Mark::Committed);
                    return Ok(Outcome::Chain(Chain { clusters }));
                }
                _ => break Defect::InvalidEntry { cluster_id, value },
            }
        };
        self.mark(&clusters, Mark::Rejected(defect));
        Ok(Outcome::Rejected(Rejection { head, clusters, defect }))
    }
}

/// All disjoint cluster chains of a FAT, along with rejected candidates.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct ChainSet {
    chains: Vec<Chain>,
    rejections: Vec<Rejection>,
}

impl ChainSet {
    /// Scan clusters in ascending order, clusters no other entry points to first.
    ///
    /// Each cluster is walked at most once, a defective chain is recorded as
    /// rejection and never stops the scan. Fails only when out of memory.
    pub fn build(table: &Table) -> Result<Self, AllocationError> {
        let size = table.len();
        let first = ClusterID::FIRST.index();
        let mut referenced = filled(false, size)?;
        for &value in table.entries().iter().skip(first) {
            if let Ok(Entry::Next(next)) = Entry::classify(value, size) {
                referenced[next.index()] = true;
            }
        }

        let mut walker = Walker { table, marks: filled(Mark::Unseen, size)? };
        let mut chain_set = Self::default();
        chain_set.chains.try_reserve(INITIAL_CAPACITY)?;
        // Clusters left after heads are those on a cycle
        let heads = (first..size).filter(|&index| !referenced[index]);
        for index in heads.chain(first..size) {
            if walker.marks[index] != Mark::Unseen || table.entries()[index] == 0 {
                continue;
            }
            match walker.walk(ClusterID::from(index))? {
                Outcome::Chain(chain) => {
                    trace!("Chain at cluster {} length {}", chain.head(), chain.len());
                    try_push(&mut chain_set.chains, chain)?;
                }
                Outcome::Rejected(rejection) if rejection.is_bad_cluster() => {
                    debug!("Cluster {} marked bad", rejection.head);
                    try_push(&mut chain_set.rejections, rejection)?;
                }
                Outcome::Rejected(rejection) => {
                    warn!("Chain at cluster {} rejected: {}", rejection.head, rejection.defect);
                    try_push(&mut chain_set.rejections, rejection)?;
                }
            }
        }
        debug!("Found {} chains, {} rejected", chain_set.len(), chain_set.rejections.len());
        Ok(chain_set)
    }

    pub fn chains(&self) -> &[Chain] {
        &self.chains
    }

    pub fn iter(&self) -> slice::Iter<'_, Chain> {
        self.chains.iter()
    }

    pub fn len(&self) -> usize {
        self.chains.len()
    }

    pub fn is_empty(&self) -> bool {
        self.chains.is_empty()
    }

    pub fn rejections(&self) -> &[Rejection] {
        &self.rejections
    }

    /// No candidate chain rejected
    pub fn is_clean(&self) -> bool {
        self.rejections.is_empty()
    }

    /// Number of clusters occupied by chains
    pub fn num_clusters(&self) -> usize {
        self.chains.iter().map(Chain::len).sum()
    }
}

impl<'a> IntoIterator for &'a ChainSet {
    type Item = &'a Chain;
    type IntoIter = slice::Iter<'a, Chain>;

    fn into_iter(self) -> Self::IntoIter {
        self.chains.iter()
    }
}
